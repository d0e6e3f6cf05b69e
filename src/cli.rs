use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use resbot_sync::Rewrite;

#[derive(Debug, Parser)]
#[command(name = "resbot", version, about = "Tracks translated worksheets and reports what changed")]
pub struct Cli {
    /// Configuration file (.toml, .yaml or .json)
    #[arg(long, global = true, env = "RESBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the bot over the stored snapshots
    Run {
        /// Only process this language (plus English)
        #[arg(long)]
        lang: Option<String>,
        /// Rewrite outputs even if nothing changed
        #[arg(long, value_enum)]
        rewrite: Option<RewriteArg>,
        /// Log writes instead of performing them
        #[arg(long)]
        read_only: bool,
    },
    /// Print what changed between two snapshot documents of one language
    Diff { old: PathBuf, new: PathBuf },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RewriteArg {
    None,
    All,
    Json,
    Summary,
}
impl From<RewriteArg> for Rewrite {
    fn from(value: RewriteArg) -> Self {
        match value {
            RewriteArg::None => Rewrite::None,
            RewriteArg::All => Rewrite::All,
            RewriteArg::Json => Rewrite::Json,
            RewriteArg::Summary => Rewrite::Summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_run_arguments() {
        let cli = Cli::try_parse_from(["resbot", "-vv", "run", "--lang", "de", "--rewrite", "json", "--read-only"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Command::Run { lang, rewrite, read_only } = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(lang.as_deref(), Some("de"));
        assert_eq!(rewrite.map(Rewrite::from), Some(Rewrite::Json));
        assert!(read_only);
    }

    #[test]
    fn test_diff_arguments() {
        let cli = Cli::try_parse_from(["resbot", "diff", "old/de.json", "de.json", "--config", "/etc/resbot.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/etc/resbot.toml")));
        assert!(matches!(cli.command, Command::Diff { .. }));
    }

    #[rstest]
    #[case(&["resbot"])]
    #[case(&["resbot", "run", "--rewrite", "html"])]
    #[case(&["resbot", "diff", "only-one.json"])]
    fn test_invalid_arguments(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }
}
