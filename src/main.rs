mod cli;
mod error;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use exn::ResultExt;
use resbot_config::Config;
use resbot_model::{ChangeLog, LanguageInfo, codec};
use resbot_storage::BackendHandle;
use resbot_storage::backend::{LocalBackend, ReadOnlyBackend};
use resbot_sync::{ResourcesBot, Rewrite, SnapshotStore};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::{ErrorKind, Result};

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Run { lang, rewrite, read_only } => {
            run(cli.config.as_deref(), lang, rewrite.map(Into::into), read_only).await
        },
        Command::Diff { old, new } => diff(&old, &new).await,
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

async fn run(
    config_path: Option<&Path>,
    lang: Option<String>,
    rewrite: Option<Rewrite>,
    read_only: bool,
) -> Result<()> {
    let mut config = Config::load(config_path).or_raise(|| ErrorKind::Config)?;
    if lang.is_some() {
        config.bot.limit_to_lang = lang;
    }
    if let Some(rewrite) = rewrite {
        config.bot.rewrite = rewrite;
    }
    config.storage.read_only |= read_only;
    config.validate().or_raise(|| ErrorKind::Config)?;

    let local = LocalBackend::new("snapshots", &config.storage.snapshots).or_raise(|| ErrorKind::Storage)?;
    let backend: BackendHandle = if config.storage.read_only {
        Arc::new(ReadOnlyBackend::new(Arc::new(local)))
    } else {
        Arc::new(local)
    };
    tracing::info!(
        snapshots = %config.storage.snapshots.display(),
        read_only = config.storage.read_only,
        "Reading languages from cache"
    );

    let bot = ResourcesBot::new(SnapshotStore::new(backend), config.bot.rewrite)
        .limit_to(config.bot.limit_to_lang.clone())
        .with_builtin_processors();
    let outcome = bot.run().await.or_raise(|| ErrorKind::Run)?;
    tracing::info!(languages = outcome.languages.len(), "Finished");
    Ok(())
}

async fn diff(old: &Path, new: &Path) -> Result<()> {
    let old = read_snapshot(old).await?;
    let new = read_snapshot(new).await?;
    let changes: ChangeLog = new.compare(&old);
    if changes.is_empty() {
        println!("No changes in language {}", new.language_code());
    } else {
        println!("{changes}");
    }
    Ok(())
}

async fn read_snapshot(path: &Path) -> Result<LanguageInfo> {
    let text = tokio::fs::read_to_string(path)
        .await
        .or_raise(|| ErrorKind::Snapshot(path.to_path_buf()))?;
    codec::from_json_str(&text).or_raise(|| ErrorKind::Snapshot(path.to_path_buf()))
}
