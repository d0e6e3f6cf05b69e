//! Layered configuration for resbot.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. built-in defaults ([`Config::default`])
//! 2. a configuration file (`.toml`, `.yaml`/`.yml` or `.json`), by default
//!    `config.toml` in the platform configuration directory
//! 3. environment variables prefixed `RESBOT_`, with `__` separating
//!    sections: `RESBOT_BOT__LIMIT_TO_LANG=de`
//!
//! ```toml
//! [storage]
//! snapshots = "/var/lib/resbot/snapshots"
//! read_only = false
//!
//! [bot]
//! rewrite = "none"
//! limit_to_lang = "de"
//! ```

pub mod error;

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use resbot_sync::Rewrite;
use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, Result};

const ENV_PREFIX: &str = "RESBOT_";
const CONFIG_FILE_NAME: &str = "config.toml";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("net", "resbot", "resbot")
}

/// Default location of the configuration file.
pub fn default_path() -> Result<PathBuf> {
    let dirs = project_dirs().ok_or_raise(|| ErrorKind::NoConfigDir)?;
    Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub bot: BotConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the snapshot documents. Must be absolute.
    pub snapshots: PathBuf,
    /// Log writes instead of performing them.
    pub read_only: bool,
}
impl Default for StorageConfig {
    fn default() -> Self {
        let snapshots = project_dirs()
            .map(|dirs| dirs.data_dir().join("snapshots"))
            .unwrap_or_else(|| PathBuf::from("snapshots"));
        Self {
            snapshots,
            read_only: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub rewrite: Rewrite,
    /// Only process this language (plus English).
    pub limit_to_lang: Option<String>,
}

impl Config {
    /// All configuration sources, merged but not yet extracted.
    ///
    /// Without an explicit `path`, the default configuration file is used if
    /// it exists.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        match path {
            Some(path) => {
                if !path.is_file() {
                    exn::bail!(ErrorKind::Invalid(format!("config file {} doesn't exist", path.display())));
                }
                figment = merge_file(figment, path)?;
            },
            None => match default_path() {
                Ok(path) if path.is_file() => figment = merge_file(figment, &path)?,
                Ok(_) => tracing::debug!("No configuration file found, using defaults"),
                Err(err) => tracing::debug!(error = ?err, "No configuration directory, using defaults"),
            },
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Loads and validates the configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(path)?.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.storage.snapshots.is_absolute() {
            exn::bail!(ErrorKind::Invalid(format!(
                "storage.snapshots must be an absolute path, got {}",
                self.storage.snapshots.display()
            )));
        }
        if self.bot.limit_to_lang.as_deref().is_some_and(|lang| lang.trim().is_empty()) {
            exn::bail!(ErrorKind::Invalid("bot.limit_to_lang must not be empty".to_string()));
        }
        Ok(())
    }
}

fn merge_file(figment: Figment, path: &Path) -> Result<Figment> {
    tracing::debug!(path = %path.display(), "Loading configuration file");
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();
    let figment = match extension.to_ascii_lowercase().as_str() {
        "toml" => figment.merge(Toml::file(path)),
        "yaml" | "yml" => figment.merge(Yaml::file(path)),
        "json" => figment.merge(Json::file(path)),
        _ => exn::bail!(ErrorKind::Invalid(format!(
            "unsupported config file format: {}",
            path.display()
        ))),
    };
    Ok(figment)
}
