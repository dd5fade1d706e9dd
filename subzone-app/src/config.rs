//! Application configuration
//!
//! Read from a TOML file, every field optional:
//!
//! ```toml
//! database_path = "/var/lib/subzone/subzone.db"
//! log_level = "debug"
//!
//! [provider]
//! timeout_secs = 5
//! cloudflare_api_base = "https://api.cloudflare.com/client/v4"
//! ```
//!
//! `SUBZONE_DATABASE` and `SUBZONE_LOG_LEVEL` override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Overrides `database_path`
pub const DATABASE_ENV: &str = "SUBZONE_DATABASE";
/// Overrides `log_level`
pub const LOG_LEVEL_ENV: &str = "SUBZONE_LOG_LEVEL";

const APP_DIR: &str = "subzone";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite database file
    pub database_path: PathBuf,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Bound on a single external provider call, in seconds
    pub timeout_secs: u64,
    pub cloudflare_api_base: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            log_level: "info".to_string(),
            provider: ProviderConfig::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 5,
            cloudflare_api_base: subzone_provider::CF_API_BASE.to_string(),
        }
    }
}

/// `<data dir>/subzone/subzone.db`, or `./subzone.db` when the platform has no data dir.
#[must_use]
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir().map_or_else(
        || PathBuf::from("subzone.db"),
        |dir| dir.join(APP_DIR).join("subzone.db"),
    )
}

/// `<config dir>/subzone/config.toml`
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

impl AppConfig {
    /// Load configuration and apply environment overrides.
    ///
    /// An explicit `path` must exist. Without one, the default config path is tried and a
    /// missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    log::debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        let config = config.with_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from `lookup` (normally the process environment).
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(DATABASE_ENV).filter(|v| !v.trim().is_empty()) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "provider.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if !self.provider.cloudflare_api_base.starts_with("http") {
            return Err(ConfigError::Invalid(format!(
                "provider.cloudflare_api_base is not an HTTP URL: {}",
                self.provider.cloudflare_api_base
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider.timeout_secs)
    }
}
