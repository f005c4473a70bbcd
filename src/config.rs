//! Application configuration
//!
//! Resolved in order, later sources winning:
//! 1. built-in defaults
//! 2. optional JSON file
//! 3. `CONTACTS_*` environment variables
//! 4. command-line flags

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::logging::LoggingConfig;
use crate::store::{self, StoreConfig};

pub const ENV_HOST: &str = "CONTACTS_HOST";
pub const ENV_PORT: &str = "CONTACTS_PORT";
pub const ENV_DATABASE_URL: &str = "CONTACTS_DATABASE_URL";
pub const ENV_LOG_LEVEL: &str = "CONTACTS_LOG_LEVEL";

/// Configuration errors
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for {key}: '{value}'")]
    InvalidEnv { key: &'static str, value: String },

    #[error("port must be > 0")]
    InvalidPort,

    #[error("request_timeout_secs must be > 0")]
    InvalidTimeout,

    #[error(transparent)]
    Store(#[from] store::ConfigError),
}

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database_url: Option<String>,
}

/// Full service configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Read a JSON config file; missing sections take their defaults
    pub fn from_file(path: &Path) -> Result<Self, AppConfigError> {
        let content = fs::read_to_string(path).map_err(|source| AppConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| AppConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve file, environment and overrides, then validate
    pub fn load(
        path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, AppConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_from(|key| std::env::var(key).ok())?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Apply `CONTACTS_*` variables using `lookup` to read them
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), AppConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.server.port = port.trim().parse().map_err(|_| AppConfigError::InvalidEnv {
                key: ENV_PORT,
                value: port.clone(),
            })?;
        }
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.store.database_url = url;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        Ok(())
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(host) = &overrides.host {
            self.server.host = host.clone();
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(url) = &overrides.database_url {
            self.store.database_url = url.clone();
        }
    }

    pub fn validate(&self) -> Result<(), AppConfigError> {
        if self.server.port == 0 {
            return Err(AppConfigError::InvalidPort);
        }
        if self.server.request_timeout_secs == 0 {
            return Err(AppConfigError::InvalidTimeout);
        }
        self.store.validate()?;
        Ok(())
    }
}
