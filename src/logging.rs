//! Tracing subscriber setup
//!
//! A `fmt` layer, plain or JSON, writing to stderr. Stdout is reserved for
//! command output. `RUST_LOG` takes precedence over the configured level.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors raised while installing the subscriber
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Level string is not a valid filter directive
    #[error("invalid log level '{level}': {reason}")]
    InvalidLevel { level: String, reason: String },

    /// A global subscriber is already set
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, e.g. "info" or "info,contacts_api=debug" (default: "info")
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit one JSON object per line (default: false)
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

impl LoggingConfig {
    /// Build the filter, preferring `RUST_LOG` when it is set and valid
    pub fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|e| LoggingError::InvalidLevel {
            level: self.level.clone(),
            reason: e.to_string(),
        })
    }
}

/// Install the global subscriber
///
/// Must be called once at startup before any tracing macros are used; a
/// second call returns `LoggingError::AlreadyInitialized`.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    let registry = tracing_subscriber::registry().with(config.env_filter()?);

    let result = if config.json {
        registry
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
    };
    result.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    info!(level = %config.level, json = config.json, "logging initialized");
    Ok(())
}
