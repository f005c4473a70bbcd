//! Store configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing store configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Unsupported URL scheme
    #[error("Unsupported database URL: {0}. Expected sqlite://<path> or sqlite://:memory:")]
    UnsupportedScheme(String),

    /// URL has a scheme but no path
    #[error("Database URL has no path: {0}")]
    MissingPath(String),

    /// Invalid pool size
    #[error("Invalid pool size: {0}")]
    InvalidPoolSize(u32),
}

/// Where the SQLite database lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// Private in-memory database, gone when the pool closes
    Memory,
    /// File on disk, created if missing
    File(String),
}

/// Record store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Connection URL (default: "sqlite://contacts.db")
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Maximum pooled connections (default: 5)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_url() -> String {
    "sqlite://contacts.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: default_database_url(),
            max_connections: default_max_connections(),
        }
    }
}

impl StoreConfig {
    /// Config for a fresh in-memory database
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite://:memory:".to_string(),
            ..Default::default()
        }
    }

    /// Config for a file-backed database
    #[must_use]
    pub fn file(path: &str) -> Self {
        Self {
            database_url: format!("sqlite://{}", path),
            ..Default::default()
        }
    }

    /// Parse the database URL
    ///
    /// Supported formats:
    /// - `sqlite://:memory:` or `sqlite::memory:` - in-memory
    /// - `sqlite:///var/lib/contacts.db` - absolute path
    /// - `sqlite://contacts.db` - relative path
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedScheme` for anything that is not
    /// `sqlite:`, and `ConfigError::MissingPath` when no path follows it.
    pub fn location(&self) -> Result<DatabaseLocation, ConfigError> {
        let url = self.database_url.trim();

        if url == "sqlite::memory:" {
            return Ok(DatabaseLocation::Memory);
        }

        let rest = url
            .strip_prefix("sqlite://")
            .ok_or_else(|| ConfigError::UnsupportedScheme(url.to_string()))?;

        // Query strings are not supported; drop them rather than
        // creating a file literally named "db?mode=rwc".
        let path = rest.split('?').next().unwrap_or_default();

        match path {
            "" => Err(ConfigError::MissingPath(url.to_string())),
            ":memory:" => Ok(DatabaseLocation::Memory),
            path => Ok(DatabaseLocation::File(path.to_string())),
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidPoolSize(self.max_connections));
        }
        self.location().map(|_| ())
    }
}
