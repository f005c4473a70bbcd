//! # Store Errors
//!
//! Error types for the contact record store.

use std::error::Error as StdError;

use thiserror::Error;

/// Boxed error for wrapping driver-specific errors
pub type BoxedError = Box<dyn StdError + Send + Sync>;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Caller supplied an argument the store cannot act on
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No contact row has the given id
    #[error("contact {id} not found")]
    NotFound { id: i64 },

    /// Another contact already uses this email
    #[error("email already in use: {email}")]
    DuplicateEmail { email: String },

    /// Any other persistence failure
    #[error("storage failure: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<BoxedError>,
    },
}

impl StoreError {
    /// Create a storage error with source
    pub fn storage(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Map a failed INSERT/UPDATE, turning a unique violation on `email`
    /// into `DuplicateEmail`.
    pub(crate) fn from_write(err: sqlx::Error, email: &str, message: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::DuplicateEmail {
                    email: email.to_string(),
                }
            }
            _ => Self::storage(message, err),
        }
    }
}
