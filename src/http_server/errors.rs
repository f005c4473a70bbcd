//! # HTTP API Errors
//!
//! Every failure a handler can return, and its status code. Bodies are
//! always `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Path id is not a positive integer
    #[error("Invalid contact ID")]
    InvalidId,

    /// Body is not JSON or lacks required fields
    #[error("Invalid request payload: {0}")]
    InvalidBody(String),

    /// Store rejected an argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No contact with the requested id
    #[error("Contact not found")]
    ContactNotFound,

    /// No route for this method and path
    #[error("Not found")]
    RouteNotFound,

    /// Email belongs to another contact
    #[error("Email already in use: {0}")]
    DuplicateEmail(String),

    /// Handler did not finish within the configured request timeout
    #[error("Request timed out")]
    Timeout,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Storage failure; the detail is logged, never sent to the client
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,

            ApiError::ContactNotFound => StatusCode::NOT_FOUND,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,

            ApiError::DuplicateEmail(_) => StatusCode::CONFLICT,

            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,

            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidArgument(msg) => ApiError::InvalidArgument(msg),
            StoreError::NotFound { .. } => ApiError::ContactNotFound,
            StoreError::DuplicateEmail { email } => ApiError::DuplicateEmail(email),
            StoreError::Storage { message, source } => ApiError::Internal(match source {
                Some(source) => format!("{}: {}", message, source),
                None => message,
            }),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&ApiError> for ErrorResponse {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ApiError::Internal(detail) = &self {
            error!(status = status.as_u16(), error = %detail, "request failed");
        }
        (status, Json(ErrorResponse::from(&self))).into_response()
    }
}
