//! Request extractors that report failures as [`ApiError`]

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::errors::ApiError;

/// JSON object body extractor
///
/// Unlike `axum::Json` it ignores `Content-Type` and turns every failure
/// into a 400 with the usual `{"error": ...}` body. The top-level value
/// must be an object; serde would otherwise accept an array for a struct.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::InvalidBody(e.body_text()))?;

        let value: Value =
            serde_json::from_slice(&bytes).map_err(|e| ApiError::InvalidBody(e.to_string()))?;
        if !value.is_object() {
            return Err(ApiError::InvalidBody(
                "expected a JSON object".to_string(),
            ));
        }

        serde_json::from_value(value)
            .map(JsonBody)
            .map_err(|e| ApiError::InvalidBody(e.to_string()))
    }
}

/// `:id` path segment as a contact id
///
/// Any segment that is not a positive integer, including one that is not
/// valid UTF-8 after percent-decoding, is [`ApiError::InvalidId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for ContactId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::InvalidId)?;

        parse_id(&raw).map(ContactId)
    }
}

/// Parse a path id; only positive integers are ids
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(ApiError::InvalidId)
}
