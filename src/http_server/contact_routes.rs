//! Contact HTTP Routes
//!
//! `GET/POST /contacts` and `GET/PUT/DELETE /contacts/{id}`. Anything else,
//! including an unsupported method on a known path, is a 404.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::errors::{ApiError, ApiResult};
use super::extract::{ContactId, JsonBody};
use crate::store::{Contact, ContactFilter, ContactStore, NewContact};

/// Page size used when `count` is missing or out of range
pub const DEFAULT_COUNT: i64 = 10;

/// Largest page a client may ask for
pub const MAX_COUNT: i64 = 100;

// ==================
// Request/Response Types
// ==================

/// Body of POST and PUT requests
///
/// Fields are optional here so that a missing field is reported by
/// [`ContactPayload::validate`] instead of as a serde error.
#[derive(Debug, Default, Deserialize)]
pub struct ContactPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ContactPayload {
    /// Trim and check both fields
    pub fn validate(self) -> ApiResult<NewContact> {
        let name = self.name.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(ApiError::InvalidBody("name is required".to_string()));
        }

        let email = self.email.as_deref().map(str::trim).unwrap_or_default();
        if email.is_empty() {
            return Err(ApiError::InvalidBody("email is required".to_string()));
        }
        if !email_pattern()?.is_match(email) {
            return Err(ApiError::InvalidBody(format!(
                "email is not valid: {}",
                email
            )));
        }

        Ok(NewContact::new(name, email))
    }
}

fn email_pattern() -> ApiResult<&'static Regex> {
    static PATTERN: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+$"))
        .as_ref()
        .map_err(|e| ApiError::Internal(format!("email pattern: {}", e)))
}

/// Pagination for `GET /contacts`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    pub start: i64,
    pub count: i64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            start: 0,
            count: DEFAULT_COUNT,
        }
    }
}

impl PageParams {
    /// Read `start` and `count`, falling back to the default for any value
    /// that is missing, unparsable or out of range
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let start = query
            .get("start")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|start| *start >= 0)
            .unwrap_or(0);

        let count = query
            .get("count")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|count| (1..=MAX_COUNT).contains(count))
            .unwrap_or(DEFAULT_COUNT);

        Self { start, count }
    }
}

/// Optional `name`/`email` lookup on `GET /contacts`
fn filter_from_query(query: &HashMap<String, String>) -> Option<ContactFilter> {
    let filter = ContactFilter {
        name: query.get("name").cloned(),
        email: query.get("email").cloned(),
    };
    (!filter.is_empty()).then_some(filter)
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub result: &'static str,
}

impl DeleteResponse {
    pub fn success() -> Self {
        Self { result: "success" }
    }
}

// ==================
// Contact Routes
// ==================

/// Create contact routes over `store`
pub fn contact_routes<S: ContactStore + 'static>(store: Arc<S>) -> Router {
    Router::new()
        .route(
            "/contacts",
            get(list_contacts_handler::<S>)
                .post(create_contact_handler::<S>)
                .fallback(not_found_handler),
        )
        .route(
            "/contacts/:id",
            get(get_contact_handler::<S>)
                .put(update_contact_handler::<S>)
                .delete(delete_contact_handler::<S>)
                .fallback(not_found_handler),
        )
        .fallback(not_found_handler)
        .with_state(store)
}

// ==================
// Handlers
// ==================

async fn list_contacts_handler<S: ContactStore + 'static>(
    State(store): State<Arc<S>>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<Contact>>> {
    if let Some(filter) = filter_from_query(&query) {
        return Ok(Json(store.fetch_by_filter(filter).await?));
    }

    let page = PageParams::from_query(&query);
    let contacts = store.list(page.start, page.count).await?;
    Ok(Json(contacts))
}

async fn get_contact_handler<S: ContactStore + 'static>(
    State(store): State<Arc<S>>,
    ContactId(id): ContactId,
) -> ApiResult<Json<Contact>> {
    let contact = store.fetch_by_id(id).await?;
    Ok(Json(contact))
}

async fn create_contact_handler<S: ContactStore + 'static>(
    State(store): State<Arc<S>>,
    JsonBody(payload): JsonBody<ContactPayload>,
) -> ApiResult<(StatusCode, Json<Contact>)> {
    let contact = payload.validate()?;
    let created = store.create(contact).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_contact_handler<S: ContactStore + 'static>(
    State(store): State<Arc<S>>,
    ContactId(id): ContactId,
    JsonBody(payload): JsonBody<ContactPayload>,
) -> ApiResult<Json<Contact>> {
    let contact = payload.validate()?;
    let updated = store.update(id, contact).await?;
    Ok(Json(updated))
}

async fn delete_contact_handler<S: ContactStore + 'static>(
    State(store): State<Arc<S>>,
    ContactId(id): ContactId,
) -> ApiResult<Json<DeleteResponse>> {
    store.delete(id).await?;
    Ok(Json(DeleteResponse::success()))
}

async fn not_found_handler() -> ApiError {
    ApiError::RouteNotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_page_defaults() {
        assert_eq!(PageParams::from_query(&query(&[])), PageParams::default());
    }

    #[test]
    fn test_page_reads_values() {
        let page = PageParams::from_query(&query(&[("start", "20"), ("count", "5")]));
        assert_eq!(page, PageParams { start: 20, count: 5 });
    }

    #[test]
    fn test_page_falls_back_per_field() {
        let page = PageParams::from_query(&query(&[("start", "-1"), ("count", "7")]));
        assert_eq!(page, PageParams { start: 0, count: 7 });

        let page = PageParams::from_query(&query(&[("start", "3"), ("count", "0")]));
        assert_eq!(page, PageParams { start: 3, count: DEFAULT_COUNT });

        let page = PageParams::from_query(&query(&[("start", "x"), ("count", "1000")]));
        assert_eq!(page, PageParams::default());
    }

    #[test]
    fn test_filter_from_query() {
        assert!(filter_from_query(&query(&[("start", "1")])).is_none());
        assert!(filter_from_query(&query(&[("name", "")])).is_none());

        let filter = filter_from_query(&query(&[("email", "a@b.c")])).unwrap();
        assert_eq!(filter.email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn test_payload_validation() {
        let ok = ContactPayload {
            name: Some("  test user ".to_string()),
            email: Some("test@gmail.com".to_string()),
        }
        .validate()
        .unwrap();
        assert_eq!(ok, NewContact::new("test user", "test@gmail.com"));

        let missing_name = ContactPayload {
            name: None,
            email: Some("test@gmail.com".to_string()),
        };
        assert!(matches!(
            missing_name.validate(),
            Err(ApiError::InvalidBody(_))
        ));

        let blank_email = ContactPayload {
            name: Some("x".to_string()),
            email: Some("   ".to_string()),
        };
        assert!(matches!(
            blank_email.validate(),
            Err(ApiError::InvalidBody(_))
        ));

        let bad_email = ContactPayload {
            name: Some("x".to_string()),
            email: Some("not-an-email".to_string()),
        };
        assert!(matches!(bad_email.validate(), Err(ApiError::InvalidBody(_))));
    }

    #[test]
    fn test_delete_response_shape() {
        let json = serde_json::to_string(&DeleteResponse::success()).unwrap();
        assert_eq!(json, r#"{"result":"success"}"#);
    }
}
