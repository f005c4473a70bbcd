//! # Contacts HTTP Server Module
//!
//! Axum server exposing the contact store as JSON over HTTP.
//!
//! # Endpoints
//!
//! - `GET /contacts?start=&count=` - page of contacts, or `?name=`/`?email=` lookup
//! - `POST /contacts` - create
//! - `GET /contacts/{id}` - fetch one
//! - `PUT /contacts/{id}` - replace name and email
//! - `DELETE /contacts/{id}` - delete

pub mod config;
pub mod contact_routes;
pub mod errors;
pub mod extract;
pub mod server;

pub use config::HttpServerConfig;
pub use contact_routes::contact_routes;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
