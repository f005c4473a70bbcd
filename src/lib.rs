//! contacts-api - a small JSON CRUD service for contacts
//!
//! - [`store`]: parameterized SQL over the `contact` table
//! - [`http_server`]: axum routes and handlers on top of a [`store::ContactStore`]
//! - [`config`], [`logging`], [`cli`]: bootstrap

pub mod cli;
pub mod config;
pub mod http_server;
pub mod logging;
pub mod store;
