//! CLI command implementations
//!
//! `serve` boots the HTTP service. `init` and `stats` open the database,
//! do one thing, print a JSON line and exit.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::config::AppConfig;
use crate::http_server::HttpServer;
use crate::logging;
use crate::store::{ContactStore, SqliteContactStore};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_response;

/// Resolve configuration for `command` and run it
pub async fn run_command(command: Command) -> CliResult<()> {
    let config = AppConfig::load(
        command.config_path().map(|p| p.as_path()),
        &command.overrides(),
    )?;
    logging::init(&config.logging)?;

    match command {
        Command::Serve { .. } => serve(config).await,
        Command::Init { .. } => init(config).await,
        Command::Stats { .. } => stats(config).await,
    }
}

/// Open the store, ensure the table exists and serve HTTP until shutdown
pub async fn serve(config: AppConfig) -> CliResult<()> {
    let store = open_store(&config).await?;
    let server = HttpServer::new(config.server.clone(), Arc::new(store.clone()));

    let result = server
        .start()
        .await
        .map_err(|e| CliError::server_error(e.to_string()));

    store.close().await;
    result
}

/// Create the contact table and exit
pub async fn init(config: AppConfig) -> CliResult<()> {
    let store = open_store(&config).await?;
    store.close().await;

    write_response(json!({
        "initialized": true,
        "database_url": config.store.database_url,
    }))
}

/// Print the number of stored contacts
pub async fn stats(config: AppConfig) -> CliResult<()> {
    let store = open_store(&config).await?;
    let count = store.count().await;
    store.close().await;
    let count = count?;

    write_response(json!({ "contacts": count }))
}

async fn open_store(config: &AppConfig) -> CliResult<SqliteContactStore> {
    let store = SqliteContactStore::connect(&config.store).await?;
    store.initialize().await?;
    info!(url = %config.store.database_url, "contact table ready");
    Ok(store)
}
