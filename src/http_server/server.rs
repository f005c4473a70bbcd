//! # HTTP Server
//!
//! Wraps the contact routes in CORS, tracing and timeout layers and serves
//! them until Ctrl-C or SIGTERM.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, StatusCode};
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::config::HttpServerConfig;
use super::contact_routes::contact_routes;
use super::errors::ApiError;
use crate::store::ContactStore;

/// HTTP server for the contacts API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server that answers from `store`
    pub fn new<S: ContactStore + 'static>(config: HttpServerConfig, store: Arc<S>) -> Self {
        let router = Self::build_router(&config, store);
        Self { config, router }
    }

    /// Build the router with all middleware applied
    pub fn build_router<S: ContactStore + 'static>(
        config: &HttpServerConfig,
        store: Arc<S>,
    ) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<HeaderValue> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        with_timeout(contact_routes(store), config.request_timeout_secs)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind the configured address and serve until shutdown
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already-bound listener until shutdown
    pub async fn serve(self, listener: TcpListener) -> Result<(), io::Error> {
        let local = listener.local_addr()?;
        info!(addr = %local, "contacts API listening");
        info!("  - GET|POST /contacts");
        info!("  - GET|PUT|DELETE /contacts/{{id}}");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("contacts API stopped");
        Ok(())
    }
}

/// Apply the request timeout; an expired request gets a JSON 408 body
fn with_timeout(router: Router, secs: u64) -> Router {
    router
        .layer(TimeoutLayer::new(Duration::from_secs(secs)))
        .layer(map_response(timeout_body))
}

async fn timeout_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        warn!("request timed out");
        return ApiError::Timeout.into_response();
    }
    response
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
