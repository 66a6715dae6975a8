//! Axum server setup
//!
//! Server skeleton with:
//! - One store connection per request, nothing pooled in the state
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use sqlx::postgres::PgConnection;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::error::ApiError;
use super::routes;
use crate::db::{self, DbConfig, RetryPolicy};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:5000)
    pub bind_addr: SocketAddr,

    /// Where each request connects to
    pub db: DbConfig,

    /// Retry schedule for opening those connections
    pub retry: RetryPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            db: DbConfig::default(),
            retry: RetryPolicy::default(),
        }
    }
}

/// Shared application state
///
/// Read-only after startup; handlers never mutate it.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DbConfig,
    pub retry: RetryPolicy,
}

impl AppState {
    pub fn new(db: DbConfig, retry: RetryPolicy) -> Self {
        Self { db, retry }
    }

    /// Open a fresh connection for the current request.
    pub async fn connect(&self) -> Result<PgConnection, ApiError> {
        Ok(db::acquire(&self.db, &self.retry).await?)
    }
}

/// Build the application router with all routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::admin::router())
        .merge(routes::items::router())
        .merge(routes::query::router())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server.
///
/// # Example
///
/// ```ignore
/// let config = ServerConfig {
///     db: DbConfig::from_env(),
///     ..ServerConfig::default()
/// };
/// run_server(config).await?;
/// ```
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    tracing::info!(
        db_host = %config.db.host,
        db_name = %config.db.database,
        attempts = config.retry.attempts,
        "Database config loaded"
    );
    let app = build_router(AppState::new(config.db, config.retry));

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
