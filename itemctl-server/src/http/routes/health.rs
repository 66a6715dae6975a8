//! Liveness endpoint
//!
//! Reports which store the service is configured against without opening a
//! connection, so it stays green while PostgreSQL is still starting up.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

/// Configured store target; never includes credentials
#[derive(Debug, Serialize)]
pub struct StoreTarget {
    pub host: String,
    pub port: u16,
    pub database: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub store: StoreTarget,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        store: StoreTarget {
            host: state.db.host.clone(),
            port: state.db.port,
            database: state.db.database.clone(),
        },
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
