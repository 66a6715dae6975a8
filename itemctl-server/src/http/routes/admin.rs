//! Administrative endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Router};

use crate::db;
use crate::http::error::ApiError;
use crate::http::server::AppState;

/// GET /init_db - create the items table if it does not exist
async fn init_db(State(state): State<Arc<AppState>>) -> Result<&'static str, ApiError> {
    let mut conn = state.connect().await?;
    let result = db::init_schema(&mut conn).await;
    db::release(conn).await;

    result?;
    Ok("Database initialized")
}

/// Admin routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/init_db", get(init_db))
}
