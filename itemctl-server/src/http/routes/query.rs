//! Raw SQL endpoint
//!
//! Runs whatever the caller sends. See [`crate::db::raw`] for the trust
//! model; this handler only validates that a statement was supplied.

use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::db::{self, RawOutcome};
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::ValidationError;

/// Response for statements that do not return rows
#[derive(Debug, Serialize)]
pub struct ExecutedResponse {
    pub message: &'static str,
    pub rows_affected: u64,
}

/// POST /query - execute caller-supplied SQL verbatim
async fn execute_query(
    State(state): State<Arc<AppState>>,
    body: JsonBody,
) -> Result<Response, ApiError> {
    let sql = body.required_str("sql")?;
    if sql.trim().is_empty() {
        return Err(ValidationError::Empty { field: "sql" }.into());
    }

    let mut conn = state.connect().await?;
    let result = db::execute_unrestricted(&mut conn, sql).await;
    db::release(conn).await;

    let response = match result.map_err(ApiError::query)? {
        RawOutcome::Rows { rows } => Json(rows).into_response(),
        RawOutcome::Executed { rows_affected } => Json(ExecutedResponse {
            message: "Query executed successfully",
            rows_affected,
        })
        .into_response(),
    };

    Ok(response)
}

/// Query routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/query", post(execute_query))
}
