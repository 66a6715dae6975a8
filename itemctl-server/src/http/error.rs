//! API error types with IntoResponse
//!
//! Every error becomes `{"error": "<description>"}` with a status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Store unreachable after every retry (500)
    Connection(DbError),

    /// Raw SQL failed (500, message passed through verbatim)
    Query { message: String },

    /// Any other database error (500, logged)
    Database(DbError),
}

impl ApiError {
    /// Wrap a raw statement failure, keeping the server's own message when
    /// the error came from PostgreSQL.
    pub fn query(err: sqlx::Error) -> Self {
        let message = match &err {
            sqlx::Error::Database(db) => db.message().to_owned(),
            other => other.to_string(),
        };
        Self::Query { message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::Connection(e) => {
                tracing::error!("Connection error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "could not connect to database".to_owned(),
                )
            }
            Self::Query { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::Connect { .. } => Self::Connection(e),
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}
