//! itemctl-server: HTTP service over a single `items` table
//!
//! Exposes item writes and listings, schema initialization and an
//! unrestricted raw SQL endpoint, all backed by PostgreSQL.

pub mod db;
pub mod http;
pub mod models;

pub use db::{DbConfig, DbError, RetryPolicy};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
