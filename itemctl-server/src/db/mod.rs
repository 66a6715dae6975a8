//! Database layer - connections, schema, repositories and raw SQL
//!
//! # Design Principles
//!
//! - One connection per request, opened with retry and closed before responding
//! - No pool, no state shared between requests
//! - Every write runs in a transaction that is committed or rolled back
//!   before the connection is released

pub mod connection;
pub mod raw;
pub mod repos;
pub mod schema;
pub mod value;

pub use connection::{acquire, release, DbConfig, DbError, RetryPolicy};
pub use raw::{execute_unrestricted, RawOutcome};
pub use repos::{Item, ItemRepo};
pub use schema::init_schema;
pub use value::{Cell, ColumnKind};
