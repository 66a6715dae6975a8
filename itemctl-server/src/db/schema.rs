//! Schema initialization for the items table

use sqlx::postgres::PgConnection;
use sqlx::Connection;

use super::DbError;

/// Idempotent DDL for the only table the service owns.
///
/// `update_time` is filled once at insert and never refreshed.
pub const CREATE_ITEMS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id SERIAL PRIMARY KEY,
        text VARCHAR(255) NOT NULL,
        update_time TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Create the `items` table if it does not exist yet and commit.
///
/// Safe to call any number of times.
pub async fn init_schema(conn: &mut PgConnection) -> Result<(), DbError> {
    tracing::info!("Initializing items schema...");

    let mut tx = conn.begin().await?;
    sqlx::query(CREATE_ITEMS_TABLE).execute(&mut *tx).await?;
    tx.commit().await?;

    tracing::info!("Items schema ready");
    Ok(())
}
