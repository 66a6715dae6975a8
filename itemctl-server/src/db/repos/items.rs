//! Item repository
//!
//! - insert: single parameterized INSERT in its own transaction
//! - list: every row in store order (no ORDER BY)

use chrono::NaiveDateTime;
use sqlx::postgres::PgConnection;
use sqlx::{Connection, FromRow};

use crate::db::DbError;
use crate::models::ItemText;

/// Item record from database
#[derive(Debug, Clone, FromRow)]
pub struct Item {
    pub id: i32,
    pub text: String,
    pub update_time: NaiveDateTime,
}

/// Item repository over a single connection
pub struct ItemRepo<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> ItemRepo<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// Insert one item and commit. `id` and `update_time` come from column defaults.
    pub async fn insert(&mut self, text: &ItemText) -> Result<(), DbError> {
        let mut tx = self.conn.begin().await?;

        sqlx::query("INSERT INTO items (text) VALUES ($1)")
            .bind(text.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// List all items in whatever order the store returns them.
    pub async fn list(&mut self) -> Result<Vec<Item>, DbError> {
        let items = sqlx::query_as::<_, Item>("SELECT id, text, update_time FROM items")
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(items)
    }
}
