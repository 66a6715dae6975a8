//! Unrestricted raw SQL execution
//!
//! Callers of this module are trusted: statements run verbatim, with no
//! parameterization and no filtering of what they may touch. Schema changes
//! and deletes are allowed. Do not add sanitization here; the behavior of
//! `POST /query` depends on statements reaching the database unchanged.

use std::collections::BTreeMap;

use sqlx::postgres::PgConnection;
use sqlx::{Connection, Executor};

use super::value::{columns_of, decode_row, Cell};

/// Result of a raw statement
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutcome {
    /// A SELECT: every row keyed by column name
    Rows { rows: Vec<BTreeMap<String, Cell>> },
    /// Anything else, committed
    Executed { rows_affected: u64 },
}

/// Whether the statement is treated as a row-returning SELECT.
///
/// Leading whitespace is ignored and the keyword is matched
/// case-insensitively. `WITH ... SELECT` and `VALUES` are not SELECTs here.
pub fn is_select(sql: &str) -> bool {
    sql.trim_start()
        .get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("select"))
}

/// Run caller-supplied SQL verbatim inside a transaction.
///
/// SELECT statements return their rows and are never committed; all other
/// statements are committed and report the affected row count. On failure
/// the transaction is rolled back and the database error is returned.
pub async fn execute_unrestricted(
    conn: &mut PgConnection,
    sql: &str,
) -> Result<RawOutcome, sqlx::Error> {
    tracing::debug!(sql = %sql, "executing raw SQL");

    let mut tx = conn.begin().await?;

    let result = if is_select(sql) {
        fetch_rows(&mut tx, sql).await
    } else {
        // Called through the executor: the `RawSql` methods are not `Send`
        // for a borrowed statement, which axum handlers require.
        Executor::execute(&mut *tx, sqlx::raw_sql(sql))
            .await
            .map(|done| RawOutcome::Executed {
                rows_affected: done.rows_affected(),
            })
    };

    match result {
        Ok(outcome @ RawOutcome::Executed { .. }) => {
            tx.commit().await?;
            tracing::info!(?outcome, "raw statement committed");
            Ok(outcome)
        }
        Ok(outcome) => {
            tx.rollback().await?;
            Ok(outcome)
        }
        Err(e) => {
            tracing::warn!(error = %e, "raw statement failed, rolling back");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "rollback failed");
            }
            Err(e)
        }
    }
}

async fn fetch_rows(conn: &mut PgConnection, sql: &str) -> Result<RawOutcome, sqlx::Error> {
    let pg_rows = Executor::fetch_all(&mut *conn, sqlx::raw_sql(sql)).await?;

    // Every row of a result set shares one description
    let columns = pg_rows.first().map(columns_of).unwrap_or_default();
    let rows = pg_rows
        .iter()
        .map(|row| decode_row(row, &columns))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(rows = rows.len(), columns = columns.len(), "raw select returned");
    Ok(RawOutcome::Rows { rows })
}
