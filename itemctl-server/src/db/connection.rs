//! Database connection acquisition
//!
//! Every request opens its own PostgreSQL connection and closes it before
//! responding. Opening retries a fixed number of times with a fixed delay
//! between attempts, which covers a database container that is still
//! starting up next to the service.

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

/// Default number of connection attempts.
const DEFAULT_CONNECT_ATTEMPTS: u32 = 5;

/// Default pause after a failed attempt.
const DEFAULT_CONNECT_DELAY: Duration = Duration::from_secs(5);

const DEFAULT_PORT: u16 = 5432;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("could not connect to database after {attempts} attempt(s): {source}")]
    Connect {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Connection parameters for the item store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PORT,
            database: "postgres".to_string(),
            user: "postgres".to_string(),
            password: None,
        }
    }
}

impl DbConfig {
    /// Load from `DB_HOST`, `DB_PORT`, `POSTGRES_DB`, `POSTGRES_USER` and
    /// `POSTGRES_PASSWORD`, falling back to the defaults for unset values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        Self {
            host: var("DB_HOST").unwrap_or(defaults.host),
            port: var("DB_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            database: var("POSTGRES_DB").unwrap_or(defaults.database),
            user: var("POSTGRES_USER").unwrap_or(defaults.user),
            password: var("POSTGRES_PASSWORD"),
        }
    }

    /// Build sqlx connect options from this config.
    pub fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user);

        match &self.password {
            Some(password) => options.password(password),
            None => options,
        }
    }
}

/// Fixed-delay retry schedule for opening connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total connection attempts (at least one is always made)
    pub attempts: u32,
    /// Pause after every failed attempt
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_CONNECT_ATTEMPTS,
            delay: DEFAULT_CONNECT_DELAY,
        }
    }
}

/// Malformed connection parameters will not fix themselves on retry.
fn is_transient(err: &sqlx::Error) -> bool {
    !matches!(err, sqlx::Error::Configuration(_))
}

/// Open a connection, retrying transient failures per `policy`.
///
/// # Errors
///
/// Returns [`DbError::Connect`] once every attempt has failed, carrying the
/// last underlying error.
pub async fn acquire(config: &DbConfig, policy: &RetryPolicy) -> Result<PgConnection, DbError> {
    let options = config.connect_options();
    let max_attempts = policy.attempts.max(1);
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match PgConnection::connect_with(&options).await {
            Ok(conn) => {
                tracing::debug!(attempt, host = %config.host, "database connection established");
                return Ok(conn);
            }
            Err(e) if is_transient(&e) => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %e,
                    "database connection failed, retrying in {:?}",
                    policy.delay
                );
                last_error = Some(e);
                tokio::time::sleep(policy.delay).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "invalid database connection parameters");
                return Err(DbError::Connect {
                    attempts: attempt,
                    source: e,
                });
            }
        }
    }

    tracing::error!(
        attempts = max_attempts,
        host = %config.host,
        "could not connect to database"
    );

    Err(DbError::Connect {
        attempts: max_attempts,
        source: last_error
            .unwrap_or_else(|| sqlx::Error::Configuration("no connection attempt made".into())),
    })
}

/// Close a connection, logging instead of failing if the close itself errors.
pub async fn release(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "failed to close database connection cleanly");
    }
}
