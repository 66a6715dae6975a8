//! Database and retry settings shared by every subcommand
//!
//! Each flag falls back to an environment variable, so the usual
//! `DB_HOST` / `POSTGRES_*` container variables work unchanged.

use std::time::Duration;

use clap::Args;
use itemctl_server::{DbConfig, RetryPolicy};

/// Connection flags
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database name
    #[arg(long, env = "POSTGRES_DB", default_value = "postgres")]
    pub db_name: String,

    /// Database user
    #[arg(long, env = "POSTGRES_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "POSTGRES_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Connection attempts before giving up
    #[arg(long, env = "ITEMCTL_CONNECT_ATTEMPTS", default_value_t = 5)]
    pub connect_attempts: u32,

    /// Seconds to wait after a failed connection attempt
    #[arg(long, env = "ITEMCTL_CONNECT_DELAY_SECS", default_value_t = 5)]
    pub connect_delay_secs: u64,
}

impl DbArgs {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            host: self.db_host.clone(),
            port: self.db_port,
            database: self.db_name.clone(),
            user: self.db_user.clone(),
            password: self.db_password.clone().filter(|p| !p.is_empty()),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: self.connect_attempts,
            delay: Duration::from_secs(self.connect_delay_secs),
        }
    }
}
