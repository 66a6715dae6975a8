//! One-shot schema initialization, same as `GET /init_db`

use anyhow::{Context, Result};
use clap::Parser;

use itemctl_server::db;

use crate::config::DbArgs;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

/// Create the items table if it does not exist
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    let config = args.db.db_config();
    let mut conn = db::acquire(&config, &args.db.retry_policy())
        .await
        .with_context(|| format!("Failed to connect to {}:{}", config.host, config.port))?;

    let result = db::init_schema(&mut conn).await;
    db::release(conn).await;
    result.context("Failed to initialize schema")?;

    println!("Database initialized");
    Ok(())
}
