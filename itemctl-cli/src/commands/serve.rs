//! HTTP server command
//!
//! Runs the itemctl HTTP API until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;

use itemctl_server::{run_server, ServerConfig};

use crate::config::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "ITEMCTL_BIND", default_value = "0.0.0.0:5000")]
    pub bind: SocketAddr,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    tracing::info!("Starting itemctl server on {}", args.bind);

    let config = ServerConfig {
        bind_addr: args.bind,
        db: args.db.db_config(),
        retry: args.db.retry_policy(),
    };

    // Run server (blocks until shutdown)
    run_server(config).await.context("Server error")?;

    Ok(())
}
