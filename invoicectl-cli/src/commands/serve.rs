//! HTTP server command

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use invoicectl_core::InvoicectlConfig;
use invoicectl_server::{run_server, AppState, ServerConfig};

use super::SourceArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: config, then 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs, config: &InvoicectlConfig) -> Result<()> {
    let server = ServerConfig {
        bind_addr: args.bind.unwrap_or(config.server.bind),
        cors_permissive: args.cors_permissive || config.server.cors_permissive,
    };

    let fetcher = args.source.fetcher(config).await?;
    tracing::info!(
        bind = %server.bind_addr,
        demo_delays = fetcher.delays().enabled,
        "Starting invoicectl server"
    );

    // Blocks until shutdown
    run_server(AppState::new(fetcher), server)
        .await
        .context("Server error")?;

    Ok(())
}
