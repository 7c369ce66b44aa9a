//! Command implementations for the invoicectl CLI

pub mod dashboard;
pub mod invoices;
pub mod migrate;
pub mod seed;
pub mod serve;

pub use dashboard::run_dashboard;
pub use invoices::run_invoices;
pub use migrate::run_migrate;
pub use seed::run_seed;
pub use serve::run_serve;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use invoicectl_core::{DemoDelays, Fetcher, InvoicectlConfig, MemoryStore, Store};
use invoicectl_server::db::{create_pool, create_pool_with_options, PgPool, PgStore};

/// Where the data comes from and how slow it pretends to be
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Use the built-in placeholder data instead of PostgreSQL
    #[arg(long)]
    pub memory: bool,

    /// Disable the artificial demo latency
    #[arg(long)]
    pub no_delays: bool,
}

impl SourceArgs {
    pub fn delays(&self, config: &InvoicectlConfig) -> DemoDelays {
        if self.no_delays {
            DemoDelays::none()
        } else {
            config.demo.clone()
        }
    }

    /// Build the fetcher over the chosen store.
    pub async fn fetcher(&self, config: &InvoicectlConfig) -> Result<Fetcher> {
        let store: Arc<dyn Store> = if self.memory {
            tracing::info!("using in-memory placeholder data");
            Arc::new(MemoryStore::seeded())
        } else {
            let url = database_url(self.database_url.as_deref(), config)?;
            let pool = create_pool_with_options(&url, config.database.max_connections)
                .await
                .context("Failed to create database pool")?;
            Arc::new(PgStore::new(pool))
        };

        Ok(Fetcher::new(store, self.delays(config)))
    }
}

/// Resolve the database URL from the flag, then config (which already
/// folds in DATABASE_URL).
pub fn database_url(flag: Option<&str>, config: &InvoicectlConfig) -> Result<String> {
    flag.map(str::to_owned)
        .or_else(|| config.database.url.clone())
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or ~/.invoicectl/config.toml")
}

/// Pool with the default size for one-shot maintenance commands.
pub(crate) async fn connect(flag: Option<&str>, config: &InvoicectlConfig) -> Result<PgPool> {
    let url = database_url(flag, config)?;
    create_pool(&url)
        .await
        .context("Failed to create database pool")
}
