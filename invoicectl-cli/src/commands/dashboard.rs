//! Print the dashboard overview as JSON

use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use invoicectl_core::{DashboardStrategy, InvoicectlConfig};

use super::SourceArgs;

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum Strategy {
    /// Fetch revenue, latest invoices and cards concurrently
    #[default]
    Parallel,
    /// Fetch them one after another
    Sequential,
}

impl From<Strategy> for DashboardStrategy {
    fn from(s: Strategy) -> Self {
        match s {
            Strategy::Parallel => DashboardStrategy::Parallel,
            Strategy::Sequential => DashboardStrategy::Sequential,
        }
    }
}

#[derive(Parser, Debug)]
pub struct DashboardArgs {
    /// How the three datasets are fetched
    #[arg(long, value_enum, default_value_t = Strategy::Parallel)]
    pub strategy: Strategy,

    #[command(flatten)]
    pub source: SourceArgs,
}

pub async fn run_dashboard(args: DashboardArgs, config: &InvoicectlConfig) -> Result<()> {
    let fetcher = args.source.fetcher(config).await?;

    let started = Instant::now();
    let data = fetcher.fetch_dashboard(args.strategy.into()).await?;
    tracing::info!(
        strategy = ?args.strategy,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "dashboard fetched"
    );

    let json = serde_json::to_string_pretty(&data).context("Failed to serialize dashboard")?;
    println!("{json}");
    Ok(())
}
