//! Print one page of the invoices table as JSON

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use invoicectl_core::{InvoicectlConfig, SearchParams};

use super::SourceArgs;

#[derive(Parser, Debug)]
pub struct InvoicesArgs {
    /// Search term matched against name, email, amount, date and status
    #[arg(long, short = 'q', default_value = "")]
    pub query: String,

    /// Page number (1-based)
    #[arg(long, short = 'p')]
    pub page: Option<u32>,

    #[command(flatten)]
    pub source: SourceArgs,
}

pub async fn run_invoices(args: InvoicesArgs, config: &InvoicectlConfig) -> Result<()> {
    let fetcher = args.source.fetcher(config).await?;
    let params = SearchParams {
        query: args.query,
        page: args.page,
    };

    let (invoices, total_pages) = tokio::try_join!(
        fetcher.fetch_filtered_invoices(&params.query, params.current_page()),
        fetcher.fetch_invoices_pages(&params.query),
    )?;

    let out = json!({
        "page": params.current_page(),
        "totalPages": total_pages,
        "invoices": invoices,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("Failed to serialize invoices")?
    );
    Ok(())
}
