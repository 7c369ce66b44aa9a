//! Placeholder data seeding command

use anyhow::{Context, Result};
use clap::Parser;

use invoicectl_core::InvoicectlConfig;
use invoicectl_server::db::{migrations, seed};

#[derive(Parser, Debug)]
pub struct SeedArgs {
    /// Database URL (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Skip creating the schema first
    #[arg(long)]
    pub no_migrate: bool,
}

pub async fn run_seed(args: SeedArgs, config: &InvoicectlConfig) -> Result<()> {
    let pool = super::connect(args.database_url.as_deref(), config).await?;

    if !args.no_migrate {
        migrations::run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let report = seed::run(&pool).await.context("Failed to seed database")?;
    println!(
        "Seeded {} customers, {} invoices, {} revenue months",
        report.customers, report.invoices, report.revenue
    );
    Ok(())
}
