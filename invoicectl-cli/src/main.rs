//! invoicectl CLI - invoice dashboard data access
//!
//! - `serve`: JSON HTTP API over PostgreSQL or the in-memory placeholder data
//! - `migrate` / `seed`: create the schema and load placeholder rows
//! - `dashboard` / `invoices`: run the fetchers once and print JSON
//! - `config`: manage ~/.invoicectl/config.toml

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use invoicectl_core::InvoicectlConfig;

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "invoicectl",
    author,
    version,
    about = "Invoice dashboard data access: fetchers, caching and a JSON API",
    long_about = "Fetch dashboard, invoice and customer data from PostgreSQL (or built-in \
                  placeholder data), with concurrent dashboard loading and tag-invalidated \
                  page-count caching."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.invoicectl/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create tables and indexes
    Migrate(commands::migrate::MigrateArgs),
    /// Load placeholder customers, invoices and revenue
    Seed(commands::seed::SeedArgs),
    /// Fetch the dashboard overview and print it as JSON
    Dashboard(commands::dashboard::DashboardArgs),
    /// Fetch one page of the invoices table and print it as JSON
    Invoices(commands::invoices::InvoicesArgs),
    /// Manage invoicectl configuration (init, show, path)
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let config_path = cli.config.as_deref();
    let load = || InvoicectlConfig::load(config_path);

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args, &load()?).await?,
        Commands::Migrate(args) => commands::run_migrate(args, &load()?).await?,
        Commands::Seed(args) => commands::run_seed(args, &load()?).await?,
        Commands::Dashboard(args) => commands::run_dashboard(args, &load()?).await?,
        Commands::Invoices(args) => commands::run_invoices(args, &load()?).await?,
        Commands::Config(args) => config::run_config(args, config_path)?,
    }

    Ok(())
}
