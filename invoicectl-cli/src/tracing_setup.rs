//! Tracing setup for the invoicectl CLI
//!
//! Usage:
//!   invoicectl --debug ...                 # Debug logging to console
//!   RUST_LOG=invoicectl_core=debug ...     # Fine-grained log control
//!
//! Logs go to stderr so JSON printed by `dashboard` stays clean on stdout.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Debug level unless RUST_LOG is set
    pub debug: bool,
}

impl TracingConfig {
    fn filter(&self) -> EnvFilter {
        let default = if self.debug { "debug" } else { "info" };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    }
}

/// Install the console subscriber.
pub fn init(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(config.debug)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
