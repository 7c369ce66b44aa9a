use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use invoicectl_core::InvoicectlConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config file with the default values
    Init(InitArgs),
    /// Print the effective config (file + environment) as TOML
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, path: Option<&Path>) -> Result<()> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(InvoicectlConfig::config_path);

    match args.command {
        ConfigCommands::Init(args) => run_init(args, &path),
        ConfigCommands::Show => run_show(&path),
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn run_init(args: InitArgs, path: &Path) -> Result<()> {
    if path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            path
        ));
    }

    InvoicectlConfig::default().save(path)?;
    println!("Created config at: {}", path.display());
    Ok(())
}

fn run_show(path: &Path) -> Result<()> {
    let config = InvoicectlConfig::load(Some(path))?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render config")?;
    print!("{rendered}");
    Ok(())
}
