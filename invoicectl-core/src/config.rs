use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Centralized configuration for invoicectl
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoicectlConfig {
    pub database: DatabaseConfig,
    pub server: ServerSection,
    pub demo: DemoDelays,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
        }
    }
}

/// Artificial latency added to fetchers to make slow data visible in demos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoDelays {
    pub enabled: bool,
    pub revenue_ms: u64,
    pub latest_invoices_ms: u64,
    pub card_data_ms: u64,
    pub invoice_pages_ms: u64,
}

impl Default for DemoDelays {
    fn default() -> Self {
        Self {
            enabled: true,
            revenue_ms: 6000,
            latest_invoices_ms: 2000,
            card_data_ms: 4000,
            invoice_pages_ms: 3000,
        }
    }
}

impl DemoDelays {
    /// No artificial latency at all
    pub fn none() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn revenue(&self) -> Duration {
        self.pick(self.revenue_ms)
    }

    pub fn latest_invoices(&self) -> Duration {
        self.pick(self.latest_invoices_ms)
    }

    pub fn card_data(&self) -> Duration {
        self.pick(self.card_data_ms)
    }

    pub fn invoice_pages(&self) -> Duration {
        self.pick(self.invoice_pages_ms)
    }

    fn pick(&self, ms: u64) -> Duration {
        if self.enabled {
            Duration::from_millis(ms)
        } else {
            Duration::ZERO
        }
    }
}

impl InvoicectlConfig {
    /// Load config from `path`, or from ~/.invoicectl/config.toml.
    ///
    /// A missing file is not an error: defaults apply. Environment overrides
    /// are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path);

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            Self::from_toml(&content)?
        } else {
            tracing::debug!(path = ?config_path, "no config file, using defaults");
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse config from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file (invalid TOML)")
    }

    /// Get config file path: ~/.invoicectl/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".invoicectl/config.toml")
    }

    /// Apply DATABASE_URL, INVOICECTL_BIND and INVOICECTL_DEMO_DELAYS
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(url) = env::var("DATABASE_URL") {
            if !url.is_empty() {
                self.database.url = Some(url);
            }
        }

        if let Ok(bind) = env::var("INVOICECTL_BIND") {
            self.server.bind = bind
                .parse()
                .context(format!("INVOICECTL_BIND is not a socket address: {}", bind))?;
        }

        if let Ok(flag) = env::var("INVOICECTL_DEMO_DELAYS") {
            self.demo.enabled = parse_switch(&flag);
        }

        Ok(())
    }

    /// Save config to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let toml_str = toml::to_string_pretty(self)
            .context("Failed to serialize config to TOML")?;

        fs::write(path, toml_str)
            .context(format!("Failed to write config file: {:?}", path))?;

        Ok(())
    }
}

fn parse_switch(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_toml() {
        let config = InvoicectlConfig::from_toml(
            r#"
            [database]
            url = "postgres://localhost/invoices"

            [demo]
            revenue_ms = 10
            "#,
        )
        .unwrap();

        assert_eq!(
            config.database.url.as_deref(),
            Some("postgres://localhost/invoices")
        );
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.demo.revenue(), Duration::from_millis(10));
        assert_eq!(config.demo.card_data(), Duration::from_millis(4000));
        assert_eq!(config.server.bind.port(), 3030);
    }

    #[test]
    fn disabled_delays_are_zero() {
        let delays = DemoDelays::none();
        assert_eq!(delays.revenue(), Duration::ZERO);
        assert_eq!(delays.invoice_pages(), Duration::ZERO);
    }

    #[test]
    fn save_then_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = InvoicectlConfig::default();
        config.demo.enabled = false;
        config.save(&path).unwrap();

        let loaded = InvoicectlConfig::from_toml(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(!loaded.demo.enabled);
    }

    #[test]
    fn switch_parsing() {
        assert!(!parse_switch("off"));
        assert!(!parse_switch("0"));
        assert!(!parse_switch(" FALSE "));
        assert!(parse_switch("1"));
        assert!(parse_switch("on"));
    }
}
