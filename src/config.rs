//! Configuration resolution for tunegate
//!
//! Two-tier resolution with ENV → TOML priority, falling back to the
//! built-in default port.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{info, warn};

/// Default listen port, matching what the gateway has always served on.
const DEFAULT_PORT: u16 = 5000;

/// Gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
}

/// Shape of the optional `tunegate.toml` file
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    port: Option<u16>,
}

impl Config {
    /// Resolve configuration.
    ///
    /// Priority: `TUNEGATE_PORT` environment variable, then the `port`
    /// key of the TOML file at `TUNEGATE_CONFIG` (default
    /// `tunegate.toml`), then the built-in default. A malformed value in
    /// either tier fails startup rather than silently defaulting.
    pub fn load() -> Result<Self> {
        if let Ok(value) = std::env::var("TUNEGATE_PORT") {
            let port = value
                .parse::<u16>()
                .with_context(|| format!("Invalid TUNEGATE_PORT value: {value}"))?;
            info!(port, "Port loaded from environment variable");
            return Ok(Self { port });
        }

        let path = std::env::var("TUNEGATE_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("tunegate.toml"));

        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let toml_config: TomlConfig = toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;

            if let Some(port) = toml_config.port {
                info!(port, config = %path.display(), "Port loaded from TOML config");
                return Ok(Self { port });
            }

            warn!(config = %path.display(), "Config file has no port key, using default");
        }

        Ok(Self { port: DEFAULT_PORT })
    }

    /// Listen address on all interfaces.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
