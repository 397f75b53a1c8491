//! Application configuration
//!
//! Read from an optional JSON file, then overridden by environment variables.
//! A missing file means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub const ENV_HOST: &str = "PROPERTY_SEARCH_HOST";
pub const ENV_PORT: &str = "PROPERTY_SEARCH_PORT";
pub const ENV_MAX_PAGE_SIZE: &str = "PROPERTY_SEARCH_MAX_PAGE_SIZE";
pub const ENV_SEED: &str = "PROPERTY_SEARCH_SEED";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub search: SearchConfig,
    /// Fixture file or URL loaded into the store at startup
    pub seed: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,
    /// Server port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Largest page size the HTTP endpoint will serve. `None` disables the cap.
    pub max_page_size: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_page_size: Some(100),
        }
    }
}

impl AppConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Apply overrides from a variable lookup. Unparsable values are ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT).and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(raw) = lookup(ENV_MAX_PAGE_SIZE) {
            // 0 turns the cap off
            match raw.parse::<u64>() {
                Ok(0) => self.search.max_page_size = None,
                Ok(n) => self.search.max_page_size = Some(n),
                Err(_) => tracing::warn!("Ignoring invalid {}={}", ENV_MAX_PAGE_SIZE, raw),
            }
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed = Some(seed);
        }
        self
    }
}

/// Load configuration from `path` (if it exists) plus the process environment.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) if path.exists() => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config: AppConfig = serde_json::from_str(&raw)
                .with_context(|| format!("Invalid config file {}", path.display()))?;
            info!("Loaded configuration from {}", path.display());
            config
        }
        Some(path) => {
            info!("Config file {} not found, using defaults", path.display());
            AppConfig::default()
        }
        None => AppConfig::default(),
    };

    Ok(config.apply_overrides(|key| std::env::var(key).ok()))
}
