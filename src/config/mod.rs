//! Configuration management for ConvertBot
//!
//! Loads defaults, optional config files, and CONVERTBOT__* environment
//! overrides via .env

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::convert::CachePolicy;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub coingecko: CoinGeckoConfig,
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoinGeckoConfig {
    /// API base URL
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User-Agent sent with every request
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Symbol cache TTL in seconds
    pub symbol_ttl_secs: u64,
    /// Symbol cache capacity
    pub symbol_capacity: usize,
    /// Price cache TTL in seconds
    pub price_ttl_secs: u64,
    /// Price cache capacity
    pub price_capacity: usize,
}

impl CacheConfig {
    pub fn policy(&self) -> CachePolicy {
        CachePolicy {
            symbol_ttl: Duration::from_secs(self.symbol_ttl_secs),
            symbol_capacity: self.symbol_capacity,
            price_ttl: Duration::from_secs(self.price_ttl_secs),
            price_capacity: self.price_capacity,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, files, and environment
    pub fn load() -> Result<Self> {
        // Load .env file first
        dotenvy::dotenv().ok();

        let config = Config::builder()
            // CoinGecko defaults
            .set_default("coingecko.base_url", "https://api.coingecko.com/api/v3")?
            .set_default("coingecko.timeout_secs", 12)?
            .set_default(
                "coingecko.user_agent",
                format!("ConvertBot/{} (+https://t.me/)", env!("CARGO_PKG_VERSION")),
            )?
            // Cache defaults
            .set_default("cache.symbol_ttl_secs", 12 * 60 * 60)?
            .set_default("cache.symbol_capacity", 5000)?
            .set_default("cache.price_ttl_secs", 60)?
            .set_default("cache.price_capacity", 5000)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (CONVERTBOT_*)
            .add_source(Environment::with_prefix("CONVERTBOT").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        Ok(app_config)
    }

    /// Generate a digest of the config for logging
    pub fn digest(&self) -> String {
        format!(
            "coingecko={} timeout={}s symbol_ttl={}s price_ttl={}s",
            self.coingecko.base_url,
            self.coingecko.timeout_secs,
            self.cache.symbol_ttl_secs,
            self.cache.price_ttl_secs
        )
    }
}

impl std::fmt::Display for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest())
    }
}
