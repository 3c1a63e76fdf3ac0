//! Configuration management for the Deployment Registry
//!
//! Loads configuration from environment variables with sensible defaults.

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server host
    pub host: String,

    /// API server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup, e.g. the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Config {
            host: lookup("REGISTRY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),

            port: lookup("REGISTRY_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("Invalid REGISTRY_PORT")?,
        };

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("REGISTRY_PORT must be greater than 0");
        }

        Ok(())
    }

    /// Get the address to bind
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
