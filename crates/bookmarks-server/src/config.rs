//! Server configuration
//!
//! Built-in defaults overridden by `BOOKMARKS_*` environment variables.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;

pub const ENV_PREFIX: &str = "BOOKMARKS";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub bind_address: String,
    pub database_url: String,
    pub max_connections: u32,
    pub log_format: LogFormat,
}

impl Config {
    /// Load from the process environment
    pub fn load() -> Result<Self> {
        Self::from_env(None)
    }

    /// Load with an explicit variable map standing in for the environment
    pub fn from_env(vars: Option<HashMap<String, String>>) -> Result<Self> {
        let settings = ::config::Config::builder()
            .set_default("bind_address", "0.0.0.0:8000")?
            .set_default("database_url", "sqlite://data/bookmarks.db")?
            .set_default("max_connections", 5)?
            .set_default("log_format", "pretty")?
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(vars),
            )
            .build()
            .context("Failed to read configuration")?;

        let config: Config = settings
            .try_deserialize()
            .context("Invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.socket_addr()?;
        if self.max_connections == 0 {
            bail!("max_connections must be at least 1");
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address
            .parse()
            .with_context(|| format!("Failed to parse bind address: {}", self.bind_address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_env(vars(&[])).unwrap();
        assert_eq!(config.bind_address, "0.0.0.0:8000");
        assert_eq!(config.database_url, "sqlite://data/bookmarks.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::from_env(vars(&[
            ("BOOKMARKS_BIND_ADDRESS", "127.0.0.1:9090"),
            ("BOOKMARKS_DATABASE_URL", "sqlite::memory:"),
            ("BOOKMARKS_MAX_CONNECTIONS", "2"),
            ("BOOKMARKS_LOG_FORMAT", "json"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().unwrap().port(), 9090);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 2);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::from_env(vars(&[("BOOKMARKS_BIND_ADDRESS", "nowhere")])).is_err());
        assert!(Config::from_env(vars(&[("BOOKMARKS_MAX_CONNECTIONS", "0")])).is_err());
        assert!(Config::from_env(vars(&[("BOOKMARKS_LOG_FORMAT", "xml")])).is_err());
    }
}
