use std::env;
use anyhow::{Context, Result};

pub const DEFAULT_API_KEY: &str = "mysecretapikey";
pub const DEFAULT_DATABASE_URL: &str = "sqlite:items.db";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub database_url: String,
    pub database_max_connections: u32,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("API_KEY").unwrap_or_else(|| DEFAULT_API_KEY.to_string());

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse::<u32>()
            .context("DATABASE_MAX_CONNECTIONS must be a positive integer")?;

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            api_key,
            database_url,
            database_max_connections,
            service_port,
            service_host,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  API key: {}", mask_secret(&self.api_key));
        if self.api_key == DEFAULT_API_KEY {
            tracing::warn!("  API_KEY is unset, using the built-in default key");
        }
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Database max connections: {}", self.database_max_connections);
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

fn mask_secret(secret: &str) -> String {
    match secret.chars().count() {
        0 => "(empty)".to_string(),
        n if n <= 4 => "*".repeat(n),
        n => {
            let tail: String = secret.chars().skip(n - 2).collect();
            format!("{}{}", "*".repeat(n - 2), tail)
        }
    }
}
