use std::str::FromStr;

use anyhow::{Context, Result};

use crate::utils::RetryConfig;

// ============================================================================
// Service Configuration
// ============================================================================
//
// Read from environment variables at startup:
//
//   ORDERS_HTTP_HOST               bind address           (0.0.0.0)
//   ORDERS_HTTP_PORT               bind port              (8080)
//   DATABASE_URL                   PostgreSQL URL; unset means in-memory store
//   ORDERS_DB_MAX_CONNECTIONS      pool size              (10)
//   ORDERS_DB_CONNECT_ATTEMPTS     startup connect tries  (5)
//   ORDERS_EVENT_CHANNEL_CAPACITY  event fan-out buffer   (1024)
//
// Log filtering is separate and uses RUST_LOG.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub http_host: String,
    pub http_port: u16,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_connect_retry: RetryConfig,
    pub event_channel_capacity: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let connect_attempts: u32 = parse_or(&lookup, "ORDERS_DB_CONNECT_ATTEMPTS", 5)?;

        Ok(Self {
            http_host: lookup("ORDERS_HTTP_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            http_port: parse_or(&lookup, "ORDERS_HTTP_PORT", 8080)?,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            db_max_connections: parse_or(&lookup, "ORDERS_DB_MAX_CONNECTIONS", 10)?,
            db_connect_retry: RetryConfig::default().with_max_attempts(connect_attempts),
            event_channel_capacity: parse_or(&lookup, "ORDERS_EVENT_CHANNEL_CAPACITY", 1024)?,
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {}: {:?}", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.http_host, "0.0.0.0");
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.database_url, None);
        assert_eq!(config.db_max_connections, 10);
        assert_eq!(config.db_connect_retry.max_attempts, 5);
        assert_eq!(config.event_channel_capacity, 1024);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("ORDERS_HTTP_HOST", "127.0.0.1"),
            ("ORDERS_HTTP_PORT", "9000"),
            ("DATABASE_URL", "postgres://orders@localhost/orders"),
            ("ORDERS_DB_MAX_CONNECTIONS", "4"),
            ("ORDERS_DB_CONNECT_ATTEMPTS", "2"),
            ("ORDERS_EVENT_CHANNEL_CAPACITY", "64"),
        ])
        .unwrap();

        assert_eq!(config.http_host, "127.0.0.1");
        assert_eq!(config.http_port, 9000);
        assert_eq!(config.database_url.as_deref(), Some("postgres://orders@localhost/orders"));
        assert_eq!(config.db_max_connections, 4);
        assert_eq!(config.db_connect_retry.max_attempts, 2);
        assert_eq!(config.event_channel_capacity, 64);
    }

    #[test]
    fn test_blank_database_url_means_in_memory() {
        let config = config_from(&[("DATABASE_URL", "  ")]).unwrap();
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_invalid_port_names_the_variable() {
        let err = config_from(&[("ORDERS_HTTP_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("ORDERS_HTTP_PORT"));
    }
}
