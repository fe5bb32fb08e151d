//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP server settings (bind address, timeouts).
    pub server: ServerConfig,

    /// Periodic worker settings.
    pub worker: WorkerConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,

    /// Database connection settings.
    pub database: DatabaseConfig,

    /// Redis connection settings.
    pub redis: RedisConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 15,
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Periodic worker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Seconds between work ticks.
    pub tick_interval_secs: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            tick_interval_secs: 5,
        }
    }
}

impl WorkerConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_interval_secs)
    }
}

/// Graceful shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Seconds activities get to drain after cancellation is broadcast.
    pub grace_period_secs: u64,
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: 30,
        }
    }
}

impl ShutdownConfig {
    pub fn grace_period(&self) -> Duration {
        Duration::from_secs(self.grace_period_secs)
    }
}

/// Database connection configuration.
///
/// The handle itself is owned by whichever activity opens it; only the
/// connection settings and DSN formatting live here.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub ssl_mode: String,
    pub max_open_conns: u32,
    pub max_idle_conns: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "service".to_string(),
            ssl_mode: "disable".to_string(),
            max_open_conns: 25,
            max_idle_conns: 10,
        }
    }
}

impl DatabaseConfig {
    /// PostgreSQL connection string.
    pub fn dsn(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={} sslmode={}",
            self.host, self.port, self.user, self.password, self.database, self.ssl_mode
        )
    }
}

/// Redis connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
    pub database: u32,
    pub pool_size: u32,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 6379,
            password: String::new(),
            database: 0,
            pool_size: 10,
        }
    }
}

impl RedisConfig {
    /// Redis connection address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output for development.
    #[default]
    Pretty,
    /// One JSON object per line for production.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log level when RUST_LOG is not set.
    pub log_level: String,

    /// Output format: "pretty" or "json".
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.server.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.worker.tick_interval(), Duration::from_secs(5));
        assert_eq!(config.shutdown.grace_period(), Duration::from_secs(30));
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [server]
            bind_address = "127.0.0.1:9090"

            [shutdown]
            grace_period_secs = 10
            "#,
        )
        .expect("valid config");

        assert_eq!(config.server.bind_address, "127.0.0.1:9090");
        assert_eq!(config.server.request_timeout_secs, 15);
        assert_eq!(config.shutdown.grace_period_secs, 10);
        assert_eq!(config.worker.tick_interval_secs, 5);
    }

    #[test]
    fn database_dsn_format() {
        let database = DatabaseConfig {
            host: "db.internal".to_string(),
            port: 5433,
            user: "svc".to_string(),
            password: "secret".to_string(),
            database: "svc_db".to_string(),
            ssl_mode: "require".to_string(),
            ..DatabaseConfig::default()
        };

        assert_eq!(
            database.dsn(),
            "host=db.internal port=5433 user=svc password=secret dbname=svc_db sslmode=require"
        );
    }

    #[test]
    fn redis_address_format() {
        let redis = RedisConfig {
            host: "cache.internal".to_string(),
            port: 6380,
            ..RedisConfig::default()
        };
        assert_eq!(redis.address(), "cache.internal:6380");
    }
}
