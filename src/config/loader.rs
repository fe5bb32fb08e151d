//! Configuration loading from disk and environment.
//!
//! Values come from three layers: built-in defaults, an optional TOML file,
//! and environment variable overrides (highest precedence). The merged
//! config is validated before it is accepted into the system.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::{LogFormat, ServiceConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    Env { key: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|err| err.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Load and validate configuration.
///
/// When `path` is `None` the built-in defaults are used as the base layer.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => ServiceConfig::default(),
    };

    apply_env_overrides(&mut config)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment variable overrides on top of the loaded config.
///
/// An invalid value fails the load rather than being silently replaced by
/// the default.
pub fn apply_env_overrides(config: &mut ServiceConfig) -> Result<(), ConfigError> {
    if let Some(address) = env_string("BIND_ADDRESS") {
        config.server.bind_address = address;
    }
    if let Some(port) = env_parse::<u16>("PORT")? {
        let host = config
            .server
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host)
            .unwrap_or("0.0.0.0");
        config.server.bind_address = format!("{}:{}", host, port);
    }
    if let Some(secs) = env_parse("REQUEST_TIMEOUT_SECS")? {
        config.server.request_timeout_secs = secs;
    }

    if let Some(secs) = env_parse("WORKER_TICK_SECS")? {
        config.worker.tick_interval_secs = secs;
    }
    if let Some(secs) = env_parse("SHUTDOWN_GRACE_SECS")? {
        config.shutdown.grace_period_secs = secs;
    }

    if let Some(host) = env_string("DB_HOST") {
        config.database.host = host;
    }
    if let Some(port) = env_parse("DB_PORT")? {
        config.database.port = port;
    }
    if let Some(user) = env_string("DB_USER") {
        config.database.user = user;
    }
    if let Some(password) = env_string("DB_PASSWORD") {
        config.database.password = password;
    }
    if let Some(name) = env_string("DB_NAME") {
        config.database.database = name;
    }
    if let Some(mode) = env_string("DB_SSL_MODE") {
        config.database.ssl_mode = mode;
    }
    if let Some(conns) = env_parse("DB_MAX_OPEN_CONNS")? {
        config.database.max_open_conns = conns;
    }
    if let Some(conns) = env_parse("DB_MAX_IDLE_CONNS")? {
        config.database.max_idle_conns = conns;
    }

    if let Some(host) = env_string("REDIS_HOST") {
        config.redis.host = host;
    }
    if let Some(port) = env_parse("REDIS_PORT")? {
        config.redis.port = port;
    }
    if let Some(password) = env_string("REDIS_PASSWORD") {
        config.redis.password = password;
    }
    if let Some(database) = env_parse("REDIS_DB")? {
        config.redis.database = database;
    }
    if let Some(size) = env_parse("REDIS_POOL_SIZE")? {
        config.redis.pool_size = size;
    }

    if let Some(level) = env_string("LOG_LEVEL") {
        config.observability.log_level = level;
    }
    if let Some(format) = env_parse::<LogFormat>("LOG_FORMAT")? {
        config.observability.log_format = format;
    }

    Ok(())
}

fn env_string(key: &'static str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

fn env_parse<T: FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    match env_string(key) {
        None => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Env { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "BIND_ADDRESS",
            "PORT",
            "REQUEST_TIMEOUT_SECS",
            "WORKER_TICK_SECS",
            "SHUTDOWN_GRACE_SECS",
            "LOG_LEVEL",
            "LOG_FORMAT",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn defaults_load_without_file() {
        clear_env();
        let config = load_config(None).expect("defaults must validate");
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn port_override_keeps_host() {
        clear_env();
        std::env::set_var("PORT", "9999");
        let config = load_config(None).expect("valid override");
        assert_eq!(config.server.bind_address, "0.0.0.0:9999");
        clear_env();
    }

    #[test]
    #[serial]
    fn invalid_port_fails_fast() {
        clear_env();
        std::env::set_var("PORT", "not-a-port");
        let err = load_config(None).expect_err("invalid port must fail");
        assert!(matches!(err, ConfigError::Env { key: "PORT", .. }));
        clear_env();
    }

    #[test]
    #[serial]
    fn log_format_override() {
        clear_env();
        std::env::set_var("LOG_FORMAT", "json");
        let config = load_config(None).expect("valid override");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        clear_env();
    }

    #[test]
    #[serial]
    fn tick_and_grace_overrides() {
        clear_env();
        std::env::set_var("WORKER_TICK_SECS", "1");
        std::env::set_var("SHUTDOWN_GRACE_SECS", "7");
        let config = load_config(None).expect("valid overrides");
        assert_eq!(config.worker.tick_interval_secs, 1);
        assert_eq!(config.shutdown.grace_period_secs, 7);
        clear_env();
    }
}
