//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse, ports valid)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function over the merged config
//! - Runs before the config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ServiceConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate the merged configuration, collecting every failure.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "server.bind_address",
            message: format!("not a valid socket address: {}", config.server.bind_address),
        });
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "server.request_timeout_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.worker.tick_interval_secs == 0 {
        errors.push(ValidationError {
            field: "worker.tick_interval_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.shutdown.grace_period_secs == 0 {
        errors.push(ValidationError {
            field: "shutdown.grace_period_secs",
            message: "must be greater than zero".to_string(),
        });
    }

    if config.database.host.is_empty() {
        errors.push(ValidationError {
            field: "database.host",
            message: "must not be empty".to_string(),
        });
    }
    if config.database.port == 0 {
        errors.push(ValidationError {
            field: "database.port",
            message: "must be greater than zero".to_string(),
        });
    }
    if config.database.user.is_empty() {
        errors.push(ValidationError {
            field: "database.user",
            message: "must not be empty".to_string(),
        });
    }
    if config.database.database.is_empty() {
        errors.push(ValidationError {
            field: "database.database",
            message: "must not be empty".to_string(),
        });
    }

    if config.redis.port == 0 {
        errors.push(ValidationError {
            field: "redis.port",
            message: "must be greater than zero".to_string(),
        });
    }

    match config.observability.log_level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        other => errors.push(ValidationError {
            field: "observability.log_level",
            message: format!("unknown level: {}", other),
        }),
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
