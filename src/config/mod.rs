//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, then env overrides)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so an empty config is valid
//! - Environment variables win over file values (PORT, LOG_LEVEL, DB_*, ...)

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    DatabaseConfig, LogFormat, ObservabilityConfig, RedisConfig, ServerConfig, ServiceConfig,
    ShutdownConfig, WorkerConfig,
};
pub use validation::{validate_config, ValidationError};
