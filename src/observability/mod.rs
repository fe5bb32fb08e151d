//! Observability subsystem: structured logging for lifecycle events.

pub mod logging;

pub use logging::init_logging;
