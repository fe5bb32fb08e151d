//! Activity abstraction over long-running units of work.
//!
//! # Responsibilities
//! - Define the run contract shared by the HTTP server and the worker
//! - Classify how each activity ended (completed, cancelled, failed)
//!
//! # Design Decisions
//! - Activities are infinite-running: they only return after observing the
//!   shutdown signal, or with an error
//! - Cancellation is cooperative; the coordinator enforces the deadline

use async_trait::async_trait;
use thiserror::Error;

use crate::lifecycle::shutdown::ShutdownReceiver;

/// Errors produced by a running activity.
#[derive(Debug, Error)]
pub enum ActivityError {
    /// Underlying I/O failure (bind, accept, serve).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Activity-specific failure while running.
    #[error("{0}")]
    Runtime(String),

    /// The activity did not report back within the shutdown grace period.
    /// Recorded by the coordinator, never returned by an activity itself.
    #[error("did not stop within the shutdown grace period")]
    ShutdownTimeout,
}

/// Terminal result of a single activity run.
#[derive(Debug)]
pub enum Outcome {
    /// Returned cleanly without cancellation ever being requested.
    Completed,
    /// Observed the shutdown signal and drained cleanly.
    Cancelled,
    /// Terminated with an error, or was abandoned at the shutdown deadline.
    Failed(ActivityError),
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Completed => write!(f, "completed"),
            Outcome::Cancelled => write!(f, "cancelled"),
            Outcome::Failed(err) => write!(f, "failed: {}", err),
        }
    }
}

/// A long-running, cancellable unit of work owned by the coordinator.
///
/// Implementations must check the shutdown signal at bounded intervals and
/// return within the grace period once it is observed. Returning `Ok` before
/// shutdown was requested is unexpected and makes the coordinator stop the
/// whole process.
#[async_trait]
pub trait Activity: Send + 'static {
    /// Name used in logs and the final outcome report.
    fn name(&self) -> &str;

    /// Run until cancelled or failed.
    async fn run(self: Box<Self>, shutdown: ShutdownReceiver) -> Result<(), ActivityError>;
}
