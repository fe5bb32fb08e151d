//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Bind listener → Register activities → Run
//!
//! Running (coordinator.rs):
//!     Activities spawned → block on {shutdown trigger, first completion}
//!
//! Shutdown:
//!     Signal received (signals.rs) → broadcast cancellation (shutdown.rs)
//!     → drain activities under deadline → report outcomes → Exit
//! ```
//!
//! # Design Decisions
//! - One cancellation per process lifetime: the token is one-shot
//! - Shutdown has a timeout: unfinished activities are abandoned at the
//!   deadline and recorded as timed out

pub mod activity;
pub mod coordinator;
pub mod shutdown;
pub mod signals;

pub use activity::{Activity, ActivityError, Outcome};
pub use coordinator::{BuildInfo, Coordinator, Disposition, RunReport};
pub use shutdown::{Shutdown, ShutdownReceiver};
