//! Background worker subsystem.
//!
//! # Responsibilities
//! - Run the periodic job loop on a fixed tick interval
//! - Exit promptly when cancellation is observed, even mid-interval

pub mod jobs;

pub use jobs::WorkerActivity;
