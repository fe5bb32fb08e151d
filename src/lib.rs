//! Long-running service skeleton.
//!
//! # Architecture Overview
//!
//! ```text
//!                ┌──────────────────────────────────────────────┐
//!                │                 COORDINATOR                  │
//!                │                                              │
//!   SIGTERM ─────┼─▶ signals ──▶ shutdown token ──┬─▶ http      │
//!   SIGINT       │                (one-shot       │   server    │
//!                │                 broadcast)     │             │
//!                │                                └─▶ periodic  │
//!                │                                    worker    │
//!                │                                              │
//!                │  activities report outcomes ──▶ run report   │
//!                │  (drain bounded by the grace-period deadline)│
//!                └──────────────────────────────────────────────┘
//! ```
//!
//! The coordinator launches every registered [`lifecycle::Activity`]
//! concurrently, runs until a termination signal or an unexpected failure,
//! broadcasts cancellation once, and drains the activities under a hard
//! deadline. Everything else — config, logging, the health endpoint, the
//! worker tick loop — is glue around that state machine.

// Core subsystems
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod worker;

// Cross-cutting concerns
pub mod observability;

pub use config::ServiceConfig;
pub use http::ServerActivity;
pub use lifecycle::{Activity, Coordinator, Shutdown};
pub use worker::WorkerActivity;
