//! OS signal handling.
//!
//! # Responsibilities
//! - Register termination signal handlers (SIGTERM, SIGINT)
//! - Translate the first qualifying signal into one shutdown trigger
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Signals received while already shutting down are consumed and ignored;
//!   the grace-period deadline bounds total shutdown time either way

use crate::lifecycle::shutdown::Shutdown;

/// Block until a termination-class signal arrives.
#[cfg(unix)]
pub async fn wait_for_termination() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    let mut sigint = signal(SignalKind::interrupt()).expect("failed to install SIGINT handler");

    tokio::select! {
        _ = sigterm.recv() => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
        _ = sigint.recv() => {
            tracing::info!("Received SIGINT, initiating graceful shutdown");
        }
    }
}

/// Block until Ctrl+C on platforms without Unix signals.
#[cfg(not(unix))]
pub async fn wait_for_termination() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("Received Ctrl+C, initiating graceful shutdown");
}

/// Spawn the signal listener wired to a shutdown handle.
///
/// The handlers stay installed for the process lifetime, so a second
/// SIGTERM/SIGINT during shutdown is consumed without further effect.
pub fn trigger_on_termination(shutdown: Shutdown) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        wait_for_termination().await;
        shutdown.trigger();
    })
}
