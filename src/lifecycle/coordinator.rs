//! Lifecycle coordination: the run/shutdown state machine.
//!
//! # Responsibilities
//! - Launch every registered activity concurrently
//! - Run until the shutdown trigger or the first unexpected completion
//! - Broadcast cancellation once and enforce the grace-period deadline
//! - Aggregate per-activity outcomes into a single process decision
//!
//! # Design Decisions
//! - Activities communicate by message passing only: a broadcast channel for
//!   cancellation, an mpsc channel for completion fan-in
//! - The deadline is a hard ceiling applied once, at the cancellation
//!   broadcast, independent of how many activities remain outstanding
//! - Activities still unreported at the deadline are abandoned; they may
//!   keep running until process exit (accepted limitation)

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::lifecycle::activity::{Activity, ActivityError, Outcome};
use crate::lifecycle::shutdown::Shutdown;

/// Immutable build metadata, injected at startup and logged once.
#[derive(Debug, Clone, Copy)]
pub struct BuildInfo {
    pub version: &'static str,
    pub build_time: Option<&'static str>,
}

impl BuildInfo {
    /// Metadata for the current crate build.
    pub fn from_crate() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            build_time: option_env!("BUILD_TIMESTAMP"),
        }
    }
}

/// Lifecycle states. Transitions are linear and terminal in `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Starting,
    Running,
    ShuttingDown,
    Stopped,
}

fn transition(from: State, to: State) -> State {
    tracing::debug!(from = ?from, to = ?to, "Lifecycle state transition");
    to
}

/// How the process ended. Mapped to an exit code by the entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Every activity drained before the deadline.
    CleanShutdown,
    /// At least one activity had to be abandoned at the shutdown deadline.
    ShutdownTimedOut,
    /// An activity failed while the system was still running.
    RuntimeFailure,
}

impl Disposition {
    /// Exit-status policy: clean = 0, runtime failure = 1, timed-out
    /// shutdown = 2, so a supervisor can tell "stopped cleanly" from
    /// "stopped but leaked work".
    pub fn exit_code(self) -> u8 {
        match self {
            Disposition::CleanShutdown => 0,
            Disposition::RuntimeFailure => 1,
            Disposition::ShutdownTimedOut => 2,
        }
    }
}

/// Final report: one outcome per registered activity plus the disposition.
#[derive(Debug)]
pub struct RunReport {
    pub outcomes: Vec<(String, Outcome)>,
    pub disposition: Disposition,
}

impl RunReport {
    /// Outcome of a single activity, by name.
    pub fn outcome(&self, name: &str) -> Option<&Outcome> {
        self.outcomes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, outcome)| outcome)
    }
}

/// Sole owner of the run/shutdown state machine.
///
/// Activities are registered before `run`, launched concurrently, and joined
/// (or abandoned) by the time `run` returns.
pub struct Coordinator {
    activities: Vec<(String, Box<dyn Activity>)>,
    shutdown: Shutdown,
    grace_period: Duration,
    build: BuildInfo,
}

impl Coordinator {
    /// Create a coordinator with the given shutdown grace period.
    pub fn new(grace_period: Duration, build: BuildInfo) -> Self {
        Self {
            activities: Vec::new(),
            shutdown: Shutdown::new(),
            grace_period,
            build,
        }
    }

    /// Register an activity. Must happen before `run`.
    pub fn register<A: Activity>(&mut self, activity: A) {
        self.activities
            .push((activity.name().to_string(), Box::new(activity)));
    }

    /// Handle used by the signal listener (and tests) to request shutdown.
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Run until every activity has an outcome or the deadline abandons it.
    pub async fn run(mut self) -> RunReport {
        let state = State::Starting;
        tracing::info!(
            version = self.build.version,
            build_time = self.build.build_time.unwrap_or("unknown"),
            activities = self.activities.len(),
            "Coordinator starting"
        );

        let (completion_tx, mut completions) = mpsc::channel(self.activities.len().max(1));

        let mut names = Vec::with_capacity(self.activities.len());
        for (index, (name, activity)) in self.activities.drain(..).enumerate() {
            let rx = self.shutdown.subscribe();
            let tx = completion_tx.clone();
            tracing::info!(activity = %name, "Activity starting");
            names.push(name);
            tokio::spawn(async move {
                let result = activity.run(rx).await;
                let _ = tx.send((index, result)).await;
            });
        }
        drop(completion_tx);

        let mut outcomes: Vec<Option<Outcome>> = names.iter().map(|_| None).collect();
        let mut disposition = Disposition::CleanShutdown;
        let mut signal_rx = self.shutdown.subscribe();

        let state = transition(state, State::Running);

        // Running: block until the shutdown trigger or the first completion.
        // No activity is expected to finish on its own.
        tokio::select! {
            _ = signal_rx.recv() => {
                tracing::info!("Shutdown requested, cancelling activities");
            }
            completion = completions.recv() => {
                if let Some((index, result)) = completion {
                    match result {
                        Ok(()) => {
                            tracing::warn!(
                                activity = %names[index],
                                "Activity returned before shutdown was requested"
                            );
                            outcomes[index] = Some(Outcome::Completed);
                        }
                        Err(err) => {
                            tracing::error!(
                                activity = %names[index],
                                error = %err,
                                "Activity failed, stopping all others"
                            );
                            outcomes[index] = Some(Outcome::Failed(err));
                            disposition = Disposition::RuntimeFailure;
                        }
                    }
                }
            }
        }

        let state = transition(state, State::ShuttingDown);
        self.shutdown.trigger();
        let deadline = Instant::now() + self.grace_period;

        // Drain remaining completions, racing the deadline.
        while outcomes.iter().any(|outcome| outcome.is_none()) {
            match tokio::time::timeout_at(deadline, completions.recv()).await {
                Ok(Some((index, result))) => {
                    outcomes[index] = Some(classify_drained(&names[index], result));
                }
                // Channel closed: a task ended without reporting (panicked).
                // Its slot stays empty and is recorded as timed out below.
                Ok(None) => break,
                Err(_) => {
                    tracing::warn!(
                        grace_period_secs = self.grace_period.as_secs(),
                        "Shutdown deadline elapsed, abandoning unfinished activities"
                    );
                    break;
                }
            }
        }

        let outcomes: Vec<(String, Outcome)> = names
            .into_iter()
            .zip(outcomes)
            .map(|(name, outcome)| {
                let outcome =
                    outcome.unwrap_or_else(|| Outcome::Failed(ActivityError::ShutdownTimeout));
                (name, outcome)
            })
            .collect();

        if disposition == Disposition::CleanShutdown
            && outcomes
                .iter()
                .any(|(_, o)| matches!(o, Outcome::Failed(ActivityError::ShutdownTimeout)))
        {
            disposition = Disposition::ShutdownTimedOut;
        }

        let state = transition(state, State::Stopped);
        debug_assert_eq!(state, State::Stopped);

        for (name, outcome) in &outcomes {
            tracing::info!(activity = %name, outcome = %outcome, "Activity outcome");
        }
        tracing::info!(disposition = ?disposition, "Coordinator stopped");

        RunReport {
            outcomes,
            disposition,
        }
    }
}

/// Classify a completion observed after cancellation was already requested.
/// Failures here are informational; they cannot change the disposition.
fn classify_drained(name: &str, result: Result<(), ActivityError>) -> Outcome {
    match result {
        Ok(()) => {
            tracing::info!(activity = %name, "Activity drained");
            Outcome::Cancelled
        }
        Err(err) => {
            tracing::warn!(activity = %name, error = %err, "Activity failed while shutting down");
            Outcome::Failed(err)
        }
    }
}
