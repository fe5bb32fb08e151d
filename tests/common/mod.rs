//! Shared scripted activities for integration testing.

use std::time::Duration;

use async_trait::async_trait;
use service_runner::lifecycle::{Activity, ActivityError, ShutdownReceiver};

/// Waits for the shutdown signal, then exits cleanly.
pub struct DrainingActivity {
    name: &'static str,
}

impl DrainingActivity {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl Activity for DrainingActivity {
    fn name(&self) -> &str {
        self.name
    }

    async fn run(self: Box<Self>, mut shutdown: ShutdownReceiver) -> Result<(), ActivityError> {
        shutdown.recv().await;
        Ok(())
    }
}

/// Ignores cancellation entirely; must be abandoned at the deadline.
pub struct StuckActivity;

#[async_trait]
impl Activity for StuckActivity {
    fn name(&self) -> &str {
        "stuck"
    }

    async fn run(self: Box<Self>, _shutdown: ShutdownReceiver) -> Result<(), ActivityError> {
        std::future::pending::<()>().await;
        Ok(())
    }
}

/// Fails with a runtime error after a delay, with no shutdown requested.
pub struct FailingActivity {
    pub after: Duration,
}

#[async_trait]
impl Activity for FailingActivity {
    fn name(&self) -> &str {
        "failing"
    }

    async fn run(self: Box<Self>, _shutdown: ShutdownReceiver) -> Result<(), ActivityError> {
        tokio::time::sleep(self.after).await;
        Err(ActivityError::Runtime("injected failure".to_string()))
    }
}
