//! Periodic job processing loop.

use async_trait::async_trait;
use tokio::time;

use crate::config::WorkerConfig;
use crate::lifecycle::{Activity, ActivityError, ShutdownReceiver};

/// Background activity that performs one unit of work per tick.
pub struct WorkerActivity {
    tick_interval: std::time::Duration,
}

impl WorkerActivity {
    pub fn new(config: &WorkerConfig) -> Self {
        Self {
            tick_interval: config.tick_interval(),
        }
    }

    async fn process_jobs(&self) {
        // Placeholder until real job handling lands.
        tracing::info!("Worker processing jobs");
    }
}

#[async_trait]
impl Activity for WorkerActivity {
    fn name(&self) -> &str {
        "periodic-worker"
    }

    async fn run(self: Box<Self>, mut shutdown: ShutdownReceiver) -> Result<(), ActivityError> {
        tracing::info!(
            interval_secs = self.tick_interval.as_secs(),
            "Worker starting"
        );

        let mut ticker = time::interval(self.tick_interval);
        let mut ticks: u64 = 0;

        loop {
            // Cancellation wins over a tick that is ready in the same poll,
            // so shutdown never waits out the remainder of an interval.
            tokio::select! {
                biased;

                _ = shutdown.recv() => {
                    tracing::info!(ticks, "Worker received shutdown signal, exiting loop");
                    break;
                }
                _ = ticker.tick() => {
                    self.process_jobs().await;
                    ticks += 1;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;
    use std::time::{Duration, Instant};

    #[tokio::test]
    async fn cancellation_preempts_the_tick_wait() {
        // A tick interval far longer than the test: if cancellation only
        // took effect at tick boundaries this would hang well past the
        // assertion window.
        let worker = Box::new(WorkerActivity {
            tick_interval: Duration::from_secs(60),
        });

        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        let handle = tokio::spawn(worker.run(rx));

        tokio::time::sleep(Duration::from_millis(50)).await;
        let triggered_at = Instant::now();
        shutdown.trigger();

        let result = tokio::time::timeout(Duration::from_secs(2), handle)
            .await
            .expect("worker did not exit after cancellation")
            .expect("worker task panicked");
        assert!(result.is_ok());
        assert!(triggered_at.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn exits_immediately_when_already_cancelled() {
        let worker = Box::new(WorkerActivity {
            tick_interval: Duration::from_secs(60),
        });

        let shutdown = Shutdown::new();
        shutdown.trigger();

        let result = tokio::time::timeout(Duration::from_secs(1), worker.run(shutdown.subscribe()))
            .await
            .expect("worker did not observe pre-existing cancellation");
        assert!(result.is_ok());
    }
}
