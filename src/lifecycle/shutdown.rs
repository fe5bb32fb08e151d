//! Shutdown coordination for the service.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Provides a broadcast channel that all long-running activities subscribe to.
/// Triggering is one-shot: the first call wins, later calls are no-ops, and
/// the cancelled state never reverses.
#[derive(Clone)]
pub struct Shutdown {
    /// Broadcast channel sender.
    tx: broadcast::Sender<()>,
    /// Set before the broadcast is sent; never cleared.
    triggered: Arc<AtomicBool>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self {
            tx,
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Subscribe to the shutdown signal.
    pub fn subscribe(&self) -> ShutdownReceiver {
        ShutdownReceiver {
            rx: self.tx.subscribe(),
            triggered: Arc::clone(&self.triggered),
        }
    }

    /// Trigger the shutdown signal. Only the first call has any effect.
    pub fn trigger(&self) {
        if !self.triggered.swap(true, Ordering::AcqRel) {
            let _ = self.tx.send(());
        }
    }

    /// Whether shutdown has been requested.
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-activity view of the shutdown signal.
pub struct ShutdownReceiver {
    rx: broadcast::Receiver<()>,
    triggered: Arc<AtomicBool>,
}

impl ShutdownReceiver {
    /// Wait until shutdown is requested.
    ///
    /// Resolves immediately when the trigger already happened, so observing
    /// the signal is repeatable and safe to do late.
    pub async fn recv(&mut self) {
        if self.is_triggered() {
            return;
        }
        // The flag is set before the broadcast goes out, so reaching this
        // point means our receiver existed in time to get the message.
        let _ = self.rx.recv().await;
    }

    /// Whether shutdown has been requested.
    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn receivers_observe_trigger() {
        let shutdown = Shutdown::new();
        let mut a = shutdown.subscribe();
        let mut b = shutdown.subscribe();

        shutdown.trigger();

        tokio::time::timeout(Duration::from_secs(1), a.recv())
            .await
            .expect("receiver a never woke");
        tokio::time::timeout(Duration::from_secs(1), b.recv())
            .await
            .expect("receiver b never woke");
    }

    #[tokio::test]
    async fn trigger_is_idempotent() {
        let shutdown = Shutdown::new();
        let mut rx = shutdown.subscribe();

        shutdown.trigger();
        shutdown.trigger();
        shutdown.trigger();

        assert!(shutdown.is_triggered());
        // Repeated observation never blocks and never un-cancels.
        rx.recv().await;
        rx.recv().await;
        assert!(rx.is_triggered());
    }

    #[tokio::test]
    async fn subscribe_after_trigger_resolves_immediately() {
        let shutdown = Shutdown::new();
        shutdown.trigger();

        let mut late = shutdown.subscribe();
        tokio::time::timeout(Duration::from_millis(100), late.recv())
            .await
            .expect("late subscriber should see the trigger");
    }

    #[tokio::test]
    async fn not_triggered_until_trigger() {
        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        assert!(!shutdown.is_triggered());
        assert!(!rx.is_triggered());
    }
}
