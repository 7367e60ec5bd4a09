//! Cancellation for the listening session.

use tokio::sync::watch;

/// Create a linked trigger/signal pair.
pub fn channel() -> (ShutdownTrigger, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger { tx }, ShutdownSignal { rx })
}

/// Fires the shutdown. Dropping the trigger also counts as firing it.
#[derive(Debug)]
pub struct ShutdownTrigger {
    tx: watch::Sender<bool>,
}

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

/// Observes the shutdown. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once the trigger fires or is dropped.
    pub async fn cancelled(&mut self) {
        // Err means the trigger is gone
        let _ = self.rx.wait_for(|cancelled| *cancelled).await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_trigger_wakes_signal() {
        let (trigger, mut signal) = channel();
        assert!(!signal.is_cancelled());

        let waiter = tokio::spawn(async move {
            signal.cancelled().await;
        });
        trigger.trigger();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("signal never fired")
            .unwrap();
    }

    #[tokio::test]
    async fn test_dropped_trigger_cancels() {
        let (trigger, mut signal) = channel();
        drop(trigger);

        assert!(signal.is_cancelled());
        tokio::time::timeout(Duration::from_secs(1), signal.cancelled())
            .await
            .expect("signal never fired");
    }

    #[tokio::test]
    async fn test_clones_observe_same_trigger() {
        let (trigger, signal) = channel();
        let other = signal.clone();
        trigger.trigger();
        assert!(signal.is_cancelled());
        assert!(other.is_cancelled());
    }
}
