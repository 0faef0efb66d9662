//! Publishing [`StartupPhase`] to observers.

use tokio::sync::watch;
use tracing::debug;

use crate::domain::phase::StartupPhase;

/// Single writer for the phase channel.
///
/// Rejects any transition that would move the phase backwards within one
/// execution.
#[derive(Debug)]
pub struct PhaseTracker {
    tx: watch::Sender<StartupPhase>,
}

impl PhaseTracker {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(StartupPhase::Idle);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<StartupPhase> {
        self.tx.subscribe()
    }

    pub fn current(&self) -> StartupPhase {
        *self.tx.borrow()
    }

    /// Start a new execution from [`StartupPhase::Idle`].
    pub fn reset(&self) {
        self.tx.send_replace(StartupPhase::Idle);
    }

    /// Publish `next` if it moves the phase forward. Returns whether it did.
    pub fn advance(&self, next: StartupPhase) -> bool {
        let mut rejected_from = None;
        self.tx.send_if_modified(|current| {
            if current.can_advance_to(next) {
                *current = next;
                true
            } else {
                rejected_from = Some(*current);
                false
            }
        });

        if let Some(current) = rejected_from {
            debug!(current = %current, next = %next, "Ignoring non-monotonic phase transition");
            return false;
        }
        true
    }
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::startup::StartupStep;

    #[test]
    fn advance_publishes_forward_moves() {
        let tracker = PhaseTracker::new();
        let rx = tracker.subscribe();

        assert!(tracker.advance(StartupPhase::GettingLocation));
        assert_eq!(*rx.borrow(), StartupPhase::GettingLocation);
        assert!(tracker.advance(StartupPhase::Failed(StartupStep::Location)));
        assert!(tracker.advance(StartupPhase::FetchingConfig));
        assert_eq!(tracker.current(), StartupPhase::FetchingConfig);
    }

    #[test]
    fn advance_rejects_backward_moves() {
        let tracker = PhaseTracker::new();
        tracker.advance(StartupPhase::FetchingConfig);

        assert!(!tracker.advance(StartupPhase::GettingLocation));
        assert_eq!(tracker.current(), StartupPhase::FetchingConfig);
    }

    #[test]
    fn reset_returns_to_idle() {
        let tracker = PhaseTracker::new();
        tracker.advance(StartupPhase::Completed);
        tracker.reset();

        assert_eq!(tracker.current(), StartupPhase::Idle);
        assert!(tracker.advance(StartupPhase::GettingLocation));
    }

    #[tokio::test]
    async fn subscribers_observe_changes() {
        let tracker = PhaseTracker::new();
        let mut rx = tracker.subscribe();

        tracker.advance(StartupPhase::GettingLocation);
        rx.changed().await.expect("sender alive");
        assert_eq!(*rx.borrow_and_update(), StartupPhase::GettingLocation);
    }
}
