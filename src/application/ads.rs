//! Serialized access to the ad SDK.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, info};

use super::timeout::bounded;
use crate::error::ProviderError;
use crate::port::outbound::ads::AdInitializer;

#[derive(Debug, Default)]
struct GateState {
    initialized: bool,
    attempts: u32,
}

/// Guard shared by the launch pipeline and the deferred consent path.
///
/// Initialization attempts are serialized; once one succeeds every later
/// request returns immediately without touching the SDK. A failed attempt
/// leaves the gate open for the next caller to retry.
pub struct AdInitializationGate {
    initializer: Arc<dyn AdInitializer>,
    state: Mutex<GateState>,
}

impl AdInitializationGate {
    pub fn new(initializer: Arc<dyn AdInitializer>) -> Self {
        Self {
            initializer,
            state: Mutex::new(GateState::default()),
        }
    }

    /// Initialize the SDK unless it already is.
    ///
    /// `limit` bounds the whole call, including time spent waiting for a
    /// concurrent attempt to finish.
    ///
    /// # Errors
    ///
    /// Returns the initializer's failure, or [`ProviderError::Timeout`] when
    /// `limit` elapses.
    pub async fn initialize(&self, limit: Duration) -> Result<(), ProviderError> {
        // A limit too large to land on the clock means no deadline at all.
        let deadline = Instant::now().checked_add(limit);
        let mut state = match deadline {
            Some(deadline) => timeout_at(deadline, self.state.lock())
                .await
                .map_err(|_| ProviderError::Timeout)?,
            None => self.state.lock().await,
        };

        if state.initialized {
            debug!(sdk = self.initializer.name(), "Ad SDK already initialized");
            return Ok(());
        }

        let remaining = deadline.map_or(limit, |deadline| {
            deadline.saturating_duration_since(Instant::now())
        });
        state.attempts += 1;
        bounded(remaining, self.initializer.initialize(remaining)).await?;

        state.initialized = true;
        info!(
            sdk = self.initializer.name(),
            attempts = state.attempts,
            "Ad SDK initialized"
        );
        Ok(())
    }

    pub async fn is_initialized(&self) -> bool {
        self.state.lock().await.initialized
    }

    /// Number of times the SDK itself was invoked. Requests that ran out of
    /// time waiting for the gate are not counted.
    pub async fn attempts(&self) -> u32 {
        self.state.lock().await.attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::simulated::Simulated;

    #[tokio::test(start_paused = true)]
    async fn second_request_skips_sdk() {
        let sdk = Simulated::succeed(());
        let gate = AdInitializationGate::new(Arc::new(sdk.clone()));

        gate.initialize(Duration::from_secs(1)).await.expect("first");
        gate.initialize(Duration::from_secs(1)).await.expect("second");

        assert_eq!(sdk.calls(), 1);
        assert!(gate.is_initialized().await);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_attempt_can_be_retried() {
        let sdk = Simulated::fail(ProviderError::Unavailable("no fill".into()));
        let gate = AdInitializationGate::new(Arc::new(sdk.clone()));

        assert!(gate.initialize(Duration::from_secs(1)).await.is_err());
        assert!(gate.initialize(Duration::from_secs(1)).await.is_err());

        assert_eq!(sdk.calls(), 2);
        assert_eq!(gate.attempts().await, 2);
        assert!(!gate.is_initialized().await);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_requests_initialize_once() {
        let sdk = Simulated::succeed(()).with_latency(Duration::from_millis(500));
        let gate = Arc::new(AdInitializationGate::new(Arc::new(sdk.clone())));

        let first = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.initialize(Duration::from_secs(5)).await })
        };
        let second = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.initialize(Duration::from_secs(5)).await })
        };

        assert!(first.await.expect("join").is_ok());
        assert!(second.await.expect("join").is_ok());
        assert_eq!(sdk.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unbounded_limit_does_not_overflow_the_clock() {
        let sdk = Simulated::succeed(()).with_latency(Duration::from_secs(90));
        let gate = AdInitializationGate::new(Arc::new(sdk.clone()));

        gate.initialize(Duration::MAX).await.expect("initialized");

        assert_eq!(sdk.calls(), 1);
        assert!(gate.is_initialized().await);
    }

    #[tokio::test(start_paused = true)]
    async fn request_that_times_out_waiting_is_not_an_attempt() {
        let sdk = Simulated::succeed(()).with_latency(Duration::from_secs(10));
        let gate = Arc::new(AdInitializationGate::new(Arc::new(sdk.clone())));

        let slow = {
            let gate = Arc::clone(&gate);
            tokio::spawn(async move { gate.initialize(Duration::from_secs(30)).await })
        };
        tokio::task::yield_now().await;

        let impatient = gate.initialize(Duration::from_secs(1)).await;
        assert_eq!(impatient, Err(ProviderError::Timeout));

        assert!(slow.await.expect("join").is_ok());
        assert_eq!(gate.attempts().await, 1);
        assert_eq!(sdk.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn hanging_sdk_times_out() {
        let sdk = Simulated::<()>::hang();
        let gate = AdInitializationGate::new(Arc::new(sdk));

        let result = gate.initialize(Duration::from_secs(3)).await;
        assert_eq!(result, Err(ProviderError::Timeout));
        assert!(!gate.is_initialized().await);
    }
}
