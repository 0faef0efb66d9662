//! Simulated collaborators with scripted latency and outcome.
//!
//! One generic [`Simulated`] type implements every outbound port for the
//! value that port returns. Clones share a call counter, so a test can hand
//! one clone to the orchestrator and assert on the other.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::config::RemoteConfiguration;
use crate::domain::location::Location;
use crate::domain::privacy::{ConsentStatus, TrackingStatus};
use crate::error::ProviderError;
use crate::port::outbound::{
    AdInitializer, ConsentProvider, LocationProvider, RemoteConfigProvider,
    TrackingAuthorizationProvider,
};

/// What a simulated collaborator does once its latency has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Behavior<T> {
    Succeed(T),
    Fail(ProviderError),
    /// Never resolve; only the caller's bound ends the wait.
    Hang,
}

#[derive(Debug, Clone)]
pub struct Simulated<T> {
    behavior: Behavior<T>,
    latency: Duration,
    calls: Arc<AtomicU32>,
}

impl<T> Simulated<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(behavior: Behavior<T>) -> Self {
        Self {
            behavior,
            latency: Duration::ZERO,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn succeed(value: T) -> Self {
        Self::new(Behavior::Succeed(value))
    }

    pub fn fail(error: ProviderError) -> Self {
        Self::new(Behavior::Fail(error))
    }

    pub fn hang() -> Self {
        Self::new(Behavior::Hang)
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn behavior(&self) -> &Behavior<T> {
        &self.behavior
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Number of times the collaborator was invoked, across all clones.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    async fn respond(&self) -> Result<T, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match &self.behavior {
            Behavior::Succeed(value) => Ok(value.clone()),
            Behavior::Fail(error) => Err(error.clone()),
            Behavior::Hang => std::future::pending().await,
        }
    }
}

#[async_trait]
impl LocationProvider for Simulated<Location> {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn current(&self, _timeout: Duration) -> Result<Location, ProviderError> {
        self.respond().await
    }
}

#[async_trait]
impl RemoteConfigProvider for Simulated<RemoteConfiguration> {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn fetch(
        &self,
        _timeout: Duration,
        _targeting: Option<&Location>,
    ) -> Result<RemoteConfiguration, ProviderError> {
        self.respond().await
    }
}

#[async_trait]
impl TrackingAuthorizationProvider for Simulated<TrackingStatus> {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn request(&self, _timeout: Duration) -> Result<TrackingStatus, ProviderError> {
        self.respond().await
    }
}

#[async_trait]
impl ConsentProvider for Simulated<ConsentStatus> {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn request(&self, _timeout: Duration) -> Result<ConsentStatus, ProviderError> {
        self.respond().await
    }
}

#[async_trait]
impl AdInitializer for Simulated<()> {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn initialize(&self, _timeout: Duration) -> Result<(), ProviderError> {
        self.respond().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn clones_share_call_counter() {
        let sim = Simulated::succeed(TrackingStatus::Authorized);
        let handle = sim.clone();

        let status = TrackingAuthorizationProvider::request(&sim, Duration::from_secs(1)).await;
        assert_eq!(status, Ok(TrackingStatus::Authorized));
        assert_eq!(handle.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_applied_before_responding() {
        let sim = Simulated::<Location>::fail(ProviderError::PermissionDenied)
            .with_latency(Duration::from_millis(800));
        let started = tokio::time::Instant::now();

        let result = LocationProvider::current(&sim, Duration::from_secs(5)).await;

        assert_eq!(result, Err(ProviderError::PermissionDenied));
        assert_eq!(started.elapsed(), Duration::from_millis(800));
    }
}
