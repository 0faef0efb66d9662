//! Remote config collaborator that records the targeting it was given.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use liftoff::domain::{Location, RemoteConfiguration};
use liftoff::error::ProviderError;
use liftoff::port::RemoteConfigProvider;

/// Returns an empty document on every fetch.
#[derive(Clone, Default)]
pub struct RecordingRemoteConfig {
    targeting: Arc<Mutex<Vec<Option<Location>>>>,
}

impl RecordingRemoteConfig {
    /// Targeting passed to each fetch, in call order.
    pub fn targeting(&self) -> Vec<Option<Location>> {
        self.targeting.lock().clone()
    }
}

#[async_trait]
impl RemoteConfigProvider for RecordingRemoteConfig {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn fetch(
        &self,
        _timeout: Duration,
        targeting: Option<&Location>,
    ) -> Result<RemoteConfiguration, ProviderError> {
        self.targeting.lock().push(targeting.cloned());
        Ok(RemoteConfiguration::default())
    }
}
