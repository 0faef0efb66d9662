//! Remote configuration port.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::config::RemoteConfiguration;
use crate::domain::location::Location;
use crate::error::ProviderError;

/// Transport for the remote configuration document.
#[async_trait]
pub trait RemoteConfigProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch the current remote document.
    ///
    /// `targeting` carries the resolved location when geo-targeting is
    /// enabled; implementations must also work without it.
    async fn fetch(
        &self,
        timeout: Duration,
        targeting: Option<&Location>,
    ) -> Result<RemoteConfiguration, ProviderError>;
}
