//! Location lookup port.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::location::Location;
use crate::error::ProviderError;

/// Source of the device's coarse location.
///
/// `timeout` is the bound the caller will wait; implementations may use it to
/// cancel their own underlying request early.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Resolve the current location.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::PermissionDenied`] when the user refused
    /// location access, or another variant when the lookup failed.
    async fn current(&self, timeout: Duration) -> Result<Location, ProviderError>;
}
