//! Tracking-authorization and consent-management ports.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::privacy::{ConsentStatus, TrackingStatus};
use crate::error::ProviderError;

/// Platform tracking-authorization prompt (ATT).
#[async_trait]
pub trait TrackingAuthorizationProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Show the prompt if needed and return the resulting status.
    async fn request(&self, timeout: Duration) -> Result<TrackingStatus, ProviderError>;
}

/// Consent-management platform (CMP).
#[async_trait]
pub trait ConsentProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Run the consent flow and return the resolved status.
    async fn request(&self, timeout: Duration) -> Result<ConsentStatus, ProviderError>;
}
