//! Deferred privacy flow for lazy launches.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::ads::AdInitializationGate;
use super::step::run_step;
use crate::domain::config::AppConfiguration;
use crate::domain::fallback::StartupError;
use crate::domain::location::Location;
use crate::domain::privacy::{ConsentStatus, TrackingStatus};
use crate::domain::startup::StartupStep;
use crate::error::{Error, Result};
use crate::port::outbound::{ConsentProvider, TrackingAuthorizationProvider};

/// Combined outcome of the deferred tracking and consent prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsentResult {
    pub att_status: TrackingStatus,
    /// `None` when the consent flow was not needed or failed.
    pub consent_status: Option<ConsentStatus>,
    /// Whether [`ConsentManager::initialize_ads`] may start the SDK.
    pub ads_permitted: bool,
    pub errors: Vec<StartupError>,
}

/// On-demand entry point for tracking, consent, and ads after a lazy launch.
///
/// Created by
/// [`StartupOrchestrator::consent_manager`](super::orchestrator::StartupOrchestrator::consent_manager),
/// and shares its ad gate so the SDK is never initialized twice.
pub struct ConsentManager {
    configuration: AppConfiguration,
    location: Location,
    tracking: Arc<dyn TrackingAuthorizationProvider>,
    consent: Arc<dyn ConsentProvider>,
    ads: Arc<AdInitializationGate>,
    resolved: Mutex<Option<ConsentResult>>,
}

impl ConsentManager {
    pub fn new(
        configuration: AppConfiguration,
        location: Location,
        tracking: Arc<dyn TrackingAuthorizationProvider>,
        consent: Arc<dyn ConsentProvider>,
        ads: Arc<AdInitializationGate>,
    ) -> Self {
        Self {
            configuration,
            location,
            tracking,
            consent,
            ads,
            resolved: Mutex::new(None),
        }
    }

    /// Request tracking permission, then consent when the user is
    /// EU-flagged. Never fails; each step degrades like it does at launch.
    ///
    /// Concurrent calls are serialized and the latest outcome is kept.
    pub async fn request_consent(&self) -> ConsentResult {
        let mut resolved = self.resolved.lock().await;
        let mut errors = Vec::new();

        let att_limit = self.configuration.att_timeout;
        let att_status = match run_step(
            StartupStep::Tracking,
            att_limit,
            self.tracking.request(att_limit),
        )
        .await
        {
            Ok(status) => status,
            Err(error) => {
                errors.push(error);
                TrackingStatus::NotDetermined
            }
        };

        let (consent_status, consent_permits_ads) = if self.location.is_eu {
            let cmp_limit = self.configuration.cmp_timeout;
            match run_step(
                StartupStep::Consent,
                cmp_limit,
                self.consent.request(cmp_limit),
            )
            .await
            {
                Ok(status) => (Some(status), status.permits_ads()),
                Err(error) => {
                    errors.push(error);
                    (None, false)
                }
            }
        } else {
            debug!(region = %self.location.region, "Consent flow not required for this region");
            (None, true)
        };

        let result = ConsentResult {
            att_status,
            consent_status,
            ads_permitted: self.configuration.ads_enabled && consent_permits_ads,
            errors,
        };
        info!(
            att_status = %result.att_status,
            ads_permitted = result.ads_permitted,
            "Deferred consent resolved"
        );

        *resolved = Some(result.clone());
        result
    }

    /// Outcome of the latest [`request_consent`](Self::request_consent).
    pub async fn consent_result(&self) -> Option<ConsentResult> {
        self.resolved.lock().await.clone()
    }

    /// Start the ad SDK if consent allows it.
    ///
    /// Returns `Ok(false)` when ads are not permitted or initialization
    /// failed; in the latter case a later call may retry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConsentUnresolved`] if consent was never requested.
    pub async fn initialize_ads(&self) -> Result<bool> {
        let permitted = match self.resolved.lock().await.as_ref() {
            Some(result) => result.ads_permitted,
            None => return Err(Error::ConsentUnresolved),
        };
        if !permitted {
            debug!("Ads not permitted, skipping SDK initialization");
            return Ok(false);
        }

        let limit = self.configuration.ad_load_timeout;
        match self.ads.initialize(limit).await {
            Ok(()) => Ok(true),
            Err(failure) => {
                let error = StartupError::AdsInitFailed;
                warn!(
                    step = %error.step(),
                    error = %error,
                    cause = %failure,
                    fallback = %error.fallback(),
                    "Deferred ad initialization degraded"
                );
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::simulated::Simulated;
    use crate::error::ProviderError;
    use crate::testkit::config;

    fn manager(
        location: Location,
        tracking: &Simulated<TrackingStatus>,
        consent: &Simulated<ConsentStatus>,
        ads: &Simulated<()>,
    ) -> ConsentManager {
        ConsentManager::new(
            AppConfiguration::from(config::local_defaults()),
            location,
            Arc::new(tracking.clone()),
            Arc::new(consent.clone()),
            Arc::new(AdInitializationGate::new(Arc::new(ads.clone()))),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn initialize_before_request_is_rejected() {
        let ads = Simulated::succeed(());
        let manager = manager(
            config::eu_location(),
            &Simulated::succeed(TrackingStatus::Authorized),
            &Simulated::succeed(ConsentStatus::Obtained),
            &ads,
        );

        assert!(matches!(
            manager.initialize_ads().await,
            Err(Error::ConsentUnresolved)
        ));
        assert_eq!(ads.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn eu_user_with_consent_gets_ads() {
        let consent = Simulated::succeed(ConsentStatus::Obtained);
        let ads = Simulated::succeed(());
        let manager = manager(
            config::eu_location(),
            &Simulated::succeed(TrackingStatus::Authorized),
            &consent,
            &ads,
        );

        let result = manager.request_consent().await;
        assert_eq!(result.att_status, TrackingStatus::Authorized);
        assert_eq!(result.consent_status, Some(ConsentStatus::Obtained));
        assert!(result.ads_permitted);

        assert!(manager.initialize_ads().await.expect("resolved"));
        assert!(manager.initialize_ads().await.expect("resolved"));
        assert_eq!(consent.calls(), 1);
        assert_eq!(ads.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_consent_disables_ads_for_eu_user() {
        let ads = Simulated::succeed(());
        let manager = manager(
            config::eu_location(),
            &Simulated::succeed(TrackingStatus::Denied),
            &Simulated::fail(ProviderError::Failed("form load".into())),
            &ads,
        );

        let result = manager.request_consent().await;
        assert_eq!(result.errors, vec![StartupError::CmpFailed]);
        assert!(!result.ads_permitted);
        assert!(!manager.initialize_ads().await.expect("resolved"));
        assert_eq!(ads.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn non_eu_user_skips_consent_flow() {
        let consent = Simulated::fail(ProviderError::Timeout);
        let manager = manager(
            config::us_location(),
            &Simulated::hang(),
            &consent,
            &Simulated::succeed(()),
        );

        let result = manager.request_consent().await;
        assert_eq!(result.att_status, TrackingStatus::NotDetermined);
        assert_eq!(result.errors, vec![StartupError::AttNotAvailable]);
        assert_eq!(result.consent_status, None);
        assert!(result.ads_permitted);
        assert_eq!(consent.calls(), 0);
        assert_eq!(manager.consent_result().await, Some(result));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_sdk_reports_not_ready() {
        let manager = manager(
            config::us_location(),
            &Simulated::succeed(TrackingStatus::Authorized),
            &Simulated::succeed(ConsentStatus::NotRequired),
            &Simulated::hang(),
        );

        manager.request_consent().await;
        assert!(!manager.initialize_ads().await.expect("resolved"));
    }
}
