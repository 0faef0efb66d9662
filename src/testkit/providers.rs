//! Fake collaborator sets.

use std::sync::Arc;

use crate::adapter::simulated::Simulated;
use crate::application::orchestrator::StartupProviders;
use crate::domain::config::RemoteConfiguration;
use crate::domain::location::Location;
use crate::domain::privacy::{ConsentStatus, TrackingStatus};

/// One simulated collaborator per port.
///
/// Fields stay accessible so tests can assert call counts after handing
/// [`providers`](Self::providers) to an orchestrator.
#[derive(Debug, Clone)]
pub struct FakeProviders {
    pub location: Simulated<Location>,
    pub remote_config: Simulated<RemoteConfiguration>,
    pub tracking: Simulated<TrackingStatus>,
    pub consent: Simulated<ConsentStatus>,
    pub ads: Simulated<()>,
}

impl FakeProviders {
    /// Every collaborator succeeds immediately; the remote document is empty.
    pub fn succeeding(location: Location) -> Self {
        Self {
            location: Simulated::succeed(location),
            remote_config: Simulated::succeed(RemoteConfiguration::default()),
            tracking: Simulated::succeed(TrackingStatus::Authorized),
            consent: Simulated::succeed(ConsentStatus::Obtained),
            ads: Simulated::succeed(()),
        }
    }

    /// Every collaborator hangs until its bound elapses.
    pub fn hanging() -> Self {
        Self {
            location: Simulated::hang(),
            remote_config: Simulated::hang(),
            tracking: Simulated::hang(),
            consent: Simulated::hang(),
            ads: Simulated::hang(),
        }
    }

    #[must_use]
    pub fn with_location(mut self, location: Simulated<Location>) -> Self {
        self.location = location;
        self
    }

    #[must_use]
    pub fn with_remote_config(mut self, remote_config: Simulated<RemoteConfiguration>) -> Self {
        self.remote_config = remote_config;
        self
    }

    #[must_use]
    pub fn with_tracking(mut self, tracking: Simulated<TrackingStatus>) -> Self {
        self.tracking = tracking;
        self
    }

    #[must_use]
    pub fn with_consent(mut self, consent: Simulated<ConsentStatus>) -> Self {
        self.consent = consent;
        self
    }

    #[must_use]
    pub fn with_ads(mut self, ads: Simulated<()>) -> Self {
        self.ads = ads;
        self
    }

    /// Calls made to the tracking, consent, and ads collaborators combined.
    pub fn privacy_calls(&self) -> u32 {
        self.tracking.calls() + self.consent.calls() + self.ads.calls()
    }

    pub fn providers(&self) -> StartupProviders {
        StartupProviders {
            location: Arc::new(self.location.clone()),
            remote_config: Arc::new(self.remote_config.clone()),
            tracking: Arc::new(self.tracking.clone()),
            consent: Arc::new(self.consent.clone()),
            ads: Arc::new(self.ads.clone()),
        }
    }
}
