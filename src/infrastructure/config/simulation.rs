//! Simulated collaborator settings for the CLI.
//!
//! Each collaborator gets a table under `[simulation]` with a latency, an
//! outcome, and the value it returns on success:
//!
//! ```toml
//! [simulation.location]
//! latency_ms = 120
//! region = "DE"
//! is_eu = true
//!
//! [simulation.remote_config]
//! outcome = "hang"
//!
//! [simulation.consent]
//! status = "required"
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::adapter::simulated::{Behavior, Simulated};
use crate::domain::config::RemoteConfiguration;
use crate::domain::location::Location;
use crate::domain::privacy::{ConsentStatus, TrackingStatus};
use crate::error::ProviderError;

/// How a simulated collaborator resolves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulatedOutcome {
    #[default]
    Success,
    Fail,
    /// Fail with a permission denial.
    Deny,
    Hang,
}

impl SimulatedOutcome {
    fn behavior<T>(self, value: T) -> Behavior<T> {
        match self {
            Self::Success => Behavior::Succeed(value),
            Self::Fail => Behavior::Fail(ProviderError::Failed("simulated failure".into())),
            Self::Deny => Behavior::Fail(ProviderError::PermissionDenied),
            Self::Hang => Behavior::Hang,
        }
    }
}

/// `[simulation]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub location: LocationSimulation,
    #[serde(default)]
    pub remote_config: RemoteConfigSimulation,
    #[serde(default)]
    pub tracking: TrackingSimulation,
    #[serde(default)]
    pub consent: ConsentSimulation,
    #[serde(default)]
    pub ads: AdsSimulation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationSimulation {
    #[serde(default)]
    pub latency_ms: u64,
    #[serde(default)]
    pub outcome: SimulatedOutcome,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub is_eu: bool,
}

fn default_region() -> String {
    "US".into()
}

impl Default for LocationSimulation {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            outcome: SimulatedOutcome::default(),
            region: default_region(),
            is_eu: false,
        }
    }
}

impl LocationSimulation {
    pub fn build(&self) -> Simulated<Location> {
        let location = Location::new(self.region.clone(), self.is_eu);
        Simulated::new(self.outcome.behavior(location))
            .with_latency(Duration::from_millis(self.latency_ms))
    }
}

/// The remote document's own fields (`att_timeout_ms`, ...) sit alongside
/// `latency_ms` and `outcome`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteConfigSimulation {
    #[serde(default)]
    pub latency_ms: u64,
    #[serde(default)]
    pub outcome: SimulatedOutcome,
    #[serde(flatten)]
    pub document: RemoteConfiguration,
}

impl RemoteConfigSimulation {
    pub fn build(&self) -> Simulated<RemoteConfiguration> {
        Simulated::new(self.outcome.behavior(self.document))
            .with_latency(Duration::from_millis(self.latency_ms))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackingSimulation {
    #[serde(default)]
    pub latency_ms: u64,
    #[serde(default)]
    pub outcome: SimulatedOutcome,
    #[serde(default = "default_tracking_status")]
    pub status: TrackingStatus,
}

const fn default_tracking_status() -> TrackingStatus {
    TrackingStatus::Authorized
}

impl Default for TrackingSimulation {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            outcome: SimulatedOutcome::default(),
            status: default_tracking_status(),
        }
    }
}

impl TrackingSimulation {
    pub fn build(&self) -> Simulated<TrackingStatus> {
        Simulated::new(self.outcome.behavior(self.status))
            .with_latency(Duration::from_millis(self.latency_ms))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConsentSimulation {
    #[serde(default)]
    pub latency_ms: u64,
    #[serde(default)]
    pub outcome: SimulatedOutcome,
    #[serde(default = "default_consent_status")]
    pub status: ConsentStatus,
}

const fn default_consent_status() -> ConsentStatus {
    ConsentStatus::Obtained
}

impl Default for ConsentSimulation {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            outcome: SimulatedOutcome::default(),
            status: default_consent_status(),
        }
    }
}

impl ConsentSimulation {
    pub fn build(&self) -> Simulated<ConsentStatus> {
        Simulated::new(self.outcome.behavior(self.status))
            .with_latency(Duration::from_millis(self.latency_ms))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdsSimulation {
    #[serde(default)]
    pub latency_ms: u64,
    #[serde(default)]
    pub outcome: SimulatedOutcome,
}

impl AdsSimulation {
    pub fn build(&self) -> Simulated<()> {
        Simulated::new(self.outcome.behavior(()))
            .with_latency(Duration::from_millis(self.latency_ms))
    }
}
