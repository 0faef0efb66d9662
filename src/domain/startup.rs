//! Launch modes, pipeline steps, and the snapshot a launch produces.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::AppConfiguration;
use super::fallback::StartupError;
use super::location::Location;
use super::phase::StartupPhase;
use super::privacy::{ConsentStatus, TrackingStatus};

/// How the privacy and ad steps are scheduled for this launch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartupMode {
    /// Tracking, consent, and ad initialization run during launch.
    #[default]
    Immediate,
    /// Tracking, consent, and ad initialization are deferred to
    /// [`ConsentManager`](crate::application::consent::ConsentManager).
    Lazy,
}

impl fmt::Display for StartupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => f.write_str("immediate"),
            Self::Lazy => f.write_str("lazy"),
        }
    }
}

impl FromStr for StartupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "immediate" => Ok(Self::Immediate),
            "lazy" => Ok(Self::Lazy),
            other => Err(format!(
                "unknown startup mode '{other}' (expected 'immediate' or 'lazy')"
            )),
        }
    }
}

/// The five collaborator-backed steps of the launch pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupStep {
    Location,
    RemoteConfig,
    Tracking,
    Consent,
    Ads,
}

impl StartupStep {
    pub const ALL: [Self; 5] = [
        Self::Location,
        Self::RemoteConfig,
        Self::Tracking,
        Self::Consent,
        Self::Ads,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::RemoteConfig => "remote_config",
            Self::Tracking => "tracking",
            Self::Consent => "consent",
            Self::Ads => "ads",
        }
    }
}

impl fmt::Display for StartupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable outcome of one launch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StartupResult {
    pub execution_id: Uuid,
    pub mode: StartupMode,
    pub configuration: AppConfiguration,
    pub location: Location,
    pub att_status: TrackingStatus,
    /// Set only when the consent flow ran and resolved during launch.
    pub consent_status: Option<ConsentStatus>,
    pub ads_ready: bool,
    /// True when privacy and ad steps were deferred.
    pub consent_pending: bool,
    /// Every degradation in step order.
    pub errors: Vec<StartupError>,
    pub last_error: Option<StartupError>,
    /// Phases this execution published, in order.
    pub phases: Vec<StartupPhase>,
    pub completed_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl StartupResult {
    /// True when no step had to fall back.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn degraded(&self, step: StartupStep) -> bool {
        self.errors.iter().any(|error| error.step() == step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Lazy".parse::<StartupMode>(), Ok(StartupMode::Lazy));
        assert_eq!(
            " immediate ".parse::<StartupMode>(),
            Ok(StartupMode::Immediate)
        );
        assert!("eager".parse::<StartupMode>().is_err());
    }

    #[test]
    fn step_labels_are_stable() {
        let labels: Vec<_> = StartupStep::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            labels,
            ["location", "remote_config", "tracking", "consent", "ads"]
        );
    }
}
