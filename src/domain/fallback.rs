//! Per-step failure kinds and the fallback each one maps to.
//!
//! The mapping is a static table: every [`StartupError`] resolves to exactly
//! one [`FallbackAction`], and no action blocks the launch.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::startup::StartupStep;
use crate::error::ProviderError;

/// A startup step failed or ran out of time.
///
/// Informational only; the pipeline has already substituted the fallback
/// by the time one of these is observed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupError {
    #[error("location lookup timed out or failed")]
    LocationTimeout,

    #[error("location permission denied")]
    LocationPermissionDenied,

    #[error("remote configuration fetch timed out")]
    RemoteConfigTimeout,

    #[error("remote configuration fetch failed")]
    RemoteConfigFetchFailed,

    #[error("remote configuration produced invalid values")]
    RemoteConfigInvalid,

    #[error("tracking authorization not available")]
    AttNotAvailable,

    #[error("consent flow failed")]
    CmpFailed,

    #[error("ad network initialization failed")]
    AdsInitFailed,
}

impl StartupError {
    pub const ALL: [Self; 8] = [
        Self::LocationTimeout,
        Self::LocationPermissionDenied,
        Self::RemoteConfigTimeout,
        Self::RemoteConfigFetchFailed,
        Self::RemoteConfigInvalid,
        Self::AttNotAvailable,
        Self::CmpFailed,
        Self::AdsInitFailed,
    ];

    /// The substitute applied when this error occurs.
    #[must_use]
    pub const fn fallback(self) -> FallbackAction {
        match self {
            Self::LocationTimeout | Self::LocationPermissionDenied => {
                FallbackAction::UseDefaultRegion
            }
            Self::RemoteConfigTimeout
            | Self::RemoteConfigFetchFailed
            | Self::RemoteConfigInvalid => FallbackAction::UseLocalDefaults,
            Self::AttNotAvailable => FallbackAction::TrackingNotDetermined,
            Self::CmpFailed => FallbackAction::DisableAdsForEuUser,
            Self::AdsInitFailed => FallbackAction::AdsNotReady,
        }
    }

    #[must_use]
    pub const fn step(self) -> StartupStep {
        match self {
            Self::LocationTimeout | Self::LocationPermissionDenied => StartupStep::Location,
            Self::RemoteConfigTimeout
            | Self::RemoteConfigFetchFailed
            | Self::RemoteConfigInvalid => StartupStep::RemoteConfig,
            Self::AttNotAvailable => StartupStep::Tracking,
            Self::CmpFailed => StartupStep::Consent,
            Self::AdsInitFailed => StartupStep::Ads,
        }
    }

    /// Classify a collaborator failure for `step`.
    ///
    /// Only the location and remote-config steps distinguish failure kinds;
    /// the later steps have a single error each.
    #[must_use]
    pub fn classify(step: StartupStep, failure: &ProviderError) -> Self {
        match step {
            StartupStep::Location => match failure {
                ProviderError::PermissionDenied => Self::LocationPermissionDenied,
                _ => Self::LocationTimeout,
            },
            StartupStep::RemoteConfig => match failure {
                ProviderError::Timeout => Self::RemoteConfigTimeout,
                _ => Self::RemoteConfigFetchFailed,
            },
            StartupStep::Tracking => Self::AttNotAvailable,
            StartupStep::Consent => Self::CmpFailed,
            StartupStep::Ads => Self::AdsInitFailed,
        }
    }
}

/// Deterministic substitute for a failed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackAction {
    UseDefaultRegion,
    UseLocalDefaults,
    TrackingNotDetermined,
    DisableAdsForEuUser,
    AdsNotReady,
}

impl FallbackAction {
    /// No fallback ever holds up the launch.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        false
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UseDefaultRegion => "default region",
            Self::UseLocalDefaults => "local defaults",
            Self::TrackingNotDetermined => "tracking not determined",
            Self::DisableAdsForEuUser => "disable ads for EU-flagged user",
            Self::AdsNotReady => "ads not ready",
        }
    }
}

impl fmt::Display for FallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_table_is_exhaustive() {
        let expected = [
            (StartupError::LocationTimeout, FallbackAction::UseDefaultRegion),
            (
                StartupError::LocationPermissionDenied,
                FallbackAction::UseDefaultRegion,
            ),
            (StartupError::RemoteConfigTimeout, FallbackAction::UseLocalDefaults),
            (
                StartupError::RemoteConfigFetchFailed,
                FallbackAction::UseLocalDefaults,
            ),
            (StartupError::RemoteConfigInvalid, FallbackAction::UseLocalDefaults),
            (
                StartupError::AttNotAvailable,
                FallbackAction::TrackingNotDetermined,
            ),
            (StartupError::CmpFailed, FallbackAction::DisableAdsForEuUser),
            (StartupError::AdsInitFailed, FallbackAction::AdsNotReady),
        ];

        assert_eq!(expected.len(), StartupError::ALL.len());
        for (error, action) in expected {
            assert_eq!(error.fallback(), action, "fallback for {error:?}");
        }
    }

    #[test]
    fn no_fallback_blocks() {
        for error in StartupError::ALL {
            assert!(!error.fallback().is_blocking());
        }
    }

    #[test]
    fn every_step_has_at_least_one_error_kind() {
        for step in StartupStep::ALL {
            assert!(
                StartupError::ALL.iter().any(|e| e.step() == step),
                "no error kind for {step}"
            );
        }
    }

    #[test]
    fn classify_distinguishes_location_denial() {
        assert_eq!(
            StartupError::classify(StartupStep::Location, &ProviderError::PermissionDenied),
            StartupError::LocationPermissionDenied
        );
        assert_eq!(
            StartupError::classify(StartupStep::Location, &ProviderError::Timeout),
            StartupError::LocationTimeout
        );
        assert_eq!(
            StartupError::classify(
                StartupStep::Location,
                &ProviderError::Unavailable("gps off".into())
            ),
            StartupError::LocationTimeout
        );
    }

    #[test]
    fn classify_distinguishes_remote_timeout() {
        assert_eq!(
            StartupError::classify(StartupStep::RemoteConfig, &ProviderError::Timeout),
            StartupError::RemoteConfigTimeout
        );
        assert_eq!(
            StartupError::classify(
                StartupStep::RemoteConfig,
                &ProviderError::Failed("500".into())
            ),
            StartupError::RemoteConfigFetchFailed
        );
    }

    #[test]
    fn classify_maps_later_steps_to_single_kind() {
        let failure = ProviderError::Timeout;
        assert_eq!(
            StartupError::classify(StartupStep::Tracking, &failure),
            StartupError::AttNotAvailable
        );
        assert_eq!(
            StartupError::classify(StartupStep::Consent, &failure),
            StartupError::CmpFailed
        );
        assert_eq!(
            StartupError::classify(StartupStep::Ads, &failure),
            StartupError::AdsInitFailed
        );
        for step in StartupStep::ALL {
            assert_eq!(StartupError::classify(step, &failure).step(), step);
        }
    }
}
