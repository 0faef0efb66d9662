//! Observable progress of a launch.

use std::fmt;

use serde::Serialize;

use super::startup::StartupStep;

/// Where a launch currently is.
///
/// Phases only move forward within one execution. [`StartupPhase::Failed`]
/// marks the step that just degraded and is followed by the next step's phase;
/// [`StartupPhase::Completed`] is the only terminal phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartupPhase {
    #[default]
    Idle,
    GettingLocation,
    FetchingConfig,
    RequestingAtt,
    RequestingCmp,
    InitializingAds,
    Completed,
    Failed(StartupStep),
}

impl StartupPhase {
    /// Phase published while `step` is running.
    #[must_use]
    pub const fn for_step(step: StartupStep) -> Self {
        match step {
            StartupStep::Location => Self::GettingLocation,
            StartupStep::RemoteConfig => Self::FetchingConfig,
            StartupStep::Tracking => Self::RequestingAtt,
            StartupStep::Consent => Self::RequestingCmp,
            StartupStep::Ads => Self::InitializingAds,
        }
    }

    /// Position in the pipeline. A failure marker shares its step's rank.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::GettingLocation => 1,
            Self::FetchingConfig => 2,
            Self::RequestingAtt => 3,
            Self::RequestingCmp => 4,
            Self::InitializingAds => 5,
            Self::Completed => 6,
            Self::Failed(step) => Self::for_step(step).rank(),
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Whether moving from `self` to `next` keeps the phase monotonic.
    #[must_use]
    pub fn can_advance_to(self, next: Self) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            Self::Failed(step) => self == Self::for_step(step),
            _ => next.rank() > self.rank(),
        }
    }
}

impl fmt::Display for StartupPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::GettingLocation => f.write_str("getting_location"),
            Self::FetchingConfig => f.write_str("fetching_config"),
            Self::RequestingAtt => f.write_str("requesting_att"),
            Self::RequestingCmp => f.write_str("requesting_cmp"),
            Self::InitializingAds => f.write_str("initializing_ads"),
            Self::Completed => f.write_str("completed"),
            Self::Failed(step) => write!(f, "failed({step})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_immediate_sequence_is_monotonic() {
        let sequence = [
            StartupPhase::Idle,
            StartupPhase::GettingLocation,
            StartupPhase::FetchingConfig,
            StartupPhase::RequestingAtt,
            StartupPhase::RequestingCmp,
            StartupPhase::InitializingAds,
            StartupPhase::Completed,
        ];
        for pair in sequence.windows(2) {
            assert!(pair[0].can_advance_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn skipping_deferred_steps_is_allowed() {
        assert!(StartupPhase::FetchingConfig.can_advance_to(StartupPhase::Completed));
        assert!(StartupPhase::RequestingAtt.can_advance_to(StartupPhase::InitializingAds));
    }

    #[test]
    fn backward_transitions_are_rejected() {
        assert!(!StartupPhase::FetchingConfig.can_advance_to(StartupPhase::GettingLocation));
        assert!(!StartupPhase::RequestingCmp.can_advance_to(StartupPhase::RequestingCmp));
        assert!(!StartupPhase::Completed.can_advance_to(StartupPhase::Idle));
    }

    #[test]
    fn failure_marker_follows_only_its_own_step() {
        let failed = StartupPhase::Failed(StartupStep::Location);
        assert!(StartupPhase::GettingLocation.can_advance_to(failed));
        assert!(!StartupPhase::FetchingConfig.can_advance_to(failed));
        assert!(!failed.can_advance_to(failed));
        assert!(failed.can_advance_to(StartupPhase::FetchingConfig));
        assert!(!failed.is_terminal());
    }

    #[test]
    fn completed_is_terminal() {
        assert!(StartupPhase::Completed.is_terminal());
        assert!(!StartupPhase::Completed
            .can_advance_to(StartupPhase::Failed(StartupStep::Ads)));
    }
}
