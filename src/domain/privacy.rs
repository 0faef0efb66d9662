//! Tracking-authorization and consent statuses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of the tracking-authorization (ATT) prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingStatus {
    #[default]
    NotDetermined,
    Restricted,
    Denied,
    Authorized,
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotDetermined => "not_determined",
            Self::Restricted => "restricted",
            Self::Denied => "denied",
            Self::Authorized => "authorized",
        };
        f.write_str(label)
    }
}

/// Outcome of the consent-management (CMP) flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentStatus {
    #[default]
    Unknown,
    /// Consent is required but was not given.
    Required,
    NotRequired,
    Obtained,
}

impl ConsentStatus {
    /// Whether ads may be initialized under this status.
    #[must_use]
    pub const fn permits_ads(self) -> bool {
        matches!(self, Self::NotRequired | Self::Obtained)
    }
}

impl fmt::Display for ConsentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unknown => "unknown",
            Self::Required => "required",
            Self::NotRequired => "not_required",
            Self::Obtained => "obtained",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_resolved_consent_permits_ads() {
        assert!(ConsentStatus::Obtained.permits_ads());
        assert!(ConsentStatus::NotRequired.permits_ads());
        assert!(!ConsentStatus::Required.permits_ads());
        assert!(!ConsentStatus::Unknown.permits_ads());
    }

    #[test]
    fn statuses_serialize_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&TrackingStatus::NotDetermined).unwrap(),
            "\"not_determined\""
        );
        assert_eq!(
            serde_json::to_string(&ConsentStatus::NotRequired).unwrap(),
            "\"not_required\""
        );
    }
}
