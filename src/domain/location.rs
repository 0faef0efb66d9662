//! Coarse device location as far as startup cares about it.

use serde::{Deserialize, Serialize};

/// Region code used when the real region could not be determined.
pub const UNKNOWN_REGION: &str = "ZZ";

/// Resolved location of the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// ISO 3166-1 alpha-2 region code.
    pub region: String,
    /// Whether the user falls under EU consent rules.
    pub is_eu: bool,
}

impl Location {
    pub fn new(region: impl Into<String>, is_eu: bool) -> Self {
        Self {
            region: region.into(),
            is_eu,
        }
    }

    /// Default region substituted when the lookup fails.
    ///
    /// The jurisdiction is unknown, so consent rules are assumed to apply.
    #[must_use]
    pub fn fallback() -> Self {
        Self::new(UNKNOWN_REGION, true)
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.region == UNKNOWN_REGION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_region_requires_consent() {
        let location = Location::fallback();
        assert!(location.is_eu);
        assert!(location.is_fallback());
        assert!(!Location::new("US", false).is_fallback());
    }
}
