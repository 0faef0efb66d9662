//! Canonical test configurations.
//!
//! Single source of truth for the configuration values used across tests,
//! matching the compiled-in standard values.

use std::time::Duration;

use crate::application::orchestrator::StartupOrchestrator;
use crate::domain::config::{BootstrapConfiguration, LocalDefaults};
use crate::domain::location::Location;

use super::providers::FakeProviders;

/// Bootstrap bounds: 5s location, 10s remote config.
pub fn bootstrap() -> BootstrapConfiguration {
    BootstrapConfiguration::new(Duration::from_secs(5), Duration::from_secs(10))
}

/// Local defaults: 30s ATT, 20s CMP, 15s ads, ads enabled.
pub fn local_defaults() -> LocalDefaults {
    LocalDefaults {
        att_timeout: Duration::from_secs(30),
        cmp_timeout: Duration::from_secs(20),
        ad_load_timeout: Duration::from_secs(15),
        ads_enabled: true,
    }
}

pub fn eu_location() -> Location {
    Location::new("DE", true)
}

pub fn us_location() -> Location {
    Location::new("US", false)
}

/// Orchestrator over `fakes` with the canonical configuration.
pub fn orchestrator(fakes: &FakeProviders) -> StartupOrchestrator {
    StartupOrchestrator::new(bootstrap(), local_defaults(), fakes.providers())
        .expect("canonical test configuration is valid")
}
