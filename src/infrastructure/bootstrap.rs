//! Composition root: wires configuration and collaborators into an
//! orchestrator.

use std::sync::Arc;

use tracing::info;

use crate::application::orchestrator::{StartupOrchestrator, StartupProviders};
use crate::domain::config::{BootstrapConfiguration, LocalDefaults};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::simulation::SimulationConfig;

/// Build simulated collaborators from the `[simulation]` table.
pub fn build_simulated_providers(simulation: &SimulationConfig) -> StartupProviders {
    StartupProviders {
        location: Arc::new(simulation.location.build()),
        remote_config: Arc::new(simulation.remote_config.build()),
        tracking: Arc::new(simulation.tracking.build()),
        consent: Arc::new(simulation.consent.build()),
        ads: Arc::new(simulation.ads.build()),
    }
}

/// Build an orchestrator with the compiled-in bootstrap bounds and local
/// defaults.
#[allow(clippy::result_large_err)]
pub fn build_orchestrator(
    config: &Config,
    providers: StartupProviders,
) -> Result<StartupOrchestrator> {
    let bootstrap = BootstrapConfiguration::STANDARD;
    let local = LocalDefaults::STANDARD;
    let orchestrator =
        StartupOrchestrator::new(bootstrap, local, providers)?.with_options(config.startup.options());

    info!(
        location_timeout_ms = bootstrap.location_timeout().as_millis() as u64,
        remote_config_timeout_ms = bootstrap.remote_config_timeout().as_millis() as u64,
        geo_targeting = config.startup.geo_targeting,
        "Startup orchestrator ready"
    );
    Ok(orchestrator)
}
