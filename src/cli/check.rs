//! Handler for the `check` command.

use anyhow::Context;

use crate::cli::{load_config, Cli};
use crate::domain::config::{BootstrapConfiguration, LocalDefaults};

/// Validate the configuration and print what a launch would use.
pub fn execute(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref()).context("configuration is invalid")?;
    let bootstrap = BootstrapConfiguration::STANDARD;
    let local = LocalDefaults::STANDARD;

    println!("Configuration OK");
    println!("  mode:              {}", config.startup.mode);
    println!("  geo targeting:     {}", config.startup.geo_targeting);
    println!(
        "  bootstrap bounds:  location {}ms, remote config {}ms",
        bootstrap.location_timeout().as_millis(),
        bootstrap.remote_config_timeout().as_millis()
    );
    println!(
        "  local defaults:    att {}ms, cmp {}ms, ads {}ms, ads enabled {}",
        local.att_timeout.as_millis(),
        local.cmp_timeout.as_millis(),
        local.ad_load_timeout.as_millis(),
        local.ads_enabled
    );
    println!(
        "  simulated region:  {} (eu: {})",
        config.simulation.location.region, config.simulation.location.is_eu
    );
    Ok(())
}
