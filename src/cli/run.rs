//! Handler for the `run` command.

use anyhow::Context;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::application::consent::ConsentResult;
use crate::cli::{load_config, Cli, RunArgs};
use crate::domain::startup::StartupResult;
use crate::infrastructure::bootstrap::{build_orchestrator, build_simulated_providers};

/// Outcome of the optional deferred consent flow.
#[derive(Debug, Serialize)]
pub struct DeferredReport {
    pub consent: ConsentResult,
    pub ads_ready: bool,
}

#[derive(Serialize)]
struct RunReport<'a> {
    startup: &'a StartupResult,
    deferred: Option<&'a DeferredReport>,
}

/// Execute the run command.
pub async fn execute(cli: &Cli, args: &RunArgs) -> anyhow::Result<()> {
    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    config.init_logging();

    let mode = args.mode.unwrap_or(config.startup.mode);
    let providers = build_simulated_providers(&config.simulation);
    let orchestrator = build_orchestrator(&config, providers)?;

    let mut phases = orchestrator.subscribe();
    let watcher = tokio::spawn(async move {
        while phases.changed().await.is_ok() {
            let phase = *phases.borrow_and_update();
            debug!(phase = %phase, "Startup phase changed");
        }
    });

    info!(mode = %mode, "Launching");
    let result = orchestrator.execute(mode).await;

    let deferred = if args.request_consent {
        match orchestrator.consent_manager(&result) {
            Some(manager) => {
                let consent = manager.request_consent().await;
                let ads_ready = manager.initialize_ads().await?;
                Some(DeferredReport { consent, ads_ready })
            }
            None => {
                warn!("Consent was resolved during launch, ignoring --request-consent");
                None
            }
        }
    } else {
        None
    };
    watcher.abort();

    if args.json {
        let report = RunReport {
            startup: &result,
            deferred: deferred.as_ref(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&result, deferred.as_ref());
    }
    Ok(())
}

fn print_summary(result: &StartupResult, deferred: Option<&DeferredReport>) {
    println!("Startup {} ({}ms)", result.execution_id, result.elapsed_ms);
    println!("  mode:            {}", result.mode);
    println!(
        "  location:        {} (eu: {})",
        result.location.region, result.location.is_eu
    );
    println!(
        "  configuration:   att {}ms, cmp {}ms, ads {}ms, ads enabled {}",
        result.configuration.att_timeout.as_millis(),
        result.configuration.cmp_timeout.as_millis(),
        result.configuration.ad_load_timeout.as_millis(),
        result.configuration.ads_enabled
    );
    println!("  tracking:        {}", result.att_status);
    if let Some(consent) = result.consent_status {
        println!("  consent:         {consent}");
    }
    println!("  ads ready:       {}", result.ads_ready);
    println!("  consent pending: {}", result.consent_pending);
    for error in &result.errors {
        println!("  degraded:        {} -> {}", error, error.fallback());
    }

    if let Some(report) = deferred {
        println!("Deferred consent");
        println!("  tracking:        {}", report.consent.att_status);
        if let Some(consent) = report.consent.consent_status {
            println!("  consent:         {consent}");
        }
        println!("  ads ready:       {}", report.ads_ready);
        for error in &report.consent.errors {
            println!("  degraded:        {} -> {}", error, error.fallback());
        }
    }
}
