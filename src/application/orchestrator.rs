//! Launch pipeline.
//!
//! [`StartupOrchestrator::execute`] runs the steps strictly in order:
//!
//! 1. location lookup, bounded by the bootstrap configuration
//! 2. remote configuration fetch, bounded by the bootstrap configuration
//! 3. merge of local defaults and the remote document
//! 4. tracking prompt, consent flow (EU only), ad SDK (immediate mode only),
//!    bounded by the merged configuration
//!
//! Every step that fails or runs out of time is replaced by its
//! [`FallbackAction`](crate::domain::fallback::FallbackAction), so an
//! execution always ends in [`StartupPhase::Completed`] with a
//! [`StartupResult`].

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::{watch, Mutex as AsyncMutex};
use tokio::time::Instant;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::ads::AdInitializationGate;
use super::consent::ConsentManager;
use super::phase::PhaseTracker;
use super::step::run_step;
use crate::domain::config::{
    AppConfiguration, BootstrapConfiguration, ConfigurationMerger, LocalDefaults,
    RemoteConfiguration,
};
use crate::domain::fallback::StartupError;
use crate::domain::location::Location;
use crate::domain::phase::StartupPhase;
use crate::domain::privacy::{ConsentStatus, TrackingStatus};
use crate::domain::startup::{StartupMode, StartupResult, StartupStep};
use crate::error::{ProviderError, Result};
use crate::port::outbound::{
    AdInitializer, ConsentProvider, LocationProvider, RemoteConfigProvider,
    TrackingAuthorizationProvider,
};

/// The external collaborators a launch needs.
#[derive(Clone)]
pub struct StartupProviders {
    pub location: Arc<dyn LocationProvider>,
    pub remote_config: Arc<dyn RemoteConfigProvider>,
    pub tracking: Arc<dyn TrackingAuthorizationProvider>,
    pub consent: Arc<dyn ConsentProvider>,
    pub ads: Arc<dyn AdInitializer>,
}

/// Tunables that change the pipeline's wiring rather than its timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupOptions {
    /// Pass the resolved location to the remote config fetch.
    pub geo_targeting: bool,
}

impl Default for StartupOptions {
    fn default() -> Self {
        Self {
            geo_targeting: true,
        }
    }
}

/// Drives one launch at a time.
///
/// An [`execute`](Self::execute) call that overlaps an execution in the same
/// mode joins it and receives its result. A call in the other mode waits for
/// the execution in flight and then runs its own.
pub struct StartupOrchestrator {
    bootstrap: BootstrapConfiguration,
    local: LocalDefaults,
    options: StartupOptions,
    location: Arc<dyn LocationProvider>,
    remote_config: Arc<dyn RemoteConfigProvider>,
    tracking: Arc<dyn TrackingAuthorizationProvider>,
    consent: Arc<dyn ConsentProvider>,
    ads: Arc<AdInitializationGate>,
    phase: PhaseTracker,
    run_lock: AsyncMutex<()>,
    completed_runs: AtomicU64,
    latest: Mutex<Option<StartupResult>>,
}

impl StartupOrchestrator {
    /// Build an orchestrator from explicit configuration values.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a bootstrap bound or local default
    /// timeout is zero. This is the only fatal misconfiguration; everything
    /// that goes wrong at launch degrades instead.
    #[allow(clippy::result_large_err)]
    pub fn new(
        bootstrap: BootstrapConfiguration,
        local: LocalDefaults,
        providers: StartupProviders,
    ) -> Result<Self> {
        bootstrap.validate()?;
        AppConfiguration::from(local).validate()?;

        Ok(Self {
            bootstrap,
            local,
            options: StartupOptions::default(),
            location: providers.location,
            remote_config: providers.remote_config,
            tracking: providers.tracking,
            consent: providers.consent,
            ads: Arc::new(AdInitializationGate::new(providers.ads)),
            phase: PhaseTracker::new(),
            run_lock: AsyncMutex::new(()),
            completed_runs: AtomicU64::new(0),
            latest: Mutex::new(None),
        })
    }

    #[must_use]
    pub fn with_options(mut self, options: StartupOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> StartupOptions {
        self.options
    }

    /// Observe phase changes, e.g. to drive a splash screen.
    pub fn subscribe(&self) -> watch::Receiver<StartupPhase> {
        self.phase.subscribe()
    }

    pub fn phase(&self) -> StartupPhase {
        self.phase.current()
    }

    /// Result of the most recent completed execution.
    pub fn latest_result(&self) -> Option<StartupResult> {
        self.latest.lock().clone()
    }

    /// The ad SDK gate, shared with every [`ConsentManager`] this creates.
    pub fn ad_gate(&self) -> Arc<AdInitializationGate> {
        Arc::clone(&self.ads)
    }

    /// Deferred consent entry point for a lazy launch.
    ///
    /// Returns `None` unless `result` left consent pending.
    pub fn consent_manager(&self, result: &StartupResult) -> Option<ConsentManager> {
        if !result.consent_pending {
            return None;
        }
        Some(ConsentManager::new(
            result.configuration,
            result.location.clone(),
            Arc::clone(&self.tracking),
            Arc::clone(&self.consent),
            Arc::clone(&self.ads),
        ))
    }

    /// Run the launch pipeline. Never fails.
    pub async fn execute(&self, mode: StartupMode) -> StartupResult {
        let completed_before = self.completed_runs.load(Ordering::SeqCst);
        let _guard = match self.run_lock.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                info!(mode = %mode, "Startup already in flight, joining it");
                let guard = self.run_lock.lock().await;
                if self.completed_runs.load(Ordering::SeqCst) > completed_before {
                    let joined = self.latest_result().filter(|latest| latest.mode == mode);
                    if let Some(result) = joined {
                        return result;
                    }
                }
                // The run we waited on was cancelled or launched in another mode.
                guard
            }
        };

        let execution_id = Uuid::new_v4();
        let span = info_span!("startup", %execution_id, %mode);
        let result = self.run(execution_id, mode).instrument(span).await;

        *self.latest.lock() = Some(result.clone());
        self.completed_runs.fetch_add(1, Ordering::SeqCst);
        result
    }

    async fn run(&self, execution_id: Uuid, mode: StartupMode) -> StartupResult {
        let started = Instant::now();
        self.phase.reset();
        let mut run = PipelineRun::new(&self.phase);
        info!("Startup pipeline started");

        let location = self.resolve_location(&mut run).await;
        let remote = self.fetch_remote(&mut run, &location).await;
        let configuration = self.resolve_configuration(&mut run, remote.as_ref());

        let outcome = match mode {
            StartupMode::Immediate => {
                self.run_privacy_steps(&mut run, &configuration, &location)
                    .await
            }
            StartupMode::Lazy => {
                info!("Deferring tracking, consent, and ads until requested");
                PrivacyOutcome::deferred()
            }
        };

        run.enter(StartupPhase::Completed);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        let PipelineRun { phases, errors, .. } = run;

        info!(
            region = %location.region,
            is_eu = location.is_eu,
            att_status = %outcome.att_status,
            ads_ready = outcome.ads_ready,
            consent_pending = outcome.consent_pending,
            degraded_steps = errors.len(),
            elapsed_ms,
            "Startup pipeline completed"
        );

        StartupResult {
            execution_id,
            mode,
            configuration,
            location,
            att_status: outcome.att_status,
            consent_status: outcome.consent_status,
            ads_ready: outcome.ads_ready,
            consent_pending: outcome.consent_pending,
            last_error: errors.last().copied(),
            errors,
            phases,
            completed_at: Utc::now(),
            elapsed_ms,
        }
    }

    async fn resolve_location(&self, run: &mut PipelineRun<'_>) -> Location {
        let limit = self.bootstrap.location_timeout();
        let location = run
            .attempt(StartupStep::Location, limit, self.location.current(limit))
            .await
            .unwrap_or_else(Location::fallback);
        debug!(
            region = %location.region,
            is_eu = location.is_eu,
            fallback = location.is_fallback(),
            "Location resolved"
        );
        location
    }

    async fn fetch_remote(
        &self,
        run: &mut PipelineRun<'_>,
        location: &Location,
    ) -> Option<RemoteConfiguration> {
        let limit = self.bootstrap.remote_config_timeout();
        let targeting = self.options.geo_targeting.then_some(location);
        let remote = run
            .attempt(
                StartupStep::RemoteConfig,
                limit,
                self.remote_config.fetch(limit, targeting),
            )
            .await;
        if remote.as_ref().is_some_and(RemoteConfiguration::is_empty) {
            debug!("Remote configuration carried no overrides");
        }
        remote
    }

    /// Merge the remote document over local defaults. Invalid remote fields
    /// fall back to their local value one by one; local defaults were
    /// validated at construction, so the result is always valid.
    fn resolve_configuration(
        &self,
        run: &mut PipelineRun<'_>,
        remote: Option<&RemoteConfiguration>,
    ) -> AppConfiguration {
        let remote = remote.map(|document| {
            let (kept, dropped) = document.without_invalid();
            if !dropped.is_empty() {
                let error = StartupError::RemoteConfigInvalid;
                warn!(
                    step = %error.step(),
                    error = %error,
                    fields = ?dropped,
                    fallback = %error.fallback(),
                    "Startup step degraded"
                );
                run.record(error);
            }
            kept
        });
        ConfigurationMerger::merge(&self.local, remote.as_ref())
    }

    async fn run_privacy_steps(
        &self,
        run: &mut PipelineRun<'_>,
        configuration: &AppConfiguration,
        location: &Location,
    ) -> PrivacyOutcome {
        let att_limit = configuration.att_timeout;
        let att_status = run
            .attempt(
                StartupStep::Tracking,
                att_limit,
                self.tracking.request(att_limit),
            )
            .await
            .unwrap_or(TrackingStatus::NotDetermined);

        let (consent_status, consent_permits_ads) = if location.is_eu {
            let cmp_limit = configuration.cmp_timeout;
            match run
                .attempt(
                    StartupStep::Consent,
                    cmp_limit,
                    self.consent.request(cmp_limit),
                )
                .await
            {
                Some(status) => (Some(status), status.permits_ads()),
                None => (None, false),
            }
        } else {
            debug!("Consent flow not required for this region");
            (None, true)
        };

        let ads_ready = if !configuration.ads_enabled {
            info!("Ads disabled by configuration");
            false
        } else if !consent_permits_ads {
            info!(
                consent = %consent_status.unwrap_or_default(),
                "Ads withheld without consent"
            );
            false
        } else {
            let ads_limit = configuration.ad_load_timeout;
            run.attempt(StartupStep::Ads, ads_limit, self.ads.initialize(ads_limit))
                .await
                .is_some()
        };

        PrivacyOutcome {
            att_status,
            consent_status,
            ads_ready,
            consent_pending: false,
        }
    }
}

/// In-progress state of one execution.
struct PipelineRun<'a> {
    tracker: &'a PhaseTracker,
    phases: Vec<StartupPhase>,
    errors: Vec<StartupError>,
}

impl<'a> PipelineRun<'a> {
    fn new(tracker: &'a PhaseTracker) -> Self {
        Self {
            tracker,
            phases: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn enter(&mut self, phase: StartupPhase) {
        if self.tracker.advance(phase) {
            self.phases.push(phase);
        }
    }

    fn record(&mut self, error: StartupError) {
        self.enter(StartupPhase::Failed(error.step()));
        self.errors.push(error);
    }

    async fn attempt<T, F>(&mut self, step: StartupStep, limit: Duration, operation: F) -> Option<T>
    where
        F: Future<Output = std::result::Result<T, ProviderError>>,
    {
        self.enter(StartupPhase::for_step(step));
        match run_step(step, limit, operation).await {
            Ok(value) => Some(value),
            Err(error) => {
                self.record(error);
                None
            }
        }
    }
}

struct PrivacyOutcome {
    att_status: TrackingStatus,
    consent_status: Option<ConsentStatus>,
    ads_ready: bool,
    consent_pending: bool,
}

impl PrivacyOutcome {
    fn deferred() -> Self {
        Self {
            att_status: TrackingStatus::NotDetermined,
            consent_status: None,
            ads_ready: false,
            consent_pending: true,
        }
    }
}
