//! liftoff - Startup orchestration for mobile app launches.
//!
//! Sequences the network-backed initialization steps an app performs at
//! launch (location lookup, remote configuration, tracking authorization,
//! consent, ad SDK) under per-step timeouts. Every failure degrades to a
//! fixed fallback, so a launch always ends with a usable
//! [`StartupResult`](domain::StartupResult).
//!
//! # Architecture
//!
//! - **`domain`** - Configuration layers, statuses, phases, and the
//!   failure-to-fallback table
//! - **`port`** - Traits for the external collaborators
//! - **`application`** - [`StartupOrchestrator`](application::StartupOrchestrator),
//!   [`ConsentManager`](application::ConsentManager), and their shared
//!   primitives
//! - **`adapter`** - Simulated collaborators
//! - **`infrastructure`** - Config loading, logging, and wiring
//! - **`cli`** - The `liftoff` binary's commands
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use liftoff::adapter::simulated::Simulated;
//! use liftoff::application::{StartupOrchestrator, StartupProviders};
//! use liftoff::domain::{
//!     BootstrapConfiguration, ConsentStatus, LocalDefaults, Location, RemoteConfiguration,
//!     StartupMode, TrackingStatus,
//! };
//!
//! # async fn launch() -> Result<(), liftoff::error::Error> {
//! let providers = StartupProviders {
//!     location: Arc::new(Simulated::succeed(Location::new("FR", true))),
//!     remote_config: Arc::new(Simulated::succeed(RemoteConfiguration::default())),
//!     tracking: Arc::new(Simulated::succeed(TrackingStatus::Authorized)),
//!     consent: Arc::new(Simulated::succeed(ConsentStatus::Obtained)),
//!     ads: Arc::new(Simulated::succeed(())),
//! };
//! let orchestrator = StartupOrchestrator::new(
//!     BootstrapConfiguration::STANDARD,
//!     LocalDefaults::STANDARD,
//!     providers,
//! )?;
//!
//! let result = orchestrator.execute(StartupMode::Immediate).await;
//! assert!(result.ads_ready);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
