//! Infrastructure layer.
//!
//! Configuration loading, logging setup, and the composition root that wires
//! collaborators into a [`StartupOrchestrator`](crate::application::StartupOrchestrator).
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation

pub mod bootstrap;
pub mod config;

pub use config::settings::Config;
