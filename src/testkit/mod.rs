//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`providers`] - [`FakeProviders`](providers::FakeProviders), one
//!   [`Simulated`](crate::adapter::simulated::Simulated) per collaborator.
//! - [`config`] - Canonical configuration values, locations, and an
//!   orchestrator builder.

pub mod config;
pub mod providers;
