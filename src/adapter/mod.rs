//! Implementations of ports (hexagonal adapters).
//!
//! Platform adapters (CoreLocation, the remote-config transport, the ad SDK)
//! live in the host application. This crate ships only simulated
//! collaborators, used by the CLI and by tests.

pub mod simulated;
