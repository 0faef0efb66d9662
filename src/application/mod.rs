//! Application services (use cases).
//!
//! The launch pipeline, the deferred consent path, and the primitives they
//! share: bounded waits, phase publishing, and the ad SDK gate.

pub mod ads;
pub mod consent;
pub mod orchestrator;
pub mod phase;
mod step;
pub mod timeout;

pub use ads::AdInitializationGate;
pub use consent::{ConsentManager, ConsentResult};
pub use orchestrator::{StartupOptions, StartupOrchestrator, StartupProviders};
pub use phase::PhaseTracker;
pub use timeout::{bounded, with_timeout};
