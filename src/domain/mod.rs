//! Startup domain types: configuration layers, statuses, phases, and the
//! failure-to-fallback table.

pub mod config;
pub mod fallback;
pub mod location;
pub mod phase;
pub mod privacy;
pub mod startup;

pub use config::{
    AppConfiguration, BootstrapConfiguration, ConfigurationMerger, LocalDefaults,
    RemoteConfiguration,
};
pub use fallback::{FallbackAction, StartupError};
pub use location::Location;
pub use phase::StartupPhase;
pub use privacy::{ConsentStatus, TrackingStatus};
pub use startup::{StartupMode, StartupResult, StartupStep};
