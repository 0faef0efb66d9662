//! Outbound ports (driven side): interfaces implemented by platform adapters.

pub mod ads;
pub mod location;
pub mod privacy;
pub mod remote_config;

pub use ads::AdInitializer;
pub use location::LocationProvider;
pub use privacy::{ConsentProvider, TrackingAuthorizationProvider};
pub use remote_config::RemoteConfigProvider;
