//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Every startup step talks to a collaborator that lives outside this crate:
//! the platform location API, the remote-config transport, the tracking
//! prompt, the consent UI, and the ad SDK. Each is reached through an
//! outbound port so the orchestrator can be driven by fakes in tests.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │   StartupOrchestrator   │
//!                    │     ConsentManager      │
//!                    └────────────┬────────────┘
//!        ┌──────────┬─────────────┼────────────┬──────────┐
//!        ▼          ▼             ▼            ▼          ▼
//!   ┌─────────┐ ┌────────┐  ┌──────────┐  ┌─────────┐ ┌──────┐
//!   │Location │ │ Remote │  │ Tracking │  │ Consent │ │ Ads  │
//!   └─────────┘ └────────┘  └──────────┘  └─────────┘ └──────┘
//! ```

pub mod outbound;

pub use outbound::{
    AdInitializer, ConsentProvider, LocationProvider, RemoteConfigProvider,
    TrackingAuthorizationProvider,
};
