//! Launch wiring settings.

use serde::Deserialize;

use crate::application::orchestrator::StartupOptions;
use crate::domain::startup::StartupMode;

/// `[startup]` table.
#[derive(Debug, Clone, Deserialize)]
pub struct StartupSettings {
    /// Launch mode used when the CLI does not override it.
    #[serde(default)]
    pub mode: StartupMode,
    /// Send the resolved location with the remote config request.
    #[serde(default = "default_geo_targeting")]
    pub geo_targeting: bool,
}

const fn default_geo_targeting() -> bool {
    true
}

impl StartupSettings {
    pub fn options(&self) -> StartupOptions {
        StartupOptions {
            geo_targeting: self.geo_targeting,
        }
    }
}

impl Default for StartupSettings {
    fn default() -> Self {
        Self {
            mode: StartupMode::default(),
            geo_targeting: default_geo_targeting(),
        }
    }
}
