//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates the settings the
//! `liftoff` binary needs. Startup timeouts are not read from the file: the
//! bootstrap bounds and local defaults are compiled in, and remote values
//! arrive through the remote config collaborator at launch.
//!
//! # Example
//!
//! ```no_run
//! use liftoff::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("liftoff.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::logging::LoggingConfig;
use super::simulation::SimulationConfig;
use super::startup::StartupSettings;
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Launch mode and pipeline wiring.
    #[serde(default)]
    pub startup: StartupSettings,

    /// Behavior of the simulated collaborators driven by the CLI.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "level" }.into());
        }
        if !LoggingConfig::FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "format",
                reason: format!("must be one of {:?}", LoggingConfig::FORMATS),
            }
            .into());
        }
        if self.simulation.location.region.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "region" }.into());
        }
        Ok(())
    }

    /// Initialize logging based on configuration.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::startup::StartupMode;
    use crate::error::Error;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::parse_toml("").expect("empty config is valid");

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.startup.mode, StartupMode::Immediate);
        assert!(config.startup.geo_targeting);
    }

    #[test]
    fn parses_startup_table() {
        let config = Config::parse_toml(
            r#"
[startup]
mode = "lazy"
geo_targeting = false
"#,
        )
        .expect("valid config");

        assert_eq!(config.startup.mode, StartupMode::Lazy);
        assert!(!config.startup.options().geo_targeting);
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = Config::parse_toml(
            r#"
[logging]
level = "debug"
format = "xml"
"#,
        );

        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidValue { field: "format", .. }))
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            Config::parse_toml("[startup\nmode = "),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Config::parse_toml("[startup]\nmode = \"eager\"\n").is_err());
    }
}
