use std::time::Duration;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failure reported by an external startup collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("operation timed out")]
    Timeout,

    #[error("permission denied")]
    PermissionDenied,

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Failed(String),
}

/// A bounded wait elapsed before the wrapped operation resolved.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("deadline of {}ms elapsed", .limit.as_millis())]
pub struct TimeoutError {
    pub limit: Duration,
}

impl From<TimeoutError> for ProviderError {
    fn from(_: TimeoutError) -> Self {
        Self::Timeout
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("consent has not been requested yet")]
    ConsentUnresolved,
}

pub type Result<T> = std::result::Result<T, Error>;
