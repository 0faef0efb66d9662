//! Startup configuration layers and the merge that combines them.
//!
//! Three layers exist:
//!
//! - [`BootstrapConfiguration`] bounds the steps that run before any remote
//!   configuration exists (location lookup and the remote fetch itself).
//! - [`LocalDefaults`] is the compiled-in floor for every tunable.
//! - [`RemoteConfiguration`] is whatever the remote fetch returned, any field of
//!   which may be absent.
//!
//! [`ConfigurationMerger::merge`] resolves the latter two into a fully
//! populated [`AppConfiguration`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Timeouts for the steps that run before remote configuration is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapConfiguration {
    location_timeout: Duration,
    remote_config_timeout: Duration,
}

impl BootstrapConfiguration {
    /// Compiled-in bootstrap bounds.
    pub const STANDARD: Self = Self::new(Duration::from_secs(5), Duration::from_secs(10));

    #[must_use]
    pub const fn new(location_timeout: Duration, remote_config_timeout: Duration) -> Self {
        Self {
            location_timeout,
            remote_config_timeout,
        }
    }

    #[must_use]
    pub const fn location_timeout(&self) -> Duration {
        self.location_timeout
    }

    #[must_use]
    pub const fn remote_config_timeout(&self) -> Duration {
        self.remote_config_timeout
    }

    /// Reject bounds that would make a step fail before it starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("location_timeout", self.location_timeout)?;
        ensure_positive("remote_config_timeout", self.remote_config_timeout)
    }
}

impl Default for BootstrapConfiguration {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Compiled-in defaults for every remotely tunable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalDefaults {
    pub att_timeout: Duration,
    pub cmp_timeout: Duration,
    pub ad_load_timeout: Duration,
    pub ads_enabled: bool,
}

impl LocalDefaults {
    pub const STANDARD: Self = Self {
        att_timeout: Duration::from_secs(30),
        cmp_timeout: Duration::from_secs(20),
        ad_load_timeout: Duration::from_secs(15),
        ads_enabled: true,
    };
}

impl Default for LocalDefaults {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Partially populated values delivered by the remote configuration service.
///
/// Durations travel as integer milliseconds (`att_timeout_ms`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfiguration {
    #[serde(default, rename = "att_timeout_ms", with = "optional_millis")]
    pub att_timeout: Option<Duration>,
    #[serde(default, rename = "cmp_timeout_ms", with = "optional_millis")]
    pub cmp_timeout: Option<Duration>,
    #[serde(default, rename = "ad_load_timeout_ms", with = "optional_millis")]
    pub ad_load_timeout: Option<Duration>,
    #[serde(default)]
    pub ads_enabled: Option<bool>,
}

impl RemoteConfiguration {
    /// True when the document carries no values at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.att_timeout.is_none()
            && self.cmp_timeout.is_none()
            && self.ad_load_timeout.is_none()
            && self.ads_enabled.is_none()
    }

    /// Drop zero timeouts, which would fail their step instantly.
    ///
    /// Returns the remaining document and the names of the dropped fields.
    /// Every other field is kept as delivered.
    #[must_use]
    pub fn without_invalid(&self) -> (Self, Vec<&'static str>) {
        let mut kept = *self;
        let mut dropped = Vec::new();
        for (field, value) in [
            ("att_timeout", &mut kept.att_timeout),
            ("cmp_timeout", &mut kept.cmp_timeout),
            ("ad_load_timeout", &mut kept.ad_load_timeout),
        ] {
            if matches!(value, Some(limit) if limit.is_zero()) {
                *value = None;
                dropped.push(field);
            }
        }
        (kept, dropped)
    }
}

/// Effective configuration for the rest of the launch; every field resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppConfiguration {
    #[serde(rename = "att_timeout_ms", with = "millis")]
    pub att_timeout: Duration,
    #[serde(rename = "cmp_timeout_ms", with = "millis")]
    pub cmp_timeout: Duration,
    #[serde(rename = "ad_load_timeout_ms", with = "millis")]
    pub ad_load_timeout: Duration,
    pub ads_enabled: bool,
}

impl AppConfiguration {
    /// Reject zero timeouts, which would fail every bounded step instantly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("att_timeout", self.att_timeout)?;
        ensure_positive("cmp_timeout", self.cmp_timeout)?;
        ensure_positive("ad_load_timeout", self.ad_load_timeout)
    }
}

impl From<LocalDefaults> for AppConfiguration {
    fn from(local: LocalDefaults) -> Self {
        ConfigurationMerger::merge(&local, None)
    }
}

/// Combines local defaults with an optional remote document.
pub struct ConfigurationMerger;

impl ConfigurationMerger {
    /// Resolve each field independently: the remote value when present,
    /// otherwise the local default.
    #[must_use]
    pub fn merge(local: &LocalDefaults, remote: Option<&RemoteConfiguration>) -> AppConfiguration {
        let remote = remote.copied().unwrap_or_default();
        AppConfiguration {
            att_timeout: remote.att_timeout.unwrap_or(local.att_timeout),
            cmp_timeout: remote.cmp_timeout.unwrap_or(local.cmp_timeout),
            ad_load_timeout: remote.ad_load_timeout.unwrap_or(local.ad_load_timeout),
            ads_enabled: remote.ads_enabled.unwrap_or(local.ads_enabled),
        }
    }
}

fn ensure_positive(field: &'static str, value: Duration) -> Result<(), ConfigError> {
    if value.is_zero() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than 0".to_string(),
        });
    }
    Ok(())
}

mod millis {
    use std::time::Duration;

    use serde::{Serialize, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        (value.as_millis() as u64).serialize(serializer)
    }
}

mod optional_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        value
            .map(|d| d.as_millis() as u64)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
