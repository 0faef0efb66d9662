//! Running one collaborator-backed step under its bound.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use super::timeout::bounded;
use crate::domain::fallback::StartupError;
use crate::domain::startup::StartupStep;
use crate::error::ProviderError;

/// Run `operation` for `step` under `limit`, classifying any failure.
///
/// Failures are logged with the fallback the caller is about to apply; the
/// caller substitutes the value.
pub(crate) async fn run_step<T, F>(
    step: StartupStep,
    limit: Duration,
    operation: F,
) -> Result<T, StartupError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match bounded(limit, operation).await {
        Ok(value) => {
            debug!(step = %step, limit_ms = limit.as_millis() as u64, "Startup step succeeded");
            Ok(value)
        }
        Err(failure) => {
            let error = StartupError::classify(step, &failure);
            warn!(
                step = %step,
                error = %error,
                cause = %failure,
                fallback = %error.fallback(),
                "Startup step degraded"
            );
            Err(error)
        }
    }
}
