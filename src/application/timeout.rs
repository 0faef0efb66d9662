//! Bounded waits shared by every startup step.

use std::future::Future;
use std::time::Duration;

use crate::error::{ProviderError, TimeoutError};

/// Await `operation` for at most `limit`.
///
/// When the bound elapses first the operation future is dropped. Cancelling
/// whatever the operation started is left to the operation itself.
pub async fn with_timeout<T, F>(limit: Duration, operation: F) -> Result<T, TimeoutError>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(limit, operation)
        .await
        .map_err(|_| TimeoutError { limit })
}

/// Bounded collaborator call; an elapsed bound becomes [`ProviderError::Timeout`].
pub async fn bounded<T, F>(limit: Duration, operation: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    with_timeout(limit, operation)
        .await
        .unwrap_or_else(|elapsed| Err(elapsed.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn completes_within_bound() {
        let result = with_timeout(Duration::from_secs(1), async { 7 }).await;
        assert_eq!(result, Ok(7));
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_bound_reports_limit() {
        let limit = Duration::from_millis(250);
        let result = with_timeout(limit, std::future::pending::<()>()).await;
        assert_eq!(result, Err(TimeoutError { limit }));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_operation_is_abandoned() {
        let started = tokio::time::Instant::now();
        let result = with_timeout(Duration::from_secs(2), async {
            tokio::time::sleep(Duration::from_secs(60)).await;
        })
        .await;

        assert!(result.is_err());
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_flattens_timeout_into_provider_error() {
        let result: Result<(), _> =
            bounded(Duration::from_millis(10), std::future::pending()).await;
        assert_eq!(result, Err(ProviderError::Timeout));
    }

    #[tokio::test(start_paused = true)]
    async fn bounded_passes_through_provider_failures() {
        let result: Result<(), _> = bounded(Duration::from_secs(1), async {
            Err(ProviderError::PermissionDenied)
        })
        .await;
        assert_eq!(result, Err(ProviderError::PermissionDenied));
    }
}
