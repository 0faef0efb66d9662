//! Ad network initialization port.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProviderError;

/// Ad SDK bootstrapper.
///
/// Callers never invoke this directly; initialization goes through
/// [`AdInitializationGate`](crate::application::ads::AdInitializationGate),
/// which guarantees the SDK is started at most once.
#[async_trait]
pub trait AdInitializer: Send + Sync {
    fn name(&self) -> &'static str;

    async fn initialize(&self, timeout: Duration) -> Result<(), ProviderError>;
}
