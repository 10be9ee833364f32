use async_trait::async_trait;

use crate::modules::profile::domain::ProfileDocument;

/// Reads the merged profile. Never fails: a read error falls back to the last known
/// document, or the default one.
#[async_trait]
pub trait GetProfileUseCase: Send + Sync {
    async fn execute(&self) -> ProfileDocument;
}
