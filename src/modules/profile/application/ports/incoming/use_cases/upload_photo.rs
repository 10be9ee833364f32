use async_trait::async_trait;

use super::EditProfileError;
use crate::modules::profile::domain::policies::PhotoUploadError;
use crate::modules::profile::domain::ProfileDocument;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UploadPhotoError {
    #[error(transparent)]
    Rejected(#[from] PhotoUploadError),

    #[error(transparent)]
    Persist(#[from] EditProfileError),
}

#[async_trait]
pub trait UploadPhotoUseCase: Send + Sync {
    /// Largest body the use case will accept, so callers can stop reading early.
    fn max_bytes(&self) -> u64;

    async fn execute(
        &self,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<ProfileDocument, UploadPhotoError>;
}
