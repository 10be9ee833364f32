use async_trait::async_trait;

use super::EditProfileError;
use crate::modules::profile::domain::{ProfileDocument, ProfilePatch};

#[async_trait]
pub trait PatchProfileUseCase: Send + Sync {
    async fn execute(&self, patch: ProfilePatch) -> Result<ProfileDocument, EditProfileError>;
}
