use async_trait::async_trait;

use super::EditProfileError;
use crate::modules::profile::domain::ProfileDocument;

#[async_trait]
pub trait SaveProfileUseCase: Send + Sync {
    async fn execute(&self, doc: ProfileDocument) -> Result<ProfileDocument, EditProfileError>;
}
