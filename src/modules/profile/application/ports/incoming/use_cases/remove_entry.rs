use async_trait::async_trait;

use super::EditProfileError;
use crate::modules::profile::domain::{CollectionName, ProfileDocument};

#[async_trait]
pub trait RemoveEntryUseCase: Send + Sync {
    async fn execute(
        &self,
        collection: CollectionName,
        id: &str,
    ) -> Result<ProfileDocument, EditProfileError>;
}
