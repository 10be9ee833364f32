use async_trait::async_trait;

use super::EditProfileError;
use crate::modules::profile::domain::{CollectionEntry, ProfileDocument};

#[async_trait]
pub trait UpsertEntryUseCase: Send + Sync {
    async fn execute(&self, entry: CollectionEntry) -> Result<ProfileDocument, EditProfileError>;
}
