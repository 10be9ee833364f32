use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::DocumentEditor;
use crate::modules::profile::application::ports::incoming::use_cases::{
    UploadPhotoError, UploadPhotoUseCase,
};
use crate::modules::profile::domain::policies::PhotoUploadPolicy;
use crate::modules::profile::domain::{ProfileDocument, ProfilePatch};

pub struct UploadPhotoService {
    editor: Arc<DocumentEditor>,
    policy: PhotoUploadPolicy,
}

impl UploadPhotoService {
    pub fn new(editor: Arc<DocumentEditor>, policy: PhotoUploadPolicy) -> Self {
        Self { editor, policy }
    }
}

#[async_trait]
impl UploadPhotoUseCase for UploadPhotoService {
    fn max_bytes(&self) -> u64 {
        self.policy.max_file_size_bytes
    }

    async fn execute(
        &self,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<ProfileDocument, UploadPhotoError> {
        let data_url = self.policy.to_data_url(content_type, &bytes)?;
        info!(size = bytes.len(), "Storing profile photo as data URL");

        Ok(self.editor.write(ProfilePatch::photo_url(data_url)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::profile::application::ports::incoming::use_cases::EditProfileError;
    use crate::modules::profile::domain::policies::PhotoUploadError;
    use crate::tests::support::in_memory_store::InMemoryProfileStore;

    fn service(store: Arc<InMemoryProfileStore>, max: u64) -> UploadPhotoService {
        UploadPhotoService::new(
            Arc::new(DocumentEditor::new(store)),
            PhotoUploadPolicy {
                max_file_size_bytes: max,
                ..Default::default()
            },
        )
    }

    #[tokio::test]
    async fn stores_photo_as_data_url() {
        let store = Arc::new(InMemoryProfileStore::default());

        let doc = service(store.clone(), 16)
            .execute("image/gif", b"GIF89a".to_vec())
            .await
            .unwrap();

        assert_eq!(doc.photo_url, "data:image/gif;base64,R0lGODlh");
        assert_eq!(store.writes(), vec![vec!["photoUrl".to_string()]]);
    }

    #[tokio::test]
    async fn oversized_photo_is_rejected_without_writing() {
        let store = Arc::new(InMemoryProfileStore::default());

        let err = service(store.clone(), 3)
            .execute("image/png", vec![0u8; 4])
            .await
            .unwrap_err();

        assert_eq!(
            err,
            UploadPhotoError::Rejected(PhotoUploadError::TooLarge { size: 4, max: 3 })
        );
        assert!(store.writes().is_empty());
    }

    #[tokio::test]
    async fn unconfigured_store_surfaces_as_persist_error() {
        let err = service(Arc::new(InMemoryProfileStore::unconfigured()), 16)
            .execute("image/png", vec![1u8; 4])
            .await
            .unwrap_err();

        assert_eq!(
            err,
            UploadPhotoError::Persist(EditProfileError::StoreNotConfigured)
        );
    }
}
