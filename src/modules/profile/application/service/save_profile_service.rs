use async_trait::async_trait;
use std::sync::Arc;

use super::DocumentEditor;
use crate::modules::profile::application::ports::incoming::use_cases::{
    EditProfileError, PatchProfileUseCase, SaveProfileUseCase,
};
use crate::modules::profile::domain::{ProfileDocument, ProfilePatch};

pub struct SaveProfileService {
    editor: Arc<DocumentEditor>,
}

impl SaveProfileService {
    pub fn new(editor: Arc<DocumentEditor>) -> Self {
        Self { editor }
    }
}

#[async_trait]
impl SaveProfileUseCase for SaveProfileService {
    async fn execute(&self, doc: ProfileDocument) -> Result<ProfileDocument, EditProfileError> {
        self.editor.write(ProfilePatch::from_document(&doc)).await
    }
}

pub struct PatchProfileService {
    editor: Arc<DocumentEditor>,
}

impl PatchProfileService {
    pub fn new(editor: Arc<DocumentEditor>) -> Self {
        Self { editor }
    }
}

#[async_trait]
impl PatchProfileUseCase for PatchProfileService {
    async fn execute(&self, patch: ProfilePatch) -> Result<ProfileDocument, EditProfileError> {
        if patch.is_empty() {
            return Err(EditProfileError::InvalidArgument(
                "Patch must contain at least one field".to_string(),
            ));
        }
        self.editor.write(patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::profile::domain::seed::default_profile;
    use crate::tests::support::in_memory_store::InMemoryProfileStore;
    use serde_json::json;

    #[tokio::test]
    async fn save_writes_every_field() {
        let store = Arc::new(InMemoryProfileStore::default());
        let service = SaveProfileService::new(Arc::new(DocumentEditor::new(store.clone())));
        let doc = ProfileDocument {
            name: "Sam".to_string(),
            ..default_profile()
        };

        let stored = service.execute(doc.clone()).await.unwrap();

        assert_eq!(stored, doc);
        assert_eq!(store.writes()[0].len(), 14);
    }

    #[tokio::test]
    async fn patch_leaves_other_fields_untouched() {
        let store = Arc::new(InMemoryProfileStore::with_record(json!({
            "name": "Before",
            "bio": "Kept"
        })));
        let service = PatchProfileService::new(Arc::new(DocumentEditor::new(store.clone())));

        let stored = service
            .execute(ProfilePatch::from_json(json!({ "name": "After" })).unwrap())
            .await
            .unwrap();

        assert_eq!(stored.name, "After");
        assert_eq!(stored.bio, "Kept");
        assert_eq!(store.record()["bio"], "Kept");
        assert_eq!(store.writes(), vec![vec!["name".to_string()]]);
    }
}
