use async_trait::async_trait;
use std::sync::Arc;

use super::DocumentEditor;
use crate::modules::profile::application::ports::incoming::use_cases::{
    EditProfileError, RemoveEntryUseCase, UpsertEntryUseCase,
};
use crate::modules::profile::domain::{CollectionEntry, CollectionName, ProfileDocument};

pub struct UpsertEntryService {
    editor: Arc<DocumentEditor>,
}

impl UpsertEntryService {
    pub fn new(editor: Arc<DocumentEditor>) -> Self {
        Self { editor }
    }
}

#[async_trait]
impl UpsertEntryUseCase for UpsertEntryService {
    async fn execute(&self, entry: CollectionEntry) -> Result<ProfileDocument, EditProfileError> {
        let collection = entry.collection();
        self.editor
            .edit_collection(collection, move |doc| Ok(doc.upsert(entry)))
            .await
    }
}

pub struct RemoveEntryService {
    editor: Arc<DocumentEditor>,
}

impl RemoveEntryService {
    pub fn new(editor: Arc<DocumentEditor>) -> Self {
        Self { editor }
    }
}

#[async_trait]
impl RemoveEntryUseCase for RemoveEntryService {
    async fn execute(
        &self,
        collection: CollectionName,
        id: &str,
    ) -> Result<ProfileDocument, EditProfileError> {
        self.editor
            .edit_collection(collection, |doc| Ok(doc.remove(collection, id)))
            .await
    }
}
