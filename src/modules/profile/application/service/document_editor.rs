use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::modules::profile::application::ports::incoming::use_cases::EditProfileError;
use crate::modules::profile::application::ports::outgoing::ProfileStore;
use crate::modules::profile::domain::{CollectionName, EditorError, ProfileDocument, ProfilePatch};

/// Read-modify-write access to the stored document.
///
/// Edits are serialized: one edit's load and write never interleave with another's.
pub struct DocumentEditor {
    store: Arc<dyn ProfileStore>,
    lock: Mutex<()>,
}

impl DocumentEditor {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Applies `edit` to the current document and persists the one collection it changes.
    pub async fn edit_collection<F>(
        &self,
        collection: CollectionName,
        edit: F,
    ) -> Result<ProfileDocument, EditProfileError>
    where
        F: FnOnce(&ProfileDocument) -> Result<ProfileDocument, EditorError> + Send,
    {
        let _guard = self.lock.lock().await;

        let current = self.store.load_checked().await.map_err(|e| {
            warn!(collection = %collection, error = %e, "Could not read profile before edit");
            EditProfileError::from(e)
        })?;
        // Writing back a defaulted collection would replace the stored entries.
        if current.is_fallback(collection.as_str()) {
            warn!(collection = %collection, "Stored collection is unreadable, refusing edit");
            return Err(EditProfileError::StoredFieldUnreadable(
                collection.as_str().to_string(),
            ));
        }
        let next = edit(&current.document)?;

        let stored = self
            .store
            .merge_write(ProfilePatch::collection(&next, collection))
            .await
            .map_err(|e| {
                warn!(collection = %collection, error = %e, "Profile edit was not saved");
                EditProfileError::from(e)
            })?;

        info!(collection = %collection, "Profile collection saved");
        Ok(stored)
    }

    /// Merge-writes `patch` as is.
    pub async fn write(&self, patch: ProfilePatch) -> Result<ProfileDocument, EditProfileError> {
        let _guard = self.lock.lock().await;
        let fields = patch.keys().collect::<Vec<_>>().join(",");

        let stored = self.store.merge_write(patch).await.map_err(|e| {
            warn!(fields = %fields, error = %e, "Profile write failed");
            EditProfileError::from(e)
        })?;

        info!(fields = %fields, "Profile fields saved");
        Ok(stored)
    }
}
