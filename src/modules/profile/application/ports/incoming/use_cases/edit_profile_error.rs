use crate::modules::profile::application::ports::outgoing::ProfileStoreError;
use crate::modules::profile::domain::{EditorError, PatchError};

/// Failure of any use case that writes the profile document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditProfileError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Persistence backend is not configured")]
    StoreNotConfigured,

    #[error("Save failed: {0}")]
    SaveFailed(String),

    /// The stored value of this field could not be read, so an edit would replace it with
    /// default content.
    #[error("Stored {0} could not be read")]
    StoredFieldUnreadable(String),
}

impl From<ProfileStoreError> for EditProfileError {
    fn from(err: ProfileStoreError) -> Self {
        match err {
            ProfileStoreError::NotConfigured => EditProfileError::StoreNotConfigured,
            ProfileStoreError::InvalidPatch(msg) => EditProfileError::InvalidArgument(msg),
            other => EditProfileError::SaveFailed(other.to_string()),
        }
    }
}

impl From<EditorError> for EditProfileError {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::EntryNotFound(what) => EditProfileError::NotFound(format!("{what} not found")),
            other => EditProfileError::InvalidArgument(other.to_string()),
        }
    }
}

impl From<PatchError> for EditProfileError {
    fn from(err: PatchError) -> Self {
        EditProfileError::InvalidArgument(err.to_string())
    }
}
