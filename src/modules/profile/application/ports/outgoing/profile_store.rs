use async_trait::async_trait;
use serde::Serialize;
use std::collections::VecDeque;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::debug;
use utoipa::ToSchema;

use crate::modules::profile::domain::{MergedProfile, ProfileDocument, ProfilePatch};

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileStoreError {
    #[error("Persistence backend is not configured")]
    NotConfigured,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid patch: {0}")]
    InvalidPatch(String),
}

//
// ──────────────────────────────────────────────────────────
// Backend kind
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Remote,
    Local,
}

//
// ──────────────────────────────────────────────────────────
// Subscription
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileEvent {
    Snapshot(ProfileDocument),
    Error(String),
}

/// Stream of profile events for one observer.
///
/// Live subscriptions share one upstream watcher; dropping the last one lets it stop.
pub struct ProfileSubscription {
    pending: VecDeque<ProfileEvent>,
    live: Option<broadcast::Receiver<ProfileEvent>>,
}

impl ProfileSubscription {
    /// Yields `seed` first, then every event sent on `live`.
    pub fn new(seed: Option<ProfileEvent>, live: broadcast::Receiver<ProfileEvent>) -> Self {
        Self {
            pending: seed.into_iter().collect(),
            live: Some(live),
        }
    }

    /// A finite subscription that yields `events` and then ends.
    pub fn from_events(events: Vec<ProfileEvent>) -> Self {
        Self {
            pending: events.into(),
            live: None,
        }
    }

    /// Next event, or `None` once the watcher has stopped.
    ///
    /// A slow observer skips the events it missed and continues from the newest ones.
    pub async fn next(&mut self) -> Option<ProfileEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        let live = self.live.as_mut()?;
        loop {
            match live.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "Profile observer lagged behind the watcher");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Port
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait ProfileStore: Send + Sync {
    fn kind(&self) -> StoreKind;

    fn is_configured(&self) -> bool;

    /// The stored document merged over the default. A missing document is not an error.
    async fn load(&self) -> Result<ProfileDocument, ProfileStoreError> {
        self.load_checked().await.map(|merged| merged.document)
    }

    /// Like `load`, also naming the stored fields that were unreadable and defaulted.
    async fn load_checked(&self) -> Result<MergedProfile, ProfileStoreError>;

    /// Merge-writes every field of `doc`.
    async fn save(&self, doc: &ProfileDocument) -> Result<(), ProfileStoreError> {
        self.merge_write(ProfilePatch::from_document(doc))
            .await
            .map(|_| ())
    }

    /// Overwrites the patched keys, leaves the rest untouched and returns the stored result.
    async fn merge_write(&self, patch: ProfilePatch) -> Result<ProfileDocument, ProfileStoreError>;

    fn subscribe(&self) -> ProfileSubscription;
}
