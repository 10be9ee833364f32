use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, warn};

use super::local_store::{LocalStore, LocalStoreConfig};
use super::remote_store::{RemoteStore, RemoteStoreConfig};
use crate::modules::profile::application::ports::outgoing::ProfileStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Remote when its configuration is valid, local otherwise.
    #[default]
    Auto,
    Remote,
    Local,
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown STORE_BACKEND value: {0} (expected auto, remote or local)")]
pub struct UnknownBackend(String);

impl FromStr for StoreBackend {
    type Err = UnknownBackend;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "auto" => Ok(StoreBackend::Auto),
            "remote" => Ok(StoreBackend::Remote),
            "local" => Ok(StoreBackend::Local),
            other => Err(UnknownBackend(other.to_string())),
        }
    }
}

impl StoreBackend {
    pub fn from_env() -> Result<Self, UnknownBackend> {
        std::env::var("STORE_BACKEND")
            .map(|v| v.parse())
            .unwrap_or(Ok(StoreBackend::Auto))
    }
}

/// The chosen store plus whether remote credentials were valid.
pub struct SelectedStore {
    pub store: Arc<dyn ProfileStore>,
    pub remote_configured: bool,
}

pub fn select_store(
    backend: StoreBackend,
    remote: RemoteStoreConfig,
    local: LocalStoreConfig,
) -> SelectedStore {
    let remote_configured = remote.is_configured();

    let store: Arc<dyn ProfileStore> = match backend {
        StoreBackend::Remote => {
            if !remote_configured {
                warn!("STORE_BACKEND=remote but Firestore is not configured, edits will fail");
            }
            Arc::new(RemoteStore::new(remote))
        }
        StoreBackend::Local => Arc::new(LocalStore::new(local)),
        StoreBackend::Auto if remote_configured => Arc::new(RemoteStore::new(remote)),
        StoreBackend::Auto => {
            info!("Firestore is not configured, running in local mode");
            Arc::new(LocalStore::new(local))
        }
    };

    SelectedStore {
        store,
        remote_configured,
    }
}
