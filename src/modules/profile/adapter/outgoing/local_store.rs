use async_trait::async_trait;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use super::snapshot_watch::{SharedWatch, SnapshotSource, VersionedDocument};
use crate::modules::profile::application::ports::outgoing::{
    ProfileStore, ProfileStoreError, ProfileSubscription, StoreKind,
};
use crate::modules::profile::domain::seed::default_profile;
use crate::modules::profile::domain::{
    merge_over_default, merge_with_fallbacks, MergedProfile, ProfileDocument, ProfilePatch,
};

const ABSENT_VERSION: &str = "absent";

#[derive(Debug, Clone)]
pub struct LocalStoreConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
    pub poll_interval: Duration,
}

impl LocalStoreConfig {
    pub const DEFAULT_DATA_DIR: &'static str = "./data";
    pub const DEFAULT_STORAGE_KEY: &'static str = "portfolio_profile_v1";
    pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

    pub fn from_env() -> Self {
        let data_dir = std::env::var("PORTFOLIO_DATA_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_DATA_DIR.to_string());
        let storage_key = std::env::var("PORTFOLIO_STORAGE_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_STORAGE_KEY.to_string());
        let poll_interval_secs = std::env::var("PROFILE_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(Self::DEFAULT_POLL_INTERVAL_SECS);

        Self {
            data_dir: PathBuf::from(data_dir),
            storage_key,
            poll_interval: Duration::from_secs(poll_interval_secs),
        }
    }

    pub fn file_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key))
    }
}

/// `ProfileStore` over one JSON file on this host.
pub struct LocalStore {
    file: Arc<LocalFile>,
    watch: SharedWatch<LocalFile>,
}

struct LocalFile {
    path: PathBuf,
    changes: broadcast::Sender<VersionedDocument>,
    write_lock: Mutex<()>,
}

fn content_version(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn io_error(path: &Path, e: std::io::Error) -> ProfileStoreError {
    ProfileStoreError::Io(format!("{}: {}", path.display(), e))
}

impl LocalFile {
    async fn read_bytes(&self) -> Result<Option<Vec<u8>>, ProfileStoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&self.path, e)),
        }
    }

    /// The stored record as raw JSON. Corrupt content reads as no record.
    async fn read_record(&self) -> Result<(Value, String), ProfileStoreError> {
        let Some(bytes) = self.read_bytes().await? else {
            return Ok((Value::Null, ABSENT_VERSION.to_string()));
        };
        let version = content_version(&bytes);

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(record) => Ok((record, version)),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Stored profile is not valid JSON, using default"
                );
                Ok((Value::Null, version))
            }
        }
    }

    async fn write_record(&self, record: &Value) -> Result<String, ProfileStoreError> {
        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| ProfileStoreError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, e))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &bytes)
            .await
            .map_err(|e| io_error(&tmp_path, e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| io_error(&self.path, e))?;

        Ok(content_version(&bytes))
    }

    async fn read_merged(&self) -> Result<(MergedProfile, String), ProfileStoreError> {
        let (record, version) = self.read_record().await?;
        Ok((merge_with_fallbacks(&default_profile(), record), version))
    }
}

#[async_trait]
impl SnapshotSource for LocalFile {
    async fn read_versioned(&self) -> Result<VersionedDocument, ProfileStoreError> {
        let (merged, version) = self.read_merged().await?;
        Ok(VersionedDocument {
            version,
            document: merged.document,
        })
    }
}

impl LocalStore {
    pub fn new(config: LocalStoreConfig) -> Self {
        let (changes, _) = broadcast::channel(16);
        info!(path = %config.file_path().display(), "Using local profile store");

        let file = Arc::new(LocalFile {
            path: config.file_path(),
            changes: changes.clone(),
            write_lock: Mutex::new(()),
        });

        Self {
            watch: SharedWatch::new(Arc::clone(&file), changes, config.poll_interval),
            file,
        }
    }

    pub fn path(&self) -> &Path {
        &self.file.path
    }
}

#[async_trait]
impl ProfileStore for LocalStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Local
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn load_checked(&self) -> Result<MergedProfile, ProfileStoreError> {
        Ok(self.file.read_merged().await?.0)
    }

    async fn merge_write(&self, patch: ProfilePatch) -> Result<ProfileDocument, ProfileStoreError> {
        let _guard = self.file.write_lock.lock().await;

        let (record, _) = self.file.read_record().await?;
        let record = match record {
            Value::Object(map) => Value::Object(map),
            _ => Value::Object(Map::new()),
        };
        let record = patch.overlay(record);
        let version = self.file.write_record(&record).await?;

        let document = merge_over_default(&default_profile(), record);
        // No receivers just means nobody is watching.
        if self
            .file
            .changes
            .send(VersionedDocument {
                version,
                document: document.clone(),
            })
            .is_err()
        {
            debug!("No local profile watchers to notify");
        }

        Ok(document)
    }

    fn subscribe(&self) -> ProfileSubscription {
        self.watch.subscribe()
    }
}
