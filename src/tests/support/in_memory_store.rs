use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

use crate::modules::profile::application::ports::outgoing::{
    ProfileEvent, ProfileStore, ProfileStoreError, ProfileSubscription, StoreKind,
};
use crate::modules::profile::domain::seed::default_profile;
use crate::modules::profile::domain::{
    merge_over_default, merge_with_fallbacks, MergedProfile, ProfileDocument, ProfilePatch,
};

/// `ProfileStore` double keeping the raw record in memory and logging every write.
pub struct InMemoryProfileStore {
    record: Mutex<Value>,
    writes: Mutex<Vec<Vec<String>>>,
    load_error: Mutex<Option<ProfileStoreError>>,
    write_error: Mutex<Option<ProfileStoreError>>,
    configured: bool,
    kind: StoreKind,
}

impl Default for InMemoryProfileStore {
    fn default() -> Self {
        Self::with_record(Value::Null)
    }
}

impl InMemoryProfileStore {
    pub fn with_record(record: Value) -> Self {
        Self {
            record: Mutex::new(record),
            writes: Mutex::new(Vec::new()),
            load_error: Mutex::new(None),
            write_error: Mutex::new(None),
            configured: true,
            kind: StoreKind::Local,
        }
    }

    pub fn with_document(doc: &ProfileDocument) -> Self {
        Self::with_record(serde_json::to_value(doc).unwrap())
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::default()
        }
    }

    pub fn with_kind(self, kind: StoreKind) -> Self {
        Self { kind, ..self }
    }

    pub fn fail_loads_with(self, err: ProfileStoreError) -> Self {
        *self.load_error.lock().unwrap() = Some(err);
        self
    }

    pub fn fail_writes_with(self, err: ProfileStoreError) -> Self {
        *self.write_error.lock().unwrap() = Some(err);
        self
    }

    pub fn set_load_error(&self, err: Option<ProfileStoreError>) {
        *self.load_error.lock().unwrap() = err;
    }

    pub fn record(&self) -> Value {
        self.record.lock().unwrap().clone()
    }

    /// Patched keys of each write, in order.
    pub fn writes(&self) -> Vec<Vec<String>> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    fn kind(&self) -> StoreKind {
        self.kind
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn load_checked(&self) -> Result<MergedProfile, ProfileStoreError> {
        if !self.configured {
            return Err(ProfileStoreError::NotConfigured);
        }
        if let Some(err) = self.load_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(merge_with_fallbacks(&default_profile(), self.record()))
    }

    async fn merge_write(&self, patch: ProfilePatch) -> Result<ProfileDocument, ProfileStoreError> {
        if !self.configured {
            return Err(ProfileStoreError::NotConfigured);
        }
        if let Some(err) = self.write_error.lock().unwrap().clone() {
            return Err(err);
        }
        let mut record = self.record.lock().unwrap();
        *record = patch.overlay(record.clone());
        self.writes
            .lock()
            .unwrap()
            .push(patch.keys().map(str::to_string).collect());
        Ok(merge_over_default(&default_profile(), record.clone()))
    }

    fn subscribe(&self) -> ProfileSubscription {
        ProfileSubscription::from_events(vec![ProfileEvent::Snapshot(merge_over_default(
            &default_profile(),
            self.record(),
        ))])
    }
}
