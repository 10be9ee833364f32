use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::modules::profile::application::ports::incoming::use_cases::GetProfileUseCase;
use crate::modules::profile::application::ports::outgoing::ProfileStore;
use crate::modules::profile::domain::seed::default_profile;
use crate::modules::profile::domain::ProfileDocument;

pub struct GetProfileService {
    store: Arc<dyn ProfileStore>,
    last_known: RwLock<Option<ProfileDocument>>,
}

impl GetProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            store,
            last_known: RwLock::new(None),
        }
    }
}

#[async_trait]
impl GetProfileUseCase for GetProfileService {
    async fn execute(&self) -> ProfileDocument {
        match self.store.load().await {
            Ok(doc) => {
                *self.last_known.write().await = Some(doc.clone());
                doc
            }
            Err(e) => {
                warn!(error = %e, "Profile load failed, serving last known document");
                self.last_known
                    .read()
                    .await
                    .clone()
                    .unwrap_or_else(default_profile)
            }
        }
    }
}
