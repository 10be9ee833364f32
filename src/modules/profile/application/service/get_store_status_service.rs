use std::sync::Arc;

use crate::modules::profile::application::ports::incoming::use_cases::{
    GetStoreStatusUseCase, StoreStatus,
};
use crate::modules::profile::application::ports::outgoing::{ProfileStore, StoreKind};

const LOCAL_MODE_NOTICE: &str =
    "Remote database is not configured. Changes are saved on this server only.";
const REMOTE_UNCONFIGURED_NOTICE: &str =
    "Remote database is not configured. Changes cannot be saved until credentials are provided.";

pub struct GetStoreStatusService {
    store: Arc<dyn ProfileStore>,
    remote_configured: bool,
}

impl GetStoreStatusService {
    /// `remote_configured` reports whether remote credentials were valid at startup,
    /// whichever backend was selected.
    pub fn new(store: Arc<dyn ProfileStore>, remote_configured: bool) -> Self {
        Self {
            store,
            remote_configured,
        }
    }
}

impl GetStoreStatusUseCase for GetStoreStatusService {
    fn execute(&self) -> StoreStatus {
        let backend = self.store.kind();
        let configured = self.store.is_configured();

        let notice = match (backend, configured) {
            (_, false) => Some(REMOTE_UNCONFIGURED_NOTICE.to_string()),
            (StoreKind::Local, true) if !self.remote_configured => {
                Some(LOCAL_MODE_NOTICE.to_string())
            }
            _ => None,
        };

        StoreStatus {
            backend,
            configured,
            notice,
        }
    }
}
