use std::sync::Arc;

use crate::modules::profile::application::ports::incoming::use_cases::WatchProfileUseCase;
use crate::modules::profile::application::ports::outgoing::{ProfileStore, ProfileSubscription};

pub struct WatchProfileService {
    store: Arc<dyn ProfileStore>,
}

impl WatchProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }
}

impl WatchProfileUseCase for WatchProfileService {
    fn execute(&self) -> ProfileSubscription {
        self.store.subscribe()
    }
}
