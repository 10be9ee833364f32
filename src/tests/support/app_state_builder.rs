use actix_web::web;
use std::sync::Arc;

use crate::modules::admin::application::ports::incoming::use_cases::AuthenticateAdminUseCase;
use crate::modules::admin::application::service::AuthenticateAdminService;
use crate::modules::admin::domain::AdminCredentials;
use crate::modules::profile::application::ports::incoming::use_cases::WatchProfileUseCase;
use crate::modules::profile::application::ports::outgoing::ProfileStore;
use crate::modules::profile::application::profile_use_cases::ProfileUseCases;
use crate::modules::profile::domain::policies::PhotoUploadPolicy;
use crate::modules::refiner::application::ports::incoming::use_cases::RefineDescriptionUseCase;
use crate::tests::support::auth_helper::{TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD};
use crate::tests::support::in_memory_store::InMemoryProfileStore;
use crate::tests::support::stubs::StubRefineDescriptionUseCase;
use crate::AppState;

/// Builds an `AppState` whose profile use cases run over an in-memory store.
pub struct TestAppStateBuilder {
    store: Arc<dyn ProfileStore>,
    remote_configured: bool,
    photo_policy: PhotoUploadPolicy,
    watch_profile: Option<Arc<dyn WatchProfileUseCase + Send + Sync>>,
    authenticate_admin: Arc<dyn AuthenticateAdminUseCase + Send + Sync>,
    refine_description: Arc<dyn RefineDescriptionUseCase + Send + Sync>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            store: Arc::new(InMemoryProfileStore::default()),
            remote_configured: false,
            photo_policy: PhotoUploadPolicy::default(),
            watch_profile: None,
            authenticate_admin: Arc::new(AuthenticateAdminService::new(AdminCredentials::new(
                TEST_ADMIN_EMAIL,
                TEST_ADMIN_PASSWORD,
            ))),
            refine_description: Arc::new(StubRefineDescriptionUseCase),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_profile_store(mut self, store: Arc<dyn ProfileStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_remote_configured(mut self, configured: bool) -> Self {
        self.remote_configured = configured;
        self
    }

    pub fn with_photo_policy(mut self, policy: PhotoUploadPolicy) -> Self {
        self.photo_policy = policy;
        self
    }

    pub fn with_watch_profile(mut self, uc: Arc<dyn WatchProfileUseCase + Send + Sync>) -> Self {
        self.watch_profile = Some(uc);
        self
    }

    pub fn with_refine_description(
        mut self,
        uc: impl RefineDescriptionUseCase + Send + Sync + 'static,
    ) -> Self {
        self.refine_description = Arc::new(uc);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let mut profile =
            ProfileUseCases::new(self.store, self.remote_configured, self.photo_policy);
        if let Some(watch) = self.watch_profile {
            profile.watch = watch;
        }

        web::Data::new(AppState {
            profile,
            authenticate_admin: self.authenticate_admin,
            refine_description: self.refine_description,
        })
    }
}
