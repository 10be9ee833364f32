use std::sync::Arc;
use tracing::info;

use crate::modules::profile::application::ports::incoming::use_cases::{
    AddSkillItemUseCase, GetOverviewUseCase, GetProfileUseCase, GetStoreStatusUseCase,
    PatchProfileUseCase, RemoveEntryUseCase, RemoveSkillItemUseCase, SaveProfileUseCase,
    UpdateSkillItemUseCase, UploadPhotoUseCase, UpsertEntryUseCase, WatchProfileUseCase,
};
use crate::modules::profile::application::ports::outgoing::{ProfileStore, StoreKind};
use crate::modules::profile::application::service::{
    AddSkillItemService, DocumentEditor, GetOverviewService, GetProfileService,
    GetStoreStatusService, PatchProfileService, RemoveEntryService, RemoveSkillItemService,
    SaveProfileService, UpdateSkillItemService, UploadPhotoService, UpsertEntryService,
    WatchProfileService,
};
use crate::modules::profile::domain::policies::PhotoUploadPolicy;

#[derive(Clone)]
pub struct ProfileUseCases {
    pub get: Arc<dyn GetProfileUseCase + Send + Sync>,
    pub watch: Arc<dyn WatchProfileUseCase + Send + Sync>,
    pub save: Arc<dyn SaveProfileUseCase + Send + Sync>,
    pub patch: Arc<dyn PatchProfileUseCase + Send + Sync>,
    pub upsert_entry: Arc<dyn UpsertEntryUseCase + Send + Sync>,
    pub remove_entry: Arc<dyn RemoveEntryUseCase + Send + Sync>,
    pub add_skill_item: Arc<dyn AddSkillItemUseCase + Send + Sync>,
    pub update_skill_item: Arc<dyn UpdateSkillItemUseCase + Send + Sync>,
    pub remove_skill_item: Arc<dyn RemoveSkillItemUseCase + Send + Sync>,
    pub upload_photo: Arc<dyn UploadPhotoUseCase + Send + Sync>,
    pub overview: Arc<dyn GetOverviewUseCase + Send + Sync>,
    pub status: Arc<dyn GetStoreStatusUseCase + Send + Sync>,
}

impl ProfileUseCases {
    /// Wires every profile use case over one store. All writers share one editor.
    pub fn new(
        store: Arc<dyn ProfileStore>,
        remote_configured: bool,
        photo_policy: PhotoUploadPolicy,
    ) -> Self {
        let photo_policy = match store.kind() {
            StoreKind::Remote => {
                let capped = photo_policy
                    .capped_at(PhotoUploadPolicy::REMOTE_DOCUMENT_MAX_FILE_SIZE_BYTES);
                info!(max_bytes = capped.max_file_size_bytes, "Photo size capped for the remote store");
                capped
            }
            StoreKind::Local => photo_policy,
        };
        let editor = Arc::new(DocumentEditor::new(Arc::clone(&store)));
        let get: Arc<GetProfileService> = Arc::new(GetProfileService::new(Arc::clone(&store)));

        Self {
            get: get.clone(),
            watch: Arc::new(WatchProfileService::new(Arc::clone(&store))),
            save: Arc::new(SaveProfileService::new(editor.clone())),
            patch: Arc::new(PatchProfileService::new(editor.clone())),
            upsert_entry: Arc::new(UpsertEntryService::new(editor.clone())),
            remove_entry: Arc::new(RemoveEntryService::new(editor.clone())),
            add_skill_item: Arc::new(AddSkillItemService::new(editor.clone())),
            update_skill_item: Arc::new(UpdateSkillItemService::new(editor.clone())),
            remove_skill_item: Arc::new(RemoveSkillItemService::new(editor.clone())),
            upload_photo: Arc::new(UploadPhotoService::new(editor, photo_policy)),
            overview: Arc::new(GetOverviewService::new(get)),
            status: Arc::new(GetStoreStatusService::new(store, remote_configured)),
        }
    }
}
