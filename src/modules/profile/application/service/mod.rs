mod collection_entry_service;
mod document_editor;
mod get_overview_service;
mod get_profile_service;
mod get_store_status_service;
mod save_profile_service;
mod skill_item_service;
mod upload_photo_service;
mod watch_profile_service;

pub use collection_entry_service::{RemoveEntryService, UpsertEntryService};
pub use document_editor::DocumentEditor;
pub use get_overview_service::GetOverviewService;
pub use get_profile_service::GetProfileService;
pub use get_store_status_service::GetStoreStatusService;
pub use save_profile_service::{PatchProfileService, SaveProfileService};
pub use skill_item_service::{AddSkillItemService, RemoveSkillItemService, UpdateSkillItemService};
pub use upload_photo_service::UploadPhotoService;
pub use watch_profile_service::WatchProfileService;
