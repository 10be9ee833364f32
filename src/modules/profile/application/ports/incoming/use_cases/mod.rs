mod edit_profile_error;
mod get_overview;
mod get_profile;
mod get_store_status;
mod patch_profile;
mod remove_entry;
mod save_profile;
mod skill_items;
mod upload_photo;
mod upsert_entry;
mod watch_profile;

pub use edit_profile_error::EditProfileError;
pub use get_overview::{GetOverviewUseCase, ProfileOverview};
pub use get_profile::GetProfileUseCase;
pub use get_store_status::{GetStoreStatusUseCase, StoreStatus};
pub use patch_profile::PatchProfileUseCase;
pub use remove_entry::RemoveEntryUseCase;
pub use save_profile::SaveProfileUseCase;
pub use skill_items::{
    AddSkillItemCommand, AddSkillItemUseCase, RemoveSkillItemUseCase, UpdateSkillItemCommand,
    UpdateSkillItemUseCase,
};
pub use upload_photo::{UploadPhotoError, UploadPhotoUseCase};
pub use upsert_entry::UpsertEntryUseCase;
pub use watch_profile::WatchProfileUseCase;
