mod admin_dashboard;
mod collections;
mod edit_response;
mod get_profile;
mod profile_events;
mod save_profile;
mod skill_items;
mod upload_photo;

pub use admin_dashboard::*;
pub use collections::*;
pub use get_profile::*;
pub use profile_events::*;
pub use save_profile::*;
pub use skill_items::*;
pub use upload_photo::*;
