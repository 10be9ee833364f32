pub mod photo_upload_policy;

pub use photo_upload_policy::{PhotoUploadError, PhotoUploadPolicy};
