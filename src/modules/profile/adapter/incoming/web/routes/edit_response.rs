use actix_web::{http::StatusCode, HttpResponse};
use tracing::{error, warn};

use crate::modules::profile::application::ports::incoming::use_cases::{
    EditProfileError, UploadPhotoError,
};
use crate::modules::profile::domain::policies::PhotoUploadError;
use crate::shared::api::ApiResponse;

/// Maps a failed profile write onto the error envelope.
pub(crate) fn edit_error_response(err: EditProfileError, action: &str) -> HttpResponse {
    match err {
        EditProfileError::InvalidArgument(msg) => {
            warn!(action, error = %msg, "Rejected profile edit");
            ApiResponse::bad_request("INVALID_ARGUMENT", &msg)
        }
        EditProfileError::NotFound(msg) => ApiResponse::not_found("NOT_FOUND", &msg),
        EditProfileError::StoreNotConfigured => ApiResponse::service_unavailable(
            "STORE_NOT_CONFIGURED",
            "Persistence backend is not configured",
        ),
        EditProfileError::SaveFailed(msg) => {
            error!(action, error = %msg, "Profile save failed");
            ApiResponse::bad_gateway("SAVE_FAILED", "Saving failed, please retry")
        }
        EditProfileError::StoredFieldUnreadable(field) => {
            warn!(action, field = %field, "Refused edit over unreadable stored data");
            ApiResponse::conflict(
                "STORED_DATA_UNREADABLE",
                &format!("Stored {field} could not be read; fix or replace it with a full save"),
            )
        }
    }
}

pub(crate) fn upload_error_response(err: UploadPhotoError) -> HttpResponse {
    match err {
        UploadPhotoError::Rejected(PhotoUploadError::TooLarge { max, .. }) => ApiResponse::error(
            StatusCode::PAYLOAD_TOO_LARGE,
            "FILE_TOO_LARGE",
            &format!("Photo must be at most {max} bytes"),
        ),
        UploadPhotoError::Rejected(PhotoUploadError::UnsupportedType(mime)) => ApiResponse::error(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "UNSUPPORTED_MEDIA_TYPE",
            &format!("Unsupported image type: {mime}"),
        ),
        UploadPhotoError::Rejected(PhotoUploadError::Empty) => {
            ApiResponse::bad_request("EMPTY_FILE", "Photo upload is empty")
        }
        UploadPhotoError::Persist(e) => edit_error_response(e, "upload_photo"),
    }
}
