use actix_web::{http::header, http::StatusCode, post, web, HttpRequest, Responder};
use futures::StreamExt;
use tracing::{info, warn};

use super::edit_response::upload_error_response;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminUser;
use crate::modules::profile::domain::ProfileDocument;
use crate::shared::api::ApiResponse;
use crate::AppState;

fn too_large(max: u64) -> actix_web::HttpResponse {
    ApiResponse::error(
        StatusCode::PAYLOAD_TOO_LARGE,
        "FILE_TOO_LARGE",
        &format!("Photo must be at most {max} bytes"),
    )
}

/// Upload the profile photo
///
/// Raw image bytes in the body, type in `Content-Type`. The image is stored inline
/// as a data URL in `photoUrl`.
#[utoipa::path(
    post,
    path = "/api/admin/profile/photo",
    tag = "admin",
    request_body(content = Vec<u8>, description = "Image bytes",
        content_type = "image/jpeg"),
    responses(
        (status = 200, description = "Document with the new photo", body = inline(SuccessResponse<ProfileDocument>)),
        (status = 400, description = "Empty body", body = ErrorResponse),
        (status = 401, description = "Missing or wrong admin credentials", body = ErrorResponse),
        (status = 413, description = "Image over the size limit", body = ErrorResponse),
        (status = 415, description = "Not a supported image type", body = ErrorResponse),
        (status = 502, description = "Backend rejected the write", body = ErrorResponse),
    ),
    security(("BasicAuth" = []))
)]
#[post("/api/admin/profile/photo")]
pub async fn upload_photo_handler(
    admin: AdminUser,
    req: HttpRequest,
    mut payload: web::Payload,
    data: web::Data<AppState>,
) -> impl Responder {
    let max = data.profile.upload_photo.max_bytes();

    let declared_len = req
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    if declared_len.is_some_and(|len| len > max) {
        return too_large(max);
    }

    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let mut body = web::BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                warn!(error = %e, "Photo upload interrupted");
                return ApiResponse::bad_request("INVALID_BODY", "Could not read upload");
            }
        };
        if (body.len() + chunk.len()) as u64 > max {
            return too_large(max);
        }
        body.extend_from_slice(&chunk);
    }

    info!(admin = %admin.email, size = body.len(), %content_type, "Profile photo upload");

    match data
        .profile
        .upload_photo
        .execute(&content_type, body.to_vec())
        .await
    {
        Ok(doc) => ApiResponse::success(doc),
        Err(e) => upload_error_response(e),
    }
}
