use actix_web::{patch, put, web, Responder};
use serde_json::Value;
use tracing::info;

use super::edit_response::edit_error_response;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminUser;
use crate::modules::profile::domain::{ProfileDocument, ProfilePatch};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Replace the profile document
///
/// Writes every field of the submitted document. Fields stored under other keys are kept.
#[utoipa::path(
    put,
    path = "/api/admin/profile",
    tag = "admin",
    request_body = ProfileDocument,
    responses(
        (status = 200, description = "Saved document", body = inline(SuccessResponse<ProfileDocument>)),
        (status = 401, description = "Missing or wrong admin credentials", body = ErrorResponse),
        (status = 502, description = "Backend rejected the write", body = ErrorResponse),
        (status = 503, description = "Persistence backend not configured", body = ErrorResponse),
    ),
    security(("BasicAuth" = []))
)]
#[put("/api/admin/profile")]
pub async fn save_profile_handler(
    admin: AdminUser,
    req: web::Json<ProfileDocument>,
    data: web::Data<AppState>,
) -> impl Responder {
    info!(admin = %admin.email, "Saving whole profile");

    match data.profile.save.execute(req.into_inner()).await {
        Ok(doc) => ApiResponse::success(doc),
        Err(e) => edit_error_response(e, "save_profile"),
    }
}

/// Update selected profile fields
///
/// Body is a partial document; only the named top-level fields are written.
#[utoipa::path(
    patch,
    path = "/api/admin/profile",
    tag = "admin",
    request_body(content = Object, description = "Partial profile document",
        example = json!({ "name": "Jordan Lee", "socials": { "github": "https://github.com/jlee" } })),
    responses(
        (status = 200, description = "Merged document after the write", body = inline(SuccessResponse<ProfileDocument>)),
        (status = 400, description = "Empty patch, unknown field or malformed value", body = ErrorResponse),
        (status = 401, description = "Missing or wrong admin credentials", body = ErrorResponse),
        (status = 502, description = "Backend rejected the write", body = ErrorResponse),
        (status = 503, description = "Persistence backend not configured", body = ErrorResponse),
    ),
    security(("BasicAuth" = []))
)]
#[patch("/api/admin/profile")]
pub async fn patch_profile_handler(
    admin: AdminUser,
    req: web::Json<Value>,
    data: web::Data<AppState>,
) -> impl Responder {
    let patch = match ProfilePatch::from_json(req.into_inner()) {
        Ok(patch) => patch,
        Err(e) => return ApiResponse::bad_request("INVALID_PATCH", &e.to_string()),
    };
    info!(admin = %admin.email, fields = ?patch.keys().collect::<Vec<_>>(), "Patching profile");

    match data.profile.patch.execute(patch).await {
        Ok(doc) => ApiResponse::success(doc),
        Err(e) => edit_error_response(e, "patch_profile"),
    }
}
