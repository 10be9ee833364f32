use actix_web::{delete, put, web, HttpResponse, Responder};
use serde_json::Value;
use tracing::info;

use super::edit_response::edit_error_response;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminUser;
use crate::modules::profile::domain::{CollectionEntry, CollectionName, ProfileDocument};
use crate::shared::api::ApiResponse;
use crate::AppState;

fn parse_collection(raw: &str) -> Result<CollectionName, HttpResponse> {
    raw.parse::<CollectionName>()
        .map_err(|e| ApiResponse::bad_request("UNKNOWN_COLLECTION", &e.to_string()))
}

/// Add or replace a collection entry
///
/// The entry with the same `id` is replaced in place; a new id is appended.
#[utoipa::path(
    put,
    path = "/api/admin/collections/{collection}",
    tag = "admin",
    params(
        ("collection" = String, Path, description = "skills | education | experiences | projects | certifications")
    ),
    request_body(content = Object, description = "Entry with a non-empty `id`",
        example = json!({ "id": "p3", "title": "Inventory API", "category": "Personal Project", "techBack": "Rust" })),
    responses(
        (status = 200, description = "Document after the write", body = inline(SuccessResponse<ProfileDocument>)),
        (status = 400, description = "Unknown collection or malformed entry", body = ErrorResponse),
        (status = 401, description = "Missing or wrong admin credentials", body = ErrorResponse),
        (status = 409, description = "Stored collection is unreadable and was left untouched", body = ErrorResponse),
        (status = 502, description = "Backend rejected the write", body = ErrorResponse),
        (status = 503, description = "Persistence backend not configured", body = ErrorResponse),
    ),
    security(("BasicAuth" = []))
)]
#[put("/api/admin/collections/{collection}")]
pub async fn upsert_entry_handler(
    admin: AdminUser,
    path: web::Path<String>,
    req: web::Json<Value>,
    data: web::Data<AppState>,
) -> impl Responder {
    let collection = match parse_collection(&path.into_inner()) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let entry = match CollectionEntry::from_json(collection, req.into_inner()) {
        Ok(entry) => entry,
        Err(e) => return ApiResponse::bad_request("INVALID_ENTRY", &e.to_string()),
    };
    info!(admin = %admin.email, %collection, id = %entry.id(), "Upserting entry");

    match data.profile.upsert_entry.execute(entry).await {
        Ok(doc) => ApiResponse::success(doc),
        Err(e) => edit_error_response(e, "upsert_entry"),
    }
}

/// Remove a collection entry
///
/// Removing an id that is not present leaves the collection unchanged.
#[utoipa::path(
    delete,
    path = "/api/admin/collections/{collection}/{id}",
    tag = "admin",
    params(
        ("collection" = String, Path, description = "skills | education | experiences | projects | certifications"),
        ("id" = String, Path, description = "Entry id")
    ),
    responses(
        (status = 200, description = "Document after the write", body = inline(SuccessResponse<ProfileDocument>)),
        (status = 400, description = "Unknown collection", body = ErrorResponse),
        (status = 401, description = "Missing or wrong admin credentials", body = ErrorResponse),
        (status = 409, description = "Stored collection is unreadable and was left untouched", body = ErrorResponse),
        (status = 502, description = "Backend rejected the write", body = ErrorResponse),
        (status = 503, description = "Persistence backend not configured", body = ErrorResponse),
    ),
    security(("BasicAuth" = []))
)]
#[delete("/api/admin/collections/{collection}/{id}")]
pub async fn remove_entry_handler(
    admin: AdminUser,
    path: web::Path<(String, String)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (collection, id) = path.into_inner();
    let collection = match parse_collection(&collection) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    info!(admin = %admin.email, %collection, %id, "Removing entry");

    match data.profile.remove_entry.execute(collection, &id).await {
        Ok(doc) => ApiResponse::success(doc),
        Err(e) => edit_error_response(e, "remove_entry"),
    }
}
