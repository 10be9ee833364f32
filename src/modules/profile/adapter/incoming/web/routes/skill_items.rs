use actix_web::{delete, patch, post, web, Responder};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;
use utoipa::ToSchema;

use super::edit_response::edit_error_response;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminUser;
use crate::modules::profile::application::ports::incoming::use_cases::{
    AddSkillItemCommand, UpdateSkillItemCommand,
};
use crate::modules::profile::domain::ProfileDocument;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AddSkillItemRequestDto {
    pub id: Option<String>,
    #[schema(example = "Kubernetes")]
    pub name: Option<String>,
    /// Clamped to 0..=100. Defaults to 50.
    #[schema(example = 70)]
    pub level: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSkillItemRequestDto {
    /// `name` or `level`
    #[schema(example = "level")]
    pub field: String,
    #[schema(value_type = Object, example = 85)]
    pub value: Value,
}

/// Add a skill item
#[utoipa::path(
    post,
    path = "/api/admin/skills/{category_id}/items",
    tag = "admin",
    params(("category_id" = String, Path, description = "Skill category id")),
    request_body = AddSkillItemRequestDto,
    responses(
        (status = 201, description = "Document after the write", body = inline(SuccessResponse<ProfileDocument>)),
        (status = 401, description = "Missing or wrong admin credentials", body = ErrorResponse),
        (status = 404, description = "Unknown category", body = ErrorResponse),
        (status = 409, description = "Stored collection is unreadable and was left untouched", body = ErrorResponse),
        (status = 502, description = "Backend rejected the write", body = ErrorResponse),
    ),
    security(("BasicAuth" = []))
)]
#[post("/api/admin/skills/{category_id}/items")]
pub async fn add_skill_item_handler(
    admin: AdminUser,
    path: web::Path<String>,
    req: Option<web::Json<AddSkillItemRequestDto>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.map(web::Json::into_inner).unwrap_or_default();
    let command = AddSkillItemCommand {
        category_id: path.into_inner(),
        id: dto.id,
        name: dto.name,
        level: dto.level,
    };
    info!(admin = %admin.email, category = %command.category_id, "Adding skill item");

    match data.profile.add_skill_item.execute(command).await {
        Ok(doc) => ApiResponse::created(doc),
        Err(e) => edit_error_response(e, "add_skill_item"),
    }
}

/// Update one field of a skill item
#[utoipa::path(
    patch,
    path = "/api/admin/skills/{category_id}/items/{item_id}",
    tag = "admin",
    params(
        ("category_id" = String, Path, description = "Skill category id"),
        ("item_id" = String, Path, description = "Skill item id")
    ),
    request_body = UpdateSkillItemRequestDto,
    responses(
        (status = 200, description = "Document after the write", body = inline(SuccessResponse<ProfileDocument>)),
        (status = 400, description = "Unsupported field or malformed value", body = ErrorResponse),
        (status = 401, description = "Missing or wrong admin credentials", body = ErrorResponse),
        (status = 404, description = "Unknown category or item", body = ErrorResponse),
        (status = 409, description = "Stored collection is unreadable and was left untouched", body = ErrorResponse),
        (status = 502, description = "Backend rejected the write", body = ErrorResponse),
    ),
    security(("BasicAuth" = []))
)]
#[patch("/api/admin/skills/{category_id}/items/{item_id}")]
pub async fn update_skill_item_handler(
    admin: AdminUser,
    path: web::Path<(String, String)>,
    req: web::Json<UpdateSkillItemRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (category_id, item_id) = path.into_inner();
    let dto = req.into_inner();
    info!(admin = %admin.email, %category_id, %item_id, field = %dto.field, "Updating skill item");

    let command = UpdateSkillItemCommand {
        category_id,
        item_id,
        field: dto.field,
        value: dto.value,
    };
    match data.profile.update_skill_item.execute(command).await {
        Ok(doc) => ApiResponse::success(doc),
        Err(e) => edit_error_response(e, "update_skill_item"),
    }
}

/// Remove a skill item
#[utoipa::path(
    delete,
    path = "/api/admin/skills/{category_id}/items/{item_id}",
    tag = "admin",
    params(
        ("category_id" = String, Path, description = "Skill category id"),
        ("item_id" = String, Path, description = "Skill item id")
    ),
    responses(
        (status = 200, description = "Document after the write", body = inline(SuccessResponse<ProfileDocument>)),
        (status = 401, description = "Missing or wrong admin credentials", body = ErrorResponse),
        (status = 404, description = "Unknown category", body = ErrorResponse),
        (status = 409, description = "Stored collection is unreadable and was left untouched", body = ErrorResponse),
        (status = 502, description = "Backend rejected the write", body = ErrorResponse),
    ),
    security(("BasicAuth" = []))
)]
#[delete("/api/admin/skills/{category_id}/items/{item_id}")]
pub async fn remove_skill_item_handler(
    admin: AdminUser,
    path: web::Path<(String, String)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (category_id, item_id) = path.into_inner();
    info!(admin = %admin.email, %category_id, %item_id, "Removing skill item");

    match data
        .profile
        .remove_skill_item
        .execute(&category_id, &item_id)
        .await
    {
        Ok(doc) => ApiResponse::success(doc),
        Err(e) => edit_error_response(e, "remove_skill_item"),
    }
}
