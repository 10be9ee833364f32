use actix_web::{post, web, Responder};
use tracing::info;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminUser;
use crate::modules::refiner::domain::{RefineDescriptionRequest, RefinedDescription};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Refine a description
///
/// Rewrites an experience or project description. Never fails: when generation is
/// unavailable the original text (or a notice) is returned.
#[utoipa::path(
    post,
    path = "/api/admin/refine-description",
    tag = "admin",
    request_body = RefineDescriptionRequest,
    responses(
        (status = 200, description = "Refined or fallback description", body = inline(SuccessResponse<RefinedDescription>),
            example = json!({ "success": true, "data": { "generatedDescription": "Led the rollout of ..." } })),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 401, description = "Missing or wrong admin credentials", body = ErrorResponse),
    ),
    security(("BasicAuth" = []))
)]
#[post("/api/admin/refine-description")]
pub async fn refine_description_handler(
    admin: AdminUser,
    req: web::Json<RefineDescriptionRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = req.into_inner();
    info!(admin = %admin.email, context = %request.context_type, "Refine description requested");

    ApiResponse::success(data.refine_description.execute(request).await)
}
