use actix_web::{get, web, Responder};

use crate::api::schemas::SuccessResponse;
use crate::modules::profile::domain::ProfileDocument;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Get the portfolio profile
///
/// Returns the stored document merged over the built-in defaults. When the backend
/// cannot be read, the last known document is served instead.
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "profile",
    responses(
        (status = 200, description = "Merged profile document", body = inline(SuccessResponse<ProfileDocument>)),
    )
)]
#[get("/api/profile")]
pub async fn get_profile_handler(data: web::Data<AppState>) -> impl Responder {
    ApiResponse::success(data.profile.get.execute().await)
}
