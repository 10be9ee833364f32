use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::modules::admin::application::ports::incoming::use_cases::AdminLoginOutcome;
use crate::AppState;

/// Login form posted by the admin page
#[derive(Deserialize, ToSchema)]
pub struct AdminLoginRequestDto {
    #[schema(example = "admin@example.com")]
    #[serde(default)]
    pub email: String,

    #[schema(example = "change_me_admin")]
    #[serde(default)]
    pub password: String,
}

/// Admin login
///
/// Checks the operator credentials. Accepts a JSON or URL-encoded form body.
#[utoipa::path(
    post,
    path = "/api/admin/login",
    tag = "admin",
    request_body = AdminLoginRequestDto,
    responses(
        (status = 200, description = "Credentials accepted", body = AdminLoginOutcome,
            example = json!({ "success": true })),
        (status = 401, description = "Credentials rejected", body = AdminLoginOutcome,
            example = json!({ "success": false, "message": "Invalid credentials" })),
    )
)]
#[post("/api/admin/login")]
pub async fn admin_login_handler(
    body: web::Either<web::Json<AdminLoginRequestDto>, web::Form<AdminLoginRequestDto>>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = match body {
        web::Either::Left(json) => json.into_inner(),
        web::Either::Right(form) => form.into_inner(),
    };

    info!(email = %dto.email, "Admin login attempt");

    let outcome = data.authenticate_admin.execute(&dto.email, &dto.password);
    if outcome.success {
        HttpResponse::Ok().json(outcome)
    } else {
        HttpResponse::Unauthorized().json(outcome)
    }
}
