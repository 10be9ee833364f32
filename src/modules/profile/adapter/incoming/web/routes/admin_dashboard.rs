use actix_web::{get, web, Responder};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::AdminUser;
use crate::modules::profile::application::ports::incoming::use_cases::{
    ProfileOverview, StoreStatus,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Persistence status
///
/// Which backend is active and whether edits can be saved. `notice` carries the
/// warning the admin view keeps on screen while running without remote storage.
#[utoipa::path(
    get,
    path = "/api/admin/status",
    tag = "admin",
    responses(
        (status = 200, description = "Backend status", body = inline(SuccessResponse<StoreStatus>)),
        (status = 401, description = "Missing or wrong admin credentials", body = ErrorResponse),
    ),
    security(("BasicAuth" = []))
)]
#[get("/api/admin/status")]
pub async fn store_status_handler(_admin: AdminUser, data: web::Data<AppState>) -> impl Responder {
    ApiResponse::success(data.profile.status.execute())
}

/// Collection counts
#[utoipa::path(
    get,
    path = "/api/admin/overview",
    tag = "admin",
    responses(
        (status = 200, description = "Entry counts per collection", body = inline(SuccessResponse<ProfileOverview>)),
        (status = 401, description = "Missing or wrong admin credentials", body = ErrorResponse),
    ),
    security(("BasicAuth" = []))
)]
#[get("/api/admin/overview")]
pub async fn overview_handler(_admin: AdminUser, data: web::Data<AppState>) -> impl Responder {
    ApiResponse::success(data.profile.overview.execute().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::admin_auth;
    use crate::tests::support::in_memory_store::InMemoryProfileStore;

    #[actix_web::test]
    async fn test_status_reports_local_mode_notice() {
        let app = test::init_service(
            App::new()
                .app_data(TestAppStateBuilder::default().build())
                .service(store_status_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/admin/status")
            .insert_header(admin_auth())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["backend"], "local");
        assert_eq!(body["data"]["configured"], true);
        assert!(body["data"]["notice"].as_str().unwrap().contains("not configured"));
    }

    #[actix_web::test]
    async fn test_status_has_no_notice_when_remote_credentials_exist() {
        let app = test::init_service(
            App::new()
                .app_data(
                    TestAppStateBuilder::default()
                        .with_remote_configured(true)
                        .build(),
                )
                .service(store_status_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/admin/status")
            .insert_header(admin_auth())
            .to_request();
        let resp = test::call_service(&app, req).await;

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"], json!({ "backend": "local", "configured": true }));
    }

    #[actix_web::test]
    async fn test_status_requires_admin() {
        let app = test::init_service(
            App::new()
                .app_data(TestAppStateBuilder::default().build())
                .service(store_status_handler),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/admin/status").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_overview_counts_stored_collections() {
        let store = Arc::new(InMemoryProfileStore::with_record(json!({
            "projects": [],
            "certifications": [{ "id": "c1", "name": "A" }, { "id": "c2", "name": "B" }]
        })));
        let app = test::init_service(
            App::new()
                .app_data(TestAppStateBuilder::default().with_profile_store(store).build())
                .service(overview_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/admin/overview")
            .insert_header(admin_auth())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["projects"], 0);
        assert_eq!(body["data"]["certifications"], 2);
        assert_eq!(body["data"]["experiences"], 2);
    }
}
