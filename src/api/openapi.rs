use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

// Admin
use crate::modules::admin::adapter::incoming::web::routes::AdminLoginRequestDto;
use crate::modules::admin::application::ports::incoming::use_cases::AdminLoginOutcome;

// Profile
use crate::modules::profile::adapter::incoming::web::routes::{
    AddSkillItemRequestDto, UpdateSkillItemRequestDto,
};
use crate::modules::profile::application::ports::incoming::use_cases::{
    ProfileOverview, StoreStatus,
};
use crate::modules::profile::application::ports::outgoing::StoreKind;
use crate::modules::profile::domain::{
    CertificationEntry, EducationEntry, ExperienceEntry, ProfileDocument, ProjectEntry,
    SkillCategory, SkillItem,
};

// Refiner
use crate::modules::refiner::domain::{
    ContextDetails, RefineDescriptionRequest, RefinedDescription, RefinementContext,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio Admin API",
        version = "1.0.0",
        description = "Public profile document and the admin endpoints that edit it",
    ),
    paths(
        // Public profile
        crate::modules::profile::adapter::incoming::web::routes::get_profile_handler,
        crate::modules::profile::adapter::incoming::web::routes::profile_events_handler,

        // Admin session
        crate::modules::admin::adapter::incoming::web::routes::admin_login_handler,

        // Admin dashboard
        crate::modules::profile::adapter::incoming::web::routes::store_status_handler,
        crate::modules::profile::adapter::incoming::web::routes::overview_handler,

        // Profile editing
        crate::modules::profile::adapter::incoming::web::routes::save_profile_handler,
        crate::modules::profile::adapter::incoming::web::routes::patch_profile_handler,
        crate::modules::profile::adapter::incoming::web::routes::upsert_entry_handler,
        crate::modules::profile::adapter::incoming::web::routes::remove_entry_handler,
        crate::modules::profile::adapter::incoming::web::routes::add_skill_item_handler,
        crate::modules::profile::adapter::incoming::web::routes::update_skill_item_handler,
        crate::modules::profile::adapter::incoming::web::routes::remove_skill_item_handler,
        crate::modules::profile::adapter::incoming::web::routes::upload_photo_handler,

        // Refinement
        crate::modules::refiner::adapter::incoming::web::routes::refine_description_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<ProfileDocument>,
            ErrorResponse,
            ErrorDetail,

            // Profile document
            ProfileDocument,
            SkillCategory,
            SkillItem,
            EducationEntry,
            ExperienceEntry,
            ProjectEntry,
            CertificationEntry,

            // Admin DTOs
            AdminLoginRequestDto,
            AdminLoginOutcome,
            StoreStatus,
            StoreKind,
            ProfileOverview,
            AddSkillItemRequestDto,
            UpdateSkillItemRequestDto,

            // Refiner DTOs
            RefineDescriptionRequest,
            RefinedDescription,
            RefinementContext,
            ContextDetails,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "profile", description = "Public portfolio profile"),
        (name = "admin", description = "Admin login and profile editing"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BasicAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Basic)
                        .description(Some("Admin email and password"))
                        .build(),
                ),
            )
        }
    }
}
