pub mod api;
pub mod health;
pub mod modules;
pub mod shared;
pub use modules::{admin, profile, refiner};

use crate::admin::application::ports::incoming::use_cases::AuthenticateAdminUseCase;
use crate::admin::application::service::AuthenticateAdminService;
use crate::admin::domain::AdminCredentials;
use crate::api::openapi::ApiDoc;
use crate::profile::adapter::outgoing::{
    select_store, LocalStoreConfig, RemoteStoreConfig, SelectedStore, StoreBackend,
};
use crate::profile::application::profile_use_cases::ProfileUseCases;
use crate::profile::domain::policies::PhotoUploadPolicy;
use crate::refiner::adapter::outgoing::{GeminiClient, GeminiConfig};
use crate::refiner::application::ports::incoming::use_cases::RefineDescriptionUseCase;
use crate::refiner::application::service::RefineDescriptionService;
use crate::shared::api::json_config::custom_json_config;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use std::env;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub profile: ProfileUseCases,
    pub authenticate_admin: Arc<dyn AuthenticateAdminUseCase + Send + Sync>,
    pub refine_description: Arc<dyn RefineDescriptionUseCase + Send + Sync>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Try .env.{environment} first, then fall back to .env
    let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let server_url = format!("{host}:{port}");

    // Persistence
    let backend = StoreBackend::from_env().context("Invalid store configuration")?;
    let SelectedStore {
        store,
        remote_configured,
    } = select_store(backend, RemoteStoreConfig::from_env(), LocalStoreConfig::from_env());
    info!(backend = ?store.kind(), remote_configured, "Profile store selected");

    let profile = ProfileUseCases::new(
        Arc::clone(&store),
        remote_configured,
        PhotoUploadPolicy::from_env(),
    );

    // Admin
    let authenticate_admin = AuthenticateAdminService::new(AdminCredentials::from_env());

    // Description refinement
    let gemini_config = GeminiConfig::from_env();
    if gemini_config.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set, refinement will return the original text");
    }
    let refine_description =
        RefineDescriptionService::new(Arc::new(GeminiClient::new(gemini_config)));

    let state = AppState {
        profile,
        authenticate_admin: Arc::new(authenticate_admin),
        refine_description: Arc::new(refine_description),
    };

    info!("Server run on: {}", server_url);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&store)))
            .app_data(custom_json_config())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .configure(init_routes)
    })
    .bind(&server_url)
    .with_context(|| format!("Failed to bind {server_url}"))?
    .run()
    .await
    .context("Server terminated with an error")
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Public profile
    cfg.service(crate::profile::adapter::incoming::web::routes::get_profile_handler);
    cfg.service(crate::profile::adapter::incoming::web::routes::profile_events_handler);
    // Admin
    cfg.service(crate::admin::adapter::incoming::web::routes::admin_login_handler);
    cfg.service(crate::profile::adapter::incoming::web::routes::store_status_handler);
    cfg.service(crate::profile::adapter::incoming::web::routes::overview_handler);
    cfg.service(crate::profile::adapter::incoming::web::routes::save_profile_handler);
    cfg.service(crate::profile::adapter::incoming::web::routes::patch_profile_handler);
    cfg.service(crate::profile::adapter::incoming::web::routes::upsert_entry_handler);
    cfg.service(crate::profile::adapter::incoming::web::routes::remove_entry_handler);
    cfg.service(crate::profile::adapter::incoming::web::routes::add_skill_item_handler);
    cfg.service(crate::profile::adapter::incoming::web::routes::update_skill_item_handler);
    cfg.service(crate::profile::adapter::incoming::web::routes::remove_skill_item_handler);
    cfg.service(crate::profile::adapter::incoming::web::routes::upload_photo_handler);
    cfg.service(crate::refiner::adapter::incoming::web::routes::refine_description_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}
