use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

use crate::modules::profile::application::ports::outgoing::{ProfileStore, StoreKind};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
    store: StoreKind,
    configured: bool,
}

/// LIVENESS PROBE
/// - No I/O
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

/// READINESS PROBE
/// - The profile store can be read
#[get("/ready")]
pub async fn readiness(store: web::Data<Arc<dyn ProfileStore>>) -> impl Responder {
    let body = |status| ReadinessResponse {
        status,
        store: store.kind(),
        configured: store.is_configured(),
    };

    match store.load().await {
        Ok(_) => HttpResponse::Ok().json(body("ok")),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            HttpResponse::ServiceUnavailable().json(body("unhealthy"))
        }
    }
}
