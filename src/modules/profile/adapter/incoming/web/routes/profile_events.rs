use actix_web::{get, web, HttpResponse, Responder};
use std::time::Duration;
use tracing::{debug, warn};

use crate::modules::profile::application::ports::outgoing::ProfileEvent;
use crate::AppState;

const KEEP_ALIVE_EVERY: Duration = Duration::from_secs(15);
const KEEP_ALIVE_FRAME: &[u8] = b": keep-alive\n\n";

fn sse_frame(event: &ProfileEvent) -> web::Bytes {
    let (name, payload) = match event {
        ProfileEvent::Snapshot(doc) => ("snapshot", serde_json::to_string(doc)),
        ProfileEvent::Error(message) => (
            "error",
            serde_json::to_string(&serde_json::json!({ "message": message })),
        ),
    };

    match payload {
        Ok(json) => web::Bytes::from(format!("event: {name}\ndata: {json}\n\n")),
        Err(e) => {
            warn!(error = %e, "Failed to serialize profile event");
            web::Bytes::from_static(b"event: error\ndata: {\"message\":\"serialization failed\"}\n\n")
        }
    }
}

/// Stream profile changes
///
/// Server-Sent Events: one `snapshot` event with the current document, another on every
/// stored change, and `error` events when the backend cannot be read.
#[utoipa::path(
    get,
    path = "/api/profile/events",
    tag = "profile",
    responses(
        (status = 200, description = "text/event-stream of snapshot and error events", content_type = "text/event-stream", body = String),
    )
)]
#[get("/api/profile/events")]
pub async fn profile_events_handler(data: web::Data<AppState>) -> impl Responder {
    debug!("Profile event stream opened");
    let subscription = data.profile.watch.execute();

    let body = futures::stream::unfold(subscription, |mut subscription| async move {
        let frame = match tokio::time::timeout(KEEP_ALIVE_EVERY, subscription.next()).await {
            Ok(Some(event)) => sse_frame(&event),
            Ok(None) => return None,
            Err(_) => web::Bytes::from_static(KEEP_ALIVE_FRAME),
        };
        Some((Ok::<_, actix_web::Error>(frame), subscription))
    });

    HttpResponse::Ok()
        .content_type("text/event-stream")
        .insert_header(("Cache-Control", "no-cache"))
        .streaming(body)
}
