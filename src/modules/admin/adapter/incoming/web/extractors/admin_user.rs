use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::future::{ready, Ready};

use crate::shared::api::ApiResponse;
use crate::AppState;

/// Operator credentials accepted on an admin request.
///
/// Read from HTTP Basic auth and checked with the same rule as the login endpoint.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub email: String,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn extract_basic_credentials(req: &HttpRequest) -> Option<(String, String)> {
    let encoded = req
        .headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (email, password) = decoded.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}

impl FromRequest for AdminUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = match req.app_data::<web::Data<AppState>>() {
            Some(state) => state,
            None => return ready(Err(create_api_error(ApiResponse::internal_error()))),
        };

        let Some((email, password)) = extract_basic_credentials(req) else {
            return ready(Err(create_api_error(ApiResponse::unauthorized(
                "MISSING_AUTH_HEADER",
                "Missing or invalid authorization header",
            ))));
        };

        if state.authenticate_admin.execute(&email, &password).success {
            ready(Ok(AdminUser { email }))
        } else {
            ready(Err(create_api_error(ApiResponse::unauthorized(
                "INVALID_CREDENTIALS",
                "Invalid credentials",
            ))))
        }
    }
}
