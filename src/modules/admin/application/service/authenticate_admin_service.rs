use tracing::{info, warn};

use crate::modules::admin::application::ports::incoming::use_cases::{
    AdminLoginOutcome, AuthenticateAdminUseCase,
};
use crate::modules::admin::domain::AdminCredentials;

pub struct AuthenticateAdminService {
    credentials: AdminCredentials,
}

impl AuthenticateAdminService {
    pub fn new(credentials: AdminCredentials) -> Self {
        Self { credentials }
    }
}

impl AuthenticateAdminUseCase for AuthenticateAdminService {
    fn execute(&self, email: &str, password: &str) -> AdminLoginOutcome {
        if self.credentials.matches(email, password) {
            info!(email = %email, "Admin authenticated");
            AdminLoginOutcome::granted()
        } else {
            warn!(email = %email, "Admin authentication failed");
            AdminLoginOutcome::denied()
        }
    }
}
