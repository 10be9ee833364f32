use email_address::EmailAddress;
use tracing::warn;

/// The single operator login, compared by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

impl AdminCredentials {
    pub const DEV_EMAIL: &'static str = "admin@example.com";
    pub const DEV_PASSWORD: &'static str = "change_me_admin";

    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Reads `ADMIN_EMAIL` / `ADMIN_PASSWORD`, falling back to development values.
    pub fn from_env() -> Self {
        let email = std::env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty());
        let password = std::env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty());

        if email.is_none() || password.is_none() {
            warn!("ADMIN_EMAIL or ADMIN_PASSWORD not set, using development credentials");
        }

        let credentials = Self::new(
            email.unwrap_or_else(|| Self::DEV_EMAIL.to_string()),
            password.unwrap_or_else(|| Self::DEV_PASSWORD.to_string()),
        );

        if !EmailAddress::is_valid(&credentials.email) {
            warn!(email = %credentials.email, "ADMIN_EMAIL is not a valid email address");
        }

        credentials
    }

    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}
