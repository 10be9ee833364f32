use base64::{engine::general_purpose::STANDARD, Engine as _};

pub const TEST_ADMIN_EMAIL: &str = "admin@test.dev";
pub const TEST_ADMIN_PASSWORD: &str = "test_admin_password";

/// `Authorization` header carrying HTTP Basic credentials.
pub fn basic_auth(email: &str, password: &str) -> (&'static str, String) {
    let token = STANDARD.encode(format!("{email}:{password}"));
    ("Authorization", format!("Basic {token}"))
}

/// Basic credentials accepted by `TestAppStateBuilder`'s default admin.
pub fn admin_auth() -> (&'static str, String) {
    basic_auth(TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD)
}
