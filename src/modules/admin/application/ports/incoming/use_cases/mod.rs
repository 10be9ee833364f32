mod authenticate_admin;

pub use authenticate_admin::{AdminLoginOutcome, AuthenticateAdminUseCase, INVALID_CREDENTIALS};
