mod authenticate_admin_service;

pub use authenticate_admin_service::AuthenticateAdminService;
