use serde::Serialize;
use utoipa::ToSchema;

pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AdminLoginOutcome {
    #[schema(example = true)]
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "Invalid credentials")]
    pub message: Option<String>,
}

impl AdminLoginOutcome {
    pub fn granted() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn denied() -> Self {
        Self {
            success: false,
            message: Some(INVALID_CREDENTIALS.to_string()),
        }
    }
}

pub trait AuthenticateAdminUseCase: Send + Sync {
    fn execute(&self, email: &str, password: &str) -> AdminLoginOutcome;
}
