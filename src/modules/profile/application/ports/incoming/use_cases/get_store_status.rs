use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::profile::application::ports::outgoing::StoreKind;

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub backend: StoreKind,
    pub configured: bool,
    /// Persistent warning for the admin view while edits cannot be saved remotely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

pub trait GetStoreStatusUseCase: Send + Sync {
    fn execute(&self) -> StoreStatus;
}
