use async_trait::async_trait;

use crate::modules::refiner::domain::{RefineDescriptionRequest, RefinedDescription};

/// Best-effort rewrite. Always produces a description, falling back on failure.
#[async_trait]
pub trait RefineDescriptionUseCase: Send + Sync {
    async fn execute(&self, request: RefineDescriptionRequest) -> RefinedDescription;
}
