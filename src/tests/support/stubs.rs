use async_trait::async_trait;

use crate::modules::refiner::application::ports::incoming::use_cases::RefineDescriptionUseCase;
use crate::modules::refiner::domain::{RefineDescriptionRequest, RefinedDescription};

/// Refiner that never generates anything and always answers with the fallback.
pub struct StubRefineDescriptionUseCase;

#[async_trait]
impl RefineDescriptionUseCase for StubRefineDescriptionUseCase {
    async fn execute(&self, request: RefineDescriptionRequest) -> RefinedDescription {
        request.fallback()
    }
}
