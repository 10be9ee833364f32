use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::modules::refiner::application::ports::incoming::use_cases::RefineDescriptionUseCase;
use crate::modules::refiner::application::ports::outgoing::{TextGenerationError, TextGenerator};
use crate::modules::refiner::domain::{build_prompt, RefineDescriptionRequest, RefinedDescription};

pub struct RefineDescriptionService {
    generator: Arc<dyn TextGenerator>,
}

impl RefineDescriptionService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl RefineDescriptionUseCase for RefineDescriptionService {
    async fn execute(&self, request: RefineDescriptionRequest) -> RefinedDescription {
        let prompt = build_prompt(&request);

        let generated = self
            .generator
            .generate(&prompt)
            .await
            .map(|text| text.trim().to_string())
            .and_then(|text| {
                if text.is_empty() {
                    Err(TextGenerationError::EmptyOutput)
                } else {
                    Ok(text)
                }
            });

        match generated {
            Ok(text) => {
                info!(context = %request.context_type, "Description refined");
                RefinedDescription {
                    generated_description: text,
                }
            }
            Err(e) => {
                warn!(context = %request.context_type, error = %e, "Description refinement failed");
                request.fallback()
            }
        }
    }
}
