use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Returned when generation fails and there is no original text to fall back to.
pub const GENERATION_FAILED_MESSAGE: &str = "AI generation failed. Please check your API key.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RefinementContext {
    WorkExperience,
    PortfolioProject,
}

impl fmt::Display for RefinementContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefinementContext::WorkExperience => f.write_str("work-experience"),
            RefinementContext::PortfolioProject => f.write_str("portfolio-project"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ContextDetails {
    pub company_name: Option<String>,
    pub position: Option<String>,
    pub project_name: Option<String>,
    pub technologies_used: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefineDescriptionRequest {
    #[serde(default)]
    pub original_description: Option<String>,
    pub context_type: RefinementContext,
    #[serde(default)]
    pub context_details: ContextDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefinedDescription {
    pub generated_description: String,
}

impl RefineDescriptionRequest {
    /// The original text, if it has any content.
    pub fn original(&self) -> Option<&str> {
        self.original_description
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    /// Text to return when generation is unavailable.
    pub fn fallback(&self) -> RefinedDescription {
        RefinedDescription {
            generated_description: self
                .original()
                .unwrap_or(GENERATION_FAILED_MESSAGE)
                .to_string(),
        }
    }
}

/// Renders the rewrite instruction sent to the text generator.
pub fn build_prompt(request: &RefineDescriptionRequest) -> String {
    let details = &request.context_details;
    let subject = [&details.project_name, &details.company_name]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect::<String>();

    let mut prompt = String::from("You are a professional resume writer. Refine this description.\n\n");
    prompt.push_str(&format!("Context: {}\n", request.context_type));
    prompt.push_str(&format!("Subject: {subject}\n"));
    prompt.push_str(&format!(
        "Role: {}\n",
        details.position.as_deref().unwrap_or_default()
    ));
    if let Some(tech) = details.technologies_used.as_deref() {
        prompt.push_str(&format!("Technologies: {tech}\n"));
    }
    prompt.push_str(&format!("Current: {}\n\n", request.original().unwrap_or_default()));
    prompt.push_str(
        "Instructions:\n\
         1. Make it professional and achievement-oriented.\n\
         2. Use strong action verbs.\n\
         3. Keep it under 3 sentences.",
    );
    prompt
}
