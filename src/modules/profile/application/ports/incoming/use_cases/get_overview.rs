use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

/// Entry counts shown on the admin overview tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOverview {
    pub projects: usize,
    pub experiences: usize,
    /// Skill items summed over every category.
    pub skills: usize,
    pub skill_categories: usize,
    pub education: usize,
    pub certifications: usize,
}

#[async_trait]
pub trait GetOverviewUseCase: Send + Sync {
    async fn execute(&self) -> ProfileOverview;
}
