use async_trait::async_trait;
use std::sync::Arc;

use crate::modules::profile::application::ports::incoming::use_cases::{
    GetOverviewUseCase, GetProfileUseCase, ProfileOverview,
};
use crate::modules::profile::domain::ProfileDocument;

pub struct GetOverviewService {
    get_profile: Arc<dyn GetProfileUseCase>,
}

impl GetOverviewService {
    pub fn new(get_profile: Arc<dyn GetProfileUseCase>) -> Self {
        Self { get_profile }
    }
}

impl From<&ProfileDocument> for ProfileOverview {
    fn from(doc: &ProfileDocument) -> Self {
        ProfileOverview {
            projects: doc.projects.len(),
            experiences: doc.experiences.len(),
            skills: doc.skills.iter().map(|c| c.items.len()).sum(),
            skill_categories: doc.skills.len(),
            education: doc.education.len(),
            certifications: doc.certifications.len(),
        }
    }
}

#[async_trait]
impl GetOverviewUseCase for GetOverviewService {
    async fn execute(&self) -> ProfileOverview {
        ProfileOverview::from(&self.get_profile.execute().await)
    }
}
