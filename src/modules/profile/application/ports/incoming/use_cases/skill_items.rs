use async_trait::async_trait;

use super::EditProfileError;
use serde_json::Value;

use crate::modules::profile::domain::ProfileDocument;

//
// ──────────────────────────────────────────────────────────
// Commands
// ──────────────────────────────────────────────────────────
//

/// New skill item. Omitted values take the "New Skill" / 50 defaults and a generated id.
#[derive(Debug, Clone, Default)]
pub struct AddSkillItemCommand {
    pub category_id: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub level: Option<i32>,
}

/// Raw field edit; the field name and value are validated against the skill item shape.
#[derive(Debug, Clone)]
pub struct UpdateSkillItemCommand {
    pub category_id: String,
    pub item_id: String,
    pub field: String,
    pub value: Value,
}

//
// ──────────────────────────────────────────────────────────
// Use case traits
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait AddSkillItemUseCase: Send + Sync {
    async fn execute(
        &self,
        command: AddSkillItemCommand,
    ) -> Result<ProfileDocument, EditProfileError>;
}

#[async_trait]
pub trait UpdateSkillItemUseCase: Send + Sync {
    async fn execute(
        &self,
        command: UpdateSkillItemCommand,
    ) -> Result<ProfileDocument, EditProfileError>;
}

#[async_trait]
pub trait RemoveSkillItemUseCase: Send + Sync {
    async fn execute(
        &self,
        category_id: &str,
        item_id: &str,
    ) -> Result<ProfileDocument, EditProfileError>;
}
