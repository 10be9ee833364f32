use async_trait::async_trait;
use std::sync::Arc;

use super::DocumentEditor;
use crate::modules::profile::application::ports::incoming::use_cases::{
    AddSkillItemCommand, AddSkillItemUseCase, EditProfileError, RemoveSkillItemUseCase,
    UpdateSkillItemCommand, UpdateSkillItemUseCase,
};
use crate::modules::profile::domain::collection_editor::SKILL_ITEMS;
use crate::modules::profile::domain::{new_entry_id, CollectionName, ProfileDocument, SkillItem};

const NEW_SKILL_NAME: &str = "New Skill";
const NEW_SKILL_LEVEL: i32 = 50;

pub struct AddSkillItemService {
    editor: Arc<DocumentEditor>,
}

impl AddSkillItemService {
    pub fn new(editor: Arc<DocumentEditor>) -> Self {
        Self { editor }
    }
}

#[async_trait]
impl AddSkillItemUseCase for AddSkillItemService {
    async fn execute(
        &self,
        command: AddSkillItemCommand,
    ) -> Result<ProfileDocument, EditProfileError> {
        let item = SkillItem {
            id: command
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(new_entry_id),
            name: command.name.unwrap_or_else(|| NEW_SKILL_NAME.to_string()),
            level: command.level.unwrap_or(NEW_SKILL_LEVEL),
        };
        let category_id = command.category_id;

        self.editor
            .edit_collection(CollectionName::Skills, move |doc| {
                doc.add_skill_item(&category_id, item)
            })
            .await
    }
}

pub struct UpdateSkillItemService {
    editor: Arc<DocumentEditor>,
}

impl UpdateSkillItemService {
    pub fn new(editor: Arc<DocumentEditor>) -> Self {
        Self { editor }
    }
}

#[async_trait]
impl UpdateSkillItemUseCase for UpdateSkillItemService {
    async fn execute(
        &self,
        command: UpdateSkillItemCommand,
    ) -> Result<ProfileDocument, EditProfileError> {
        self.editor
            .edit_collection(CollectionName::Skills, move |doc| {
                doc.update_nested_field(
                    CollectionName::Skills,
                    &command.category_id,
                    SKILL_ITEMS,
                    &command.item_id,
                    &command.field,
                    command.value,
                )
            })
            .await
    }
}

pub struct RemoveSkillItemService {
    editor: Arc<DocumentEditor>,
}

impl RemoveSkillItemService {
    pub fn new(editor: Arc<DocumentEditor>) -> Self {
        Self { editor }
    }
}

#[async_trait]
impl RemoveSkillItemUseCase for RemoveSkillItemService {
    async fn execute(
        &self,
        category_id: &str,
        item_id: &str,
    ) -> Result<ProfileDocument, EditProfileError> {
        self.editor
            .edit_collection(CollectionName::Skills, |doc| {
                doc.remove_skill_item(category_id, item_id)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::profile::domain::seed::default_profile;
    use serde_json::json;
    use crate::tests::support::in_memory_store::InMemoryProfileStore;

    fn editor(store: Arc<InMemoryProfileStore>) -> Arc<DocumentEditor> {
        Arc::new(DocumentEditor::new(store))
    }

    #[tokio::test]
    async fn add_uses_defaults_for_omitted_values() {
        let store = Arc::new(InMemoryProfileStore::default());
        let service = AddSkillItemService::new(editor(store.clone()));

        let doc = service
            .execute(AddSkillItemCommand {
                category_id: "cat2".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let added = doc.skills[1].items.last().unwrap();
        assert_eq!(added.name, "New Skill");
        assert_eq!(added.level, 50);
        assert!(!added.id.is_empty());
        assert_eq!(store.writes(), vec![vec!["skills".to_string()]]);
    }

    #[tokio::test]
    async fn update_changes_one_item_only() {
        let store = Arc::new(InMemoryProfileStore::default());
        let service = UpdateSkillItemService::new(editor(store));
        let before = default_profile();

        let doc = service
            .execute(UpdateSkillItemCommand {
                category_id: "cat1".to_string(),
                item_id: "s2".to_string(),
                field: "level".to_string(),
                value: json!(12),
            })
            .await
            .unwrap();

        assert_eq!(doc.skills[0].items[1].level, 12);
        assert_eq!(doc.skills[0].items[0], before.skills[0].items[0]);
        assert_eq!(doc.skills[1..], before.skills[1..]);
    }

    #[tokio::test]
    async fn remove_from_unknown_category_is_not_found() {
        let service = RemoveSkillItemService::new(editor(Arc::new(InMemoryProfileStore::default())));

        let err = service.execute("nope", "s1").await.unwrap_err();

        assert!(matches!(err, EditProfileError::NotFound(_)));
    }
}
