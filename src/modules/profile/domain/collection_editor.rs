//! Pure edit operations over the list-shaped fields of [`ProfileDocument`].
//!
//! Every operation borrows the current document and returns a new one; nothing here
//! performs I/O. Persisting the result is the caller's job.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::entities::{
    CertificationEntry, EducationEntry, ExperienceEntry, ProfileDocument, ProjectEntry,
    SkillCategory, SkillItem,
};

pub const SKILL_LEVEL_MIN: i32 = 0;
pub const SKILL_LEVEL_MAX: i32 = 100;
/// Name of the nested collection inside a skill category.
pub const SKILL_ITEMS: &str = "items";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Invalid {collection} entry: {reason}")]
    InvalidEntry {
        collection: CollectionName,
        reason: String,
    },

    #[error("Unsupported field: {0}")]
    UnsupportedField(String),

    #[error("{0} not found")]
    EntryNotFound(String),
}

/// Anything stored in a collection and addressed by id.
pub trait Keyed {
    fn key(&self) -> &str;
}

macro_rules! keyed_by_id {
    ($($ty:ty),+ $(,)?) => {
        $(impl Keyed for $ty {
            fn key(&self) -> &str {
                &self.id
            }
        })+
    };
}

keyed_by_id!(
    SkillCategory,
    SkillItem,
    EducationEntry,
    ExperienceEntry,
    ProjectEntry,
    CertificationEntry,
);

/// Replaces the first entry sharing `item`'s id in place, or appends `item`.
pub fn upsert_by_id<T: Keyed + Clone>(items: &[T], item: T) -> Vec<T> {
    let mut next = items.to_vec();
    match next.iter().position(|existing| existing.key() == item.key()) {
        Some(index) => next[index] = item,
        None => next.push(item),
    }
    next
}

/// Returns the entries whose id differs from `id`.
pub fn remove_by_id<T: Keyed + Clone>(items: &[T], id: &str) -> Vec<T> {
    items
        .iter()
        .filter(|existing| existing.key() != id)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionName {
    Skills,
    Education,
    Experiences,
    Projects,
    Certifications,
}

impl CollectionName {
    pub const ALL: [CollectionName; 5] = [
        CollectionName::Skills,
        CollectionName::Education,
        CollectionName::Experiences,
        CollectionName::Projects,
        CollectionName::Certifications,
    ];

    /// Key of the collection inside the stored document.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Skills => "skills",
            CollectionName::Education => "education",
            CollectionName::Experiences => "experiences",
            CollectionName::Projects => "projects",
            CollectionName::Certifications => "certifications",
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CollectionName {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CollectionName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| EditorError::UnknownCollection(s.to_string()))
    }
}

/// One entry of any collection.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionEntry {
    Skill(SkillCategory),
    Education(EducationEntry),
    Experience(ExperienceEntry),
    Project(ProjectEntry),
    Certification(CertificationEntry),
}

impl CollectionEntry {
    /// Decodes a raw entry for the named collection.
    pub fn from_json(collection: CollectionName, value: Value) -> Result<Self, EditorError> {
        let invalid = |e: serde_json::Error| EditorError::InvalidEntry {
            collection,
            reason: e.to_string(),
        };

        let entry = match collection {
            CollectionName::Skills => {
                CollectionEntry::Skill(serde_json::from_value(value).map_err(invalid)?)
            }
            CollectionName::Education => {
                CollectionEntry::Education(serde_json::from_value(value).map_err(invalid)?)
            }
            CollectionName::Experiences => {
                CollectionEntry::Experience(serde_json::from_value(value).map_err(invalid)?)
            }
            CollectionName::Projects => {
                CollectionEntry::Project(serde_json::from_value(value).map_err(invalid)?)
            }
            CollectionName::Certifications => {
                CollectionEntry::Certification(serde_json::from_value(value).map_err(invalid)?)
            }
        };

        if entry.id().trim().is_empty() {
            return Err(EditorError::InvalidEntry {
                collection,
                reason: "id must not be empty".to_string(),
            });
        }

        Ok(entry)
    }

    pub fn collection(&self) -> CollectionName {
        match self {
            CollectionEntry::Skill(_) => CollectionName::Skills,
            CollectionEntry::Education(_) => CollectionName::Education,
            CollectionEntry::Experience(_) => CollectionName::Experiences,
            CollectionEntry::Project(_) => CollectionName::Projects,
            CollectionEntry::Certification(_) => CollectionName::Certifications,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            CollectionEntry::Skill(e) => e.key(),
            CollectionEntry::Education(e) => e.key(),
            CollectionEntry::Experience(e) => e.key(),
            CollectionEntry::Project(e) => e.key(),
            CollectionEntry::Certification(e) => e.key(),
        }
    }
}

/// A single field edit on a skill item.
#[derive(Debug, Clone, PartialEq)]
pub enum SkillItemField {
    Name(String),
    Level(i32),
}

impl SkillItemField {
    pub fn parse(field: &str, value: Value) -> Result<Self, EditorError> {
        match field {
            "name" => match value {
                Value::String(name) => Ok(SkillItemField::Name(name)),
                other => Err(EditorError::UnsupportedField(format!(
                    "name must be a string, got {other}"
                ))),
            },
            "level" => value
                .as_i64()
                .or_else(|| value.as_f64().map(|f| f.round() as i64))
                .map(|level| {
                    SkillItemField::Level(
                        level.clamp(i64::from(SKILL_LEVEL_MIN), i64::from(SKILL_LEVEL_MAX))
                            as i32,
                    )
                })
                .ok_or_else(|| {
                    EditorError::UnsupportedField(format!("level must be a number, got {value}"))
                }),
            other => Err(EditorError::UnsupportedField(other.to_string())),
        }
    }

    fn apply(&self, item: &SkillItem) -> SkillItem {
        match self {
            SkillItemField::Name(name) => SkillItem {
                name: name.clone(),
                ..item.clone()
            },
            SkillItemField::Level(level) => SkillItem {
                level: (*level).clamp(SKILL_LEVEL_MIN, SKILL_LEVEL_MAX),
                ..item.clone()
            },
        }
    }
}

impl ProfileDocument {
    pub fn upsert(&self, entry: CollectionEntry) -> ProfileDocument {
        let mut next = self.clone();
        match entry {
            CollectionEntry::Skill(e) => next.skills = upsert_by_id(&self.skills, e),
            CollectionEntry::Education(e) => next.education = upsert_by_id(&self.education, e),
            CollectionEntry::Experience(e) => {
                next.experiences = upsert_by_id(&self.experiences, e)
            }
            CollectionEntry::Project(e) => next.projects = upsert_by_id(&self.projects, e),
            CollectionEntry::Certification(e) => {
                next.certifications = upsert_by_id(&self.certifications, e)
            }
        }
        next
    }

    pub fn remove(&self, collection: CollectionName, id: &str) -> ProfileDocument {
        let mut next = self.clone();
        match collection {
            CollectionName::Skills => next.skills = remove_by_id(&self.skills, id),
            CollectionName::Education => next.education = remove_by_id(&self.education, id),
            CollectionName::Experiences => {
                next.experiences = remove_by_id(&self.experiences, id)
            }
            CollectionName::Projects => next.projects = remove_by_id(&self.projects, id),
            CollectionName::Certifications => {
                next.certifications = remove_by_id(&self.certifications, id)
            }
        }
        next
    }

    /// Number of entries in a collection.
    pub fn len_of(&self, collection: CollectionName) -> usize {
        match collection {
            CollectionName::Skills => self.skills.len(),
            CollectionName::Education => self.education.len(),
            CollectionName::Experiences => self.experiences.len(),
            CollectionName::Projects => self.projects.len(),
            CollectionName::Certifications => self.certifications.len(),
        }
    }

    /// Replaces one field of an entry nested inside another collection's entry.
    ///
    /// Only skill items (`skills` / `items`) carry a nested collection.
    pub fn update_nested_field(
        &self,
        collection: CollectionName,
        entry_id: &str,
        nested_collection: &str,
        nested_id: &str,
        field: &str,
        value: Value,
    ) -> Result<ProfileDocument, EditorError> {
        if collection != CollectionName::Skills || nested_collection != SKILL_ITEMS {
            return Err(EditorError::UnsupportedField(format!(
                "{collection}.{nested_collection}"
            )));
        }
        let edit = SkillItemField::parse(field, value)?;
        self.update_skill_item(entry_id, nested_id, &edit)
    }

    pub fn update_skill_item(
        &self,
        category_id: &str,
        item_id: &str,
        edit: &SkillItemField,
    ) -> Result<ProfileDocument, EditorError> {
        let category = self.find_skill_category(category_id)?;
        let item = category
            .items
            .iter()
            .find(|item| item.key() == item_id)
            .ok_or_else(|| EditorError::EntryNotFound(format!("Skill item {item_id}")))?;

        let updated_category = SkillCategory {
            items: upsert_by_id(&category.items, edit.apply(item)),
            ..category.clone()
        };
        Ok(self.upsert(CollectionEntry::Skill(updated_category)))
    }

    pub fn add_skill_item(
        &self,
        category_id: &str,
        item: SkillItem,
    ) -> Result<ProfileDocument, EditorError> {
        let category = self.find_skill_category(category_id)?;
        let item = SkillItem {
            level: item.level.clamp(SKILL_LEVEL_MIN, SKILL_LEVEL_MAX),
            ..item
        };
        let updated_category = SkillCategory {
            items: upsert_by_id(&category.items, item),
            ..category.clone()
        };
        Ok(self.upsert(CollectionEntry::Skill(updated_category)))
    }

    pub fn remove_skill_item(
        &self,
        category_id: &str,
        item_id: &str,
    ) -> Result<ProfileDocument, EditorError> {
        let category = self.find_skill_category(category_id)?;
        let updated_category = SkillCategory {
            items: remove_by_id(&category.items, item_id),
            ..category.clone()
        };
        Ok(self.upsert(CollectionEntry::Skill(updated_category)))
    }

    fn find_skill_category(&self, category_id: &str) -> Result<&SkillCategory, EditorError> {
        self.skills
            .iter()
            .find(|category| category.key() == category_id)
            .ok_or_else(|| EditorError::EntryNotFound(format!("Skill category {category_id}")))
    }
}
