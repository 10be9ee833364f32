use serde_json::{Map, Value};
use tracing::warn;

use super::collection_editor::CollectionName;
use super::entities::ProfileDocument;

/// Top-level keys of a stored profile document.
pub const PROFILE_FIELDS: [&str; 14] = [
    "name",
    "title",
    "brandName",
    "bio",
    "email",
    "phone",
    "location",
    "photoUrl",
    "socials",
    "skills",
    "education",
    "experiences",
    "projects",
    "certifications",
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PatchError {
    #[error("Patch must be a JSON object")]
    NotAnObject,

    #[error("Patch must contain at least one field")]
    Empty,

    #[error("Unknown profile field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

fn document_to_map(doc: &ProfileDocument) -> Map<String, Value> {
    match serde_json::to_value(doc) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}

/// A stored record laid over the default document.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedProfile {
    pub document: ProfileDocument,
    /// Stored keys that could not be read and show the default's value instead.
    pub fallback_fields: Vec<String>,
}

impl MergedProfile {
    pub fn is_fallback(&self, field: &str) -> bool {
        self.fallback_fields.iter().any(|f| f == field)
    }
}

/// Lays the top-level keys of `overlay` over `default`.
///
/// Absent and `null` keys keep the default's value. A key whose value cannot be read as
/// the expected shape is skipped with a warning instead of discarding the whole overlay.
pub fn merge_over_default(default: &ProfileDocument, overlay: Value) -> ProfileDocument {
    merge_with_fallbacks(default, overlay).document
}

/// Same as [`merge_over_default`], also reporting which stored keys were skipped.
pub fn merge_with_fallbacks(default: &ProfileDocument, overlay: Value) -> MergedProfile {
    let overlay = match overlay {
        Value::Object(map) => map,
        Value::Null => {
            return MergedProfile {
                document: default.clone(),
                fallback_fields: Vec::new(),
            }
        }
        other => {
            warn!(kind = %json_kind(&other), "Stored profile is not an object, using default");
            return MergedProfile {
                document: default.clone(),
                fallback_fields: PROFILE_FIELDS.iter().map(|f| f.to_string()).collect(),
            };
        }
    };

    let mut merged = document_to_map(default);
    let mut fallback_fields = Vec::new();
    for (key, value) in overlay {
        if value.is_null() {
            continue;
        }
        let mut candidate = merged.clone();
        candidate.insert(key.clone(), value);
        match serde_json::from_value::<ProfileDocument>(Value::Object(candidate.clone())) {
            Ok(_) => merged = candidate,
            Err(e) => {
                warn!(field = %key, error = %e, "Ignoring stored field with unexpected shape");
                fallback_fields.push(key);
            }
        }
    }

    match serde_json::from_value(Value::Object(merged)) {
        Ok(document) => MergedProfile {
            document,
            fallback_fields,
        },
        Err(_) => MergedProfile {
            document: default.clone(),
            fallback_fields: PROFILE_FIELDS.iter().map(|f| f.to_string()).collect(),
        },
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A validated partial document: top-level keys only, each holding a well-formed value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePatch {
    fields: Map<String, Value>,
}

impl ProfilePatch {
    pub fn from_json(value: Value) -> Result<Self, PatchError> {
        let Value::Object(fields) = value else {
            return Err(PatchError::NotAnObject);
        };
        if fields.is_empty() {
            return Err(PatchError::Empty);
        }

        let mut candidate = document_to_map(&ProfileDocument::default());
        for (key, value) in &fields {
            if !PROFILE_FIELDS.contains(&key.as_str()) {
                return Err(PatchError::UnknownField(key.clone()));
            }
            if value.is_null() {
                return Err(PatchError::InvalidValue {
                    field: key.clone(),
                    reason: "must not be null".to_string(),
                });
            }
            candidate.insert(key.clone(), value.clone());
            if let Err(e) = serde_json::from_value::<ProfileDocument>(Value::Object(candidate.clone()))
            {
                return Err(PatchError::InvalidValue {
                    field: key.clone(),
                    reason: e.to_string(),
                });
            }
        }

        Ok(Self { fields })
    }

    /// A patch covering every field of `doc`.
    pub fn from_document(doc: &ProfileDocument) -> Self {
        Self {
            fields: document_to_map(doc),
        }
    }

    /// A patch replacing one collection with its value in `doc`.
    pub fn collection(doc: &ProfileDocument, collection: CollectionName) -> Self {
        let mut fields = Map::new();
        if let Some(value) = document_to_map(doc).remove(collection.as_str()) {
            fields.insert(collection.as_str().to_string(), value);
        }
        Self { fields }
    }

    pub fn photo_url(url: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("photoUrl".to_string(), Value::String(url.into()));
        Self { fields }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Writes the patched keys over a raw stored record, leaving every other key as is.
    pub fn overlay(&self, record: Value) -> Value {
        let mut map = match record {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        for (key, value) in &self.fields {
            map.insert(key.clone(), value.clone());
        }
        Value::Object(map)
    }

    /// The document with the patched keys replaced. Arrays are replaced wholesale.
    pub fn apply_to(&self, doc: &ProfileDocument) -> Result<ProfileDocument, PatchError> {
        let merged = self.overlay(Value::Object(document_to_map(doc)));
        serde_json::from_value(merged).map_err(|e| PatchError::InvalidValue {
            field: self.keys().collect::<Vec<_>>().join(","),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::domain::seed::default_profile;
    use serde_json::json;

    #[test]
    fn overlay_keys_replace_default_and_absent_keys_fall_back() {
        let default = default_profile();

        let merged = merge_over_default(
            &default,
            json!({ "name": "Jamie", "skills": [], "bio": null }),
        );

        assert_eq!(merged.name, "Jamie");
        assert!(merged.skills.is_empty());
        assert_eq!(merged.bio, default.bio);
        assert_eq!(merged.projects, default.projects);
    }

    #[test]
    fn malformed_field_is_skipped_not_fatal() {
        let default = default_profile();

        let merged = merge_over_default(
            &default,
            json!({ "title": "Staff Engineer", "projects": "oops" }),
        );

        assert_eq!(merged.title, "Staff Engineer");
        assert_eq!(merged.projects, default.projects);
    }

    #[test]
    fn nested_nulls_and_fractional_levels_keep_the_stored_collection() {
        let default = default_profile();

        let merged = merge_with_fallbacks(
            &default,
            json!({
                "skills": [
                    { "id": "cat1", "title": "Mine", "items": [{ "id": "s1", "level": 72.5 }] },
                    { "id": "catX", "title": "Keep me", "items": null }
                ],
                "projects": [{ "id": "p1", "title": "Stored", "imageUrl": null, "category": null }],
                "certifications": [{ "id": "c1", "year": 2021 }]
            }),
        );

        assert!(merged.fallback_fields.is_empty());
        let titles: Vec<_> = merged.document.skills.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Mine", "Keep me"]);
        assert_eq!(merged.document.skills[0].items[0].level, 73);
        assert!(merged.document.skills[1].items.is_empty());
        assert_eq!(merged.document.projects[0].title, "Stored");
        assert_eq!(merged.document.projects[0].image_url, "");
        assert_eq!(merged.document.certifications[0].year, "2021");
    }

    #[test]
    fn unreadable_keys_are_reported_as_fallbacks() {
        let default = default_profile();

        let merged = merge_with_fallbacks(
            &default,
            json!({ "name": "Kept", "skills": [{ "id": "cat1", "items": [{ "level": true }] }] }),
        );

        assert_eq!(merged.document.name, "Kept");
        assert_eq!(merged.document.skills, default.skills);
        assert!(merged.is_fallback("skills"));
        assert!(!merged.is_fallback("name"));

        let garbage = merge_with_fallbacks(&default, json!("not a record"));
        assert!(garbage.is_fallback("projects"));
    }

    #[test]
    fn non_object_overlay_yields_default() {
        let default = default_profile();

        assert_eq!(merge_over_default(&default, json!([1, 2, 3])), default);
        assert_eq!(merge_over_default(&default, Value::Null), default);
    }

    #[test]
    fn patch_rejects_unknown_and_mistyped_fields() {
        assert_eq!(
            ProfilePatch::from_json(json!({ "nickname": "x" })),
            Err(PatchError::UnknownField("nickname".to_string()))
        );
        assert!(matches!(
            ProfilePatch::from_json(json!({ "skills": { "id": "cat1" } })),
            Err(PatchError::InvalidValue { .. })
        ));
        assert!(matches!(
            ProfilePatch::from_json(json!({ "bio": null })),
            Err(PatchError::InvalidValue { field, .. }) if field == "bio"
        ));
        assert_eq!(ProfilePatch::from_json(json!({})), Err(PatchError::Empty));
        assert_eq!(
            ProfilePatch::from_json(json!("name")),
            Err(PatchError::NotAnObject)
        );
    }

    #[test]
    fn patch_touches_only_its_keys() {
        let doc = default_profile();
        let patch = ProfilePatch::from_json(json!({ "name": "X" })).unwrap();

        let next = patch.apply_to(&doc).unwrap();

        assert_eq!(next.name, "X");
        assert_eq!(
            ProfileDocument {
                name: doc.name.clone(),
                ..next
            },
            doc
        );
    }

    #[test]
    fn collection_patch_carries_a_single_key() {
        let doc = default_profile();

        let patch = ProfilePatch::collection(&doc, CollectionName::Education);

        assert_eq!(patch.keys().collect::<Vec<_>>(), vec!["education"]);
        assert_eq!(
            patch.fields()["education"][0]["institution"],
            json!(doc.education[0].institution)
        );
    }

    #[test]
    fn overlay_keeps_unpatched_record_keys() {
        let patch = ProfilePatch::photo_url("data:image/png;base64,AAAA");

        let record = patch.overlay(json!({ "name": "Stored", "legacyKey": 1 }));

        assert_eq!(record["name"], "Stored");
        assert_eq!(record["legacyKey"], 1);
        assert_eq!(record["photoUrl"], "data:image/png;base64,AAAA");
    }

    #[test]
    fn full_document_patch_covers_every_field() {
        let patch = ProfilePatch::from_document(&default_profile());

        let mut keys: Vec<_> = patch.keys().collect();
        keys.sort_unstable();
        let mut expected = PROFILE_FIELDS.to_vec();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }
}
