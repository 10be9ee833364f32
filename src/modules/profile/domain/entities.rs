use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use serde_with::{serde_as, DefaultOnNull, DeserializeAs, SerializeAs};
use std::collections::BTreeMap;
use utoipa::ToSchema;

use super::collection_editor::{SKILL_LEVEL_MAX, SKILL_LEVEL_MIN};

/// The single aggregate holding all portfolio content.
///
/// Field names on the wire follow the stored document (`brandName`, `photoUrl`, ...),
/// so documents written by earlier versions of the site load unchanged.
#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileDocument {
    #[serde_as(as = "LenientText")]
    pub name: String,
    #[serde_as(as = "LenientText")]
    pub title: String,
    #[serde_as(as = "LenientText")]
    pub brand_name: String,
    #[serde_as(as = "LenientText")]
    pub bio: String,
    #[serde_as(as = "LenientText")]
    pub email: String,
    #[serde_as(as = "LenientText")]
    pub phone: String,
    #[serde_as(as = "LenientText")]
    pub location: String,
    /// Image URL or an inline `data:` URL produced by a photo upload.
    #[serde_as(as = "LenientText")]
    pub photo_url: String,
    /// Platform name to profile URL. Every platform is optional.
    #[serde_as(as = "BTreeMap<_, LenientText>")]
    pub socials: BTreeMap<String, String>,
    pub skills: Vec<SkillCategory>,
    pub education: Vec<EducationEntry>,
    pub experiences: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct SkillCategory {
    #[serde_as(as = "LenientText")]
    pub id: String,
    #[serde_as(as = "LenientText")]
    pub title: String,
    #[serde_as(as = "DefaultOnNull")]
    pub items: Vec<SkillItem>,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct SkillItem {
    #[serde_as(as = "LenientText")]
    pub id: String,
    #[serde_as(as = "LenientText")]
    pub name: String,
    /// Proficiency percentage, 0..=100.
    #[serde_as(as = "LenientLevel")]
    pub level: i32,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct EducationEntry {
    #[serde_as(as = "LenientText")]
    pub id: String,
    #[serde_as(as = "LenientText")]
    pub institution: String,
    #[serde_as(as = "LenientText")]
    pub degree: String,
    #[serde_as(as = "LenientText")]
    pub duration: String,
    #[serde_as(as = "LenientText")]
    pub location: String,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct ExperienceEntry {
    #[serde_as(as = "LenientText")]
    pub id: String,
    #[serde_as(as = "LenientText")]
    pub company: String,
    #[serde_as(as = "LenientText")]
    pub role: String,
    #[serde_as(as = "LenientText")]
    pub duration: String,
    #[serde(rename = "desc")]
    #[serde_as(as = "LenientText")]
    pub description: String,
    #[serde(rename = "type")]
    #[serde_as(as = "LenientText")]
    pub employment_type: String,
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectEntry {
    #[serde_as(as = "LenientText")]
    pub id: String,
    #[serde_as(as = "LenientText")]
    pub title: String,
    #[serde(rename = "type")]
    #[serde_as(as = "LenientText")]
    pub kind: String,
    #[schema(value_type = String, example = "Personal Project")]
    #[serde_as(as = "DefaultOnNull")]
    pub category: ProjectCategory,
    #[serde_as(as = "LenientText")]
    pub image_url: String,
    #[serde_as(as = "LenientText")]
    pub tech_front: String,
    #[serde_as(as = "LenientText")]
    pub tech_back: String,
    #[serde_as(as = "LenientText")]
    pub tech_db: String,
    #[serde_as(as = "LenientText")]
    pub link: String,
    #[serde_as(as = "LenientText")]
    pub status: String,
    #[serde(rename = "desc")]
    #[serde_as(as = "LenientText")]
    pub description: String,
}

/// UI grouping of projects. Unknown tags are kept verbatim so a save never rewrites them.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ProjectCategory {
    #[default]
    Personal,
    Official,
    Other(String),
}

impl ProjectCategory {
    pub const PERSONAL: &'static str = "Personal Project";
    pub const OFFICIAL: &'static str = "Official Project";
    const LEGACY_PERSONAL: &'static str = "Side Project";

    pub fn as_str(&self) -> &str {
        match self {
            ProjectCategory::Personal => Self::PERSONAL,
            ProjectCategory::Official => Self::OFFICIAL,
            ProjectCategory::Other(tag) => tag,
        }
    }
}

impl From<String> for ProjectCategory {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "" | Self::PERSONAL | Self::LEGACY_PERSONAL => ProjectCategory::Personal,
            Self::OFFICIAL => ProjectCategory::Official,
            _ => ProjectCategory::Other(tag),
        }
    }
}

impl From<ProjectCategory> for String {
    fn from(category: ProjectCategory) -> Self {
        match category {
            ProjectCategory::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

#[serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct CertificationEntry {
    #[serde_as(as = "LenientText")]
    pub id: String,
    #[serde_as(as = "LenientText")]
    pub name: String,
    #[serde_as(as = "LenientText")]
    pub issuer: String,
    #[serde_as(as = "LenientText")]
    pub year: String,
    /// Optional theme token used by the certificate card.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "pdfUrl")]
    #[serde_as(as = "LenientText")]
    pub credential_url: String,
}

/// Generates a timestamp-derived id for a new collection entry.
pub fn new_entry_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

/// Text field read from whatever scalar the stored record holds. `null` reads as empty.
pub struct LenientText;

impl<'de> DeserializeAs<'de, String> for LenientText {
    fn deserialize_as<D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None => Ok(String::new()),
            Some(Value::String(text)) => Ok(text),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(other) => Err(de::Error::invalid_type(
                de::Unexpected::Other(json_kind(&other)),
                &"a string",
            )),
        }
    }
}

impl SerializeAs<String> for LenientText {
    fn serialize_as<S>(source: &String, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(source)
    }
}

/// Skill level read from any number, rounded and clamped to 0..=100. `null` reads as 0.
pub struct LenientLevel;

impl<'de> DeserializeAs<'de, i32> for LenientLevel {
    fn deserialize_as<D>(deserializer: D) -> Result<i32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level = match Option::<Value>::deserialize(deserializer)? {
            None => return Ok(SKILL_LEVEL_MIN),
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            Some(_) => None,
        };
        level
            .filter(|l| l.is_finite())
            .map(|l| l.round().clamp(f64::from(SKILL_LEVEL_MIN), f64::from(SKILL_LEVEL_MAX)) as i32)
            .ok_or_else(|| de::Error::custom("skill level must be a number"))
    }
}

impl SerializeAs<i32> for LenientLevel {
    fn serialize_as<S>(source: &i32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i32(*source)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        _ => "scalar",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_default_to_empty() {
        let doc: ProfileDocument = serde_json::from_value(json!({ "name": "Ada" })).unwrap();

        assert_eq!(doc.name, "Ada");
        assert!(doc.skills.is_empty());
        assert!(doc.projects.is_empty());
        assert!(doc.socials.is_empty());
    }

    #[test]
    fn legacy_field_names_are_read() {
        let doc: ProfileDocument = serde_json::from_value(json!({
            "brandName": "DevAda",
            "experiences": [{ "id": "1", "company": "Acme", "desc": "Built things", "type": "Vendor" }],
            "certifications": [{ "id": "c1", "name": "Cert", "pdfUrl": "https://x/cert.pdf" }]
        }))
        .unwrap();

        assert_eq!(doc.brand_name, "DevAda");
        assert_eq!(doc.experiences[0].description, "Built things");
        assert_eq!(doc.experiences[0].employment_type, "Vendor");
        assert_eq!(doc.certifications[0].credential_url, "https://x/cert.pdf");
        assert_eq!(doc.certifications[0].color, None);
    }

    #[test]
    fn project_category_accepts_legacy_and_unknown_tags() {
        let projects: Vec<ProjectEntry> = serde_json::from_value(json!([
            { "id": "p1", "category": "Side Project" },
            { "id": "p2", "category": "Official Project" },
            { "id": "p3", "category": "Hackathon" },
            { "id": "p4" }
        ]))
        .unwrap();

        assert_eq!(projects[0].category, ProjectCategory::Personal);
        assert_eq!(projects[1].category, ProjectCategory::Official);
        assert_eq!(
            projects[2].category,
            ProjectCategory::Other("Hackathon".to_string())
        );
        assert_eq!(projects[3].category, ProjectCategory::Personal);

        let written = serde_json::to_value(&projects[2]).unwrap();
        assert_eq!(written["category"], "Hackathon");
        let written = serde_json::to_value(&projects[0]).unwrap();
        assert_eq!(written["category"], "Personal Project");
    }
}
