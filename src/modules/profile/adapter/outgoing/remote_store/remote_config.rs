use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RemoteStoreConfig {
    pub project_id: String,
    pub api_key: String,
    pub database_id: String,
    pub api_base_url: String,
    pub collection: String,
    pub document_id: String,
    pub poll_interval: Duration,
}

impl Default for RemoteStoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: String::new(),
            database_id: Self::DEFAULT_DATABASE_ID.to_string(),
            api_base_url: Self::DEFAULT_API_BASE_URL.to_string(),
            collection: Self::DEFAULT_COLLECTION.to_string(),
            document_id: Self::DEFAULT_DOCUMENT_ID.to_string(),
            poll_interval: Duration::from_secs(Self::DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

fn env_or(name: &str, fallback: &str) -> String {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

impl RemoteStoreConfig {
    pub const DEFAULT_DATABASE_ID: &'static str = "(default)";
    pub const DEFAULT_API_BASE_URL: &'static str = "https://firestore.googleapis.com/v1";
    pub const DEFAULT_COLLECTION: &'static str = "profiles";
    pub const DEFAULT_DOCUMENT_ID: &'static str = "main";
    pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

    /// Missing variables leave the config unconfigured rather than failing.
    pub fn from_env() -> Self {
        let poll_interval_secs = std::env::var("PROFILE_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(Self::DEFAULT_POLL_INTERVAL_SECS);

        Self {
            project_id: env_or("FIREBASE_PROJECT_ID", ""),
            api_key: env_or("FIREBASE_API_KEY", ""),
            database_id: env_or("FIREBASE_DATABASE_ID", Self::DEFAULT_DATABASE_ID),
            api_base_url: env_or("FIREBASE_API_BASE_URL", Self::DEFAULT_API_BASE_URL),
            collection: env_or("PROFILE_COLLECTION", Self::DEFAULT_COLLECTION),
            document_id: env_or("PROFILE_DOCUMENT_ID", Self::DEFAULT_DOCUMENT_ID),
            poll_interval: Duration::from_secs(poll_interval_secs),
        }
    }

    /// Placeholder values copied from a sample env file do not count as configured.
    pub fn is_configured(&self) -> bool {
        self.project_id.len() > 5
            && !self.project_id.contains("replace_with")
            && !self.api_key.is_empty()
            && !self.api_key.contains("REPLACE")
    }

    /// REST path of the profile document, relative to the API base URL.
    pub fn document_path(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents/{}/{}",
            self.project_id, self.database_id, self.collection, self.document_id
        )
    }

    pub fn document_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.document_path()
        )
    }
}
