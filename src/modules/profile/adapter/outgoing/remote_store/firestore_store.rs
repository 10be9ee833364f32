use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

use super::firestore_value::{decode_fields, encode_fields};
use super::remote_config::RemoteStoreConfig;
use crate::modules::profile::adapter::outgoing::snapshot_watch::{
    SharedWatch, SnapshotSource, VersionedDocument,
};
use crate::modules::profile::application::ports::outgoing::{
    ProfileEvent, ProfileStore, ProfileStoreError, ProfileSubscription, StoreKind,
};
use crate::modules::profile::domain::seed::default_profile;
use crate::modules::profile::domain::{
    merge_with_fallbacks, MergedProfile, ProfileDocument, ProfilePatch,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const ABSENT_VERSION: &str = "absent";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FirestoreDocumentBody {
    #[serde(default)]
    fields: Value,
    #[serde(default)]
    update_time: Option<String>,
}

/// `ProfileStore` over one Firestore document, accessed through the REST API.
pub struct RemoteStore {
    document: Arc<FirestoreDocument>,
    watch: SharedWatch<FirestoreDocument>,
}

struct FirestoreDocument {
    client: Client,
    config: RemoteStoreConfig,
    changes: broadcast::Sender<VersionedDocument>,
}

impl FirestoreDocument {
    fn url(&self, field_paths: &[&str]) -> Result<Url, ProfileStoreError> {
        let mut url = Url::parse(&self.config.document_url())
            .map_err(|e| ProfileStoreError::Unavailable(format!("Invalid Firestore URL: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            for path in field_paths {
                query.append_pair("updateMask.fieldPaths", path);
            }
            query.append_pair("key", &self.config.api_key);
        }
        Ok(url)
    }

    fn ensure_configured(&self) -> Result<(), ProfileStoreError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(ProfileStoreError::NotConfigured)
        }
    }

    async fn error_for_status(response: Response) -> ProfileStoreError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!(status = %status, "Firestore rejected the request");
                ProfileStoreError::PermissionDenied(format!("HTTP {status}: {body}"))
            }
            // The same payload is rejected again on retry, e.g. a document over the size limit.
            StatusCode::BAD_REQUEST => {
                error!(status = %status, "Firestore refused the document");
                ProfileStoreError::InvalidPatch(Self::error_message(&body))
            }
            _ => {
                error!(status = %status, "Firestore request failed");
                ProfileStoreError::Unavailable(format!("HTTP {status}: {body}"))
            }
        }
    }

    /// `error.message` of a Google API error body, or the raw body.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or_else(|| body.to_string())
    }

    fn merged(body: FirestoreDocumentBody) -> (MergedProfile, String) {
        let version = body
            .update_time
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());
        (
            merge_with_fallbacks(&default_profile(), decode_fields(&body.fields)),
            version,
        )
    }

    fn versioned(body: FirestoreDocumentBody) -> VersionedDocument {
        let (merged, version) = Self::merged(body);
        VersionedDocument {
            version,
            document: merged.document,
        }
    }

    async fn patch(&self, patch: &ProfilePatch) -> Result<VersionedDocument, ProfileStoreError> {
        self.ensure_configured()?;
        if patch.is_empty() {
            return Err(ProfileStoreError::InvalidPatch(
                "patch has no fields".to_string(),
            ));
        }

        let field_paths: Vec<&str> = patch.keys().collect();
        let url = self.url(&field_paths)?;
        debug!(fields = ?field_paths, "Writing profile fields to Firestore");

        let response = self
            .client
            .patch(url)
            .json(&json!({ "fields": encode_fields(patch.fields()) }))
            .send()
            .await
            .map_err(|e| ProfileStoreError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let body: FirestoreDocumentBody = response
            .json()
            .await
            .map_err(|e| ProfileStoreError::Serialization(e.to_string()))?;
        Ok(Self::versioned(body))
    }

    async fn read_merged(&self) -> Result<(MergedProfile, String), ProfileStoreError> {
        self.ensure_configured()?;

        let response = self
            .client
            .get(self.url(&[])?)
            .send()
            .await
            .map_err(|e| ProfileStoreError::Unavailable(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok((
                merge_with_fallbacks(&default_profile(), Value::Null),
                ABSENT_VERSION.to_string(),
            ));
        }
        if !response.status().is_success() {
            return Err(Self::error_for_status(response).await);
        }

        let body: FirestoreDocumentBody = response
            .json()
            .await
            .map_err(|e| ProfileStoreError::Serialization(e.to_string()))?;
        Ok(Self::merged(body))
    }
}

#[async_trait]
impl SnapshotSource for FirestoreDocument {
    async fn read_versioned(&self) -> Result<VersionedDocument, ProfileStoreError> {
        let (merged, version) = self.read_merged().await?;
        Ok(VersionedDocument {
            version,
            document: merged.document,
        })
    }
}

impl RemoteStore {
    pub fn new(config: RemoteStoreConfig) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        let (changes, _) = broadcast::channel(16);

        if config.is_configured() {
            info!(document = %config.document_path(), "Using Firestore profile store");
        }

        let poll_interval = config.poll_interval;
        let document = Arc::new(FirestoreDocument {
            client,
            config,
            changes: changes.clone(),
        });

        Self {
            watch: SharedWatch::new(Arc::clone(&document), changes, poll_interval),
            document,
        }
    }
}

#[async_trait]
impl ProfileStore for RemoteStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Remote
    }

    fn is_configured(&self) -> bool {
        self.document.config.is_configured()
    }

    async fn load_checked(&self) -> Result<MergedProfile, ProfileStoreError> {
        Ok(self.document.read_merged().await?.0)
    }

    async fn merge_write(&self, patch: ProfilePatch) -> Result<ProfileDocument, ProfileStoreError> {
        let stored = self.document.patch(&patch).await?;
        let document = stored.document.clone();

        if self.document.changes.send(stored).is_err() {
            debug!("No remote profile watchers to notify");
        }
        Ok(document)
    }

    fn subscribe(&self) -> ProfileSubscription {
        if !self.is_configured() {
            return ProfileSubscription::from_events(vec![ProfileEvent::Error(
                ProfileStoreError::NotConfigured.to_string(),
            )]);
        }
        self.watch.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::firestore_value::encode;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DOC_PATH: &str = "/v1/projects/portfolio-test/databases/(default)/documents/profiles/main";

    fn store_for(server: &MockServer) -> RemoteStore {
        RemoteStore::new(RemoteStoreConfig {
            project_id: "portfolio-test".to_string(),
            api_key: "test-key".to_string(),
            api_base_url: format!("{}/v1", server.uri()),
            poll_interval: Duration::from_millis(20),
            ..Default::default()
        })
    }

    fn firestore_body(plain: Value, update_time: &str) -> Value {
        json!({
            "name": "projects/portfolio-test/databases/(default)/documents/profiles/main",
            "fields": encode(&plain)["mapValue"]["fields"],
            "updateTime": update_time
        })
    }

    #[tokio::test]
    async fn load_merges_stored_fields_over_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(firestore_body(
                json!({ "name": "Remote Name", "projects": [] }),
                "2024-01-01T00:00:00Z",
            )))
            .mount(&server)
            .await;

        let doc = store_for(&server).load().await.unwrap();

        assert_eq!(doc.name, "Remote Name");
        assert!(doc.projects.is_empty());
        assert_eq!(doc.skills, default_profile().skills);
    }

    #[tokio::test]
    async fn missing_document_loads_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let doc = store_for(&server).load().await.unwrap();

        assert_eq!(doc, default_profile());
    }

    #[tokio::test]
    async fn rejected_credentials_map_to_permission_denied() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("denied by rules"))
            .mount(&server)
            .await;

        let err = store_for(&server)
            .merge_write(ProfilePatch::photo_url("x"))
            .await
            .unwrap_err();

        assert!(matches!(err, ProfileStoreError::PermissionDenied(msg) if msg.contains("denied by rules")));
    }

    #[tokio::test]
    async fn oversized_document_is_rejected_as_invalid_not_retryable() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "code": 400,
                    "message": "Document exceeds the maximum allowed size of 1,048,576 bytes.",
                    "status": "INVALID_ARGUMENT"
                }
            })))
            .mount(&server)
            .await;

        let err = store_for(&server)
            .merge_write(ProfilePatch::photo_url("data:image/png;base64,AAAA"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ProfileStoreError::InvalidPatch(
                "Document exceeds the maximum allowed size of 1,048,576 bytes.".to_string()
            )
        );
    }

    #[tokio::test]
    async fn typed_doubles_and_nested_nulls_load_without_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "fields": {
                    "skills": { "arrayValue": { "values": [{ "mapValue": { "fields": {
                        "id": { "stringValue": "cat1" },
                        "title": { "stringValue": "Mine" },
                        "items": { "arrayValue": { "values": [{ "mapValue": { "fields": {
                            "id": { "stringValue": "s1" },
                            "level": { "doubleValue": 72.5 }
                        } } }] } }
                    } } }] } },
                    "projects": { "arrayValue": { "values": [{ "mapValue": { "fields": {
                        "id": { "stringValue": "p1" },
                        "imageUrl": { "nullValue": null }
                    } } }] } }
                },
                "updateTime": "2024-01-01T00:00:00Z"
            })))
            .mount(&server)
            .await;

        let merged = store_for(&server).load_checked().await.unwrap();

        assert!(merged.fallback_fields.is_empty());
        assert_eq!(merged.document.skills[0].title, "Mine");
        assert_eq!(merged.document.skills[0].items[0].level, 73);
        assert_eq!(merged.document.projects[0].id, "p1");
    }

    #[tokio::test]
    async fn server_errors_map_to_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = store_for(&server).load().await.unwrap_err();

        assert!(matches!(err, ProfileStoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn merge_write_masks_exactly_the_patched_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path(DOC_PATH))
            .and(query_param("updateMask.fieldPaths", "name"))
            .respond_with(ResponseTemplate::new(200).set_body_json(firestore_body(
                json!({ "name": "X", "bio": "Stored bio" }),
                "2024-01-02T00:00:00Z",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let doc = store_for(&server)
            .merge_write(ProfilePatch::from_json(json!({ "name": "X" })).unwrap())
            .await
            .unwrap();

        assert_eq!(doc.name, "X");
        assert_eq!(doc.bio, "Stored bio");

        let requests = server.received_requests().await.unwrap();
        let masks: Vec<String> = requests[0]
            .url
            .query_pairs()
            .filter(|(k, _)| k == "updateMask.fieldPaths")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(masks, vec!["name".to_string()]);

        let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(sent["fields"], json!({ "name": { "stringValue": "X" } }));
    }

    #[tokio::test]
    async fn unconfigured_store_does_no_network_io() {
        let server = MockServer::start().await;
        let store = RemoteStore::new(RemoteStoreConfig {
            project_id: "replace_with_your_project".to_string(),
            api_key: "REPLACE".to_string(),
            api_base_url: format!("{}/v1", server.uri()),
            ..Default::default()
        });

        assert!(!store.is_configured());
        assert_eq!(store.load().await, Err(ProfileStoreError::NotConfigured));
        assert_eq!(
            store.merge_write(ProfilePatch::photo_url("x")).await,
            Err(ProfileStoreError::NotConfigured)
        );

        let mut sub = store.subscribe();
        assert!(matches!(sub.next().await, Some(ProfileEvent::Error(_))));
        assert_eq!(sub.next().await, None);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_subscriptions_poll_firestore_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(firestore_body(
                json!({ "name": "Watched" }),
                "2024-01-01T00:00:00Z",
            )))
            .mount(&server)
            .await;
        let store = RemoteStore::new(RemoteStoreConfig {
            project_id: "portfolio-test".to_string(),
            api_key: "test-key".to_string(),
            api_base_url: format!("{}/v1", server.uri()),
            poll_interval: Duration::from_secs(3600),
            ..Default::default()
        });

        let mut first = store.subscribe();
        let mut second = store.subscribe();
        for sub in [&mut first, &mut second] {
            match sub.next().await {
                Some(ProfileEvent::Snapshot(doc)) => assert_eq!(doc.name, "Watched"),
                other => panic!("Expected snapshot, got {:?}", other),
            }
        }

        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn subscription_emits_when_update_time_changes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(firestore_body(
                json!({ "name": "First" }),
                "2024-01-01T00:00:00Z",
            )))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(firestore_body(
                json!({ "name": "Second" }),
                "2024-01-01T00:05:00Z",
            )))
            .mount(&server)
            .await;

        let store = store_for(&server);
        let mut sub = store.subscribe();

        match sub.next().await {
            Some(ProfileEvent::Snapshot(doc)) => assert_eq!(doc.name, "First"),
            other => panic!("Expected first snapshot, got {:?}", other),
        }
        match sub.next().await {
            Some(ProfileEvent::Snapshot(doc)) => assert_eq!(doc.name, "Second"),
            other => panic!("Expected second snapshot, got {:?}", other),
        }
    }
}
