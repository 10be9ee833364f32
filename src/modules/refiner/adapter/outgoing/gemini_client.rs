use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error};

use crate::modules::refiner::application::ports::outgoing::{TextGenerationError, TextGenerator};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_url: GEMINI_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GeminiConfig {
    /// Key from `GEMINI_API_KEY`, then `GOOGLE_GENAI_API_KEY`.
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let timeout_secs = non_empty("GEMINI_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("GOOGLE_GENAI_API_KEY")),
            model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_url: non_empty("GEMINI_API_BASE_URL").unwrap_or_else(|| GEMINI_API_URL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Google Gemini `generateContent` client
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http_client,
            config,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Points the client at another endpoint (for testing)
    #[cfg(test)]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.config.api_url = url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn handle_error_status(response: reqwest::Response) -> TextGenerationError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!(status = %status, "Gemini request failed");

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                TextGenerationError::Unauthorized(body)
            }
            StatusCode::TOO_MANY_REQUESTS => TextGenerationError::RateLimited,
            _ => TextGenerationError::Request(format!("HTTP {status}: {body}")),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, TextGenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(TextGenerationError::MissingCredentials)?;

        debug!(model = %self.config.model, "Calling Gemini generateContent");

        let response = self
            .http_client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&json!({
                "contents": [{ "role": "user", "parts": [{ "text": prompt }] }]
            }))
            .send()
            .await
            .map_err(|e| TextGenerationError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::handle_error_status(response).await);
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TextGenerationError::Request(format!("Invalid response: {e}")))?;

        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(TextGenerationError::EmptyOutput);
        }
        Ok(text)
    }
}
