use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TextGenerationError {
    #[error("No API key configured for the text generator")]
    MissingCredentials,

    #[error("Generator rejected the credentials: {0}")]
    Unauthorized(String),

    #[error("Generator rate limit exceeded")]
    RateLimited,

    #[error("Generator request failed: {0}")]
    Request(String),

    #[error("Generator returned no text")]
    EmptyOutput,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, TextGenerationError>;
}
