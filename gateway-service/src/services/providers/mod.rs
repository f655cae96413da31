//! Text generation provider abstraction.
//!
//! The handler depends only on [`TextProvider`], so the Gemini backend can be
//! swapped for the mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use secrecy::Secret;
use thiserror::Error;

/// Error type for provider operations.
///
/// The display string is returned to clients as the diagnostic detail of a
/// failed generation, so keep it free of secrets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Content filtered: {0}")]
    ContentFiltered(String),

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Low-cardinality label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited(_) => "rate_limited",
            ProviderError::ContentFiltered(_) => "content_filtered",
            ProviderError::EmptyResponse => "empty_response",
            ProviderError::InvalidResponse(_) => "invalid_response",
            ProviderError::NetworkError(_) => "network_error",
        }
    }
}

/// What gets sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationInput {
    /// A bare prompt string, sent without a role.
    Text(String),
    /// A structured single-turn message from the user.
    UserMessage(String),
}

impl GenerationInput {
    pub fn text(&self) -> &str {
        match self {
            GenerationInput::Text(text) | GenerationInput::UserMessage(text) => text,
        }
    }
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Short provider name for logs and metrics.
    fn name(&self) -> &'static str;

    /// Generate a single text response. Called at most once per request;
    /// implementations must not retry.
    async fn generate(
        &self,
        credential: &Secret<String>,
        model: &str,
        input: &GenerationInput,
    ) -> Result<String, ProviderError>;
}
