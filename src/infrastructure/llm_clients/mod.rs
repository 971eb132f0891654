pub mod gemini;

use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use std::fmt;

pub use gemini::GeminiClient;

/// Why a single provider call did not produce text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderFailure {
    /// The provider answered with a non-200 status.
    Status { code: u16, body: String },
    /// The request never produced a response. `retryable` marks timeouts
    /// and connection failures.
    Transport { retryable: bool, message: String },
    /// A 200 response whose body did not have the expected shape.
    Malformed(String),
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderFailure::Status { code, body } => write!(f, "API error ({}): {}", code, body),
            ProviderFailure::Transport { message, .. } => write!(f, "Request failed: {}", message),
            ProviderFailure::Malformed(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for ProviderFailure {}

#[async_trait]
pub trait LLMClient {
    /// Performs exactly one request; retrying is the caller's business.
    async fn generate(
        &self,
        config: &LLMConfig,
        system: &str,
        user: &str,
    ) -> std::result::Result<String, ProviderFailure>;
}
