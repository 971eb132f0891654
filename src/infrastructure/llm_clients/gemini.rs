use super::{LLMClient, ProviderFailure};
use crate::domain::llm_config::LLMConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiCandidatePart>,
}

#[derive(Deserialize)]
struct GeminiCandidatePart {
    text: Option<String>,
}

pub struct GeminiClient {
    client: reqwest::Client,
}

impl GeminiClient {
    /// `request_timeout` bounds each wait on the server, `resource_timeout`
    /// the whole attempt including the body.
    pub fn new(request_timeout: Duration, resource_timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .read_timeout(request_timeout)
            .timeout(resource_timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "Failed to build HTTP client with timeouts, using defaults");
                reqwest::Client::new()
            });
        Self { client }
    }

    fn api_key(config: &LLMConfig) -> Result<&str, ProviderFailure> {
        config
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderFailure::Transport {
                retryable: false,
                message: "Missing API key for Google provider".to_string(),
            })
    }

    fn endpoint(config: &LLMConfig, api_key: &str) -> Result<url::Url, ProviderFailure> {
        let base_url = config.base_url.trim_end_matches('/');
        let raw = format!(
            "{}/v1beta/models/{}:generateContent",
            base_url,
            config.model.id()
        );
        url::Url::parse_with_params(&raw, &[("key", api_key)]).map_err(|e| {
            ProviderFailure::Transport {
                retryable: false,
                message: format!("Invalid endpoint URL: {}", e),
            }
        })
    }

    fn classify_transport(err: reqwest::Error) -> ProviderFailure {
        let retryable = err.is_timeout() || err.is_connect() || err.is_request();
        ProviderFailure::Transport {
            retryable,
            message: err.without_url().to_string(),
        }
    }

    fn extract_text(body: &str) -> Result<String, ProviderFailure> {
        let json: GeminiResponse = serde_json::from_str(body)
            .map_err(|e| ProviderFailure::Malformed(format!("Failed to parse JSON: {}", e)))?;

        json.candidates
            .as_ref()
            .and_then(|candidates| candidates.first())
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.clone())
            .ok_or_else(|| ProviderFailure::Malformed("Invalid response format".to_string()))
    }
}

#[async_trait]
impl LLMClient for GeminiClient {
    async fn generate(
        &self,
        config: &LLMConfig,
        system: &str,
        user: &str,
    ) -> Result<String, ProviderFailure> {
        let api_key = Self::api_key(config)?;
        let url = Self::endpoint(config, api_key)?;

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: user.to_string(),
                }],
            }],
            system_instruction: (!system.trim().is_empty()).then(|| GeminiContent {
                parts: vec![GeminiPart {
                    text: system.to_string(),
                }],
            }),
            generation_config: Some(GenerationConfig {
                temperature: config.temperature.unwrap_or(0.1) as f64,
            }),
        };

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(Self::classify_transport)?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(Self::classify_transport)?;

        debug!(status, model = %config.model, "Gemini response received");

        if status != 200 {
            return Err(ProviderFailure::Status { code: status, body: text });
        }

        Self::extract_text(&text)
    }
}
