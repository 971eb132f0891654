use crate::application::use_cases::language_classifier::classify;
use crate::application::use_cases::retry::RetryPolicy;
use crate::domain::error::TranslationError;
use crate::domain::llm_config::{GeminiModel, LLMConfig};
use crate::domain::translation::{Language, TranslationRequest, TranslationResult};
use crate::infrastructure::llm_clients::{LLMClient, ProviderFailure};
use crate::infrastructure::response::clean_translation;
use crate::infrastructure::security::CredentialCache;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

pub const SYSTEM_PROMPT: &str = "You are a professional, bidirectional English-Japanese translator. Respond only with the clean, translated text.";

/// Anything that can turn source text into a [`TranslationResult`].
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        model: GeminiModel,
    ) -> Result<TranslationResult, TranslationError>;
}

/// What to do with a failed attempt.
#[derive(Debug, PartialEq, Eq)]
enum Disposition {
    Retry(TranslationError),
    Fail(TranslationError),
}

fn classify_failure(failure: ProviderFailure) -> Disposition {
    match failure {
        ProviderFailure::Status { code: 401, .. } => {
            Disposition::Fail(TranslationError::InvalidCredential)
        }
        ProviderFailure::Status { code: 429, .. } => Disposition::Retry(TranslationError::RateLimited),
        ProviderFailure::Status { code, .. } if (500..=599).contains(&code) => {
            Disposition::Fail(TranslationError::ServiceUnavailable)
        }
        ProviderFailure::Status { code, .. } => {
            Disposition::Fail(TranslationError::Transport(format!("HTTP {}", code)))
        }
        ProviderFailure::Transport { retryable, message } => {
            let err = TranslationError::Transport(message);
            if retryable {
                Disposition::Retry(err)
            } else {
                Disposition::Fail(err)
            }
        }
        ProviderFailure::Malformed(_) => Disposition::Fail(TranslationError::InvalidResponse),
    }
}

pub fn build_user_prompt(text: &str, source: Language) -> String {
    let direction = match source {
        Language::Japanese => "Japanese to English",
        Language::English => "English to Japanese",
    };

    format!(
        "Translate the following text from {direction}. Provide ONLY the translated text, with absolutely no explanations, notes, or original text repeated.\n\nText to translate: \"\"\"{text}\"\"\"\n\nRemember: Output ONLY the translation, nothing else."
    )
}

pub struct TranslateUseCase {
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    credentials: Arc<CredentialCache>,
    config: LLMConfig,
    retry: RetryPolicy,
}

impl TranslateUseCase {
    pub fn new(
        llm_client: Arc<dyn LLMClient + Send + Sync>,
        credentials: Arc<CredentialCache>,
        config: LLMConfig,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            llm_client,
            credentials,
            config,
            retry,
        }
    }

    pub fn credentials(&self) -> &Arc<CredentialCache> {
        &self.credentials
    }

    pub async fn execute(
        &self,
        content: &str,
        model: GeminiModel,
    ) -> Result<TranslationResult, TranslationError> {
        let api_key = self
            .credentials
            .get()
            .ok_or(TranslationError::NoCredential)?;

        if content.trim().is_empty() {
            return Err(TranslationError::InvalidResponse);
        }
        TranslationRequest::new(content)
            .validate()
            .map_err(|_| TranslationError::TextTooLong)?;

        let source = classify(content);
        let user_prompt = build_user_prompt(content, source);
        let config = LLMConfig {
            model,
            api_key: Some(api_key.to_string()),
            ..self.config.clone()
        };

        debug!(
            model = %model,
            source = source.code(),
            preview = %content.chars().take(50).collect::<String>(),
            "Starting translation"
        );

        let raw = self.generate_with_retry(&config, &user_prompt).await?;
        let translated = clean_translation(&raw);
        if translated.is_empty() {
            warn!("Empty translation received");
            return Err(TranslationError::InvalidResponse);
        }

        let result = TranslationResult::new(content.to_string(), translated, source);
        info!(
            source = source.code(),
            target = result.target_language.code(),
            "Translation complete"
        );
        Ok(result)
    }

    async fn generate_with_retry(
        &self,
        config: &LLMConfig,
        user_prompt: &str,
    ) -> Result<String, TranslationError> {
        let mut retries = 0;
        loop {
            let failure = match self
                .llm_client
                .generate(config, SYSTEM_PROMPT, user_prompt)
                .await
            {
                Ok(text) => return Ok(text),
                Err(failure) => failure,
            };

            match classify_failure(failure) {
                Disposition::Retry(err) if self.retry.should_retry(retries) => {
                    let delay = self.retry.delay_for(retries);
                    warn!(
                        error = %err,
                        retry = retries + 1,
                        delay_ms = delay.as_millis() as u64,
                        "Translation attempt failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    retries += 1;
                }
                Disposition::Retry(err) | Disposition::Fail(err) => {
                    warn!(error = %err, retries, "Translation failed");
                    return Err(err);
                }
            }
        }
    }
}

#[async_trait]
impl Translator for TranslateUseCase {
    async fn translate(
        &self,
        text: &str,
        model: GeminiModel,
    ) -> Result<TranslationResult, TranslationError> {
        self.execute(text, model).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::security::credentials::tests::MemorySecretStore;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    struct ScriptedClient {
        replies: Mutex<VecDeque<Result<String, ProviderFailure>>>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedClient {
        fn new(replies: Vec<Result<String, ProviderFailure>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LLMClient for ScriptedClient {
        async fn generate(
            &self,
            config: &LLMConfig,
            system: &str,
            user: &str,
        ) -> Result<String, ProviderFailure> {
            assert_eq!(system, SYSTEM_PROMPT);
            self.calls
                .lock()
                .unwrap()
                .push((config.model.id().to_string(), user.to_string()));
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ProviderFailure::Malformed("script exhausted".into())))
        }
    }

    fn status(code: u16) -> Result<String, ProviderFailure> {
        Err(ProviderFailure::Status {
            code,
            body: String::new(),
        })
    }

    fn use_case(client: Arc<ScriptedClient>, with_key: bool) -> TranslateUseCase {
        let store = if with_key {
            MemorySecretStore::with("gemini_api_key", "test-key")
        } else {
            MemorySecretStore::default()
        };
        let credentials = Arc::new(CredentialCache::new(Arc::new(store), "gemini_api_key"));
        TranslateUseCase::new(
            client,
            credentials,
            LLMConfig::default(),
            RetryPolicy::new(3, Duration::from_millis(5)),
        )
    }

    #[tokio::test]
    async fn translates_english_to_japanese() {
        let client = ScriptedClient::new(vec![Ok("  こんにちは、世界  \n".to_string())]);
        let result = use_case(client.clone(), true)
            .execute("Hello, world", GeminiModel::FlashLite)
            .await
            .unwrap();

        assert_eq!(result.translated_text, "こんにちは、世界");
        assert_eq!(result.original_text, "Hello, world");
        assert_eq!(result.detected_language, Some(Language::English));
        assert_eq!(result.target_language, Language::Japanese);

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls[0].0, "gemini-2.0-flash-lite");
        assert!(calls[0].1.contains("English to Japanese"));
        assert!(calls[0].1.contains("\"\"\"Hello, world\"\"\""));
    }

    #[tokio::test]
    async fn japanese_source_targets_english() {
        let client = ScriptedClient::new(vec![Ok("Good morning".to_string())]);
        let result = use_case(client.clone(), true)
            .execute("おはようございます", GeminiModel::FlashExperimental)
            .await
            .unwrap();

        assert_eq!(result.target_language, Language::English);
        let calls = client.calls.lock().unwrap();
        assert_eq!(calls[0].0, "gemini-2.0-flash-exp");
        assert!(calls[0].1.contains("Japanese to English"));
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_call() {
        let client = ScriptedClient::new(vec![]);
        let err = use_case(client.clone(), false)
            .execute("Hello", GeminiModel::FlashLite)
            .await
            .unwrap_err();
        assert_eq!(err, TranslationError::NoCredential);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn blank_text_is_invalid_without_network() {
        let client = ScriptedClient::new(vec![]);
        let uc = use_case(client.clone(), true);
        assert_eq!(
            uc.execute("", GeminiModel::FlashLite).await.unwrap_err(),
            TranslationError::InvalidResponse
        );
        assert_eq!(
            uc.execute(" \n ", GeminiModel::FlashLite).await.unwrap_err(),
            TranslationError::InvalidResponse
        );
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn oversized_text_is_rejected() {
        let client = ScriptedClient::new(vec![]);
        let err = use_case(client.clone(), true)
            .execute(&"a".repeat(10_001), GeminiModel::FlashLite)
            .await
            .unwrap_err();
        assert_eq!(err, TranslationError::TextTooLong);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn unauthorized_is_never_retried() {
        let client = ScriptedClient::new(vec![status(401), Ok("unused".into())]);
        let err = use_case(client.clone(), true)
            .execute("Hello", GeminiModel::FlashLite)
            .await
            .unwrap_err();
        assert_eq!(err, TranslationError::InvalidCredential);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn rate_limit_retries_then_succeeds() {
        let client = ScriptedClient::new(vec![
            status(429),
            status(429),
            status(429),
            Ok("こんにちは".into()),
        ]);
        let result = use_case(client.clone(), true)
            .execute("Hello", GeminiModel::FlashLite)
            .await
            .unwrap();
        assert_eq!(result.translated_text, "こんにちは");
        assert_eq!(client.call_count(), 4);
    }

    #[tokio::test]
    async fn rate_limit_exhaustion_reports_rate_limited() {
        let client = ScriptedClient::new(vec![status(429); 5]);
        let err = use_case(client.clone(), true)
            .execute("Hello", GeminiModel::FlashLite)
            .await
            .unwrap_err();
        assert_eq!(err, TranslationError::RateLimited);
        assert_eq!(client.call_count(), 4);
    }

    #[tokio::test]
    async fn server_errors_are_terminal() {
        let client = ScriptedClient::new(vec![status(503), Ok("unused".into())]);
        let err = use_case(client.clone(), true)
            .execute("Hello", GeminiModel::FlashLite)
            .await
            .unwrap_err();
        assert_eq!(err, TranslationError::ServiceUnavailable);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn other_statuses_carry_the_code() {
        let client = ScriptedClient::new(vec![status(404)]);
        let err = use_case(client, true)
            .execute("Hello", GeminiModel::FlashLite)
            .await
            .unwrap_err();
        assert_eq!(err, TranslationError::Transport("HTTP 404".to_string()));
    }

    #[tokio::test]
    async fn retryable_transport_failures_are_retried() {
        let timeout = || {
            Err(ProviderFailure::Transport {
                retryable: true,
                message: "operation timed out".into(),
            })
        };
        let client = ScriptedClient::new(vec![timeout(), timeout(), Ok("やあ".into())]);
        let result = use_case(client.clone(), true)
            .execute("Hi", GeminiModel::FlashLite)
            .await
            .unwrap();
        assert_eq!(result.translated_text, "やあ");
        assert_eq!(client.call_count(), 3);
    }

    #[tokio::test]
    async fn non_retryable_transport_failures_fail_fast() {
        let client = ScriptedClient::new(vec![Err(ProviderFailure::Transport {
            retryable: false,
            message: "invalid certificate".into(),
        })]);
        let err = use_case(client.clone(), true)
            .execute("Hi", GeminiModel::FlashLite)
            .await
            .unwrap_err();
        assert_eq!(err, TranslationError::Transport("invalid certificate".into()));
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn malformed_or_empty_output_is_invalid_response() {
        let client = ScriptedClient::new(vec![Err(ProviderFailure::Malformed("x".into()))]);
        let err = use_case(client, true)
            .execute("Hi", GeminiModel::FlashLite)
            .await
            .unwrap_err();
        assert_eq!(err, TranslationError::InvalidResponse);

        let client = ScriptedClient::new(vec![Ok("  <think>hmm</think> ".into())]);
        let err = use_case(client, true)
            .execute("Hi", GeminiModel::FlashLite)
            .await
            .unwrap_err();
        assert_eq!(err, TranslationError::InvalidResponse);
    }

    #[test]
    fn failure_classification_table() {
        assert_eq!(
            classify_failure(ProviderFailure::Status { code: 500, body: String::new() }),
            Disposition::Fail(TranslationError::ServiceUnavailable)
        );
        assert_eq!(
            classify_failure(ProviderFailure::Status { code: 429, body: String::new() }),
            Disposition::Retry(TranslationError::RateLimited)
        );
        assert_eq!(
            classify_failure(ProviderFailure::Status { code: 401, body: String::new() }),
            Disposition::Fail(TranslationError::InvalidCredential)
        );
    }
}
