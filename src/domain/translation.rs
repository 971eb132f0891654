use serde::{Deserialize, Serialize};
use validator::Validate;

/// The two languages the translator moves text between.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "ja")]
    Japanese,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Japanese => "ja",
        }
    }

    pub fn opposite(&self) -> Language {
        match self {
            Language::English => Language::Japanese,
            Language::Japanese => Language::English,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TranslationRequest {
    #[validate(length(min = 1, max = 10000))]
    pub text: String,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
    pub detected_language: Option<Language>,
    pub target_language: Language,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl TranslationResult {
    /// Builds a result whose target is the opposite of the detected language.
    pub fn new(original_text: String, translated_text: String, detected_language: Language) -> Self {
        Self {
            original_text,
            translated_text,
            detected_language: Some(detected_language),
            target_language: detected_language.opposite(),
            created_at: chrono::Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_targets_the_other_language() {
        let result = TranslationResult::new("hi".into(), "やあ".into(), Language::English);
        assert_eq!(result.target_language, Language::Japanese);
        assert_ne!(result.detected_language, Some(result.target_language));
    }

    #[test]
    fn request_rejects_oversized_text() {
        assert!(TranslationRequest::new("a".repeat(10000)).validate().is_ok());
        assert!(TranslationRequest::new("a".repeat(10001)).validate().is_err());
    }

    #[test]
    fn language_codes_are_stable() {
        assert_eq!(Language::English.code(), "en");
        assert_eq!(Language::Japanese.code(), "ja");
    }
}
