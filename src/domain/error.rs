use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppError {
    ValidationError(String),
    ConfigError(String),
    SecurityError(String),
    ClipboardError(String),
    InputError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Config error: {}", msg),
            AppError::SecurityError(msg) => write!(f, "Security error: {}", msg),
            AppError::ClipboardError(msg) => write!(f, "Clipboard error: {}", msg),
            AppError::InputError(msg) => write!(f, "Input error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Failure of a translation attempt, as reported to the user.
///
/// Credential errors carry a call-to-action; everything else is shown
/// as-is. `Transport` keeps a description of the underlying cause.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TranslationError {
    NoCredential,
    InvalidCredential,
    InvalidResponse,
    TextTooLong,
    RateLimited,
    ServiceUnavailable,
    Transport(String),
}

impl TranslationError {
    pub fn is_credential_error(&self) -> bool {
        matches!(
            self,
            TranslationError::NoCredential | TranslationError::InvalidCredential
        )
    }
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::NoCredential => write!(
                f,
                "No API key configured. Please add your Gemini API key in settings."
            ),
            TranslationError::InvalidCredential => write!(
                f,
                "Invalid API key. Please check your Gemini API key in settings."
            ),
            TranslationError::InvalidResponse => {
                write!(f, "Invalid response from translation service.")
            }
            TranslationError::TextTooLong => write!(f, "Text is too long for translation."),
            TranslationError::RateLimited => {
                write!(f, "Rate limit exceeded. Please try again later.")
            }
            TranslationError::ServiceUnavailable => {
                write!(f, "Translation service is temporarily unavailable.")
            }
            TranslationError::Transport(cause) => write!(f, "Network error: {}", cause),
        }
    }
}

impl std::error::Error for TranslationError {}
