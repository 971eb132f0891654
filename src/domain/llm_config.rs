use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini models the translator can be pointed at.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeminiModel {
    #[default]
    #[serde(rename = "gemini-2.0-flash-lite")]
    FlashLite,
    #[serde(rename = "gemini-2.0-flash-exp")]
    FlashExperimental,
}

impl GeminiModel {
    pub const ALL: [GeminiModel; 2] = [GeminiModel::FlashLite, GeminiModel::FlashExperimental];

    /// Resolves a model identifier, falling back to [`GeminiModel::FlashLite`]
    /// for anything unrecognised.
    pub fn from_id(id: &str) -> Self {
        match id.trim() {
            "gemini-2.0-flash-exp" => GeminiModel::FlashExperimental,
            _ => GeminiModel::FlashLite,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            GeminiModel::FlashLite => "gemini-2.0-flash-lite",
            GeminiModel::FlashExperimental => "gemini-2.0-flash-exp",
        }
    }

}

impl fmt::Display for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Everything a single `generateContent` call needs besides the prompt.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LLMConfig {
    pub base_url: String,
    pub model: GeminiModel,
    pub api_key: Option<String>,
    pub temperature: Option<f32>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: GeminiModel::default(),
            api_key: None,
            temperature: Some(0.1),
        }
    }
}
