use std::path::Path;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::Result;
use crate::domain::llm_config::{GeminiModel, LLMConfig, DEFAULT_BASE_URL};

pub const DEFAULT_CONFIG_FILE: &str = "hermes.toml";
pub const ENV_PREFIX: &str = "HERMES_";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub request_timeout_secs: u64,
    pub resource_timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: GeminiModel::default().id().to_string(),
            temperature: 0.1,
            request_timeout_secs: 30,
            resource_timeout_secs: 60,
        }
    }
}

impl ProviderSettings {
    pub fn model(&self) -> GeminiModel {
        GeminiModel::from_id(&self.model)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn resource_timeout(&self) -> Duration {
        Duration::from_secs(self.resource_timeout_secs)
    }

    pub fn llm_config(&self) -> LLMConfig {
        LLMConfig {
            base_url: self.base_url.clone(),
            model: self.model(),
            api_key: None,
            temperature: Some(self.temperature),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RetrySettings {
    pub max_retries: u32,
    pub base_delay_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GestureSettings {
    pub chord: String,
    pub window_ms: u64,
    pub permission_poll_ms: u64,
    pub channel_capacity: usize,
}

impl Default for GestureSettings {
    fn default() -> Self {
        let chord = if cfg!(target_os = "macos") {
            "Cmd+C"
        } else {
            "Ctrl+C"
        };
        Self {
            chord: chord.to_string(),
            window_ms: 500,
            permission_poll_ms: 2000,
            channel_capacity: 256,
        }
    }
}

impl GestureSettings {
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    pub fn permission_poll_interval(&self) -> Duration {
        Duration::from_millis(self.permission_poll_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptureSettings {
    pub settle_delay_ms: u64,
    pub restore_delay_ms: u64,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            settle_delay_ms: 150,
            restore_delay_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecretSettings {
    pub service: String,
    pub credential_name: String,
}

impl Default for SecretSettings {
    fn default() -> Self {
        Self {
            service: "com.hermes.HermesApp".to_string(),
            credential_name: "gemini_api_key".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub provider: ProviderSettings,
    pub retry: RetrySettings,
    pub gesture: GestureSettings,
    pub capture: CaptureSettings,
    pub secrets: SecretSettings,
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Defaults, then `hermes.toml` in the working directory, then `HERMES_*`.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Defaults, then the TOML file at `path` if it exists, then `HERMES_*`
    /// environment variables (`__` separates nested keys, e.g.
    /// `HERMES_RETRY__MAX_RETRIES=5`).
    pub fn load_from(path: &Path) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let config = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(config)
    }
}
