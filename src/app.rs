use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::application::use_cases::pipeline::{PipelineCoordinator, ResultSink};
use crate::application::use_cases::retry::RetryPolicy;
use crate::application::use_cases::selection_capture::SelectionCapture;
use crate::application::use_cases::translate::TranslateUseCase;
use crate::domain::error::Result;
use crate::domain::gesture::Chord;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::llm_clients::GeminiClient;
use crate::infrastructure::platform::{
    Accessibility, ArboardClipboard, Clipboard, ClipboardOnlyAccessibility, EnigoKeystrokes,
    KeystrokeInjector,
};
use crate::infrastructure::security::{CredentialCache, KeyringSecretStore, SecretStore};
use crate::interfaces::shortcuts::{parse_chord, ShortcutMonitor};

/// Installs the global `tracing` subscriber. `RUST_LOG` wins over `filter`.
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
}

/// The OS capabilities the pipeline runs against.
#[derive(Clone)]
pub struct Platform {
    pub accessibility: Arc<dyn Accessibility>,
    pub clipboard: Arc<dyn Clipboard>,
    pub keystrokes: Arc<dyn KeystrokeInjector>,
}

impl Platform {
    /// Clipboard and keystroke adapters for the current desktop. Selected
    /// text is always read through the clipboard.
    pub fn native() -> Self {
        Self {
            accessibility: Arc::new(ClipboardOnlyAccessibility::default()),
            clipboard: Arc::new(ArboardClipboard),
            keystrokes: Arc::new(EnigoKeystrokes),
        }
    }
}

/// Fully wired application: credentials, translator, pipeline and gesture
/// monitor.
pub struct HermesApp {
    pub config: AppConfig,
    pub credentials: Arc<CredentialCache>,
    pub coordinator: Arc<PipelineCoordinator>,
    pub monitor: Arc<ShortcutMonitor>,
}

impl HermesApp {
    /// Builds against the OS keychain.
    pub fn build(config: AppConfig, platform: Platform, sink: Arc<dyn ResultSink>) -> Result<Self> {
        let secrets: Arc<dyn SecretStore> =
            Arc::new(KeyringSecretStore::new(&config.secrets.service));
        Self::build_with_secrets(config, platform, secrets, sink)
    }

    pub fn build_with_secrets(
        config: AppConfig,
        platform: Platform,
        secrets: Arc<dyn SecretStore>,
        sink: Arc<dyn ResultSink>,
    ) -> Result<Self> {
        let chord = parse_chord(&config.gesture.chord)?;

        let credentials = Arc::new(CredentialCache::new(
            secrets,
            &config.secrets.credential_name,
        ));
        let client = Arc::new(GeminiClient::new(
            config.provider.request_timeout(),
            config.provider.resource_timeout(),
        ));
        let translator = Arc::new(TranslateUseCase::new(
            client,
            credentials.clone(),
            config.provider.llm_config(),
            RetryPolicy::from_settings(&config.retry),
        ));

        let capture = Arc::new(SelectionCapture::new(
            platform.accessibility.clone(),
            platform.clipboard,
            platform.keystrokes,
            Chord::copy(),
            &config.capture,
        ));

        let coordinator = Arc::new(PipelineCoordinator::new(
            capture,
            translator,
            sink,
            config.provider.model(),
        ));

        let monitor = Arc::new(ShortcutMonitor::new(
            platform.accessibility,
            coordinator.clone(),
            chord,
            config.gesture.window(),
            config.gesture.channel_capacity,
        ));

        Ok(Self {
            config,
            credentials,
            coordinator,
            monitor,
        })
    }

    /// Starts monitoring if permitted and begins polling for permission
    /// changes. Must be called inside a Tokio runtime. The keychain is not
    /// touched until the first translation needs the API key.
    pub fn start(&self) -> JoinHandle<()> {
        if !self.monitor.start() {
            info!("Waiting for input monitoring permission");
        }
        self.monitor
            .spawn_permission_watch(self.config.gesture.permission_poll_interval())
    }

    pub fn shutdown(&self) {
        self.monitor.stop();
    }
}
