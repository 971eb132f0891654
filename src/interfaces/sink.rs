use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::application::use_cases::pipeline::ResultSink;
use crate::domain::error::TranslationError;
use crate::domain::translation::TranslationResult;

pub const CREDENTIAL_CALL_TO_ACTION: &str = "Open settings to add or update your Gemini API key.";

/// What a presentation layer receives from the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    Translated(TranslationResult),
    Failed {
        error: TranslationError,
        /// Set for credential problems so the UI can offer a settings shortcut.
        call_to_action: Option<&'static str>,
    },
}

impl PipelineEvent {
    pub fn failed(error: TranslationError) -> Self {
        let call_to_action = error
            .is_credential_error()
            .then_some(CREDENTIAL_CALL_TO_ACTION);
        PipelineEvent::Failed {
            error,
            call_to_action,
        }
    }
}

/// Writes outcomes to the log. Useful headless and as a fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ResultSink for TracingSink {
    fn on_translated(&self, result: &TranslationResult) {
        info!(
            source = result.detected_language.map(|l| l.code()).unwrap_or("?"),
            target = result.target_language.code(),
            translated = %result.translated_text,
            "Translation ready"
        );
    }

    fn on_failed(&self, error: &TranslationError) {
        if error.is_credential_error() {
            warn!(error = %error, hint = CREDENTIAL_CALL_TO_ACTION, "Translation failed");
        } else {
            error!(error = %error, "Translation failed");
        }
    }
}

/// Forwards outcomes over a channel to whatever renders them.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<PipelineEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PipelineEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, event: PipelineEvent) {
        if self.tx.send(event).is_err() {
            warn!("Result receiver dropped, discarding pipeline event");
        }
    }
}

impl ResultSink for ChannelSink {
    fn on_translated(&self, result: &TranslationResult) {
        self.send(PipelineEvent::Translated(result.clone()));
    }

    fn on_failed(&self, error: &TranslationError) {
        self.send(PipelineEvent::failed(error.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::translation::Language;

    #[test]
    fn channel_sink_forwards_results() {
        let (sink, mut rx) = ChannelSink::new();
        let result = TranslationResult::new("Hello".into(), "こんにちは".into(), Language::English);

        sink.on_translated(&result);

        assert_eq!(rx.try_recv().unwrap(), PipelineEvent::Translated(result));
    }

    #[test]
    fn credential_failures_carry_call_to_action() {
        let (sink, mut rx) = ChannelSink::new();

        sink.on_failed(&TranslationError::NoCredential);
        sink.on_failed(&TranslationError::RateLimited);

        match rx.try_recv().unwrap() {
            PipelineEvent::Failed { call_to_action, .. } => {
                assert_eq!(call_to_action, Some(CREDENTIAL_CALL_TO_ACTION))
            }
            other => panic!("unexpected event {:?}", other),
        }
        match rx.try_recv().unwrap() {
            PipelineEvent::Failed {
                error,
                call_to_action,
            } => {
                assert_eq!(error, TranslationError::RateLimited);
                assert!(call_to_action.is_none());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn dropped_receiver_does_not_panic() {
        let (sink, rx) = ChannelSink::new();
        drop(rx);
        sink.on_failed(&TranslationError::InvalidResponse);
    }
}
