use std::sync::{Arc, RwLock};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::application::use_cases::selection_capture::SelectionSource;
use crate::application::use_cases::translate::Translator;
use crate::domain::error::TranslationError;
use crate::domain::llm_config::GeminiModel;
use crate::domain::pipeline::{PipelinePhase, PipelineState};
use crate::domain::translation::TranslationResult;

/// Receives the outcome of every translation the pipeline runs.
pub trait ResultSink: Send + Sync {
    fn on_translated(&self, result: &TranslationResult);
    fn on_failed(&self, error: &TranslationError);
}

/// Drives trigger → capture → translate → sink, one translation at a time.
pub struct PipelineCoordinator {
    selection: Arc<dyn SelectionSource>,
    translator: Arc<dyn Translator>,
    sink: Arc<dyn ResultSink>,
    model: RwLock<GeminiModel>,
    state: watch::Sender<PipelineState>,
}

impl PipelineCoordinator {
    pub fn new(
        selection: Arc<dyn SelectionSource>,
        translator: Arc<dyn Translator>,
        sink: Arc<dyn ResultSink>,
        model: GeminiModel,
    ) -> Self {
        let (state, _) = watch::channel(PipelineState::idle());
        Self {
            selection,
            translator,
            sink,
            model: RwLock::new(model),
            state,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.state.subscribe()
    }

    pub fn model(&self) -> GeminiModel {
        match self.model.read() {
            Ok(model) => *model,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    pub fn set_model(&self, model: GeminiModel) {
        match self.model.write() {
            Ok(mut guard) => *guard = model,
            Err(poisoned) => *poisoned.into_inner() = model,
        }
        info!(model = %model, "Translation model changed");
    }

    /// Handles a gesture trigger. Returns `None` when ignored because a
    /// translation is already in flight.
    pub fn on_trigger(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.claim(PipelinePhase::Capturing, None) {
            debug!("Trigger ignored, translation already in flight");
            return None;
        }

        let this = Arc::clone(self);
        Some(tokio::spawn(async move {
            match this.selection.capture().await.filter(|text| !text.trim().is_empty()) {
                Some(text) => {
                    this.publish(PipelinePhase::Translating, Some(text.clone()));
                    this.translate(text).await;
                }
                None => {
                    debug!("Nothing selected, dropping trigger");
                    this.publish(PipelinePhase::Idle, None);
                }
            }
        }))
    }

    /// Translates text handed over directly (e.g. from a system services
    /// menu), skipping selection capture. Same single-flight rule as
    /// [`on_trigger`](Self::on_trigger).
    pub fn submit_text(self: &Arc<Self>, text: String) -> Option<JoinHandle<()>> {
        let text = text.trim().to_string();
        if text.is_empty() {
            return None;
        }
        if !self.claim(PipelinePhase::Translating, Some(text.clone())) {
            debug!("Submitted text ignored, translation already in flight");
            return None;
        }

        let this = Arc::clone(self);
        Some(tokio::spawn(async move { this.translate(text).await }))
    }

    /// Returns a finished (Done or Failed) pipeline to Idle.
    pub fn acknowledge(&self) {
        self.state.send_if_modified(|state| {
            if state.phase.is_terminal() {
                *state = PipelineState::idle();
                true
            } else {
                false
            }
        });
    }

    async fn translate(&self, text: String) {
        let model = self.model();
        match self.translator.translate(&text, model).await {
            Ok(result) => {
                self.publish(PipelinePhase::Done(result.clone()), Some(text));
                self.sink.on_translated(&result);
            }
            Err(err) => {
                self.publish(PipelinePhase::Failed(err.clone()), Some(text));
                self.sink.on_failed(&err);
            }
        }
    }

    /// Moves to `phase` unless a capture or translation is in progress.
    fn claim(&self, phase: PipelinePhase, source_text: Option<String>) -> bool {
        let mut next = Some(PipelineState::with_phase(phase, source_text));
        self.state.send_if_modified(|state| {
            if state.phase.is_busy() {
                return false;
            }
            match next.take() {
                Some(next) => {
                    *state = next;
                    true
                }
                None => false,
            }
        })
    }

    fn publish(&self, phase: PipelinePhase, source_text: Option<String>) {
        self.state
            .send_replace(PipelineState::with_phase(phase, source_text));
    }
}
