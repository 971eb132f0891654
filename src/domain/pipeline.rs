use serde::{Deserialize, Serialize};

use crate::domain::error::TranslationError;
use crate::domain::translation::TranslationResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PipelinePhase {
    Idle,
    Capturing,
    Translating,
    Done(TranslationResult),
    Failed(TranslationError),
}

impl PipelinePhase {
    pub fn is_busy(&self) -> bool {
        matches!(self, PipelinePhase::Capturing | PipelinePhase::Translating)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelinePhase::Done(_) | PipelinePhase::Failed(_))
    }
}

/// Snapshot of the capture-and-translate pipeline handed to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineState {
    pub phase: PipelinePhase,
    pub source_text: Option<String>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl PipelineState {
    pub fn idle() -> Self {
        Self::with_phase(PipelinePhase::Idle, None)
    }

    pub fn with_phase(phase: PipelinePhase, source_text: Option<String>) -> Self {
        Self {
            phase,
            source_text,
            updated_at: chrono::Utc::now(),
        }
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::idle()
    }
}
