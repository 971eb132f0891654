pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use crate::app::{init_tracing, HermesApp, Platform};
pub use crate::domain::error::{AppError, TranslationError};
pub use crate::domain::translation::{Language, TranslationResult};
pub use crate::infrastructure::config::AppConfig;
pub use crate::interfaces::sink::{ChannelSink, PipelineEvent, TracingSink};
