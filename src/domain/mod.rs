pub mod error;
pub mod gesture;
pub mod llm_config;
pub mod pipeline;
pub mod translation;
