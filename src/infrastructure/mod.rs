pub mod config;
pub mod llm_clients;
pub mod platform;
pub mod response;
pub mod security;
