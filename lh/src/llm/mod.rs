//! LLM responder adapter
//!
//! The boundary to the external responder: submit a task payload, get back
//! a raw text reply. Only OpenAI's Chat Completions API is implemented.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAIClient;
pub use types::{CompletionRequest, CompletionResponse};

use crate::config::LlmConfig;

/// Create a responder client from configuration and a resolved API key
pub fn create_client(config: &LlmConfig, api_key: String) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(model = %config.model, "create_client: called");
    Ok(Arc::new(OpenAIClient::new(config, api_key)?))
}
