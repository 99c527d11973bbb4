//! LLM request/response types
//!
//! Each request is a single self-contained task payload; no conversation
//! state is carried between calls.

use tracing::debug;

/// A completion request - everything needed for one responder call
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Rendered task payload
    pub prompt: String,

    /// Max tokens for the reply (from config)
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Create a request for a rendered task payload
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        let prompt = prompt.into();
        debug!(prompt_len = prompt.len(), %max_tokens, "CompletionRequest::new: called");
        Self { prompt, max_tokens }
    }
}

/// The raw text reply to a completion request
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Reply text as returned by the responder
    pub content: String,
}
