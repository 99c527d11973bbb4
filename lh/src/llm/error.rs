//! LLM error types

use thiserror::Error;

/// Errors that can occur while talking to the responder
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl LlmError {
    /// Check if this error is retryable at the adapter boundary
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::ApiError { status, .. } => matches!(status, 408 | 429) || *status >= 500,
            LlmError::Network(_) => true,
            LlmError::InvalidResponse(_) => false,
        }
    }
}
