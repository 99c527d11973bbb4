//! LlmClient trait definition

use async_trait::async_trait;
#[allow(unused_imports)]
use tracing::debug;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless responder client - each call is independent
///
/// This is the external-collaborator boundary: submit one task payload,
/// get back one raw text reply. Calls may fail with a transport error or
/// stall until the configured timeout fires.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Submit a single task and wait for the raw text reply
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
