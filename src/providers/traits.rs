use super::types::{Completion, CompletionRequest};
use crate::error::CompletionError;
use async_trait::async_trait;

/// Hosted chat-completion endpoint: an ordered list of role-tagged messages
/// in, one assistant message out.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider identifier (e.g. "openai").
    fn name(&self) -> &str;

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError>;
}
