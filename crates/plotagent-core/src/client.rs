//! Model client seam
//!
//! The agent never talks to a provider directly. Callers plug in any
//! implementation of [`ModelClient`]; the returned text is untrusted and
//! goes through the ingestor.

use serde::{Deserialize, Serialize};

/// One round-trip request to a language model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRequest {
    /// Instructions for the model
    pub system: String,
    /// The user's message
    pub user: String,
}

impl PromptRequest {
    /// Create request
    #[inline]
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Failure reported by a model client
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// Provider could not be reached
    #[error("model unavailable: {0}")]
    Unavailable(String),

    /// Provider refused or failed the request
    #[error("model request failed: {0}")]
    Request(String),

    /// Request exceeded its deadline
    #[error("model request timed out after {0}ms")]
    Timeout(u64),
}

/// Source of model completions
#[async_trait::async_trait]
pub trait ModelClient: Send + Sync {
    /// Complete a prompt, returning the raw response text
    async fn complete(&self, request: &PromptRequest) -> Result<String, ClientError>;
}
