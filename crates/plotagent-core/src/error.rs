//! Error types for the configuration agent

use plotagent_ingest::IngestError;

use crate::client::ClientError;

/// Failure of one agent cycle
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AgentError {
    /// Model call failed; nothing was ingested
    #[error("model client error: {0}")]
    Client(#[from] ClientError),

    /// Model answered but the response was rejected
    #[error("response rejected: {0}")]
    Ingest(#[from] IngestError),
}

impl AgentError {
    /// Short error category
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Client(_) => "client",
            Self::Ingest(e) => e.kind(),
        }
    }
}

/// Result type for agent operations
pub type AgentResult<T> = Result<T, AgentError>;
