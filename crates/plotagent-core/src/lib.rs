//! plotagent Core
//!
//! Drives a language model to reconfigure plotter settings.
//!
//! # Components
//!
//! - [`ModelClient`]: pluggable completion source (no provider is bundled)
//! - [`PromptBuilder`]: role, current settings, field list and JSON Schema
//! - [`ConfigurationAgent`]: prompt, one model call, then ingestion
//!
//! The agent does no validation of its own. Every response passes through
//! [`plotagent_ingest::ResponseIngestor`], so a bad answer never reaches
//! the target.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod agent;
pub mod client;
pub mod error;
pub mod prompt;

pub use agent::ConfigurationAgent;
pub use client::{ClientError, ModelClient, PromptRequest};
pub use error::{AgentError, AgentResult};
pub use prompt::{PromptBuilder, DEFAULT_ROLE};
