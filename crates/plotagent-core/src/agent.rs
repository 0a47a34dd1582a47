//! Configuration agent
//!
//! One cycle per call:
//! 1. Snapshot the target and build a prompt
//! 2. Ask the model once
//! 3. Hand the raw response to the ingestor
//!
//! No retries. A rejected response leaves the target as it was and is
//! reported to the caller.

use plotagent_ingest::{IngestReport, ResponseIngestor};
use plotagent_schema::{SettingField, SettingsTarget};

use crate::client::ModelClient;
use crate::error::AgentResult;
use crate::prompt::PromptBuilder;

/// Drives a model to reconfigure a settings target
#[derive(Debug)]
pub struct ConfigurationAgent<C> {
    client: C,
    prompts: PromptBuilder,
    ingestor: ResponseIngestor,
}

impl<C: ModelClient> ConfigurationAgent<C> {
    /// Create agent with default prompts and ingestion options
    #[inline]
    #[must_use]
    pub fn new(client: C) -> Self {
        Self {
            client,
            prompts: PromptBuilder::default(),
            ingestor: ResponseIngestor::default(),
        }
    }

    /// With a specific prompt builder
    #[inline]
    #[must_use]
    pub fn with_prompts(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    /// With a specific ingestor
    #[inline]
    #[must_use]
    pub fn with_ingestor(mut self, ingestor: ResponseIngestor) -> Self {
        self.ingestor = ingestor;
        self
    }

    /// Prompt builder in use
    #[inline]
    #[must_use]
    pub fn prompts(&self) -> &PromptBuilder {
        &self.prompts
    }

    /// Underlying client
    #[inline]
    #[must_use]
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Apply a natural-language instruction to `target`
    ///
    /// # Errors
    /// - `AgentError::Client` if the model call fails
    /// - `AgentError::Ingest` if the response is rejected
    pub async fn configure<T>(&self, instruction: &str, target: &mut T) -> AgentResult<IngestReport>
    where
        T: SettingsTarget + ?Sized,
    {
        tracing::info!("Configuring from instruction: {}", instruction);

        let request = self.prompts.configure_request(instruction, &target.snapshot());
        let response = self.client.complete(&request).await.map_err(|e| {
            tracing::error!("Model call failed: {}", e);
            e
        })?;
        tracing::debug!("Model response: {}", response);

        Ok(self.ingestor.ingest_and_apply(&response, target)?)
    }

    /// Ask the model a yes/no question and apply the answer to `field`
    ///
    /// # Errors
    /// - `AgentError::Client` if the model call fails
    /// - `AgentError::Ingest` if the answer is unclear or `field` is not boolean
    pub async fn decide<T>(
        &self,
        question: &str,
        field: SettingField,
        target: &mut T,
    ) -> AgentResult<IngestReport>
    where
        T: SettingsTarget + ?Sized,
    {
        tracing::info!("Deciding {} from: {}", field, question);

        let request = self.prompts.decision_request(question, field);
        let response = self.client.complete(&request).await.map_err(|e| {
            tracing::error!("Model call failed: {}", e);
            e
        })?;
        tracing::debug!("Model answer: {}", response);

        Ok(self.ingestor.ingest_decision(&response, field, target)?)
    }
}
