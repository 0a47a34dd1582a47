//! One CLI invocation's working state and its commands

use anyhow::Context;
use plotagent_core::PromptBuilder;
use plotagent_ingest::{IngestError, IngestReport, IngestResult, ResponseIngestor, TranslationTable};
use plotagent_schema::{payload_json_schema, PlotterSettings, SettingField, SettingsTarget};
use serde_json::{json, Value};

use crate::config::AppConfig;

/// Settings, ingestor and translation table built from the config
#[derive(Debug)]
pub(crate) struct Session {
    ingestor: ResponseIngestor,
    table: TranslationTable,
    prompts: PromptBuilder,
    settings: PlotterSettings,
}

impl Session {
    /// Build a session, applying the configured initial settings
    pub(crate) fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let ingestor = ResponseIngestor::with_options(config.ingest.clone());
        let table = config
            .translation_table()
            .context("invalid translations in config")?;

        let mut settings = PlotterSettings::default();
        if !config.initial.is_empty() {
            ingestor
                .ingest_mapping(&config.initial, &mut settings)
                .context("invalid initial settings in config")?;
        }

        Ok(Self {
            ingestor,
            table,
            prompts: PromptBuilder::default(),
            settings,
        })
    }

    pub(crate) fn settings(&self) -> &PlotterSettings {
        &self.settings
    }

    pub(crate) fn ingest(&mut self, raw_text: &str) -> IngestResult<IngestReport> {
        self.ingestor.ingest_and_apply(raw_text, &mut self.settings)
    }

    pub(crate) fn translate(&mut self, response_text: &str) -> IngestResult<IngestReport> {
        self.ingestor
            .ingest_assignments(response_text, &self.table, &mut self.settings)
    }

    pub(crate) fn decide(&mut self, field: SettingField, answer: &str) -> IngestResult<IngestReport> {
        self.ingestor.ingest_decision(answer, field, &mut self.settings)
    }

    pub(crate) fn prompt(&self, instruction: &str) -> plotagent_core::PromptRequest {
        self.prompts
            .configure_request(instruction, &self.settings.snapshot())
    }

    /// Render an ingestion outcome; the flag is true on success
    pub(crate) fn render(&self, outcome: &IngestResult<IngestReport>, as_json: bool) -> (String, bool) {
        match (outcome, as_json) {
            (Ok(report), false) => (format!("{report}\n\n{}", self.settings), true),
            (Ok(report), true) => {
                let body = json!({
                    "ok": true,
                    "applied": report.applied(),
                    "settings": self.settings.snapshot().to_value(),
                });
                (pretty(&body), true)
            }
            (Err(err), false) => (format!("rejected: {err}"), false),
            (Err(err), true) => (pretty(&rejection(err)), false),
        }
    }
}

fn rejection(err: &IngestError) -> Value {
    json!({
        "ok": false,
        "kind": err.kind(),
        "error": err.to_string(),
        "fields": err.fields(),
    })
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Payload JSON Schema, pretty-printed
pub(crate) fn schema_text() -> String {
    pretty(&payload_json_schema())
}
