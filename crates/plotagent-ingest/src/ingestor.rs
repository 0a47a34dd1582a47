//! Response ingestor - main entry point
//!
//! Provides the boundary between model output and the live settings:
//! - Raw text → key/value mapping (decode)
//! - Mapping → `ConfigPatch` (validate, all fields or nothing)
//! - `ConfigPatch` → target (apply)
//!
//! Nothing is written to the target until the whole payload has validated.

use std::fmt;

use plotagent_schema::{ConfigPatch, SettingField, SettingsTarget, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::decision::parse_decision_with;
use crate::decode::{check_size, decode_object};
use crate::error::{DecodeError, IngestError, IngestResult};
use crate::translation::TranslationTable;

/// Ingestion limits and leniency switches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Largest payload accepted, in bytes
    pub max_payload_bytes: usize,
    /// Strip a surrounding Markdown code fence before decoding
    pub unwrap_code_fences: bool,
}

impl IngestOptions {
    /// Create default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With payload size limit
    #[inline]
    #[must_use]
    pub fn with_max_payload_bytes(mut self, max: usize) -> Self {
        self.max_payload_bytes = max;
        self
    }

    /// With code fence unwrapping on or off
    #[inline]
    #[must_use]
    pub fn with_code_fences(mut self, unwrap: bool) -> Self {
        self.unwrap_code_fences = unwrap;
        self
    }
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            max_payload_bytes: 64 * 1024, // 64KB
            unwrap_code_fences: true,
        }
    }
}

/// Outcome of a successful ingestion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    applied: Vec<SettingField>,
}

impl IngestReport {
    /// Create report for applied fields
    #[inline]
    #[must_use]
    pub fn new(applied: Vec<SettingField>) -> Self {
        Self { applied }
    }

    /// Fields written to the target, in schema order
    #[inline]
    #[must_use]
    pub fn applied(&self) -> &[SettingField] {
        &self.applied
    }

    /// Nothing recognised in the payload
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }

    /// Field was applied
    #[must_use]
    pub fn contains(&self, field: SettingField) -> bool {
        self.applied.contains(&field)
    }
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.applied.is_empty() {
            return f.write_str("no recognised fields; settings unchanged");
        }
        let names: Vec<&str> = self.applied.iter().map(|field| field.name()).collect();
        write!(f, "applied {} field(s): {}", names.len(), names.join(", "))
    }
}

/// Turns model output into validated settings
///
/// Stateless apart from its options; one ingestor can serve any number of
/// targets. Callers serialise updates to a single target through `&mut`.
#[derive(Debug, Clone, Default)]
pub struct ResponseIngestor {
    options: IngestOptions,
}

impl ResponseIngestor {
    /// Create ingestor with default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create ingestor with specific options
    #[inline]
    #[must_use]
    pub fn with_options(options: IngestOptions) -> Self {
        Self { options }
    }

    /// Options in effect
    #[inline]
    #[must_use]
    pub fn options(&self) -> &IngestOptions {
        &self.options
    }

    /// Decode raw text into a key/value mapping
    ///
    /// # Errors
    /// See [`crate::decode::decode_object`]
    pub fn decode(&self, raw_text: &str) -> Result<Map<String, Value>, DecodeError> {
        decode_object(raw_text, &self.options)
    }

    /// Validate a decoded mapping against the schema
    ///
    /// # Errors
    /// `ValidationError` listing every offending field
    pub fn validate(&self, map: &Map<String, Value>) -> Result<ConfigPatch, ValidationError> {
        ConfigPatch::from_map(map)
    }

    /// Decode, validate and apply a model response
    ///
    /// # Arguments
    /// * `raw_text` - Model output, expected to hold a JSON object
    /// * `target` - Settings to update
    ///
    /// # Returns
    /// Report of applied fields. Unknown keys are ignored, so a payload with
    /// no schema fields succeeds with an empty report.
    ///
    /// # Errors
    /// - `IngestError::Decode` if the text is not a JSON object
    /// - `IngestError::Validation` if any known field is invalid
    ///
    /// On error the target is not touched.
    pub fn ingest_and_apply<T>(&self, raw_text: &str, target: &mut T) -> IngestResult<IngestReport>
    where
        T: SettingsTarget + ?Sized,
    {
        let map = self.decode(raw_text).map_err(|e| reject(e.into()))?;
        self.ingest_mapping(&map, target)
    }

    /// Validate and apply an already decoded mapping
    ///
    /// # Errors
    /// `IngestError::Validation` if any known field is invalid
    pub fn ingest_mapping<T>(&self, map: &Map<String, Value>, target: &mut T) -> IngestResult<IngestReport>
    where
        T: SettingsTarget + ?Sized,
    {
        let patch = self.validate(map).map_err(|e| reject(e.into()))?;
        Ok(self.commit(&patch, target))
    }

    /// Apply the translation-table assignments found in a response
    ///
    /// # Errors
    /// - `IngestError::Decode` if the response exceeds the size limit
    /// - `IngestError::Validation` if the combined assignments are invalid
    pub fn ingest_assignments<T>(
        &self,
        response_text: &str,
        table: &TranslationTable,
        target: &mut T,
    ) -> IngestResult<IngestReport>
    where
        T: SettingsTarget + ?Sized,
    {
        check_size(response_text, &self.options).map_err(|e| reject(e.into()))?;
        let patch = table.scan(response_text).map_err(|e| reject(e.into()))?;
        Ok(self.commit(&patch, target))
    }

    /// Apply a yes/no answer to a single field
    ///
    /// The answer goes through the same validation as any payload, so aiming
    /// it at a non-boolean field is a validation error.
    ///
    /// # Errors
    /// - `IngestError::Decode` if the answer is oversized, or not a recognisable yes/no
    /// - `IngestError::Validation` if `field` does not accept a boolean
    pub fn ingest_decision<T>(
        &self,
        raw_text: &str,
        field: SettingField,
        target: &mut T,
    ) -> IngestResult<IngestReport>
    where
        T: SettingsTarget + ?Sized,
    {
        let answer = parse_decision_with(raw_text, &self.options).map_err(|e| reject(e.into()))?;
        let mut map = Map::new();
        map.insert(field.name().to_string(), Value::Bool(answer));
        self.ingest_mapping(&map, target)
    }

    fn commit<T>(&self, patch: &ConfigPatch, target: &mut T) -> IngestReport
    where
        T: SettingsTarget + ?Sized,
    {
        let report = IngestReport::new(patch.apply_to(target));
        if report.is_empty() {
            tracing::info!("Payload carried no recognised settings");
        } else {
            tracing::info!("Applied settings: {:?}", report.applied());
        }
        report
    }
}

fn reject(err: IngestError) -> IngestError {
    tracing::warn!("Rejected model payload ({}): {}", err.kind(), err);
    err
}
