//! plotagent Ingest
//!
//! The trusted boundary between free-text model output and live plotter
//! settings.
//!
//! # Core Operations
//!
//! - **Decode**: raw text → JSON object (`DecodeError` otherwise)
//! - **Validate**: JSON object → `ConfigPatch` (`ValidationError` otherwise)
//! - **Apply**: `ConfigPatch` → `SettingsTarget`, only after full validation
//!
//! Two auxiliary inputs reuse the same validation: translation-table
//! assignments found in prose, and yes/no answers aimed at one field.
//!
//! # Example
//!
//! ```
//! use plotagent_ingest::ResponseIngestor;
//! use plotagent_schema::PlotterSettings;
//!
//! let ingestor = ResponseIngestor::new();
//! let mut settings = PlotterSettings::default();
//!
//! let report = ingestor
//!     .ingest_and_apply(r#"{"background_color": "blue", "lighting": true}"#, &mut settings)
//!     .unwrap();
//! assert_eq!(report.applied().len(), 2);
//!
//! // Rejected payloads leave the settings alone
//! assert!(ingestor.ingest_and_apply(r#"{"window_size": 1024}"#, &mut settings).is_err());
//! assert_eq!(settings.background_color.as_str(), "blue");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod decision;
pub mod decode;
pub mod error;
pub mod ingestor;
pub mod translation;

pub use decision::{parse_decision, parse_decision_with};
pub use error::{DecodeError, IngestError, IngestResult, TranslationError};
pub use ingestor::{IngestOptions, IngestReport, ResponseIngestor};
pub use translation::{Assignment, TranslationTable, DEFAULT_TRANSLATIONS};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for ingesting model responses
    pub use crate::error::{DecodeError, IngestError};
    pub use crate::ingestor::{IngestOptions, IngestReport, ResponseIngestor};
    pub use crate::translation::TranslationTable;
    pub use plotagent_schema::{ConfigPatch, PlotterSettings, SettingField, SettingsTarget};
}
