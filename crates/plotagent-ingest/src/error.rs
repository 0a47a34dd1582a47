//! Error types for response ingestion
//!
//! Two kinds, both recoverable and both leaving the target untouched:
//! - Decode errors (payload is not a structured object)
//! - Validation errors (payload parses but violates the schema)

use plotagent_schema::{SettingField, UnknownField, ValidationError, ValueError};

/// Payload is not parseable as structured data
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// Nothing but whitespace
    #[error("payload is empty")]
    Empty,

    /// Larger than the configured limit
    #[error("payload too large: {size} bytes (max: {max})")]
    TooLarge {
        /// Payload size in bytes
        size: usize,
        /// Configured limit
        max: usize,
    },

    /// JSON syntax error
    #[error("malformed JSON at line {line}, column {column}: {message}")]
    Malformed {
        /// 1-based line of the error
        line: usize,
        /// 1-based column of the error
        column: usize,
        /// Parser message
        message: String,
    },

    /// Valid JSON, but not a key/value object
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// Answer to a yes/no question was neither
    #[error("unrecognised yes/no answer: '{0}'")]
    UnrecognisedAnswer(String),
}

impl DecodeError {
    /// Create from a serde_json syntax error
    #[must_use]
    pub fn malformed(err: &serde_json::Error) -> Self {
        Self::Malformed {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

/// Ingestion failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IngestError {
    /// Text is not a JSON object
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Object violates the schema
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl IngestError {
    /// Short kind name for logs and machine-readable output
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::Validation(_) => "validation",
        }
    }

    /// Fields named in the diagnostic (empty for decode errors)
    #[must_use]
    pub fn fields(&self) -> Vec<SettingField> {
        match self {
            Self::Decode(_) => Vec::new(),
            Self::Validation(err) => err.fields(),
        }
    }
}

/// Errors building a translation table entry
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranslationError {
    /// Assignment is not of the form `field=value`
    #[error("malformed assignment '{0}': expected field=value")]
    MalformedAssignment(String),

    /// Assignment names a field outside the schema
    #[error(transparent)]
    UnknownField(#[from] UnknownField),

    /// Assignment value fails the field's rules
    #[error("invalid value for {field}: {source}")]
    InvalidValue {
        /// Field the assignment targets
        field: SettingField,
        /// Why the value was rejected
        #[source]
        source: ValueError,
    },

    /// Description has no entry in the table
    #[error("no translation for '{0}'")]
    UnknownDescription(String),

    /// Combined assignments failed validation
    #[error("translation rejected: {0}")]
    Validation(#[from] ValidationError),
}

/// Result type alias for ingestion
pub type IngestResult<T> = Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_error_display() {
        let err = DecodeError::TooLarge { size: 10, max: 5 };
        assert_eq!(err.to_string(), "payload too large: 10 bytes (max: 5)");

        let err = DecodeError::NotAnObject("array");
        assert_eq!(err.to_string(), "expected a JSON object, got array");
    }

    #[test]
    fn malformed_keeps_position() {
        let json_err = serde_json::from_str::<serde_json::Value>("{\"a\": }").unwrap_err();
        let err = DecodeError::malformed(&json_err);
        assert!(matches!(err, DecodeError::Malformed { line: 1, .. }));
    }

    #[test]
    fn ingest_error_conversions() {
        let err: IngestError = DecodeError::Empty.into();
        assert_eq!(err.kind(), "decode");
        assert!(err.fields().is_empty());

        let err: IngestError =
            ValidationError::single(SettingField::FontSize, ValueError::Empty).into();
        assert_eq!(err.kind(), "validation");
        assert_eq!(err.fields(), vec![SettingField::FontSize]);
    }
}
