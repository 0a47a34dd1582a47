//! Error types for schema validation
//!
//! A payload is rejected as a whole: every offending field is collected into
//! one [`ValidationError`] so the caller sees the complete diagnostic.

use std::fmt;

use crate::field::SettingField;

/// Why a single value failed its field's type or range rules
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// JSON type cannot be coerced into the field type
    #[error("expected {expected}, got {actual}")]
    WrongType {
        /// Accepted type
        expected: &'static str,
        /// Type found in the payload
        actual: &'static str,
    },

    /// Composite value has the wrong number of elements
    #[error("expected exactly {expected} elements, got {actual}")]
    WrongArity {
        /// Required element count
        expected: usize,
        /// Element count found
        actual: usize,
    },

    /// Numeric value outside the permitted range
    #[error("{value} is out of range {min}..={max}")]
    OutOfRange {
        /// Offending value
        value: String,
        /// Inclusive lower bound
        min: String,
        /// Inclusive upper bound
        max: String,
    },

    /// Empty text where a value is required
    #[error("value must not be empty")]
    Empty,

    /// Not a recognised color name or hex code
    #[error("invalid color '{0}'")]
    InvalidColor(String),

    /// Not a recognised lighting mode
    #[error("unknown lighting mode '{0}' (expected none, light_kit or three_lights)")]
    UnknownLighting(String),

    /// Color map name contains characters outside the identifier set
    #[error("invalid color map name '{0}'")]
    InvalidColorMap(String),
}

impl ValueError {
    /// Create a wrong-type error
    #[inline]
    #[must_use]
    pub fn wrong_type(expected: &'static str, actual: &'static str) -> Self {
        Self::WrongType { expected, actual }
    }

    /// Create an out-of-range error
    #[inline]
    pub fn out_of_range(
        value: impl fmt::Display,
        min: impl fmt::Display,
        max: impl fmt::Display,
    ) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

/// A field that failed validation, with the reason
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    /// Offending field
    pub field: SettingField,
    /// Why it was rejected
    pub reason: ValueError,
}

impl FieldIssue {
    /// Create issue for field
    #[inline]
    #[must_use]
    pub fn new(field: SettingField, reason: ValueError) -> Self {
        Self { field, reason }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Payload parsed but violates the schema
///
/// Always holds at least one issue.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid payload: {}", join_issues(.issues))]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Create from collected issues
    ///
    /// Returns `None` when there is nothing to report.
    #[must_use]
    pub fn from_issues(issues: Vec<FieldIssue>) -> Option<Self> {
        if issues.is_empty() {
            None
        } else {
            Some(Self { issues })
        }
    }

    /// Create for a single field
    #[must_use]
    pub fn single(field: SettingField, reason: ValueError) -> Self {
        Self {
            issues: vec![FieldIssue::new(field, reason)],
        }
    }

    /// All issues, in schema field order
    #[inline]
    #[must_use]
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Fields that failed validation
    #[must_use]
    pub fn fields(&self) -> Vec<SettingField> {
        self.issues.iter().map(|issue| issue.field).collect()
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
