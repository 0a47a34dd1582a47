//! Description → setting translation table
//!
//! Maps user-facing phrases ("Hide axes") to assignments
//! (`show_axes=False`). Tables are plain values: callers own them, pass
//! them in, and combine them with [`TranslationTable::merge`].

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use plotagent_schema::{ConfigPatch, Setting, SettingField, ValidationError};
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::TranslationError;

/// Stock phrases
pub const DEFAULT_TRANSLATIONS: [(&str, &str); 7] = [
    ("Set background to black", "background_color=black"),
    ("Increase font size", "font_size=16"),
    ("Hide axes", "show_axes=False"),
    ("Disable grid", "show_grid=False"),
    ("Enable lighting", "lighting=True"),
    ("Set edge color to red", "edge_color=red"),
    ("Use plasma colormap", "color_map=plasma"),
];

static SPACED_EQUALS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t]*=[ \t]*").expect("assignment pattern is valid"));

/// A parsed `field=value` assignment
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    field: SettingField,
    raw_value: String,
    value: Value,
}

impl Assignment {
    /// Parse and check an assignment
    ///
    /// Values are read as JSON where possible, Python-style `True`/`False`
    /// as booleans, and anything else as a bare string.
    ///
    /// # Errors
    /// - `MalformedAssignment` without `=`
    /// - `UnknownField` for fields outside the schema
    /// - `InvalidValue` if the value fails the field's rules
    pub fn parse(text: &str) -> Result<Self, TranslationError> {
        let (field, raw_value) = text
            .split_once('=')
            .ok_or_else(|| TranslationError::MalformedAssignment(text.to_string()))?;
        let field: SettingField = field.parse()?;
        let raw_value = raw_value.trim();
        if raw_value.is_empty() {
            return Err(TranslationError::MalformedAssignment(text.to_string()));
        }

        let value = assignment_value(raw_value);
        Setting::parse(field, &value)
            .map_err(|source| TranslationError::InvalidValue { field, source })?;

        Ok(Self {
            field,
            raw_value: raw_value.to_string(),
            value,
        })
    }

    /// Target field
    #[inline]
    #[must_use]
    pub fn field(&self) -> SettingField {
        self.field
    }

    /// Value as JSON
    #[inline]
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Canonical `field=value` text, as matched against responses
    #[must_use]
    pub fn text(&self) -> String {
        format!("{}={}", self.field, self.raw_value)
    }
}

fn assignment_value(raw: &str) -> Value {
    match raw.to_ascii_lowercase().as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    serde_json::from_str(raw).unwrap_or_else(|_| {
        Value::String(raw.trim_matches(|c: char| c == '"' || c == '\'').to_string())
    })
}

/// `needle` occurs in `haystack` with no name character before it and no
/// value character after it
fn mentions(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let mut after = haystack[start + needle.len()..].chars();
        let continues_value = match after.next() {
            Some(c) if c.is_alphanumeric() || c == '_' || c == '#' => true,
            // a trailing full stop ends the sentence; a digit after it continues a number
            Some('.') => after.next().is_some_and(|c| c.is_ascii_digit()),
            _ => false,
        };
        !continues_value && !before.is_some_and(|c| c.is_alphanumeric() || c == '_')
    })
}

/// Ordered description → assignment lookup
///
/// Insertion order is kept; it decides which entry wins when two matched
/// entries target the same field (the later one).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationTable {
    entries: IndexMap<String, Assignment>,
}

impl TranslationTable {
    /// Empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table seeded with [`DEFAULT_TRANSLATIONS`]
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut table = Self::new();
        for (description, assignment) in DEFAULT_TRANSLATIONS {
            if let Err(e) = table.insert(description, assignment) {
                tracing::error!("Stock translation '{}' rejected: {}", description, e);
            }
        }
        table
    }

    /// Add or override a translation
    ///
    /// Returns the assignment previously stored for `description`.
    ///
    /// # Errors
    /// The assignment is parsed eagerly; see [`Assignment::parse`]
    pub fn insert(
        &mut self,
        description: impl Into<String>,
        assignment: &str,
    ) -> Result<Option<Assignment>, TranslationError> {
        let assignment = Assignment::parse(assignment)?;
        Ok(self.entries.insert(description.into(), assignment))
    }

    /// Merge another table into this one
    ///
    /// Entries from `other` override entries with the same description in
    /// place; new descriptions are appended in `other`'s order.
    pub fn merge(&mut self, other: &TranslationTable) {
        for (description, assignment) in &other.entries {
            self.entries.insert(description.clone(), assignment.clone());
        }
    }

    /// Assignment for a description
    #[must_use]
    pub fn lookup(&self, description: &str) -> Option<&Assignment> {
        self.entries.get(description)
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in table order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Assignment)> {
        self.entries.iter().map(|(d, a)| (d.as_str(), a))
    }

    /// Build a patch from the assignments whose text occurs in a response
    ///
    /// Spacing around `=` in the response is ignored. An assignment only
    /// matches as a whole: `font_size=16` does not match `font_size=160`.
    ///
    /// # Errors
    /// `ValidationError` if the combined assignments fail the schema
    pub fn scan(&self, response_text: &str) -> Result<ConfigPatch, ValidationError> {
        let normalised = SPACED_EQUALS.replace_all(response_text, "=");
        let mut map = Map::new();
        for assignment in self.entries.values() {
            if mentions(&normalised, &assignment.text()) {
                map.insert(assignment.field.name().to_string(), assignment.value.clone());
            }
        }
        ConfigPatch::from_map(&map)
    }

    /// Build a patch straight from descriptions
    ///
    /// # Errors
    /// `UnknownDescription` for a description with no entry
    pub fn resolve<'a, I>(&self, descriptions: I) -> Result<ConfigPatch, TranslationError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut map = Map::new();
        for description in descriptions {
            let assignment = self
                .lookup(description)
                .ok_or_else(|| TranslationError::UnknownDescription(description.to_string()))?;
            map.insert(assignment.field.name().to_string(), assignment.value.clone());
        }
        Ok(ConfigPatch::from_map(&map)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotagent_schema::{Color, FontSize};

    #[test]
    fn assignment_values() {
        let a = Assignment::parse("show_axes=False").unwrap();
        assert_eq!(a.value(), &Value::Bool(false));
        assert_eq!(a.text(), "show_axes=False");

        let a = Assignment::parse("font_size = 16").unwrap();
        assert_eq!(a.value(), &serde_json::json!(16));
        assert_eq!(a.text(), "font_size=16");

        let a = Assignment::parse("background_color='navy'").unwrap();
        assert_eq!(a.value(), &serde_json::json!("navy"));

        let a = Assignment::parse("window_size=[1920, 1080]").unwrap();
        assert_eq!(a.field(), SettingField::WindowSize);
    }

    #[test]
    fn assignment_errors() {
        assert!(matches!(
            Assignment::parse("hide axes"),
            Err(TranslationError::MalformedAssignment(_))
        ));
        assert!(matches!(
            Assignment::parse("background="),
            Err(TranslationError::UnknownField(_))
        ));
        assert!(matches!(
            Assignment::parse("font_size="),
            Err(TranslationError::MalformedAssignment(_))
        ));
        assert!(matches!(
            Assignment::parse("font_size=-1"),
            Err(TranslationError::InvalidValue {
                field: SettingField::FontSize,
                ..
            })
        ));
    }

    #[test]
    fn defaults_are_all_valid() {
        let table = TranslationTable::with_defaults();
        assert_eq!(table.len(), DEFAULT_TRANSLATIONS.len());
        assert_eq!(
            table.lookup("Hide axes").map(Assignment::field),
            Some(SettingField::ShowAxes)
        );
    }

    #[test]
    fn insert_overrides_and_returns_previous() {
        let mut table = TranslationTable::with_defaults();
        let previous = table.insert("Increase font size", "font_size=20").unwrap();

        assert_eq!(previous.map(|a| a.text()), Some("font_size=16".to_string()));
        assert_eq!(table.len(), DEFAULT_TRANSLATIONS.len());
        assert_eq!(
            table.lookup("Increase font size").map(Assignment::text),
            Some("font_size=20".to_string())
        );
    }

    #[test]
    fn rejected_insert_leaves_table_unchanged() {
        let mut table = TranslationTable::with_defaults();
        assert!(table.insert("Hide axes", "show_axes=maybe").is_err());
        assert_eq!(
            table.lookup("Hide axes").map(Assignment::text),
            Some("show_axes=False".to_string())
        );
    }

    #[test]
    fn merge_overrides_in_place_and_appends() {
        let mut base = TranslationTable::with_defaults();
        let mut extra = TranslationTable::new();
        extra.insert("Set background to black", "background_color=#000000").unwrap();
        extra.insert("Set background to blue", "background_color=blue").unwrap();

        base.merge(&extra);

        assert_eq!(base.len(), DEFAULT_TRANSLATIONS.len() + 1);
        let order: Vec<&str> = base.iter().map(|(d, _)| d).collect();
        assert_eq!(order[0], "Set background to black");
        assert_eq!(order[order.len() - 1], "Set background to blue");
        assert_eq!(
            base.lookup("Set background to black").map(Assignment::text),
            Some("background_color=#000000".to_string())
        );
    }

    #[test]
    fn scan_finds_assignments_in_prose() {
        let mut table = TranslationTable::with_defaults();
        table.insert("Set background to blue", "background_color=blue").unwrap();
        table.insert("Decrease font size", "font_size=8").unwrap();

        let response = "Sure! I'll use background_color = blue and font_size=8 for you.";
        let patch = table.scan(response).unwrap();

        assert_eq!(
            patch.fields(),
            vec![SettingField::BackgroundColor, SettingField::FontSize]
        );
        assert_eq!(
            patch.get(SettingField::FontSize),
            Some(&Setting::FontSize(FontSize::new(8).unwrap()))
        );
    }

    #[test]
    fn scan_later_entry_wins_for_same_field() {
        let mut table = TranslationTable::new();
        table.insert("black", "background_color=black").unwrap();
        table.insert("blue", "background_color=blue").unwrap();

        let patch = table
            .scan("background_color=black ... actually background_color=blue")
            .unwrap();
        assert_eq!(
            patch.get(SettingField::BackgroundColor),
            Some(&Setting::BackgroundColor(Color::parse("blue").unwrap()))
        );
    }

    #[test]
    fn scan_ignores_longer_values() {
        let mut table = TranslationTable::with_defaults();
        table.insert("Set background to blue", "background_color=blue").unwrap();
        table.insert("Half grid", "grid_opacity=0.5").unwrap();

        assert!(table
            .scan("Sure, I set font_size=160 for you.")
            .unwrap()
            .is_empty());
        assert!(table.scan("background_color=bluegreen").unwrap().is_empty());
        assert!(table.scan("grid_opacity=0.55").unwrap().is_empty());
        assert!(table.scan("my_font_size=16").unwrap().is_empty());

        let patch = table
            .scan("Done: font_size=16. Also grid_opacity=0.5.")
            .unwrap();
        assert_eq!(
            patch.fields(),
            vec![SettingField::FontSize, SettingField::GridOpacity]
        );
    }

    #[test]
    fn scan_without_matches_is_empty() {
        let table = TranslationTable::with_defaults();
        assert!(table.scan("nothing to see here").unwrap().is_empty());
    }

    #[test]
    fn resolve_descriptions() {
        let table = TranslationTable::with_defaults();
        let patch = table.resolve(["Hide axes", "Disable grid"]).unwrap();
        assert_eq!(
            patch.fields(),
            vec![SettingField::ShowAxes, SettingField::ShowGrid]
        );

        assert!(matches!(
            table.resolve(["Make it pretty"]),
            Err(TranslationError::UnknownDescription(_))
        ));
    }
}
