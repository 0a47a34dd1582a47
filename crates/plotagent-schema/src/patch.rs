//! Validated configuration patch
//!
//! A [`ConfigPatch`] only exists in a fully validated state: it is built by
//! checking every known field of a decoded mapping, and any single failure
//! rejects the whole mapping. Applying it is infallible, which is what makes
//! the update all-or-nothing.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{FieldIssue, ValidationError};
use crate::field::{Setting, SettingField};
use crate::settings::SettingsTarget;

/// Validated subset of schema fields
///
/// Keys that are not schema fields are ignored during validation; fields
/// absent from the payload are absent from the patch and keep their prior
/// value on the target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigPatch {
    settings: BTreeMap<SettingField, Setting>,
}

impl ConfigPatch {
    /// Empty patch
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a decoded mapping
    ///
    /// Every known field is checked before returning so the error lists all
    /// offending fields at once.
    ///
    /// # Errors
    /// `ValidationError` if any known field fails its type or range rules
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut settings = BTreeMap::new();
        let mut issues = Vec::new();

        for field in SettingField::ALL {
            let Some(raw) = map.get(field.name()) else {
                continue;
            };
            match Setting::parse(field, raw) {
                Ok(setting) => {
                    settings.insert(field, setting);
                }
                Err(reason) => issues.push(FieldIssue::new(field, reason)),
            }
        }

        match ValidationError::from_issues(issues) {
            Some(err) => Err(err),
            None => Ok(Self { settings }),
        }
    }

    /// Validate any JSON value
    ///
    /// Non-objects carry no fields and yield an empty patch.
    ///
    /// # Errors
    /// As [`ConfigPatch::from_map`]
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        match value {
            Value::Object(map) => Self::from_map(map),
            _ => Ok(Self::new()),
        }
    }

    /// Add or replace a setting
    #[must_use]
    pub fn with(mut self, setting: Setting) -> Self {
        self.insert(setting);
        self
    }

    /// Add or replace a setting, returning the previous one for that field
    pub fn insert(&mut self, setting: Setting) -> Option<Setting> {
        self.settings.insert(setting.field(), setting)
    }

    /// Setting for field, if present
    #[must_use]
    pub fn get(&self, field: SettingField) -> Option<&Setting> {
        self.settings.get(&field)
    }

    /// Fields present, in schema order
    #[must_use]
    pub fn fields(&self) -> Vec<SettingField> {
        self.settings.keys().copied().collect()
    }

    /// Settings present, in schema order
    pub fn iter(&self) -> impl Iterator<Item = &Setting> {
        self.settings.values()
    }

    /// Number of fields present
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.settings.len()
    }

    /// No fields present
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Apply every setting to the target
    ///
    /// Returns the applied fields in schema order.
    pub fn apply_to<T>(&self, target: &mut T) -> Vec<SettingField>
    where
        T: SettingsTarget + ?Sized,
    {
        self.settings
            .values()
            .map(|setting| {
                target.apply_setting(setting.clone());
                setting.field()
            })
            .collect()
    }

    /// Canonical JSON object; re-validating it yields an equal patch
    #[must_use]
    pub fn to_value(&self) -> Value {
        let map: Map<String, Value> = self
            .settings
            .iter()
            .map(|(field, setting)| (field.name().to_string(), setting.to_value()))
            .collect();
        Value::Object(map)
    }
}

impl FromIterator<Setting> for ConfigPatch {
    fn from_iter<I: IntoIterator<Item = Setting>>(iter: I) -> Self {
        let mut patch = Self::new();
        for setting in iter {
            patch.insert(setting);
        }
        patch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;
    use crate::value::{Color, LightingMode};
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn known_fields_are_validated_unknown_ignored() {
        let patch = ConfigPatch::from_map(&map(json!({
            "background_color": "blue",
            "window_size": [1024, 768],
            "lighting": true,
            "unknown_field": 5
        })))
        .unwrap();

        assert_eq!(
            patch.fields(),
            vec![
                SettingField::BackgroundColor,
                SettingField::WindowSize,
                SettingField::Lighting
            ]
        );
        assert_eq!(
            patch.get(SettingField::Lighting),
            Some(&Setting::Lighting(LightingMode::LightKit))
        );
    }

    #[test]
    fn every_bad_field_is_reported() {
        let err = ConfigPatch::from_map(&map(json!({
            "background_color": "green",
            "window_size": 1024,
            "font_size": -2,
            "grid_opacity": 3.5
        })))
        .unwrap_err();

        assert_eq!(
            err.fields(),
            vec![
                SettingField::WindowSize,
                SettingField::FontSize,
                SettingField::GridOpacity
            ]
        );
    }

    #[test]
    fn null_is_a_validation_failure() {
        let err = ConfigPatch::from_map(&map(json!({"show_axes": null}))).unwrap_err();
        assert_eq!(
            err.issues()[0].reason,
            ValueError::wrong_type("boolean", "null")
        );
    }

    #[test]
    fn to_value_revalidates_to_same_patch() {
        let patch = ConfigPatch::from_map(&map(json!({
            "edge_color": "#FF0000",
            "window_size": "1920x1080",
            "show_edges": "yes",
            "font_size": "14"
        })))
        .unwrap();

        let again = ConfigPatch::from_value(&patch.to_value()).unwrap();
        assert_eq!(patch, again);
    }

    #[test]
    fn later_insert_replaces_field() {
        let mut patch = ConfigPatch::new()
            .with(Setting::BackgroundColor(Color::parse("black").unwrap()));
        let previous = patch.insert(Setting::BackgroundColor(Color::parse("white").unwrap()));

        assert!(previous.is_some());
        assert_eq!(patch.len(), 1);
    }
}
