//! Testing utilities for plotagent workspace
//!
//! Shared fixtures, a recording target, and proptest strategies for valid
//! and invalid payloads.

#![allow(missing_docs)]

use plotagent_schema::{ConfigPatch, PlotterSettings, Setting, SettingField, SettingsTarget};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

pub const SCENARIO_VALID: &str =
    r#"{"background_color": "blue", "window_size": [1024, 768], "lighting": true}"#;
pub const SCENARIO_NOT_JSON: &str = "not json at all";
pub const SCENARIO_WRONG_ARITY: &str = r#"{"window_size": 1024}"#;
pub const SCENARIO_UNKNOWN_ONLY: &str = r#"{"unknown_field": 5}"#;

/// Target that records every write on top of stock settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingTarget {
    pub settings: PlotterSettings,
    pub writes: Vec<SettingField>,
}

impl RecordingTarget {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsTarget for RecordingTarget {
    fn apply_setting(&mut self, setting: Setting) {
        self.writes.push(setting.field());
        self.settings.apply_setting(setting);
    }

    fn snapshot(&self) -> ConfigPatch {
        self.settings.snapshot()
    }
}

/// Settings that differ from the defaults in every field
pub fn non_default_settings() -> PlotterSettings {
    let mut settings = PlotterSettings::default();
    let payload = json!({
        "background_color": "#202020",
        "window_size": [1280, 720],
        "lighting": "three_lights",
        "font_size": 18,
        "show_axes": false,
        "show_grid": false,
        "grid_opacity": 0.5,
        "edge_color": "white",
        "show_edges": true,
        "color_map": "plasma"
    });
    if let Ok(patch) = ConfigPatch::from_value(&payload) {
        patch.apply_to(&mut settings);
    }
    settings
}

/// Unwrap a JSON object literal
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected JSON object, got {other}"),
    }
}

/// A value the field accepts
pub fn valid_value(field: SettingField) -> BoxedStrategy<Value> {
    match field {
        SettingField::BackgroundColor | SettingField::EdgeColor => prop_oneof![
            prop::sample::select(vec!["black", "white", "blue", "red", "light grey"])
                .prop_map(|c| json!(c)),
            "#[0-9a-f]{6}".prop_map(Value::String),
        ]
        .boxed(),
        SettingField::WindowSize => (1u32..=4096, 1u32..=4096)
            .prop_map(|(w, h)| json!([w, h]))
            .boxed(),
        SettingField::Lighting => prop_oneof![
            any::<bool>().prop_map(Value::Bool),
            prop::sample::select(vec!["none", "light_kit", "three_lights"]).prop_map(|m| json!(m)),
        ]
        .boxed(),
        SettingField::FontSize => (1u32..=512).prop_map(|s| json!(s)).boxed(),
        SettingField::ShowAxes | SettingField::ShowGrid | SettingField::ShowEdges => {
            any::<bool>().prop_map(Value::Bool).boxed()
        }
        SettingField::GridOpacity => (0.0f64..=1.0).prop_map(|o| json!(o)).boxed(),
        SettingField::ColorMap => {
            prop::sample::select(vec!["viridis", "plasma", "coolwarm", "RdBu_r"])
                .prop_map(|m| json!(m))
                .boxed()
        }
    }
}

/// A value the field rejects
pub fn invalid_value(field: SettingField) -> BoxedStrategy<Value> {
    match field {
        SettingField::BackgroundColor | SettingField::EdgeColor => prop_oneof![
            any::<i32>().prop_map(|n| json!(n)),
            Just(json!("")),
            Just(json!("#12345")),
            Just(json!("rgb(1,2,3)")),
            Just(Value::Null),
        ]
        .boxed(),
        SettingField::WindowSize => prop_oneof![
            any::<i32>().prop_map(|n| json!(n)),
            (1u32..=4096).prop_map(|w| json!([w])),
            (1u32..=4096, 1u32..=4096, 1u32..=4096).prop_map(|(a, b, c)| json!([a, b, c])),
            (1u32..=4096).prop_map(|h| json!([0, h])),
            (1u32..=4096).prop_map(|w| json!([w, -1])),
        ]
        .boxed(),
        SettingField::Lighting => prop_oneof![
            Just(json!("disco")),
            (2i32..100).prop_map(|n| json!(n)),
            Just(json!([true])),
            Just(Value::Null),
        ]
        .boxed(),
        SettingField::FontSize => prop_oneof![
            (-1000i64..=0).prop_map(|n| json!(n)),
            (513i64..10_000).prop_map(|n| json!(n)),
            Just(json!(true)),
            Just(json!(12.5)),
        ]
        .boxed(),
        SettingField::ShowAxes | SettingField::ShowGrid | SettingField::ShowEdges => prop_oneof![
            (2i32..100).prop_map(|n| json!(n)),
            Just(json!("maybe")),
            Just(json!([])),
            Just(Value::Null),
        ]
        .boxed(),
        SettingField::GridOpacity => prop_oneof![
            (1.0001f64..100.0).prop_map(|o| json!(o)),
            (-100.0f64..-0.0001).prop_map(|o| json!(o)),
            Just(json!("opaque")),
        ]
        .boxed(),
        SettingField::ColorMap => prop_oneof![
            Just(json!("two words")),
            Just(json!("")),
            any::<i32>().prop_map(|n| json!(n)),
        ]
        .boxed(),
    }
}

/// Object with a random subset of fields, all valid
pub fn valid_payload() -> impl Strategy<Value = Map<String, Value>> {
    let entries: Vec<BoxedStrategy<(String, Option<Value>)>> = SettingField::ALL
        .into_iter()
        .map(|field| {
            proptest::option::of(valid_value(field))
                .prop_map(move |value| (field.name().to_string(), value))
                .boxed()
        })
        .collect();

    entries.prop_map(|pairs| {
        pairs
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect()
    })
}

/// Valid object with one field replaced by an invalid value
pub fn invalid_payload() -> impl Strategy<Value = (Map<String, Value>, SettingField)> {
    (valid_payload(), prop::sample::select(SettingField::ALL.to_vec())).prop_flat_map(
        |(map, field)| {
            invalid_value(field).prop_map(move |bad| {
                let mut map = map.clone();
                map.insert(field.name().to_string(), bad);
                (map, field)
            })
        },
    )
}

/// Text that is not a JSON document
pub fn malformed_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z ]{1,40}".prop_map(|s| format!("{s} {{")),
        Just("{\"background_color\": \"blue\"".to_string()),
        Just("{background_color: blue}".to_string()),
        Just("Sure! Here are your settings: background blue".to_string()),
    ]
}
