//! Wire shape of a configuration payload
//!
//! Only used to describe the payload to a model as JSON Schema; decoding
//! goes through [`crate::ConfigPatch::from_map`], which is more lenient than
//! this schema and reports better diagnostics.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::value::LightingMode;

/// Plotter settings to change. Omit any key that should stay as it is.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct PayloadSchema {
    /// Background color name (e.g. "black") or hex code (e.g. "#1f77b4")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,

    /// Window size as [width, height] in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_size: Option<[u32; 2]>,

    /// Scene lighting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting: Option<LightingSpec>,

    /// Font size in points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 1, max = 512))]
    pub font_size: Option<u32>,

    /// Show the axes widget
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_axes: Option<bool>,

    /// Show the bounds grid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_grid: Option<bool>,

    /// Grid opacity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(range(min = 0.0, max = 1.0))]
    pub grid_opacity: Option<f64>,

    /// Mesh edge color name or hex code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_color: Option<String>,

    /// Draw mesh edges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_edges: Option<bool>,

    /// Color map name (e.g. "viridis", "plasma")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_map: Option<String>,
}

/// Lighting as a plain switch or a named mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum LightingSpec {
    /// `true` for the default light kit, `false` for no lights
    Enabled(bool),
    /// Named lighting mode
    Mode(LightingMode),
}

/// JSON Schema of the payload, as a JSON value
#[must_use]
pub fn payload_json_schema() -> Value {
    let schema = schemars::schema_for!(PayloadSchema);
    serde_json::to_value(schema).unwrap_or(Value::Null)
}
