//! Field catalogue and typed settings
//!
//! [`SettingField`] names a schema field; [`Setting`] is one validated value
//! for one field.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::coerce;
use crate::error::ValueError;
use crate::value::{Color, ColorMap, FontSize, LightingMode, Opacity, WindowSize};

/// A named field of the configuration schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingField {
    /// `background_color`
    BackgroundColor,
    /// `window_size`
    WindowSize,
    /// `lighting`
    Lighting,
    /// `font_size`
    FontSize,
    /// `show_axes`
    ShowAxes,
    /// `show_grid`
    ShowGrid,
    /// `grid_opacity`
    GridOpacity,
    /// `edge_color`
    EdgeColor,
    /// `show_edges`
    ShowEdges,
    /// `color_map`
    ColorMap,
}

impl SettingField {
    /// Every field, in schema order
    pub const ALL: [SettingField; 10] = [
        Self::BackgroundColor,
        Self::WindowSize,
        Self::Lighting,
        Self::FontSize,
        Self::ShowAxes,
        Self::ShowGrid,
        Self::GridOpacity,
        Self::EdgeColor,
        Self::ShowEdges,
        Self::ColorMap,
    ];

    /// Wire name (payload key)
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::BackgroundColor => "background_color",
            Self::WindowSize => "window_size",
            Self::Lighting => "lighting",
            Self::FontSize => "font_size",
            Self::ShowAxes => "show_axes",
            Self::ShowGrid => "show_grid",
            Self::GridOpacity => "grid_opacity",
            Self::EdgeColor => "edge_color",
            Self::ShowEdges => "show_edges",
            Self::ColorMap => "color_map",
        }
    }

    /// One-line description of the accepted values
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::BackgroundColor => "background color name or hex code",
            Self::WindowSize => "window size as [width, height] in pixels",
            Self::Lighting => "true, false, or one of none, light_kit, three_lights",
            Self::FontSize => "font size in points, 1 to 512",
            Self::ShowAxes => "whether the axes widget is shown (boolean)",
            Self::ShowGrid => "whether the bounds grid is shown (boolean)",
            Self::GridOpacity => "grid opacity between 0.0 and 1.0",
            Self::EdgeColor => "mesh edge color name or hex code",
            Self::ShowEdges => "whether mesh edges are drawn (boolean)",
            Self::ColorMap => "color map name such as viridis or plasma",
        }
    }

    /// Field holds a plain on/off value
    #[must_use]
    pub fn is_flag(self) -> bool {
        matches!(self, Self::ShowAxes | Self::ShowGrid | Self::ShowEdges | Self::Lighting)
    }
}

impl fmt::Display for SettingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown field name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown setting field: '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for SettingField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| UnknownField(name.to_string()))
    }
}

/// One validated value for one field
#[derive(Debug, Clone, PartialEq)]
pub enum Setting {
    /// Background color
    BackgroundColor(Color),
    /// Window dimensions
    WindowSize(WindowSize),
    /// Lighting mode
    Lighting(LightingMode),
    /// Font size
    FontSize(FontSize),
    /// Axes visibility
    ShowAxes(bool),
    /// Grid visibility
    ShowGrid(bool),
    /// Grid opacity
    GridOpacity(Opacity),
    /// Edge color
    EdgeColor(Color),
    /// Edge visibility
    ShowEdges(bool),
    /// Color map
    ColorMap(ColorMap),
}

impl Setting {
    /// Validate a raw JSON value for `field`
    ///
    /// Applies the lax coercion rules from [`crate::coerce`].
    ///
    /// # Errors
    /// Returns the type or range violation
    pub fn parse(field: SettingField, value: &Value) -> Result<Self, ValueError> {
        Ok(match field {
            SettingField::BackgroundColor => {
                Self::BackgroundColor(Color::parse(coerce::as_text(value)?)?)
            }
            SettingField::WindowSize => {
                let (width, height) = coerce::as_integer_pair(value)?;
                Self::WindowSize(WindowSize::new(width, height)?)
            }
            SettingField::Lighting => Self::Lighting(parse_lighting(value)?),
            SettingField::FontSize => Self::FontSize(FontSize::new(coerce::as_integer(value)?)?),
            SettingField::ShowAxes => Self::ShowAxes(coerce::as_bool(value)?),
            SettingField::ShowGrid => Self::ShowGrid(coerce::as_bool(value)?),
            SettingField::GridOpacity => Self::GridOpacity(Opacity::new(coerce::as_float(value)?)?),
            SettingField::EdgeColor => Self::EdgeColor(Color::parse(coerce::as_text(value)?)?),
            SettingField::ShowEdges => Self::ShowEdges(coerce::as_bool(value)?),
            SettingField::ColorMap => Self::ColorMap(ColorMap::parse(coerce::as_text(value)?)?),
        })
    }

    /// Field this setting belongs to
    #[must_use]
    pub fn field(&self) -> SettingField {
        match self {
            Self::BackgroundColor(_) => SettingField::BackgroundColor,
            Self::WindowSize(_) => SettingField::WindowSize,
            Self::Lighting(_) => SettingField::Lighting,
            Self::FontSize(_) => SettingField::FontSize,
            Self::ShowAxes(_) => SettingField::ShowAxes,
            Self::ShowGrid(_) => SettingField::ShowGrid,
            Self::GridOpacity(_) => SettingField::GridOpacity,
            Self::EdgeColor(_) => SettingField::EdgeColor,
            Self::ShowEdges(_) => SettingField::ShowEdges,
            Self::ColorMap(_) => SettingField::ColorMap,
        }
    }

    /// Canonical wire value
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::BackgroundColor(c) | Self::EdgeColor(c) => json!(c.as_str()),
            Self::WindowSize(s) => json!([s.width(), s.height()]),
            Self::Lighting(mode) => json!(mode.as_str()),
            Self::FontSize(size) => json!(size.get()),
            Self::ShowAxes(b) | Self::ShowGrid(b) | Self::ShowEdges(b) => json!(b),
            Self::GridOpacity(o) => json!(o.get()),
            Self::ColorMap(m) => json!(m.as_str()),
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field(), self.to_value())
    }
}

fn parse_lighting(value: &Value) -> Result<LightingMode, ValueError> {
    match value {
        Value::Bool(enabled) => Ok(LightingMode::from_enabled(*enabled)),
        Value::String(s) => match coerce::bool_word(s) {
            Some(enabled) => Ok(LightingMode::from_enabled(enabled)),
            None => s.parse(),
        },
        other => coerce::as_bool(other)
            .map(LightingMode::from_enabled)
            .map_err(|_| ValueError::wrong_type("boolean or lighting mode", coerce::value_kind(other))),
    }
}
