//! Typed setting values
//!
//! Each value type checks its own format and range on construction, so a
//! constructed value is always valid.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Largest accepted window dimension in pixels
pub const MAX_WINDOW_DIMENSION: u32 = 16_384;

/// Largest accepted font size in points
pub const MAX_FONT_SIZE: u32 = 512;

/// Longest accepted color or color map name
const MAX_NAME_LEN: usize = 64;

/// Color given as a name (`"blue"`, `"light grey"`) or hex code (`"#1f77b4"`)
///
/// Names are normalised to lowercase; hex codes keep their leading `#`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub(crate) String);

impl Color {
    /// Parse and normalise a color
    ///
    /// # Errors
    /// `Empty` for blank input, `InvalidColor` for anything that is neither a
    /// plain name nor a 3/6-digit hex code
    pub fn parse(input: &str) -> Result<Self, ValueError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValueError::Empty);
        }
        if trimmed.len() > MAX_NAME_LEN {
            return Err(ValueError::InvalidColor(trimmed.chars().take(MAX_NAME_LEN).collect()));
        }

        if let Some(hex) = trimmed.strip_prefix('#') {
            let valid = matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit());
            return if valid {
                Ok(Self(format!("#{}", hex.to_ascii_lowercase())))
            } else {
                Err(ValueError::InvalidColor(trimmed.to_string()))
            };
        }

        let valid = trimmed
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == ' ' || c == '_' || c == '-');
        if valid {
            Ok(Self(trimmed.to_ascii_lowercase()))
        } else {
            Err(ValueError::InvalidColor(trimmed.to_string()))
        }
    }

    /// Normalised color text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Color {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Window dimensions in pixels, both in `1..=MAX_WINDOW_DIMENSION`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u32, u32)", into = "(u32, u32)")]
pub struct WindowSize {
    width: u32,
    height: u32,
}

impl WindowSize {
    /// Stock 800x600 window
    pub const DEFAULT: Self = Self {
        width: 800,
        height: 600,
    };

    /// Create checked window size
    ///
    /// # Errors
    /// `OutOfRange` if either dimension is zero, negative or too large
    pub fn new(width: i64, height: i64) -> Result<Self, ValueError> {
        Ok(Self {
            width: Self::dimension(width)?,
            height: Self::dimension(height)?,
        })
    }

    fn dimension(value: i64) -> Result<u32, ValueError> {
        u32::try_from(value)
            .ok()
            .filter(|v| (1..=MAX_WINDOW_DIMENSION).contains(v))
            .ok_or_else(|| ValueError::out_of_range(value, 1, MAX_WINDOW_DIMENSION))
    }

    /// Width in pixels
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// As `(width, height)`
    #[inline]
    #[must_use]
    pub fn as_tuple(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl TryFrom<(u32, u32)> for WindowSize {
    type Error = ValueError;

    fn try_from((width, height): (u32, u32)) -> Result<Self, Self::Error> {
        Self::new(i64::from(width), i64::from(height))
    }
}

impl From<WindowSize> for (u32, u32) {
    fn from(size: WindowSize) -> Self {
        size.as_tuple()
    }
}

impl PartialEq<(u32, u32)> for WindowSize {
    fn eq(&self, other: &(u32, u32)) -> bool {
        self.as_tuple() == *other
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Scene lighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LightingMode {
    /// No lights
    None,
    /// Default five-light kit
    LightKit,
    /// Three-point lighting
    ThreeLights,
}

impl LightingMode {
    /// Mode for a plain on/off answer
    #[inline]
    #[must_use]
    pub fn from_enabled(enabled: bool) -> Self {
        if enabled {
            Self::LightKit
        } else {
            Self::None
        }
    }

    /// Any lights at all
    #[inline]
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self != Self::None
    }

    /// Wire name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::LightKit => "light_kit",
            Self::ThreeLights => "three_lights",
        }
    }
}

impl FromStr for LightingMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised: String = s
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        match normalised.as_str() {
            "none" | "off" | "no_lights" => Ok(Self::None),
            "light_kit" | "lightkit" | "default" => Ok(Self::LightKit),
            "three_lights" | "threelights" | "three_point" => Ok(Self::ThreeLights),
            _ => Err(ValueError::UnknownLighting(s.trim().to_string())),
        }
    }
}

impl fmt::Display for LightingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Font size in points, `1..=MAX_FONT_SIZE`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FontSize(u32);

impl FontSize {
    /// Stock 12pt font
    pub const DEFAULT: Self = Self(12);

    /// Create checked font size
    ///
    /// # Errors
    /// `OutOfRange` outside `1..=MAX_FONT_SIZE`
    pub fn new(points: i64) -> Result<Self, ValueError> {
        u32::try_from(points)
            .ok()
            .filter(|p| (1..=MAX_FONT_SIZE).contains(p))
            .map(Self)
            .ok_or_else(|| ValueError::out_of_range(points, 1, MAX_FONT_SIZE))
    }

    /// Size in points
    #[inline]
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for FontSize {
    type Error = ValueError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl From<FontSize> for u32 {
    fn from(size: FontSize) -> Self {
        size.0
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opacity in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Opacity(f64);

impl Opacity {
    /// Stock grid opacity
    pub const DEFAULT_GRID: Self = Self(0.1);

    /// Create checked opacity
    ///
    /// # Errors
    /// `OutOfRange` for non-finite values or values outside `[0, 1]`
    pub fn new(value: f64) -> Result<Self, ValueError> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValueError::out_of_range(value, 0, 1))
        }
    }

    /// Opacity value
    #[inline]
    #[must_use]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Opacity {
    type Error = ValueError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Opacity> for f64 {
    fn from(opacity: Opacity) -> Self {
        opacity.0
    }
}

impl fmt::Display for Opacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named color map (`viridis`, `plasma`, `coolwarm`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorMap(pub(crate) String);

impl ColorMap {
    /// Create checked color map name
    ///
    /// # Errors
    /// `Empty` for blank input, `InvalidColorMap` for characters outside
    /// letters, digits, `_`, `-` and `.`
    pub fn parse(input: &str) -> Result<Self, ValueError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValueError::Empty);
        }
        let valid = trimmed.len() <= MAX_NAME_LEN
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if valid {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValueError::InvalidColorMap(trimmed.to_string()))
        }
    }

    /// Color map name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ColorMap {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ColorMap> for String {
    fn from(map: ColorMap) -> Self {
        map.0
    }
}

impl fmt::Display for ColorMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
