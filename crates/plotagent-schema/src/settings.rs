//! Settings targets
//!
//! The render surface is owned by the caller. It only has to accept typed
//! settings one at a time and report its current state; the ingestion layer
//! decides when it is safe to call [`SettingsTarget::apply_setting`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::Setting;
use crate::patch::ConfigPatch;
use crate::value::{Color, ColorMap, FontSize, LightingMode, Opacity, WindowSize};

/// Mutable settings of a plotting surface
///
/// Implementations must not fail: every value handed in has already been
/// validated.
pub trait SettingsTarget {
    /// Store one validated setting
    fn apply_setting(&mut self, setting: Setting);

    /// Current value of every field the target exposes
    fn snapshot(&self) -> ConfigPatch;
}

/// Plotter settings with the stock defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotterSettings {
    /// Scene background
    pub background_color: Color,
    /// Render window in pixels
    pub window_size: WindowSize,
    /// Lighting setup
    pub lighting: LightingMode,
    /// Label and title font size
    pub font_size: FontSize,
    /// Axes widget visible
    pub show_axes: bool,
    /// Bounds grid visible
    pub show_grid: bool,
    /// Bounds grid opacity
    pub grid_opacity: Opacity,
    /// Mesh edge color
    pub edge_color: Color,
    /// Mesh edges drawn
    pub show_edges: bool,
    /// Scalar color map
    pub color_map: ColorMap,
}

impl PlotterSettings {
    /// Default settings
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for PlotterSettings {
    fn default() -> Self {
        Self {
            background_color: Color(String::from("white")),
            window_size: WindowSize::DEFAULT,
            lighting: LightingMode::LightKit,
            font_size: FontSize::DEFAULT,
            show_axes: true,
            show_grid: true,
            grid_opacity: Opacity::DEFAULT_GRID,
            edge_color: Color(String::from("black")),
            show_edges: false,
            color_map: ColorMap(String::from("viridis")),
        }
    }
}

impl SettingsTarget for PlotterSettings {
    fn apply_setting(&mut self, setting: Setting) {
        match setting {
            Setting::BackgroundColor(color) => self.background_color = color,
            Setting::WindowSize(size) => self.window_size = size,
            Setting::Lighting(mode) => self.lighting = mode,
            Setting::FontSize(size) => self.font_size = size,
            Setting::ShowAxes(show) => self.show_axes = show,
            Setting::ShowGrid(show) => self.show_grid = show,
            Setting::GridOpacity(opacity) => self.grid_opacity = opacity,
            Setting::EdgeColor(color) => self.edge_color = color,
            Setting::ShowEdges(show) => self.show_edges = show,
            Setting::ColorMap(map) => self.color_map = map,
        }
    }

    fn snapshot(&self) -> ConfigPatch {
        [
            Setting::BackgroundColor(self.background_color.clone()),
            Setting::WindowSize(self.window_size),
            Setting::Lighting(self.lighting),
            Setting::FontSize(self.font_size),
            Setting::ShowAxes(self.show_axes),
            Setting::ShowGrid(self.show_grid),
            Setting::GridOpacity(self.grid_opacity),
            Setting::EdgeColor(self.edge_color.clone()),
            Setting::ShowEdges(self.show_edges),
            Setting::ColorMap(self.color_map.clone()),
        ]
        .into_iter()
        .collect()
    }
}

impl fmt::Display for PlotterSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for setting in self.snapshot().iter() {
            writeln!(f, "{setting}")?;
        }
        Ok(())
    }
}
