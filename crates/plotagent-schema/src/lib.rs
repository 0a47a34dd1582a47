//! plotagent Schema
//!
//! The fixed set of named, typed, range-checked fields a model's
//! configuration payload is validated against, and the target trait those
//! fields are applied to.
//!
//! # Architecture
//!
//! ```text
//! JSON map → ConfigPatch::from_map → ConfigPatch → apply_to → SettingsTarget
//!               (validate all)       (immutable)    (infallible)
//! ```
//!
//! # Example
//!
//! ```
//! use plotagent_schema::{ConfigPatch, PlotterSettings};
//! use serde_json::json;
//!
//! let payload = json!({"background_color": "blue", "window_size": [1024, 768]});
//! let patch = ConfigPatch::from_value(&payload).unwrap();
//!
//! let mut settings = PlotterSettings::default();
//! patch.apply_to(&mut settings);
//! assert_eq!(settings.window_size, (1024, 768));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod coerce;
pub mod error;
pub mod field;
pub mod patch;
pub mod payload;
pub mod settings;
pub mod value;

pub use error::{FieldIssue, ValidationError, ValueError};
pub use field::{Setting, SettingField, UnknownField};
pub use patch::ConfigPatch;
pub use payload::{payload_json_schema, LightingSpec, PayloadSchema};
pub use settings::{PlotterSettings, SettingsTarget};
pub use value::{Color, ColorMap, FontSize, LightingMode, Opacity, WindowSize};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
