//! CLI configuration file
//!
//! TOML or YAML, picked by extension:
//!
//! ```toml
//! [initial]
//! background_color = "black"
//! window_size = [1024, 768]
//!
//! [translations]
//! "Set background to blue" = "background_color=blue"
//!
//! [ingest]
//! max_payload_bytes = 4096
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use plotagent_ingest::{IngestOptions, TranslationError, TranslationTable};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Configuration loading failures
#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigFileError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported config format: {0} (expected .toml, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),
}

/// Contents of the configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    /// Partial settings payload applied on top of the defaults
    pub(crate) initial: Map<String, Value>,
    /// Extra description → assignment entries
    pub(crate) translations: IndexMap<String, String>,
    /// Ingestion options
    pub(crate) ingest: IngestOptions,
}

impl AppConfig {
    /// Load from a `.toml`, `.yaml` or `.yml` file
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let parse: fn(&str) -> Result<Self, ConfigFileError> = match format.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("yaml" | "yml") => Self::from_yaml_str,
            _ => return Err(ConfigFileError::UnsupportedFormat(path.to_path_buf())),
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = parse(&text)?;
        tracing::debug!(
            "Loaded config from {}: {} initial key(s), {} translation(s)",
            path.display(),
            config.initial.len(),
            config.translations.len()
        );
        Ok(config)
    }

    pub(crate) fn from_toml_str(text: &str) -> Result<Self, ConfigFileError> {
        Ok(toml::from_str(text)?)
    }

    pub(crate) fn from_yaml_str(text: &str) -> Result<Self, ConfigFileError> {
        // an empty YAML document is null
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Stock translations with the configured entries merged over them
    pub(crate) fn translation_table(&self) -> Result<TranslationTable, TranslationError> {
        let mut extra = TranslationTable::new();
        for (description, assignment) in &self.translations {
            extra.insert(description.as_str(), assignment)?;
        }
        let mut table = TranslationTable::with_defaults();
        table.merge(&extra);
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotagent_schema::SettingField;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const TOML: &str = r#"
[initial]
background_color = "black"
window_size = [1024, 768]

[translations]
"Set background to blue" = "background_color=blue"
"Hide axes" = "show_axes=false"

[ingest]
max_payload_bytes = 4096
"#;

    const YAML: &str = "
initial:
  lighting: three_lights
ingest:
  unwrap_code_fences: false
";

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_toml() {
        let file = write_temp(".toml", TOML);
        let config = AppConfig::load(file.path()).unwrap();

        assert_eq!(config.initial.len(), 2);
        assert_eq!(config.initial["window_size"], serde_json::json!([1024, 768]));
        assert_eq!(config.ingest.max_payload_bytes, 4096);
        assert!(config.ingest.unwrap_code_fences);
        assert_eq!(config.translations.len(), 2);
    }

    #[test]
    fn loads_yaml() {
        let file = write_temp(".yml", YAML);
        let config = AppConfig::load(file.path()).unwrap();

        assert_eq!(config.initial["lighting"], serde_json::json!("three_lights"));
        assert!(!config.ingest.unwrap_code_fences);
        assert!(config.translations.is_empty());
    }

    #[test]
    fn empty_files_use_defaults() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
        assert_eq!(AppConfig::from_yaml_str("\n").unwrap(), AppConfig::default());
    }

    #[test]
    fn rejects_unknown_extension() {
        let file = write_temp(".json", "{}");
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigFileError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            AppConfig::load(&missing),
            Err(ConfigFileError::Io { .. })
        ));
    }

    #[test]
    fn reports_syntax_errors() {
        assert!(matches!(
            AppConfig::from_toml_str("[initial"),
            Err(ConfigFileError::Toml(_))
        ));
        assert!(matches!(
            AppConfig::from_yaml_str("initial: [unclosed"),
            Err(ConfigFileError::Yaml(_))
        ));
    }

    #[test]
    fn translations_merge_over_defaults() {
        let config = AppConfig::from_toml_str(TOML).unwrap();
        let table = config.translation_table().unwrap();

        assert_eq!(
            table.lookup("Set background to blue").map(|a| a.field()),
            Some(SettingField::BackgroundColor)
        );
        assert_eq!(
            table.lookup("Hide axes").map(|a| a.text()),
            Some("show_axes=false".to_string())
        );
        assert_eq!(table.len(), plotagent_ingest::DEFAULT_TRANSLATIONS.len() + 1);
    }

    #[test]
    fn bad_translation_is_reported() {
        let config = AppConfig::from_toml_str("[translations]\n\"Shout\" = \"volume=11\"").unwrap();
        assert!(config.translation_table().is_err());
    }
}
