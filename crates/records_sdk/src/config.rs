//! Handler configuration, loadable from TOML or YAML.
//!
//! Every section and every option is optional; anything left out keeps its
//! default.
//!
//! # Example
//!
//! ```rust
//! use records_sdk::HandlerConfig;
//!
//! let toml = r#"
//! [csv]
//! delimiter = ","
//!
//! [sql]
//! batch_rows = 100
//! "#;
//!
//! let config = HandlerConfig::from_toml(toml).unwrap();
//! assert_eq!(config.csv.delimiter, ',');
//! assert_eq!(config.csv.extension, "csv");
//! assert_eq!(config.sql.batch_rows, 100);
//! assert!(config.json.pretty);
//! ```

use records_sql::SqlOptions;
use records_text::{CsvOptions, JsonOptions};
use records_xlsx::XlsxOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a [`HandlerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    Toml(String),

    /// File I/O error
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported configuration format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// Parsed but unusable values
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
}

/// Option sets for every codec the orchestrator can build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Delimited text options
    pub csv: CsvOptions,
    /// Structured text options
    pub json: JsonOptions,
    /// Spreadsheet options
    pub xlsx: XlsxOptions,
    /// Relational options
    pub sql: SqlOptions,
}

impl HandlerConfig {
    /// Parses a configuration from a YAML string.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: HandlerConfig = serde_yaml_ng::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: HandlerConfig =
            toml::from_str(content).map_err(|e| ConfigError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file, choosing the parser from its extension.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let format = detect_format(path)?;
        let content = std::fs::read_to_string(path)?;

        match format {
            ConfigFormat::Yaml => Self::from_yaml(&content),
            ConfigFormat::Toml => Self::from_toml(&content),
        }
    }

    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.csv.delimiter.is_ascii() || matches!(self.csv.delimiter, '"' | '\n' | '\r') {
            return Err(ConfigError::Invalid(format!(
                "csv.delimiter '{}' must be a single ASCII character other than a quote or line break",
                self.csv.delimiter.escape_default()
            )));
        }

        if self.xlsx.file_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "xlsx.file_name cannot be empty".to_string(),
            ));
        }

        if self.sql.batch_rows == 0 {
            return Err(ConfigError::Invalid(
                "sql.batch_rows must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Detects the configuration format from a file extension.
///
/// * `.yaml`, `.yml` → [`ConfigFormat::Yaml`]
/// * `.toml` → [`ConfigFormat::Toml`]
pub fn detect_format(path: &Path) -> Result<ConfigFormat, ConfigError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ConfigError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(ConfigFormat::Yaml),
        "toml" => Ok(ConfigFormat::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_documents_give_defaults() {
        assert_eq!(HandlerConfig::from_toml("").unwrap(), HandlerConfig::default());
        assert_eq!(HandlerConfig::from_yaml("{}").unwrap(), HandlerConfig::default());
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
json:
  pretty: false
xlsx:
  file_name: delivery.xlsx
  heading: false
sql:
  enforce_foreign_keys: false
"#;
        let config = HandlerConfig::from_yaml(yaml).unwrap();

        assert!(!config.json.pretty);
        assert_eq!(config.json.extension, "json");
        assert_eq!(config.xlsx.file_name, "delivery.xlsx");
        assert!(!config.xlsx.heading);
        assert!(!config.sql.enforce_foreign_keys);
        assert!(config.sql.create_tables);
        assert_eq!(config.csv, CsvOptions::default());
    }

    #[test]
    fn test_toml_syntax_error() {
        let err = HandlerConfig::from_toml("[csv\ndelimiter = ','").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = HandlerConfig::from_toml("[sql]\nbatch_rows = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = HandlerConfig::from_yaml("csv:\n  delimiter: \"§\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = HandlerConfig::from_yaml("xlsx:\n  file_name: \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(Path::new("handlers.yml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("handlers.YAML")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            detect_format(Path::new("handlers.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert!(matches!(
            detect_format(Path::new("handlers.ini")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            detect_format(Path::new("handlers")),
            Err(ConfigError::InvalidExtension)
        ));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("handlers.toml");
        std::fs::write(&path, "[csv]\nextension = \"txt\"\n").unwrap();

        let config = HandlerConfig::from_file(&path).unwrap();
        assert_eq!(config.csv.extension, "txt");

        let missing = HandlerConfig::from_file(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io(_)));
    }
}
