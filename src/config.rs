//! Configuration for catalog loading and reporting
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (doc-schemas.toml)
//! - Environment variables (DOC_SCHEMAS__*)
//!
//! ## Example config file (doc-schemas.toml):
//! ```toml
//! [catalog]
//! path = "./catalog"
//! verify = true
//!
//! [report]
//! output_format = "pretty"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::{load_from_directory, Catalog};
use crate::error::Result;
use crate::sections::FactoryRegistry;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Catalog source
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory of family files; the embedded catalog is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Check factories and applicability for every section at load
    #[serde(default = "default_true")]
    pub verify: bool,
}

/// Report configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format (pretty or compact)
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// Output format for JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl OutputFormat {
    /// Render a JSON value in this format
    pub fn render(&self, value: &serde_json::Value) -> serde_json::Result<String> {
        match self {
            OutputFormat::Pretty => serde_json::to_string_pretty(value),
            OutputFormat::Compact => serde_json::to_string(value),
        }
    }
}

fn default_true() -> bool {
    true
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: None,
            verify: true,
        }
    }
}

impl SchemaConfig {
    /// Load configuration from default locations
    pub fn load() -> std::result::Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the defaults
    pub fn load_from(config_path: Option<&str>) -> std::result::Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "doc-schemas.toml",
            ".doc-schemas.toml",
            "config/doc-schemas.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "doc-schemas", "doc-schemas") {
            let xdg_config = config_dir.config_dir().join("doc-schemas.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // DOC_SCHEMAS__CATALOG__PATH, DOC_SCHEMAS__REPORT__OUTPUT_FORMAT, ...
        builder = builder.add_source(
            Environment::with_prefix("DOC_SCHEMAS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Build the catalog from the configured source, verifying it against the
    /// built-in factories when enabled
    pub fn load_catalog(&self) -> Result<Catalog> {
        let catalog = match &self.catalog.path {
            Some(path) => load_from_directory(path)?,
            None => Catalog::embedded()?,
        };

        if self.catalog.verify {
            FactoryRegistry::builtin().verify(&catalog)?;
        }

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SchemaConfig::default();
        assert!(config.catalog.verify);
        assert!(config.catalog.path.is_none());
        assert_eq!(config.report.output_format, OutputFormat::Pretty);
    }

    #[test]
    fn test_serialize_config() {
        let config = SchemaConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[catalog]"));
        assert!(toml_str.contains("[report]"));
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[catalog]\nverify = false\n\n[report]\noutput_format = \"compact\"\n").unwrap();

        let config = SchemaConfig::load_from(path.to_str()).unwrap();
        assert!(!config.catalog.verify);
        assert_eq!(config.report.output_format, OutputFormat::Compact);
    }

    #[test]
    fn test_save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("saved.toml");
        let mut config = SchemaConfig::default();
        config.catalog.path = Some(PathBuf::from("/srv/catalog"));
        config.save(path.to_str().unwrap()).unwrap();

        let loaded = SchemaConfig::load_from(path.to_str()).unwrap();
        assert_eq!(loaded.catalog.path, Some(PathBuf::from("/srv/catalog")));
    }

    #[test]
    fn test_embedded_catalog_loads_and_verifies() {
        let catalog = SchemaConfig::default().load_catalog().unwrap();
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_missing_catalog_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SchemaConfig::default();
        config.catalog.path = Some(dir.path().join("absent"));

        assert!(config.load_catalog().is_err());
    }

    #[test]
    fn test_compact_output() {
        let value = serde_json::json!({ "a": [1, 2] });
        assert_eq!(OutputFormat::Compact.render(&value).unwrap(), r#"{"a":[1,2]}"#);
    }
}
