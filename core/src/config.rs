//! Generator options and their YAML configuration file.
//!
//! # Example YAML
//!
//! ```yaml
//! options:
//!   inspectable: true
//!   item_callback: wrapped
//!   sub_schemas: cached
//! inflections:
//!   base: english
//!   irregulars:
//!     - singular: cactus
//!       plural: cacti
//!   uncountables:
//!     - metadata
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use dsl_factory_inflector::{InflectionTable, Inflector, RuleInflector};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What the callback of an array field receives when an item is appended
/// through the singular accessor.
///
/// Plural assignments always pass the whole new list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemCallbackArgs {
    /// A one-element list wrapping the new item (the default).
    #[default]
    Wrapped,
    /// The new item itself.
    Bare,
}

/// When nested sub-schema definitions are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubSchemaPolicy {
    /// Generate on first use, then reuse (the default).
    #[default]
    Cached,
    /// Generate again for every nested block.
    Rebuild,
}

/// Options a [`Generator`](crate::Generator) applies to every declaration,
/// and that nested generators inherit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GeneratorOptions {
    /// Install an `inspect` operation on attach.
    #[serde(default)]
    pub inspectable: bool,
    #[serde(default)]
    pub item_callback: ItemCallbackArgs,
    #[serde(default)]
    pub sub_schemas: SubSchemaPolicy,
}

impl GeneratorOptions {
    pub fn inspectable(mut self, inspectable: bool) -> Self {
        self.inspectable = inspectable;
        self
    }

    pub fn item_callback(mut self, item_callback: ItemCallbackArgs) -> Self {
        self.item_callback = item_callback;
        self
    }

    pub fn sub_schemas(mut self, sub_schemas: SubSchemaPolicy) -> Self {
        self.sub_schemas = sub_schemas;
        self
    }
}

/// Top-level configuration file.
///
/// # Examples
///
/// ```
/// use dsl_factory_core::{DslConfig, ItemCallbackArgs};
///
/// let yaml = r#"
/// options:
///   inspectable: true
///   item_callback: bare
/// "#;
/// let config: DslConfig = serde_yaml::from_str(yaml).unwrap();
/// assert!(config.options.inspectable);
/// assert_eq!(config.options.item_callback, ItemCallbackArgs::Bare);
/// assert!(config.inflections.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DslConfig {
    #[serde(default)]
    pub options: GeneratorOptions,
    /// Custom vocabulary; the English rules apply when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflections: Option<InflectionTable>,
}

impl DslConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be read, or
    /// [`ConfigError::YamlError`] if parsing fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the file cannot be written, or
    /// [`ConfigError::YamlError`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Builds the configured inflector.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Inflection`] if a rule pattern is invalid.
    pub fn inflector(&self) -> Result<Arc<dyn Inflector>, ConfigError> {
        let inflector = match &self.inflections {
            Some(table) => table.compile()?,
            None => RuleInflector::english(),
        };
        Ok(Arc::new(inflector))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
options:
  inspectable: true
  item_callback: bare
  sub_schemas: rebuild
inflections:
  base: english
  irregulars:
    - singular: cactus
      plural: cacti
  uncountables:
    - metadata
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config: DslConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert!(config.options.inspectable);
        assert_eq!(config.options.item_callback, ItemCallbackArgs::Bare);
        assert_eq!(config.options.sub_schemas, SubSchemaPolicy::Rebuild);
        let table = config.inflections.as_ref().unwrap();
        assert_eq!(table.irregulars.len(), 1);
        assert_eq!(table.uncountables, vec!["metadata"]);
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: DslConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, DslConfig::default());
        assert_eq!(config.options.item_callback, ItemCallbackArgs::Wrapped);
        assert_eq!(config.options.sub_schemas, SubSchemaPolicy::Cached);
    }

    #[test]
    fn test_inflector_uses_table() {
        let config: DslConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        let inflector = config.inflector().unwrap();
        assert_eq!(inflector.singularize("cacti"), "cactus");
        assert_eq!(inflector.singularize("metadata"), "metadata");

        let english = DslConfig::default().inflector().unwrap();
        assert_eq!(english.singularize("metadata"), "metadatum");
    }

    #[test]
    fn test_inflector_reports_bad_pattern() {
        let yaml = r#"
inflections:
  singulars:
    - pattern: "(("
      replacement: ""
"#;
        let config: DslConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config.inflector(),
            Err(ConfigError::Inflection(_))
        ));
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dsl.yml");

        let original: DslConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        original.save(&path).unwrap();

        let loaded = DslConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }
}
