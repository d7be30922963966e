//! YAML-serializable inflection tables.
//!
//! A table describes a vocabulary that [`InflectionTable::compile`] turns
//! into a [`RuleInflector`]. Rules listed later take priority, and every
//! table entry takes priority over its base.
//!
//! # Example YAML
//!
//! ```yaml
//! base: english
//! singulars:
//!   - pattern: "(?i)(kudo)s$"
//!     replacement: "${1}s"
//! plurals: []
//! irregulars:
//!   - singular: cactus
//!     plural: cacti
//! uncountables:
//!   - metadata
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rules::{Rule, RuleInflector};

/// Rule set a table is layered over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    /// The built-in English rules (the default).
    #[default]
    English,
    /// No rules; only the table's own entries apply.
    Empty,
}

/// A regex rule as written in a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Regular expression matched against the whole word.
    pub pattern: String,
    /// Replacement template (`${1}` expands capture groups).
    pub replacement: String,
}

/// An irregular singular/plural pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrregularWord {
    pub singular: String,
    pub plural: String,
}

/// Serializable description of an inflector.
///
/// # Examples
///
/// ```
/// use dsl_factory_inflector::{Base, InflectionTable, Inflector};
///
/// let yaml = r#"
/// base: empty
/// singulars:
///   - pattern: "en$"
///     replacement: ""
/// "#;
/// let table: InflectionTable = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(table.base, Base::Empty);
///
/// let inflector = table.compile().unwrap();
/// assert_eq!(inflector.singularize("posten"), "post");
/// assert_eq!(inflector.singularize("items"), "items");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InflectionTable {
    #[serde(default)]
    pub base: Base,
    #[serde(default)]
    pub singulars: Vec<RuleSpec>,
    #[serde(default)]
    pub plurals: Vec<RuleSpec>,
    #[serde(default)]
    pub irregulars: Vec<IrregularWord>,
    #[serde(default)]
    pub uncountables: Vec<String>,
}

impl InflectionTable {
    /// Loads a table from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::InflectorError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::InflectorError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let table = serde_yaml::from_reader(reader)?;
        Ok(table)
    }

    /// Saves the table as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::InflectorError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::InflectorError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// Compiles the table into an inflector.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPattern`](crate::InflectorError::InvalidPattern) for
    /// the first rule whose pattern does not compile.
    pub fn compile(&self) -> Result<RuleInflector> {
        let mut inflector = match self.base {
            Base::English => RuleInflector::english(),
            Base::Empty => RuleInflector::empty(),
        };
        for spec in &self.singulars {
            inflector.add_singular(Rule::new(&spec.pattern, spec.replacement.as_str())?);
        }
        for spec in &self.plurals {
            inflector.add_plural(Rule::new(&spec.pattern, spec.replacement.as_str())?);
        }
        for pair in &self.irregulars {
            inflector.add_irregular(&pair.singular, &pair.plural);
        }
        for word in &self.uncountables {
            inflector.add_uncountable(word);
        }
        Ok(inflector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Inflector, InflectorError};

    fn sample_yaml() -> &'static str {
        r#"
base: english
singulars:
  - pattern: "(?i)(kudo)s$"
    replacement: "${1}s"
irregulars:
  - singular: cactus
    plural: cacti
uncountables:
  - metadata
"#
    }

    #[test]
    fn test_deserialize_defaults() {
        let table: InflectionTable = serde_yaml::from_str("{}").unwrap();
        assert_eq!(table.base, Base::English);
        assert!(table.singulars.is_empty());
        assert!(table.irregulars.is_empty());
    }

    #[test]
    fn test_compile_layers_over_english() {
        let table: InflectionTable = serde_yaml::from_str(sample_yaml()).unwrap();
        let inflector = table.compile().unwrap();
        assert_eq!(inflector.singularize("kudos"), "kudos");
        assert_eq!(inflector.singularize("cacti"), "cactus");
        assert_eq!(inflector.singularize("metadata"), "metadata");
        assert_eq!(inflector.singularize("items"), "item");
    }

    #[test]
    fn test_compile_rejects_bad_pattern() {
        let table = InflectionTable {
            singulars: vec![RuleSpec {
                pattern: "([".into(),
                replacement: String::new(),
            }],
            ..InflectionTable::default()
        };
        assert!(matches!(
            table.compile(),
            Err(InflectorError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inflections.yml");

        let original: InflectionTable = serde_yaml::from_str(sample_yaml()).unwrap();
        original.save(&path).unwrap();

        let loaded = InflectionTable::load(&path).unwrap();
        assert_eq!(loaded, original);
    }
}
