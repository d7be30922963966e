//! Error types for inflection table loading and compilation.

use thiserror::Error;

/// Errors that can occur while building an inflector.
#[derive(Debug, Error)]
pub enum InflectorError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A rule pattern is not a valid regular expression.
    #[error("invalid inflection pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Convenience alias for results with [`InflectorError`].
pub type Result<T> = std::result::Result<T, InflectorError>;
