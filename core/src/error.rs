//! Error taxonomy for declaring and using DSL fields.
//!
//! [`DefinitionError`] reports a malformed schema, [`ValidationError`] a bad
//! runtime input to an accessor. Both surface through [`DslError`].

use dsl_factory_inflector::InflectorError;
use thiserror::Error;

/// Malformed schema, detected while declaring fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// Field name is empty or whitespace-only.
    #[error("field name cannot be empty")]
    EmptyName,
    /// Two declarations claim the same operation name.
    #[error("duplicate field in definition: {0}")]
    DuplicateField(String),
    /// The inflector returned the plural name unchanged.
    #[error(
        "can not singularize {0}, please make sure to provide the plural form and that the inflector can singularize it"
    )]
    CannotSingularize(String),
    /// Array field declared with both an item constraint and a sub-schema.
    #[error("{0} item type can not be given at the same time as a sub-schema")]
    ConflictingItemType(String),
    /// Hash field declared with both a value constraint and a sub-schema.
    #[error("{0} value type can not be given at the same time as a sub-schema")]
    ConflictingValueType(String),
    /// A hash field was assigned through its plural accessor.
    #[error(
        "hashes do not support setting values with the plural form, please use {singular} to define items of {field}"
    )]
    PluralHashAssignment { field: String, singular: String },
}

/// Bad input to an accessor call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A scalar or plural array assignment failed validation.
    #[error("{0} is not valid")]
    InvalidValue(String),
    /// An array item failed the item constraint.
    #[error("{0} is not valid")]
    InvalidItem(String),
    /// A hash key failed the key constraint.
    #[error("{0}'s key is not valid")]
    InvalidKey(String),
    /// A hash value failed the value constraint.
    #[error("{0}'s value is not valid")]
    InvalidEntryValue(String),
    /// Hash entry value given both as a value and as a nested block.
    #[error("{0}: value can not be given at the same time as a block for a hash")]
    AmbiguousEntry(String),
    /// Hash entry accessor called without a key.
    #[error("{0} requires a key")]
    MissingKey(String),
    /// Accessor called with more arguments than it accepts.
    #[error("{field} accepts at most {max} argument(s), got {given}")]
    TooManyArguments {
        field: String,
        max: usize,
        given: usize,
    },
    /// A block was passed to an accessor that takes none.
    #[error("{0} does not accept a block")]
    UnexpectedBlock(String),
    /// A block was passed to an item accessor whose field has no sub-schema.
    #[error("{0} has no sub-schema to evaluate a block against")]
    NoSubSchema(String),
}

/// Any failure raised while declaring or using a DSL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DslError {
    #[error(transparent)]
    Definition(#[from] DefinitionError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The host has no operation with this name.
    #[error("undefined operation: {0}")]
    UnknownOperation(String),
    /// A user callback or custom operation failed.
    #[error("callback failed: {0}")]
    Callback(String),
}

impl DslError {
    /// Returns `true` for declaration-time schema errors.
    pub fn is_definition(&self) -> bool {
        matches!(self, Self::Definition(_))
    }

    /// Returns `true` for runtime input errors.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Convenience alias for results with [`DslError`].
pub type Result<T> = std::result::Result<T, DslError>;

/// Errors loading a [`DslConfig`](crate::DslConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The configured inflection table does not compile.
    #[error("inflection error: {0}")]
    Inflection(#[from] InflectorError),
}
