//! Field specifications and the option builders used to declare them.

use std::fmt;
use std::sync::Arc;

use crate::config::ItemCallbackArgs;
use crate::constraint::{Constraint, Predicate};
use crate::error::Result;
use crate::generator::{Generator, Script};
use crate::host::Host;
use crate::nested::NestedSchemaEvaluator;
use crate::value::Value;

/// Invoked after a successful assignment, with the host as receiver.
///
/// Receives `[value]` for scalars and plural array assignments, the item
/// (wrapped in a one-element list by default) for singular array
/// assignments, and `[key, value]` for hash entries. Its return value
/// becomes the accessor's return value.
pub type Callback = Arc<dyn Fn(&mut Host, &[Value]) -> Result<Value> + Send + Sync>;

/// Shape of a declared field.
#[derive(Clone)]
pub enum FieldKind {
    Scalar {
        constraint: Constraint,
    },
    Array {
        singular: String,
        item: Option<Constraint>,
        schema: Option<NestedSchemaEvaluator>,
        item_callback: ItemCallbackArgs,
    },
    Hash {
        singular: String,
        key: Option<Constraint>,
        value: Option<Constraint>,
        schema: Option<NestedSchemaEvaluator>,
    },
}

/// Immutable description of one declared field.
#[derive(Clone)]
pub struct FieldSpec {
    name: String,
    kind: FieldKind,
    validation: Option<Predicate>,
    callback: Option<Callback>,
}

impl FieldSpec {
    pub(crate) fn new(
        name: String,
        kind: FieldKind,
        validation: Option<Predicate>,
        callback: Option<Callback>,
    ) -> Self {
        Self {
            name,
            kind,
            validation,
            callback,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Name of the per-item accessor of an array or hash field.
    pub fn singular_name(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Scalar { .. } => None,
            FieldKind::Array { singular, .. } | FieldKind::Hash { singular, .. } => Some(singular),
        }
    }

    pub fn callback(&self) -> Option<&Callback> {
        self.callback.as_ref()
    }

    /// Returns `true` if the field builds its items from a sub-schema.
    pub fn is_nested(&self) -> bool {
        matches!(
            &self.kind,
            FieldKind::Array {
                schema: Some(_),
                ..
            } | FieldKind::Hash {
                schema: Some(_),
                ..
            }
        )
    }

    /// Runs the scalar constraint and the user validation, if any.
    pub(crate) fn accepts(&self, value: &Value) -> bool {
        let typed = match &self.kind {
            FieldKind::Scalar { constraint } => constraint.check(value),
            _ => true,
        };
        typed && self.validation.as_ref().is_none_or(|validate| validate(value))
    }

    fn kind_name(&self) -> &'static str {
        match self.kind {
            FieldKind::Scalar { .. } => "scalar",
            FieldKind::Array { .. } => "array",
            FieldKind::Hash { .. } => "hash",
        }
    }
}

impl fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("kind", &self.kind_name())
            .field("singular", &self.singular_name())
            .field("nested", &self.is_nested())
            .field("validation", &self.validation.is_some())
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Options for scalar declarations (`any`, `string`, `symbol`, ...).
///
/// # Examples
///
/// ```
/// use dsl_factory_core::{ScalarOptions, Value};
///
/// let options = ScalarOptions::new()
///     .validation(|v| v.as_i64().is_some_and(|n| n > 0))
///     .callback(|_host, args| Ok(args[0].clone()));
/// # let _ = options;
/// ```
#[derive(Clone, Default)]
pub struct ScalarOptions {
    pub(crate) validation: Option<Predicate>,
    pub(crate) callback: Option<Callback>,
}

impl ScalarOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects assignments for which `validation` returns `false`.
    pub fn validation<F>(mut self, validation: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.validation = Some(Arc::new(validation));
        self
    }

    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut Host, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }
}

/// Options for `array` declarations.
#[derive(Clone, Default)]
pub struct ArrayOptions {
    pub(crate) item: Option<Constraint>,
    pub(crate) callback: Option<Callback>,
    pub(crate) schema: Option<Arc<Script>>,
}

impl ArrayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrains every item.
    pub fn of(mut self, item: Constraint) -> Self {
        self.item = Some(item);
        self
    }

    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut Host, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Builds items from a nested sub-schema.
    pub fn schema<F>(mut self, script: F) -> Self
    where
        F: Fn(&mut Generator) -> Result<()> + Send + Sync + 'static,
    {
        self.schema = Some(Arc::new(script));
        self
    }
}

/// Options for `hash` declarations.
#[derive(Clone, Default)]
pub struct HashOptions {
    pub(crate) key: Option<Constraint>,
    pub(crate) value: Option<Constraint>,
    pub(crate) callback: Option<Callback>,
    pub(crate) schema: Option<Arc<Script>>,
}

impl HashOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrains every key.
    pub fn keys(mut self, key: Constraint) -> Self {
        self.key = Some(key);
        self
    }

    /// Constrains every value.
    pub fn values(mut self, value: Constraint) -> Self {
        self.value = Some(value);
        self
    }

    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut Host, &[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Builds entry values from a nested sub-schema.
    pub fn schema<F>(mut self, script: F) -> Self
    where
        F: Fn(&mut Generator) -> Result<()> + Send + Sync + 'static,
    {
        self.schema = Some(Arc::new(script));
        self
    }
}
