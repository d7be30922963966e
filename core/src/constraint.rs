//! Value category checks used by typed fields.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// A user-supplied value predicate.
pub type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Membership test against a category of [`Value`]s.
///
/// Used for typed scalars, array items, and hash keys/values.
///
/// # Examples
///
/// ```
/// use dsl_factory_core::{Constraint, Value};
///
/// assert!(Constraint::Numeric.check(&Value::from(3)));
/// assert!(!Constraint::Numeric.check(&Value::from("3")));
///
/// let short = Constraint::custom(|v| v.as_str().is_some_and(|s| s.len() <= 3));
/// assert!(short.check(&Value::from("abc")));
/// assert!(!short.check(&Value::from("abcd")));
/// ```
#[derive(Clone, Default)]
pub enum Constraint {
    /// Accepts every value, including [`Value::Nil`].
    #[default]
    Any,
    String,
    Atom,
    Numeric,
    Boolean,
    Callable,
    /// A host built from a sub-schema.
    Nested,
    /// A [`Value::List`].
    Sequence,
    /// A [`Value::Map`].
    Mapping,
    /// Arbitrary predicate.
    Custom(Predicate),
}

impl Constraint {
    /// Builds a [`Constraint::Custom`] from a closure.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    /// Returns `true` if `value` belongs to this category.
    pub fn check(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::String => value.is_string(),
            Self::Atom => value.is_atom(),
            Self::Numeric => value.is_numeric(),
            Self::Boolean => value.is_boolean(),
            Self::Callable => value.is_callable(),
            Self::Nested => value.is_nested(),
            Self::Sequence => value.is_list(),
            Self::Mapping => value.is_map(),
            Self::Custom(predicate) => predicate(value),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::String => "string",
            Self::Atom => "atom",
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Callable => "callable",
            Self::Nested => "nested",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Host, Mapping};

    #[test]
    fn test_builtin_categories() {
        let samples = [
            (Constraint::String, Value::from("a")),
            (Constraint::Atom, Value::atom("a")),
            (Constraint::Numeric, Value::from(1.5)),
            (Constraint::Boolean, Value::from(false)),
            (Constraint::Callable, Value::callable(|_| Value::Nil)),
            (Constraint::Nested, Value::from(Host::new())),
            (Constraint::Sequence, Value::from(vec![1])),
            (Constraint::Mapping, Value::from(Mapping::new())),
        ];
        for (constraint, value) in &samples {
            assert!(constraint.check(value), "{constraint:?} rejected {value:?}");
            assert!(!constraint.check(&Value::Nil), "{constraint:?} accepted nil");
        }
    }

    #[test]
    fn test_any_accepts_nil() {
        assert!(Constraint::Any.check(&Value::Nil));
        assert!(Constraint::default().check(&Value::from("x")));
    }

    #[test]
    fn test_booleans_are_not_numeric() {
        assert!(!Constraint::Numeric.check(&Value::from(true)));
        assert!(!Constraint::Boolean.check(&Value::from(0)));
    }
}
