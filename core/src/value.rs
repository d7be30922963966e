//! The closed value model stored by DSL hosts.
//!
//! Every accessor reads and writes [`Value`]s. Constraint checks are plain
//! discriminant tests against this union (see [`Constraint`](crate::Constraint)).

use std::fmt;
use std::sync::Arc;

use crate::host::Host;

/// A value held in a host's value store.
///
/// [`Value::Nil`] doubles as the "absent" sentinel returned by getters of
/// fields that were never set.
///
/// # Examples
///
/// ```
/// use dsl_factory_core::Value;
///
/// let label = Value::from("eins");
/// assert!(label.is_string());
/// assert_eq!(label.as_str(), Some("eins"));
///
/// let items = Value::from(vec![1, 2, 3]);
/// assert_eq!(items.as_list().map(|l| l.len()), Some(3));
///
/// assert!(Value::atom("one").is_atom());
/// assert!(Value::default().is_nil());
/// ```
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// No value.
    #[default]
    Nil,
    /// A string.
    String(String),
    /// A symbol-like identifier.
    Atom(String),
    /// An integer or floating point number.
    Number(Number),
    /// `true` or `false`.
    Boolean(bool),
    /// A callable value.
    Callable(Callable),
    /// An ordered sequence.
    List(Vec<Value>),
    /// An insertion-ordered mapping.
    Map(Mapping),
    /// A host built from a nested sub-schema.
    Nested(Box<Host>),
}

impl Value {
    /// Creates an atom.
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    /// Wraps a closure as a callable value.
    pub fn callable<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self::Callable(Callable::new(f))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Self::Atom(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(_))
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Callable(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }

    /// Returns the string contents of a [`Value::String`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the name of a [`Value::Atom`].
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Self::Atom(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns an integral number as `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(Number::as_i64)
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::as_f64)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Self::Callable(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Mapping> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the host of a nested sub-schema value.
    pub fn as_host(&self) -> Option<&Host> {
        match self {
            Self::Nested(host) => Some(host),
            _ => None,
        }
    }

    /// `false` only for [`Value::Nil`] and `Boolean(false)`.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Self::Nil | Self::Boolean(false))
    }

    /// Short name of the variant, logged when an accessor rejects a value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::String(_) => "string",
            Self::Atom(_) => "atom",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Callable(_) => "callable",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Nested(_) => "nested",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Atom(a), Self::Atom(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Callable(a), Self::Callable(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Map(a), Self::Map(b)) => a == b,
            (Self::Nested(a), Self::Nested(b)) => a == b,
            _ => false,
        }
    }
}

/// A number; integers and floats compare by numeric value.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// Returns the value as `i64` if it is integral.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(i),
            // i64::MAX as f64 rounds up to 2^63, which is already out of range.
            Self::Float(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                Some(f as i64)
            }
            Self::Float(_) => None,
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

/// A shareable function value.
///
/// Two callables are equal only if they are clones of the same closure.
#[derive(Clone)]
pub struct Callable(Arc<dyn Fn(&[Value]) -> Value + Send + Sync>);

impl Callable {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callable(..)")
    }
}

/// Insertion-ordered mapping from values to values.
///
/// Keys may be any [`Value`]; lookups use value equality. Inserting an
/// existing key replaces its value in place.
///
/// # Examples
///
/// ```
/// use dsl_factory_core::{Mapping, Value};
///
/// let mut map = Mapping::new();
/// map.insert(Value::atom("one"), Value::from(1));
/// map.insert(Value::atom("two"), Value::from(2));
/// map.insert(Value::atom("one"), Value::from(10));
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get(&Value::atom("one")), Some(&Value::from(10)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: Vec<(Value, Value)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    /// Inserts or replaces an entry, returning the previous value.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

/// Equality ignores insertion order.
impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Into<Value>, V: Into<Value>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k.into(), v.into());
        }
        map
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Number(Number::Int(i64::from(i)))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Number(Number::Int(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Self::Number(Number::Int(i64::from(i)))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Number(Number::Float(f))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Self::Callable(c)
    }
}

impl From<Mapping> for Value {
    fn from(map: Mapping) -> Self {
        Self::Map(map)
    }
}

impl From<Host> for Value {
    fn from(host: Host) -> Self {
        Self::Nested(Box::new(host))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(Value::from(1), Value::from(1.0));
        assert_ne!(Value::from(1), Value::from(1.5));
        assert_eq!(Value::from(3.0).as_i64(), Some(3));
        assert_eq!(Value::from(2.5).as_i64(), None);
    }

    #[test]
    fn test_float_to_int_conversion_stays_in_range() {
        assert_eq!(Value::from(42.0).as_i64(), Some(42));
        assert_eq!(Value::from(-3.0).as_i64(), Some(-3));
        assert_eq!(Value::from(2.5).as_i64(), None);
        assert_eq!(Value::from(1e30).as_i64(), None);
        assert_eq!(Value::from(-1e30).as_i64(), None);
        assert_eq!(Value::from(9_223_372_036_854_775_808.0).as_i64(), None);
        assert_eq!(Value::from(f64::NAN).as_i64(), None);
        assert_eq!(Value::from(f64::INFINITY).as_i64(), None);
        assert_eq!(Value::from(i64::MIN as f64).as_i64(), Some(i64::MIN));
    }

    #[test]
    fn test_truthiness_and_type_names() {
        assert!(!Value::Nil.is_truthy());
        assert!(!Value::from(false).is_truthy());
        assert!(Value::from(0).is_truthy());
        assert!(Value::from("").is_truthy());

        assert_eq!(Value::Nil.type_name(), "nil");
        assert_eq!(Value::atom("a").type_name(), "atom");
        assert_eq!(Value::from(vec![1]).type_name(), "list");
        assert_eq!(Value::from(Mapping::new()).type_name(), "map");
        assert_eq!(Value::from(Host::new()).type_name(), "nested");
    }

    #[test]
    fn test_variants_never_compare_across_kinds() {
        assert_ne!(Value::from("one"), Value::atom("one"));
        assert_ne!(Value::Nil, Value::from(false));
    }

    #[test]
    fn test_callables_compare_by_identity() {
        let double = Callable::new(|args| match args.first().and_then(Value::as_i64) {
            Some(n) => Value::from(n * 2),
            None => Value::Nil,
        });
        let other = Callable::new(|_| Value::Nil);

        assert_eq!(double.call(&[Value::from(21)]), Value::from(42));
        assert_eq!(Value::from(double.clone()), Value::from(double));
        assert_ne!(Value::from(other.clone()), Value::callable(|_| Value::Nil));
    }

    #[test]
    fn test_mapping_equality_ignores_order() {
        let a: Mapping = [("one", 1), ("two", 2)].into_iter().collect();
        let b: Mapping = [("two", 2), ("one", 1)].into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(a.keys().next(), Some(&Value::from("one")));
    }

    #[test]
    fn test_mapping_insert_overwrites_in_place() {
        let mut map: Mapping = [("one", 1), ("two", 2)].into_iter().collect();
        let previous = map.insert(Value::from("one"), Value::from(11));
        assert_eq!(previous, Some(Value::from(1)));
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.values().cloned().collect::<Vec<_>>(),
            vec![Value::from(11), Value::from(2)]
        );
    }
}
