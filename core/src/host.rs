//! Hosts: dispatch tables of attached operations plus a private value store.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{DslError, Result};
use crate::value::Value;

/// A nested block, evaluated against a freshly created sub-schema host.
pub type Block<'a> = Box<dyn FnMut(&mut Host) -> Result<()> + 'a>;

/// A callable entry in a host's dispatch table.
///
/// Accessors synthesized by a [`Generator`](crate::Generator) and custom
/// operations registered with [`Host::define_operation`] share this shape.
pub type Operation = Arc<dyn for<'a, 'b> Fn(&'a mut Host, Args<'b>) -> Result<Value> + Send + Sync>;

/// Arguments to a host operation: positional values and an optional block.
#[derive(Default)]
pub struct Args<'a> {
    values: Vec<Value>,
    block: Option<Block<'a>>,
}

impl<'a> Args<'a> {
    /// No values, no block (the getter form).
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            block: None,
        }
    }

    pub fn one(value: impl Into<Value>) -> Self {
        Self::new(vec![value.into()])
    }

    /// Attaches a nested block.
    pub fn with_block<F>(mut self, block: F) -> Self
    where
        F: FnMut(&mut Host) -> Result<()> + 'a,
    {
        self.block = Some(Box::new(block));
        self
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.block.is_none()
    }

    pub fn has_block(&self) -> bool {
        self.block.is_some()
    }

    pub fn into_parts(self) -> (Vec<Value>, Option<Block<'a>>) {
        (self.values, self.block)
    }
}

impl fmt::Debug for Args<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("values", &self.values)
            .field("block", &self.block.is_some())
            .finish()
    }
}

/// Per-host mapping from field name to stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueStore {
    values: BTreeMap<String, Value>,
}

impl ValueStore {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates stored values ordered by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// An entity that has one or more [`Definition`](crate::Definition)s
/// attached.
///
/// A host owns its dispatch table and exactly one [`ValueStore`], created
/// lazily on the first write. Mutating calls take `&mut self`; sharing a
/// host across threads requires external synchronization.
///
/// # Examples
///
/// ```
/// use dsl_factory_core::{Host, ScalarOptions, Value, define_dsl};
///
/// let definition = define_dsl(|g| {
///     g.string("name", ScalarOptions::new())?;
///     Ok(())
/// })
/// .unwrap();
///
/// let mut host = Host::new();
/// definition.attach(&mut host);
/// assert_eq!(host.get("name").unwrap(), Value::Nil);
///
/// host.set("name", "thevalue").unwrap();
/// assert_eq!(host.get("name").unwrap(), Value::from("thevalue"));
/// assert!(host.set("name", 123).is_err());
/// ```
#[derive(Clone, Default)]
pub struct Host {
    operations: BTreeMap<String, Operation>,
    store: Option<ValueStore>,
}

impl Host {
    /// Creates an empty host with no operations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operation in the dispatch table, replacing any existing
    /// operation with the same name.
    pub(crate) fn install(&mut self, name: impl Into<String>, operation: Operation) {
        self.operations.insert(name.into(), operation);
    }

    /// Registers a custom operation that callbacks and callers can invoke
    /// by name.
    ///
    /// # Examples
    ///
    /// ```
    /// use dsl_factory_core::{Args, Host, Value};
    ///
    /// let mut host = Host::new();
    /// host.define_operation("double", |_host, args| {
    ///     let n = args.values().first().and_then(Value::as_i64).unwrap_or(0);
    ///     Ok(Value::from(n * 2))
    /// });
    /// assert_eq!(host.call("double", Args::one(21)).unwrap(), Value::from(42));
    /// ```
    pub fn define_operation<F>(&mut self, name: impl Into<String>, operation: F)
    where
        F: for<'a, 'b> Fn(&'a mut Host, Args<'b>) -> Result<Value> + Send + Sync + 'static,
    {
        self.install(name, Arc::new(operation));
    }

    /// Returns `true` if an operation named `name` is installed.
    pub fn responds_to(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    /// Names of all installed operations, sorted.
    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Invokes an operation by name.
    ///
    /// # Errors
    ///
    /// Returns [`DslError::UnknownOperation`] if no such operation is
    /// installed, otherwise whatever the operation returns.
    pub fn call(&mut self, name: &str, args: Args<'_>) -> Result<Value> {
        let operation = self
            .operations
            .get(name)
            .cloned()
            .ok_or_else(|| DslError::UnknownOperation(name.to_string()))?;
        operation(self, args)
    }

    /// Calls a field accessor in getter form.
    pub fn get(&mut self, name: &str) -> Result<Value> {
        self.call(name, Args::none())
    }

    /// Calls a field accessor in setter form.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<Value> {
        self.call(name, Args::one(value))
    }

    /// Appends a value through an array field's singular accessor.
    pub fn item(&mut self, name: &str, value: impl Into<Value>) -> Result<Value> {
        self.call(name, Args::one(value))
    }

    /// Appends a nested sub-schema item built by `block`.
    pub fn item_with<F>(&mut self, name: &str, block: F) -> Result<Value>
    where
        F: FnMut(&mut Host) -> Result<()>,
    {
        self.call(name, Args::none().with_block(block))
    }

    /// Adds a key/value entry through a hash field's singular accessor.
    pub fn entry(
        &mut self,
        name: &str,
        key: impl Into<Value>,
        value: impl Into<Value>,
    ) -> Result<Value> {
        self.call(name, Args::new(vec![key.into(), value.into()]))
    }

    /// Adds an entry whose value is a nested sub-schema host built by
    /// `block`.
    pub fn entry_with<F>(&mut self, name: &str, key: impl Into<Value>, block: F) -> Result<Value>
    where
        F: FnMut(&mut Host) -> Result<()>,
    {
        self.call(name, Args::one(key).with_block(block))
    }

    /// Renders the host through its `inspect` operation.
    ///
    /// # Errors
    ///
    /// Returns [`DslError::UnknownOperation`] unless a definition was
    /// attached with `inspectable` set.
    pub fn inspect(&mut self) -> Result<String> {
        let rendered = self.call("inspect", Args::none())?;
        Ok(match rendered {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    /// Reads a stored value without going through the field accessor.
    pub fn get_value(&self, name: &str) -> Option<&Value> {
        self.store.as_ref().and_then(|store| store.get(name))
    }

    /// Writes a stored value, creating the store on first use.
    pub(crate) fn set_value(&mut self, name: &str, value: Value) {
        self.store
            .get_or_insert_with(ValueStore::default)
            .insert(name, value);
    }

    /// Mutable slot for a stored value, creating the store and a `Nil` slot
    /// on first use. Callers must have validated the new contents already.
    pub(crate) fn value_mut(&mut self, name: &str) -> &mut Value {
        self.store
            .get_or_insert_with(ValueStore::default)
            .values
            .entry(name.to_string())
            .or_default()
    }

    /// The value store, if any value has been written yet.
    pub fn store(&self) -> Option<&ValueStore> {
        self.store.as_ref()
    }
}

/// Hosts compare by stored values only.
impl PartialEq for Host {
    fn eq(&self, other: &Self) -> bool {
        let empty = ValueStore::default();
        self.store.as_ref().unwrap_or(&empty) == other.store.as_ref().unwrap_or(&empty)
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("operations", &self.operations.keys().collect::<Vec<_>>())
            .field("store", &self.store)
            .finish()
    }
}
