//! Immutable, attachable bundles of accessor operations.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::field::FieldSpec;
use crate::host::{Host, Operation};
use crate::inspect;

/// Options applied when a [`Definition`] is attached to a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttachOptions {
    /// Also install an `inspect` operation rendering the stored values.
    pub inspectable: bool,
}

/// A reusable bundle of named accessor operations.
///
/// Cloning is cheap and a definition holds no per-host state, so one
/// definition can be attached to any number of hosts, each with its own
/// value store.
///
/// # Examples
///
/// ```
/// use dsl_factory_core::{ScalarOptions, Value, define_dsl};
///
/// let definition = define_dsl(|g| {
///     g.numeric("port", ScalarOptions::new())?;
///     Ok(())
/// })
/// .unwrap();
///
/// let mut a = definition.instantiate();
/// let mut b = definition.instantiate();
/// a.set("port", 80).unwrap();
/// b.set("port", 443).unwrap();
///
/// assert_eq!(a.get("port").unwrap(), Value::from(80));
/// assert_eq!(b.get("port").unwrap(), Value::from(443));
/// ```
#[derive(Clone)]
pub struct Definition {
    inner: Arc<DefinitionInner>,
}

struct DefinitionInner {
    fields: Vec<FieldSpec>,
    operations: BTreeMap<String, Operation>,
    attach_options: AttachOptions,
}

impl Definition {
    pub(crate) fn new(
        fields: Vec<FieldSpec>,
        operations: BTreeMap<String, Operation>,
        attach_options: AttachOptions,
    ) -> Self {
        Self {
            inner: Arc::new(DefinitionInner {
                fields,
                operations,
                attach_options,
            }),
        }
    }

    /// Declared fields, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.inner.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.inner.fields.iter().find(|f| f.name() == name)
    }

    /// Names of all accessor operations, sorted. Array and hash fields
    /// contribute both their plural and singular names.
    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.inner.operations.keys().map(String::as_str)
    }

    /// Options used by [`attach`](Self::attach), taken from the generator.
    pub fn attach_options(&self) -> AttachOptions {
        self.inner.attach_options
    }

    /// Installs every accessor on `host` with the default attach options.
    pub fn attach(&self, host: &mut Host) {
        self.attach_with(host, self.attach_options());
    }

    /// Installs every accessor on `host`.
    ///
    /// Operations already on the host with the same names are replaced.
    pub fn attach_with(&self, host: &mut Host, options: AttachOptions) {
        if options.inspectable {
            host.install("inspect", inspect::operation());
        }
        for (name, operation) in &self.inner.operations {
            host.install(name.clone(), Arc::clone(operation));
        }
        debug!(
            operations = self.inner.operations.len(),
            inspectable = options.inspectable,
            "Attached definition"
        );
    }

    /// Creates a new host with this definition attached.
    pub fn instantiate(&self) -> Host {
        let mut host = Host::new();
        self.attach(&mut host);
        host
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("fields", &self.inner.fields)
            .field("attach_options", &self.inner.attach_options)
            .finish()
    }
}
