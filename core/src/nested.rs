//! Construction of sub-schema items.

use std::fmt;
use std::sync::{Arc, OnceLock};

use dsl_factory_inflector::Inflector;
use tracing::debug;

use crate::config::{GeneratorOptions, SubSchemaPolicy};
use crate::definition::Definition;
use crate::error::Result;
use crate::generator::{Generator, Script};
use crate::host::Host;

/// Builds item hosts for array and hash fields declared with a sub-schema.
///
/// The child definition is generated on demand by running the sub-schema
/// script through a new [`Generator`] that inherits the parent's inflector
/// and options. Under [`SubSchemaPolicy::Cached`] the first generated
/// definition is kept and shared by every clone of the evaluator.
#[derive(Clone)]
pub struct NestedSchemaEvaluator {
    field: String,
    script: Arc<Script>,
    inflector: Arc<dyn Inflector>,
    options: GeneratorOptions,
    cache: Arc<OnceLock<Definition>>,
}

impl NestedSchemaEvaluator {
    pub(crate) fn new(
        field: &str,
        script: Arc<Script>,
        inflector: Arc<dyn Inflector>,
        options: GeneratorOptions,
    ) -> Self {
        Self {
            field: field.to_string(),
            script,
            inflector,
            options,
            cache: Arc::new(OnceLock::new()),
        }
    }

    /// Returns the child definition, generating it if needed.
    ///
    /// # Errors
    ///
    /// Propagates any [`DefinitionError`](crate::DefinitionError) raised by
    /// the sub-schema script.
    pub fn definition(&self) -> Result<Definition> {
        let cached = self.options.sub_schemas == SubSchemaPolicy::Cached;
        if cached {
            if let Some(definition) = self.cache.get() {
                return Ok(definition.clone());
            }
        }

        debug!(field = %self.field, "Generating nested sub-schema");
        let definition = Generator::with_inflector(Arc::clone(&self.inflector))
            .with_options(self.options)
            .define(|g| (self.script)(g))?;
        if cached {
            // A concurrent build may have won; both definitions are equivalent.
            let _ = self.cache.set(definition.clone());
        }
        Ok(definition)
    }

    /// Creates an anonymous host with the child definition attached and
    /// evaluates `block` against it.
    ///
    /// # Errors
    ///
    /// Returns errors from generating the child definition or from the
    /// block itself; no host is produced in either case.
    pub fn evaluate<F>(&self, block: F) -> Result<Host>
    where
        F: FnOnce(&mut Host) -> Result<()>,
    {
        let definition = self.definition()?;
        let mut host = definition.instantiate();
        debug!(field = %self.field, "Evaluating nested block");
        block(&mut host)?;
        Ok(host)
    }
}

impl fmt::Debug for NestedSchemaEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedSchemaEvaluator")
            .field("field", &self.field)
            .field("options", &self.options)
            .field("cached", &self.cache.get().is_some())
            .finish()
    }
}
