//! Declaration processing.
//!
//! A [`Generator`] runs a declaration script, records one [`FieldSpec`] per
//! declared field, and synthesizes the accessor operations that make up the
//! resulting [`Definition`].

use std::collections::BTreeMap;
use std::sync::Arc;

use dsl_factory_inflector::{Inflector, RuleInflector};
use tracing::debug;

use crate::accessor;
use crate::config::{DslConfig, GeneratorOptions};
use crate::constraint::{Constraint, Predicate};
use crate::definition::{AttachOptions, Definition};
use crate::error::{ConfigError, DefinitionError, Result};
use crate::field::{ArrayOptions, FieldKind, FieldSpec, HashOptions, ScalarOptions};
use crate::host::Operation;
use crate::nested::NestedSchemaEvaluator;

/// A re-runnable declaration script, as used for nested sub-schemas.
pub type Script = dyn Fn(&mut Generator) -> Result<()> + Send + Sync;

/// Builds a [`Definition`] from a declaration script using the English
/// inflector and default options.
///
/// # Errors
///
/// Returns the first [`DefinitionError`] raised by the script.
///
/// # Examples
///
/// ```
/// use dsl_factory_core::{ArrayOptions, Constraint, ScalarOptions, Value, define_dsl};
///
/// let definition = define_dsl(|g| {
///     g.string("title", ScalarOptions::new())?
///         .array("tags", ArrayOptions::new().of(Constraint::String))?;
///     Ok(())
/// })
/// .unwrap();
///
/// let mut host = definition.instantiate();
/// host.set("title", "Report").unwrap();
/// host.set("tags", vec!["a", "b"]).unwrap();
/// host.item("tag", "c").unwrap();
///
/// assert_eq!(host.get("tags").unwrap(), Value::from(vec!["a", "b", "c"]));
/// assert!(host.item("tag", 1).is_err());
/// ```
pub fn define_dsl<F>(script: F) -> Result<Definition>
where
    F: FnOnce(&mut Generator) -> Result<()>,
{
    Generator::new().define(script)
}

/// Executes declaration scripts and synthesizes accessors.
///
/// Every generator is independent: it owns its inflector handle and
/// options, and nothing is registered globally.
pub struct Generator {
    inflector: Arc<dyn Inflector>,
    options: GeneratorOptions,
    fields: Vec<FieldSpec>,
    operations: BTreeMap<String, Operation>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    /// Creates a generator using the English inflection rules.
    pub fn new() -> Self {
        Self::with_inflector(Arc::new(RuleInflector::english()))
    }

    /// Creates a generator with a custom singularize/pluralize capability.
    pub fn with_inflector(inflector: Arc<dyn Inflector>) -> Self {
        Self {
            inflector,
            options: GeneratorOptions::default(),
            fields: Vec::new(),
            operations: BTreeMap::new(),
        }
    }

    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Creates a generator from a loaded configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Inflection`] if the configured inflection
    /// table does not compile.
    pub fn from_config(config: &DslConfig) -> std::result::Result<Self, ConfigError> {
        Ok(Self::with_inflector(config.inflector()?).with_options(config.options))
    }

    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    pub fn inflector(&self) -> &Arc<dyn Inflector> {
        &self.inflector
    }

    /// Fields declared so far, in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Runs `script` against this generator and returns the definition.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by the script; no definition is
    /// produced in that case.
    pub fn define<F>(mut self, script: F) -> Result<Definition>
    where
        F: FnOnce(&mut Generator) -> Result<()>,
    {
        script(&mut self)?;
        Ok(self.finish())
    }

    /// Consumes the generator and returns the definition built so far.
    pub fn finish(self) -> Definition {
        let attach_options = AttachOptions {
            inspectable: self.options.inspectable,
        };
        Definition::new(self.fields, self.operations, attach_options)
    }

    /// Declares an untyped scalar field.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::EmptyName`] or
    /// [`DefinitionError::DuplicateField`].
    pub fn any(&mut self, name: &str, options: ScalarOptions) -> Result<&mut Self> {
        self.scalar(name, Constraint::Any, options)
    }

    /// Declares a scalar field that only accepts strings.
    pub fn string(&mut self, name: &str, options: ScalarOptions) -> Result<&mut Self> {
        self.scalar(name, Constraint::String, options)
    }

    /// Declares a scalar field that only accepts atoms.
    pub fn symbol(&mut self, name: &str, options: ScalarOptions) -> Result<&mut Self> {
        self.scalar(name, Constraint::Atom, options)
    }

    /// Declares a scalar field that only accepts numbers.
    pub fn numeric(&mut self, name: &str, options: ScalarOptions) -> Result<&mut Self> {
        self.scalar(name, Constraint::Numeric, options)
    }

    /// Declares a scalar field that only accepts booleans.
    pub fn boolean(&mut self, name: &str, options: ScalarOptions) -> Result<&mut Self> {
        self.scalar(name, Constraint::Boolean, options)
    }

    /// Declares a scalar field that only accepts callables.
    pub fn callable(&mut self, name: &str, options: ScalarOptions) -> Result<&mut Self> {
        self.scalar(name, Constraint::Callable, options)
    }

    /// Declares an array field.
    ///
    /// Installs a plural accessor (`items`) that reads or replaces the whole
    /// list and a singular accessor (`item`) that appends one item, built
    /// from the sub-schema when called with a block.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::CannotSingularize`] if the inflector
    /// returns `plural_name` unchanged, and
    /// [`DefinitionError::ConflictingItemType`] if both an item constraint
    /// and a sub-schema are given.
    pub fn array(&mut self, plural_name: &str, options: ArrayOptions) -> Result<&mut Self> {
        let name = self.check_name(plural_name)?;
        let singular = self.singular_name(&name)?;
        if options.item.is_some() && options.schema.is_some() {
            return Err(DefinitionError::ConflictingItemType(name).into());
        }

        let schema = options
            .schema
            .map(|script| self.nested_evaluator(&singular, script));
        let spec = FieldSpec::new(
            name.clone(),
            FieldKind::Array {
                singular: singular.clone(),
                item: options.item,
                schema,
                item_callback: self.options.item_callback,
            },
            None,
            options.callback,
        );

        debug!(field = %name, singular = %singular, nested = spec.is_nested(), "Declared array field");
        let spec = Arc::new(spec);
        self.register(&name, accessor::array_plural(Arc::clone(&spec)))?;
        self.register(&singular, accessor::array_item(Arc::clone(&spec)))?;
        self.fields.push(Arc::unwrap_or_clone(spec));
        Ok(self)
    }

    /// Declares a hash field.
    ///
    /// The plural accessor (`assignments`) is read-only; entries are added
    /// through the singular accessor (`assignment(key, value)`), or built
    /// from the sub-schema when called with a key and a block.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::CannotSingularize`] as for arrays, and
    /// [`DefinitionError::ConflictingValueType`] if both a value constraint
    /// and a sub-schema are given.
    pub fn hash(&mut self, plural_name: &str, options: HashOptions) -> Result<&mut Self> {
        let name = self.check_name(plural_name)?;
        let singular = self.singular_name(&name)?;
        if options.value.is_some() && options.schema.is_some() {
            return Err(DefinitionError::ConflictingValueType(name).into());
        }

        let schema = options
            .schema
            .map(|script| self.nested_evaluator(&singular, script));
        let spec = FieldSpec::new(
            name.clone(),
            FieldKind::Hash {
                singular: singular.clone(),
                key: options.key,
                value: options.value,
                schema,
            },
            None,
            options.callback,
        );

        debug!(field = %name, singular = %singular, nested = spec.is_nested(), "Declared hash field");
        let spec = Arc::new(spec);
        self.register(&name, accessor::hash_plural(Arc::clone(&spec)))?;
        self.register(&singular, accessor::hash_entry(Arc::clone(&spec)))?;
        self.fields.push(Arc::unwrap_or_clone(spec));
        Ok(self)
    }

    fn scalar(
        &mut self,
        name: &str,
        constraint: Constraint,
        options: ScalarOptions,
    ) -> Result<&mut Self> {
        let name = self.check_name(name)?;
        let validation: Option<Predicate> = options.validation;
        debug!(field = %name, constraint = constraint.name(), "Declared scalar field");
        let spec = Arc::new(FieldSpec::new(
            name.clone(),
            FieldKind::Scalar { constraint },
            validation,
            options.callback,
        ));
        self.register(&name, accessor::scalar(Arc::clone(&spec)))?;
        self.fields.push(Arc::unwrap_or_clone(spec));
        Ok(self)
    }

    fn check_name(&self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DefinitionError::EmptyName.into());
        }
        if self.operations.contains_key(name) {
            return Err(DefinitionError::DuplicateField(name.to_string()).into());
        }
        Ok(name.to_string())
    }

    fn singular_name(&self, plural_name: &str) -> Result<String> {
        let singular = self.inflector.singularize(plural_name);
        if singular == plural_name {
            return Err(DefinitionError::CannotSingularize(plural_name.to_string()).into());
        }
        if self.operations.contains_key(&singular) {
            return Err(DefinitionError::DuplicateField(singular).into());
        }
        Ok(singular)
    }

    fn register(&mut self, name: &str, operation: Operation) -> Result<()> {
        if self.operations.contains_key(name) {
            return Err(DefinitionError::DuplicateField(name.to_string()).into());
        }
        self.operations.insert(name.to_string(), operation);
        Ok(())
    }

    fn nested_evaluator(&self, singular: &str, script: Arc<Script>) -> NestedSchemaEvaluator {
        NestedSchemaEvaluator::new(
            singular,
            script,
            Arc::clone(&self.inflector),
            self.options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DslError;
    use dsl_factory_inflector::from_fn;

    fn definition_error(result: Result<Definition>) -> DefinitionError {
        match result {
            Err(DslError::Definition(err)) => err,
            other => panic!("expected a definition error, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_singular_array_name() {
        let err = definition_error(define_dsl(|g| {
            g.array("item", ArrayOptions::new())?;
            Ok(())
        }));
        assert_eq!(err, DefinitionError::CannotSingularize("item".to_string()));
    }

    #[test]
    fn test_rejects_singular_hash_name() {
        let err = definition_error(define_dsl(|g| {
            g.hash("assignment", HashOptions::new())?;
            Ok(())
        }));
        assert_eq!(
            err,
            DefinitionError::CannotSingularize("assignment".to_string())
        );
    }

    #[test]
    fn test_rejects_item_type_with_schema() {
        let err = definition_error(define_dsl(|g| {
            g.array(
                "items",
                ArrayOptions::new()
                    .of(Constraint::String)
                    .schema(|g| g.any("child", ScalarOptions::new()).map(|_| ())),
            )?;
            Ok(())
        }));
        assert_eq!(err, DefinitionError::ConflictingItemType("items".to_string()));
    }

    #[test]
    fn test_rejects_value_type_with_schema() {
        let err = definition_error(define_dsl(|g| {
            g.hash(
                "assignments",
                HashOptions::new()
                    .values(Constraint::Numeric)
                    .schema(|g| g.any("child", ScalarOptions::new()).map(|_| ())),
            )?;
            Ok(())
        }));
        assert_eq!(
            err,
            DefinitionError::ConflictingValueType("assignments".to_string())
        );
    }

    #[test]
    fn test_rejects_duplicate_and_colliding_names() {
        let err = definition_error(define_dsl(|g| {
            g.any("name", ScalarOptions::new())?
                .string("name", ScalarOptions::new())?;
            Ok(())
        }));
        assert_eq!(err, DefinitionError::DuplicateField("name".to_string()));

        let err = definition_error(define_dsl(|g| {
            g.any("item", ScalarOptions::new())?
                .array("items", ArrayOptions::new())?;
            Ok(())
        }));
        assert_eq!(err, DefinitionError::DuplicateField("item".to_string()));
    }

    #[test]
    fn test_rejects_empty_name() {
        let err = definition_error(define_dsl(|g| {
            g.any("  ", ScalarOptions::new())?;
            Ok(())
        }));
        assert_eq!(err, DefinitionError::EmptyName);
    }

    #[test]
    fn test_custom_inflector_decides_singular_names() {
        let inflector = from_fn(|word: &str| match word.strip_suffix("en") {
            Some(stem) => stem.to_string(),
            None => word.to_string(),
        });
        let definition = Generator::with_inflector(Arc::new(inflector))
            .define(|g| {
                g.array("posten", ArrayOptions::new())?;
                Ok(())
            })
            .unwrap();

        let field = definition.field("posten").unwrap();
        assert_eq!(field.singular_name(), Some("post"));

        let rejected = Generator::with_inflector(Arc::new(from_fn(|w: &str| w.to_string())))
            .define(|g| {
                g.array("items", ArrayOptions::new())?;
                Ok(())
            });
        assert!(matches!(
            rejected,
            Err(DslError::Definition(DefinitionError::CannotSingularize(_)))
        ));
    }

    #[test]
    fn test_fields_keep_declaration_order() {
        let definition = define_dsl(|g| {
            g.string("b", ScalarOptions::new())?
                .array("items", ArrayOptions::new())?
                .hash("assignments", HashOptions::new())?
                .numeric("a", ScalarOptions::new())?;
            Ok(())
        })
        .unwrap();

        let names: Vec<&str> = definition.fields().iter().map(FieldSpec::name).collect();
        assert_eq!(names, vec!["b", "items", "assignments", "a"]);
        let ops: Vec<&str> = definition.operation_names().collect();
        assert_eq!(
            ops,
            vec!["a", "assignment", "assignments", "b", "item", "items"]
        );
    }
}
