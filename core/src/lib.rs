//! Schema-driven generator for attachable configuration DSLs.
//!
//! A declaration script run through a [`Generator`] produces a
//! [`Definition`]: a reusable bundle of accessor operations. Attaching the
//! definition to a [`Host`] lets the host read and write named values with
//! type validation, post-assignment callbacks, and nested sub-schemas for
//! array and hash fields.
//!
//! - [`Generator`]: declares `any`, `string`, `symbol`, `numeric`,
//!   `boolean`, `callable`, `array`, and `hash` fields.
//! - [`Definition`]: immutable accessor table with [`Definition::attach`].
//! - [`Host`]: dispatch table plus a lazily created [`ValueStore`].
//! - [`NestedSchemaEvaluator`]: builds sub-schema items on demand.
//! - [`Value`]: the closed value union, checked by [`Constraint`]s.
//! - [`DslConfig`]: YAML options and inflection tables.
//!
//! Malformed schemas fail with [`DefinitionError`]; bad accessor input fails
//! with [`ValidationError`] and leaves the host unchanged.
//!
//! # Example
//!
//! ```
//! use dsl_factory_core::*;
//!
//! let definition = define_dsl(|g| {
//!     g.string("name", ScalarOptions::new())?
//!         .array("items", ArrayOptions::new().schema(|g| {
//!             g.any("child", ScalarOptions::new())?;
//!             Ok(())
//!         }))?
//!         .hash("assignments", HashOptions::new().keys(Constraint::Atom))?;
//!     Ok(())
//! })
//! .unwrap();
//!
//! let mut host = definition.instantiate();
//! host.set("name", "config").unwrap();
//! host.item_with("item", |item| {
//!     item.set("child", "tom")?;
//!     Ok(())
//! })
//! .unwrap();
//! host.entry("assignment", Value::atom("one"), 1).unwrap();
//!
//! let items = host.get("items").unwrap();
//! let first = items.as_list().unwrap()[0].as_host().unwrap();
//! assert_eq!(first.get_value("child"), Some(&Value::from("tom")));
//!
//! // Hash fields are read-only in plural form.
//! let err = host.set("assignments", Mapping::new()).unwrap_err();
//! assert!(err.is_definition());
//! ```

mod accessor;
mod config;
mod constraint;
mod definition;
mod error;
mod field;
mod generator;
mod host;
mod inspect;
mod nested;
mod value;

pub use config::{DslConfig, GeneratorOptions, ItemCallbackArgs, SubSchemaPolicy};
pub use constraint::{Constraint, Predicate};
pub use definition::{AttachOptions, Definition};
pub use error::{ConfigError, DefinitionError, DslError, Result, ValidationError};
pub use field::{ArrayOptions, Callback, FieldKind, FieldSpec, HashOptions, ScalarOptions};
pub use generator::{Generator, Script, define_dsl};
pub use host::{Args, Block, Host, Operation, ValueStore};
pub use nested::NestedSchemaEvaluator;
pub use value::{Callable, Mapping, Number, Value};

pub use dsl_factory_inflector as inflector;
