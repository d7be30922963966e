//! Accessor synthesis for scalar, array and hash fields.
//!
//! Each function returns an [`Operation`] closure that captures the field's
//! spec. Validation always runs before the store is touched, so a rejected
//! call leaves the host unchanged.

use std::sync::Arc;

use tracing::debug;

use crate::config::ItemCallbackArgs;
use crate::error::{DefinitionError, DslError, Result, ValidationError};
use crate::field::{Callback, FieldKind, FieldSpec};
use crate::host::{Args, Block, Host, Operation};
use crate::nested::NestedSchemaEvaluator;
use crate::value::{Mapping, Value};

/// Getter/setter for a scalar field.
pub(crate) fn scalar(spec: Arc<FieldSpec>) -> Operation {
    Arc::new(move |host: &mut Host, args: Args<'_>| {
        read_or_assign(host, &spec, args, |value| spec.accepts(value))
    })
}

/// Plural array accessor: reads or replaces the whole list.
pub(crate) fn array_plural(spec: Arc<FieldSpec>) -> Operation {
    Arc::new(move |host: &mut Host, args: Args<'_>| {
        let FieldKind::Array { item, .. } = spec.kind() else {
            unreachable!("array accessor built for a non-array field");
        };
        read_or_assign(host, &spec, args, |value| match value {
            Value::List(items) => item
                .as_ref()
                .is_none_or(|constraint| items.iter().all(|i| constraint.check(i))),
            _ => false,
        })
    })
}

/// Singular array accessor: appends one item.
pub(crate) fn array_item(spec: Arc<FieldSpec>) -> Operation {
    Arc::new(move |host: &mut Host, args: Args<'_>| {
        let FieldKind::Array {
            singular,
            item,
            schema,
            item_callback,
        } = spec.kind()
        else {
            unreachable!("array accessor built for a non-array field");
        };

        let (mut values, block) = args.into_parts();
        if values.len() > 1 {
            return Err(too_many(singular, 1, values.len()));
        }
        // A block takes precedence over a positional value.
        let value = match (values.pop(), block) {
            (None, None) => return Ok(stored(host, spec.name())),
            (_, Some(block)) => build_nested(singular, schema.as_ref(), block)?,
            (Some(value), None) => value,
        };

        if let Some(constraint) = item {
            if !constraint.check(&value) {
                return Err(rejected(ValidationError::InvalidItem(singular.clone()), &value));
            }
        }

        match host.value_mut(spec.name()) {
            Value::List(items) => items.push(value.clone()),
            slot => *slot = Value::List(vec![value.clone()]),
        }

        let callback_args = match item_callback {
            ItemCallbackArgs::Wrapped => Value::List(vec![value]),
            ItemCallbackArgs::Bare => value,
        };
        run_callback(spec.callback(), host, &[callback_args])
    })
}

/// Plural hash accessor: read-only.
pub(crate) fn hash_plural(spec: Arc<FieldSpec>) -> Operation {
    Arc::new(move |host: &mut Host, args: Args<'_>| {
        if !args.is_empty() {
            return Err(DefinitionError::PluralHashAssignment {
                field: spec.name().to_string(),
                singular: spec.singular_name().unwrap_or_default().to_string(),
            }
            .into());
        }
        Ok(stored(host, spec.name()))
    })
}

/// Singular hash accessor: inserts or replaces one entry.
pub(crate) fn hash_entry(spec: Arc<FieldSpec>) -> Operation {
    Arc::new(move |host: &mut Host, args: Args<'_>| {
        let FieldKind::Hash {
            singular,
            key: key_constraint,
            value: value_constraint,
            schema,
        } = spec.kind()
        else {
            unreachable!("hash accessor built for a non-hash field");
        };

        let (values, block) = args.into_parts();
        if values.len() > 2 {
            return Err(too_many(singular, 2, values.len()));
        }
        let mut values = values.into_iter();
        let key = values
            .next()
            .ok_or_else(|| ValidationError::MissingKey(singular.clone()))?;

        // An explicit nil or false alongside a block counts as no value.
        let (value, nested) = match (values.next(), block) {
            (Some(value), Some(_)) if value.is_truthy() => {
                return Err(ValidationError::AmbiguousEntry(singular.clone()).into());
            }
            (_, Some(block)) => (build_nested(singular, schema.as_ref(), block)?, true),
            (Some(value), None) => (value, false),
            (None, None) => (Value::Nil, false),
        };

        if let Some(constraint) = key_constraint {
            if !constraint.check(&key) {
                return Err(rejected(ValidationError::InvalidKey(singular.clone()), &key));
            }
        }
        if let (false, Some(constraint)) = (nested, value_constraint) {
            if !constraint.check(&value) {
                return Err(rejected(
                    ValidationError::InvalidEntryValue(singular.clone()),
                    &value,
                ));
            }
        }

        match host.value_mut(spec.name()) {
            Value::Map(entries) => {
                entries.insert(key.clone(), value.clone());
            }
            slot => {
                let mut entries = Mapping::new();
                entries.insert(key.clone(), value.clone());
                *slot = Value::Map(entries);
            }
        }

        run_callback(spec.callback(), host, &[key, value])
    })
}

/// Shared getter/setter logic of scalar and plural array accessors.
fn read_or_assign(
    host: &mut Host,
    spec: &FieldSpec,
    args: Args<'_>,
    accepts: impl Fn(&Value) -> bool,
) -> Result<Value> {
    let name = spec.name();
    if args.has_block() {
        return Err(ValidationError::UnexpectedBlock(name.to_string()).into());
    }
    let (mut values, _) = args.into_parts();
    let value = match values.len() {
        0 => return Ok(stored(host, name)),
        1 => values.remove(0),
        given => return Err(too_many(name, 1, given)),
    };

    if !accepts(&value) {
        return Err(rejected(ValidationError::InvalidValue(name.to_string()), &value));
    }
    host.set_value(name, value.clone());
    run_callback(spec.callback(), host, &[value])
}

fn build_nested(
    singular: &str,
    schema: Option<&NestedSchemaEvaluator>,
    block: Block<'_>,
) -> Result<Value> {
    let evaluator = schema.ok_or_else(|| ValidationError::NoSubSchema(singular.to_string()))?;
    let host = evaluator.evaluate(block)?;
    Ok(Value::from(host))
}

fn rejected(err: ValidationError, value: &Value) -> DslError {
    debug!(error = %err, got = value.type_name(), "Rejected accessor input");
    err.into()
}

fn stored(host: &Host, name: &str) -> Value {
    host.get_value(name).cloned().unwrap_or_default()
}

fn run_callback(callback: Option<&Callback>, host: &mut Host, args: &[Value]) -> Result<Value> {
    match callback {
        Some(callback) => callback(host, args),
        None => Ok(Value::Nil),
    }
}

fn too_many(field: &str, max: usize, given: usize) -> DslError {
    ValidationError::TooManyArguments {
        field: field.to_string(),
        max,
        given,
    }
    .into()
}
