//! Human-readable rendering of hosts and values.
//!
//! Hosts render as `#<Host name=value ...>` with fields ordered by name;
//! nested sub-schema hosts render the same way, recursively.

use std::fmt;
use std::sync::Arc;

use crate::error::ValidationError;
use crate::host::{Args, Host};
use crate::value::Value;

/// The `inspect` operation installed by inspectable attachments.
pub(crate) fn operation() -> crate::host::Operation {
    Arc::new(|host: &mut Host, args: Args<'_>| {
        if args.has_block() {
            return Err(ValidationError::UnexpectedBlock("inspect".to_string()).into());
        }
        if !args.values().is_empty() {
            return Err(ValidationError::TooManyArguments {
                field: "inspect".to_string(),
                max: 0,
                given: args.len(),
            }
            .into());
        }
        Ok(Value::String(host.to_string()))
    })
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#<Host")?;
        if let Some(store) = self.store() {
            for (name, value) in store.iter() {
                write!(f, " {name}={value}")?;
            }
        }
        f.write_str(">")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Atom(name) => write!(f, ":{name}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Callable(_) => f.write_str("#<callable>"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key} => {value}")?;
                }
                f.write_str("}")
            }
            Value::Nested(host) => write!(f, "{host}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mapping;

    #[test]
    fn test_render_scalars() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::from("a \"b\"").to_string(), r#""a \"b\"""#);
        assert_eq!(Value::atom("one").to_string(), ":one");
        assert_eq!(Value::from(3).to_string(), "3");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(true).to_string(), "true");
    }

    #[test]
    fn test_render_collections() {
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1, 2]");
        let map: Mapping = [("one", 1), ("two", 2)].into_iter().collect();
        assert_eq!(Value::from(map).to_string(), r#"{"one" => 1, "two" => 2}"#);
        assert_eq!(Value::from(Mapping::new()).to_string(), "{}");
    }

    #[test]
    fn test_render_hosts() {
        let mut host = Host::new();
        assert_eq!(host.to_string(), "#<Host>");

        let mut child = Host::new();
        child.set_value("label", Value::from("eins"));
        host.set_value("items", Value::List(vec![Value::from(child)]));
        host.set_value("count", Value::from(1));
        assert_eq!(
            host.to_string(),
            r#"#<Host count=1 items=[#<Host label="eins">]>"#
        );
    }

    #[test]
    fn test_inspect_operation_rejects_arguments() {
        let mut host = Host::new();
        host.install("inspect", operation());
        assert_eq!(host.inspect().unwrap(), "#<Host>");
        assert_eq!(
            host.call("inspect", Args::one(1)),
            Err(ValidationError::TooManyArguments {
                field: "inspect".to_string(),
                max: 0,
                given: 1,
            }
            .into())
        );
        assert_eq!(
            host.call("inspect", Args::none().with_block(|_| Ok(()))),
            Err(ValidationError::UnexpectedBlock("inspect".to_string()).into())
        );
    }
}
