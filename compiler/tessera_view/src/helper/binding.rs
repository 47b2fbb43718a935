//! Binding raw parser arguments against a helper's declarations.

use std::sync::Arc;

use crate::arguments::{ArgumentCollection, ArgumentDefinition, Arguments};
use crate::errors::{missing_required_arguments, ComponentError};
use crate::node::DeferredBooleanNode;
use crate::value::{parse_numeric, Value};

/// Bound declared arguments plus whatever was supplied undeclared.
#[derive(Debug, Default)]
pub(super) struct Binding {
    pub arguments: Arguments,
    pub additional: Arguments,
}

/// Bind `raw` against `definitions`.
///
/// Declared arguments are bound in declaration order: supplied values are
/// taken (coerced if boolean), absent ones get their default. A `Null` value
/// counts as absent. All missing required arguments are reported together.
/// Leftover raw entries become the additional arguments, in supplied order.
pub(super) fn bind_arguments(
    definitions: &ArgumentCollection,
    mut raw: Arguments,
) -> Result<Binding, ComponentError> {
    let mut arguments = Arguments::new();
    let mut missing = Vec::new();

    for definition in definitions.iter() {
        let supplied = raw
            .remove(definition.name())
            .filter(|value| !value.is_null());
        match supplied {
            Some(value) => {
                let value = coerce(definition, value);
                tracing::trace!(argument = definition.name(), value = %value.describe(), "bound");
                arguments.insert(definition.name(), value);
            }
            None if definition.is_required() => missing.push(definition.name().to_string()),
            None => {
                tracing::trace!(argument = definition.name(), "default");
                arguments.insert(definition.name(), definition.default_value().clone());
            }
        }
    }

    if !missing.is_empty() {
        return Err(missing_required_arguments(missing));
    }

    Ok(Binding {
        arguments,
        additional: raw,
    })
}

fn coerce(definition: &ArgumentDefinition, value: Value) -> Value {
    if definition.type_spec().is_boolean() {
        coerce_boolean(value)
    } else {
        value
    }
}

/// Boolean coercion at bind time.
///
/// Literal numbers and numeric strings become `value != 0`. Expression nodes
/// are wrapped so their truthiness is decided when read, not now. Anything
/// else is left for validation to judge.
fn coerce_boolean(value: Value) -> Value {
    match value {
        Value::Int(n) => Value::Bool(n != 0),
        Value::Float(n) => Value::Bool(n != 0.0),
        Value::Str(text) => match parse_numeric(&text) {
            Some(number) => Value::Bool(number.to_boolean()),
            None => Value::Str(text),
        },
        Value::Node(node) => Value::node(Arc::new(DeferredBooleanNode::new(node))),
        other => other,
    }
}
