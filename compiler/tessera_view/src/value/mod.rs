//! Runtime values flowing through arguments and rendered output.
//!
//! Heap payloads are shared through `Arc` so cloning a value (which binding,
//! evaluation and compiled replays all do) never deep-copies. All heap values
//! are built through the factory methods on `Value`.
//!
//! A renderable node can itself be a value (`Value::Node`): the parser hands
//! nested expressions to a component as unevaluated nodes, and they are only
//! rendered when the component's arguments are evaluated.

mod numeric;
mod object;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::node::NodeRef;

pub use numeric::parse_numeric;
pub use object::ObjectValue;

/// Runtime value.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// Absent value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    Str(Arc<str>),
    /// Ordered list (array with implicit keys).
    List(Arc<Vec<Value>>),
    /// Ordered string-keyed map (associative array).
    Map(Arc<IndexMap<String, Value>>),
    /// Object instance.
    Object(Arc<ObjectValue>),
    /// Renderable node, not yet evaluated.
    Node(NodeRef),
}

// Factory Methods

impl Value {
    /// Create an integer value.
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        let s: String = s.into();
        Value::Str(Arc::from(s))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Arc::new(items))
    }

    /// Create a map value.
    #[inline]
    pub fn map(entries: IndexMap<String, Value>) -> Self {
        Value::Map(Arc::new(entries))
    }

    /// Create an object value.
    #[inline]
    pub fn object(object: ObjectValue) -> Self {
        Value::Object(Arc::new(object))
    }

    /// Wrap a node so it travels as an unevaluated argument value.
    #[inline]
    pub fn node(node: NodeRef) -> Self {
        Value::Node(node)
    }
}

// Value Methods

impl Value {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check whether this value is an unevaluated node.
    #[inline]
    pub fn is_node(&self) -> bool {
        matches!(self, Value::Node(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Whether the value is a number, or a string holding numeric text.
    pub fn is_numeric(&self) -> bool {
        match self {
            Value::Int(_) | Value::Float(_) => true,
            Value::Str(s) => parse_numeric(s).is_some(),
            _ => false,
        }
    }

    /// Whether the value counts as empty: null, false, zero, `""`, `"0"`
    /// or an empty collection.
    pub fn is_empty_value(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !*b,
            Value::Int(n) => *n == 0,
            Value::Float(f) => *f == 0.0,
            Value::Str(s) => s.is_empty() || &**s == "0",
            Value::List(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::Object(_) | Value::Node(_) => false,
        }
    }

    /// Coerce to a boolean.
    ///
    /// Strings are false when empty, `"0"` or `"false"` (any case).
    pub fn to_boolean(&self) -> bool {
        match self {
            Value::Str(s) => !(s.is_empty() || &**s == "0" || s.eq_ignore_ascii_case("false")),
            Value::Object(_) | Value::Node(_) => true,
            other => !other.is_empty_value(),
        }
    }

    /// Whether the value is an array, an array-like map or an iterable object.
    pub fn is_array_like(&self) -> bool {
        match self {
            Value::List(_) | Value::Map(_) => true,
            Value::Object(object) => object.is_iterable(),
            _ => false,
        }
    }

    /// First element of a non-empty array-like value.
    pub fn first_element(&self) -> Option<&Value> {
        match self {
            Value::List(items) => items.first(),
            Value::Map(entries) => entries.values().next(),
            Value::Object(object) => object.items().and_then(<[Value]>::first),
            _ => None,
        }
    }

    /// Type name for diagnostics. Objects report their class.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) | Value::Map(_) => "array",
            Value::Object(object) => object.class(),
            Value::Node(_) => "node",
        }
    }

    /// Type and short content, e.g. `int (3)` or `object of class Foo`.
    pub fn describe(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(_) | Value::Int(_) | Value::Float(_) => {
                format!("{} ({})", self.type_name(), self.to_output_string())
            }
            Value::Str(s) => format!("string (\"{s}\")"),
            Value::List(items) => format!("array ({} items)", items.len()),
            Value::Map(entries) => format!("array ({} items)", entries.len()),
            Value::Object(object) => format!("object of class {}", object.class()),
            Value::Node(node) => format!("node ({})", node.kind()),
        }
    }

    /// Text used when values are concatenated into output.
    pub fn to_output_string(&self) -> String {
        match self {
            Value::Null | Value::Node(_) => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(f) => f.to_string(),
            Value::Str(s) => s.to_string(),
            Value::List(items) => join_output(items.iter()),
            Value::Map(entries) => join_output(entries.values()),
            Value::Object(object) => object
                .string_form()
                .map_or_else(|| format!("[object {}]", object.class()), str::to_string),
        }
    }
}

fn join_output<'a>(values: impl Iterator<Item = &'a Value>) -> String {
    values
        .map(Value::to_output_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Strict comparison: same variant and same content.
///
/// Objects and nodes compare by reference, integers never equal floats.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            (Value::Node(a), Value::Node(b)) => {
                Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_output_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}
