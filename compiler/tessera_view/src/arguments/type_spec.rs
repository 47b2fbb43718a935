//! Declared argument types and structural conformance checks.
//!
//! Type tokens are parsed once, at declaration time, into a `TypeSpec`.
//! Validation walks the `TypeSpec` against a value on every render.

use std::fmt;

use crate::value::Value;

/// Built-in scalar kinds with dedicated checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    String,
    Array,
    Mixed,
    Object,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::String => "string",
            ScalarKind::Array => "array",
            ScalarKind::Mixed => "mixed",
            ScalarKind::Object => "object",
        }
    }
}

/// Declared type of an argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeSpec {
    /// One of the built-in scalar kinds.
    Scalar(ScalarKind),
    /// A class or interface; values must be null or an instance of it.
    Named(String),
    /// Array whose elements must satisfy the inner type.
    ArrayOf(Box<TypeSpec>),
    /// Pseudo-type without a dedicated check (`int`, `float`, `callable`, ...).
    /// Only objects that are not instances of the name are rejected.
    Other(String),
}

impl TypeSpec {
    pub const BOOL: TypeSpec = TypeSpec::Scalar(ScalarKind::Bool);
    pub const STRING: TypeSpec = TypeSpec::Scalar(ScalarKind::String);
    pub const ARRAY: TypeSpec = TypeSpec::Scalar(ScalarKind::Array);
    pub const MIXED: TypeSpec = TypeSpec::Scalar(ScalarKind::Mixed);
    pub const OBJECT: TypeSpec = TypeSpec::Scalar(ScalarKind::Object);

    /// Class or interface type.
    pub fn named(name: impl Into<String>) -> Self {
        TypeSpec::Named(name.into())
    }

    /// Array of `element`.
    pub fn array_of(element: TypeSpec) -> Self {
        TypeSpec::ArrayOf(Box::new(element))
    }

    /// Parse a type token.
    ///
    /// - `bool`/`boolean`, `string`, `array`, `mixed`, `object` are scalar kinds.
    /// - A trailing `[]` declares an element-typed array.
    /// - Tokens that look like class names (leading uppercase letter or a
    ///   namespace separator) are named types.
    /// - Anything else is a pseudo-type checked leniently.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if let Some(element) = token.strip_suffix("[]") {
            return TypeSpec::array_of(TypeSpec::parse(element));
        }
        match token {
            "bool" | "boolean" => TypeSpec::BOOL,
            "string" => TypeSpec::STRING,
            "array" => TypeSpec::ARRAY,
            "mixed" => TypeSpec::MIXED,
            "object" => TypeSpec::OBJECT,
            _ if looks_like_class(token) => TypeSpec::Named(token.to_string()),
            _ => TypeSpec::Other(token.to_string()),
        }
    }

    #[inline]
    pub fn is_boolean(&self) -> bool {
        matches!(self, TypeSpec::Scalar(ScalarKind::Bool))
    }

    #[inline]
    pub fn is_mixed(&self) -> bool {
        matches!(self, TypeSpec::Scalar(ScalarKind::Mixed))
    }

    /// Check whether `value` structurally conforms to this type.
    ///
    /// Array checks accept empty values, and element-typed arrays check only
    /// the first element.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            TypeSpec::Scalar(ScalarKind::Mixed) => true,
            TypeSpec::Scalar(ScalarKind::Object) => matches!(value, Value::Object(_)),
            TypeSpec::Scalar(ScalarKind::Array) => {
                value.is_array_like() || value.is_empty_value()
            }
            TypeSpec::ArrayOf(element) => {
                if !value.is_array_like() {
                    return value.is_empty_value();
                }
                match value.first_element() {
                    Some(first) if !first.is_null() => element.accepts(first),
                    _ => true,
                }
            }
            TypeSpec::Scalar(ScalarKind::String) => match value {
                Value::Str(_) => true,
                Value::Object(object) => object.is_stringable(),
                _ => false,
            },
            TypeSpec::Scalar(ScalarKind::Bool) => matches!(value, Value::Bool(_)),
            TypeSpec::Named(name) => match value {
                Value::Null => true,
                Value::Object(object) => object.instance_of(name),
                _ => false,
            },
            TypeSpec::Other(name) => match value {
                Value::Object(object) => object.instance_of(name),
                _ => true,
            },
        }
    }
}

fn looks_like_class(token: &str) -> bool {
    token.contains('\\') || token.chars().next().is_some_and(char::is_uppercase)
}

impl From<&str> for TypeSpec {
    fn from(token: &str) -> Self {
        TypeSpec::parse(token)
    }
}

impl From<ScalarKind> for TypeSpec {
    fn from(kind: ScalarKind) -> Self {
        TypeSpec::Scalar(kind)
    }
}

impl fmt::Display for TypeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::Scalar(kind) => f.write_str(kind.as_str()),
            TypeSpec::Named(name) | TypeSpec::Other(name) => f.write_str(name),
            TypeSpec::ArrayOf(element) => write!(f, "{element}[]"),
        }
    }
}
