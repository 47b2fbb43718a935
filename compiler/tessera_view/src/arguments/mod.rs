//! Argument declarations and argument value maps.
//!
//! A component type declares the arguments it accepts once, as an
//! [`ArgumentCollection`] of [`ArgumentDefinition`]s. Concrete values supplied
//! by the parser or a caller travel as [`Arguments`].

mod type_spec;

use indexmap::IndexMap;

use crate::context::RenderingContext;
use crate::errors::{duplicate_argument, unknown_argument, ComponentError};
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

pub use type_spec::{ScalarKind, TypeSpec};

/// Immutable description of one accepted argument.
#[derive(Clone, Debug, PartialEq)]
pub struct ArgumentDefinition {
    name: String,
    type_spec: TypeSpec,
    description: String,
    required: bool,
    default: Value,
}

impl ArgumentDefinition {
    pub fn new(
        name: impl Into<String>,
        type_spec: impl Into<TypeSpec>,
        description: impl Into<String>,
        required: bool,
        default: Value,
    ) -> Self {
        ArgumentDefinition {
            name: name.into(),
            type_spec: type_spec.into(),
            description: description.into(),
            required,
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_spec(&self) -> &TypeSpec {
        &self.type_spec
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Value bound when the argument is not supplied.
    pub fn default_value(&self) -> &Value {
        &self.default
    }
}

/// Ordered set of argument declarations for one component type.
///
/// Names are unique. Declaration order is kept and is the order in which
/// missing arguments are reported.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArgumentCollection {
    definitions: IndexMap<String, ArgumentDefinition>,
}

impl ArgumentCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a new argument.
    ///
    /// Fails with `DuplicateArgument` if `name` is already declared.
    pub fn register_argument(
        &mut self,
        name: &str,
        type_spec: impl Into<TypeSpec>,
        description: &str,
        required: bool,
        default: Value,
    ) -> Result<&mut Self, ComponentError> {
        if self.definitions.contains_key(name) {
            return Err(duplicate_argument(name));
        }
        let definition = ArgumentDefinition::new(name, type_spec, description, required, default);
        self.definitions.insert(name.to_string(), definition);
        Ok(self)
    }

    /// Replace the declaration of an already declared argument.
    ///
    /// The argument keeps its position. Fails with `UnknownArgument` if
    /// `name` was never declared.
    pub fn override_argument(
        &mut self,
        name: &str,
        type_spec: impl Into<TypeSpec>,
        description: &str,
        required: bool,
        default: Value,
    ) -> Result<&mut Self, ComponentError> {
        let Some(slot) = self.definitions.get_mut(name) else {
            return Err(unknown_argument(name));
        };
        *slot = ArgumentDefinition::new(name, type_spec, description, required, default);
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&ArgumentDefinition> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Declarations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ArgumentDefinition> {
        self.definitions.values()
    }

    /// Declared names in declaration order.
    pub fn names(&self) -> Vec<String> {
        self.definitions.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Evaluate an argument set against these declarations.
    ///
    /// Node values are rendered; other values pass through. Declared arguments
    /// absent from `values` receive their default.
    pub fn evaluate(
        &self,
        values: &Arguments,
        ctx: &mut RenderingContext,
    ) -> Result<Arguments, ComponentError> {
        let mut evaluated = values.evaluate(ctx)?;
        for definition in self.iter() {
            if !evaluated.contains(definition.name()) {
                evaluated.insert(definition.name(), definition.default_value().clone());
            }
        }
        Ok(evaluated)
    }
}

/// Ordered argument values by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    values: IndexMap<String, Value>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Remove a value, keeping the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.shift_remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Render every node value against `ctx`; other values are copied.
    pub fn evaluate(&self, ctx: &mut RenderingContext) -> Result<Arguments, ComponentError> {
        let mut evaluated = IndexMap::with_capacity(self.values.len());
        for (name, value) in &self.values {
            let value = match value {
                Value::Node(node) => ensure_sufficient_stack(|| node.execute(ctx))?,
                other => other.clone(),
            };
            evaluated.insert(name.clone(), value);
        }
        Ok(Arguments { values: evaluated })
    }
}

impl Extend<(String, Value)> for Arguments {
    fn extend<I: IntoIterator<Item = (String, Value)>>(&mut self, iter: I) {
        self.values.extend(iter);
    }
}

impl IntoIterator for Arguments {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Arguments {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}
