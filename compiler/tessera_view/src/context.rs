//! Rendering context: variable scope and render configuration.
//!
//! The context is passed through every node execution. Nodes read variables
//! from it; helpers may bind variables for their children.

use rustc_hash::FxHashMap;

use crate::errors::{recursion_limit_exceeded, RenderResult};
use crate::value::Value;

/// Default bound on nested view-helper execution.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// How a template is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    /// Walk the node tree on every render.
    #[default]
    Interpreted,
    /// Compile the tree once and replay the compiled render.
    Compiled,
}

impl ExecutionMode {
    /// Whether renders go through a cached compiled closure.
    #[inline]
    pub fn uses_compiled_render(self) -> bool {
        matches!(self, Self::Compiled)
    }
}

/// Render configuration carried by the context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    mode: ExecutionMode,
    max_depth: Option<usize>,
}

impl RenderConfig {
    #[must_use]
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Bound nested helper execution; `None` removes the bound.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            mode: ExecutionMode::default(),
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

/// Template variables.
#[derive(Clone, Debug, Default)]
pub struct VariableScope {
    variables: FxHashMap<String, Value>,
}

impl VariableScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Bind a variable, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.variables.insert(name.into(), value)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.variables.remove(name)
    }

    /// Resolve a dotted path such as `user.address.city`.
    ///
    /// Each segment after the first looks into a map entry, an object field
    /// or a list index. Anything unresolvable yields `Value::Null`.
    pub fn resolve(&self, path: &str) -> Value {
        let mut segments = path.split('.');
        let Some(first) = segments.next() else {
            return Value::Null;
        };
        let mut current = match self.variables.get(first) {
            Some(value) => value.clone(),
            None => return Value::Null,
        };
        for segment in segments {
            current = match &current {
                Value::Map(entries) => entries.get(segment).cloned(),
                Value::Object(object) => object.field(segment).cloned(),
                Value::List(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index).cloned()),
                _ => None,
            }
            .unwrap_or_default();
        }
        current
    }
}

/// State threaded through one render.
#[derive(Clone, Debug, Default)]
pub struct RenderingContext {
    variables: VariableScope,
    config: RenderConfig,
    depth: usize,
}

impl RenderingContext {
    pub fn new(config: RenderConfig) -> Self {
        RenderingContext {
            variables: VariableScope::new(),
            config,
            depth: 0,
        }
    }

    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: Value) -> Self {
        self.variables.insert(name, value);
        self
    }

    pub fn variables(&self) -> &VariableScope {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut VariableScope {
        &mut self.variables
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Current nesting depth of helper execution.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Run `render` one helper level deeper.
    ///
    /// Fails before calling `render` when the configured depth limit would be
    /// exceeded. The depth is restored whether or not `render` succeeds.
    pub fn nested<F>(&mut self, render: F) -> RenderResult
    where
        F: FnOnce(&mut Self) -> RenderResult,
    {
        if let Some(limit) = self.config.max_depth {
            if self.depth >= limit {
                return Err(recursion_limit_exceeded(limit));
            }
        }
        self.depth = self.depth.saturating_add(1);
        let result = render(self);
        self.depth = self.depth.saturating_sub(1);
        result
    }
}

#[cfg(test)]
mod tests;
