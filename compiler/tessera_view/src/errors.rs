//! Error types for component binding and rendering.
//!
//! Every failure raised while declaring, binding, validating or rendering a
//! component is a `ComponentError`. Errors are never recovered locally: they
//! abort the render of the whole tree and surface to the caller of the
//! top-level render.
//!
//! `ComponentErrorKind` carries the structured data; factory functions
//! (e.g. `missing_required_arguments()`) are the public way to build errors.

use std::fmt;

use crate::node::NodeState;
use crate::value::Value;

/// Result of rendering a node.
pub type RenderResult = Result<Value, ComponentError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ComponentErrorKind {
    // Declaration
    #[error("argument \"{name}\" has already been declared")]
    DuplicateArgument { name: String },
    #[error("argument \"{name}\" cannot be overridden because it was never declared")]
    UnknownArgument { name: String },

    // Binding
    #[error("required argument(s) missing: {}", quoted(.names))]
    MissingRequiredArguments { names: Vec<String> },
    #[error(
        "undeclared argument(s) passed: {}; valid arguments are: {}",
        quoted(.names),
        quoted(.valid)
    )]
    UndeclaredArguments { names: Vec<String>, valid: Vec<String> },

    // Validation
    #[error("argument \"{argument}\" expects {expected}, got {actual}")]
    TypeMismatch {
        argument: String,
        expected: String,
        actual: String,
    },

    // Rendering
    #[error("no render strategy is defined")]
    RenderStrategyMissing,
    #[error("no child node named \"{name}\"")]
    ChildNotFound { name: String },
    #[error("cannot {operation} a node that is {state}")]
    InvalidLifecycle {
        operation: &'static str,
        state: NodeState,
    },
    #[error("maximum render depth exceeded (limit: {depth})")]
    RecursionLimitExceeded { depth: usize },
    #[error("{message}")]
    RenderFailed { message: String },

    // Registry
    #[error("unknown view helper \"{name}\"")]
    UnknownHelper { name: String },
    #[error("view helper \"{name}\" is already registered")]
    DuplicateHelper { name: String },
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Component error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentError {
    /// Structured error category.
    pub kind: ComponentErrorKind,
    /// Name of the view helper the error was raised for, if any.
    pub helper: Option<String>,
}

impl ComponentError {
    fn from_kind(kind: ComponentErrorKind) -> Self {
        ComponentError { kind, helper: None }
    }

    /// Attach the name of the view helper that raised this error.
    ///
    /// An already attached name is kept, so the innermost helper wins when an
    /// error propagates through nested helpers.
    #[must_use]
    pub fn in_helper(mut self, name: &str) -> Self {
        if self.helper.is_none() {
            self.helper = Some(name.to_string());
        }
        self
    }
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.helper {
            Some(helper) => write!(f, "{helper}: {}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for ComponentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

// Declaration Errors

/// Argument registered twice without an override.
#[cold]
pub fn duplicate_argument(name: &str) -> ComponentError {
    ComponentError::from_kind(ComponentErrorKind::DuplicateArgument {
        name: name.to_string(),
    })
}

/// Override of an argument that was never registered.
#[cold]
pub fn unknown_argument(name: &str) -> ComponentError {
    ComponentError::from_kind(ComponentErrorKind::UnknownArgument {
        name: name.to_string(),
    })
}

// Binding Errors

/// Every required argument that was not supplied, reported together.
#[cold]
pub fn missing_required_arguments(names: Vec<String>) -> ComponentError {
    ComponentError::from_kind(ComponentErrorKind::MissingRequiredArguments { names })
}

/// Caller-supplied arguments the helper does not declare.
#[cold]
pub fn undeclared_arguments(names: Vec<String>, valid: Vec<String>) -> ComponentError {
    ComponentError::from_kind(ComponentErrorKind::UndeclaredArguments { names, valid })
}

// Validation Errors

/// Bound value does not conform to the declared type.
#[cold]
pub fn type_mismatch(argument: &str, expected: &str, actual: &Value) -> ComponentError {
    ComponentError::from_kind(ComponentErrorKind::TypeMismatch {
        argument: argument.to_string(),
        expected: expected.to_string(),
        actual: actual.describe(),
    })
}

// Rendering Errors

/// Helper supplies neither an instance nor a static render routine.
#[cold]
pub fn render_strategy_missing() -> ComponentError {
    ComponentError::from_kind(ComponentErrorKind::RenderStrategyMissing)
}

/// No child with the requested name.
#[cold]
pub fn child_not_found(name: &str) -> ComponentError {
    ComponentError::from_kind(ComponentErrorKind::ChildNotFound {
        name: name.to_string(),
    })
}

/// Lifecycle operation attempted in the wrong node state.
#[cold]
pub fn invalid_lifecycle(operation: &'static str, state: NodeState) -> ComponentError {
    ComponentError::from_kind(ComponentErrorKind::InvalidLifecycle { operation, state })
}

/// Nested helper execution went deeper than the configured limit.
#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> ComponentError {
    ComponentError::from_kind(ComponentErrorKind::RecursionLimitExceeded { depth })
}

/// A helper's own render routine failed.
#[cold]
pub fn render_failed(message: impl Into<String>) -> ComponentError {
    ComponentError::from_kind(ComponentErrorKind::RenderFailed {
        message: message.into(),
    })
}

// Registry Errors

/// No helper registered under this name.
#[cold]
pub fn unknown_helper(name: &str) -> ComponentError {
    ComponentError::from_kind(ComponentErrorKind::UnknownHelper {
        name: name.to_string(),
    })
}

/// Helper name registered twice.
#[cold]
pub fn duplicate_helper(name: &str) -> ComponentError {
    ComponentError::from_kind(ComponentErrorKind::DuplicateHelper {
        name: name.to_string(),
    })
}
