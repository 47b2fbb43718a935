//! View helpers: components with declared arguments and a render routine.
//!
//! Adding a helper means implementing [`ViewHelper`] and registering it. A
//! helper declares its arguments once, in `initialize_arguments`, and picks
//! one of two render strategies:
//!
//! - [`RenderStrategy::Instance`]: renders from the node's own bound state
//!   through a [`RenderScope`].
//! - [`RenderStrategy::Static`]: a stateless routine over
//!   `(arguments, child renderer, context)`, replayable by compiled templates
//!   without keeping the node around.
//!
//! A helper without a strategy fails to render with `RenderStrategyMissing`.

mod binding;
mod node;
mod validation;

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::arguments::{ArgumentCollection, Arguments};
use crate::context::RenderingContext;
use crate::errors::{undeclared_arguments, ComponentError, RenderResult};
use crate::render::ChildRenderer;
use crate::value::Value;

pub use node::ViewHelperNode;
pub use validation::validate_arguments;

/// Instance render routine.
pub type InstanceRenderFn = fn(&RenderScope<'_>, &mut RenderingContext) -> RenderResult;

/// Stateless render routine.
pub type StaticRenderFn = fn(&Arguments, &ChildRenderer, &mut RenderingContext) -> RenderResult;

/// How a helper renders.
#[derive(Clone, Copy)]
pub enum RenderStrategy {
    Instance(InstanceRenderFn),
    Static(StaticRenderFn),
}

impl fmt::Debug for RenderStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderStrategy::Instance(_) => f.write_str("Instance"),
            RenderStrategy::Static(_) => f.write_str("Static"),
        }
    }
}

/// Behavior of one view helper type.
pub trait ViewHelper: Send + Sync + 'static {
    /// Identifier used in templates and diagnostics (e.g. `format.case`).
    fn name(&self) -> &'static str;

    /// Declare the accepted arguments. Called once per helper type.
    fn initialize_arguments(
        &self,
        _arguments: &mut ArgumentCollection,
    ) -> Result<(), ComponentError> {
        Ok(())
    }

    /// Render strategy; `None` makes every render fail.
    fn render_strategy(&self) -> Option<RenderStrategy> {
        None
    }

    /// Initial output escaping flag for nodes of this type.
    fn escape_output(&self) -> Option<bool> {
        None
    }

    /// Initial children escaping flag for nodes of this type.
    fn escape_children(&self) -> Option<bool> {
        None
    }

    /// Check arguments supplied without a declaration.
    ///
    /// Rejects any by default. Helpers that take arbitrary extra arguments
    /// override this to accept them.
    fn validate_additional_arguments(
        &self,
        additional: &Arguments,
        definitions: &ArgumentCollection,
    ) -> Result<(), ComponentError> {
        if additional.is_empty() {
            return Ok(());
        }
        Err(undeclared_arguments(additional.names(), definitions.names()))
    }

    /// Return helper-held state to pristine between unrelated renders.
    fn reset_state(&self) {}
}

/// One registered view helper type, shared by every node of that type.
///
/// The render strategy is fixed when the type is created. Argument
/// definitions are computed on first use and then reused by every node.
pub struct HelperType {
    helper: Box<dyn ViewHelper>,
    strategy: Option<RenderStrategy>,
    definitions: OnceLock<Arc<ArgumentCollection>>,
}

impl HelperType {
    pub fn new(helper: impl ViewHelper) -> Arc<Self> {
        let strategy = helper.render_strategy();
        Arc::new(HelperType {
            helper: Box::new(helper),
            strategy,
            definitions: OnceLock::new(),
        })
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.helper.name()
    }

    pub fn helper(&self) -> &dyn ViewHelper {
        self.helper.as_ref()
    }

    #[inline]
    pub fn render_strategy(&self) -> Option<RenderStrategy> {
        self.strategy
    }

    /// Declared arguments of this type.
    ///
    /// Runs the helper's declaration routine the first time only. A failed
    /// declaration is not cached and fails again on the next call.
    pub fn argument_definitions(&self) -> Result<Arc<ArgumentCollection>, ComponentError> {
        if let Some(definitions) = self.definitions.get() {
            return Ok(Arc::clone(definitions));
        }
        let mut collection = ArgumentCollection::new();
        self.helper
            .initialize_arguments(&mut collection)
            .map_err(|err| err.in_helper(self.name()))?;
        tracing::debug!(
            helper = self.name(),
            arguments = collection.len(),
            "argument definitions computed"
        );
        Ok(Arc::clone(
            self.definitions.get_or_init(|| Arc::new(collection)),
        ))
    }
}

impl fmt::Debug for HelperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HelperType")
            .field("name", &self.name())
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}

/// Instance-render view of a node: its evaluated arguments and children.
pub struct RenderScope<'a> {
    node: &'a ViewHelperNode,
    arguments: &'a Arguments,
}

impl<'a> RenderScope<'a> {
    pub(crate) fn new(node: &'a ViewHelperNode, arguments: &'a Arguments) -> Self {
        RenderScope { node, arguments }
    }

    pub fn node(&self) -> &'a ViewHelperNode {
        self.node
    }

    /// Evaluated arguments for this render, declared ones first.
    pub fn arguments(&self) -> &'a Arguments {
        self.arguments
    }

    /// Evaluated argument value, `Null` if absent.
    pub fn argument(&self, name: &str) -> Value {
        self.arguments.get(name).cloned().unwrap_or_default()
    }

    /// Names of the undeclared arguments the helper accepted.
    pub fn additional_names(&self) -> Vec<String> {
        self.node.additional_arguments().names()
    }

    pub fn render_children(&self, ctx: &mut RenderingContext) -> RenderResult {
        self.node.render_children(ctx)
    }

    pub fn child_renderer(&self) -> ChildRenderer {
        self.node.build_child_renderer()
    }
}
