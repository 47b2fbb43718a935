//! Tree base shared by containers and view helpers.

use std::sync::Arc;

use super::{Component, Node, NodeKind, NodeRef, NodeState};
use crate::arguments::Arguments;
use crate::context::RenderingContext;
use crate::errors::{invalid_lifecycle, ComponentError, RenderResult};
use crate::render::{render_nodes, ChildRenderer, CompiledRender};
use crate::stack::ensure_sufficient_stack;
use crate::value::{parse_numeric, Value};

/// Result of [`ComponentNode::flatten`].
#[derive(Debug)]
pub enum Flattened<'a> {
    /// No children.
    Null,
    /// Content of a sole plain-text child: a number if numeric, else the text.
    Scalar(Value),
    /// The sole child.
    Child(&'a NodeRef),
    /// The node itself; nothing to reduce.
    Node,
}

/// Component tree node: optional name, ordered children, bound arguments and
/// the two tri-state escaping flags.
///
/// Used directly as a generic container (e.g. a template root); view helpers
/// embed one.
#[derive(Clone, Debug, Default)]
pub struct ComponentNode {
    name: Option<String>,
    children: Vec<NodeRef>,
    arguments: Arguments,
    escape_children: Option<bool>,
    escape_output: Option<bool>,
    state: NodeState,
}

impl ComponentNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        let mut node = Self::default();
        node.name = Some(name.into());
        node
    }

    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Arguments bound when the node was opened.
    pub fn arguments(&self) -> &Arguments {
        &self.arguments
    }

    pub fn escape_children(&self) -> Option<bool> {
        self.escape_children
    }

    pub fn escape_output(&self) -> Option<bool> {
        self.escape_output
    }

    /// `None` inherits from the output escaping setting.
    pub fn set_escape_children(&mut self, escape: Option<bool>) {
        self.escape_children = escape;
    }

    /// `None` behaves as enabled.
    pub fn set_escape_output(&mut self, escape: Option<bool>) {
        self.escape_output = escape;
    }

    /// Whether children's output is escaped.
    ///
    /// Unset means the opposite of output escaping.
    pub fn is_children_escaping_enabled(&self) -> bool {
        match self.escape_children {
            Some(escape) => escape,
            None => !self.is_output_escaping_enabled(),
        }
    }

    /// Whether this node's own output is escaped. Only an explicit `false`
    /// disables it.
    pub fn is_output_escaping_enabled(&self) -> bool {
        self.escape_output != Some(false)
    }

    /// Reduce a single-child subtree.
    ///
    /// With `extract_scalar`, no children flatten to `Null` and a sole child
    /// flattens to its text (numeric text to a number) or to the child
    /// itself. Everything else, and every call without `extract_scalar`,
    /// returns `Flattened::Node`.
    pub fn flatten(&self, extract_scalar: bool) -> Result<Flattened<'_>, ComponentError> {
        self.ensure_closed("flatten")?;
        if !extract_scalar {
            return Ok(Flattened::Node);
        }
        Ok(match self.children.as_slice() {
            [] => Flattened::Null,
            [child] => match child.as_text() {
                Some(text) => {
                    Flattened::Scalar(parse_numeric(text).unwrap_or_else(|| Value::from(text)))
                }
                None => Flattened::Child(child),
            },
            _ => Flattened::Node,
        })
    }

    pub(crate) fn ensure_unopened(&self, operation: &'static str) -> Result<(), ComponentError> {
        match self.state {
            NodeState::Unopened => Ok(()),
            state => Err(invalid_lifecycle(operation, state)),
        }
    }

    pub(crate) fn ensure_not_closed(&self, operation: &'static str) -> Result<(), ComponentError> {
        match self.state {
            NodeState::Closed => Err(invalid_lifecycle(operation, NodeState::Closed)),
            _ => Ok(()),
        }
    }

    pub(crate) fn ensure_closed(&self, operation: &'static str) -> Result<(), ComponentError> {
        match self.state {
            NodeState::Closed => Ok(()),
            state => Err(invalid_lifecycle(operation, state)),
        }
    }

    /// Record the bound arguments; the node becomes `Opened`.
    pub(crate) fn bind(&mut self, arguments: Arguments) {
        self.arguments = arguments;
        self.state = NodeState::Opened;
    }
}

impl Drop for ComponentNode {
    /// Children of nested containers are released with stack growth, so a
    /// deep tree drops without overflowing.
    fn drop(&mut self) {
        if !self.children.is_empty() {
            let children = std::mem::take(&mut self.children);
            ensure_sufficient_stack(move || drop(children));
        }
    }
}

impl Component for ComponentNode {
    /// Plain components declare nothing, so raw arguments are kept as given.
    fn on_open(
        &mut self,
        _ctx: &RenderingContext,
        raw: Arguments,
    ) -> Result<&mut Self, ComponentError> {
        self.ensure_unopened("open")?;
        self.bind(raw);
        Ok(self)
    }

    fn add_child(&mut self, child: NodeRef) -> Result<&mut Self, ComponentError> {
        self.ensure_not_closed("add a child to")?;
        self.children.push(child);
        Ok(self)
    }

    fn on_close(&mut self, _ctx: &RenderingContext) -> Result<&mut Self, ComponentError> {
        self.ensure_not_closed("close")?;
        self.state = NodeState::Closed;
        Ok(self)
    }
}

impl Node for ComponentNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Component
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn children(&self) -> &[NodeRef] {
        &self.children
    }

    fn execute(&self, ctx: &mut RenderingContext) -> RenderResult {
        self.ensure_closed("execute")?;
        render_nodes(&self.children, ctx)
    }

    fn compile(self: Arc<Self>) -> Result<CompiledRender, ComponentError> {
        self.ensure_closed("compile")?;
        let children = ChildRenderer::compile(&self.children)?;
        Ok(CompiledRender::new(move |ctx| children.render(ctx)))
    }
}
