//! Syntax tree nodes.
//!
//! A parsed template is a tree of [`Node`]s. Nodes are built mutably by the
//! parser through the [`Component`] lifecycle (`on_open`, `add_child`,
//! `on_close`), then frozen behind a [`NodeRef`] and executed any number of
//! times, either by walking the tree (`Node::execute`) or by replaying a
//! closure produced once by `Node::compile`.

mod component;
mod deferred;
mod text;
mod variable;

use std::fmt;
use std::sync::Arc;

use crate::arguments::Arguments;
use crate::context::RenderingContext;
use crate::errors::{child_not_found, ComponentError, RenderResult};
use crate::render::CompiledRender;

pub use component::{ComponentNode, Flattened};
pub use deferred::DeferredBooleanNode;
pub use text::TextNode;
pub use variable::VariableNode;

/// Shared, immutable handle to a built node.
pub type NodeRef = Arc<dyn Node>;

/// Node category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Text,
    Variable,
    Boolean,
    Component,
    ViewHelper,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Text => "text",
            NodeKind::Variable => "variable",
            NodeKind::Boolean => "boolean",
            NodeKind::Component => "component",
            NodeKind::ViewHelper => "view helper",
        })
    }
}

/// Build-time lifecycle state.
///
/// `Unopened → Opened → Closed`. Execution does not change the state: a
/// closed node may be executed any number of times.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum NodeState {
    #[default]
    Unopened,
    Opened,
    Closed,
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeState::Unopened => "unopened",
            NodeState::Opened => "opened",
            NodeState::Closed => "closed",
        })
    }
}

/// Render-time contract shared by every node.
pub trait Node: fmt::Debug + Send + Sync + 'static {
    fn kind(&self) -> NodeKind;

    fn name(&self) -> Option<&str> {
        None
    }

    /// Child nodes in document order.
    fn children(&self) -> &[NodeRef] {
        &[]
    }

    /// First child whose name equals `name`.
    fn named_child(&self, name: &str) -> Result<&NodeRef, ComponentError> {
        self.children()
            .iter()
            .find(|child| child.name() == Some(name))
            .ok_or_else(|| child_not_found(name))
    }

    /// Text content, for plain-text leaves only.
    fn as_text(&self) -> Option<&str> {
        None
    }

    /// Render this node against `ctx`.
    fn execute(&self, ctx: &mut RenderingContext) -> RenderResult;

    /// Produce a replayable render that no longer depends on this node
    /// being retained or mutated.
    fn compile(self: Arc<Self>) -> Result<CompiledRender, ComponentError>;
}

/// Build-time contract, driven by the parser.
///
/// Every method returns the node again so calls can be chained.
pub trait Component {
    /// Bind the raw arguments found by the parser.
    fn on_open(
        &mut self,
        ctx: &RenderingContext,
        raw: Arguments,
    ) -> Result<&mut Self, ComponentError>;

    /// Append a child. Not allowed once the node is closed.
    fn add_child(&mut self, child: NodeRef) -> Result<&mut Self, ComponentError>;

    /// Finish construction; the node's structure is read-only afterwards.
    fn on_close(&mut self, ctx: &RenderingContext) -> Result<&mut Self, ComponentError>;
}
