//! Variable lookup leaf.

use std::sync::Arc;

use super::{Node, NodeKind};
use crate::context::RenderingContext;
use crate::errors::{ComponentError, RenderResult};
use crate::render::CompiledRender;

/// Resolves a dotted variable path (`user.name`) in the rendering context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariableNode {
    path: String,
}

impl VariableNode {
    pub fn new(path: impl Into<String>) -> Self {
        VariableNode { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Node for VariableNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Variable
    }

    fn execute(&self, ctx: &mut RenderingContext) -> RenderResult {
        Ok(ctx.variables().resolve(&self.path))
    }

    fn compile(self: Arc<Self>) -> Result<CompiledRender, ComponentError> {
        let path = self.path.clone();
        Ok(CompiledRender::new(move |ctx| Ok(ctx.variables().resolve(&path))))
    }
}
