//! Lazily evaluated boolean arguments.

use std::sync::Arc;

use super::{Node, NodeKind, NodeRef};
use crate::context::RenderingContext;
use crate::errors::{ComponentError, RenderResult};
use crate::render::CompiledRender;
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

/// Wraps an expression bound to a boolean argument.
///
/// The wrapped node is not evaluated at bind time. Every execution evaluates
/// it against the current context and coerces the result to a boolean;
/// nothing is cached between reads.
#[derive(Clone, Debug)]
pub struct DeferredBooleanNode {
    inner: NodeRef,
}

impl DeferredBooleanNode {
    pub fn new(inner: NodeRef) -> Self {
        DeferredBooleanNode { inner }
    }

    pub fn inner(&self) -> &NodeRef {
        &self.inner
    }
}

impl Node for DeferredBooleanNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Boolean
    }

    fn children(&self) -> &[NodeRef] {
        std::slice::from_ref(&self.inner)
    }

    fn execute(&self, ctx: &mut RenderingContext) -> RenderResult {
        let value = ensure_sufficient_stack(|| self.inner.execute(ctx))?;
        Ok(Value::Bool(value.to_boolean()))
    }

    fn compile(self: Arc<Self>) -> Result<CompiledRender, ComponentError> {
        let inner = ensure_sufficient_stack(|| Arc::clone(&self.inner).compile())?;
        Ok(CompiledRender::new(move |ctx| {
            let value = ensure_sufficient_stack(|| inner.render(ctx))?;
            Ok(Value::Bool(value.to_boolean()))
        }))
    }
}
