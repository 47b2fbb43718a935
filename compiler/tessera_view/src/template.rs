//! Parsed templates and their two execution paths.

use std::sync::{Arc, OnceLock};

use crate::context::RenderingContext;
use crate::errors::{ComponentError, RenderResult};
use crate::node::NodeRef;
use crate::render::CompiledRender;

/// A closed node tree ready to render.
///
/// In compiled mode the tree is compiled on first render and the resulting
/// [`CompiledRender`] is reused by every later render, from any thread.
#[derive(Debug)]
pub struct Template {
    root: NodeRef,
    compiled: OnceLock<CompiledRender>,
}

impl Template {
    pub fn new(root: NodeRef) -> Self {
        Template {
            root,
            compiled: OnceLock::new(),
        }
    }

    pub fn root(&self) -> &NodeRef {
        &self.root
    }

    /// Render according to the context's execution mode.
    pub fn render(&self, ctx: &mut RenderingContext) -> RenderResult {
        if ctx.config().mode().uses_compiled_render() {
            self.compiled()?.render(ctx)
        } else {
            self.root.execute(ctx)
        }
    }

    /// The compiled render, compiling the tree if not done yet.
    ///
    /// A failed compilation is not cached.
    pub fn compiled(&self) -> Result<&CompiledRender, ComponentError> {
        if let Some(compiled) = self.compiled.get() {
            return Ok(compiled);
        }
        let compiled = Arc::clone(&self.root).compile()?;
        tracing::debug!(root = %self.root.kind(), "template compiled");
        Ok(self.compiled.get_or_init(|| compiled))
    }

    pub fn is_compiled(&self) -> bool {
        self.compiled.get().is_some()
    }
}
