//! Replayable renders and child renderers.
//!
//! The interpreted path walks nodes; the compiled path replays closures built
//! once by `Node::compile`. Both combine child output with [`combine`] so a
//! tree renders the same either way.

use std::fmt;
use std::sync::Arc;

use crate::context::RenderingContext;
use crate::errors::{ComponentError, RenderResult};
use crate::node::NodeRef;
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

type RenderFn = dyn Fn(&mut RenderingContext) -> RenderResult + Send + Sync;

/// A compiled render, shareable across threads and replayable any number of
/// times. It holds no reference to the node it was compiled from.
#[derive(Clone)]
pub struct CompiledRender(Arc<RenderFn>);

impl CompiledRender {
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&mut RenderingContext) -> RenderResult + Send + Sync + 'static,
    {
        CompiledRender(Arc::new(render))
    }

    #[inline]
    pub fn render(&self, ctx: &mut RenderingContext) -> RenderResult {
        (self.0)(ctx)
    }
}

impl fmt::Debug for CompiledRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CompiledRender(..)")
    }
}

/// Self-contained renderer for a node's children.
///
/// Holds a snapshot of the children (or their compiled renders), never the
/// node itself, so it stays valid however the original node is later used.
#[derive(Clone, Debug)]
pub enum ChildRenderer {
    /// Interpreted: child nodes, executed on each render.
    Nodes(Arc<[NodeRef]>),
    /// Compiled: child renders, replayed on each render.
    Compiled(Arc<[CompiledRender]>),
}

impl ChildRenderer {
    /// Snapshot `nodes` for interpreted rendering.
    pub fn from_nodes(nodes: &[NodeRef]) -> Self {
        ChildRenderer::Nodes(nodes.iter().cloned().collect())
    }

    /// Compile every node in `nodes`.
    pub fn compile(nodes: &[NodeRef]) -> Result<Self, ComponentError> {
        let compiled = nodes
            .iter()
            .map(|node| ensure_sufficient_stack(|| Arc::clone(node).compile()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ChildRenderer::Compiled(compiled.into()))
    }

    /// Render the children and combine their output.
    pub fn render(&self, ctx: &mut RenderingContext) -> RenderResult {
        match self {
            ChildRenderer::Nodes(nodes) => render_nodes(nodes, ctx),
            ChildRenderer::Compiled(renders) => {
                let mut outputs = Vec::with_capacity(renders.len());
                for render in renders.iter() {
                    outputs.push(ensure_sufficient_stack(|| render.render(ctx))?);
                }
                Ok(combine(outputs))
            }
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ChildRenderer::Nodes(nodes) => nodes.len(),
            ChildRenderer::Compiled(renders) => renders.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for ChildRenderer {
    /// Compiled renders of nested containers form a chain as deep as the
    /// tree; release it with stack growth.
    fn drop(&mut self) {
        if let ChildRenderer::Compiled(renders) = self {
            let renders = std::mem::replace(renders, Arc::from(Vec::new()));
            ensure_sufficient_stack(move || drop(renders));
        }
    }
}

/// Execute `nodes` in order and combine their output.
pub fn render_nodes(nodes: &[NodeRef], ctx: &mut RenderingContext) -> RenderResult {
    let mut outputs = Vec::with_capacity(nodes.len());
    for node in nodes {
        outputs.push(ensure_sufficient_stack(|| node.execute(ctx))?);
    }
    Ok(combine(outputs))
}

/// Combine rendered child values: none is `Null`, one is returned unchanged,
/// several are concatenated as output strings.
pub fn combine(mut outputs: Vec<Value>) -> Value {
    match outputs.len() {
        0 => Value::Null,
        1 => outputs.pop().unwrap_or_default(),
        _ => Value::string(
            outputs
                .iter()
                .map(Value::to_output_string)
                .collect::<String>(),
        ),
    }
}

#[cfg(test)]
mod tests;
