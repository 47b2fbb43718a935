//! Plain-text leaf.

use std::sync::Arc;

use super::{Node, NodeKind};
use crate::context::RenderingContext;
use crate::errors::{ComponentError, RenderResult};
use crate::render::CompiledRender;
use crate::value::Value;

/// Literal text between template constructs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextNode {
    text: Arc<str>,
}

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        let text: String = text.into();
        TextNode {
            text: Arc::from(text),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Node for TextNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Text
    }

    fn as_text(&self) -> Option<&str> {
        Some(&self.text)
    }

    fn execute(&self, _ctx: &mut RenderingContext) -> RenderResult {
        Ok(Value::Str(Arc::clone(&self.text)))
    }

    fn compile(self: Arc<Self>) -> Result<CompiledRender, ComponentError> {
        let value = Value::Str(Arc::clone(&self.text));
        Ok(CompiledRender::new(move |_| Ok(value.clone())))
    }
}
