//! View helper nodes: open, validate, execute.

use std::sync::Arc;

use super::binding::{bind_arguments, Binding};
use super::validation::validate_arguments;
use super::{HelperType, RenderScope, RenderStrategy};
use crate::arguments::{ArgumentCollection, Arguments};
use crate::context::RenderingContext;
use crate::errors::{render_strategy_missing, ComponentError, RenderResult};
use crate::node::{Component, ComponentNode, Flattened, Node, NodeKind, NodeRef, NodeState};
use crate::render::{render_nodes, ChildRenderer, CompiledRender};

/// One use of a view helper in a template.
///
/// Built through the [`Component`] lifecycle, then executed either by
/// walking (`execute`) or by replaying the render produced by `compile`.
/// Cloning is cheap: children and argument values are shared.
#[derive(Clone, Debug)]
pub struct ViewHelperNode {
    component: ComponentNode,
    helper: Arc<HelperType>,
    additional: Arguments,
    deferred_children: Option<ChildRenderer>,
}

impl ViewHelperNode {
    pub fn new(helper: Arc<HelperType>) -> Self {
        let mut component = ComponentNode::named(helper.name());
        component.set_escape_output(helper.helper().escape_output());
        component.set_escape_children(helper.helper().escape_children());
        ViewHelperNode {
            component,
            helper,
            additional: Arguments::new(),
            deferred_children: None,
        }
    }

    pub fn helper_type(&self) -> &Arc<HelperType> {
        &self.helper
    }

    pub fn component(&self) -> &ComponentNode {
        &self.component
    }

    pub fn state(&self) -> NodeState {
        self.component.state()
    }

    /// Declared arguments as bound by `on_open`.
    pub fn arguments(&self) -> &Arguments {
        self.component.arguments()
    }

    /// Undeclared arguments the helper accepted.
    pub fn additional_arguments(&self) -> &Arguments {
        &self.additional
    }

    /// Declarations of this node's helper type, shared by every node of it.
    pub fn create_argument_definitions(&self) -> Result<Arc<ArgumentCollection>, ComponentError> {
        self.helper.argument_definitions()
    }

    pub fn flatten(&self, extract_scalar: bool) -> Result<Flattened<'_>, ComponentError> {
        self.component.flatten(extract_scalar)
    }

    pub fn is_children_escaping_enabled(&self) -> bool {
        self.component.is_children_escaping_enabled()
    }

    pub fn is_output_escaping_enabled(&self) -> bool {
        self.component.is_output_escaping_enabled()
    }

    pub fn set_escape_children(&mut self, escape: Option<bool>) {
        self.component.set_escape_children(escape);
    }

    pub fn set_escape_output(&mut self, escape: Option<bool>) {
        self.component.set_escape_output(escape);
    }

    /// Use `children` instead of this node's own children when rendering
    /// them. Compiled renders construct nodes this way.
    pub fn with_deferred_children(mut self, children: ChildRenderer) -> Self {
        self.deferred_children = Some(children);
        self
    }

    /// Check `arguments` against this helper's declarations.
    pub fn validate_arguments(&self, arguments: &Arguments) -> Result<(), ComponentError> {
        let definitions = self.create_argument_definitions()?;
        validate_arguments(&definitions, arguments).map_err(|err| err.in_helper(self.name_str()))
    }

    /// Return the node to a pristine state for unrelated reuse.
    pub fn reset_state(&mut self) {
        self.deferred_children = None;
        self.helper.helper().reset_state();
    }

    /// Execute the node, optionally with an externally evaluated argument set
    /// in place of the bound arguments.
    #[tracing::instrument(level = "trace", skip_all, fields(helper = self.name_str()))]
    pub fn execute_with(
        &self,
        ctx: &mut RenderingContext,
        external: Option<&Arguments>,
    ) -> RenderResult {
        self.dispatch(ctx, external)
            .map_err(|err| err.in_helper(self.name_str()))
    }

    /// Render this node's children: the deferred renderer if one was
    /// supplied, the child nodes otherwise.
    pub fn render_children(&self, ctx: &mut RenderingContext) -> RenderResult {
        match &self.deferred_children {
            Some(children) => children.render(ctx),
            None => render_nodes(self.component.children(), ctx),
        }
    }

    /// Self-contained renderer over a snapshot of this node's children.
    pub fn build_child_renderer(&self) -> ChildRenderer {
        match &self.deferred_children {
            Some(children) => children.clone(),
            None => ChildRenderer::from_nodes(self.component.children()),
        }
    }

    fn name_str(&self) -> &'static str {
        self.helper.name()
    }

    fn dispatch(&self, ctx: &mut RenderingContext, external: Option<&Arguments>) -> RenderResult {
        self.component.ensure_closed("execute")?;
        let definitions = self.create_argument_definitions()?;
        let arguments = match external {
            Some(values) => definitions.evaluate(values, ctx)?,
            None => {
                let mut arguments = self.arguments().evaluate(ctx)?;
                arguments.extend(self.additional.evaluate(ctx)?);
                arguments
            }
        };
        validate_arguments(&definitions, &arguments)?;

        match self.helper.render_strategy() {
            Some(RenderStrategy::Instance(render)) => {
                let scope = RenderScope::new(self, &arguments);
                ctx.nested(|ctx| render(&scope, ctx))
            }
            Some(RenderStrategy::Static(render)) => {
                let children = self.build_child_renderer();
                ctx.nested(|ctx| render(&arguments, &children, ctx))
            }
            None => Err(render_strategy_missing()),
        }
    }

    fn compile_render(&self) -> Result<CompiledRender, ComponentError> {
        self.component.ensure_closed("compile")?;
        let Some(strategy) = self.helper.render_strategy() else {
            return Err(render_strategy_missing());
        };
        let children = match &self.deferred_children {
            Some(children) => children.clone(),
            None => ChildRenderer::compile(self.component.children())?,
        };
        tracing::debug!(helper = self.name_str(), ?strategy, "compiled view helper");

        match strategy {
            RenderStrategy::Static(render) => {
                let name = self.name_str();
                let definitions = self.create_argument_definitions()?;
                let mut bound = self.arguments().clone();
                bound.extend(self.additional.clone());
                Ok(CompiledRender::new(move |ctx| {
                    let replay = |ctx: &mut RenderingContext| {
                        let arguments = bound.evaluate(ctx)?;
                        validate_arguments(&definitions, &arguments)?;
                        ctx.nested(|ctx| render(&arguments, &children, ctx))
                    };
                    replay(ctx).map_err(|err| err.in_helper(name))
                }))
            }
            RenderStrategy::Instance(_) => {
                let node = Arc::new(self.clone().with_deferred_children(children));
                Ok(CompiledRender::new(move |ctx| node.execute_with(ctx, None)))
            }
        }
    }
}

impl Component for ViewHelperNode {
    fn on_open(
        &mut self,
        _ctx: &RenderingContext,
        raw: Arguments,
    ) -> Result<&mut Self, ComponentError> {
        let name = self.name_str();
        self.component
            .ensure_unopened("open")
            .map_err(|err| err.in_helper(name))?;
        let definitions = self.create_argument_definitions()?;
        let Binding {
            arguments,
            additional,
        } = bind_arguments(&definitions, raw).map_err(|err| err.in_helper(name))?;
        self.helper
            .helper()
            .validate_additional_arguments(&additional, &definitions)
            .map_err(|err| err.in_helper(name))?;

        tracing::trace!(
            helper = name,
            bound = arguments.len(),
            additional = additional.len(),
            "opened"
        );
        self.component.bind(arguments);
        self.additional = additional;
        Ok(self)
    }

    fn add_child(&mut self, child: NodeRef) -> Result<&mut Self, ComponentError> {
        let name = self.name_str();
        self.component
            .add_child(child)
            .map_err(|err| err.in_helper(name))?;
        Ok(self)
    }

    fn on_close(&mut self, ctx: &RenderingContext) -> Result<&mut Self, ComponentError> {
        let name = self.name_str();
        self.component
            .on_close(ctx)
            .map_err(|err| err.in_helper(name))?;
        Ok(self)
    }
}

impl Node for ViewHelperNode {
    fn kind(&self) -> NodeKind {
        NodeKind::ViewHelper
    }

    fn name(&self) -> Option<&str> {
        self.component.name()
    }

    fn children(&self) -> &[NodeRef] {
        self.component.children()
    }

    fn execute(&self, ctx: &mut RenderingContext) -> RenderResult {
        self.execute_with(ctx, None)
    }

    fn compile(self: Arc<Self>) -> Result<CompiledRender, ComponentError> {
        self.compile_render()
            .map_err(|err| err.in_helper(self.name_str()))
    }
}
