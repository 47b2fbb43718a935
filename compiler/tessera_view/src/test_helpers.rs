//! Test helpers for view helper unit testing.
//!
//! Provides a handful of small helpers covering both render strategies,
//! a `CountingNode` for observing evaluation, and builders for node trees.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::{
    ArgumentCollection, Arguments, ChildRenderer, Component, ComponentError, ComponentNode,
    CompiledRender, HelperRegistry, HelperType, Node, NodeKind, NodeRef, RenderResult,
    RenderScope, RenderStrategy, RenderingContext, TextNode, Value, VariableNode, ViewHelper,
    ViewHelperNode,
};

/// `format.greeting(name: string, upper: bool = false)`, static strategy.
pub struct GreetingHelper;

impl ViewHelper for GreetingHelper {
    fn name(&self) -> &'static str {
        "format.greeting"
    }

    fn initialize_arguments(
        &self,
        arguments: &mut ArgumentCollection,
    ) -> Result<(), ComponentError> {
        arguments
            .register_argument("name", "string", "Who to greet", true, Value::Null)?
            .register_argument(
                "upper",
                "bool",
                "Upper-case the greeting",
                false,
                Value::Bool(false),
            )?;
        Ok(())
    }

    fn render_strategy(&self) -> Option<RenderStrategy> {
        Some(RenderStrategy::Static(render_greeting))
    }
}

fn render_greeting(
    arguments: &Arguments,
    _children: &ChildRenderer,
    _ctx: &mut RenderingContext,
) -> RenderResult {
    let name = arguments.get("name").map(Value::to_output_string).unwrap_or_default();
    let greeting = format!("Hello, {name}!");
    let upper = arguments.get("upper").and_then(Value::as_bool).unwrap_or(false);
    Ok(Value::string(if upper { greeting.to_uppercase() } else { greeting }))
}

/// `if(condition: bool)`, instance strategy. Renders the `then` or `else`
/// child when present, else all children or nothing.
pub struct IfHelper;

impl ViewHelper for IfHelper {
    fn name(&self) -> &'static str {
        "if"
    }

    fn initialize_arguments(
        &self,
        arguments: &mut ArgumentCollection,
    ) -> Result<(), ComponentError> {
        arguments.register_argument("condition", "bool", "Branch selector", true, Value::Null)?;
        Ok(())
    }

    fn render_strategy(&self) -> Option<RenderStrategy> {
        Some(RenderStrategy::Instance(render_if))
    }
}

fn render_if(scope: &RenderScope<'_>, ctx: &mut RenderingContext) -> RenderResult {
    let condition = scope.argument("condition").to_boolean();
    let node = scope.node();
    let branch = if condition { "then" } else { "else" };
    if node.children().iter().any(|child| child.name().is_some()) {
        return match node.named_child(branch) {
            Ok(child) => child.execute(ctx),
            Err(_) => Ok(Value::Null),
        };
    }
    if condition {
        scope.render_children(ctx)
    } else {
        Ok(Value::Null)
    }
}

/// Declares nothing and has no render strategy.
pub struct NoStrategyHelper;

impl ViewHelper for NoStrategyHelper {
    fn name(&self) -> &'static str {
        "broken"
    }
}

/// `list.join(items: Foo[])`, static strategy.
pub struct ItemsHelper;

impl ViewHelper for ItemsHelper {
    fn name(&self) -> &'static str {
        "list.join"
    }

    fn initialize_arguments(
        &self,
        arguments: &mut ArgumentCollection,
    ) -> Result<(), ComponentError> {
        arguments.register_argument("items", "Foo[]", "Items to join", false, Value::Null)?;
        Ok(())
    }

    fn render_strategy(&self) -> Option<RenderStrategy> {
        Some(RenderStrategy::Static(render_items))
    }
}

fn render_items(
    arguments: &Arguments,
    _children: &ChildRenderer,
    _ctx: &mut RenderingContext,
) -> RenderResult {
    let items = arguments.get("items").cloned().unwrap_or_default();
    Ok(Value::string(items.to_output_string()))
}

/// `tag(name: string)` accepting arbitrary attributes, instance strategy.
pub struct TagHelper;

impl ViewHelper for TagHelper {
    fn name(&self) -> &'static str {
        "tag"
    }

    fn initialize_arguments(
        &self,
        arguments: &mut ArgumentCollection,
    ) -> Result<(), ComponentError> {
        arguments.register_argument("name", "string", "Element name", true, Value::Null)?;
        Ok(())
    }

    fn render_strategy(&self) -> Option<RenderStrategy> {
        Some(RenderStrategy::Instance(render_tag))
    }

    fn validate_additional_arguments(
        &self,
        _additional: &Arguments,
        _definitions: &ArgumentCollection,
    ) -> Result<(), ComponentError> {
        Ok(())
    }
}

fn render_tag(scope: &RenderScope<'_>, ctx: &mut RenderingContext) -> RenderResult {
    let name = scope.argument("name").to_output_string();
    let attributes: String = scope
        .additional_names()
        .iter()
        .map(|attr| format!(" {attr}=\"{}\"", scope.argument(attr)))
        .collect();
    let content = scope.render_children(ctx)?;
    Ok(Value::string(format!("<{name}{attributes}>{content}</{name}>")))
}

/// `wrap(prefix: string = "[", suffix: string = "]")`, static strategy over
/// its children.
pub struct WrapHelper;

impl ViewHelper for WrapHelper {
    fn name(&self) -> &'static str {
        "wrap"
    }

    fn initialize_arguments(
        &self,
        arguments: &mut ArgumentCollection,
    ) -> Result<(), ComponentError> {
        arguments
            .register_argument("prefix", "string", "Opening text", false, Value::from("["))?
            .register_argument("suffix", "string", "Closing text", false, Value::from("]"))?;
        Ok(())
    }

    fn render_strategy(&self) -> Option<RenderStrategy> {
        Some(RenderStrategy::Static(render_wrap))
    }

    fn escape_output(&self) -> Option<bool> {
        Some(false)
    }
}

fn render_wrap(
    arguments: &Arguments,
    children: &ChildRenderer,
    ctx: &mut RenderingContext,
) -> RenderResult {
    let prefix = arguments.get("prefix").cloned().unwrap_or_default();
    let suffix = arguments.get("suffix").cloned().unwrap_or_default();
    let content = children.render(ctx)?;
    Ok(Value::string(format!("{prefix}{content}{suffix}")))
}

/// Counts `reset_state` calls.
pub struct ResettableHelper {
    pub resets: Arc<AtomicUsize>,
}

impl ViewHelper for ResettableHelper {
    fn name(&self) -> &'static str {
        "resettable"
    }

    fn reset_state(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

/// Declares the same argument twice.
pub struct DuplicateDeclarationHelper;

impl ViewHelper for DuplicateDeclarationHelper {
    fn name(&self) -> &'static str {
        "twice"
    }

    fn initialize_arguments(
        &self,
        arguments: &mut ArgumentCollection,
    ) -> Result<(), ComponentError> {
        arguments
            .register_argument("value", "string", "", false, Value::Null)?
            .register_argument("value", "string", "", false, Value::Null)?;
        Ok(())
    }
}

/// Leaf node returning a fixed value and counting its executions.
#[derive(Debug)]
pub struct CountingNode {
    value: Value,
    executions: Arc<AtomicUsize>,
}

impl CountingNode {
    pub fn new(value: Value) -> (NodeRef, Arc<AtomicUsize>) {
        let executions = Arc::new(AtomicUsize::new(0));
        let node = CountingNode {
            value,
            executions: Arc::clone(&executions),
        };
        (Arc::new(node), executions)
    }
}

impl Node for CountingNode {
    fn kind(&self) -> NodeKind {
        NodeKind::Variable
    }

    fn execute(&self, _ctx: &mut RenderingContext) -> RenderResult {
        self.executions.fetch_add(1, Ordering::SeqCst);
        Ok(self.value.clone())
    }

    fn compile(self: Arc<Self>) -> Result<CompiledRender, ComponentError> {
        Ok(CompiledRender::new(move |ctx| self.execute(ctx)))
    }
}

/// Registry with every sample helper.
pub fn registry() -> HelperRegistry {
    let mut registry = HelperRegistry::new();
    registry
        .register(GreetingHelper)
        .and_then(|r| r.register(IfHelper))
        .and_then(|r| r.register(NoStrategyHelper))
        .and_then(|r| r.register(ItemsHelper))
        .and_then(|r| r.register(TagHelper))
        .and_then(|r| r.register(WrapHelper))
        .unwrap();
    registry
}

pub fn text(content: &str) -> NodeRef {
    Arc::new(TextNode::new(content))
}

pub fn var(path: &str) -> NodeRef {
    Arc::new(VariableNode::new(path))
}

pub fn args<const N: usize>(entries: [(&str, Value); N]) -> Arguments {
    entries.into_iter().collect()
}

/// Closed container, optionally named.
pub fn container(name: Option<&str>, children: Vec<NodeRef>) -> NodeRef {
    let ctx = RenderingContext::default();
    let mut node = match name {
        Some(name) => ComponentNode::named(name),
        None => ComponentNode::new(),
    };
    node.on_open(&ctx, Arguments::new()).unwrap();
    for child in children {
        node.add_child(child).unwrap();
    }
    node.on_close(&ctx).unwrap();
    Arc::new(node)
}

/// Open, fill and close a node of `helper_type`.
pub fn build(
    helper_type: &Arc<HelperType>,
    raw: Arguments,
    children: Vec<NodeRef>,
) -> Result<ViewHelperNode, ComponentError> {
    let ctx = RenderingContext::default();
    let mut node = ViewHelperNode::new(Arc::clone(helper_type));
    node.on_open(&ctx, raw)?;
    for child in children {
        node.add_child(child)?;
    }
    node.on_close(&ctx)?;
    Ok(node)
}

/// `build` through the sample registry, as a shared node.
pub fn helper(name: &str, raw: Arguments, children: Vec<NodeRef>) -> NodeRef {
    let registry = registry();
    let helper_type = registry.get(name).unwrap();
    Arc::new(build(helper_type, raw, children).unwrap())
}
