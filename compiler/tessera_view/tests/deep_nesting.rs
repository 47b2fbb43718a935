//! Deeply nested trees render, compile and drop without exhausting the
//! stack.
//!
//! Container nesting is not bounded by the helper recursion limit, so a
//! parser can hand over trees far deeper than any thread's default stack
//! would allow a naive walk to reach.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use tessera_view::{
    Arguments, Component, ComponentNode, DeferredBooleanNode, ExecutionMode, Node, NodeRef,
    RenderConfig, RenderingContext, Template, TextNode, Value, VariableNode,
};

const DEPTH: usize = 100_000;

/// Wrap `leaf` in `depth` closed containers, innermost first.
fn nested(depth: usize, leaf: NodeRef) -> NodeRef {
    let ctx = RenderingContext::default();
    (0..depth).fold(leaf, |inner, _| {
        let mut node = ComponentNode::new();
        node.on_open(&ctx, Arguments::new()).unwrap();
        node.add_child(inner).unwrap();
        node.on_close(&ctx).unwrap();
        Arc::new(node)
    })
}

fn leaf() -> NodeRef {
    let ctx = RenderingContext::default();
    let mut node = ComponentNode::named("leaf");
    node.on_open(&ctx, Arguments::new()).unwrap();
    node.add_child(Arc::new(TextNode::new("<"))).unwrap();
    node.add_child(Arc::new(VariableNode::new("who"))).unwrap();
    node.add_child(Arc::new(TextNode::new(">"))).unwrap();
    node.on_close(&ctx).unwrap();
    Arc::new(node)
}

fn context(mode: ExecutionMode) -> RenderingContext {
    RenderingContext::new(RenderConfig::default().with_mode(mode))
        .with_variable("who", Value::from("deep"))
}

#[test]
fn deep_template_renders_in_both_modes() {
    let template = Template::new(nested(DEPTH, leaf()));

    let interpreted = template.render(&mut context(ExecutionMode::Interpreted)).unwrap();
    assert_eq!(interpreted, Value::from("<deep>"));
    assert!(!template.is_compiled());

    let compiled = template.render(&mut context(ExecutionMode::Compiled)).unwrap();
    assert_eq!(compiled, interpreted);
    assert!(template.is_compiled());

    // Replaying the cached render walks the same depth again.
    let replayed = template.render(&mut context(ExecutionMode::Compiled)).unwrap();
    assert_eq!(replayed, interpreted);
}

#[test]
fn deep_tree_executes_and_compiles_directly() {
    let tree = nested(DEPTH, Arc::new(TextNode::new("bottom")));

    let executed = tree.execute(&mut RenderingContext::default()).unwrap();
    assert_eq!(executed, Value::from("bottom"));

    let compiled = Arc::clone(&tree).compile().unwrap();
    drop(tree);
    let replayed = compiled.render(&mut RenderingContext::default()).unwrap();
    assert_eq!(replayed, executed);
}

#[test]
fn deferred_boolean_over_deep_tree() {
    let deferred = Arc::new(DeferredBooleanNode::new(nested(DEPTH, Arc::new(TextNode::new("1")))));

    let executed = deferred.execute(&mut RenderingContext::default()).unwrap();
    assert_eq!(executed, Value::Bool(true));

    let compiled = Arc::clone(&deferred).compile().unwrap();
    assert_eq!(compiled.render(&mut RenderingContext::default()).unwrap(), executed);
}
