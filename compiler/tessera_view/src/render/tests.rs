#![allow(clippy::unwrap_used)]

use std::sync::atomic::Ordering;

use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{text, var, CountingNode};

#[test]
fn combine_rules() {
    assert_eq!(combine(vec![]), Value::Null);
    assert_eq!(combine(vec![Value::int(7)]), Value::int(7));
    assert_eq!(
        combine(vec![Value::from("a"), Value::int(1), Value::Null, Value::Bool(true)]),
        Value::from("a1true")
    );
}

#[test]
fn child_renderer_snapshots_nodes() {
    let mut children = vec![text("a"), text("b")];
    let renderer = ChildRenderer::from_nodes(&children);
    children.push(text("c"));

    let mut ctx = RenderingContext::default();
    assert_eq!(renderer.len(), 2);
    assert_eq!(renderer.render(&mut ctx).unwrap(), Value::from("ab"));
}

#[test]
fn compiled_renderer_matches_interpreted() {
    let children = vec![text("x = "), var("x")];
    let interpreted = ChildRenderer::from_nodes(&children);
    let compiled = ChildRenderer::compile(&children).unwrap();

    let mut ctx = RenderingContext::default().with_variable("x", Value::int(5));
    assert_eq!(
        compiled.render(&mut ctx).unwrap(),
        interpreted.render(&mut ctx).unwrap()
    );
    assert!(matches!(compiled, ChildRenderer::Compiled(_)));
}

#[test]
fn renderers_run_children_each_time() {
    let (node, executions) = CountingNode::new(Value::int(1));
    let renderer = ChildRenderer::compile(&[node]).unwrap();
    let mut ctx = RenderingContext::default();

    for _ in 0..3 {
        assert_eq!(renderer.render(&mut ctx).unwrap(), Value::int(1));
    }
    assert_eq!(executions.load(Ordering::SeqCst), 3);
}

#[test]
fn empty_renderer_is_null() {
    let renderer = ChildRenderer::from_nodes(&[]);
    assert!(renderer.is_empty());
    assert_eq!(renderer.render(&mut RenderingContext::default()).unwrap(), Value::Null);
}

#[test]
fn compiled_render_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CompiledRender>();
    assert_send_sync::<ChildRenderer>();
}
