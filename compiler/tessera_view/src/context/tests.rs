use super::*;
use crate::value::ObjectValue;
use indexmap::IndexMap;
use pretty_assertions::assert_eq;

#[test]
fn default_config_is_interpreted_and_bounded() {
    let config = RenderConfig::default();
    assert_eq!(config.mode(), ExecutionMode::Interpreted);
    assert_eq!(config.max_depth(), Some(DEFAULT_MAX_DEPTH));
    assert!(!config.mode().uses_compiled_render());
}

#[test]
fn resolve_walks_maps_objects_and_lists() {
    let mut address = IndexMap::new();
    address.insert("city".to_string(), Value::from("Oslo"));
    let user = ObjectValue::new("User")
        .with_field("address", Value::map(address))
        .with_field("tags", Value::list(vec![Value::from("a"), Value::from("b")]));
    let ctx = RenderingContext::default().with_variable("user", Value::object(user));

    assert_eq!(ctx.variables().resolve("user.address.city"), Value::from("Oslo"));
    assert_eq!(ctx.variables().resolve("user.tags.1"), Value::from("b"));
    assert_eq!(ctx.variables().resolve("user.missing"), Value::Null);
    assert_eq!(ctx.variables().resolve("nobody"), Value::Null);
}

#[test]
fn nested_tracks_and_restores_depth() {
    let mut ctx = RenderingContext::default();
    let inner = ctx.nested(|ctx| Ok(Value::int(i64::try_from(ctx.depth()).unwrap_or(-1))));
    assert_eq!(inner, Ok(Value::int(1)));
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn nested_fails_past_limit() {
    let mut ctx = RenderingContext::new(RenderConfig::default().with_max_depth(Some(1)));
    let result = ctx.nested(|ctx| ctx.nested(|_| Ok(Value::Null)));
    assert_eq!(result, Err(recursion_limit_exceeded(1)));
    assert_eq!(ctx.depth(), 0);
}

#[test]
fn unbounded_depth() {
    let mut ctx = RenderingContext::new(RenderConfig::default().with_max_depth(None));
    let result = ctx.nested(|ctx| ctx.nested(|ctx| ctx.nested(|_| Ok(Value::Bool(true)))));
    assert_eq!(result, Ok(Value::Bool(true)));
}
