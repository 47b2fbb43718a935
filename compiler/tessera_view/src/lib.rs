#![allow(
    clippy::result_large_err,
    reason = "ComponentError carries the helper name; boxing would add noise to every signature"
)]
//! Tessera View - component and view helper execution for the Tessera
//! template engine.
//!
//! This crate provides:
//! - Argument declarations, binding and structural type validation
//! - The component tree (`ComponentNode`, text and variable leaves, lazily
//!   evaluated boolean arguments)
//! - View helpers with an explicit render strategy (`ViewHelper`,
//!   `HelperType`, `ViewHelperNode`)
//! - Interpreted and compiled execution (`Template`, `CompiledRender`)
//!
//! # Architecture
//!
//! New helpers are added by implementing `ViewHelper` and registering it in
//! a `HelperRegistry`. Each helper type declares its arguments once; every
//! node of that type shares the declarations.
//!
//! A node is built by the parser through the `Component` lifecycle and
//! executed afterwards, either by walking the tree or by replaying a
//! `CompiledRender`. Both paths produce the same output.

mod arguments;
mod context;
pub mod errors;
mod helper;
mod node;
mod registry;
mod render;
mod stack;
mod template;
mod value;

#[cfg(test)]
mod test_helpers;

pub use arguments::{ArgumentCollection, ArgumentDefinition, Arguments, ScalarKind, TypeSpec};
pub use context::{
    ExecutionMode, RenderConfig, RenderingContext, VariableScope, DEFAULT_MAX_DEPTH,
};
pub use errors::{ComponentError, ComponentErrorKind, RenderResult};
pub use helper::{
    validate_arguments, HelperType, InstanceRenderFn, RenderScope, RenderStrategy,
    StaticRenderFn, ViewHelper, ViewHelperNode,
};
pub use node::{
    Component, ComponentNode, DeferredBooleanNode, Flattened, Node, NodeKind, NodeRef,
    NodeState, TextNode, VariableNode,
};
pub use registry::HelperRegistry;
pub use render::{combine, render_nodes, ChildRenderer, CompiledRender};
pub use template::Template;
pub use value::{parse_numeric, ObjectValue, Value};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing subscriber for debugging.
///
/// Set `RUST_LOG=tessera_view=debug` to see helper registration and
/// compilation, or `RUST_LOG=tessera_view=trace` for per-argument binding.
///
/// Safe to call multiple times; only the first call has effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
