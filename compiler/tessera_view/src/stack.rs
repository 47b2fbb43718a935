//! Stack safety for deeply nested component trees.
//!
//! Executing, compiling, replaying and dropping a tree all recurse once per
//! nesting level. Templates can nest containers far deeper than helper
//! recursion is allowed to go, so each recursive step grows the stack on
//! demand instead of overflowing it.
//!
//! On WASM targets, stack growth is not supported and `f` runs directly.

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM fallback: runs `f` on the current stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
