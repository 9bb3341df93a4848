//! Stack growth for recursive compiler passes.
//!
//! The parser and the control-flow lowering recurse once per nesting level of
//! the source. Wrapping each level in [`ensure_sufficient_stack`] moves the
//! recursion onto a freshly allocated segment whenever fewer than
//! [`RED_ZONE`] bytes remain, so pathological nesting degrades to heap use
//! instead of a crash. Traversals that can be written with an explicit work
//! stack (classification, label search, change ranges) do not need this.
//!
//! On `wasm32` the call is a passthrough.

/// Remaining stack below which a new segment is allocated.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated segment.
pub const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
