//! Stack growth for recursive phases.
//!
//! Both the parser (nested expressions) and the evaluator (script recursion
//! through lowered closures) recurse on the native stack. Script functions
//! calling themselves a few thousand times would otherwise overflow the main
//! thread, so each recursive entry point goes through
//! [`ensure_sufficient_stack`].
//!
//! On wasm32 this is a plain call.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each new stack segment.
const SEGMENT: usize = 2 * 1024 * 1024;

/// Run `f`, first moving to a fresh stack segment if the current one is
/// nearly exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
