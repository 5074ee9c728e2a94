//! Stack safety for deep recursion.
//!
//! Parsing, semantic analysis and evaluation all recurse along the AST, and
//! Lu programs may recurse at runtime as deep as the configured call depth.
//! Each recursive step goes through [`ensure_sufficient_stack`], which grows
//! the native stack on demand.
//!
//! - **Red zone**: 128KB. Below this much remaining stack, a new segment is allocated.
//! - **Growth size**: 2MB per new segment.

const RED_ZONE: usize = 128 * 1024;

const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack; call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
