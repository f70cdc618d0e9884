//! Stack growth for the recursive passes.
//!
//! Parsing, resolving, printing and evaluating all recurse once per nesting
//! level of the source.  Each recursive entry point goes through
//! [`ensure_sufficient_stack`], which moves onto a fresh heap-allocated
//! segment when the current one runs low, so deep input ends in a Lox error
//! (nesting or call-depth limit) rather than a host stack overflow.

/// Minimum stack left before growing (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than [`RED_ZONE`] remains.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
