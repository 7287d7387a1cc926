//! Stack growth for the recursive parts of the Tern interpreter.
//!
//! Tern evaluates directly over token streams: every nested block, loop
//! iteration, parenthesised sub-expression and function call recurses on the
//! host stack. Scripts with deep recursion or long `else if` chains would
//! overflow a fixed 8MB main-thread stack, so the evaluator wraps its
//! re-entrant entry points in [`ensure_sufficient_stack`].
//!
//! On native targets the stack is grown on demand with `stacker`. On WASM the
//! closure is called directly.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each freshly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// The evaluator's block runner is the typical call site:
///
/// ```text
/// pub(crate) fn exec_block(&mut self, body: &[Token]) -> Result<Option<Value>, EvalError> {
///     ensure_sufficient_stack(|| {
///         self.with_env_scope(|scoped| scoped.exec_statements(&mut TokenCursor::new(body), false))
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
