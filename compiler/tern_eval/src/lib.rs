//! Tern Eval - embedded interpreter for the Tern scripting language.
//!
//! Tern is evaluated directly from its token stream; there is no syntax
//! tree. The pieces, leaves first:
//!
//! - [`TokenCursor`]: position over an immutable token slice, one per
//!   evaluation context (block body, loop condition, function body)
//! - [`Environment`]: arena of nested scopes with parent indices
//! - `evaluate_binary` / `evaluate_unary`: operator semantics on values
//! - [`Interpreter`]: the statement dispatcher, the expression tiers and
//!   function invocation
//!
//! Hosts talk to the [`Interpreter`] only: register globals and natives,
//! then call [`Interpreter::run`].
//!
//! ```text
//! let mut interpreter = Interpreter::builder().print_handler(buffer_handler()).build();
//! interpreter.run("repeat 2 { println(\"hi\") }")?;
//! ```

mod builtins;
mod cursor;
mod environment;
pub mod errors;
pub mod interpreter;
mod operators;
mod pacer;
mod print_handler;
mod unary_operators;
mod value;

pub use cursor::TokenCursor;
pub use environment::{AssignError, Environment, Mutability, ScopeId, Variable};
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use interpreter::{Interpreter, InterpreterBuilder, Outcome, ScopedInterpreter, StatementHandler};
pub use operators::{evaluate_binary, BinaryOp};
pub use pacer::{disabled_pacer, recording_pacer, thread_pacer, PacerImpl, SharedPacer};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandlerImpl, SharedPrintHandler,
};
pub use unary_operators::{evaluate_unary, UnaryOp};
pub use value::{FunctionBody, FunctionValue, NativeFn, Parameter, Value, ValueType};

#[cfg(test)]
mod tests;
