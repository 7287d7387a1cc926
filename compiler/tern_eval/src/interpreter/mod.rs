//! Token-stream interpreter for Tern.
//!
//! # Architecture
//!
//! There is no syntax tree. Every evaluation context owns a
//! [`TokenCursor`] over an immutable token slice and consumes it front to
//! back:
//!
//! - `dispatch.rs`: the statement loop and the ordered handler chain
//! - `handlers.rs`: one handler per statement construct
//! - `expr.rs`: the precedence tiers of the expression evaluator
//! - `function_call.rs`: argument binding and native/interpreted calls
//!
//! Blocks, loop iterations, branches and calls each run in a fresh child
//! scope pushed through [`ScopedInterpreter`], so the scope stack mirrors
//! the evaluation stack exactly.

mod builder;
mod dispatch;
mod expr;
mod function_call;
mod handlers;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use dispatch::{Outcome, StatementHandler};
pub use scope_guard::ScopedInterpreter;

use std::rc::Rc;
use std::time::Duration;

use tern_lexer::Token;

use crate::errors::{constant_violation, type_mismatch, undefined_variable, EvalError};
use crate::value::{FunctionBody, FunctionValue, Parameter};
use crate::{
    AssignError, Environment, EvalResult, Mutability, SharedPacer, SharedPrintHandler,
    TokenCursor, Value, ValueType, Variable,
};

/// Name of the root-scope pacing variable, in milliseconds.
pub const DELAY: &str = "delay";

/// Default limit for nested interpreted calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// The Tern interpreter.
///
/// The root scope outlives a single [`run`](Self::run): globals and
/// functions declared by one run are visible to the next.
pub struct Interpreter {
    /// Scope arena; the root scope holds globals and natives.
    pub(crate) env: Environment,
    /// Handler chain every dispatcher consults, in order.
    handlers: &'static [StatementHandler],
    print_handler: SharedPrintHandler,
    pacer: SharedPacer,
    max_call_depth: usize,
    /// Interpreted calls currently on the stack.
    call_depth: usize,
}

impl Interpreter {
    /// Interpreter with default configuration: stdout, real pacing, the
    /// standard natives.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    /// Start configuring an interpreter.
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Tokenize and execute `source` in the root scope.
    ///
    /// Returns the value of a `return` executed inside a top-level block, or
    /// `Void`. The first error aborts the rest of the program; side effects
    /// that already happened stay in place.
    ///
    /// Globals and functions declared by earlier runs stay visible. A
    /// function keeps the tokens of the source that declared it, so an error
    /// raised inside its body carries a span into that earlier source, not
    /// into `source`.
    #[tracing::instrument(level = "debug", skip_all, fields(source_len = source.len()))]
    pub fn run(&mut self, source: &str) -> EvalResult {
        let tokens = tern_lexer::tokenize(source);
        tracing::trace!(tokens = tokens.len(), "tokenized");
        self.run_tokens(&tokens)
    }

    /// Execute an already tokenized program.
    pub fn run_tokens(&mut self, tokens: &[Token]) -> EvalResult {
        self.env.reset_to_root();
        self.call_depth = 0;
        let mut cursor = TokenCursor::new(tokens);
        let returned = self.exec_statements(&mut cursor, true)?;
        Ok(returned.unwrap_or(Value::Void))
    }

    /// Register a global variable, replacing any existing binding.
    pub fn add_variable(
        &mut self,
        mutability: Mutability,
        name: &str,
        ty: Option<ValueType>,
        value: Value,
    ) {
        self.env
            .bind_global(name, Variable::new(mutability, ty, value));
    }

    /// Look up a variable from the root scope.
    pub fn get_variable(&self, name: &str) -> Option<&Variable> {
        self.env.lookup_global(name)
    }

    /// Register a fixed-arity native. Arguments are checked against
    /// `parameters` before `body` runs.
    pub fn add_function<F>(&mut self, name: &str, parameters: Vec<Parameter>, body: F)
    where
        F: Fn(&[Value]) -> EvalResult + 'static,
    {
        self.bind_native(name, parameters, body, false);
    }

    /// Register a native that accepts any number of arguments.
    pub fn add_variadic_function<F>(&mut self, name: &str, body: F)
    where
        F: Fn(&[Value]) -> EvalResult + 'static,
    {
        self.bind_native(name, Vec::new(), body, true);
    }

    fn bind_native<F>(&mut self, name: &str, parameters: Vec<Parameter>, body: F, variadic: bool)
    where
        F: Fn(&[Value]) -> EvalResult + 'static,
    {
        let function = FunctionValue {
            name: name.to_string(),
            parameters,
            return_type: None,
            body: FunctionBody::Native {
                func: Rc::new(body),
                variadic,
            },
        };
        self.add_variable(
            Mutability::Final,
            name,
            Some(ValueType::Function),
            Value::Function(Rc::new(function)),
        );
    }

    /// The print handler natives write to.
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Limit for nested interpreted calls.
    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    /// Sleep for the current `delay`, if it is a positive number.
    fn pace(&self) {
        let Some(ms) = self
            .env
            .lookup_global(DELAY)
            .and_then(|variable| variable.value.as_number())
        else {
            return;
        };
        if ms > 0 {
            tracing::debug!(delay_ms = ms, "pacing");
            self.pacer.pause(Duration::from_millis(ms.unsigned_abs()));
        }
    }

    /// Assign through the scope chain, mapping failures to language errors.
    pub(crate) fn assign(&mut self, name: &str, value: Value) -> Result<(), EvalError> {
        let got = value.type_name();
        self.env
            .assign(name, value)
            .map_err(|err| assign_error(name, err, got))
    }

    /// Bind `name` in the current scope, mapping failures to language errors.
    pub(crate) fn define(&mut self, name: &str, variable: Variable) -> Result<(), EvalError> {
        let got = variable.value.type_name();
        self.env
            .define(name, variable)
            .map_err(|err| assign_error(name, err, got))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn assign_error(name: &str, err: AssignError, got: &str) -> EvalError {
    match err {
        AssignError::Final => constant_violation(name),
        AssignError::Undefined => undefined_variable(name),
        AssignError::TypeMismatch { expected } => type_mismatch(expected, got),
    }
}
