//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use super::{Interpreter, StatementHandler, DEFAULT_MAX_CALL_DEPTH, DELAY};
use crate::builtins::register_std_natives;
use crate::{
    stdout_handler, thread_pacer, Environment, Mutability, SharedPacer, SharedPrintHandler,
    Value, ValueType,
};

/// Builder for creating Interpreter instances with various configurations.
///
/// Defaults match the `tern` binary: output to stdout, real sleeps for
/// `delay`, the standard natives registered, and a call depth limit of
/// [`DEFAULT_MAX_CALL_DEPTH`].
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    pacer: Option<SharedPacer>,
    max_call_depth: usize,
    std_natives: bool,
}

impl InterpreterBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            print_handler: None,
            pacer: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            std_natives: true,
        }
    }

    /// Set the print handler used by `print` and `println`.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Set the pacer that serves `delay` between statements.
    #[must_use]
    pub fn pacer(mut self, pacer: SharedPacer) -> Self {
        self.pacer = Some(pacer);
        self
    }

    /// Set the limit for nested interpreted calls.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Whether to register `print`, `println`, `checkNotNull` and
    /// `checkArgument`.
    #[must_use]
    pub fn std_natives(mut self, enabled: bool) -> Self {
        self.std_natives = enabled;
        self
    }

    /// Build the interpreter.
    pub fn build(self) -> Interpreter {
        let mut interpreter = Interpreter {
            env: Environment::new(),
            handlers: StatementHandler::CHAIN,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            pacer: self.pacer.unwrap_or_else(thread_pacer),
            max_call_depth: self.max_call_depth,
            call_depth: 0,
        };
        interpreter.add_variable(
            Mutability::Mutable,
            DELAY,
            Some(ValueType::Number),
            Value::Number(0),
        );
        if self.std_natives {
            register_std_natives(&mut interpreter);
        }
        interpreter
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
