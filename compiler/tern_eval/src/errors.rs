//! Error types for evaluation.
//!
//! `EvalErrorKind` is the structured category; factory functions below are
//! the public way to build errors so that messages stay consistent across
//! the dispatcher, the evaluator and the natives.

use std::fmt;

use tern_lexer::Span;

use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Syntax
    #[error("{message}")]
    Syntax { message: String },
    #[error("unexpected token `{token}`")]
    UnknownToken { token: String },

    // Access
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },
    #[error("cannot change the value of constant `{name}`")]
    ConstantViolation { name: String },

    // Type/Operator
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("operator `{op}` cannot be applied to {type_name}")]
    InvalidOperand { op: &'static str, type_name: String },
    #[error("operator `{op}` cannot be applied to {left} and {right}")]
    BinaryTypeMismatch {
        op: &'static str,
        left: String,
        right: String,
    },

    // Function
    #[error("{name} expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("maximum call depth exceeded (limit: {limit})")]
    RecursionLimit { limit: usize },

    // Arithmetic
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },

    // Assertion
    #[error("assertion failed: {message}")]
    AssertionFailed { message: String },

    /// Raised by host-supplied natives.
    #[error("{message}")]
    Native { message: String },
}

impl EvalErrorKind {
    /// The language-level error class this kind belongs to.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Syntax { .. } => "SyntaxError",
            Self::UnknownToken { .. } => "UnknownTokenError",
            Self::UndefinedVariable { .. } => "UnknownVariableError",
            Self::ConstantViolation { .. } => "ConstantError",
            Self::TypeMismatch { .. }
            | Self::InvalidOperand { .. }
            | Self::BinaryTypeMismatch { .. } => "TypeError",
            Self::ArityMismatch { .. } => "ArityError",
            Self::RecursionLimit { .. } => "RecursionError",
            Self::DivisionByZero | Self::IntegerOverflow { .. } => "ArithmeticError",
            Self::AssertionFailed { .. } => "AssertionError",
            Self::Native { .. } => "NativeError",
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Location of the statement or token that failed, when known.
    ///
    /// The span indexes the source that produced the failing token. For a
    /// function declared by an earlier [`Interpreter::run`] that is the
    /// earlier source.
    ///
    /// [`Interpreter::run`]: crate::Interpreter::run
    pub span: Option<Span>,
    /// Interpreted functions the error unwound through, innermost first.
    pub backtrace: Vec<String>,
}

impl EvalError {
    /// Create a native error with just a message.
    ///
    /// This is what host-supplied natives return to fail a call.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Native {
            message: message.into(),
        })
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            span: None,
            backtrace: Vec::new(),
        }
    }

    /// Attach a source span unless a more precise one is already present.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }

    /// Record that the error unwound through the function `name`.
    #[must_use]
    pub fn in_function(mut self, name: &str) -> Self {
        self.backtrace.push(name.to_string());
        self
    }

    /// Shorthand for `self.kind.category()`.
    pub fn category(&self) -> &'static str {
        self.kind.category()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.category(), self.kind)
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

// Syntax Errors

pub fn syntax_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Syntax {
        message: message.into(),
    })
}

pub fn unexpected_end(expected: &str) -> EvalError {
    syntax_error(format!("unexpected end of input, expected {expected}"))
}

pub fn unknown_token(token: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownToken {
        token: token.to_string(),
    })
}

// Variable Errors

pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

pub fn constant_violation(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ConstantViolation {
        name: name.to_string(),
    })
}

// Type Errors

pub fn type_mismatch(expected: impl fmt::Display, got: impl fmt::Display) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

pub fn invalid_unary_operand(op: &'static str, type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidOperand {
        op,
        type_name: type_name.to_string(),
    })
}

pub fn binary_type_mismatch(op: &'static str, left: &str, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch {
        op,
        left: left.to_string(),
        right: right.to_string(),
    })
}

// Function Errors

pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

pub fn recursion_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { limit })
}

// Arithmetic Errors

pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::IntegerOverflow { operation })
}

// Assertion Errors

pub fn assertion_failed(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::AssertionFailed {
        message: message.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_category() {
        let err = constant_violation("x");
        assert_eq!(
            err.to_string(),
            "ConstantError: cannot change the value of constant `x`"
        );
    }

    #[test]
    fn or_span_keeps_innermost_location() {
        let err = undefined_variable("y")
            .or_span(Span::new(4, 5))
            .or_span(Span::new(0, 10));
        assert_eq!(err.span, Some(Span::new(4, 5)));
    }

    #[test]
    fn categories_follow_taxonomy() {
        assert_eq!(syntax_error("missing (").category(), "SyntaxError");
        assert_eq!(unknown_token("@").category(), "UnknownTokenError");
        assert_eq!(type_mismatch("number", "string").category(), "TypeError");
        assert_eq!(binary_type_mismatch("-", "string", "number").category(), "TypeError");
        assert_eq!(arity_mismatch("add", 2, 1).category(), "ArityError");
        assert_eq!(assertion_failed("x").category(), "AssertionError");
        assert_eq!(division_by_zero().category(), "ArithmeticError");
        assert_eq!(EvalError::new("boom").category(), "NativeError");
    }

    #[test]
    fn backtrace_records_innermost_first() {
        let err = division_by_zero().in_function("inner").in_function("outer");
        assert_eq!(err.backtrace, vec!["inner".to_string(), "outer".to_string()]);
    }
}
