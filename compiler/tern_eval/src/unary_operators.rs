//! Unary operator implementations for the evaluator.

use tern_lexer::TokenKind;

use crate::errors::{integer_overflow, invalid_unary_operand};
use crate::{EvalResult, Value};

/// Prefix operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!`, booleans only.
    Not,
    /// `-`, numbers only.
    Neg,
}

impl UnaryOp {
    pub fn from_token(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            _ => None,
        }
    }

    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
        }
    }
}

/// Evaluate a unary operation.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult {
    match (op, value) {
        (UnaryOp::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
        (UnaryOp::Neg, Value::Number(n)) => n
            .checked_neg()
            .map(Value::Number)
            .ok_or_else(|| integer_overflow("negation")),
        _ => Err(invalid_unary_operand(op.as_symbol(), value.type_name())),
    }
}
