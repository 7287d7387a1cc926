//! Binary operator implementations for the evaluator.
//!
//! Operands are already evaluated; the expression tiers decide grouping.
//! All integer arithmetic is checked.

use std::cmp::Ordering;

use tern_lexer::TokenKind;

use crate::errors::{binary_type_mismatch, division_by_zero, integer_overflow};
use crate::{EvalResult, Value};

/// Binary operators, grouped by precedence tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    // Logical tier
    And,
    Or,
    // Equality/relational tier
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    // Additive tier
    Add,
    Sub,
    // Multiplicative tier
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    /// Source spelling.
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }

    pub fn logical(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::AmpAmp => Some(BinaryOp::And),
            TokenKind::PipePipe => Some(BinaryOp::Or),
            _ => None,
        }
    }

    pub fn comparison(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::NotEq),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::LtEq => Some(BinaryOp::LtEq),
            TokenKind::GtEq => Some(BinaryOp::GtEq),
            _ => None,
        }
    }

    pub fn additive(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        }
    }

    pub fn multiplicative(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Mod),
            _ => None,
        }
    }
}

/// Evaluate a binary operation on two evaluated operands.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::And | BinaryOp::Or => eval_logical(left, right, op),
        BinaryOp::Eq => Ok(Value::Boolean(left.equals(right))),
        BinaryOp::NotEq => Ok(Value::Boolean(!left.equals(right))),
        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::LtEq | BinaryOp::GtEq => {
            eval_relational(left, right, op)
        }
        BinaryOp::Add => eval_add(left, right),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            eval_arithmetic(left, right, op)
        }
    }
}

fn mismatch(left: &Value, right: &Value, op: BinaryOp) -> crate::EvalError {
    binary_type_mismatch(op.as_symbol(), left.type_name(), right.type_name())
}

/// Both operands are already evaluated; there is no short-circuit.
fn eval_logical(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let (Some(a), Some(b)) = (left.as_bool(), right.as_bool()) else {
        return Err(mismatch(left, right, op));
    };
    Ok(Value::Boolean(if op == BinaryOp::And { a && b } else { a || b }))
}

fn eval_relational(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        _ => return Err(mismatch(left, right, op)),
    };
    let result = match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        _ => ordering != Ordering::Less,
    };
    Ok(Value::Boolean(result))
}

/// `+` adds numbers and concatenates as soon as either side is text.
fn eval_add(left: &Value, right: &Value) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a
            .checked_add(*b)
            .map(Value::Number)
            .ok_or_else(|| integer_overflow("addition")),
        (Value::Text(_), _) | (_, Value::Text(_)) => Ok(Value::text(format!("{left}{right}"))),
        _ => Err(mismatch(left, right, BinaryOp::Add)),
    }
}

fn eval_arithmetic(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let (Value::Number(a), Value::Number(b)) = (left, right) else {
        return Err(mismatch(left, right, op));
    };
    let (a, b) = (*a, *b);
    let result = match op {
        BinaryOp::Sub => a.checked_sub(b).ok_or_else(|| integer_overflow("subtraction")),
        BinaryOp::Mul => a
            .checked_mul(b)
            .ok_or_else(|| integer_overflow("multiplication")),
        BinaryOp::Div if b == 0 => Err(division_by_zero()),
        BinaryOp::Div => a.checked_div(b).ok_or_else(|| integer_overflow("division")),
        BinaryOp::Mod if b == 0 => Err(division_by_zero()),
        _ => a.checked_rem(b).ok_or_else(|| integer_overflow("remainder")),
    };
    result.map(Value::Number)
}
