//! Tests for unary operator implementations.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use crate::unary_operators::{evaluate_unary, UnaryOp};
use crate::{EvalErrorKind, Value};
use pretty_assertions::assert_eq;

#[test]
fn test_not_and_neg() {
    assert_eq!(
        evaluate_unary(&Value::Boolean(true), UnaryOp::Not).unwrap(),
        Value::Boolean(false)
    );
    assert_eq!(
        evaluate_unary(&Value::Number(5), UnaryOp::Neg).unwrap(),
        Value::Number(-5)
    );
}

#[test]
fn test_not_only_applies_to_booleans() {
    let err = evaluate_unary(&Value::Number(0), UnaryOp::Not).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::InvalidOperand {
            op: "!",
            type_name: "number".to_string(),
        }
    );
}

#[test]
fn test_neg_only_applies_to_numbers() {
    let err = evaluate_unary(&Value::from("x"), UnaryOp::Neg).unwrap_err();
    assert_eq!(err.category(), "TypeError");
}

#[test]
fn test_neg_overflow() {
    let err = evaluate_unary(&Value::Number(i64::MIN), UnaryOp::Neg).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::IntegerOverflow {
            operation: "negation"
        }
    );
}
