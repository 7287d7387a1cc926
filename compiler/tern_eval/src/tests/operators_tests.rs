//! Tests for binary operator implementations.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use crate::operators::{evaluate_binary, BinaryOp};
use crate::{EvalErrorKind, Value};
use pretty_assertions::assert_eq;

fn num(n: i64) -> Value {
    Value::Number(n)
}

#[test]
fn test_number_operations() {
    assert_eq!(evaluate_binary(&num(2), &num(3), BinaryOp::Add).unwrap(), num(5));
    assert_eq!(evaluate_binary(&num(5), &num(3), BinaryOp::Sub).unwrap(), num(2));
    assert_eq!(evaluate_binary(&num(2), &num(3), BinaryOp::Mul).unwrap(), num(6));
    assert_eq!(evaluate_binary(&num(7), &num(2), BinaryOp::Div).unwrap(), num(3));
    assert_eq!(evaluate_binary(&num(7), &num(2), BinaryOp::Mod).unwrap(), num(1));
    assert_eq!(evaluate_binary(&num(-7), &num(2), BinaryOp::Div).unwrap(), num(-3));
}

#[test]
fn test_division_by_zero() {
    for op in [BinaryOp::Div, BinaryOp::Mod] {
        let err = evaluate_binary(&num(1), &num(0), op).unwrap_err();
        assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
        assert_eq!(err.category(), "ArithmeticError");
    }
}

#[test]
fn test_overflow_is_an_error() {
    let err = evaluate_binary(&num(i64::MAX), &num(1), BinaryOp::Add).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::IntegerOverflow {
            operation: "addition"
        }
    );
    assert!(evaluate_binary(&num(i64::MIN), &num(-1), BinaryOp::Div).is_err());
    assert!(evaluate_binary(&num(i64::MIN), &num(1), BinaryOp::Sub).is_err());
}

#[test]
fn test_concatenation_with_either_side_text() {
    assert_eq!(
        evaluate_binary(&Value::from("n = "), &num(4), BinaryOp::Add).unwrap(),
        Value::from("n = 4")
    );
    assert_eq!(
        evaluate_binary(&Value::Boolean(true), &Value::from("!"), BinaryOp::Add).unwrap(),
        Value::from("true!")
    );
}

#[test]
fn test_arithmetic_rejects_text() {
    let err = evaluate_binary(&Value::from("a"), &num(1), BinaryOp::Sub).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::BinaryTypeMismatch {
            op: "-",
            left: "string".to_string(),
            right: "number".to_string(),
        }
    );
}

#[test]
fn test_comparisons() {
    let cases = [
        (BinaryOp::Lt, 2, 3, true),
        (BinaryOp::Lt, 3, 3, false),
        (BinaryOp::Gt, 3, 2, true),
        (BinaryOp::LtEq, 3, 3, true),
        (BinaryOp::GtEq, 2, 3, false),
    ];
    for (op, a, b, expected) in cases {
        assert_eq!(
            evaluate_binary(&num(a), &num(b), op).unwrap(),
            Value::Boolean(expected),
            "{a} {} {b}",
            op.as_symbol()
        );
    }
    assert_eq!(
        evaluate_binary(&Value::from("abc"), &Value::from("abd"), BinaryOp::Lt).unwrap(),
        Value::Boolean(true)
    );
    assert!(evaluate_binary(&num(1), &Value::from("1"), BinaryOp::Lt).is_err());
}

#[test]
fn test_equality_never_crosses_types() {
    assert_eq!(
        evaluate_binary(&num(1), &Value::from("1"), BinaryOp::Eq).unwrap(),
        Value::Boolean(false)
    );
    assert_eq!(
        evaluate_binary(&num(1), &Value::Boolean(true), BinaryOp::NotEq).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        evaluate_binary(&Value::Void, &Value::Void, BinaryOp::Eq).unwrap(),
        Value::Boolean(true)
    );
}

#[test]
fn test_logical_requires_booleans() {
    assert_eq!(
        evaluate_binary(&Value::Boolean(true), &Value::Boolean(false), BinaryOp::Or).unwrap(),
        Value::Boolean(true)
    );
    assert_eq!(
        evaluate_binary(&Value::Boolean(true), &Value::Boolean(false), BinaryOp::And).unwrap(),
        Value::Boolean(false)
    );
    let err = evaluate_binary(&num(1), &Value::Boolean(true), BinaryOp::And).unwrap_err();
    assert_eq!(err.category(), "TypeError");
}
