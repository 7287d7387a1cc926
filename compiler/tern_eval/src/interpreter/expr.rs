//! Expression evaluator.
//!
//! Recursive descent over the cursor, loosest tier first:
//!
//! | Tier           | Operators              | Grouping                 |
//! |----------------|------------------------|--------------------------|
//! | logical        | `&&` `\|\|`            | right, both sides always evaluated |
//! | comparison     | `==` `!=` `<` `>` `<=` `>=` | at most one, no chaining |
//! | additive       | `+` `-`                | right                    |
//! | multiplicative | `*` `/` `%`            | right                    |
//! | unary          | `!` `-`                | prefix                   |
//! | primary        | literals, `( )`, identifiers, calls, assignment | |
//!
//! Right grouping means `10 - 3 - 2` is `10 - (3 - 2)`.

use tern_lexer::{Span, TokenKind};
use tern_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::errors::{
    constant_violation, integer_overflow, invalid_unary_operand, syntax_error, type_mismatch,
    undefined_variable, unexpected_end, unknown_token,
};
use crate::operators::{evaluate_binary, BinaryOp};
use crate::unary_operators::{evaluate_unary, UnaryOp};
use crate::{EvalResult, TokenCursor, Value, ValueType};

impl Interpreter {
    /// Evaluate one full expression from `cursor`.
    pub(crate) fn eval_expression(&mut self, cursor: &mut TokenCursor<'_>) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_logical(cursor))
    }

    fn eval_logical(&mut self, cursor: &mut TokenCursor<'_>) -> EvalResult {
        let left = self.eval_comparison(cursor)?;
        let Some(op) = cursor.peek_kind().and_then(BinaryOp::logical) else {
            return Ok(left);
        };
        let span = cursor.here();
        cursor.bump();
        let right = self.eval_expression(cursor)?;
        evaluate_binary(&left, &right, op).map_err(|e| e.or_span(span))
    }

    fn eval_comparison(&mut self, cursor: &mut TokenCursor<'_>) -> EvalResult {
        let left = self.eval_additive(cursor)?;
        let Some(op) = cursor.peek_kind().and_then(BinaryOp::comparison) else {
            return Ok(left);
        };
        let span = cursor.here();
        cursor.bump();
        let right = self.eval_additive(cursor)?;
        if let Some(next) = cursor.peek().filter(|t| BinaryOp::comparison(&t.kind).is_some()) {
            return Err(syntax_error("comparison operators cannot be chained").or_span(next.span));
        }
        evaluate_binary(&left, &right, op).map_err(|e| e.or_span(span))
    }

    fn eval_additive(&mut self, cursor: &mut TokenCursor<'_>) -> EvalResult {
        let left = self.eval_multiplicative(cursor)?;
        let Some(op) = cursor.peek_kind().and_then(BinaryOp::additive) else {
            return Ok(left);
        };
        let span = cursor.here();
        cursor.bump();
        let right = ensure_sufficient_stack(|| self.eval_additive(cursor))?;
        evaluate_binary(&left, &right, op).map_err(|e| e.or_span(span))
    }

    fn eval_multiplicative(&mut self, cursor: &mut TokenCursor<'_>) -> EvalResult {
        let left = self.eval_unary(cursor)?;
        let Some(op) = cursor.peek_kind().and_then(BinaryOp::multiplicative) else {
            return Ok(left);
        };
        let span = cursor.here();
        cursor.bump();
        let right = ensure_sufficient_stack(|| self.eval_multiplicative(cursor))?;
        evaluate_binary(&left, &right, op).map_err(|e| e.or_span(span))
    }

    fn eval_unary(&mut self, cursor: &mut TokenCursor<'_>) -> EvalResult {
        let Some(op) = cursor.peek_kind().and_then(UnaryOp::from_token) else {
            return self.eval_primary(cursor);
        };
        let span = cursor.here();
        cursor.bump();
        let operand = ensure_sufficient_stack(|| self.eval_unary(cursor))?;
        evaluate_unary(&operand, op).map_err(|e| e.or_span(span))
    }

    fn eval_primary(&mut self, cursor: &mut TokenCursor<'_>) -> EvalResult {
        let span = cursor.here();
        let Some(token) = cursor.bump() else {
            return Err(unexpected_end("expression").or_span(span));
        };
        match &token.kind {
            TokenKind::LParen => {
                let value = self.eval_expression(cursor)?;
                cursor.expect(&TokenKind::RParen, "`)` to close the parenthesis")?;
                Ok(value)
            }
            TokenKind::Str(text) => Ok(Value::text(text.as_str())),
            TokenKind::Number(n) => Ok(Value::Number(*n)),
            TokenKind::True => Ok(Value::Boolean(true)),
            TokenKind::False => Ok(Value::Boolean(false)),
            TokenKind::Ident(name) => self.eval_identifier(name, span, cursor),
            TokenKind::Unknown(text) => Err(unknown_token(text).or_span(span)),
            other => {
                Err(syntax_error(format!("expected expression, found `{other}`")).or_span(span))
            }
        }
    }

    /// An identifier in expression position: a call, an assignment, an
    /// increment or decrement, or a plain read.
    fn eval_identifier(
        &mut self,
        name: &str,
        span: Span,
        cursor: &mut TokenCursor<'_>,
    ) -> EvalResult {
        let Some(variable) = self.env.lookup(name) else {
            return Err(undefined_variable(name).or_span(span));
        };
        let is_final = variable.is_final();
        let value = variable.value.clone();

        match (cursor.peek_kind(), value) {
            (Some(TokenKind::LParen), Value::Function(function)) => {
                cursor.bump();
                self.eval_call(&function, cursor)
                    .map_err(|e| e.or_span(span))
            }
            (Some(TokenKind::LParen), other) => {
                Err(type_mismatch(ValueType::Function, other.type_name()).or_span(span))
            }
            (Some(TokenKind::Eq), _) => {
                if is_final {
                    return Err(constant_violation(name).or_span(span));
                }
                cursor.bump();
                let new_value = self.eval_expression(cursor)?;
                self.assign(name, new_value.clone())
                    .map_err(|e| e.or_span(span))?;
                Ok(new_value)
            }
            (Some(TokenKind::PlusPlus), old) => {
                cursor.bump();
                self.step(name, old, 1, is_final).map_err(|e| e.or_span(span))
            }
            (Some(TokenKind::MinusMinus), old) => {
                cursor.bump();
                self.step(name, old, -1, is_final).map_err(|e| e.or_span(span))
            }
            (_, value) => Ok(value),
        }
    }

    /// `x++` / `x--`: store `old + delta`, yield `old`.
    fn step(&mut self, name: &str, old: Value, delta: i64, is_final: bool) -> EvalResult {
        let (op, operation) = if delta > 0 {
            ("++", "increment")
        } else {
            ("--", "decrement")
        };
        if is_final {
            return Err(constant_violation(name));
        }
        let Some(n) = old.as_number() else {
            return Err(invalid_unary_operand(op, old.type_name()));
        };
        let new_value = n
            .checked_add(delta)
            .ok_or_else(|| integer_overflow(operation))?;
        self.assign(name, Value::Number(new_value))?;
        Ok(old)
    }
}
