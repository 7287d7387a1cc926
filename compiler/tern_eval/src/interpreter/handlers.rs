//! Statement handlers, one per construct.
//!
//! A handler inspects the next token and either declines without consuming
//! anything or consumes its whole construct, block bodies included.

use std::rc::Rc;

use tern_lexer::{normalize, TokenKind};

use super::{Interpreter, Outcome};
use crate::errors::{assertion_failed, syntax_error, type_mismatch, EvalError};
use crate::value::{FunctionBody, FunctionValue, Parameter};
use crate::{Mutability, TokenCursor, Value, ValueType, Variable};

impl Interpreter {
    pub(super) fn handle_comment(
        &mut self,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<Outcome, EvalError> {
        match cursor.peek_raw().map(|t| &t.kind) {
            Some(TokenKind::LineComment(_) | TokenKind::BlockCommentStart) => {
                cursor.skip_comments()?;
                Ok(Outcome::Done)
            }
            _ => Ok(Outcome::Declined),
        }
    }

    pub(super) fn handle_assert(
        &mut self,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<Outcome, EvalError> {
        if !cursor.eat(&TokenKind::Assert) {
            return Ok(Outcome::Declined);
        }
        let start = cursor.position();
        let span = cursor.here();
        let value = self.eval_expression(cursor)?;
        if value.is_truthy() {
            Ok(Outcome::Done)
        } else {
            let condition = normalize(cursor.consumed_since(start));
            Err(assertion_failed(condition).or_span(span))
        }
    }

    pub(super) fn handle_repeat(
        &mut self,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<Outcome, EvalError> {
        if !cursor.eat(&TokenKind::Repeat) {
            return Ok(Outcome::Declined);
        }
        let count_span = cursor.here();
        let count = self.eval_expression(cursor)?;
        let Some(count) = count.as_number() else {
            return Err(type_mismatch(ValueType::Number, count.type_name()).or_span(count_span));
        };
        cursor.expect(&TokenKind::LBrace, "`{` after repeat count")?;
        let body = cursor.collect_block()?;

        for _ in 0..count.max(0) {
            if let Some(value) = self.exec_block(body)? {
                return Ok(Outcome::Return(value));
            }
        }
        Ok(Outcome::Done)
    }

    pub(super) fn handle_while(
        &mut self,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<Outcome, EvalError> {
        if !cursor.eat(&TokenKind::While) {
            return Ok(Outcome::Declined);
        }
        let condition = cursor.collect_until_block("`{` after while condition")?;
        let body = cursor.collect_block()?;

        loop {
            let mut condition_cursor = TokenCursor::new(condition);
            let keep_going = self.eval_expression(&mut condition_cursor)?;
            if let Some(extra) = condition_cursor.peek() {
                return Err(syntax_error(format!("unexpected `{extra}` in while condition"))
                    .or_span(extra.span));
            }
            if !keep_going.is_truthy() {
                return Ok(Outcome::Done);
            }
            if let Some(value) = self.exec_block(body)? {
                return Ok(Outcome::Return(value));
            }
        }
    }

    pub(super) fn handle_from_to(
        &mut self,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<Outcome, EvalError> {
        if !cursor.eat(&TokenKind::From) {
            return Ok(Outcome::Declined);
        }
        let from = self.eval_bound(cursor)?;
        cursor.expect(&TokenKind::To, "`to` in range loop")?;
        let to = self.eval_bound(cursor)?;
        let variable = if cursor.eat(&TokenKind::With) {
            Some(cursor.expect_ident("loop variable name after `with`")?)
        } else {
            None
        };
        cursor.expect(&TokenKind::LBrace, "`{` after range")?;
        let body = cursor.collect_block()?;

        for i in from..to {
            let returned = self.with_env_scope(|scoped| {
                if let Some(name) = variable {
                    scoped.define(
                        name,
                        Variable::new(Mutability::Final, Some(ValueType::Number), Value::Number(i)),
                    )?;
                }
                scoped.exec_statements(&mut TokenCursor::new(body), false)
            })?;
            if let Some(value) = returned {
                return Ok(Outcome::Return(value));
            }
        }
        Ok(Outcome::Done)
    }

    /// A range bound; must be a number.
    fn eval_bound(&mut self, cursor: &mut TokenCursor<'_>) -> Result<i64, EvalError> {
        let span = cursor.here();
        let bound = self.eval_expression(cursor)?;
        bound
            .as_number()
            .ok_or_else(|| type_mismatch(ValueType::Number, bound.type_name()).or_span(span))
    }

    pub(super) fn handle_conditional(
        &mut self,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<Outcome, EvalError> {
        if !cursor.eat(&TokenKind::If) {
            return Ok(Outcome::Declined);
        }
        let mut taken = false;
        let mut has_condition = true;
        loop {
            let run = if !has_condition {
                cursor.expect(&TokenKind::LBrace, "`{` after else")?;
                !taken
            } else if taken {
                cursor.collect_until_block("`{` after condition")?;
                false
            } else {
                let condition = self.eval_expression(cursor)?;
                cursor.expect(&TokenKind::LBrace, "`{` after condition")?;
                condition.is_truthy()
            };

            if run {
                taken = true;
                let body = cursor.collect_block()?;
                if let Some(value) = self.exec_block(body)? {
                    return Ok(Outcome::Return(value));
                }
            } else {
                cursor.skip_block()?;
            }

            if !has_condition || !cursor.eat(&TokenKind::Else) {
                return Ok(Outcome::Done);
            }
            has_condition = cursor.eat(&TokenKind::If);
        }
    }

    pub(super) fn handle_variable_declaration(
        &mut self,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<Outcome, EvalError> {
        let mutability = match cursor.peek_kind() {
            Some(TokenKind::Var) => Mutability::Mutable,
            Some(TokenKind::Val) => Mutability::Final,
            _ => return Ok(Outcome::Declined),
        };
        cursor.bump();
        let name_span = cursor.here();
        let name = cursor.expect_ident("variable name")?;
        let ty = if cursor.eat(&TokenKind::Colon) {
            parse_type(cursor)?
        } else {
            None
        };
        cursor.expect(&TokenKind::Eq, "`=` in declaration")?;
        let value = self.eval_expression(cursor)?;
        self.define(name, Variable::new(mutability, ty, value))
            .map_err(|e| e.or_span(name_span))?;
        Ok(Outcome::Done)
    }

    pub(super) fn handle_function_declaration(
        &mut self,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<Outcome, EvalError> {
        if !cursor.eat(&TokenKind::Def) {
            return Ok(Outcome::Declined);
        }
        let name_span = cursor.here();
        let name = cursor.expect_ident("function name")?;
        cursor.expect(&TokenKind::LParen, "`(` to start the parameter list")?;
        let parameters = parse_parameters(cursor)?;
        let return_type = if cursor.eat(&TokenKind::Colon) {
            parse_type(cursor)?
        } else {
            None
        };
        cursor.expect(&TokenKind::LBrace, "`{` to start the function body")?;
        let body = cursor.collect_block()?;

        let function = FunctionValue {
            name: name.to_string(),
            parameters,
            return_type,
            body: FunctionBody::Tokens(Rc::from(body)),
        };
        self.define(
            name,
            Variable::new(
                Mutability::Final,
                Some(ValueType::Function),
                Value::Function(Rc::new(function)),
            ),
        )
        .map_err(|e| e.or_span(name_span))?;
        Ok(Outcome::Done)
    }

    pub(super) fn handle_statement(
        &mut self,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<Outcome, EvalError> {
        if !cursor.peek_kind().is_some_and(starts_expression) {
            return Ok(Outcome::Declined);
        }
        self.eval_expression(cursor)?;
        Ok(Outcome::Done)
    }
}

/// Whether an expression can begin with this token.
fn starts_expression(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::LParen
            | TokenKind::Str(_)
            | TokenKind::Number(_)
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Ident(_)
            | TokenKind::Bang
            | TokenKind::Minus
    )
}

/// A type annotation after `:`. `any` means untyped.
fn parse_type(cursor: &mut TokenCursor<'_>) -> Result<Option<ValueType>, EvalError> {
    let span = cursor.here();
    let name = cursor.expect_ident("type name")?;
    if name == "any" {
        return Ok(None);
    }
    ValueType::from_name(name)
        .map(Some)
        .ok_or_else(|| syntax_error(format!("unknown type `{name}`")).or_span(span))
}

/// `name[: type], ...)` with the opening `(` already consumed.
fn parse_parameters(cursor: &mut TokenCursor<'_>) -> Result<Vec<Parameter>, EvalError> {
    let mut parameters = Vec::new();
    if cursor.eat(&TokenKind::RParen) {
        return Ok(parameters);
    }
    loop {
        let name = cursor.expect_ident("parameter name")?;
        let ty = if cursor.eat(&TokenKind::Colon) {
            parse_type(cursor)?
        } else {
            None
        };
        parameters.push(Parameter {
            name: name.to_string(),
            ty,
        });
        if cursor.eat(&TokenKind::RParen) {
            return Ok(parameters);
        }
        cursor.expect(&TokenKind::Comma, "`,` or `)` in parameter list")?;
    }
}
