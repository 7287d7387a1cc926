//! Statement dispatcher.
//!
//! A statement loop runs over one cursor until the cursor is exhausted or a
//! `return` fires. Each statement is offered to the handler chain in order;
//! the first handler that does not decline owns it.

use tern_lexer::{Token, TokenKind};
use tern_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::errors::{syntax_error, unknown_token, EvalError};
use crate::{TokenCursor, Value};

/// What a statement handler did with the tokens in front of it.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Not this handler's construct. No token was consumed.
    Declined,
    /// Statement consumed; continue with the next one.
    Done,
    /// Statement consumed and a `return` fired somewhere inside it.
    Return(Value),
}

/// Statement constructs, in the order the dispatcher tries them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatementHandler {
    /// `// ...` and `/* ... */`.
    Comment,
    /// `assert <expr>`.
    Assert,
    /// `repeat <n> { ... }`.
    Repeat,
    /// `while <cond> { ... }`.
    While,
    /// `from <a> to <b> [with <name>] { ... }`.
    FromTo,
    /// `if <cond> { ... } [else if <cond> { ... }]* [else { ... }]`.
    Conditional,
    /// `var`/`val <name> [: <type>] = <expr>`.
    VariableDeclaration,
    /// `def <name>(<params>) [: <type>] { ... }`.
    FunctionDeclaration,
    /// Any expression, evaluated for its side effects.
    Statement,
}

impl StatementHandler {
    /// The chain every interpreter uses.
    pub const CHAIN: &'static [StatementHandler] = &[
        StatementHandler::Comment,
        StatementHandler::Assert,
        StatementHandler::Repeat,
        StatementHandler::While,
        StatementHandler::FromTo,
        StatementHandler::Conditional,
        StatementHandler::VariableDeclaration,
        StatementHandler::FunctionDeclaration,
        StatementHandler::Statement,
    ];

    pub fn name(self) -> &'static str {
        match self {
            StatementHandler::Comment => "comment",
            StatementHandler::Assert => "assert",
            StatementHandler::Repeat => "repeat",
            StatementHandler::While => "while",
            StatementHandler::FromTo => "from-to",
            StatementHandler::Conditional => "conditional",
            StatementHandler::VariableDeclaration => "variable-declaration",
            StatementHandler::FunctionDeclaration => "function-declaration",
            StatementHandler::Statement => "statement",
        }
    }
}

impl Interpreter {
    /// Execute statements until `cursor` is exhausted.
    ///
    /// Returns `Some` as soon as a `return` fires, at any nesting depth.
    /// With `skip_first_pause`, the first statement runs without reading
    /// `delay`.
    pub(crate) fn exec_statements(
        &mut self,
        cursor: &mut TokenCursor<'_>,
        skip_first_pause: bool,
    ) -> Result<Option<Value>, EvalError> {
        let mut pause = !skip_first_pause;
        while let Some(token) = cursor.peek_raw() {
            match token.kind {
                // Block bodies arrive without their braces, so a `}` here
                // has no opening partner.
                TokenKind::RBrace => {
                    return Err(syntax_error("unmatched `}`").or_span(token.span));
                }
                TokenKind::Return => return self.exec_return(cursor, token).map(Some),
                _ => {}
            }

            if pause {
                self.pace();
            }
            pause = true;

            match self.dispatch(cursor).map_err(|e| e.or_span(token.span))? {
                Outcome::Declined => return Err(unknown_token(token).or_span(token.span)),
                Outcome::Done => {}
                Outcome::Return(value) => return Ok(Some(value)),
            }
        }
        Ok(None)
    }

    /// Run a block body in a fresh child scope.
    pub(crate) fn exec_block(&mut self, body: &[Token]) -> Result<Option<Value>, EvalError> {
        ensure_sufficient_stack(|| {
            self.with_env_scope(|scoped| scoped.exec_statements(&mut TokenCursor::new(body), false))
        })
    }

    fn exec_return(
        &mut self,
        cursor: &mut TokenCursor<'_>,
        keyword: &Token,
    ) -> Result<Value, EvalError> {
        if self.env.at_root() {
            return Err(syntax_error("`return` outside of a block or function").or_span(keyword.span));
        }
        cursor.bump();
        if cursor.is_at_end() {
            return Ok(Value::Void);
        }
        self.eval_expression(cursor)
            .map_err(|e| e.or_span(keyword.span))
    }

    /// Offer the statement at `cursor` to each handler in turn.
    fn dispatch(&mut self, cursor: &mut TokenCursor<'_>) -> Result<Outcome, EvalError> {
        let handlers = self.handlers;
        for &handler in handlers {
            let start = cursor.position();
            let outcome = self.try_handler(handler, cursor)?;
            if outcome == Outcome::Declined {
                debug_assert_eq!(cursor.position(), start, "{} declined after consuming", handler.name());
                continue;
            }
            tracing::trace!(handler = handler.name(), "statement handled");
            return Ok(outcome);
        }
        Ok(Outcome::Declined)
    }

    pub(super) fn try_handler(
        &mut self,
        handler: StatementHandler,
        cursor: &mut TokenCursor<'_>,
    ) -> Result<Outcome, EvalError> {
        match handler {
            StatementHandler::Comment => self.handle_comment(cursor),
            StatementHandler::Assert => self.handle_assert(cursor),
            StatementHandler::Repeat => self.handle_repeat(cursor),
            StatementHandler::While => self.handle_while(cursor),
            StatementHandler::FromTo => self.handle_from_to(cursor),
            StatementHandler::Conditional => self.handle_conditional(cursor),
            StatementHandler::VariableDeclaration => self.handle_variable_declaration(cursor),
            StatementHandler::FunctionDeclaration => self.handle_function_declaration(cursor),
            StatementHandler::Statement => self.handle_statement(cursor),
        }
    }
}
