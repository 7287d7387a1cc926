//! Position-based cursor over an immutable token slice.
//!
//! Each evaluation context (a block body, a `while` condition, a function
//! body) gets its own cursor, so sibling contexts never alias each other's
//! progress. Handlers consume tokens only through this type.
//!
//! Comments are trivia: `peek`, `bump` and everything built on them step
//! over `//` comments and whole `/* ... */` runs, so braces inside a block
//! comment never count towards block nesting. Only [`peek_raw`] and
//! [`skip_comments`] see comment tokens.
//!
//! [`peek_raw`]: TokenCursor::peek_raw
//! [`skip_comments`]: TokenCursor::skip_comments

use tern_lexer::{Span, Token, TokenKind};

use crate::errors::{syntax_error, unexpected_end, EvalError};

/// Cursor over a token slice.
#[derive(Clone, Debug)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> TokenCursor<'t> {
    /// Create a cursor at the start of `tokens`.
    pub fn new(tokens: &'t [Token]) -> Self {
        TokenCursor { tokens, pos: 0 }
    }

    /// The next non-comment token, without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.significant_from(self.pos))
    }

    /// The next token, comments included.
    #[inline]
    pub fn peek_raw(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Index of the first non-comment token at or after `pos`.
    ///
    /// An unclosed `/*` swallows the rest of the slice.
    fn significant_from(&self, mut pos: usize) -> usize {
        loop {
            match self.tokens.get(pos).map(|t| &t.kind) {
                Some(TokenKind::LineComment(_)) => pos += 1,
                Some(TokenKind::BlockCommentStart) => {
                    pos = self.tokens[pos + 1..]
                        .iter()
                        .position(|t| t.kind == TokenKind::BlockCommentEnd)
                        .map_or(self.tokens.len(), |end| pos + end + 2);
                }
                _ => return pos,
            }
        }
    }

    /// Consume the comments in front of the cursor.
    ///
    /// Fails on a `/*` that has no matching `*/`.
    pub fn skip_comments(&mut self) -> Result<(), EvalError> {
        if let Some(open) = self.unclosed_block_comment() {
            return Err(syntax_error("unclosed block comment: missing `*/`").or_span(open));
        }
        self.pos = self.significant_from(self.pos);
        Ok(())
    }

    fn unclosed_block_comment(&self) -> Option<Span> {
        let mut pos = self.pos;
        loop {
            let token = self.tokens.get(pos)?;
            match token.kind {
                TokenKind::LineComment(_) => pos += 1,
                TokenKind::BlockCommentStart => {
                    let end = self.tokens[pos + 1..]
                        .iter()
                        .position(|t| t.kind == TokenKind::BlockCommentEnd);
                    match end {
                        Some(end) => pos += end + 2,
                        None => return Some(token.span),
                    }
                }
                _ => return None,
            }
        }
    }

    /// Kind of the next token.
    #[inline]
    pub fn peek_kind(&self) -> Option<&'t TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    /// Whether the next token has the given kind.
    #[inline]
    pub fn at(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Whether only comments, or nothing, are left.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.peek().is_none()
    }

    /// Number of tokens consumed so far, comments included.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Tokens consumed since position `start`.
    pub fn consumed_since(&self, start: usize) -> &'t [Token] {
        &self.tokens[start.min(self.pos)..self.pos]
    }

    /// Consume and return the next non-comment token, along with any
    /// comments in front of it.
    #[inline]
    pub fn bump(&mut self) -> Option<&'t Token> {
        let pos = self.significant_from(self.pos);
        let token = self.tokens.get(pos)?;
        self.pos = pos + 1;
        Some(token)
    }

    /// Consume the next token if it has the given kind.
    #[inline]
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Span of the next token, or a point just past the last one.
    pub fn here(&self) -> Span {
        match self.peek() {
            Some(token) => token.span,
            None => self
                .tokens
                .last()
                .map_or(Span::default(), |t| Span::point(t.span.end)),
        }
    }

    /// Consume a token of the given kind or fail with a syntax error.
    pub fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<&'t Token, EvalError> {
        let span = self.here();
        match self.bump() {
            Some(token) if token.kind == *kind => Ok(token),
            Some(token) => {
                Err(syntax_error(format!("expected {what}, found `{token}`")).or_span(span))
            }
            None => Err(unexpected_end(what).or_span(span)),
        }
    }

    /// Consume an identifier and return its name.
    pub fn expect_ident(&mut self, what: &str) -> Result<&'t str, EvalError> {
        let span = self.here();
        match self.bump() {
            Some(Token {
                kind: TokenKind::Ident(name),
                ..
            }) => Ok(name.as_str()),
            Some(token) => {
                Err(syntax_error(format!("expected {what}, found `{token}`")).or_span(span))
            }
            None => Err(unexpected_end(what).or_span(span)),
        }
    }

    /// Consume the rest of a block whose `{` was already consumed.
    ///
    /// Returns the tokens between the braces; the closing `}` is consumed
    /// but not included. Nested braces are matched by counting; braces
    /// inside comments do not count, though the comments stay in the slice.
    pub fn collect_block(&mut self) -> Result<&'t [Token], EvalError> {
        let start = self.pos;
        let mut depth = 1usize;
        while let Some(token) = self.bump() {
            match token.kind {
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(&self.tokens[start..self.pos - 1]);
                    }
                }
                _ => {}
            }
        }
        let open = start
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or_else(|| self.here(), |t| t.span);
        Err(syntax_error("unclosed block: missing `}`").or_span(open))
    }

    /// Skip the rest of a block whose `{` was already consumed.
    #[inline]
    pub fn skip_block(&mut self) -> Result<(), EvalError> {
        self.collect_block().map(|_| ())
    }

    /// Consume tokens up to the next `{`, which is consumed too.
    ///
    /// Returns the tokens before the brace, e.g. a `while` condition.
    pub fn collect_until_block(&mut self, what: &str) -> Result<&'t [Token], EvalError> {
        let start = self.pos;
        while let Some(token) = self.bump() {
            if token.kind == TokenKind::LBrace {
                return Ok(&self.tokens[start..self.pos - 1]);
            }
        }
        Err(unexpected_end(what).or_span(self.here()))
    }
}

#[cfg(test)]
mod tests;
