//! Tern Lexer - turns source text into an ordered token sequence.
//!
//! The lexer is a thin `logos` front end. Whitespace and newlines are
//! dropped; comments are kept as tokens because the statement dispatcher is
//! responsible for discarding them. Nothing here fails: text that matches no
//! alternative becomes a [`TokenKind::Unknown`] token and is reported by the
//! evaluator only if execution reaches it.
//!
//! ```text
//! tokenize("var x = 1 // one")
//!   => [Var, Ident("x"), Eq, Number(1), LineComment(" one")]
//! ```

mod span;
mod token;

use logos::Logos;

pub use span::Span;
pub use token::{Token, TokenKind};

/// Tokenize `source` into a flat token list.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let span = Span::from_range(lexer.span());
        let kind = match result {
            Ok(kind) => kind,
            Err(()) => TokenKind::Unknown(lexer.slice().to_owned()),
        };
        tokens.push(Token::new(kind, span));
    }

    tokens
}

/// Render tokens back to source, one space between tokens, comments dropped.
///
/// Everything from `/*` up to and including the matching `*/` counts as
/// comment. Re-tokenizing the result yields the same non-comment token
/// kinds, so a program and its normalized form run identically.
pub fn normalize(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut in_block_comment = false;
    for token in tokens {
        match token.kind {
            TokenKind::BlockCommentStart if !in_block_comment => in_block_comment = true,
            TokenKind::BlockCommentEnd if in_block_comment => in_block_comment = false,
            _ if in_block_comment || token.kind.is_comment() => {}
            _ => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&token.kind.to_string());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests;
