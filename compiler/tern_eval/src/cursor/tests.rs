#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;
use tern_lexer::tokenize;

fn rendered(tokens: &[Token]) -> String {
    tern_lexer::normalize(tokens)
}

#[test]
fn peek_does_not_consume() {
    let tokens = tokenize("a b");
    let cursor = TokenCursor::new(&tokens);
    assert_eq!(cursor.peek_kind().and_then(TokenKind::as_ident), Some("a"));
    assert_eq!(cursor.position(), 0);
}

#[test]
fn eat_only_consumes_matching_kind() {
    let tokens = tokenize("( x");
    let mut cursor = TokenCursor::new(&tokens);
    assert!(!cursor.eat(&TokenKind::RParen));
    assert!(cursor.eat(&TokenKind::LParen));
    assert_eq!(cursor.position(), 1);
}

#[test]
fn collect_block_matches_nested_braces() {
    let tokens = tokenize("{ a { b } c } d");
    let mut cursor = TokenCursor::new(&tokens);
    cursor.expect(&TokenKind::LBrace, "`{`").unwrap();
    let body = cursor.collect_block().unwrap();
    assert_eq!(rendered(body), "a { b } c");
    assert_eq!(cursor.peek_kind().and_then(TokenKind::as_ident), Some("d"));
}

#[test]
fn collect_block_reports_unclosed_brace() {
    let tokens = tokenize("{ a { b }");
    let mut cursor = TokenCursor::new(&tokens);
    cursor.bump();
    let err = cursor.collect_block().unwrap_err();
    assert_eq!(err.category(), "SyntaxError");
    assert_eq!(err.span, Some(Span::new(0, 1)));
}

#[test]
fn collect_until_block_consumes_brace() {
    let tokens = tokenize("x < 3 { body }");
    let mut cursor = TokenCursor::new(&tokens);
    let condition = cursor.collect_until_block("`{`").unwrap();
    assert_eq!(rendered(condition), "x < 3");
    assert_eq!(rendered(cursor.collect_block().unwrap()), "body");
    assert!(cursor.is_at_end());
}

#[test]
fn expect_reports_found_token() {
    let tokens = tokenize("var 1");
    let mut cursor = TokenCursor::new(&tokens);
    cursor.bump();
    let err = cursor.expect_ident("variable name").unwrap_err();
    assert_eq!(err.to_string(), "SyntaxError: expected variable name, found `1`");
}

#[test]
fn expect_at_end_reports_unexpected_end() {
    let tokens = tokenize("def f");
    let mut cursor = TokenCursor::new(&tokens);
    cursor.bump();
    cursor.bump();
    let err = cursor.expect(&TokenKind::LParen, "`(`").unwrap_err();
    assert_eq!(
        err.to_string(),
        "SyntaxError: unexpected end of input, expected `(`"
    );
    assert_eq!(err.span, Some(Span::point(5)));
}

#[test]
fn comments_are_skipped_by_peek_and_bump() {
    let tokens = tokenize("a // note\n /* x { */ b");
    let mut cursor = TokenCursor::new(&tokens);
    cursor.bump();
    assert_eq!(cursor.peek_kind().and_then(TokenKind::as_ident), Some("b"));
    assert_eq!(
        cursor.peek_raw().map(|t| &t.kind),
        Some(&TokenKind::LineComment(" note".to_string()))
    );
    assert_eq!(cursor.bump().map(|t| &t.kind).and_then(TokenKind::as_ident), Some("b"));
    assert!(cursor.is_at_end());
}

#[test]
fn trailing_comment_counts_as_end() {
    let tokens = tokenize("a // done");
    let mut cursor = TokenCursor::new(&tokens);
    cursor.bump();
    assert!(cursor.is_at_end());
    assert!(cursor.peek_raw().is_some());
}

#[test]
fn collect_block_ignores_braces_in_comments() {
    let tokens = tokenize("{ /* } */ a { // }\n b } } c");
    let mut cursor = TokenCursor::new(&tokens);
    cursor.bump();
    let body = cursor.collect_block().unwrap();
    assert_eq!(rendered(body), "a { b }");
    assert_eq!(cursor.peek_kind().and_then(TokenKind::as_ident), Some("c"));
}

#[test]
fn collect_until_block_ignores_brace_in_comment() {
    let tokens = tokenize("x /* { */ < 3 { body }");
    let mut cursor = TokenCursor::new(&tokens);
    let condition = cursor.collect_until_block("`{`").unwrap();
    assert_eq!(rendered(condition), "x < 3");
}

#[test]
fn skip_comments_reports_unclosed_block_comment() {
    let tokens = tokenize("// first\n /* never closed");
    let mut cursor = TokenCursor::new(&tokens);
    let err = cursor.skip_comments().unwrap_err();
    assert_eq!(err.to_string(), "SyntaxError: unclosed block comment: missing `*/`");
    assert_eq!(err.span, Some(tokens[1].span));
    assert_eq!(cursor.position(), 0);
}
