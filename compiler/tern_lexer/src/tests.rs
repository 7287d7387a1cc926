#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).into_iter().map(|t| t.kind).collect()
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Ident(name.to_string())
}

#[test]
fn declaration_tokens() {
    assert_eq!(
        kinds("var x: number = 42"),
        vec![
            TokenKind::Var,
            ident("x"),
            TokenKind::Colon,
            ident("number"),
            TokenKind::Eq,
            TokenKind::Number(42),
        ]
    );
}

#[test]
fn longer_operators_win_over_prefixes() {
    assert_eq!(
        kinds("a == b && c || d++ e-- f <= g >= h != i"),
        vec![
            ident("a"),
            TokenKind::EqEq,
            ident("b"),
            TokenKind::AmpAmp,
            ident("c"),
            TokenKind::PipePipe,
            ident("d"),
            TokenKind::PlusPlus,
            ident("e"),
            TokenKind::MinusMinus,
            ident("f"),
            TokenKind::LtEq,
            ident("g"),
            TokenKind::GtEq,
            ident("h"),
            TokenKind::NotEq,
            ident("i"),
        ]
    );
}

#[test]
fn keywords_only_match_whole_words() {
    assert_eq!(
        kinds("if iffy return returned"),
        vec![TokenKind::If, ident("iffy"), TokenKind::Return, ident("returned")]
    );
}

#[test]
fn string_literals_strip_quotes_without_escapes() {
    assert_eq!(
        kinds(r#"print("a b", "c\")"#),
        vec![
            ident("print"),
            TokenKind::LParen,
            TokenKind::Str("a b".to_string()),
            TokenKind::Comma,
            TokenKind::Str("c\\".to_string()),
            TokenKind::RParen,
        ]
    );
}

#[test]
fn decimal_literals_truncate() {
    assert_eq!(kinds("3.75 10"), vec![TokenKind::Number(3), TokenKind::Number(10)]);
}

#[test]
fn oversized_number_is_unknown() {
    assert_eq!(
        kinds("99999999999999999999"),
        vec![TokenKind::Unknown("99999999999999999999".to_string())]
    );
}

#[test]
fn comments_are_tokens() {
    assert_eq!(
        kinds("x // note\n/* a */ y"),
        vec![
            ident("x"),
            TokenKind::LineComment(" note".to_string()),
            TokenKind::BlockCommentStart,
            ident("a"),
            TokenKind::BlockCommentEnd,
            ident("y"),
        ]
    );
}

#[test]
fn newlines_and_whitespace_are_dropped() {
    assert_eq!(
        kinds("\n\t val  x\r\n=\n1 \n"),
        vec![TokenKind::Val, ident("x"), TokenKind::Eq, TokenKind::Number(1)]
    );
}

#[test]
fn stray_characters_become_unknown_tokens() {
    assert_eq!(
        kinds("a @ b"),
        vec![ident("a"), TokenKind::Unknown("@".to_string()), ident("b")]
    );
}

#[test]
fn spans_point_into_source() {
    let source = "val name = 1";
    let tokens = tokenize(source);
    assert_eq!(tokens[1].span, Span::new(4, 8));
    assert_eq!(&source[tokens[1].span.start as usize..tokens[1].span.end as usize], "name");
}

#[test]
fn line_col_is_one_based() {
    let source = "var a = 1\n  assert a";
    let tokens = tokenize(source);
    let assert_token = tokens.iter().find(|t| t.kind == TokenKind::Assert).unwrap();
    assert_eq!(assert_token.span.line_col(source), (2, 3));
}

#[test]
fn normalize_drops_comments_and_block_contents() {
    let tokens = tokenize("var x = 1 // trailing\n/* skip me */ x = x + 2");
    assert_eq!(normalize(&tokens), "var x = 1 x = x + 2");
}

fn non_comment_kinds(source: &str) -> Vec<TokenKind> {
    let mut in_block = false;
    let mut out = Vec::new();
    for kind in kinds(source) {
        match kind {
            TokenKind::BlockCommentStart if !in_block => in_block = true,
            TokenKind::BlockCommentEnd if in_block => in_block = false,
            k if in_block || k.is_comment() => {}
            k => out.push(k),
        }
    }
    out
}

fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("var".to_string()),
        Just("val".to_string()),
        Just("if".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("==".to_string()),
        Just("++".to_string()),
        Just("-".to_string()),
        Just("/".to_string()),
        Just("*".to_string()),
        Just("// comment\n".to_string()),
        Just("/* block */".to_string()),
        Just("\n".to_string()),
        prop::string::string_regex("[a-z_][a-z0-9_]{0,6}").unwrap(),
        prop::string::string_regex("[0-9]{1,6}(\\.[0-9]{1,3})?").unwrap(),
        prop::string::string_regex("\"[a-z ]{0,6}\"").unwrap(),
    ]
}

proptest! {
    #[test]
    fn normalize_round_trips(parts in prop::collection::vec(fragment(), 0..24)) {
        let source = parts.join(" ");
        let normalized = normalize(&tokenize(&source));
        prop_assert_eq!(non_comment_kinds(&normalized), non_comment_kinds(&source));
    }
}
