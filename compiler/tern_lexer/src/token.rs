//! Token kinds produced by the lexer.

use std::fmt;

use logos::Logos;

use crate::Span;

/// Parse the integer part of a numeric literal.
///
/// Tern has no floating point: `3.75` reads as `3`. Literals that do not fit
/// in an `i64` are rejected and surface as [`TokenKind::Unknown`].
fn parse_number(lex: &mut logos::Lexer<'_, TokenKind>) -> Option<i64> {
    let slice = lex.slice();
    let integer = slice.split('.').next().unwrap_or(slice);
    integer.parse::<i64>().ok()
}

/// Strip the surrounding quotes of a string literal.
fn string_contents(lex: &mut logos::Lexer<'_, TokenKind>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_owned()
}

/// The kind of a token, with its payload for literals and identifiers.
///
/// Alternatives that share a prefix (`==`/`=`, `++`/`+`, `/*`/`/`) are
/// resolved by longest match.
#[derive(Logos, Clone, Debug, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    // Comments are tokens; the evaluator's cursor steps over them.
    #[regex(r"//[^\n]*", |lex| lex.slice()[2..].to_owned())]
    LineComment(String),
    #[token("/*")]
    BlockCommentStart,
    #[token("*/")]
    BlockCommentEnd,

    // Keywords
    #[token("var")]
    Var,
    #[token("val")]
    Val,
    #[token("def")]
    Def,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("from")]
    From,
    #[token("to")]
    To,
    #[token("with")]
    With,
    #[token("while")]
    While,
    #[token("repeat")]
    Repeat,
    #[token("return")]
    Return,
    #[token("assert")]
    Assert,
    #[token("true")]
    True,
    #[token("false")]
    False,

    // Structural symbols
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    // Operators
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,

    // Literals
    #[regex(r#""[^"\n]*""#, string_contents)]
    Str(String),
    #[regex(r"[0-9]+(\.[0-9]+)?", parse_number)]
    Number(i64),
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned())]
    Ident(String),

    /// Text no other alternative accepts (stray characters, oversized
    /// numbers, unterminated strings). Reported when evaluation reaches it.
    Unknown(String),
}

impl TokenKind {
    /// Whether this token starts or ends a comment.
    pub fn is_comment(&self) -> bool {
        matches!(
            self,
            TokenKind::LineComment(_) | TokenKind::BlockCommentStart | TokenKind::BlockCommentEnd
        )
    }

    /// The identifier text, if this is an identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            TokenKind::Ident(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::LineComment(text) => return write!(f, "//{text}"),
            TokenKind::Str(text) => return write!(f, "\"{text}\""),
            TokenKind::Number(n) => return write!(f, "{n}"),
            TokenKind::Ident(name) | TokenKind::Unknown(name) => return f.write_str(name),
            TokenKind::BlockCommentStart => "/*",
            TokenKind::BlockCommentEnd => "*/",
            TokenKind::Var => "var",
            TokenKind::Val => "val",
            TokenKind::Def => "def",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::From => "from",
            TokenKind::To => "to",
            TokenKind::With => "with",
            TokenKind::While => "while",
            TokenKind::Repeat => "repeat",
            TokenKind::Return => "return",
            TokenKind::Assert => "assert",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",
            TokenKind::Eq => "=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Bang => "!",
        };
        f.write_str(text)
    }
}

/// A token with its source location.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Create a new token.
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}
