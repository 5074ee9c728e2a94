//! Lexer for Lu using logos.
//!
//! Produces a [`TokenList`] terminated by `Eof`. Whitespace and comments
//! (`// line`, `/* block */`) are skipped. Lexing stops at the first error.

mod lex_error;

use logos::Logos;
use lu_ir::{Span, Token, TokenKind, TokenList};

pub use lex_error::{LexError, LexErrorKind};

/// Raw token from logos, before literal decoding.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"//[^\n]*")]
enum RawToken {
    #[token("let")]
    Let,
    #[token("fn")]
    Fn,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("while")]
    While,
    #[token("for")]
    For,
    #[token("break")]
    Break,
    #[token("continue")]
    Continue,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("nil")]
    Nil,

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
    #[token("^")]
    Caret,
    #[token("!")]
    Bang,
    #[token("=")]
    Eq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token("<=")]
    LtEq,
    #[token(">")]
    Gt,
    #[token(">=")]
    GtEq,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token(":")]
    Colon,

    // Only emitted when the comment runs to end of input
    #[token("/*", block_comment)]
    UnterminatedComment,

    // Hex integer
    #[regex(r"0x[0-9a-fA-F][0-9a-fA-F_]*", |lex| {
        i64::from_str_radix(&lex.slice()[2..].replace('_', ""), 16).ok()
    })]
    HexInt(i64),

    // Binary integer
    #[regex(r"0b[01][01_]*", |lex| {
        i64::from_str_radix(&lex.slice()[2..].replace('_', ""), 2).ok()
    })]
    BinInt(i64),

    // Integer
    #[regex(r"[0-9][0-9_]*", |lex| {
        lex.slice().replace('_', "").parse::<i64>().ok()
    })]
    Int(i64),

    // Float
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?", |lex| {
        lex.slice().replace('_', "").parse::<f64>().ok()
    })]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+", |lex| {
        lex.slice().replace('_', "").parse::<f64>().ok()
    })]
    Float(f64),

    // String literal (no unescaped newlines allowed)
    #[regex(r#""([^"\\\n\r]|\\.)*""#)]
    String,

    // String literal missing its closing quote
    #[regex(r#""([^"\\\n\r]|\\.)*"#)]
    UnterminatedString,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,
}

/// Skip a `/* ... */` comment; block comments do not nest.
fn block_comment(lex: &mut logos::Lexer<RawToken>) -> logos::Filter<()> {
    if let Some(end) = lex.remainder().find("*/") {
        lex.bump(end + 2);
        logos::Filter::Skip
    } else {
        lex.bump(lex.remainder().len());
        logos::Filter::Emit(())
    }
}

/// Lex source code into a `TokenList`.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str) -> Result<TokenList, LexError> {
    let mut result = TokenList::new();
    let mut logos = RawToken::lexer(source);

    while let Some(token_result) = logos.next() {
        let span = to_span(logos.span());
        let slice = logos.slice();

        let kind = match token_result {
            Ok(RawToken::UnterminatedString) => {
                return Err(LexError::new(span, LexErrorKind::UnterminatedString));
            }
            Ok(RawToken::UnterminatedComment) => {
                return Err(LexError::new(span, LexErrorKind::UnterminatedComment));
            }
            Ok(raw) => convert_token(raw, slice, span)?,
            Err(()) => return Err(classify_error(slice, span)),
        };
        result.push(Token::new(kind, span));
    }

    let eof = to_span(source.len()..source.len());
    result.push(Token::new(TokenKind::Eof, eof));
    tracing::debug!(tokens = result.len(), "lexed");
    Ok(result)
}

fn to_span(range: std::ops::Range<usize>) -> Span {
    Span::try_from_range(range).unwrap_or(Span::point(u32::MAX))
}

/// Logos reports failed callbacks and unknown input alike; tell them apart.
fn classify_error(slice: &str, span: Span) -> LexError {
    match slice.chars().next() {
        Some(c) if c.is_ascii_digit() => {
            LexError::new(span, LexErrorKind::NumberOutOfRange(slice.to_string()))
        }
        Some(c) => LexError::new(span, LexErrorKind::InvalidCharacter(c)),
        None => LexError::new(span, LexErrorKind::InvalidCharacter('\0')),
    }
}

fn convert_token(raw: RawToken, slice: &str, span: Span) -> Result<TokenKind, LexError> {
    let kind = match raw {
        RawToken::Int(n) | RawToken::HexInt(n) | RawToken::BinInt(n) => TokenKind::Int(n),
        RawToken::Float(f) => TokenKind::Float(f),
        RawToken::String => {
            let body = &slice[1..slice.len() - 1];
            let text = unescape_string(body)
                .map_err(|c| LexError::new(span, LexErrorKind::InvalidEscape(c)))?;
            TokenKind::String(text)
        }
        RawToken::Ident => TokenKind::Ident(slice.to_string()),

        RawToken::Let => TokenKind::Let,
        RawToken::Fn => TokenKind::Fn,
        RawToken::Return => TokenKind::Return,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::While => TokenKind::While,
        RawToken::For => TokenKind::For,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Nil => TokenKind::Nil,

        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Eq => TokenKind::Eq,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::Gt => TokenKind::Gt,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::PipePipe => TokenKind::PipePipe,

        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,

        RawToken::UnterminatedString => {
            return Err(LexError::new(span, LexErrorKind::UnterminatedString));
        }
        RawToken::UnterminatedComment => {
            return Err(LexError::new(span, LexErrorKind::UnterminatedComment));
        }
    };
    Ok(kind)
}

/// Decode escape sequences; returns the offending character on a bad escape.
fn unescape_string(s: &str) -> Result<String, char> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => result.push('\n'),
                Some('r') => result.push('\r'),
                Some('t') => result.push('\t'),
                Some('\\') => result.push('\\'),
                Some('"') => result.push('"'),
                Some('0') => result.push('\0'),
                Some(other) => return Err(other),
                None => return Err('\\'),
            }
        } else {
            result.push(c);
        }
    }

    Ok(result)
}
