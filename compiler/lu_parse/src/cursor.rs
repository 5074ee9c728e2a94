//! Token cursor for navigating the token stream.

use lu_diagnostic::ErrorCode;
use lu_ir::{Span, Token, TokenKind, TokenList};

use crate::ParseError;

/// Read position over a `TokenList` that always ends in `Eof`.
pub struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Cursor {
            tokens: tokens.as_slice(),
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Current token; past the end this keeps returning `Eof`.
    #[inline]
    pub fn current(&self) -> &'a Token {
        static EOF: Token = Token {
            kind: TokenKind::Eof,
            span: Span::DUMMY,
        };
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .unwrap_or(&EOF)
    }

    #[inline]
    pub fn current_kind(&self) -> &'a TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    #[inline]
    pub fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens
                .get(self.pos - 1)
                .map_or(Span::DUMMY, |token| token.span)
        } else {
            Span::DUMMY
        }
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Whether the current token has the same kind (literal payloads ignored).
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind().same_kind(kind)
    }

    /// Advance to the next token, returning the current one.
    pub fn advance(&mut self) -> &'a Token {
        let current = self.current();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        current
    }

    /// Consume the current token if it has the given kind.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect the current token to be of the given kind, advance and return it.
    #[inline]
    pub fn expect(&mut self, kind: &TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.make_expect_error(kind))
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, kind: &TokenKind) -> ParseError {
        ParseError::unexpected(kind.display_name(), self.current_kind(), self.current_span())
    }

    /// Expect an identifier; returns its text and span.
    pub fn expect_ident(&mut self) -> Result<(String, Span), ParseError> {
        if let TokenKind::Ident(name) = self.current_kind() {
            let span = self.current_span();
            self.advance();
            Ok((name.clone(), span))
        } else {
            Err(self.make_expect_ident_error())
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_ident_error(&self) -> ParseError {
        ParseError::new(
            ErrorCode::E1004,
            format!(
                "expected identifier, found {}",
                self.current_kind().display_name()
            ),
            self.current_span(),
        )
    }
}
