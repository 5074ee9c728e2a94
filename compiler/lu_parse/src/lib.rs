//! Recursive descent parser for Lu.
//!
//! Turns a [`TokenList`] into a [`Program`]. Expression precedence, lowest
//! to highest:
//!
//! ```text
//! =  ||  &&  == !=  < > <= >=  + -  * / %  ^  unary + - !  primary
//! ```
//!
//! Assignment and `^` are right-associative; everything else is
//! left-associative. Parsing stops at the first syntax error.

mod cursor;
mod error;
mod grammar;

use lu_ir::{FunctionId, Program, Span, Token, TokenKind, TokenList};

pub use cursor::Cursor;
pub use error::ParseError;

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    next_function_id: u32,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
            next_function_id: 0,
        }
    }

    // Cursor delegation

    #[inline]
    pub(crate) fn current_kind(&self) -> &'a TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    pub(crate) fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    pub(crate) fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    pub(crate) fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    pub(crate) fn advance(&mut self) -> &'a Token {
        self.cursor.advance()
    }

    #[inline]
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        self.cursor.eat(kind)
    }

    #[inline]
    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<&'a Token, ParseError> {
        self.cursor.expect(kind)
    }

    #[inline]
    pub(crate) fn expect_ident(&mut self) -> Result<(String, Span), ParseError> {
        self.cursor.expect_ident()
    }

    pub(crate) fn fresh_function_id(&mut self) -> FunctionId {
        let id = FunctionId(self.next_function_id);
        self.next_function_id += 1;
        id
    }

    /// Parse a whole program: statements until `Eof`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_program(mut self) -> Result<Program, ParseError> {
        let start = self.current_span();
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        let span = start.merge(self.current_span());
        tracing::debug!(statements = statements.len(), "parsed program");
        Ok(Program { statements, span })
    }
}

/// Parse tokens into a program.
pub fn parse(tokens: &TokenList) -> Result<Program, ParseError> {
    Parser::new(tokens).parse_program()
}

#[cfg(test)]
mod tests;
