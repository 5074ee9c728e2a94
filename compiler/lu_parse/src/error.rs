//! Parse error types.

use lu_diagnostic::{Diagnostic, ErrorCode};
use lu_ir::{Span, TokenKind};
use thiserror::Error;

/// A syntax error; parsing stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// Optional hint shown as a help line.
    pub help: Option<String>,
}

impl ParseError {
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            help: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// `expected X, found Y` at the offending token.
    #[cold]
    pub fn unexpected(expected: &str, found: &TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1001,
            format!("expected {expected}, found {}", found.display_name()),
            span,
        )
    }

    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.span, self.code.description());
        match &self.help {
            Some(help) => diag.with_suggestion(help),
            None => diag,
        }
    }
}
