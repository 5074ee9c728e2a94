//! Lexer error types.

use lu_diagnostic::{Diagnostic, ErrorCode};
use lu_ir::Span;
use thiserror::Error;

/// A lexical error; lexing stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct LexError {
    pub span: Span,
    pub kind: LexErrorKind,
}

/// What kind of lexer error occurred.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("invalid escape sequence `\\{0}`")]
    InvalidEscape(char),
    #[error("number literal `{0}` is out of range")]
    NumberOutOfRange(String),
    #[error("invalid character `{0}`")]
    InvalidCharacter(char),
}

impl LexError {
    pub fn new(span: Span, kind: LexErrorKind) -> Self {
        LexError { span, kind }
    }

    pub fn code(&self) -> ErrorCode {
        match self.kind {
            LexErrorKind::UnterminatedString => ErrorCode::E0001,
            LexErrorKind::InvalidCharacter(_) => ErrorCode::E0002,
            LexErrorKind::NumberOutOfRange(_) => ErrorCode::E0003,
            LexErrorKind::UnterminatedComment => ErrorCode::E0004,
            LexErrorKind::InvalidEscape(_) => ErrorCode::E0005,
        }
    }

    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .with_label(self.span, self.code().description());
        match self.kind {
            LexErrorKind::UnterminatedString => {
                diag.with_suggestion("add a closing `\"` before the end of the line")
            }
            LexErrorKind::InvalidEscape(_) => {
                diag.with_note("valid escapes are \\n \\t \\r \\\\ \\\" and \\0")
            }
            LexErrorKind::NumberOutOfRange(_) => {
                diag.with_note("integers must fit in a signed 64-bit value")
            }
            LexErrorKind::UnterminatedComment => {
                diag.with_suggestion("close the comment with `*/`")
            }
            LexErrorKind::InvalidCharacter(_) => diag,
        }
    }
}
