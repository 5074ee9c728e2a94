//! Semantic error types.

use lu_diagnostic::{Diagnostic, ErrorCode};
use lu_ir::{Span, ValueType};
use thiserror::Error;

/// Category of a semantic error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SemanticErrorKind {
    /// A name declared twice in the same scope.
    DuplicateSymbol,
    /// A name or type that is not declared in any enclosing scope.
    UnknownSymbol,
    /// A name used as the wrong kind of symbol (a function as a variable, ...).
    InvalidSymbol,
    TypeError,
    /// `break`, `continue` or `return` outside of their context.
    InvalidExpression,
    /// Assignment to something that is not a variable.
    InvalidAssignment,
    /// Wrong number of arguments.
    InvalidFunctionCall,
}

impl SemanticErrorKind {
    pub fn code(self) -> ErrorCode {
        match self {
            SemanticErrorKind::DuplicateSymbol => ErrorCode::E2001,
            SemanticErrorKind::UnknownSymbol => ErrorCode::E2002,
            SemanticErrorKind::InvalidSymbol => ErrorCode::E2003,
            SemanticErrorKind::TypeError => ErrorCode::E2004,
            SemanticErrorKind::InvalidExpression => ErrorCode::E2005,
            SemanticErrorKind::InvalidAssignment => ErrorCode::E2006,
            SemanticErrorKind::InvalidFunctionCall => ErrorCode::E2007,
        }
    }
}

/// Expected and actual type of a type error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TypeMismatch {
    pub expected: ValueType,
    pub found: ValueType,
}

/// A semantic error; analysis stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub message: String,
    pub span: Span,
    pub mismatch: Option<TypeMismatch>,
}

impl SemanticError {
    pub fn new(kind: SemanticErrorKind, message: impl Into<String>, span: Span) -> Self {
        SemanticError {
            kind,
            message: message.into(),
            span,
            mismatch: None,
        }
    }

    #[cold]
    pub fn duplicate_symbol(name: &str, span: Span) -> Self {
        SemanticError::new(
            SemanticErrorKind::DuplicateSymbol,
            format!("`{name}` is already declared in this scope"),
            span,
        )
    }

    #[cold]
    pub fn unknown_name(name: &str, span: Span) -> Self {
        SemanticError::new(
            SemanticErrorKind::UnknownSymbol,
            format!("cannot find variable or function `{name}` in this scope"),
            span,
        )
    }

    #[cold]
    pub fn unknown_type(name: &str, span: Span) -> Self {
        SemanticError::new(
            SemanticErrorKind::UnknownSymbol,
            format!("cannot find type `{name}`"),
            span,
        )
    }

    #[cold]
    pub fn invalid_symbol(name: &str, expected: &str, found: &str, span: Span) -> Self {
        SemanticError::new(
            SemanticErrorKind::InvalidSymbol,
            format!("`{name}` is a {found}, expected a {expected}"),
            span,
        )
    }

    #[cold]
    pub fn type_error(message: impl Into<String>, span: Span) -> Self {
        SemanticError::new(SemanticErrorKind::TypeError, message, span)
    }

    /// `{category}: expected `int`, found `float``
    #[cold]
    pub fn type_mismatch(category: &str, expected: ValueType, found: ValueType, span: Span) -> Self {
        SemanticError {
            mismatch: Some(TypeMismatch { expected, found }),
            ..SemanticError::type_error(
                format!("mismatched types in {category}: expected `{expected}`, found `{found}`"),
                span,
            )
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(&self.message)
            .with_label(self.span, self.code().description());
        match self.mismatch {
            Some(TypeMismatch { expected, found }) => {
                diag.with_note(format!("expected `{expected}`, found `{found}`"))
            }
            None => diag,
        }
    }
}
