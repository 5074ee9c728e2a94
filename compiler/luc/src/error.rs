//! Driver-level error covering every phase.

use lu_diagnostic::{Diagnostic, ErrorCode};
use lu_eval::EvalError;
use lu_lexer::LexError;
use lu_parse::ParseError;
use lu_sema::SemanticError;
use thiserror::Error;

/// The first error reported by any phase.
#[derive(Debug, Error)]
pub enum LuError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl LuError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LuError::Lex(err) => err.code(),
            LuError::Parse(err) => err.code,
            LuError::Semantic(err) => err.code(),
            LuError::Eval(err) => err.code(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            LuError::Lex(err) => err.to_diagnostic(),
            LuError::Parse(err) => err.to_diagnostic(),
            LuError::Semantic(err) => err.to_diagnostic(),
            LuError::Eval(err) => err.to_diagnostic(),
        }
    }
}
