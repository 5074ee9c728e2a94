//! Runtime error types.

use lu_diagnostic::{Diagnostic, ErrorCode};
use lu_ir::Span;
use thiserror::Error;

/// Result of evaluating a single operation.
pub type EvalResult<T = lu_ir::Value> = Result<T, EvalErrorKind>;

/// What went wrong at runtime.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalErrorKind {
    #[error("undefined variable `{0}`")]
    UndefinedVariable(String),
    #[error("undefined function `{0}`")]
    UndefinedFunction(String),
    #[error("`{0}` is already defined in this scope")]
    DuplicateDefinition(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("integer overflow in {0}")]
    IntegerOverflow(&'static str),
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    #[error("function `{0}` must return")]
    MissingReturn(String),
    #[error("no more input")]
    InputExhausted,
    #[error("`{name}` failed: {message}")]
    NativeFailed { name: &'static str, message: String },
    #[error("maximum call depth of {0} exceeded")]
    StackOverflow(usize),
    /// Broken evaluator invariant; never caused by a checked program.
    #[error("internal evaluator error: {0}")]
    Internal(String),
}

impl EvalErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            EvalErrorKind::UndefinedVariable(_) => ErrorCode::E6001,
            EvalErrorKind::UndefinedFunction(_) => ErrorCode::E6002,
            EvalErrorKind::DuplicateDefinition(_) => ErrorCode::E6003,
            EvalErrorKind::DivisionByZero => ErrorCode::E6004,
            EvalErrorKind::ModuloByZero => ErrorCode::E6005,
            EvalErrorKind::IntegerOverflow(_) => ErrorCode::E6006,
            EvalErrorKind::TypeMismatch(_) => ErrorCode::E6007,
            EvalErrorKind::MissingReturn(_) => ErrorCode::E6008,
            EvalErrorKind::InputExhausted => ErrorCode::E6009,
            EvalErrorKind::NativeFailed { .. } => ErrorCode::E6010,
            EvalErrorKind::StackOverflow(_) => ErrorCode::E6011,
            EvalErrorKind::Internal(_) => ErrorCode::E9001,
        }
    }

    /// Attach the span of the node being evaluated.
    #[cold]
    pub fn at(self, span: Span) -> EvalError {
        EvalError::new(self, span)
    }
}

#[cold]
pub fn native_failed(name: &'static str, message: impl Into<String>) -> EvalErrorKind {
    EvalErrorKind::NativeFailed {
        name,
        message: message.into(),
    }
}

#[cold]
pub fn internal(message: impl Into<String>) -> EvalErrorKind {
    EvalErrorKind::Internal(message.into())
}

const MAX_BACKTRACE_LABELS: usize = 8;

/// A user function call the error propagated through.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    pub function: String,
    pub call_span: Span,
}

/// A runtime error; evaluation stops at the first one.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Span,
    /// Innermost call first.
    pub backtrace: Vec<BacktraceFrame>,
}

impl EvalError {
    pub fn new(kind: EvalErrorKind, span: Span) -> Self {
        EvalError {
            kind,
            span,
            backtrace: Vec::new(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    /// Attach the call stack at the point of failure, unless one is already set.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: impl FnOnce() -> Vec<BacktraceFrame>) -> Self {
        if self.backtrace.is_empty() {
            self.backtrace = backtrace();
        }
        self
    }

    #[cold]
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code())
            .with_message(self.kind.to_string())
            .with_label(self.span, self.code().description());
        for frame in self.backtrace.iter().take(MAX_BACKTRACE_LABELS) {
            diag = diag.with_secondary_label(
                frame.call_span,
                format!("in this call to `{}`", frame.function),
            );
        }
        if self.backtrace.len() > MAX_BACKTRACE_LABELS {
            diag = diag.with_note(format!(
                "{} more calls not shown",
                self.backtrace.len() - MAX_BACKTRACE_LABELS
            ));
        }
        match &self.kind {
            EvalErrorKind::StackOverflow(_) => {
                diag.with_note("the limit can be raised with `--max-depth`")
            }
            EvalErrorKind::Internal(_) => diag.with_note("this is a bug in the interpreter"),
            _ => diag,
        }
    }
}
