//! Tree-walking evaluator for Lu.
//!
//! Runs programs that passed semantic analysis:
//! - [`Evaluator`] walks the decorated AST over an explicit operand stack
//! - [`Context`] holds runtime scopes and registered functions
//! - [`builtins`] pairs native signatures with their implementations
//! - [`Environment`] is the I/O boundary used by `input` and the print family

pub mod builtins;
mod call_stack;
mod config;
mod context;
mod environment;
mod error;
mod evaluator;
mod operators;
mod unary_operators;

pub use builtins::{Builtin, NativeFn, BUILTINS};
pub use call_stack::{CallFrame, CallStack};
pub use config::{InterpreterConfig, DEFAULT_MAX_CALL_DEPTH};
pub use context::{Context, FunctionRef, Scope};
pub use environment::{
    buffer_environment, console_environment, scripted_environment, BufferEnvironment,
    ConsoleEnvironment, Environment, SharedEnvironment,
};
pub use error::{BacktraceFrame, EvalError, EvalErrorKind, EvalResult};
pub use evaluator::{ControlFlow, Evaluator, ScopedEvaluator};
pub use operators::evaluate_binary;
pub use unary_operators::evaluate_unary;

#[cfg(test)]
mod tests;
