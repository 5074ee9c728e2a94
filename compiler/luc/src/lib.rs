//! Lu interpreter driver.
//!
//! Wires the phases together: lex, parse, check, evaluate. The `lu` binary
//! is a thin command layer over this library.

pub mod commands;
mod error;
mod tracing_setup;

use lu_eval::{Evaluator, InterpreterConfig, SharedEnvironment};
use lu_ir::{Program, TokenList, Value};
use lu_sema::SemanticsChecker;

pub use error::LuError;
pub use tracing_setup::init_tracing;

/// Tokenize `source`.
pub fn lex_source(source: &str) -> Result<TokenList, LuError> {
    Ok(lu_lexer::lex(source)?)
}

/// Lex and parse `source` without semantic analysis.
pub fn parse_source(source: &str) -> Result<Program, LuError> {
    let tokens = lex_source(source)?;
    Ok(lu_parse::parse(&tokens)?)
}

/// Lex, parse and check `source` against the built-in functions.
///
/// The returned program is fully decorated and ready to evaluate.
pub fn check_source(source: &str) -> Result<Program, LuError> {
    let program = parse_source(source)?;
    SemanticsChecker::new(Evaluator::native_signatures()).check(&program)?;
    Ok(program)
}

/// Runs whole programs against one environment.
pub struct Interpreter {
    env: SharedEnvironment,
    config: InterpreterConfig,
}

impl Interpreter {
    pub fn new(env: SharedEnvironment, config: InterpreterConfig) -> Self {
        Interpreter { env, config }
    }

    pub fn environment(&self) -> &SharedEnvironment {
        &self.env
    }

    /// Check and evaluate `source`; each call starts from an empty global scope.
    pub fn execute(&self, source: &str) -> Result<Value, LuError> {
        let program = check_source(source)?;
        let mut evaluator = Evaluator::new(SharedEnvironment::clone(&self.env), &self.config);
        Ok(evaluator.evaluate(&program)?)
    }
}
