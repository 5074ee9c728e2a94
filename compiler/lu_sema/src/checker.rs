//! Facade running all passes over a program.

use lu_ir::{NativeSignature, Program};

use crate::passes::{CheckContextRulesPass, CheckTypesPass, ResolveNamesPass, ResolveTypesPass};
use crate::symbols::SymbolScopes;
use crate::SemanticError;

/// Checks a program against the language's static rules.
///
/// On success every attribute the evaluator reads is set. A program can be
/// checked only once: attributes are write-once.
pub struct SemanticsChecker {
    natives: Vec<&'static NativeSignature>,
}

impl SemanticsChecker {
    /// `natives` become pre-declared functions visible everywhere.
    pub fn new(natives: impl IntoIterator<Item = &'static NativeSignature>) -> Self {
        SemanticsChecker {
            natives: natives.into_iter().collect(),
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.statements.len()))]
    pub fn check(&self, program: &Program) -> Result<(), SemanticError> {
        ResolveNamesPass::new(SymbolScopes::with_builtins(&self.natives)).run(program)?;
        CheckContextRulesPass::new().run(program)?;
        ResolveTypesPass::new().run(program)?;
        CheckTypesPass::new().run(program)?;
        Ok(())
    }
}
