//! Semantic analysis for Lu.
//!
//! [`SemanticsChecker`] runs four passes over a parsed [`Program`], in
//! order, stopping at the first error:
//!
//! 1. [`ResolveNamesPass`] binds names to symbols. Function bodies are
//!    deferred through a [`DeclarationVisitQueue`] so consecutive functions
//!    can be mutually recursive.
//! 2. [`CheckContextRulesPass`] checks `break`/`continue`/`return`
//!    placement, call arity and assignment targets.
//! 3. [`ResolveTypesPass`] computes expression types.
//! 4. [`CheckTypesPass`] checks exact type agreement.
//!
//! [`Program`]: lu_ir::Program

mod checker;
mod error;
pub mod passes;
pub mod symbols;
mod visit_queue;

pub use checker::SemanticsChecker;
pub use error::{SemanticError, SemanticErrorKind, TypeMismatch};
pub use passes::{CheckContextRulesPass, CheckTypesPass, ResolveNamesPass, ResolveTypesPass};
pub use symbols::{Declaration, SymbolScopes, SymbolsTable};
pub use visit_queue::DeclarationVisitQueue;

#[cfg(test)]
mod tests;
