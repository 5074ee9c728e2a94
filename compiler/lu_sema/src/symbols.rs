//! Compile-time symbol tables.
//!
//! One [`SymbolsTable`] per lexical scope. [`SymbolScopes`] keeps the chain
//! from the built-ins table (bottom) to the innermost scope (top): lookups
//! walk outwards, declarations only touch the innermost table.

use std::rc::Rc;

use lu_ir::{Callee, NativeSignature, Span, TypeAnnotation, ValueType, VariableSymbol};
use rustc_hash::FxHashMap;

use crate::SemanticError;

/// What a value name is bound to.
#[derive(Clone, Debug)]
pub enum Declaration {
    Variable(Rc<VariableSymbol>),
    Function(Callee),
}

impl Declaration {
    fn describe(&self) -> &'static str {
        match self {
            Declaration::Variable(_) => "variable",
            Declaration::Function(_) => "function",
        }
    }
}

/// Names declared in a single scope.
///
/// Variables and functions share one namespace; types live in their own.
#[derive(Debug, Default)]
pub struct SymbolsTable {
    values: FxHashMap<String, Declaration>,
    types: FxHashMap<String, ValueType>,
}

impl SymbolsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare_variable(&mut self, symbol: Rc<VariableSymbol>) -> Result<(), SemanticError> {
        let span = symbol.span;
        let name = symbol.name.clone();
        self.declare(name, Declaration::Variable(symbol), span)
    }

    pub fn declare_function(&mut self, callee: Callee, span: Span) -> Result<(), SemanticError> {
        self.declare(callee.name().to_owned(), Declaration::Function(callee), span)
    }

    fn declare(
        &mut self,
        name: String,
        declaration: Declaration,
        span: Span,
    ) -> Result<(), SemanticError> {
        if self.values.contains_key(&name) {
            return Err(SemanticError::duplicate_symbol(&name, span));
        }
        self.values.insert(name, declaration);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.values.get(name)
    }

    pub fn get_type(&self, name: &str) -> Option<ValueType> {
        self.types.get(name).copied()
    }
}

/// Type names every program can use.
pub const BUILTIN_TYPES: [ValueType; 4] = [
    ValueType::Int,
    ValueType::Float,
    ValueType::String,
    ValueType::Void,
];

/// Stack of symbol tables, innermost last.
#[derive(Debug)]
pub struct SymbolScopes {
    tables: Vec<SymbolsTable>,
}

impl SymbolScopes {
    /// Root table with the built-in types and the given native functions,
    /// plus an empty program-level table on top of it.
    ///
    /// Programs may shadow built-ins at top level.
    pub fn with_builtins(natives: &[&'static NativeSignature]) -> Self {
        let mut root = SymbolsTable::new();
        for ty in BUILTIN_TYPES {
            root.types.insert(ty.name().to_owned(), ty);
        }
        for &signature in natives {
            root.values
                .insert(signature.name.to_owned(), Declaration::Function(Callee::Native(signature)));
        }
        SymbolScopes {
            tables: vec![root, SymbolsTable::new()],
        }
    }

    /// Number of tables, the built-ins table included.
    pub fn depth(&self) -> usize {
        self.tables.len()
    }

    pub fn push(&mut self) {
        self.tables.push(SymbolsTable::new());
        tracing::trace!(depth = self.tables.len(), "push symbols table");
    }

    pub fn pop(&mut self) {
        debug_assert!(self.tables.len() > 1, "cannot pop the built-ins table");
        if self.tables.len() > 1 {
            self.tables.pop();
        }
        tracing::trace!(depth = self.tables.len(), "pop symbols table");
    }

    fn current(&mut self) -> &mut SymbolsTable {
        // `tables` always holds the built-ins table.
        let last = self.tables.len() - 1;
        &mut self.tables[last]
    }

    pub fn declare_variable(&mut self, symbol: Rc<VariableSymbol>) -> Result<(), SemanticError> {
        self.current().declare_variable(symbol)
    }

    pub fn declare_function(&mut self, callee: Callee, span: Span) -> Result<(), SemanticError> {
        self.current().declare_function(callee, span)
    }

    /// Find the innermost declaration of `name`.
    pub fn lookup(&self, name: &str) -> Option<&Declaration> {
        self.tables.iter().rev().find_map(|table| table.get(name))
    }

    /// Resolve `name` as a variable.
    pub fn variable(&self, name: &str, span: Span) -> Result<Rc<VariableSymbol>, SemanticError> {
        match self.lookup(name) {
            Some(Declaration::Variable(symbol)) => Ok(Rc::clone(symbol)),
            Some(other) => Err(SemanticError::invalid_symbol(
                name,
                "variable",
                other.describe(),
                span,
            )),
            None => Err(SemanticError::unknown_name(name, span)),
        }
    }

    /// Resolve `name` as a function.
    pub fn function(&self, name: &str, span: Span) -> Result<Callee, SemanticError> {
        match self.lookup(name) {
            Some(Declaration::Function(callee)) => Ok(callee.clone()),
            Some(other) => Err(SemanticError::invalid_symbol(
                name,
                "function",
                other.describe(),
                span,
            )),
            None => Err(SemanticError::unknown_name(name, span)),
        }
    }

    pub fn resolve_type(&self, annotation: &TypeAnnotation) -> Result<ValueType, SemanticError> {
        self.tables
            .iter()
            .rev()
            .find_map(|table| table.get_type(&annotation.name))
            .ok_or_else(|| SemanticError::unknown_type(&annotation.name, annotation.span))
    }
}
