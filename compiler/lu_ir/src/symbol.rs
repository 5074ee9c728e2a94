//! Symbols created by name resolution.
//!
//! A declaration node owns its symbol through an attribute slot; every
//! reference to the name points at the same `Rc`. Symbols carry the
//! attributes that later passes and the evaluator need without walking back
//! to the declaring node.

use std::rc::Rc;

use crate::{Attribute, FunctionId, Span, ValueType};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VariableKind {
    /// `let` binding in a block or at top level.
    Local,
    /// Function parameter.
    Parameter,
    /// Variable declared in a `for` loop header.
    Iterator,
}

/// A variable, parameter or loop iterator.
#[derive(Debug)]
pub struct VariableSymbol {
    pub name: String,
    pub span: Span,
    pub kind: VariableKind,
    /// Filled by type resolution (parameters: by name resolution).
    pub ty: Attribute<ValueType>,
}

impl VariableSymbol {
    pub fn new(name: impl Into<String>, span: Span, kind: VariableKind) -> Self {
        VariableSymbol {
            name: name.into(),
            span,
            kind,
            ty: Attribute::new("variable type"),
        }
    }
}

/// A user-defined function.
#[derive(Debug)]
pub struct FunctionSymbol {
    pub id: FunctionId,
    pub name: String,
    pub span: Span,
    pub params: Vec<Rc<VariableSymbol>>,
    /// Declared return type; `void` when omitted.
    pub result: ValueType,
}

/// Parameter of a native function.
#[derive(Debug)]
pub struct NativeParam {
    pub name: &'static str,
    /// Argument types accepted for this parameter.
    pub accepts: &'static [ValueType],
}

impl NativeParam {
    pub fn accepts(&self, ty: ValueType) -> bool {
        self.accepts.iter().any(|accepted| accepted.is_exact(ty))
    }

    /// `int`, `int|float`, ...
    pub fn type_description(&self) -> String {
        self.accepts
            .iter()
            .map(|ty| ty.name())
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Typed signature of a native (built-in) function.
#[derive(Debug)]
pub struct NativeSignature {
    pub name: &'static str,
    pub params: &'static [NativeParam],
    pub result: ValueType,
}

/// Target of a function call, filled by name resolution.
#[derive(Clone, Debug)]
pub enum Callee {
    User(Rc<FunctionSymbol>),
    Native(&'static NativeSignature),
}

impl Callee {
    pub fn name(&self) -> &str {
        match self {
            Callee::User(symbol) => &symbol.name,
            Callee::Native(signature) => signature.name,
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Callee::User(symbol) => symbol.params.len(),
            Callee::Native(signature) => signature.params.len(),
        }
    }

    pub fn result_type(&self) -> ValueType {
        match self {
            Callee::User(symbol) => symbol.result,
            Callee::Native(signature) => signature.result,
        }
    }
}
