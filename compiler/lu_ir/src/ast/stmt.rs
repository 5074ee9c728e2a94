//! Statement and declaration nodes.

use std::rc::Rc;

use crate::{Attribute, Expr, FunctionSymbol, Span, ValueType, VariableSymbol};

/// Identity of a function declaration, unique within one parse.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FunctionId(pub u32);

/// A whole source file.
#[derive(Debug)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Debug)]
pub enum StmtKind {
    /// `expr;`
    Expr(Expr),
    Let(VarDecl),
    Function(Rc<FunctionDecl>),
    Block(Block),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Break,
    Continue,
    Return(Option<Expr>),
}

/// `{ statements }`
#[derive(Debug)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn new(statements: Vec<Stmt>, span: Span) -> Self {
        Block { statements, span }
    }

    pub fn last(&self) -> Option<&Stmt> {
        self.statements.last()
    }
}

/// A type name written in source, e.g. `int` in `let x: int = 1;`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeAnnotation {
    pub name: String,
    pub span: Span,
}

/// `let name [: type] = init`
#[derive(Debug)]
pub struct VarDecl {
    pub name: String,
    pub name_span: Span,
    pub annotation: Option<TypeAnnotation>,
    pub init: Expr,
    /// Resolved annotation; set only when `annotation` is present.
    pub declared_ty: Attribute<ValueType>,
    pub symbol: Attribute<Rc<VariableSymbol>>,
}

impl VarDecl {
    pub fn new(
        name: impl Into<String>,
        name_span: Span,
        annotation: Option<TypeAnnotation>,
        init: Expr,
    ) -> Self {
        VarDecl {
            name: name.into(),
            name_span,
            annotation,
            init,
            declared_ty: Attribute::new("declared type"),
            symbol: Attribute::new("variable symbol"),
        }
    }
}

/// `name: type` in a function signature.
#[derive(Debug)]
pub struct Param {
    pub name: String,
    pub span: Span,
    pub annotation: TypeAnnotation,
    pub symbol: Attribute<Rc<VariableSymbol>>,
}

impl Param {
    pub fn new(name: impl Into<String>, span: Span, annotation: TypeAnnotation) -> Self {
        Param {
            name: name.into(),
            span,
            annotation,
            symbol: Attribute::new("parameter symbol"),
        }
    }
}

/// `fn name(params) [: type] { body }`
#[derive(Debug)]
pub struct FunctionDecl {
    pub id: FunctionId,
    pub name: String,
    pub name_span: Span,
    pub params: Vec<Param>,
    pub return_annotation: Option<TypeAnnotation>,
    pub body: Block,
    pub span: Span,
    pub symbol: Attribute<Rc<FunctionSymbol>>,
}

#[derive(Debug)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Block,
    /// `else if` is parsed as an else block holding a single `if`.
    pub else_branch: Option<Block>,
}

#[derive(Debug)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Block,
}

/// `for (init; condition; step) body`
#[derive(Debug)]
pub struct ForStmt {
    pub init: ForInit,
    pub condition: Expr,
    pub step: Expr,
    pub body: Block,
}

#[derive(Debug)]
pub enum ForInit {
    /// `let i = 0` declares the loop iterator.
    Let(VarDecl),
    /// `i = 0` reuses a variable declared outside the loop.
    Assign(Expr),
}
