//! Lu IR - shared data structures for the Lu interpreter.
//!
//! This crate contains the types every phase agrees on:
//! - Spans for source locations
//! - Tokens and `TokenList` for lexer output
//! - AST nodes with write-once attribute slots filled by semantic analysis
//! - Runtime `Value` and its nominal `ValueType`
//! - Symbols produced by name resolution and native function signatures
//!
//! The AST is a plain owned tree. Semantic passes never change its shape;
//! they only fill [`Attribute`] slots, each exactly once.

pub mod ast;
mod attribute;
mod span;
mod symbol;
mod token;
mod value;
mod value_type;

pub use ast::{
    BinaryOp, Block, CallExpr, Expr, ExprKind, ForInit, ForStmt, FunctionDecl, FunctionId,
    IfStmt, Param, Program, Stmt, StmtKind, TypeAnnotation, UnaryOp, VarDecl, VariableRef,
    WhileStmt,
};
pub use attribute::Attribute;
pub use span::{Span, SpanError};
pub use symbol::{
    Callee, FunctionSymbol, NativeParam, NativeSignature, VariableKind, VariableSymbol,
};
pub use token::{Token, TokenKind, TokenList};
pub use value::{nearly_equal, Value, FLOAT_TOLERANCE};
pub use value_type::ValueType;
