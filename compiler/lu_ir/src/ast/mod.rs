//! AST node types.
//!
//! Nodes own their children directly (`Box`/`Vec`). Function declarations
//! are shared through `Rc` so the evaluator can register them without
//! borrowing the whole program.

mod expr;
mod operators;
mod stmt;

pub use expr::{CallExpr, Expr, ExprKind, VariableRef};
pub use operators::{BinaryOp, UnaryOp};
pub use stmt::{
    Block, ForInit, ForStmt, FunctionDecl, FunctionId, IfStmt, Param, Program, Stmt, StmtKind,
    TypeAnnotation, VarDecl, WhileStmt,
};
