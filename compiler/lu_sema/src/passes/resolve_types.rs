//! Computes the result type of every expression, bottom-up.

use lu_ir::{
    BinaryOp, Block, Expr, ExprKind, ForInit, Program, Stmt, StmtKind, UnaryOp, ValueType,
    VarDecl, VariableKind,
};
use lu_stack::ensure_sufficient_stack;

use crate::SemanticError;

/// Fills `Expr::ty` and `VariableSymbol::ty` for `let` bindings.
///
/// Operators with operand types outside the typing table fail here, since
/// no result type exists for them.
#[derive(Default)]
pub struct ResolveTypesPass;

impl ResolveTypesPass {
    pub fn new() -> Self {
        ResolveTypesPass
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(self, program: &Program) -> Result<(), SemanticError> {
        for stmt in &program.statements {
            self.visit_stmt(stmt)?;
        }
        tracing::debug!("types resolved");
        Ok(())
    }

    fn visit_block(&self, block: &Block) -> Result<(), SemanticError> {
        block
            .statements
            .iter()
            .try_for_each(|stmt| self.visit_stmt(stmt))
    }

    fn visit_var_decl(&self, decl: &VarDecl) -> Result<(), SemanticError> {
        self.visit_expr(&decl.init)?;
        let symbol = decl.symbol.get();
        let ty = match symbol.kind {
            VariableKind::Iterator => ValueType::Int,
            VariableKind::Local | VariableKind::Parameter => decl.init.ty.value(),
        };
        symbol.ty.set(ty);
        Ok(())
    }

    fn visit_stmt(&self, stmt: &Stmt) -> Result<(), SemanticError> {
        ensure_sufficient_stack(|| self.visit_stmt_inner(stmt))
    }

    fn visit_stmt_inner(&self, stmt: &Stmt) -> Result<(), SemanticError> {
        match &stmt.kind {
            StmtKind::Expr(expr) | StmtKind::Return(Some(expr)) => self.visit_expr(expr),
            StmtKind::Let(decl) => self.visit_var_decl(decl),
            StmtKind::Function(decl) => self.visit_block(&decl.body),
            StmtKind::Block(block) => self.visit_block(block),
            StmtKind::If(stmt) => {
                self.visit_expr(&stmt.condition)?;
                self.visit_block(&stmt.then_branch)?;
                match &stmt.else_branch {
                    Some(block) => self.visit_block(block),
                    None => Ok(()),
                }
            }
            StmtKind::While(stmt) => {
                self.visit_expr(&stmt.condition)?;
                self.visit_block(&stmt.body)
            }
            StmtKind::For(stmt) => {
                match &stmt.init {
                    ForInit::Let(decl) => self.visit_var_decl(decl)?,
                    ForInit::Assign(expr) => self.visit_expr(expr)?,
                }
                self.visit_expr(&stmt.condition)?;
                self.visit_expr(&stmt.step)?;
                self.visit_block(&stmt.body)
            }
            StmtKind::Break | StmtKind::Continue | StmtKind::Return(None) => Ok(()),
        }
    }

    fn visit_expr(&self, expr: &Expr) -> Result<(), SemanticError> {
        ensure_sufficient_stack(|| self.visit_expr_inner(expr))
    }

    fn visit_expr_inner(&self, expr: &Expr) -> Result<(), SemanticError> {
        let ty = match &expr.kind {
            ExprKind::Literal(value) => value.value_type(),
            ExprKind::Variable(var) => var.symbol.get().ty.value(),
            ExprKind::Assign { target, value } => {
                self.visit_expr(target)?;
                self.visit_expr(value)?;
                ValueType::Void
            }
            ExprKind::Binary { op, left, right } => {
                self.visit_expr(left)?;
                self.visit_expr(right)?;
                let (left, right) = (left.ty.value(), right.ty.value());
                binary_result_type(*op, left, right).ok_or_else(|| {
                    SemanticError::type_error(
                        format!(
                            "binary operation `{op}` is not allowed for types `{left}` and `{right}`"
                        ),
                        expr.span,
                    )
                })?
            }
            ExprKind::Unary { op, operand } => {
                self.visit_expr(operand)?;
                let operand = operand.ty.value();
                unary_result_type(*op, operand).ok_or_else(|| {
                    SemanticError::type_error(
                        format!("unary operation `{op}` is not allowed for type `{operand}`"),
                        expr.span,
                    )
                })?
            }
            ExprKind::Call(call) => {
                for arg in &call.args {
                    self.visit_expr(arg)?;
                }
                call.callee.get().result_type()
            }
        };
        expr.ty.set(ty);
        Ok(())
    }
}

/// Result type of `left op right`, or `None` if the operand types are not
/// allowed.
pub fn binary_result_type(op: BinaryOp, left: ValueType, right: ValueType) -> Option<ValueType> {
    let both_strings = left == ValueType::String && right == ValueType::String;
    match op {
        BinaryOp::Add
        | BinaryOp::Sub
        | BinaryOp::Mul
        | BinaryOp::Div
        | BinaryOp::Mod
        | BinaryOp::Pow => left.promote(right),
        BinaryOp::And | BinaryOp::Or => {
            (left == ValueType::Int && right == ValueType::Int).then_some(ValueType::Int)
        }
        BinaryOp::Lt
        | BinaryOp::LtEq
        | BinaryOp::Gt
        | BinaryOp::GtEq
        | BinaryOp::Eq
        | BinaryOp::NotEq => {
            (left.promote(right).is_some() || both_strings).then_some(ValueType::Int)
        }
    }
}

/// Result type of a unary operation, or `None` if the operand type is not
/// allowed.
pub fn unary_result_type(op: UnaryOp, operand: ValueType) -> Option<ValueType> {
    match op {
        UnaryOp::Neg | UnaryOp::Plus => operand.is_numeric().then_some(operand),
        UnaryOp::Not => (operand == ValueType::Int).then_some(ValueType::Int),
    }
}
