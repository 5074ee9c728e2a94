//! Rejects type incompatibilities on the fully typed tree.

use lu_ir::{
    Block, CallExpr, Callee, Expr, ExprKind, ForInit, FunctionDecl, Program, Stmt, StmtKind,
    ValueType, VarDecl,
};
use lu_stack::ensure_sufficient_stack;

use crate::SemanticError;

/// Enclosing function, for checking `return` statements.
struct FunctionFrame<'a> {
    name: &'a str,
    result: ValueType,
}

/// Exact-type checks for declarations, assignments, calls, conditions and
/// returns.
#[derive(Default)]
pub struct CheckTypesPass<'a> {
    functions: Vec<FunctionFrame<'a>>,
}

impl<'a> CheckTypesPass<'a> {
    pub fn new() -> Self {
        CheckTypesPass {
            functions: Vec::new(),
        }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(mut self, program: &'a Program) -> Result<(), SemanticError> {
        for stmt in &program.statements {
            self.visit_stmt(stmt)?;
        }
        tracing::debug!("types checked");
        Ok(())
    }

    fn visit_block(&mut self, block: &'a Block) -> Result<(), SemanticError> {
        for stmt in &block.statements {
            self.visit_stmt(stmt)?;
        }
        Ok(())
    }

    fn visit_function(&mut self, decl: &'a FunctionDecl) -> Result<(), SemanticError> {
        let result = decl.symbol.get().result;
        self.functions.push(FunctionFrame {
            name: &decl.name,
            result,
        });
        let checked = self.visit_block(&decl.body);
        self.functions.pop();
        checked?;

        let span = decl.body.last().map_or(decl.body.span, |stmt| stmt.span);
        match (result, decl.body.last().map(|stmt| &stmt.kind)) {
            (_, Some(StmtKind::Return(Some(_))))
            | (ValueType::Void, Some(StmtKind::Return(None))) => Ok(()),
            (ValueType::Void, _) => Err(SemanticError::type_error(
                format!("function `{}` must end with `return;`", decl.name),
                span,
            )),
            _ => Err(SemanticError::type_error(
                format!(
                    "function `{}` must end with a `return` of type `{result}`",
                    decl.name
                ),
                span,
            )),
        }
    }

    fn visit_return(&mut self, value: Option<&'a Expr>, stmt: &Stmt) -> Result<(), SemanticError> {
        if let Some(expr) = value {
            self.visit_expr(expr)?;
        }
        let Some(frame) = self.functions.last() else {
            return Ok(());
        };
        match (frame.result, value) {
            (ValueType::Void, None) => Ok(()),
            (ValueType::Void, Some(expr)) if expr.ty.value() == ValueType::Void => Ok(()),
            (ValueType::Void, Some(expr)) => Err(SemanticError::type_error(
                format!(
                    "function `{}` has no return type, but returns a value of type `{}`",
                    frame.name,
                    expr.ty.value()
                ),
                expr.span,
            )),
            (expected, None) => Err(SemanticError::type_mismatch(
                "return",
                expected,
                ValueType::Void,
                stmt.span,
            )),
            (expected, Some(expr)) => expect_type("return", expr, expected),
        }
    }

    fn visit_var_decl(&mut self, decl: &'a VarDecl) -> Result<(), SemanticError> {
        self.visit_expr(&decl.init)?;
        let inferred = decl.init.ty.value();
        if inferred == ValueType::Void {
            return Err(SemanticError::type_error(
                format!("cannot initialize `{}` from an expression without a value", decl.name),
                decl.init.span,
            ));
        }
        match decl.declared_ty.try_get() {
            Some(&declared) if !declared.is_exact(inferred) => Err(SemanticError::type_mismatch(
                "variable initialization",
                declared,
                inferred,
                decl.init.span,
            )),
            None if inferred == ValueType::Nil => Err(SemanticError::type_error(
                format!("type of `{}` cannot be inferred from `nil`", decl.name),
                decl.init.span,
            )),
            _ => Ok(()),
        }
    }

    fn visit_stmt(&mut self, stmt: &'a Stmt) -> Result<(), SemanticError> {
        ensure_sufficient_stack(|| self.visit_stmt_inner(stmt))
    }

    fn visit_stmt_inner(&mut self, stmt: &'a Stmt) -> Result<(), SemanticError> {
        match &stmt.kind {
            StmtKind::Expr(expr) => self.visit_expr(expr),
            StmtKind::Let(decl) => self.visit_var_decl(decl),
            StmtKind::Function(decl) => self.visit_function(decl),
            StmtKind::Block(block) => self.visit_block(block),
            StmtKind::If(stmt) => {
                self.visit_expr(&stmt.condition)?;
                expect_type("`if` condition", &stmt.condition, ValueType::Int)?;
                self.visit_block(&stmt.then_branch)?;
                match &stmt.else_branch {
                    Some(block) => self.visit_block(block),
                    None => Ok(()),
                }
            }
            StmtKind::While(stmt) => {
                self.visit_expr(&stmt.condition)?;
                expect_type("`while` condition", &stmt.condition, ValueType::Int)?;
                self.visit_block(&stmt.body)
            }
            StmtKind::For(stmt) => {
                match &stmt.init {
                    ForInit::Let(decl) => {
                        self.visit_var_decl(decl)?;
                        expect_type("`for` start value", &decl.init, ValueType::Int)?;
                    }
                    ForInit::Assign(expr) => {
                        self.visit_expr(expr)?;
                        if let ExprKind::Assign { target, .. } = &expr.kind {
                            expect_type("`for` start value", target, ValueType::Int)?;
                        }
                    }
                }
                self.visit_expr(&stmt.condition)?;
                expect_type("`for` condition", &stmt.condition, ValueType::Int)?;
                self.visit_expr(&stmt.step)?;
                self.visit_block(&stmt.body)
            }
            StmtKind::Break | StmtKind::Continue => Ok(()),
            StmtKind::Return(value) => self.visit_return(value.as_ref(), stmt),
        }
    }

    fn visit_expr(&mut self, expr: &'a Expr) -> Result<(), SemanticError> {
        ensure_sufficient_stack(|| self.visit_expr_inner(expr))
    }

    fn visit_expr_inner(&mut self, expr: &'a Expr) -> Result<(), SemanticError> {
        match &expr.kind {
            ExprKind::Literal(_) | ExprKind::Variable(_) => Ok(()),
            ExprKind::Assign { target, value } => {
                self.visit_expr(target)?;
                self.visit_expr(value)?;
                expect_type("assignment", value, target.ty.value())
            }
            ExprKind::Binary { left, right, .. } => {
                self.visit_expr(left)?;
                self.visit_expr(right)
            }
            ExprKind::Unary { operand, .. } => self.visit_expr(operand),
            ExprKind::Call(call) => {
                for arg in &call.args {
                    self.visit_expr(arg)?;
                }
                check_arguments(call)
            }
        }
    }
}

fn expect_type(category: &str, expr: &Expr, expected: ValueType) -> Result<(), SemanticError> {
    let found = expr.ty.value();
    if expected.is_exact(found) {
        Ok(())
    } else {
        Err(SemanticError::type_mismatch(category, expected, found, expr.span))
    }
}

fn check_arguments(call: &CallExpr) -> Result<(), SemanticError> {
    match call.callee.get() {
        Callee::User(function) => {
            for (index, (arg, param)) in call.args.iter().zip(&function.params).enumerate() {
                let found = arg.ty.value();
                let expected = param.ty.value();
                if !expected.is_exact(found) {
                    return Err(SemanticError::type_mismatch(
                        &format!("argument #{} (`{}`) of `{}`", index + 1, param.name, call.name),
                        expected,
                        found,
                        arg.span,
                    ));
                }
            }
        }
        Callee::Native(signature) => {
            for (index, (arg, param)) in call.args.iter().zip(signature.params).enumerate() {
                let found = arg.ty.value();
                if !param.accepts(found) {
                    return Err(SemanticError::type_error(
                        format!(
                            "mismatched types in argument #{} (`{}`) of `{}`: expected `{}`, found `{found}`",
                            index + 1,
                            param.name,
                            call.name,
                            param.type_description(),
                        ),
                        arg.span,
                    ));
                }
            }
        }
    }
    Ok(())
}
