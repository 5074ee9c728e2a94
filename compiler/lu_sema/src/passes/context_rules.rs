//! Context-sensitive rules the grammar cannot express.

use lu_ir::{Block, Expr, ExprKind, ForInit, Program, Stmt, StmtKind};
use lu_stack::ensure_sufficient_stack;

use crate::{SemanticError, SemanticErrorKind};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum ExpressionContext {
    Default,
    InsideLoop,
    InsideFunction,
}

/// Checks placement of `break`/`continue`/`return`, call arity and
/// assignment targets.
pub struct CheckContextRulesPass {
    contexts: Vec<ExpressionContext>,
}

impl Default for CheckContextRulesPass {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckContextRulesPass {
    pub fn new() -> Self {
        CheckContextRulesPass {
            contexts: vec![ExpressionContext::Default],
        }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(mut self, program: &Program) -> Result<(), SemanticError> {
        for stmt in &program.statements {
            self.visit_stmt(stmt)?;
        }
        tracing::debug!("context rules checked");
        Ok(())
    }

    fn with_context<T>(&mut self, context: ExpressionContext, f: impl FnOnce(&mut Self) -> T) -> T {
        self.contexts.push(context);
        let result = f(self);
        self.contexts.pop();
        result
    }

    fn innermost(&self) -> ExpressionContext {
        self.contexts
            .last()
            .copied()
            .unwrap_or(ExpressionContext::Default)
    }

    /// Nearest enclosing context that is not a loop.
    fn enclosing_non_loop(&self) -> ExpressionContext {
        self.contexts
            .iter()
            .rev()
            .copied()
            .find(|context| *context != ExpressionContext::InsideLoop)
            .unwrap_or(ExpressionContext::Default)
    }

    fn visit_block(&mut self, block: &Block) -> Result<(), SemanticError> {
        for stmt in &block.statements {
            self.visit_stmt(stmt)?;
        }
        Ok(())
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        ensure_sufficient_stack(|| self.visit_stmt_inner(stmt))
    }

    fn visit_stmt_inner(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        match &stmt.kind {
            StmtKind::Expr(expr) => self.visit_expr(expr),
            StmtKind::Let(decl) => self.visit_expr(&decl.init),
            StmtKind::Function(decl) => {
                self.with_context(ExpressionContext::InsideFunction, |pass| {
                    pass.visit_block(&decl.body)
                })
            }
            StmtKind::Block(block) => self.visit_block(block),
            StmtKind::If(stmt) => {
                self.visit_expr(&stmt.condition)?;
                self.visit_block(&stmt.then_branch)?;
                match &stmt.else_branch {
                    Some(block) => self.visit_block(block),
                    None => Ok(()),
                }
            }
            StmtKind::While(stmt) => self.with_context(ExpressionContext::InsideLoop, |pass| {
                pass.visit_expr(&stmt.condition)?;
                pass.visit_block(&stmt.body)
            }),
            StmtKind::For(stmt) => self.with_context(ExpressionContext::InsideLoop, |pass| {
                match &stmt.init {
                    ForInit::Let(decl) => pass.visit_expr(&decl.init)?,
                    ForInit::Assign(expr) => pass.visit_expr(expr)?,
                }
                pass.visit_expr(&stmt.condition)?;
                pass.visit_expr(&stmt.step)?;
                pass.visit_block(&stmt.body)
            }),
            StmtKind::Break => self.require_loop("break", stmt),
            StmtKind::Continue => self.require_loop("continue", stmt),
            StmtKind::Return(value) => {
                if let Some(expr) = value {
                    self.visit_expr(expr)?;
                }
                if self.enclosing_non_loop() == ExpressionContext::InsideFunction {
                    Ok(())
                } else {
                    Err(SemanticError::new(
                        SemanticErrorKind::InvalidExpression,
                        "`return` is only allowed inside a function",
                        stmt.span,
                    ))
                }
            }
        }
    }

    fn require_loop(&self, keyword: &str, stmt: &Stmt) -> Result<(), SemanticError> {
        if self.innermost() == ExpressionContext::InsideLoop {
            Ok(())
        } else {
            Err(SemanticError::new(
                SemanticErrorKind::InvalidExpression,
                format!("`{keyword}` is only allowed inside a loop"),
                stmt.span,
            ))
        }
    }

    fn visit_expr(&mut self, expr: &Expr) -> Result<(), SemanticError> {
        ensure_sufficient_stack(|| self.visit_expr_inner(expr))
    }

    fn visit_expr_inner(&mut self, expr: &Expr) -> Result<(), SemanticError> {
        match &expr.kind {
            ExprKind::Literal(_) | ExprKind::Variable(_) => Ok(()),
            ExprKind::Assign { target, value } => {
                self.visit_expr(target)?;
                self.visit_expr(value)?;
                if matches!(target.kind, ExprKind::Variable(_)) {
                    Ok(())
                } else {
                    Err(SemanticError::new(
                        SemanticErrorKind::InvalidAssignment,
                        "left side of an assignment must be a variable",
                        target.span,
                    ))
                }
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
                let callee = call.callee.get();
                let expected = callee.arity();
                if call.args.len() == expected {
                    Ok(())
                } else {
                    Err(SemanticError::new(
                        SemanticErrorKind::InvalidFunctionCall,
                        format!(
                            "function `{}` takes {expected} argument{}, but {} {} supplied",
                            callee.name(),
                            if expected == 1 { "" } else { "s" },
                            call.args.len(),
                            if call.args.len() == 1 { "was" } else { "were" },
                        ),
                        expr.span,
                    ))
                }
            }
        }
    }
}
