//! Statement execution.

use std::rc::Rc;

use lu_ir::{Block, ForInit, ForStmt, IfStmt, Stmt, StmtKind, Value, VarDecl, WhileStmt};
use lu_stack::ensure_sufficient_stack;

use super::{ControlFlow, Evaluator};
use crate::error::EvalError;

type ExecResult = Result<ControlFlow, EvalError>;

impl Evaluator {
    pub(super) fn exec_stmt(&mut self, stmt: &Stmt) -> ExecResult {
        ensure_sufficient_stack(|| self.exec_stmt_inner(stmt))
    }

    fn exec_stmt_inner(&mut self, stmt: &Stmt) -> ExecResult {
        match &stmt.kind {
            StmtKind::Expr(expr) => Ok(ControlFlow::Continue(self.eval_value(expr)?)),
            StmtKind::Let(decl) => Ok(ControlFlow::Continue(self.exec_var_decl(decl)?)),
            StmtKind::Function(decl) => {
                tracing::trace!(name = %decl.name, "define function");
                self.context
                    .define_function(Rc::clone(decl))
                    .map_err(|kind| kind.at(decl.name_span))?;
                Ok(ControlFlow::Continue(Value::Void))
            }
            StmtKind::Block(block) => self.exec_block(block),
            StmtKind::If(if_stmt) => self.exec_if(if_stmt),
            StmtKind::While(while_stmt) => self.exec_while(while_stmt),
            StmtKind::For(for_stmt) => self.exec_for(for_stmt),
            StmtKind::Break => Ok(ControlFlow::Break),
            StmtKind::Continue => Ok(ControlFlow::ContinueLoop),
            StmtKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_value(expr)?,
                    None => Value::Void,
                };
                Ok(ControlFlow::Return(value))
            }
        }
    }

    /// Statements of a block in a fresh scope; the value is the last one's.
    pub(super) fn exec_block(&mut self, block: &Block) -> ExecResult {
        let mut scoped = self.scoped();
        let mut last = Value::Void;
        for stmt in &block.statements {
            match scoped.exec_stmt(stmt)? {
                ControlFlow::Continue(value) => last = value,
                signal => return Ok(signal),
            }
        }
        Ok(ControlFlow::Continue(last))
    }

    /// Bind a `let` in the current scope and return the initial value.
    fn exec_var_decl(&mut self, decl: &VarDecl) -> Result<Value, EvalError> {
        let value = self.eval_value(&decl.init)?;
        self.context
            .define_variable(&decl.name, value.clone())
            .map_err(|kind| kind.at(decl.name_span))?;
        Ok(value)
    }

    fn exec_if(&mut self, if_stmt: &IfStmt) -> ExecResult {
        if self.eval_condition(&if_stmt.condition)? {
            self.exec_block(&if_stmt.then_branch)
        } else if let Some(else_branch) = &if_stmt.else_branch {
            self.exec_block(else_branch)
        } else {
            Ok(ControlFlow::Continue(Value::Void))
        }
    }

    fn exec_while(&mut self, while_stmt: &WhileStmt) -> ExecResult {
        while self.eval_condition(&while_stmt.condition)? {
            match self.exec_block(&while_stmt.body)? {
                ControlFlow::Break => break,
                ControlFlow::Return(value) => return Ok(ControlFlow::Return(value)),
                ControlFlow::Continue(_) | ControlFlow::ContinueLoop => {}
            }
        }
        Ok(ControlFlow::Continue(Value::Void))
    }

    /// The header runs in its own scope; the step also runs after `continue`.
    fn exec_for(&mut self, for_stmt: &ForStmt) -> ExecResult {
        let mut scoped = self.scoped();
        match &for_stmt.init {
            ForInit::Let(decl) => {
                scoped.exec_var_decl(decl)?;
            }
            ForInit::Assign(expr) => {
                scoped.eval_value(expr)?;
            }
        }

        while scoped.eval_condition(&for_stmt.condition)? {
            match scoped.exec_block(&for_stmt.body)? {
                ControlFlow::Break => break,
                ControlFlow::Return(value) => return Ok(ControlFlow::Return(value)),
                ControlFlow::Continue(_) | ControlFlow::ContinueLoop => {}
            }
            scoped.eval_value(&for_stmt.step)?;
        }
        Ok(ControlFlow::Continue(Value::Void))
    }
}
