//! Binds every name to its declaration.

use std::rc::Rc;

use lu_ir::{
    Block, Callee, Expr, ExprKind, ForInit, FunctionDecl, FunctionSymbol, Program, Stmt,
    StmtKind, ValueType, VarDecl, VariableKind, VariableSymbol,
};
use lu_stack::ensure_sufficient_stack;

use crate::symbols::SymbolScopes;
use crate::visit_queue::DeclarationVisitQueue;
use crate::SemanticError;

/// Fills `symbol`, `callee` and `declared_ty` attributes.
///
/// Functions are registered before their bodies are visited, so a function
/// can call itself, and a run of consecutive functions can call each other.
/// A `let` registers its name after its initializer, so `let x = x;` refers
/// to an outer `x`.
pub struct ResolveNamesPass {
    scopes: SymbolScopes,
    queue: DeclarationVisitQueue,
}

impl ResolveNamesPass {
    pub fn new(scopes: SymbolScopes) -> Self {
        ResolveNamesPass {
            scopes,
            queue: DeclarationVisitQueue::new(),
        }
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run(mut self, program: &Program) -> Result<(), SemanticError> {
        self.visit_statements(&program.statements)?;
        tracing::debug!("names resolved");
        Ok(())
    }

    /// Run `f` inside a fresh child table; the table is popped even when
    /// `f` fails.
    fn with_scope<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        self.scopes.push();
        let result = f(self);
        self.scopes.pop();
        result
    }

    fn visit_statements(&mut self, statements: &[Stmt]) -> Result<(), SemanticError> {
        for stmt in statements {
            if let StmtKind::Function(decl) = &stmt.kind {
                self.declare_function(decl)?;
                self.queue.enqueue(Rc::clone(decl));
            } else {
                self.flush_queue()?;
                self.visit_stmt(stmt)?;
            }
        }
        self.flush_queue()
    }

    fn flush_queue(&mut self) -> Result<(), SemanticError> {
        for decl in self.queue.take() {
            self.visit_function_body(&decl)?;
        }
        Ok(())
    }

    fn visit_block(&mut self, block: &Block) -> Result<(), SemanticError> {
        self.with_scope(|pass| {
            pass.visit_statements(&block.statements)?;
            debug_assert!(
                pass.queue.is_empty(),
                "leaving a block with {} queued function bodies",
                pass.queue.len()
            );
            Ok(())
        })
    }

    fn declare_function(&mut self, decl: &FunctionDecl) -> Result<(), SemanticError> {
        let mut params = Vec::with_capacity(decl.params.len());
        for param in &decl.params {
            let ty = self.scopes.resolve_type(&param.annotation)?;
            let symbol = Rc::new(VariableSymbol::new(
                &param.name,
                param.span,
                VariableKind::Parameter,
            ));
            symbol.ty.set(ty);
            param.symbol.set(Rc::clone(&symbol));
            params.push(symbol);
        }

        let result = match &decl.return_annotation {
            Some(annotation) => self.scopes.resolve_type(annotation)?,
            None => ValueType::Void,
        };

        let symbol = Rc::new(FunctionSymbol {
            id: decl.id,
            name: decl.name.clone(),
            span: decl.name_span,
            params,
            result,
        });
        decl.symbol.set(Rc::clone(&symbol));
        self.scopes
            .declare_function(Callee::User(symbol), decl.name_span)
    }

    fn visit_function_body(&mut self, decl: &FunctionDecl) -> Result<(), SemanticError> {
        self.with_scope(|pass| {
            for param in &decl.params {
                pass.scopes.declare_variable(Rc::clone(param.symbol.get()))?;
            }
            pass.visit_block(&decl.body)
        })
    }

    fn visit_var_decl(&mut self, decl: &VarDecl, kind: VariableKind) -> Result<(), SemanticError> {
        self.visit_expr(&decl.init)?;
        if let Some(annotation) = &decl.annotation {
            decl.declared_ty.set(self.scopes.resolve_type(annotation)?);
        }
        let symbol = Rc::new(VariableSymbol::new(&decl.name, decl.name_span, kind));
        decl.symbol.set(Rc::clone(&symbol));
        self.scopes.declare_variable(symbol)
    }

    fn visit_stmt(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        ensure_sufficient_stack(|| self.visit_stmt_inner(stmt))
    }

    fn visit_stmt_inner(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        match &stmt.kind {
            StmtKind::Expr(expr) => self.visit_expr(expr),
            StmtKind::Let(decl) => self.visit_var_decl(decl, VariableKind::Local),
            StmtKind::Function(decl) => {
                self.declare_function(decl)?;
                self.visit_function_body(decl)
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
            StmtKind::While(stmt) => {
                self.visit_expr(&stmt.condition)?;
                self.visit_block(&stmt.body)
            }
            StmtKind::For(stmt) => self.with_scope(|pass| {
                match &stmt.init {
                    ForInit::Let(decl) => pass.visit_var_decl(decl, VariableKind::Iterator)?,
                    ForInit::Assign(expr) => pass.visit_expr(expr)?,
                }
                pass.visit_expr(&stmt.condition)?;
                pass.visit_expr(&stmt.step)?;
                pass.visit_block(&stmt.body)
            }),
            StmtKind::Break | StmtKind::Continue | StmtKind::Return(None) => Ok(()),
            StmtKind::Return(Some(expr)) => self.visit_expr(expr),
        }
    }

    fn visit_expr(&mut self, expr: &Expr) -> Result<(), SemanticError> {
        ensure_sufficient_stack(|| self.visit_expr_inner(expr))
    }

    fn visit_expr_inner(&mut self, expr: &Expr) -> Result<(), SemanticError> {
        match &expr.kind {
            ExprKind::Literal(_) => Ok(()),
            ExprKind::Variable(var) => {
                var.symbol.set(self.scopes.variable(&var.name, expr.span)?);
                Ok(())
            }
            ExprKind::Assign { target, value } => {
                self.visit_expr(target)?;
                self.visit_expr(value)
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
                call.callee
                    .set(self.scopes.function(&call.name, call.name_span)?);
                Ok(())
            }
        }
    }
}
