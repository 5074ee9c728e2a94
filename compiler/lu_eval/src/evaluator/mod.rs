//! Tree-walking evaluator.
//!
//! Expressions push their result onto a single operand stack; statements
//! return a [`ControlFlow`] that carries `break`, `continue` and `return`
//! up to the loop or call that handles them. Every expression pushes exactly
//! one value, so the stack is empty between statements.

mod call;
mod scope_guard;
mod stmt;

use lu_ir::{BinaryOp, Expr, ExprKind, NativeSignature, Program, Span, Value};
use lu_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;

use crate::builtins::{self, NativeFn};
use crate::call_stack::CallStack;
use crate::config::InterpreterConfig;
use crate::context::Context;
use crate::environment::SharedEnvironment;
use crate::error::{internal, EvalError, EvalErrorKind};
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;

pub use scope_guard::ScopedEvaluator;

/// Outcome of executing a statement.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlFlow {
    /// Normal completion with the statement's value.
    Continue(Value),
    Break,
    /// `continue`: skip to the next loop iteration.
    ContinueLoop,
    Return(Value),
}

/// Executes checked programs.
///
/// The evaluator reads attributes set by semantic analysis; evaluating an
/// unchecked program panics on the first unset attribute.
pub struct Evaluator {
    context: Context,
    stack: Vec<Value>,
    env: SharedEnvironment,
    natives: FxHashMap<&'static str, NativeFn>,
    call_stack: CallStack,
}

impl Evaluator {
    /// Evaluator with every built-in function available.
    pub fn new(env: SharedEnvironment, config: &InterpreterConfig) -> Self {
        Evaluator {
            context: Context::new(),
            stack: Vec::new(),
            env,
            natives: builtins::BUILTINS
                .iter()
                .map(|builtin| (builtin.signature.name, builtin.call))
                .collect(),
            call_stack: CallStack::new(config.max_call_depth),
        }
    }

    /// Signatures the semantic checker must know about for programs run by
    /// this evaluator.
    pub fn native_signatures() -> impl Iterator<Item = &'static NativeSignature> {
        builtins::signatures()
    }

    pub fn environment(&self) -> &SharedEnvironment {
        &self.env
    }

    #[cfg(test)]
    pub(crate) fn context(&self) -> &Context {
        &self.context
    }

    /// Run a program; its value is the value of the last top-level statement.
    ///
    /// Each call starts from an empty global scope.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.statements.len()))]
    pub fn evaluate(&mut self, program: &Program) -> Result<Value, EvalError> {
        if !self.stack.is_empty() {
            return Err(internal("operand stack is not empty before evaluation").at(program.span));
        }
        self.context = Context::new();
        let result = self.evaluate_program(program);
        if result.is_err() {
            self.stack.clear();
        }
        result
    }

    fn evaluate_program(&mut self, program: &Program) -> Result<Value, EvalError> {
        let mut last = Value::Void;
        for stmt in &program.statements {
            match self.exec_stmt(stmt)? {
                ControlFlow::Continue(value) => last = value,
                signal => {
                    return Err(internal(format!("`{signal:?}` escaped to the top level"))
                        .at(stmt.span));
                }
            }
        }

        self.stack.push(last);
        if self.stack.len() != 1 {
            return Err(internal(format!(
                "operand stack holds {} values after evaluation",
                self.stack.len()
            ))
            .at(program.span));
        }
        let value = self.pop(program.span)?;
        tracing::debug!(%value, "program evaluated");
        Ok(value)
    }

    #[inline]
    fn pop(&mut self, span: Span) -> Result<Value, EvalError> {
        self.stack
            .pop()
            .ok_or_else(|| internal("operand stack underflow").at(span))
    }

    /// Evaluate an expression and take its value off the stack.
    fn eval_value(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        self.eval_expr(expr)?;
        self.pop(expr.span)
    }

    /// Evaluate a condition; nonzero is true.
    fn eval_condition(&mut self, expr: &Expr) -> Result<bool, EvalError> {
        match self.eval_value(expr)? {
            Value::Int(n) => Ok(n != 0),
            other => Err(EvalErrorKind::TypeMismatch(format!(
                "condition must be `int`, found `{}`",
                other.value_type()
            ))
            .at(expr.span)),
        }
    }

    /// Evaluate an expression, pushing exactly one value.
    fn eval_expr(&mut self, expr: &Expr) -> Result<(), EvalError> {
        ensure_sufficient_stack(|| self.eval_expr_inner(expr))
    }

    fn eval_expr_inner(&mut self, expr: &Expr) -> Result<(), EvalError> {
        let value = match &expr.kind {
            ExprKind::Literal(value) => value.clone(),
            ExprKind::Variable(var) => self
                .context
                .get_value(&var.name)
                .map_err(|kind| kind.at(expr.span))?,
            ExprKind::Assign { target, value } => {
                let ExprKind::Variable(var) = &target.kind else {
                    return Err(internal("assignment target is not a variable").at(target.span));
                };
                self.eval_expr(value)?;
                let assigned = self
                    .stack
                    .last()
                    .cloned()
                    .ok_or_else(|| internal("operand stack underflow").at(value.span))?;
                return self
                    .context
                    .assign_variable(&var.name, assigned)
                    .map_err(|kind| kind.at(expr.span));
            }
            ExprKind::Binary { op, left, right } if op.is_logical() => {
                self.eval_short_circuit(*op, left, right)?
            }
            ExprKind::Binary { op, left, right } => {
                self.eval_expr(left)?;
                self.eval_expr(right)?;
                let rhs = self.pop(right.span)?;
                let lhs = self.pop(left.span)?;
                evaluate_binary(lhs, rhs, *op).map_err(|kind| kind.at(expr.span))?
            }
            ExprKind::Unary { op, operand } => {
                let value = self.eval_value(operand)?;
                evaluate_unary(*op, value).map_err(|kind| kind.at(expr.span))?
            }
            ExprKind::Call(call) => self.eval_call(call, expr.span)?,
        };
        self.stack.push(value);
        Ok(())
    }

    /// `&&`/`||`: the right operand is skipped once the left decides.
    fn eval_short_circuit(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<Value, EvalError> {
        let lhs = self.eval_condition(left)?;
        let decided = match op {
            BinaryOp::And => (!lhs).then_some(false),
            _ => lhs.then_some(true),
        };
        let result = match decided {
            Some(result) => result,
            None => self.eval_condition(right)?,
        };
        Ok(Value::from_bool(result))
    }
}
