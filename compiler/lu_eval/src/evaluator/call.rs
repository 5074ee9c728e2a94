//! Function calls.

use lu_ir::{CallExpr, Callee, FunctionDecl, FunctionSymbol, NativeSignature, Span, Value};
use smallvec::SmallVec;

use super::{ControlFlow, Evaluator};
use crate::call_stack::CallFrame;
use crate::context::FunctionRef;
use crate::error::{internal, EvalError, EvalErrorKind};

/// Call arguments; most calls take few.
type Args = SmallVec<[Value; 4]>;

impl Evaluator {
    pub(super) fn eval_call(&mut self, call: &CallExpr, span: Span) -> Result<Value, EvalError> {
        let args = self.eval_args(call, span)?;
        match call.callee.get() {
            Callee::Native(signature) => self.call_native(signature, &args, span),
            Callee::User(symbol) => self.call_user(symbol, args, span),
        }
    }

    /// Evaluate arguments left to right on the operand stack, then move them
    /// off it.
    fn eval_args(&mut self, call: &CallExpr, span: Span) -> Result<Args, EvalError> {
        for arg in &call.args {
            self.eval_expr(arg)?;
        }
        let start = self
            .stack
            .len()
            .checked_sub(call.args.len())
            .ok_or_else(|| internal("operand stack underflow in call arguments").at(span))?;
        Ok(self.stack.drain(start..).collect())
    }

    fn call_native(
        &self,
        signature: &NativeSignature,
        args: &[Value],
        span: Span,
    ) -> Result<Value, EvalError> {
        let native = *self
            .natives
            .get(signature.name)
            .ok_or_else(|| EvalErrorKind::UndefinedFunction(signature.name.to_owned()).at(span))?;
        tracing::trace!(name = signature.name, "call native");
        native(args, self.env.as_ref()).map_err(|kind| kind.at(span))
    }

    fn call_user(
        &mut self,
        symbol: &FunctionSymbol,
        args: Args,
        span: Span,
    ) -> Result<Value, EvalError> {
        let FunctionRef { decl, scope } = self
            .context
            .get_function(symbol.id, &symbol.name)
            .map_err(|kind| kind.at(span))?;
        self.call_stack
            .push(CallFrame {
                name: decl.name.clone(),
                call_span: span,
            })
            .map_err(|kind| kind.at(span))?;
        tracing::trace!(name = %decl.name, depth = self.call_stack.depth(), "call");

        let result = self
            .run_body(&decl, scope, args, span)
            .map_err(|err| err.with_backtrace(|| self.call_stack.backtrace()));
        self.call_stack.pop();
        result
    }

    /// Bind parameters by value in a new frame and run the body.
    fn run_body(
        &mut self,
        decl: &FunctionDecl,
        static_link: usize,
        args: Args,
        span: Span,
    ) -> Result<Value, EvalError> {
        let mut scoped = self.framed(static_link);
        if args.len() != decl.params.len() {
            return Err(internal(format!(
                "`{}` called with {} arguments, expected {}",
                decl.name,
                args.len(),
                decl.params.len()
            ))
            .at(span));
        }
        for (param, value) in decl.params.iter().zip(args) {
            scoped
                .context
                .define_variable(&param.name, value)
                .map_err(|kind| kind.at(param.span))?;
        }

        match scoped.exec_block(&decl.body)? {
            ControlFlow::Return(value) => Ok(value),
            ControlFlow::Continue(_) => {
                Err(EvalErrorKind::MissingReturn(decl.name.clone()).at(decl.name_span))
            }
            signal @ (ControlFlow::Break | ControlFlow::ContinueLoop) => Err(internal(format!(
                "`{signal:?}` escaped from function `{}`",
                decl.name
            ))
            .at(span)),
        }
    }
}
