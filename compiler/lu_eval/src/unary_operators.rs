//! Unary operator implementations for the evaluator.

use lu_ir::{UnaryOp, Value};

use crate::error::{EvalErrorKind, EvalResult};

/// Evaluate a unary operation.
///
/// `!` maps zero to `1` and anything else to `0`.
pub fn evaluate_unary(op: UnaryOp, value: Value) -> EvalResult {
    match (op, &value) {
        (UnaryOp::Neg, Value::Int(n)) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or(EvalErrorKind::IntegerOverflow("negation")),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Plus, Value::Int(_) | Value::Float(_)) => Ok(value),
        (UnaryOp::Not, Value::Int(n)) => Ok(Value::from_bool(*n == 0)),
        _ => Err(invalid_unary_op(op, &value)),
    }
}

#[cold]
fn invalid_unary_op(op: UnaryOp, value: &Value) -> EvalErrorKind {
    EvalErrorKind::TypeMismatch(format!(
        "unary operation `{op}` is not supported for `{}`",
        value.value_type()
    ))
}
