//! Binary operator implementations for the evaluator.
//!
//! The operand types are a closed set, so dispatch is a single match on the
//! pair of values. Semantic analysis has already rejected invalid
//! combinations; reaching the mismatch arm means the AST was not checked.

use lu_ir::{nearly_equal, BinaryOp, Value};

use crate::error::{EvalErrorKind, EvalResult};

#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> EvalResult {
    result
        .map(Value::Int)
        .ok_or(EvalErrorKind::IntegerOverflow(op_name))
}

#[inline]
fn checked_div(a: i64, b: i64) -> EvalResult {
    if b == 0 {
        Err(EvalErrorKind::DivisionByZero)
    } else {
        checked_arith(a.checked_div(b), "division")
    }
}

#[inline]
fn checked_mod(a: i64, b: i64) -> EvalResult {
    if b == 0 {
        Err(EvalErrorKind::ModuloByZero)
    } else {
        checked_arith(a.checked_rem(b), "remainder")
    }
}

/// Integer exponentiation.
///
/// A negative exponent yields the real result truncated toward zero, which
/// is `0` for every base except `1` and `-1`; `0` to a negative power is a
/// division by zero.
pub(crate) fn int_pow(base: i64, exp: i64) -> EvalResult<i64> {
    let odd = exp % 2 != 0;
    match base {
        0 if exp < 0 => Err(EvalErrorKind::DivisionByZero),
        0 => Ok(i64::from(exp == 0)),
        1 => Ok(1),
        -1 => Ok(if odd { -1 } else { 1 }),
        _ if exp < 0 => Ok(0),
        _ => u32::try_from(exp)
            .ok()
            .and_then(|exp| base.checked_pow(exp))
            .ok_or(EvalErrorKind::IntegerOverflow("exponentiation")),
    }
}

/// Evaluate a binary operation on two already evaluated operands.
///
/// `&&` and `||` here are the strict forms; the evaluator short-circuits
/// before calling this.
#[expect(
    clippy::needless_pass_by_value,
    reason = "operands are popped off the value stack and owned by the caller"
)]
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> EvalResult {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => eval_int_binary(*a, *b, op),
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            match (left.as_number(), right.as_number()) {
                (Some(a), Some(b)) => eval_float_binary(a, b, op, &left, &right),
                _ => Err(binary_type_mismatch(&left, &right, op)),
            }
        }
        (Value::String(a), Value::String(b)) => eval_string_binary(a, b, op, &left, &right),
        _ if op.is_equality() => Ok(Value::from_bool((left == right) == (op == BinaryOp::Eq))),
        _ => Err(binary_type_mismatch(&left, &right, op)),
    }
}

fn eval_int_binary(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div => checked_div(a, b),
        BinaryOp::Mod => checked_mod(a, b),
        BinaryOp::Pow => int_pow(a, b).map(Value::Int),
        BinaryOp::Eq => Ok(Value::from_bool(a == b)),
        BinaryOp::NotEq => Ok(Value::from_bool(a != b)),
        BinaryOp::Lt => Ok(Value::from_bool(a < b)),
        BinaryOp::LtEq => Ok(Value::from_bool(a <= b)),
        BinaryOp::Gt => Ok(Value::from_bool(a > b)),
        BinaryOp::GtEq => Ok(Value::from_bool(a >= b)),
        BinaryOp::And => Ok(Value::from_bool(a != 0 && b != 0)),
        BinaryOp::Or => Ok(Value::from_bool(a != 0 || b != 0)),
    }
}

/// Float or mixed operands, both already promoted to `f64`.
fn eval_float_binary(a: f64, b: f64, op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Add => Ok(Value::Float(a + b)),
        BinaryOp::Sub => Ok(Value::Float(a - b)),
        BinaryOp::Mul => Ok(Value::Float(a * b)),
        BinaryOp::Div => Ok(Value::Float(a / b)),
        BinaryOp::Mod => Ok(Value::Float(a % b)),
        BinaryOp::Pow => Ok(Value::Float(a.powf(b))),
        BinaryOp::Eq => Ok(Value::from_bool(nearly_equal(a, b))),
        BinaryOp::NotEq => Ok(Value::from_bool(!nearly_equal(a, b))),
        BinaryOp::Lt => Ok(Value::from_bool(a < b)),
        BinaryOp::LtEq => Ok(Value::from_bool(a < b || nearly_equal(a, b))),
        BinaryOp::Gt => Ok(Value::from_bool(a > b)),
        BinaryOp::GtEq => Ok(Value::from_bool(a > b || nearly_equal(a, b))),
        BinaryOp::And | BinaryOp::Or => Err(binary_type_mismatch(left, right, op)),
    }
}

/// Strings compare by content, ordering is bytewise.
fn eval_string_binary(a: &str, b: &str, op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::from_bool(a == b)),
        BinaryOp::NotEq => Ok(Value::from_bool(a != b)),
        BinaryOp::Lt => Ok(Value::from_bool(a < b)),
        BinaryOp::LtEq => Ok(Value::from_bool(a <= b)),
        BinaryOp::Gt => Ok(Value::from_bool(a > b)),
        BinaryOp::GtEq => Ok(Value::from_bool(a >= b)),
        _ => Err(binary_type_mismatch(left, right, op)),
    }
}

#[cold]
fn binary_type_mismatch(left: &Value, right: &Value, op: BinaryOp) -> EvalErrorKind {
    EvalErrorKind::TypeMismatch(format!(
        "binary operation `{op}` is not supported for `{}` and `{}`",
        left.value_type(),
        right.value_type()
    ))
}
