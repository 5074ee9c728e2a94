//! Native functions pre-declared in every program.
//!
//! Each entry pairs the typed signature seen by semantic analysis with the
//! implementation called by the evaluator. Arguments arrive already checked
//! against the signature; the argument accessors still report a
//! `TypeMismatch` instead of panicking if that ever fails.

use lu_ir::{NativeParam, NativeSignature, Value, ValueType};

use crate::environment::Environment;
use crate::error::{native_failed, EvalErrorKind, EvalResult};
use crate::operators::int_pow;

/// Implementation of a native function.
pub type NativeFn = fn(&[Value], &Environment) -> EvalResult;

/// A native function: signature plus implementation.
pub struct Builtin {
    pub signature: NativeSignature,
    pub call: NativeFn,
}

const INT: &[ValueType] = &[ValueType::Int];
const FLOAT: &[ValueType] = &[ValueType::Float];
const STR: &[ValueType] = &[ValueType::String];
const NUMBER: &[ValueType] = &[ValueType::Int, ValueType::Float];

const fn param(name: &'static str, accepts: &'static [ValueType]) -> NativeParam {
    NativeParam { name, accepts }
}

macro_rules! builtin {
    ($name:literal ($($param:expr),*) -> $result:ident = $call:expr) => {
        Builtin {
            signature: NativeSignature {
                name: $name,
                params: &[$($param),*],
                result: ValueType::$result,
            },
            call: $call,
        }
    };
}

pub static BUILTINS: [Builtin; 18] = [
    builtin!("itos"(param("i", INT)) -> String = itos),
    builtin!("ftos"(param("f", FLOAT), param("p", INT)) -> String = ftos),
    builtin!("ftoi"(param("f", FLOAT)) -> Int = ftoi),
    builtin!("itof"(param("i", INT)) -> Float = itof),
    builtin!("sconcat"(param("s1", STR), param("s2", STR)) -> String = sconcat),
    builtin!("strlen"(param("s", STR)) -> Int = strlen),
    builtin!("substr"(param("s", STR), param("from", INT), param("len", INT)) -> String = substr),
    builtin!("stoi"(param("s", STR)) -> Int = stoi),
    builtin!("stof"(param("s", STR)) -> Float = stof),
    builtin!("input"() -> String = input),
    builtin!("printf"(param("f", FLOAT), param("p", INT)) -> Void = printf),
    builtin!("prints"(param("s", STR)) -> Void = prints),
    builtin!("print"(param("n", NUMBER)) -> Void = print),
    builtin!("abs"(param("x", INT)) -> Int = abs),
    builtin!("sqrt"(param("x", FLOAT)) -> Float = sqrt),
    builtin!("pow"(param("x", INT), param("y", INT)) -> Int = pow),
    builtin!("min"(param("x", INT), param("y", INT)) -> Int = min),
    builtin!("max"(param("x", INT), param("y", INT)) -> Int = max),
];

/// Signatures of every built-in, for the semantic checker.
pub fn signatures() -> impl Iterator<Item = &'static NativeSignature> {
    BUILTINS.iter().map(|builtin| &builtin.signature)
}

// Argument accessors

fn arg(args: &[Value], index: usize) -> EvalResult<&Value> {
    args.get(index).ok_or_else(|| {
        EvalErrorKind::TypeMismatch(format!("missing argument {}", index + 1))
    })
}

fn int_arg(args: &[Value], index: usize) -> EvalResult<i64> {
    let value = arg(args, index)?;
    value.as_int().ok_or_else(|| expected("int", value))
}

fn float_arg(args: &[Value], index: usize) -> EvalResult<f64> {
    let value = arg(args, index)?;
    value.as_float().ok_or_else(|| expected("float", value))
}

fn str_arg(args: &[Value], index: usize) -> EvalResult<&str> {
    let value = arg(args, index)?;
    value.as_str().ok_or_else(|| expected("str", value))
}

#[cold]
fn expected(ty: &str, found: &Value) -> EvalErrorKind {
    EvalErrorKind::TypeMismatch(format!(
        "expected `{ty}` argument, found `{}`",
        found.value_type()
    ))
}

/// Fixed-point formatting shared by `ftos` and `printf`.
fn format_fixed(name: &'static str, value: f64, precision: i64) -> EvalResult<String> {
    let precision = usize::try_from(precision)
        .map_err(|_| native_failed(name, format!("negative precision {precision}")))?;
    Ok(format!("{value:.precision$}"))
}

// Conversions

fn itos(args: &[Value], _: &Environment) -> EvalResult {
    Ok(Value::from(int_arg(args, 0)?.to_string()))
}

fn ftos(args: &[Value], _: &Environment) -> EvalResult {
    let text = format_fixed("ftos", float_arg(args, 0)?, int_arg(args, 1)?)?;
    Ok(Value::from(text))
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "range checked before the cast"
)]
fn ftoi(args: &[Value], _: &Environment) -> EvalResult {
    let value = float_arg(args, 0)?.trunc();
    if !value.is_finite() || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(native_failed("ftoi", format!("{value} does not fit in an int")));
    }
    Ok(Value::Int(value as i64))
}

#[expect(clippy::cast_precision_loss, reason = "int to float conversion is the point")]
fn itof(args: &[Value], _: &Environment) -> EvalResult {
    Ok(Value::Float(int_arg(args, 0)? as f64))
}

fn stoi(args: &[Value], _: &Environment) -> EvalResult {
    let text = str_arg(args, 0)?;
    text.trim()
        .parse::<i64>()
        .map(Value::Int)
        .map_err(|err| native_failed("stoi", format!("cannot parse `{text}` as int: {err}")))
}

fn stof(args: &[Value], _: &Environment) -> EvalResult {
    let text = str_arg(args, 0)?;
    text.trim()
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|err| native_failed("stof", format!("cannot parse `{text}` as float: {err}")))
}

// Strings

fn sconcat(args: &[Value], _: &Environment) -> EvalResult {
    let mut joined = str_arg(args, 0)?.to_owned();
    joined.push_str(str_arg(args, 1)?);
    Ok(Value::from(joined))
}

fn strlen(args: &[Value], _: &Environment) -> EvalResult {
    let len = str_arg(args, 0)?.chars().count();
    i64::try_from(len)
        .map(Value::Int)
        .map_err(|_| EvalErrorKind::IntegerOverflow("strlen"))
}

/// `substr(s, from, len)`, counted in characters.
fn substr(args: &[Value], _: &Environment) -> EvalResult {
    let text = str_arg(args, 0)?;
    let from = int_arg(args, 1)?;
    let len = int_arg(args, 2)?;
    let char_count = text.chars().count();

    let range = usize::try_from(from).ok().zip(usize::try_from(len).ok());
    match range {
        Some((start, count)) if start.checked_add(count).is_some_and(|end| end <= char_count) => {
            Ok(Value::from(text.chars().skip(start).take(count).collect::<String>()))
        }
        _ => Err(native_failed(
            "substr",
            format!("range {from}..{from}+{len} is out of bounds for a string of length {char_count}"),
        )),
    }
}

// I/O

fn input(_: &[Value], env: &Environment) -> EvalResult {
    env.input().map(Value::from).ok_or(EvalErrorKind::InputExhausted)
}

fn printf(args: &[Value], env: &Environment) -> EvalResult {
    let text = format_fixed("printf", float_arg(args, 0)?, int_arg(args, 1)?)?;
    env.print(&text);
    Ok(Value::Void)
}

fn prints(args: &[Value], env: &Environment) -> EvalResult {
    env.print(str_arg(args, 0)?);
    Ok(Value::Void)
}

fn print(args: &[Value], env: &Environment) -> EvalResult {
    match arg(args, 0)? {
        value @ (Value::Int(_) | Value::Float(_)) => {
            env.print(&value.to_string());
            Ok(Value::Void)
        }
        other => Err(expected("int|float", other)),
    }
}

// Math

fn abs(args: &[Value], _: &Environment) -> EvalResult {
    int_arg(args, 0)?
        .checked_abs()
        .map(Value::Int)
        .ok_or(EvalErrorKind::IntegerOverflow("abs"))
}

fn sqrt(args: &[Value], _: &Environment) -> EvalResult {
    Ok(Value::Float(float_arg(args, 0)?.sqrt()))
}

fn pow(args: &[Value], _: &Environment) -> EvalResult {
    int_pow(int_arg(args, 0)?, int_arg(args, 1)?).map(Value::Int)
}

fn min(args: &[Value], _: &Environment) -> EvalResult {
    Ok(Value::Int(int_arg(args, 0)?.min(int_arg(args, 1)?)))
}

fn max(args: &[Value], _: &Environment) -> EvalResult {
    Ok(Value::Int(int_arg(args, 0)?.max(int_arg(args, 1)?)))
}

#[cfg(test)]
mod tests;
