#![allow(clippy::unwrap_used)]

use pretty_assertions::assert_eq;

use super::*;
use crate::environment::{buffer_environment, scripted_environment};

fn find(name: &str) -> Option<&'static Builtin> {
    BUILTINS.iter().find(|builtin| builtin.signature.name == name)
}

fn call(name: &str, args: &[Value]) -> EvalResult {
    let env = buffer_environment();
    (find(name).unwrap().call)(args, &env)
}

fn call_err(name: &str, args: &[Value]) -> EvalErrorKind {
    match call(name, args) {
        Ok(value) => panic!("expected `{name}` to fail, got {value:?}"),
        Err(err) => err,
    }
}

#[test]
fn table_has_every_builtin_once() {
    let mut names: Vec<_> = signatures().map(|sig| sig.name).collect();
    assert_eq!(names.len(), 18);
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 18);
}

#[test]
fn signatures_match_declared_types() {
    let substr = find("substr").unwrap();
    assert_eq!(substr.signature.params.len(), 3);
    assert_eq!(substr.signature.result, ValueType::String);
    let print = find("print").unwrap();
    assert!(print.signature.params[0].accepts(ValueType::Int));
    assert!(print.signature.params[0].accepts(ValueType::Float));
    assert!(!print.signature.params[0].accepts(ValueType::String));
    assert!(find("missing").is_none());
}

#[test]
fn conversions() {
    assert_eq!(call("itos", &[Value::Int(-42)]).unwrap(), Value::from("-42"));
    assert_eq!(call("itof", &[Value::Int(3)]).unwrap(), Value::Float(3.0));
    assert_eq!(call("ftoi", &[Value::Float(3.99)]).unwrap(), Value::Int(3));
    assert_eq!(call("ftoi", &[Value::Float(-3.99)]).unwrap(), Value::Int(-3));
    assert_eq!(call("stoi", &[Value::from(" 17 ")]).unwrap(), Value::Int(17));
    assert_eq!(call("stof", &[Value::from("2.5")]).unwrap(), Value::Float(2.5));
}

#[test]
fn ftos_uses_fixed_precision() {
    let args = [Value::Float(12.3456), Value::Int(2)];
    assert_eq!(call("ftos", &args).unwrap().as_str(), Some("12.35"));
    let args = [Value::Float(2.0), Value::Int(0)];
    assert_eq!(call("ftos", &args).unwrap().as_str(), Some("2"));
}

#[test]
fn conversion_failures() {
    assert!(matches!(
        call_err("stoi", &[Value::from("abc")]),
        EvalErrorKind::NativeFailed { name: "stoi", .. }
    ));
    assert!(matches!(
        call_err("stof", &[Value::from("")]),
        EvalErrorKind::NativeFailed { name: "stof", .. }
    ));
    assert!(matches!(
        call_err("ftoi", &[Value::Float(f64::NAN)]),
        EvalErrorKind::NativeFailed { name: "ftoi", .. }
    ));
    assert!(matches!(
        call_err("ftoi", &[Value::Float(1e300)]),
        EvalErrorKind::NativeFailed { name: "ftoi", .. }
    ));
    assert!(matches!(
        call_err("ftos", &[Value::Float(1.0), Value::Int(-1)]),
        EvalErrorKind::NativeFailed { name: "ftos", .. }
    ));
}

#[test]
fn strings() {
    let joined = call("sconcat", &[Value::from("ab"), Value::from("cd")]).unwrap();
    assert_eq!(joined.as_str(), Some("abcd"));
    assert_eq!(call("strlen", &[Value::from("héllo")]).unwrap(), Value::Int(5));
    let sub = call("substr", &[Value::from("héllo"), Value::Int(1), Value::Int(3)]).unwrap();
    assert_eq!(sub.as_str(), Some("éll"));
    let empty = call("substr", &[Value::from("abc"), Value::Int(3), Value::Int(0)]).unwrap();
    assert_eq!(empty.as_str(), Some(""));
}

#[test]
fn substr_out_of_range() {
    for (from, len) in [(2, 5), (-1, 1), (0, -1), (4, 0)] {
        let err = call_err("substr", &[Value::from("abc"), Value::Int(from), Value::Int(len)]);
        assert!(matches!(err, EvalErrorKind::NativeFailed { name: "substr", .. }));
    }
}

#[test]
fn math() {
    assert_eq!(call("abs", &[Value::Int(-5)]).unwrap(), Value::Int(5));
    assert_eq!(
        call_err("abs", &[Value::Int(i64::MIN)]),
        EvalErrorKind::IntegerOverflow("abs")
    );
    assert_eq!(call("sqrt", &[Value::Float(9.0)]).unwrap(), Value::Float(3.0));
    assert_eq!(call("pow", &[Value::Int(2), Value::Int(10)]).unwrap(), Value::Int(1024));
    assert_eq!(call("pow", &[Value::Int(2), Value::Int(-1)]).unwrap(), Value::Int(0));
    assert_eq!(call("min", &[Value::Int(2), Value::Int(-3)]).unwrap(), Value::Int(-3));
    assert_eq!(call("max", &[Value::Int(2), Value::Int(-3)]).unwrap(), Value::Int(2));
}

#[test]
fn print_family_writes_lines() {
    let env = buffer_environment();
    let run = |name: &str, args: &[Value]| (find(name).unwrap().call)(args, &env).unwrap();

    assert_eq!(run("print", &[Value::Int(7)]), Value::Void);
    run("print", &[Value::Float(2.5)]);
    run("print", &[Value::Float(3.0)]);
    run("prints", &[Value::from("hi")]);
    run("printf", &[Value::Float(1.0 / 3.0), Value::Int(3)]);

    assert_eq!(env.output(), vec!["7", "2.5", "3", "hi", "0.333"]);
}

#[test]
fn input_reads_scripted_lines() {
    let env = scripted_environment(["42"]);
    let input = find("input").unwrap().call;
    assert_eq!(input(&[], &env).unwrap().as_str(), Some("42"));
    assert_eq!(input(&[], &env), Err(EvalErrorKind::InputExhausted));
}

#[test]
fn wrong_argument_type_is_reported() {
    assert!(matches!(
        call_err("itos", &[Value::from("x")]),
        EvalErrorKind::TypeMismatch(_)
    ));
    assert!(matches!(call_err("itos", &[]), EvalErrorKind::TypeMismatch(_)));
}
