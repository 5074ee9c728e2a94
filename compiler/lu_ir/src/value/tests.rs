use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_value_types() {
    assert_eq!(Value::Int(1).value_type(), ValueType::Int);
    assert_eq!(Value::Float(1.5).value_type(), ValueType::Float);
    assert_eq!(Value::string("a").value_type(), ValueType::String);
    assert_eq!(Value::Void.value_type(), ValueType::Void);
    assert_eq!(Value::Nil.value_type(), ValueType::Nil);
}

#[test]
fn test_float_tolerance_boundary() {
    assert_eq!(Value::Float(0.0), Value::Float(0.0009));
    assert_ne!(Value::Float(0.0), Value::Float(0.002));
}

#[test]
fn test_mixed_numeric_equality() {
    assert_eq!(Value::Int(3), Value::Float(3.0));
    assert_eq!(Value::Float(2.9995), Value::Int(3));
    assert_ne!(Value::Int(3), Value::Float(3.01));
}

#[test]
fn test_int_equality_is_exact() {
    assert_eq!(Value::Int(5), Value::Int(5));
    assert_ne!(Value::Int(5), Value::Int(6));
}

#[test]
fn test_strings_compare_by_content() {
    let a = Value::string(String::from("hello"));
    let b = Value::from("hello");
    assert_eq!(a, b);
    assert_ne!(a, Value::from("Hello"));
}

#[test]
fn test_void_and_nil() {
    assert_eq!(Value::Void, Value::Void);
    assert_eq!(Value::Nil, Value::Nil);
    assert_ne!(Value::Nil, Value::Void);
    assert_ne!(Value::Nil, Value::Int(0));
    assert_ne!(Value::Void, Value::Int(0));
}

#[test]
fn test_cross_category_unequal() {
    assert_ne!(Value::from("1"), Value::Int(1));
    assert_ne!(Value::Float(0.0), Value::Nil);
}

#[test]
fn test_display() {
    assert_eq!(Value::Int(-42).to_string(), "-42");
    assert_eq!(Value::Float(2.5).to_string(), "2.5");
    assert_eq!(Value::Float(3.0).to_string(), "3");
    assert_eq!(Value::from("text").to_string(), "text");
    assert_eq!(Value::Nil.to_string(), "nil");
}

#[test]
fn test_from_bool() {
    assert_eq!(Value::from_bool(true), Value::Int(1));
    assert_eq!(Value::from_bool(false), Value::Int(0));
}

proptest! {
    #[test]
    fn int_equals_itself_as_float(n in -1_000_000i64..1_000_000) {
        #[expect(clippy::cast_precision_loss, reason = "range fits in f64 mantissa")]
        let as_float = n as f64;
        prop_assert_eq!(Value::Int(n), Value::Float(as_float));
    }

    #[test]
    fn float_equality_is_symmetric(a in -1e6f64..1e6, b in -1e6f64..1e6) {
        prop_assert_eq!(Value::Float(a) == Value::Float(b), Value::Float(b) == Value::Float(a));
    }

    #[test]
    fn small_offsets_stay_equal(a in -1e6f64..1e6, d in 0.0f64..0.0009) {
        prop_assert_eq!(Value::Float(a), Value::Float(a + d));
    }
}
