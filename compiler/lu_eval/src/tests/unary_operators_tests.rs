//! Tests for unary operator implementations.

use lu_ir::{UnaryOp, Value};

use crate::error::EvalErrorKind;
use crate::unary_operators::evaluate_unary;

mod negation {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn int() {
        assert_eq!(evaluate_unary(UnaryOp::Neg, Value::Int(5)).unwrap(), Value::Int(-5));
        assert_eq!(evaluate_unary(UnaryOp::Neg, Value::Int(-5)).unwrap(), Value::Int(5));
    }

    #[test]
    fn float() {
        assert_eq!(
            evaluate_unary(UnaryOp::Neg, Value::Float(2.5)).unwrap(),
            Value::Float(-2.5)
        );
    }

    #[test]
    fn int_min_overflows() {
        assert_eq!(
            evaluate_unary(UnaryOp::Neg, Value::Int(i64::MIN)),
            Err(EvalErrorKind::IntegerOverflow("negation"))
        );
    }
}

mod plus {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn is_identity() {
        assert_eq!(evaluate_unary(UnaryOp::Plus, Value::Int(-3)).unwrap(), Value::Int(-3));
        assert!(matches!(
            evaluate_unary(UnaryOp::Plus, Value::Float(1.5)).unwrap(),
            Value::Float(_)
        ));
    }
}

mod not {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn zero_is_true() {
        assert_eq!(evaluate_unary(UnaryOp::Not, Value::Int(0)).unwrap(), Value::Int(1));
    }

    #[test]
    fn nonzero_is_false() {
        for n in [1, -1, 42, i64::MAX] {
            assert_eq!(evaluate_unary(UnaryOp::Not, Value::Int(n)).unwrap(), Value::Int(0));
        }
    }
}

#[test]
fn invalid_operands() {
    for (op, value) in [
        (UnaryOp::Neg, Value::from("x")),
        (UnaryOp::Plus, Value::Nil),
        (UnaryOp::Not, Value::Float(0.0)),
    ] {
        assert!(matches!(evaluate_unary(op, value), Err(EvalErrorKind::TypeMismatch(_))));
    }
}
