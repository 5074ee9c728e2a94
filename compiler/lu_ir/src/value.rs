//! Runtime values.
//!
//! Values are small and cheap to clone: strings share their buffer through
//! `Rc<str>`, everything else is `Copy`-sized.

use std::fmt;
use std::rc::Rc;

use crate::ValueType;

/// Absolute tolerance used when comparing values involving a float.
pub const FLOAT_TOLERANCE: f64 = 0.001;

/// A Lu runtime value.
///
/// Equality follows the language rules rather than structural identity:
/// numbers compare across `Int`/`Float` with [`FLOAT_TOLERANCE`] whenever a
/// float is involved, strings compare by content, `Void` equals `Void` and
/// `Nil` equals only `Nil`. Because of the tolerance, equality is not
/// transitive and `Value` does not implement `Eq`.
#[derive(Clone, Debug)]
pub enum Value {
    Int(i64),
    Float(f64),
    String(Rc<str>),
    Void,
    Nil,
}

impl Value {
    /// Build a string value.
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Convert a boolean into the language's `1`/`0` truth value.
    #[inline]
    pub const fn from_bool(b: bool) -> Self {
        Value::Int(if b { 1 } else { 0 })
    }

    pub const fn value_type(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::String(_) => ValueType::String,
            Value::Void => ValueType::Void,
            Value::Nil => ValueType::Nil,
        }
    }

    #[inline]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Numeric view of the value, promoting `Int` to `f64`.
    #[inline]
    #[expect(clippy::cast_precision_loss, reason = "int to float promotion is a language rule")]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Tolerant float comparison shared by equality and `<=`/`>=`.
#[inline]
pub fn nearly_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < FLOAT_TOLERANCE
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Void, Value::Void) | (Value::Nil, Value::Nil) => true,
            (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
                match (self.as_number(), other.as_number()) {
                    (Some(a), Some(b)) => nearly_equal(a, b),
                    _ => false,
                }
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::Void => f.write_str("void"),
            Value::Nil => f.write_str("nil"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

#[cfg(test)]
mod tests;
