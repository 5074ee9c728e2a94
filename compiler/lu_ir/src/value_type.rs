//! Nominal value types.

use std::fmt;

/// The closed set of types a Lu value can have.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    Int,
    Float,
    String,
    /// No value produced (statements, `void` functions).
    Void,
    /// Uninitialized value; the type of the `nil` literal.
    Nil,
}

impl ValueType {
    /// Name as written in source type annotations and messages.
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Int => "int",
            ValueType::Float => "float",
            ValueType::String => "str",
            ValueType::Void => "void",
            ValueType::Nil => "nil",
        }
    }

    #[inline]
    pub const fn is_numeric(self) -> bool {
        matches!(self, ValueType::Int | ValueType::Float)
    }

    /// Exact type equality: only `int`, `float` and `str` match themselves.
    ///
    /// `void` and `nil` never match anything, including themselves.
    pub const fn is_exact(self, other: ValueType) -> bool {
        matches!(
            (self, other),
            (ValueType::Int, ValueType::Int)
                | (ValueType::Float, ValueType::Float)
                | (ValueType::String, ValueType::String)
        )
    }

    /// Result of an arithmetic operation on two numeric operands.
    ///
    /// Returns `None` when either side is not numeric.
    pub const fn promote(self, other: ValueType) -> Option<ValueType> {
        match (self, other) {
            (ValueType::Int, ValueType::Int) => Some(ValueType::Int),
            (ValueType::Int | ValueType::Float, ValueType::Int | ValueType::Float) => {
                Some(ValueType::Float)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
