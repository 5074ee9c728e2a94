//! Error codes for all Lu diagnostics.
//!
//! Each code is a unique identifier (e.g. `E1001`) whose first digit names
//! the phase that reported it.

use std::fmt;

/// Error codes for all diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E0xxx: Lexer errors
/// - E1xxx: Parser errors
/// - E2xxx: Semantic errors
/// - E6xxx: Runtime errors
/// - E9xxx: Internal errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Unterminated string literal
    E0001,
    /// Invalid character in source
    E0002,
    /// Invalid number literal
    E0003,
    /// Unterminated block comment
    E0004,
    /// Invalid escape sequence
    E0005,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Expected expression
    E1002,
    /// Expected identifier
    E1004,
    /// Expected type
    E1005,

    // Semantic Errors (E2xxx)
    /// Duplicate symbol in one scope
    E2001,
    /// Unknown symbol
    E2002,
    /// Symbol used as the wrong kind (function as variable or vice versa)
    E2003,
    /// Type error
    E2004,
    /// Statement or expression not allowed in this context
    E2005,
    /// Invalid assignment target
    E2006,
    /// Invalid function call
    E2007,

    // Runtime Errors (E6xxx)
    /// Undefined variable
    E6001,
    /// Undefined function
    E6002,
    /// Duplicate definition in one scope
    E6003,
    /// Division by zero
    E6004,
    /// Modulo by zero
    E6005,
    /// Integer overflow
    E6006,
    /// Operand type mismatch
    E6007,
    /// Function finished without `return`
    E6008,
    /// No more input
    E6009,
    /// Native function failed
    E6010,
    /// Call depth limit exceeded
    E6011,

    // Internal Errors (E9xxx)
    /// Internal interpreter error
    E9001,
}

impl ErrorCode {
    /// All error codes, in declaration order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E0005,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1004,
        ErrorCode::E1005,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
        ErrorCode::E6007,
        ErrorCode::E6008,
        ErrorCode::E6009,
        ErrorCode::E6010,
        ErrorCode::E6011,
        ErrorCode::E9001,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
            ErrorCode::E9001 => "E9001",
        }
    }

    /// One-line description shown by `lu explain`-style tooling.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "unterminated string literal",
            ErrorCode::E0002 => "invalid character",
            ErrorCode::E0003 => "invalid number literal",
            ErrorCode::E0004 => "unterminated block comment",
            ErrorCode::E0005 => "invalid escape sequence",
            ErrorCode::E1001 => "unexpected token",
            ErrorCode::E1002 => "expected expression",
            ErrorCode::E1004 => "expected identifier",
            ErrorCode::E1005 => "expected type",
            ErrorCode::E2001 => "duplicate symbol",
            ErrorCode::E2002 => "unknown symbol",
            ErrorCode::E2003 => "invalid symbol",
            ErrorCode::E2004 => "type error",
            ErrorCode::E2005 => "invalid expression",
            ErrorCode::E2006 => "invalid assignment",
            ErrorCode::E2007 => "invalid function call",
            ErrorCode::E6001 => "undefined variable",
            ErrorCode::E6002 => "undefined function",
            ErrorCode::E6003 => "duplicate definition",
            ErrorCode::E6004 => "division by zero",
            ErrorCode::E6005 => "modulo by zero",
            ErrorCode::E6006 => "integer overflow",
            ErrorCode::E6007 => "type mismatch",
            ErrorCode::E6008 => "missing return",
            ErrorCode::E6009 => "input exhausted",
            ErrorCode::E6010 => "native function failed",
            ErrorCode::E6011 => "stack overflow",
            ErrorCode::E9001 => "internal error",
        }
    }

    pub fn is_lexer_error(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    pub fn is_parser_error(&self) -> bool {
        self.as_str().starts_with("E1")
    }

    pub fn is_semantic_error(&self) -> bool {
        self.as_str().starts_with("E2")
    }

    pub fn is_runtime_error(&self) -> bool {
        self.as_str().starts_with("E6")
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
