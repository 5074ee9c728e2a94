//! Expression nodes.

use std::rc::Rc;

use crate::{Attribute, BinaryOp, Callee, Span, UnaryOp, Value, ValueType, VariableSymbol};

/// An expression with its source span and resolved type.
#[derive(Debug)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Filled by type resolution.
    pub ty: Attribute<ValueType>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr {
            kind,
            span,
            ty: Attribute::new("result type"),
        }
    }

    pub fn literal(value: Value, span: Span) -> Self {
        Expr::new(ExprKind::Literal(value), span)
    }

    pub fn variable(name: impl Into<String>, span: Span) -> Self {
        Expr::new(ExprKind::Variable(VariableRef::new(name)), span)
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        let span = left.span.merge(right.span);
        Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            span,
        )
    }

    pub fn unary(op: UnaryOp, operand: Expr, span: Span) -> Self {
        Expr::new(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
        )
    }

    pub fn assign(target: Expr, value: Expr) -> Self {
        let span = target.span.merge(value.span);
        Expr::new(
            ExprKind::Assign {
                target: Box::new(target),
                value: Box::new(value),
            },
            span,
        )
    }
}

#[derive(Debug)]
pub enum ExprKind {
    Literal(Value),
    Variable(VariableRef),
    /// `target = value`; only a bare variable is a valid target.
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Call(CallExpr),
}

/// A name used as a value.
#[derive(Debug)]
pub struct VariableRef {
    pub name: String,
    pub symbol: Attribute<Rc<VariableSymbol>>,
}

impl VariableRef {
    pub fn new(name: impl Into<String>) -> Self {
        VariableRef {
            name: name.into(),
            symbol: Attribute::new("variable declaration"),
        }
    }
}

/// `name(args...)`
#[derive(Debug)]
pub struct CallExpr {
    pub name: String,
    pub name_span: Span,
    pub args: Vec<Expr>,
    pub callee: Attribute<Callee>,
}

impl CallExpr {
    pub fn new(name: impl Into<String>, name_span: Span, args: Vec<Expr>) -> Self {
        CallExpr {
            name: name.into(),
            name_span,
            args,
            callee: Attribute::new("function declaration"),
        }
    }
}
