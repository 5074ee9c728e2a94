//! Expression parsing.

use lu_diagnostic::ErrorCode;
use lu_ir::{BinaryOp, CallExpr, Expr, ExprKind, TokenKind, Value};
use lu_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse an expression, including assignment.
    ///
    /// Uses `ensure_sufficient_stack` so deeply nested input cannot overflow.
    pub(crate) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_expr_inner())
    }

    fn parse_expr_inner(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_binary_or()?;

        // Right-associative: `a = b = c` is `a = (b = c)`
        if self.check(&TokenKind::Eq) {
            self.advance();
            let right = self.parse_expr()?;
            return Ok(Expr::assign(left, right));
        }

        Ok(left)
    }

    /// Parse || (lowest precedence binary).
    fn parse_binary_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_binary_and()?;
        while self.check(&TokenKind::PipePipe) {
            self.advance();
            let right = self.parse_binary_and()?;
            left = Expr::binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_binary_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_equality()?;
        while self.check(&TokenKind::AmpAmp) {
            self.advance();
            let right = self.parse_equality()?;
            left = Expr::binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_comparison()?;
        while let Some(op) = self.match_equality_op() {
            self.advance();
            let right = self.parse_comparison()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;
        while let Some(op) = self.match_comparison_op() {
            self.advance();
            let right = self.parse_additive()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.match_additive_op() {
            self.advance();
            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_power()?;
        while let Some(op) = self.match_multiplicative_op() {
            self.advance();
            let right = self.parse_power()?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    /// `^` is right-associative and binds looser than unary operators.
    fn parse_power(&mut self) -> Result<Expr, ParseError> {
        let base = self.parse_unary()?;
        if self.check(&TokenKind::Caret) {
            self.advance();
            let exponent = ensure_sufficient_stack(|| self.parse_power())?;
            return Ok(Expr::binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if let Some(op) = self.match_unary_op() {
            let start = self.current_span();
            self.advance();
            let operand = ensure_sufficient_stack(|| self.parse_unary())?;
            let span = start.merge(operand.span);
            return Ok(Expr::unary(op, operand, span));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.current_span();
        let value = match self.current_kind() {
            TokenKind::Int(n) => Value::Int(*n),
            TokenKind::Float(f) => Value::Float(*f),
            TokenKind::String(s) => Value::string(s.as_str()),
            TokenKind::True => Value::from_bool(true),
            TokenKind::False => Value::from_bool(false),
            TokenKind::Nil => Value::Nil,
            TokenKind::Ident(_) => return self.parse_name(),
            TokenKind::LParen => {
                self.advance();
                let mut inner = self.parse_expr()?;
                self.expect(&TokenKind::RParen)?;
                inner.span = span.merge(self.previous_span());
                return Ok(inner);
            }
            other => {
                return Err(ParseError::new(
                    ErrorCode::E1002,
                    format!("expected expression, found {}", other.display_name()),
                    span,
                ));
            }
        };
        self.advance();
        Ok(Expr::literal(value, span))
    }

    /// Variable reference or function call.
    fn parse_name(&mut self) -> Result<Expr, ParseError> {
        let (name, name_span) = self.expect_ident()?;
        if !self.check(&TokenKind::LParen) {
            return Ok(Expr::variable(name, name_span));
        }

        self.advance();
        let mut args = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                args.push(self.parse_expr()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;
        let span = name_span.merge(self.previous_span());
        Ok(Expr::new(
            ExprKind::Call(CallExpr::new(name, name_span, args)),
            span,
        ))
    }
}
