//! Statement and declaration parsing.

use std::rc::Rc;

use lu_diagnostic::ErrorCode;
use lu_ir::{
    Attribute, Block, Expr, ExprKind, ForInit, ForStmt, FunctionDecl, IfStmt, Param, Stmt, StmtKind,
    TokenKind, TypeAnnotation, VarDecl, WhileStmt,
};
use lu_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Stmt, ParseError> {
        let start = self.current_span();
        let kind = match self.current_kind() {
            TokenKind::Let => {
                self.advance();
                let decl = self.parse_var_decl()?;
                self.expect(&TokenKind::Semicolon)?;
                StmtKind::Let(decl)
            }
            TokenKind::Fn => StmtKind::Function(Rc::new(self.parse_function()?)),
            TokenKind::If => StmtKind::If(self.parse_if()?),
            TokenKind::While => {
                self.advance();
                let condition = self.parse_condition()?;
                let body = self.parse_block()?;
                StmtKind::While(WhileStmt { condition, body })
            }
            TokenKind::For => StmtKind::For(self.parse_for()?),
            TokenKind::Break => {
                self.advance();
                self.expect(&TokenKind::Semicolon)?;
                StmtKind::Break
            }
            TokenKind::Continue => {
                self.advance();
                self.expect(&TokenKind::Semicolon)?;
                StmtKind::Continue
            }
            TokenKind::Return => {
                self.advance();
                let value = if self.check(&TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.expect(&TokenKind::Semicolon)?;
                StmtKind::Return(value)
            }
            TokenKind::LBrace => StmtKind::Block(self.parse_block()?),
            _ => {
                let expr = self.parse_expr()?;
                self.expect(&TokenKind::Semicolon)?;
                StmtKind::Expr(expr)
            }
        };
        Ok(Stmt::new(kind, start.merge(self.previous_span())))
    }

    /// `{ statements }`
    pub(crate) fn parse_block(&mut self) -> Result<Block, ParseError> {
        let start = self.expect(&TokenKind::LBrace)?.span;
        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.is_at_end() {
                return Err(ParseError::new(
                    ErrorCode::E1001,
                    "expected `}`, found end of file",
                    self.current_span(),
                )
                .with_help("this block is never closed"));
            }
            statements.push(self.parse_statement()?);
        }
        let end = self.expect(&TokenKind::RBrace)?.span;
        Ok(Block::new(statements, start.merge(end)))
    }

    /// `( expr )` as used by `if` and `while`.
    fn parse_condition(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        Ok(condition)
    }

    /// `name [: type] = init`, after `let`.
    fn parse_var_decl(&mut self) -> Result<VarDecl, ParseError> {
        let (name, name_span) = self.expect_ident()?;
        let annotation = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        if !self.check(&TokenKind::Eq) {
            return Err(ParseError::unexpected(
                "`=`",
                self.current_kind(),
                self.current_span(),
            )
            .with_help(format!("variables must be initialized: `let {name} = ...;`")));
        }
        self.advance();
        let init = self.parse_expr()?;
        Ok(VarDecl::new(name, name_span, annotation, init))
    }

    fn parse_type(&mut self) -> Result<TypeAnnotation, ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let span = self.current_span();
                self.advance();
                Ok(TypeAnnotation {
                    name: name.clone(),
                    span,
                })
            }
            other => Err(ParseError::new(
                ErrorCode::E1005,
                format!("expected type, found {}", other.display_name()),
                self.current_span(),
            )),
        }
    }

    /// `fn name(params) [: type] { body }`
    fn parse_function(&mut self) -> Result<FunctionDecl, ParseError> {
        let start = self.expect(&TokenKind::Fn)?.span;
        let (name, name_span) = self.expect_ident()?;

        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let (param_name, param_span) = self.expect_ident()?;
                self.expect(&TokenKind::Colon)?;
                let annotation = self.parse_type()?;
                params.push(Param::new(param_name, param_span, annotation));
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;

        let return_annotation = if self.eat(&TokenKind::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };
        let body = self.parse_block()?;

        Ok(FunctionDecl {
            id: self.fresh_function_id(),
            name,
            name_span,
            params,
            return_annotation,
            span: start.merge(body.span),
            body,
            symbol: Attribute::new("function symbol"),
        })
    }

    /// `if (cond) block [else block | else if ...]`
    fn parse_if(&mut self) -> Result<IfStmt, ParseError> {
        self.expect(&TokenKind::If)?;
        let condition = self.parse_condition()?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.eat(&TokenKind::Else) {
            if self.check(&TokenKind::If) {
                // `else if` becomes an else block holding one `if`
                let nested = self.parse_statement()?;
                let span = nested.span;
                Some(Block::new(vec![nested], span))
            } else {
                Some(self.parse_block()?)
            }
        } else {
            None
        };

        Ok(IfStmt {
            condition,
            then_branch,
            else_branch,
        })
    }

    /// `for (init; condition; step) body`
    fn parse_for(&mut self) -> Result<ForStmt, ParseError> {
        self.expect(&TokenKind::For)?;
        self.expect(&TokenKind::LParen)?;

        let init = if self.eat(&TokenKind::Let) {
            ForInit::Let(self.parse_var_decl()?)
        } else {
            let expr = self.parse_expr()?;
            if !matches!(expr.kind, ExprKind::Assign { .. }) {
                return Err(ParseError::new(
                    ErrorCode::E1001,
                    "expected a `let` declaration or an assignment in `for` header",
                    expr.span,
                ));
            }
            ForInit::Assign(expr)
        };
        self.expect(&TokenKind::Semicolon)?;
        let condition = self.parse_expr()?;
        self.expect(&TokenKind::Semicolon)?;
        let step = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_block()?;

        Ok(ForStmt {
            init,
            condition,
            step,
            body,
        })
    }
}
