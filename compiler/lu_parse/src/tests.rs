#![allow(clippy::unwrap_used)]

use lu_diagnostic::ErrorCode;
use lu_ir::{BinaryOp, Expr, ExprKind, ForInit, Program, StmtKind, UnaryOp, Value};
use pretty_assertions::assert_eq;

use crate::{parse, ParseError};

fn parse_source(source: &str) -> Program {
    let tokens = lu_lexer::lex(source).unwrap();
    parse(&tokens).unwrap()
}

fn parse_err(source: &str) -> ParseError {
    let tokens = lu_lexer::lex(source).unwrap();
    parse(&tokens).unwrap_err()
}

/// Parse `source;` and return the single expression.
fn parse_expr(source: &str) -> Expr {
    let program = parse_source(&format!("{source};"));
    assert_eq!(program.statements.len(), 1);
    match program.statements.into_iter().next().unwrap().kind {
        StmtKind::Expr(expr) => expr,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

/// Render an expression as a fully parenthesized string.
fn sexpr(expr: &Expr) -> String {
    match &expr.kind {
        ExprKind::Literal(Value::String(s)) => format!("{s:?}"),
        ExprKind::Literal(value) => value.to_string(),
        ExprKind::Variable(var) => var.name.clone(),
        ExprKind::Assign { target, value } => format!("({} = {})", sexpr(target), sexpr(value)),
        ExprKind::Binary { op, left, right } => {
            format!("({} {} {})", sexpr(left), op, sexpr(right))
        }
        ExprKind::Unary { op, operand } => {
            let symbol = match op {
                UnaryOp::Neg => "-",
                UnaryOp::Plus => "+",
                UnaryOp::Not => "!",
            };
            format!("({symbol}{})", sexpr(operand))
        }
        ExprKind::Call(call) => {
            let args: Vec<String> = call.args.iter().map(sexpr).collect();
            format!("{}({})", call.name, args.join(", "))
        }
    }
}

mod expressions {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_precedence_ladder() {
        assert_eq!(sexpr(&parse_expr("1 + 2 * 3")), "(1 + (2 * 3))");
        assert_eq!(sexpr(&parse_expr("1 * 2 + 3")), "((1 * 2) + 3)");
        assert_eq!(
            sexpr(&parse_expr("a || b && c == d < e + f * g ^ h")),
            "(a || (b && (c == (d < (e + (f * (g ^ h)))))))"
        );
    }

    #[test]
    fn test_left_associative_operators() {
        assert_eq!(sexpr(&parse_expr("10 - 4 - 3")), "((10 - 4) - 3)");
        assert_eq!(sexpr(&parse_expr("8 / 4 / 2")), "((8 / 4) / 2)");
        assert_eq!(sexpr(&parse_expr("a < b < c")), "((a < b) < c)");
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(sexpr(&parse_expr("2 ^ 3 ^ 2")), "(2 ^ (3 ^ 2))");
    }

    #[test]
    fn test_unary_binds_tighter_than_power() {
        assert_eq!(sexpr(&parse_expr("-2 ^ 2")), "((-2) ^ 2)");
        assert_eq!(sexpr(&parse_expr("!-x")), "(!(-x))");
    }

    #[test]
    fn test_assignment_is_right_associative() {
        assert_eq!(sexpr(&parse_expr("a = b = 3")), "(a = (b = 3))");
        assert_eq!(sexpr(&parse_expr("a = b + 1")), "(a = (b + 1))");
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let expr = parse_expr("(1 + 2) * 3");
        assert_eq!(sexpr(&expr), "((1 + 2) * 3)");
        assert_eq!(expr.span.start, 0);
        assert_eq!(expr.span.end, 11);
    }

    #[test]
    fn test_calls() {
        assert_eq!(sexpr(&parse_expr("input()")), "input()");
        assert_eq!(
            sexpr(&parse_expr("max(1, min(a, 2 + 3))")),
            "max(1, min(a, (2 + 3)))"
        );
    }

    #[test]
    fn test_literals() {
        assert_eq!(sexpr(&parse_expr("true")), "1");
        assert_eq!(sexpr(&parse_expr("false")), "0");
        assert_eq!(sexpr(&parse_expr("nil")), "nil");
        assert_eq!(sexpr(&parse_expr("\"hi\"")), "\"hi\"");
        assert_eq!(sexpr(&parse_expr("2.5")), "2.5");
    }

    #[test]
    fn test_binary_op_kinds() {
        let expr = parse_expr("a % b");
        match expr.kind {
            ExprKind::Binary { op, .. } => assert_eq!(op, BinaryOp::Mod),
            other => panic!("expected binary, got {other:?}"),
        }
    }
}

mod statements {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_let_with_and_without_annotation() {
        let program = parse_source("let x: int = 1; let y = 2.0;");
        let StmtKind::Let(x) = &program.statements[0].kind else {
            panic!("expected let");
        };
        assert_eq!(x.name, "x");
        assert_eq!(x.annotation.as_ref().map(|a| a.name.as_str()), Some("int"));

        let StmtKind::Let(y) = &program.statements[1].kind else {
            panic!("expected let");
        };
        assert_eq!(y.name, "y");
        assert!(y.annotation.is_none());
    }

    #[test]
    fn test_function_declaration() {
        let program = parse_source("fn add(a: int, b: float): float { return a + b; }");
        let StmtKind::Function(func) = &program.statements[0].kind else {
            panic!("expected function");
        };
        assert_eq!(func.name, "add");
        let params: Vec<(&str, &str)> = func
            .params
            .iter()
            .map(|p| (p.name.as_str(), p.annotation.name.as_str()))
            .collect();
        assert_eq!(params, vec![("a", "int"), ("b", "float")]);
        assert_eq!(
            func.return_annotation.as_ref().map(|a| a.name.as_str()),
            Some("float")
        );
        assert_eq!(func.body.statements.len(), 1);
    }

    #[test]
    fn test_function_ids_are_distinct() {
        let program = parse_source("fn a() {} fn b() { fn c() {} }");
        let StmtKind::Function(a) = &program.statements[0].kind else {
            panic!("expected function");
        };
        let StmtKind::Function(b) = &program.statements[1].kind else {
            panic!("expected function");
        };
        let StmtKind::Function(c) = &b.body.statements[0].kind else {
            panic!("expected nested function");
        };
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_else_if_becomes_nested_block() {
        let program = parse_source("if (a) { 1; } else if (b) { 2; } else { 3; }");
        let StmtKind::If(outer) = &program.statements[0].kind else {
            panic!("expected if");
        };
        let else_block = outer.else_branch.as_ref().unwrap();
        assert_eq!(else_block.statements.len(), 1);
        let StmtKind::If(inner) = &else_block.statements[0].kind else {
            panic!("expected nested if");
        };
        assert_eq!(sexpr(&inner.condition), "b");
        assert!(inner.else_branch.is_some());
    }

    #[test]
    fn test_while_and_control_statements() {
        let program = parse_source("while (1) { break; continue; return; return 4; }");
        let StmtKind::While(stmt) = &program.statements[0].kind else {
            panic!("expected while");
        };
        let kinds: Vec<&StmtKind> = stmt.body.statements.iter().map(|s| &s.kind).collect();
        assert!(matches!(kinds[0], StmtKind::Break));
        assert!(matches!(kinds[1], StmtKind::Continue));
        assert!(matches!(kinds[2], StmtKind::Return(None)));
        assert!(matches!(kinds[3], StmtKind::Return(Some(_))));
    }

    #[test]
    fn test_for_with_let_init() {
        let program = parse_source("for (let i = 0; i < 3; i = i + 1) { print(i); }");
        let StmtKind::For(stmt) = &program.statements[0].kind else {
            panic!("expected for");
        };
        assert!(matches!(&stmt.init, ForInit::Let(decl) if decl.name == "i"));
        assert_eq!(sexpr(&stmt.condition), "(i < 3)");
        assert_eq!(sexpr(&stmt.step), "(i = (i + 1))");
    }

    #[test]
    fn test_for_with_assignment_init() {
        let program = parse_source("let i = 5; for (i = 0; i < 3; i = i + 1) {}");
        let StmtKind::For(stmt) = &program.statements[1].kind else {
            panic!("expected for");
        };
        assert!(matches!(&stmt.init, ForInit::Assign(expr) if sexpr(expr) == "(i = 0)"));
    }

    #[test]
    fn test_nested_block_statement() {
        let program = parse_source("{ let a = 1; { a; } }");
        let StmtKind::Block(block) = &program.statements[0].kind else {
            panic!("expected block");
        };
        assert_eq!(block.statements.len(), 2);
        assert!(matches!(block.statements[1].kind, StmtKind::Block(_)));
    }

    #[test]
    fn test_statement_spans_cover_source() {
        let source = "let x = 1;";
        let program = parse_source(source);
        assert_eq!(program.statements[0].span.to_range(), 0..source.len());
    }

    #[test]
    fn test_empty_program() {
        let program = parse_source("  // nothing here\n");
        assert!(program.statements.is_empty());
    }
}

mod errors {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_missing_semicolon() {
        let err = parse_err("let x = 1");
        assert_eq!(err.code, ErrorCode::E1001);
        assert_eq!(err.message, "expected `;`, found end of file");
    }

    #[test]
    fn test_expected_expression() {
        let err = parse_err("let x = );");
        assert_eq!(err.code, ErrorCode::E1002);
        assert_eq!(err.message, "expected expression, found `)`");
    }

    #[test]
    fn test_expected_identifier() {
        let err = parse_err("fn (a: int) {}");
        assert_eq!(err.code, ErrorCode::E1004);
    }

    #[test]
    fn test_expected_type() {
        let err = parse_err("let x: 3 = 3;");
        assert_eq!(err.code, ErrorCode::E1005);
        assert_eq!(err.message, "expected type, found integer literal");
    }

    #[test]
    fn test_uninitialized_let() {
        let err = parse_err("let x;");
        assert_eq!(err.code, ErrorCode::E1001);
        assert!(err.help.is_some());
    }

    #[test]
    fn test_for_init_must_be_assignment() {
        let err = parse_err("for (i + 1; i < 3; i = i + 1) {}");
        assert_eq!(err.code, ErrorCode::E1001);
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_err("fn f() { let a = 1;");
        assert_eq!(err.code, ErrorCode::E1001);
        assert_eq!(err.message, "expected `}`, found end of file");
    }

    #[test]
    fn test_error_converts_to_diagnostic() {
        let err = parse_err("let = 1;");
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, ErrorCode::E1004);
        assert_eq!(diag.primary_span(), Some(err.span));
    }
}

#[test]
fn test_deeply_nested_parentheses() {
    let depth = 2_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(sexpr(&parse_expr(&source)), "1");
}
