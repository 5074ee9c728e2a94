#![allow(clippy::unwrap_used)]

use std::rc::Rc;

use lu_ir::{
    Block, Callee, Expr, ExprKind, ForInit, NativeParam, NativeSignature, Program, Stmt,
    StmtKind, ValueType,
};

use crate::{SemanticError, SemanticErrorKind, SemanticsChecker, TypeMismatch};

const NUMBER: &[ValueType] = &[ValueType::Int, ValueType::Float];

static NATIVES: [NativeSignature; 4] = [
    NativeSignature {
        name: "print",
        params: &[NativeParam {
            name: "value",
            accepts: NUMBER,
        }],
        result: ValueType::Void,
    },
    NativeSignature {
        name: "prints",
        params: &[NativeParam {
            name: "value",
            accepts: &[ValueType::String],
        }],
        result: ValueType::Void,
    },
    NativeSignature {
        name: "itos",
        params: &[NativeParam {
            name: "value",
            accepts: &[ValueType::Int],
        }],
        result: ValueType::String,
    },
    NativeSignature {
        name: "input",
        params: &[],
        result: ValueType::String,
    },
];

fn parse(source: &str) -> Program {
    let tokens = lu_lexer::lex(source).unwrap();
    lu_parse::parse(&tokens).unwrap()
}

fn check(source: &str) -> Result<Program, SemanticError> {
    let program = parse(source);
    SemanticsChecker::new(&NATIVES).check(&program)?;
    Ok(program)
}

fn check_ok(source: &str) -> Program {
    match check(source) {
        Ok(program) => program,
        Err(err) => panic!("expected `{source}` to check, got {err:?}"),
    }
}

fn check_err(source: &str) -> SemanticError {
    match check(source) {
        Ok(_) => panic!("expected `{source}` to fail"),
        Err(err) => err,
    }
}

/// Type of the variable declared by the `index`th top-level `let`.
fn let_type(program: &Program, index: usize) -> ValueType {
    let decls: Vec<_> = program
        .statements
        .iter()
        .filter_map(|stmt| match &stmt.kind {
            StmtKind::Let(decl) => Some(decl),
            _ => None,
        })
        .collect();
    decls[index].symbol.get().ty.value()
}

mod names {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_self_recursion() {
        check_ok("fn f(n: int): int { if (n < 1) { return 0; } return f(n - 1); }");
    }

    #[test]
    fn test_mutual_recursion_between_consecutive_functions() {
        check_ok(
            "fn even(n: int): int { if (n == 0) { return 1; } return odd(n - 1); }
             fn odd(n: int): int { if (n == 0) { return 0; } return even(n - 1); }
             print(even(10));",
        );
    }

    #[test]
    fn test_mutual_recursion_across_a_statement_fails() {
        let err = check_err(
            "fn even(n: int): int { if (n == 0) { return 1; } return odd(n - 1); }
             print(1);
             fn odd(n: int): int { if (n == 0) { return 0; } return even(n - 1); }",
        );
        assert_eq!(err.kind, SemanticErrorKind::UnknownSymbol);
        assert!(err.message.contains("`odd`"));
    }

    #[test]
    fn test_inner_block_variable_is_invisible_outside() {
        let err = check_err("{ let a = 1; } print(a);");
        assert_eq!(err.kind, SemanticErrorKind::UnknownSymbol);
    }

    #[test]
    fn test_for_iterator_is_scoped_to_loop() {
        let err = check_err("for (let i = 0; i < 3; i = i + 1) { print(i); } print(i);");
        assert_eq!(err.kind, SemanticErrorKind::UnknownSymbol);
    }

    #[test]
    fn test_let_initializer_sees_outer_binding() {
        let program = check_ok("let x = 1; { let x = x + 1; print(x); }");
        let StmtKind::Let(outer) = &program.statements[0].kind else {
            panic!("expected let");
        };
        let StmtKind::Block(block) = &program.statements[1].kind else {
            panic!("expected block");
        };
        let StmtKind::Let(inner) = &block.statements[0].kind else {
            panic!("expected let");
        };
        let ExprKind::Binary { left, .. } = &inner.init.kind else {
            panic!("expected binary initializer");
        };
        let ExprKind::Variable(var) = &left.kind else {
            panic!("expected variable");
        };
        assert!(Rc::ptr_eq(var.symbol.get(), outer.symbol.get()));
        assert!(!Rc::ptr_eq(inner.symbol.get(), outer.symbol.get()));
    }

    #[test]
    fn test_let_cannot_reference_itself() {
        let err = check_err("let x = x;");
        assert_eq!(err.kind, SemanticErrorKind::UnknownSymbol);
    }

    #[test]
    fn test_duplicates_in_one_scope() {
        assert_eq!(
            check_err("let a = 1; let a = 2;").kind,
            SemanticErrorKind::DuplicateSymbol
        );
        assert_eq!(
            check_err("fn f(a: int, a: int) { return; }").kind,
            SemanticErrorKind::DuplicateSymbol
        );
        assert_eq!(
            check_err("let f = 1; fn f() { return; }").kind,
            SemanticErrorKind::DuplicateSymbol
        );
    }

    #[test]
    fn test_shadowing_in_nested_scope_is_allowed() {
        check_ok("let a = 1; { let a = \"s\"; prints(a); } print(a);");
    }

    #[test]
    fn test_unknown_type_annotation() {
        let err = check_err("let x: bool = 1;");
        assert_eq!(err.kind, SemanticErrorKind::UnknownSymbol);
        assert_eq!(err.message, "cannot find type `bool`");
    }

    #[test]
    fn test_wrong_symbol_kinds() {
        assert_eq!(
            check_err("let f = 1; f();").kind,
            SemanticErrorKind::InvalidSymbol
        );
        assert_eq!(
            check_err("fn f() { return; } let x = f;").kind,
            SemanticErrorKind::InvalidSymbol
        );
    }

    #[test]
    fn test_function_cannot_see_later_variables() {
        let err = check_err("fn f(): int { return g; } let g = 1;");
        assert_eq!(err.kind, SemanticErrorKind::UnknownSymbol);
    }

    #[test]
    fn test_nested_function_sees_enclosing_parameter() {
        check_ok("fn outer(a: int): int { fn inner(): int { return a; } return inner(); }");
    }

    #[test]
    fn test_calls_resolve_to_natives_and_user_functions() {
        let program = check_ok("fn twice(a: int): int { return a * 2; } print(twice(2));");
        let StmtKind::Expr(expr) = &program.statements[1].kind else {
            panic!("expected expression");
        };
        let ExprKind::Call(print) = &expr.kind else {
            panic!("expected call");
        };
        assert!(matches!(print.callee.get(), Callee::Native(sig) if sig.name == "print"));
        let ExprKind::Call(twice) = &print.args[0].kind else {
            panic!("expected call");
        };
        assert!(matches!(twice.callee.get(), Callee::User(sym) if sym.name == "twice"));
    }
}

mod context_rules {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_break_and_continue_outside_loop() {
        assert_eq!(check_err("break;").kind, SemanticErrorKind::InvalidExpression);
        assert_eq!(
            check_err("if (1) { continue; }").kind,
            SemanticErrorKind::InvalidExpression
        );
    }

    #[test]
    fn test_break_inside_function_inside_loop() {
        let err = check_err("while (1) { fn f() { break; } }");
        assert_eq!(err.kind, SemanticErrorKind::InvalidExpression);
    }

    #[test]
    fn test_return_outside_function() {
        assert_eq!(check_err("return 1;").kind, SemanticErrorKind::InvalidExpression);
        assert_eq!(
            check_err("while (1) { return; }").kind,
            SemanticErrorKind::InvalidExpression
        );
    }

    #[test]
    fn test_return_inside_loop_inside_function() {
        check_ok("fn f(): int { while (1) { return 1; } return 0; }");
    }

    #[test]
    fn test_wrong_argument_count() {
        let err = check_err("fn f(a: int): int { return a; } f(1, 2);");
        assert_eq!(err.kind, SemanticErrorKind::InvalidFunctionCall);
        assert_eq!(
            err.message,
            "function `f` takes 1 argument, but 2 were supplied"
        );
        assert_eq!(
            check_err("print();").kind,
            SemanticErrorKind::InvalidFunctionCall
        );
    }

    #[test]
    fn test_assignment_target_must_be_variable() {
        assert_eq!(check_err("1 = 2;").kind, SemanticErrorKind::InvalidAssignment);
        assert_eq!(
            check_err("let a = 1; (a + 1) = 2;").kind,
            SemanticErrorKind::InvalidAssignment
        );
    }
}

mod types {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_declared_type_must_match_exactly() {
        let err = check_err("let x: int = 1.0;");
        assert_eq!(err.kind, SemanticErrorKind::TypeError);
        assert_eq!(
            err.mismatch,
            Some(TypeMismatch {
                expected: ValueType::Int,
                found: ValueType::Float,
            })
        );
    }

    #[test]
    fn test_arithmetic_promotion() {
        let program = check_ok("let a = 1 + 2; let b = 1 + 2.0; let c = 2.0 ^ 3; let d = 7 % 2;");
        assert_eq!(let_type(&program, 0), ValueType::Int);
        assert_eq!(let_type(&program, 1), ValueType::Float);
        assert_eq!(let_type(&program, 2), ValueType::Float);
        assert_eq!(let_type(&program, 3), ValueType::Int);
    }

    #[test]
    fn test_comparisons_and_logic_yield_int() {
        let program =
            check_ok("let a = \"a\" < \"b\"; let b = 1 == 1.0; let c = 1 && 0; let d = !0;");
        for index in 0..4 {
            assert_eq!(let_type(&program, index), ValueType::Int);
        }
    }

    #[test]
    fn test_invalid_operand_types() {
        for source in [
            "let a = \"a\" + \"b\";",
            "let a = \"a\" == 1;",
            "let a = nil == nil;",
            "let a = 1.0 && 1;",
            "let a = !1.0;",
            "let a = -\"s\";",
        ] {
            assert_eq!(check_err(source).kind, SemanticErrorKind::TypeError, "{source}");
        }
    }

    #[test]
    fn test_variable_initializers() {
        assert_eq!(
            check_err("let v = prints(\"x\");").kind,
            SemanticErrorKind::TypeError
        );
        let err = check_err("let n = nil;");
        assert_eq!(err.kind, SemanticErrorKind::TypeError);
        assert_eq!(err.message, "type of `n` cannot be inferred from `nil`");
        assert_eq!(check_err("let n: int = nil;").kind, SemanticErrorKind::TypeError);
    }

    #[test]
    fn test_assignment_requires_exact_type() {
        let err = check_err("let a = 1; a = 2.0;");
        assert_eq!(err.kind, SemanticErrorKind::TypeError);
        check_ok("let a = 1.5; a = 2.0;");
    }

    #[test]
    fn test_conditions_must_be_int() {
        assert_eq!(check_err("if (1.0) { }").kind, SemanticErrorKind::TypeError);
        assert_eq!(check_err("while (\"s\") { }").kind, SemanticErrorKind::TypeError);
        assert_eq!(
            check_err("for (let i = 0; 1.5; i = i + 1) { }").kind,
            SemanticErrorKind::TypeError
        );
    }

    #[test]
    fn test_for_start_must_be_int() {
        assert_eq!(
            check_err("for (let i = 0.5; i < 3; i = i + 1) { }").kind,
            SemanticErrorKind::TypeError
        );
        assert_eq!(
            check_err("let f = 0.5; for (f = 0.0; f < 3; f = f + 1) { }").kind,
            SemanticErrorKind::TypeError
        );
        check_ok("let i = 9; for (i = 0; i < 3; i = i + 1) { }");
    }

    #[test]
    fn test_function_must_end_with_matching_return() {
        assert_eq!(
            check_err("fn f(): int { let a = 1; }").kind,
            SemanticErrorKind::TypeError
        );
        assert_eq!(
            check_err("fn f(): int { return 1.5; }").kind,
            SemanticErrorKind::TypeError
        );
        assert_eq!(check_err("fn f(): int { return; }").kind, SemanticErrorKind::TypeError);
    }

    #[test]
    fn test_every_return_must_match() {
        let err = check_err("fn f(a: int): int { if (a) { return \"s\"; } return 1; }");
        assert_eq!(err.kind, SemanticErrorKind::TypeError);
        assert_eq!(
            err.mismatch,
            Some(TypeMismatch {
                expected: ValueType::Int,
                found: ValueType::String,
            })
        );
    }

    #[test]
    fn test_void_function_cannot_return_a_value() {
        assert_eq!(
            check_err("fn f() { return 1; }").kind,
            SemanticErrorKind::TypeError
        );
        check_ok("fn f() { prints(\"x\"); return; }");
    }

    #[test]
    fn test_void_function_must_end_with_return() {
        let err = check_err("fn f() { prints(\"x\"); }");
        assert_eq!(err.kind, SemanticErrorKind::TypeError);
        assert_eq!(err.message, "function `f` must end with `return;`");
        assert_eq!(check_err("fn f() { }").kind, SemanticErrorKind::TypeError);
        check_ok("fn f() { return prints(\"x\"); }");
    }

    #[test]
    fn test_argument_types() {
        assert_eq!(
            check_err("fn f(a: float): float { return a; } f(1);").kind,
            SemanticErrorKind::TypeError
        );
        check_ok("print(1); print(2.5);");
        let err = check_err("print(\"s\");");
        assert_eq!(err.kind, SemanticErrorKind::TypeError);
        assert!(err.message.contains("expected `int|float`, found `str`"));
    }

    #[test]
    fn test_call_result_type() {
        let program = check_ok("fn f(): str { return \"a\"; } let s = f(); let n = input();");
        assert_eq!(let_type(&program, 0), ValueType::String);
        assert_eq!(let_type(&program, 1), ValueType::String);
    }

    #[test]
    fn test_error_converts_to_diagnostic() {
        let err = check_err("let x: int = 1.0;");
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, lu_diagnostic::ErrorCode::E2004);
        assert_eq!(diag.primary_span(), Some(err.span));
        assert_eq!(diag.notes, vec!["expected `int`, found `float`".to_owned()]);
    }
}

/// Every expression of a checked program has its result type, and every
/// name has its symbol.
mod decoration {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_expr(expr: &Expr) {
        assert!(expr.ty.is_set(), "untyped expression at {}", expr.span);
        match &expr.kind {
            ExprKind::Literal(_) => {}
            ExprKind::Variable(var) => assert!(var.symbol.is_set()),
            ExprKind::Assign { target, value } => {
                assert_expr(target);
                assert_expr(value);
            }
            ExprKind::Binary { left, right, .. } => {
                assert_expr(left);
                assert_expr(right);
            }
            ExprKind::Unary { operand, .. } => assert_expr(operand),
            ExprKind::Call(call) => {
                assert!(call.callee.is_set());
                call.args.iter().for_each(assert_expr);
            }
        }
    }

    fn assert_block(block: &Block) {
        block.statements.iter().for_each(assert_stmt);
    }

    fn assert_stmt(stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Expr(expr) | StmtKind::Return(Some(expr)) => assert_expr(expr),
            StmtKind::Let(decl) => {
                assert_expr(&decl.init);
                assert!(decl.symbol.get().ty.is_set());
            }
            StmtKind::Function(decl) => {
                assert!(decl.symbol.is_set());
                for param in &decl.params {
                    assert!(param.symbol.get().ty.is_set());
                }
                assert_block(&decl.body);
            }
            StmtKind::Block(block) => assert_block(block),
            StmtKind::If(stmt) => {
                assert_expr(&stmt.condition);
                assert_block(&stmt.then_branch);
                if let Some(block) = &stmt.else_branch {
                    assert_block(block);
                }
            }
            StmtKind::While(stmt) => {
                assert_expr(&stmt.condition);
                assert_block(&stmt.body);
            }
            StmtKind::For(stmt) => {
                match &stmt.init {
                    ForInit::Let(decl) => assert_eq!(decl.symbol.get().ty.value(), ValueType::Int),
                    ForInit::Assign(expr) => assert_expr(expr),
                }
                assert_expr(&stmt.condition);
                assert_expr(&stmt.step);
                assert_block(&stmt.body);
            }
            StmtKind::Break | StmtKind::Continue | StmtKind::Return(None) => {}
        }
    }

    #[test]
    fn test_fibonacci_is_fully_decorated() {
        let program = check_ok(
            "fn fibonacci(n: int): int {
                 let p1 = 1; let p2 = 0; let c = 0;
                 for (let i = 2; i <= n; i = i + 1) { c = p1 + p2; p2 = p1; p1 = c; }
                 return c;
             }
             print(fibonacci(10));",
        );
        program.statements.iter().for_each(assert_stmt);
    }

    #[test]
    fn test_mixed_program_is_fully_decorated() {
        let program = check_ok(
            "let x = 0;
             let name: str = input();
             fn greet(who: str) { prints(who); return; }
             while (x < 3) {
                 if (x == 1) { x = x + 1; continue; } else if (x > 5) { break; }
                 greet(itos(x));
                 x = x + 1;
             }",
        );
        program.statements.iter().for_each(assert_stmt);
    }
}
