//! Integration tests for end-to-end semantic analysis.
//!
//! These tests verify that the complete pipeline works correctly, from a
//! hand-built tree with real source positions through type checking to the
//! rendered diagnostics.

use std::rc::Rc;

use pretty_assertions::assert_eq;
use semantic_analyzer::{
    ast::{
        ast::{Expr, ExprWrapper},
        expressions::{ArrayExpr, AssignmentExpr, BinaryExpr, IndexExpr, NumberExpr, PrefixExpr, StringExpr, SymbolExpr},
        statements::{BlockStmt, ExpressionStmt, Stmt, Variable},
        types::Type,
    },
    render_diagnostic,
    type_checker::{
        environment::Environment,
        type_checker::{type_check, type_check_subroutine, Subroutine, TypeCheckOptions},
    },
    Span,
};

fn file() -> Rc<String> {
    Rc::new("main.fire".to_string())
}

fn span(start: u32, end: u32) -> Span {
    Span::new(start, end, &file())
}

fn number(value: f64, start: u32, end: u32) -> ExprWrapper {
    ExprWrapper::new(NumberExpr::new(value, span(start, end)))
}

fn string(value: &str, start: u32, end: u32) -> ExprWrapper {
    ExprWrapper::new(StringExpr::new(value, span(start, end)))
}

fn symbol(name: &str, start: u32) -> ExprWrapper {
    ExprWrapper::new(SymbolExpr::new(name, span(start, start + name.len() as u32)))
}

fn binary(left: ExprWrapper, token: &str, right: ExprWrapper) -> ExprWrapper {
    let span = Span {
        start: left.get_span().start.clone(),
        end: right.get_span().end.clone(),
    };
    ExprWrapper::new(BinaryExpr::from_token(left, token, right, span).unwrap())
}

fn assign(assignee: ExprWrapper, value: ExprWrapper) -> Stmt {
    let span = Span {
        start: assignee.get_span().start.clone(),
        end: value.get_span().end.clone(),
    };
    Stmt::Expression(ExpressionStmt::new(ExprWrapper::new(AssignmentExpr::new(
        assignee, value, span,
    ))))
}

fn declare(name: &str, type_name: Option<&str>, initializer: Option<ExprWrapper>, start: u32, end: u32) -> Stmt {
    Stmt::Declaration(Variable::new(
        name,
        type_name.map(String::from),
        initializer,
        span(start, end),
    ))
}

#[test]
fn test_well_typed_program() {
    // let total = 1;
    // let names: []string = ["a", "b"];
    // total = total + #names[0];
    let names = ExprWrapper::new(ArrayExpr::new(vec![string("a", 38, 41), string("b", 43, 46)], span(37, 47)));
    let element = ExprWrapper::new(IndexExpr::new(symbol("names", 66), number(0.0, 72, 73), span(66, 74)));
    let length = ExprWrapper::new(PrefixExpr::from_token("#", element, span(65, 74)).unwrap());

    let mut ast = BlockStmt::new(
        vec![
            declare("total", None, Some(number(1.0, 12, 13)), 0, 14),
            declare("names", Some("[]string"), Some(names), 15, 48),
            assign(symbol("total", 49), binary(symbol("total", 57), "+", length)),
        ],
        span(0, 76),
    );
    let mut environment = Environment::new();

    let diagnostics = type_check(&mut ast, &mut environment, &TypeCheckOptions::default());

    assert!(diagnostics.is_empty(), "{:?}", diagnostics.keys());
    assert_eq!(
        environment.get_variable("names").map(|names| names.ty.clone()),
        Some(Type::array_of(Type::String))
    );
}

#[test]
fn test_render_reported_diagnostic() {
    let source = "let total = 1;\nlet name = \"n\";\ntotal = total + name;\n";
    let mut ast = BlockStmt::new(
        vec![
            declare("total", None, Some(number(1.0, 12, 13)), 0, 14),
            declare("name", None, Some(string("n", 26, 29)), 15, 30),
            assign(symbol("total", 31), binary(symbol("total", 39), "+", symbol("name", 47))),
        ],
        span(0, 52),
    );
    let mut environment = Environment::new();

    let diagnostics = type_check(&mut ast, &mut environment, &TypeCheckOptions::default());
    assert_eq!(diagnostics.keys(), vec!["non_arithmetic"]);

    let rendered = render_diagnostic(&diagnostics.get_errors()[0], "main.fire", source).unwrap();
    assert_eq!(
        rendered,
        "Error: NonArithmetic (Operator `+` expects a number, found `string`)\n\
         -> main.fire\n  |\n\
         3 | total = total + name;\n  | ----------------^"
    );
}

#[test]
fn test_every_error_is_reported_in_order() {
    // let a;
    // let b: number = "b";
    // c = a == b;
    let source = "let a;\nlet b: number = \"b\";\nc = a == b;\n";
    let mut ast = BlockStmt::new(
        vec![
            declare("a", None, None, 0, 6),
            declare("b", Some("number"), Some(string("b", 23, 26)), 7, 27),
            assign(symbol("c", 28), binary(symbol("a", 32), "==", symbol("b", 37))),
        ],
        span(0, 39),
    );
    let mut environment = Environment::new();

    let diagnostics = type_check(&mut ast, &mut environment, &TypeCheckOptions::default());

    assert_eq!(
        diagnostics.keys(),
        vec![
            "initializer_or_type_required",
            "variable_initialization_type_mismatch",
            "variable_not_declared"
        ]
    );

    let lines: Vec<usize> = diagnostics
        .iter()
        .map(|error| {
            let rendered = render_diagnostic(error, "main.fire", source).unwrap();
            rendered
                .lines()
                .nth(3)
                .and_then(|line| line.split(" | ").next())
                .and_then(|number| number.trim().parse().ok())
                .unwrap()
        })
        .collect();
    assert_eq!(lines, vec![1, 2, 3]);
}

#[test]
fn test_subroutine_body_is_checked_in_its_own_scope() {
    let mut environment = Environment::new();
    let mut program = BlockStmt::new(vec![declare("limit", None, Some(number(3.0, 12, 13)), 0, 14)], span(0, 14));
    assert!(type_check(&mut program, &mut environment, &TypeCheckOptions::default()).is_empty());

    let subroutine = Subroutine {
        name: "count".to_string(),
        return_type: Some(Type::Number),
    };
    let mut body = BlockStmt::new(
        vec![
            declare("step", Some("number"), Some(number(1.0, 0, 1)), 0, 1),
            assign(symbol("limit", 0), binary(symbol("limit", 0), "-", symbol("step", 0))),
            assign(symbol("step", 0), string("x", 0, 3)),
        ],
        span(0, 3),
    );

    let diagnostics = type_check_subroutine(&subroutine, &mut body, &mut environment, &TypeCheckOptions::default());

    assert_eq!(diagnostics.keys(), vec!["assignment_type_mismatch"]);
    assert!(environment.get_variable("step").is_none());
    assert!(environment.get_variable("limit").is_some());
}
