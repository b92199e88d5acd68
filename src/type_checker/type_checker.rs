use tracing::{debug, instrument};

use crate::{
    ast::{
        ast::Expr,
        statements::{BlockStmt, Stmt},
        types::Type,
    },
    errors::diagnostics::Diagnostics,
};

use super::environment::{Environment, SymbolTable};

/// Settings for one run of the type checker.
#[derive(Debug, Clone, Default)]
pub struct TypeCheckOptions {
    /// Report `non_comparable` when `<`, `<=`, `>`, `>=` are applied to a
    /// left operand that is not a char, a string or a number. Off by default:
    /// such comparisons are accepted unchecked.
    pub strict_relational: bool,
}

/// The subroutine whose body is being analyzed.
#[derive(Debug, Clone, PartialEq)]
pub struct Subroutine {
    pub name: String,
    pub return_type: Option<Type>,
}

/// Everything a node needs while it is analyzed, threaded through the walk.
pub struct AnalysisContext<'a> {
    pub diagnostics: &'a mut Diagnostics,
    pub symbols: &'a dyn SymbolTable,
    pub subroutine: Option<&'a Subroutine>,
    pub in_loop: bool,
    pub options: &'a TypeCheckOptions,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        diagnostics: &'a mut Diagnostics,
        symbols: &'a dyn SymbolTable,
        options: &'a TypeCheckOptions,
    ) -> Self {
        AnalysisContext {
            diagnostics,
            symbols,
            subroutine: None,
            in_loop: false,
            options,
        }
    }

    pub fn with_subroutine(mut self, subroutine: Option<&'a Subroutine>) -> Self {
        self.subroutine = subroutine;
        self
    }

    pub fn with_in_loop(mut self, in_loop: bool) -> Self {
        self.in_loop = in_loop;
        self
    }
}

/// Where in the program a block is being checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockContext<'a> {
    pub subroutine: Option<&'a Subroutine>,
    pub in_loop: bool,
}

/// Analyzes a single expression against a symbol table.
pub fn type_check_expr(expr: &mut dyn Expr, symbols: &dyn SymbolTable, options: &TypeCheckOptions) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let mut ctx = AnalysisContext::new(&mut diagnostics, symbols, options);
    expr.analyze(&mut ctx);
    diagnostics
}

/// Analyzes every statement of a program's top-level block.
///
/// Variables are declared into the outermost scope of `environment` as they are
/// analyzed, so later statements can refer to them. Compilation should only
/// proceed if the returned diagnostics are empty.
#[instrument(skip_all, fields(statements = ast.body.len()))]
pub fn type_check(ast: &mut BlockStmt, environment: &mut Environment, options: &TypeCheckOptions) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    for stmt in ast.body.iter_mut() {
        type_check_stmt(stmt, environment, options, BlockContext::default(), &mut diagnostics);
    }

    debug!(errors = diagnostics.len(), "type check finished");
    diagnostics
}

/// Analyzes the body of `subroutine` in a scope of its own.
#[instrument(skip_all, fields(subroutine = %subroutine.name))]
pub fn type_check_subroutine(
    subroutine: &Subroutine,
    body: &mut BlockStmt,
    environment: &mut Environment,
    options: &TypeCheckOptions,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let block = BlockContext {
        subroutine: Some(subroutine),
        in_loop: false,
    };
    type_check_block(body, environment, options, block, &mut diagnostics);
    diagnostics
}

/// Analyzes a nested block in a fresh scope.
pub fn type_check_block(
    ast: &mut BlockStmt,
    environment: &mut Environment,
    options: &TypeCheckOptions,
    block: BlockContext,
    diagnostics: &mut Diagnostics,
) {
    environment.push_scope();
    for stmt in ast.body.iter_mut() {
        type_check_stmt(stmt, environment, options, block, diagnostics);
    }
    environment.pop_scope();
}

pub fn type_check_stmt(
    stmt: &mut Stmt,
    environment: &mut Environment,
    options: &TypeCheckOptions,
    block: BlockContext,
    diagnostics: &mut Diagnostics,
) {
    match stmt {
        Stmt::Expression(expression_stmt) => {
            let mut ctx = AnalysisContext::new(diagnostics, &*environment, options)
                .with_subroutine(block.subroutine)
                .with_in_loop(block.in_loop);
            expression_stmt.expression.analyze(&mut ctx);
            debug!(
                kind = ?expression_stmt.expression.get_expr_type(),
                ty = %expression_stmt.expression.get_type(),
                "expression statement analyzed"
            );
        }
        Stmt::Declaration(variable) => {
            let mut ctx = AnalysisContext::new(diagnostics, &*environment, options)
                .with_subroutine(block.subroutine)
                .with_in_loop(block.in_loop);
            variable.analyze(&mut ctx);

            if let Err(error) = environment.declare_variable(variable.to_symbol(), variable.span.start.clone()) {
                diagnostics.push(error);
            }
        }
        Stmt::Block(inner) => type_check_block(inner, environment, options, block, diagnostics),
    }
}
