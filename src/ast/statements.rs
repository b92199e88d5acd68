use tracing::debug;

use crate::{
    errors::errors::{ErrorImpl, MismatchContext},
    type_checker::{environment::VariableSymbol, type_checker::AnalysisContext},
    Span,
};

use super::{
    ast::{analyzed, Expr, ExprWrapper},
    types::Type,
};

/// Names starting with this prefix declare constants.
pub const CONSTANT_PREFIX: &str = "_";

/// A block item.
#[derive(Debug)]
pub enum Stmt {
    Declaration(Variable),
    Expression(ExpressionStmt),
    Block(BlockStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Declaration(variable) => &variable.span,
            Stmt::Expression(expression) => &expression.span,
            Stmt::Block(block) => &block.span,
        }
    }
}

/// Expression Statement
/// An expression evaluated for its effect, such as an assignment.
#[derive(Debug)]
pub struct ExpressionStmt {
    pub expression: ExprWrapper,
    pub span: Span,
}

impl ExpressionStmt {
    pub fn new(expression: ExprWrapper) -> Self {
        let span = expression.get_span().clone();
        ExpressionStmt { expression, span }
    }
}

/// Block Statement
/// A sequence of statements with its own scope.
#[derive(Debug)]
pub struct BlockStmt {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl BlockStmt {
    pub fn new(body: Vec<Stmt>, span: Span) -> Self {
        BlockStmt { body, span }
    }
}

/// Variable Declaration
///
/// `type_name` and `initializer` are both optional, but at least one of them
/// is needed to give the variable a type.
#[derive(Debug)]
pub struct Variable {
    pub identifier: String,
    pub type_name: Option<String>,
    pub initializer: Option<ExprWrapper>,
    pub is_constant: bool,
    pub span: Span,
    ty: Option<Type>,
}

impl Variable {
    pub fn new(
        identifier: impl Into<String>,
        type_name: Option<String>,
        initializer: Option<ExprWrapper>,
        span: Span,
    ) -> Self {
        let identifier = identifier.into();
        Variable {
            is_constant: identifier.starts_with(CONSTANT_PREFIX),
            identifier,
            type_name,
            initializer,
            span,
            ty: None,
        }
    }

    /// Returns the type resolved by `analyze`.
    ///
    /// Panics if the declaration has not been analyzed yet.
    pub fn get_type(&self) -> &Type {
        analyzed(&self.ty, &self.span)
    }

    /// The binding this declaration introduces.
    pub fn to_symbol(&self) -> VariableSymbol {
        VariableSymbol {
            name: self.identifier.clone(),
            ty: self.get_type().clone(),
            constant: self.is_constant,
        }
    }

    /// Resolves the declared type, infers it from the initializer, or checks
    /// the initializer against it. A declared type always wins over the
    /// initializer's type.
    pub fn analyze(&mut self, ctx: &mut AnalysisContext) {
        let declared = self.type_name.as_ref().map(|type_name| {
            ctx.symbols
                .lookup_type(type_name, self.span.start.clone(), ctx.diagnostics)
        });

        let ty = match (declared, self.initializer.as_mut()) {
            (None, None) => {
                ctx.diagnostics.error(
                    ErrorImpl::InitializerOrTypeRequired {
                        variable: self.identifier.clone(),
                    },
                    self.span.start.clone(),
                );
                Type::Arbitrary
            }
            (Some(declared), None) => declared,
            (None, Some(initializer)) => {
                initializer.analyze(ctx);
                initializer.get_type().clone()
            }
            (Some(declared), Some(initializer)) => {
                initializer.analyze(ctx);
                initializer.assert_assignable_to(
                    &declared,
                    MismatchContext::VariableInitialization,
                    ctx.diagnostics,
                );
                declared
            }
        };

        debug!(variable = %self.identifier, ty = %ty, constant = self.is_constant, "variable analyzed");
        self.ty = Some(ty);
    }
}
