use std::{any::Any, str::FromStr};

use tracing::debug;

use crate::{
    errors::errors::{ErrorImpl, InternalError, MismatchContext},
    type_checker::{environment::VariableSymbol, type_checker::AnalysisContext},
    Span,
};

use super::{
    ast::{analyzed, Expr, ExprType, ExprWrapper},
    operators::{BinaryOperator, OperatorClass, PrefixOperator},
    types::Type,
};

// LITERALS

/// Number Expression
/// Represents a numeric literal in the AST.
#[derive(Debug)]
pub struct NumberExpr {
    pub value: f64,
    pub span: Span,
    ty: Option<Type>,
}

impl NumberExpr {
    pub fn new(value: f64, span: Span) -> Self {
        NumberExpr {
            value,
            span,
            ty: None,
        }
    }
}

impl Expr for NumberExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Number
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn analyze(&mut self, _ctx: &mut AnalysisContext) {
        self.ty = Some(Type::Number);
    }
    fn get_type(&self) -> &Type {
        analyzed(&self.ty, &self.span)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// Character Expression
#[derive(Debug)]
pub struct CharExpr {
    pub value: char,
    pub span: Span,
    ty: Option<Type>,
}

impl CharExpr {
    pub fn new(value: char, span: Span) -> Self {
        CharExpr {
            value,
            span,
            ty: None,
        }
    }
}

impl Expr for CharExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Character
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn analyze(&mut self, _ctx: &mut AnalysisContext) {
        self.ty = Some(Type::Character);
    }
    fn get_type(&self) -> &Type {
        analyzed(&self.ty, &self.span)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// String Expression
/// Represents a string literal in the AST.
#[derive(Debug)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
    ty: Option<Type>,
}

impl StringExpr {
    pub fn new(value: impl Into<String>, span: Span) -> Self {
        StringExpr {
            value: value.into(),
            span,
            ty: None,
        }
    }
}

impl Expr for StringExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::String
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn analyze(&mut self, _ctx: &mut AnalysisContext) {
        self.ty = Some(Type::String);
    }
    fn get_type(&self) -> &Type {
        analyzed(&self.ty, &self.span)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// Boolean Expression
#[derive(Debug)]
pub struct BooleanExpr {
    pub value: bool,
    pub span: Span,
    ty: Option<Type>,
}

impl BooleanExpr {
    pub fn new(value: bool, span: Span) -> Self {
        BooleanExpr {
            value,
            span,
            ty: None,
        }
    }
}

impl Expr for BooleanExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Boolean
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn analyze(&mut self, _ctx: &mut AnalysisContext) {
        self.ty = Some(Type::Boolean);
    }
    fn get_type(&self) -> &Type {
        analyzed(&self.ty, &self.span)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// Array Expression
/// Represents an array literal such as `[1, 2, 3]`.
///
/// The element type is taken from the first element; an empty literal is an
/// array of arbitrary elements so that it fits any array type.
#[derive(Debug)]
pub struct ArrayExpr {
    pub elements: Vec<ExprWrapper>,
    pub span: Span,
    ty: Option<Type>,
}

impl ArrayExpr {
    pub fn new(elements: Vec<ExprWrapper>, span: Span) -> Self {
        ArrayExpr {
            elements,
            span,
            ty: None,
        }
    }
}

impl Expr for ArrayExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Array
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn analyze(&mut self, ctx: &mut AnalysisContext) {
        for element in self.elements.iter_mut() {
            element.analyze(ctx);
        }

        let element_type = match self.elements.split_first() {
            Some((first, rest)) => {
                let element_type = first.get_type().clone();
                for element in rest {
                    element.assert_assignable_to(&element_type, MismatchContext::ArrayElement, ctx.diagnostics);
                }
                element_type
            }
            None => Type::Arbitrary,
        };

        self.ty = Some(Type::array_of(element_type));
    }
    fn get_type(&self) -> &Type {
        analyzed(&self.ty, &self.span)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

// REFERENCES

/// Symbol Expression
/// Represents a reference to a variable in the AST.
#[derive(Debug)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
    variable: Option<VariableSymbol>,
    ty: Option<Type>,
}

impl SymbolExpr {
    pub fn new(value: impl Into<String>, span: Span) -> Self {
        SymbolExpr {
            value: value.into(),
            span,
            variable: None,
            ty: None,
        }
    }

    /// The variable this name resolved to, or the arbitrary variable if it
    /// was not declared. `None` before analysis.
    pub fn get_variable(&self) -> Option<&VariableSymbol> {
        self.variable.as_ref()
    }
}

impl Expr for SymbolExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Symbol
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn analyze(&mut self, ctx: &mut AnalysisContext) {
        let variable = ctx
            .symbols
            .lookup_variable(&self.value, self.span.start.clone(), ctx.diagnostics);
        self.ty = Some(variable.ty.clone());
        self.variable = Some(variable);
    }
    fn get_type(&self) -> &Type {
        analyzed(&self.ty, &self.span)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    fn is_writable_lvalue(&self) -> bool {
        self.variable.as_ref().is_some_and(|variable| !variable.constant)
    }
}

/// Index Expression
/// Represents `base[index]` on an array or a string.
#[derive(Debug)]
pub struct IndexExpr {
    pub base: ExprWrapper,
    pub index: ExprWrapper,
    pub span: Span,
    ty: Option<Type>,
}

impl IndexExpr {
    pub fn new(base: ExprWrapper, index: ExprWrapper, span: Span) -> Self {
        IndexExpr {
            base,
            index,
            span,
            ty: None,
        }
    }
}

impl Expr for IndexExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Index
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn analyze(&mut self, ctx: &mut AnalysisContext) {
        self.base.analyze(ctx);
        self.index.analyze(ctx);

        self.base.assert_array_or_string("[]", ctx.diagnostics);
        self.index.assert_integer("[]", ctx.diagnostics);

        let ty = match self.base.get_type() {
            Type::Array(element) => (**element).clone(),
            Type::String => Type::Character,
            _ => Type::Arbitrary,
        };
        self.ty = Some(ty);
    }
    fn get_type(&self) -> &Type {
        analyzed(&self.ty, &self.span)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
    /// Array elements are writable through a writable array; characters of a
    /// string are not.
    fn is_writable_lvalue(&self) -> bool {
        matches!(self.base.get_type(), Type::Array(_) | Type::Arbitrary) && self.base.is_writable_lvalue()
    }
}

// COMPLEX

/// Binary Expression
/// Represents a binary operation between two expressions in the AST.
#[derive(Debug)]
pub struct BinaryExpr {
    pub left: ExprWrapper,
    pub operator: BinaryOperator,
    pub right: ExprWrapper,
    pub span: Span,
    ty: Option<Type>,
}

impl BinaryExpr {
    pub fn new(left: ExprWrapper, operator: BinaryOperator, right: ExprWrapper, span: Span) -> Self {
        BinaryExpr {
            left,
            operator,
            right,
            span,
            ty: None,
        }
    }

    /// Builds a binary expression from a raw operator token.
    pub fn from_token(left: ExprWrapper, token: &str, right: ExprWrapper, span: Span) -> Result<Self, InternalError> {
        Ok(BinaryExpr::new(left, BinaryOperator::from_str(token)?, right, span))
    }

    /// `<`, `<=`, `>`, `>=`: the left operand decides what the right one must be.
    ///
    /// A left operand of any other type is not checked unless strict
    /// relational checking is enabled.
    fn check_relational(&self, ctx: &mut AnalysisContext) {
        let op = self.operator.as_str();
        match self.left.get_type() {
            Type::Character => self.right.assert_char(op, ctx.diagnostics),
            Type::String => self.right.assert_string(op, ctx.diagnostics),
            ty if ty.is_arithmetic() => {
                self.left.assert_arithmetic(op, ctx.diagnostics);
                self.right.assert_arithmetic(op, ctx.diagnostics);
            }
            Type::Arbitrary => {}
            ty => {
                if ctx.options.strict_relational {
                    ctx.diagnostics.error(
                        ErrorImpl::NonComparable {
                            context: op.to_string(),
                            received: ty.clone(),
                        },
                        self.left.get_span().start.clone(),
                    );
                }
            }
        }
    }

    /// `==`, `!=`: both sides primitive and assignable in some direction.
    fn check_equality(&self, ctx: &mut AnalysisContext) {
        let left = self.left.get_type();
        let right = self.right.get_type();
        if left.is_arbitrary() || right.is_arbitrary() {
            return;
        }

        if !(left.is_primitive() && right.is_primitive() && left.is_compatible_with(right)) {
            ctx.diagnostics.error(
                ErrorImpl::EqualityTypeMismatch {
                    operator: self.operator.as_str().to_string(),
                    left: left.clone(),
                    right: right.clone(),
                },
                self.span.start.clone(),
            );
        }
    }
}

impl Expr for BinaryExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Binary
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn analyze(&mut self, ctx: &mut AnalysisContext) {
        self.left.analyze(ctx);
        self.right.analyze(ctx);

        let op = self.operator.as_str();
        let ty = match self.operator.get_class() {
            OperatorClass::Arithmetic => {
                self.left.assert_arithmetic(op, ctx.diagnostics);
                self.right.assert_arithmetic(op, ctx.diagnostics);
                Type::Number
            }
            OperatorClass::Shift => {
                self.left.assert_integer(op, ctx.diagnostics);
                self.right.assert_integer(op, ctx.diagnostics);
                Type::Number
            }
            OperatorClass::Relational => {
                self.check_relational(ctx);
                Type::Boolean
            }
            OperatorClass::Equality => {
                self.check_equality(ctx);
                Type::Boolean
            }
            OperatorClass::Logical => {
                self.left.assert_boolean(op, ctx.diagnostics);
                self.right.assert_boolean(op, ctx.diagnostics);
                Type::Boolean
            }
        };

        debug!(
            operator = op,
            left = %self.left.get_type(),
            right = %self.right.get_type(),
            result = %ty,
            "binary expression analyzed"
        );
        self.ty = Some(ty);
    }
    fn get_type(&self) -> &Type {
        analyzed(&self.ty, &self.span)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// Prefix Expression
/// Represents a prefix operation on an expression in the AST.
#[derive(Debug)]
pub struct PrefixExpr {
    pub operator: PrefixOperator,
    pub right_expr: ExprWrapper,
    pub span: Span,
    ty: Option<Type>,
}

impl PrefixExpr {
    pub fn new(operator: PrefixOperator, right_expr: ExprWrapper, span: Span) -> Self {
        PrefixExpr {
            operator,
            right_expr,
            span,
            ty: None,
        }
    }

    pub fn from_token(token: &str, right_expr: ExprWrapper, span: Span) -> Result<Self, InternalError> {
        Ok(PrefixExpr::new(PrefixOperator::from_str(token)?, right_expr, span))
    }
}

impl Expr for PrefixExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Prefix
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn analyze(&mut self, ctx: &mut AnalysisContext) {
        self.right_expr.analyze(ctx);

        let op = self.operator.as_str();
        let ty = match self.operator {
            PrefixOperator::Negate => {
                self.right_expr.assert_arithmetic(op, ctx.diagnostics);
                Type::Number
            }
            PrefixOperator::Not => {
                self.right_expr.assert_boolean(op, ctx.diagnostics);
                Type::Boolean
            }
            PrefixOperator::Length => {
                self.right_expr.assert_array_or_string(op, ctx.diagnostics);
                Type::Number
            }
        };
        self.ty = Some(ty);
    }
    fn get_type(&self) -> &Type {
        analyzed(&self.ty, &self.span)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}

/// Assignment Expression
/// Represents `assignee = value`; its type is the type of the assignee.
#[derive(Debug)]
pub struct AssignmentExpr {
    pub assignee: ExprWrapper,
    pub value: ExprWrapper,
    pub span: Span,
    ty: Option<Type>,
}

impl AssignmentExpr {
    pub fn new(assignee: ExprWrapper, value: ExprWrapper, span: Span) -> Self {
        AssignmentExpr {
            assignee,
            value,
            span,
            ty: None,
        }
    }
}

impl Expr for AssignmentExpr {
    fn get_expr_type(&self) -> ExprType {
        ExprType::Assignment
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn analyze(&mut self, ctx: &mut AnalysisContext) {
        self.assignee.analyze(ctx);
        self.value.analyze(ctx);

        if !self.assignee.is_writable_lvalue() {
            ctx.diagnostics
                .error(ErrorImpl::NonWritableLValue, self.assignee.get_span().start.clone());
        }
        let target = self.assignee.get_type().clone();
        self.value
            .assert_assignable_to(&target, MismatchContext::Assignment, ctx.diagnostics);

        self.ty = Some(target);
    }
    fn get_type(&self) -> &Type {
        analyzed(&self.ty, &self.span)
    }
    fn get_span(&self) -> &Span {
        &self.span
    }
}
