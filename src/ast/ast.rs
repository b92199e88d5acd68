use std::{any::Any, fmt::Debug};

use crate::{
    errors::{
        diagnostics::Diagnostics,
        errors::{ErrorImpl, MismatchContext},
    },
    type_checker::type_checker::AnalysisContext,
    Span,
};

use super::types::Type;

/// Expression Types
///
/// Defines the various kinds of expressions in the AST.
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum ExprType {
    Number,
    Character,
    String,
    Boolean,
    Array,
    Symbol,
    Index,
    Binary,
    Prefix,
    Assignment,
}

/// Expression Trait
///
/// Every expression computes and caches its static type in `analyze`. Analysis
/// is post-order: children are analyzed before their parent applies its rule.
///
/// The `assert_*` helpers check the type already computed by `analyze` and
/// report at most one diagnostic. An `Arbitrary` type passes all of them, since
/// whatever made it arbitrary has been reported already.
pub trait Expr: Debug {
    /// Returns the expression type of the expression.
    fn get_expr_type(&self) -> ExprType;
    /// Type conversion purposes - used with `.downcast_ref<T>()`
    fn as_any(&self) -> &dyn Any;
    /// Computes the static type of this expression and its children.
    ///
    /// Must be called exactly once per node.
    fn analyze(&mut self, ctx: &mut AnalysisContext);
    /// Returns the type computed by `analyze`.
    ///
    /// Panics if the expression has not been analyzed yet.
    fn get_type(&self) -> &Type;
    /// Returns the span of the expression.
    fn get_span(&self) -> &Span;
    /// Whether the expression can be the target of an assignment.
    fn is_writable_lvalue(&self) -> bool {
        false
    }

    fn is_compatible_with(&self, other: &Type) -> bool {
        self.get_type().can_be_assigned_to(other)
    }

    fn is_array(&self) -> bool {
        self.get_type().is_array()
    }

    fn is_array_or_string(&self) -> bool {
        self.get_type().is_array_or_string()
    }

    fn assert_assignable_to(&self, expected: &Type, context: MismatchContext, diagnostics: &mut Diagnostics) {
        if !self.is_compatible_with(expected) {
            diagnostics.error(
                ErrorImpl::TypeMismatch {
                    context,
                    expected: expected.clone(),
                    received: self.get_type().clone(),
                },
                self.get_span().start.clone(),
            );
        }
    }

    fn assert_arithmetic(&self, context: &str, diagnostics: &mut Diagnostics) {
        let ty = self.get_type();
        if !ty.is_arbitrary() && !ty.is_arithmetic() {
            diagnostics.error(
                ErrorImpl::NonArithmetic {
                    context: context.to_string(),
                    received: ty.clone(),
                },
                self.get_span().start.clone(),
            );
        }
    }

    fn assert_integer(&self, context: &str, diagnostics: &mut Diagnostics) {
        let ty = self.get_type();
        if !ty.is_arbitrary() && !ty.is_integer() {
            diagnostics.error(
                ErrorImpl::NonInteger {
                    context: context.to_string(),
                    received: ty.clone(),
                },
                self.get_span().start.clone(),
            );
        }
    }

    fn assert_boolean(&self, context: &str, diagnostics: &mut Diagnostics) {
        let ty = self.get_type();
        if !ty.is_arbitrary() && *ty != Type::Boolean {
            diagnostics.error(
                ErrorImpl::NonBoolean {
                    context: context.to_string(),
                    received: ty.clone(),
                },
                self.get_span().start.clone(),
            );
        }
    }

    fn assert_char(&self, context: &str, diagnostics: &mut Diagnostics) {
        let ty = self.get_type();
        if !ty.is_arbitrary() && *ty != Type::Character {
            diagnostics.error(
                ErrorImpl::NonChar {
                    context: context.to_string(),
                    received: ty.clone(),
                },
                self.get_span().start.clone(),
            );
        }
    }

    fn assert_array(&self, context: &str, diagnostics: &mut Diagnostics) {
        let ty = self.get_type();
        if !ty.is_arbitrary() && !ty.is_array() {
            diagnostics.error(
                ErrorImpl::NonArray {
                    context: context.to_string(),
                    received: ty.clone(),
                },
                self.get_span().start.clone(),
            );
        }
    }

    fn assert_string(&self, context: &str, diagnostics: &mut Diagnostics) {
        let ty = self.get_type();
        if !ty.is_arbitrary() && *ty != Type::String {
            diagnostics.error(
                ErrorImpl::NonString {
                    context: context.to_string(),
                    received: ty.clone(),
                },
                self.get_span().start.clone(),
            );
        }
    }

    fn assert_array_or_string(&self, context: &str, diagnostics: &mut Diagnostics) {
        let ty = self.get_type();
        if !ty.is_arbitrary() && !ty.is_array_or_string() {
            diagnostics.error(
                ErrorImpl::NonArrayOrString {
                    context: context.to_string(),
                    received: ty.clone(),
                },
                self.get_span().start.clone(),
            );
        }
    }
}

/// Reads a cached type, treating an unanalyzed node as a broken invariant.
pub(crate) fn analyzed<'a>(ty: &'a Option<Type>, span: &Span) -> &'a Type {
    match ty {
        Some(ty) => ty,
        None => panic!(
            "expression at offset {} in {} read before analysis",
            span.start.0, span.start.1
        ),
    }
}

/// Expression Wrapper
///
/// A wrapper that allows for any expression kind to be stored with helper methods
#[derive(Debug)]
pub struct ExprWrapper(Box<dyn Expr>);

impl ExprWrapper {
    pub fn new<T: Expr + 'static>(expression: T) -> Self {
        ExprWrapper(Box::new(expression))
    }

    /// Downcasts the wrapped expression to a concrete node.
    pub fn downcast_ref<T: Expr + 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl Expr for ExprWrapper {
    fn get_expr_type(&self) -> ExprType {
        self.0.get_expr_type()
    }
    fn as_any(&self) -> &dyn Any {
        self.0.as_any()
    }
    fn analyze(&mut self, ctx: &mut AnalysisContext) {
        self.0.analyze(ctx)
    }
    fn get_type(&self) -> &Type {
        self.0.get_type()
    }
    fn get_span(&self) -> &Span {
        self.0.get_span()
    }
    fn is_writable_lvalue(&self) -> bool {
        self.0.is_writable_lvalue()
    }
}
