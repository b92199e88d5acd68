//! Utility macros for building trees.
//!
//! These macros reduce boilerplate when a tree is assembled by hand, as in
//! tests and tools. Every node they build carries a null span.
//!
//! - `MK_EXPR!` - Wraps an expression node into an ExprWrapper
//! - `MK_LITERAL!` - Creates a literal expression
//! - `MK_SYMBOL!` - Creates a variable reference
//! - `MK_BINARY!` / `MK_PREFIX!` - Create operator expressions
//! - `MK_VARIABLE!` - Creates a variable declaration

/// Wraps an expression node into an ExprWrapper.
#[macro_export]
macro_rules! MK_EXPR {
    ($expr:expr) => {
        $crate::ast::ast::ExprWrapper::new($expr)
    };
}

/// Creates a literal expression.
///
/// # Example
///
/// ```ignore
/// let one = MK_LITERAL!(number 1);
/// let letter = MK_LITERAL!(char 'a');
/// ```
#[macro_export]
macro_rules! MK_LITERAL {
    (number $value:expr) => {
        $crate::ast::ast::ExprWrapper::new($crate::ast::expressions::NumberExpr::new(
            $value as f64,
            $crate::Span::null(),
        ))
    };
    (char $value:expr) => {
        $crate::ast::ast::ExprWrapper::new($crate::ast::expressions::CharExpr::new(
            $value,
            $crate::Span::null(),
        ))
    };
    (string $value:expr) => {
        $crate::ast::ast::ExprWrapper::new($crate::ast::expressions::StringExpr::new(
            $value,
            $crate::Span::null(),
        ))
    };
    (boolean $value:expr) => {
        $crate::ast::ast::ExprWrapper::new($crate::ast::expressions::BooleanExpr::new(
            $value,
            $crate::Span::null(),
        ))
    };
}

/// Creates a reference to the variable `$name`.
#[macro_export]
macro_rules! MK_SYMBOL {
    ($name:expr) => {
        $crate::ast::ast::ExprWrapper::new($crate::ast::expressions::SymbolExpr::new(
            $name,
            $crate::Span::null(),
        ))
    };
}

/// Creates a binary expression from a `BinaryOperator` variant name.
///
/// # Example
///
/// ```ignore
/// let sum = MK_BINARY!(MK_LITERAL!(number 1), Plus, MK_LITERAL!(number 2));
/// ```
#[macro_export]
macro_rules! MK_BINARY {
    ($left:expr, $operator:ident, $right:expr) => {
        $crate::ast::ast::ExprWrapper::new($crate::ast::expressions::BinaryExpr::new(
            $left,
            $crate::ast::operators::BinaryOperator::$operator,
            $right,
            $crate::Span::null(),
        ))
    };
}

/// Creates a prefix expression from a `PrefixOperator` variant name.
#[macro_export]
macro_rules! MK_PREFIX {
    ($operator:ident, $right:expr) => {
        $crate::ast::ast::ExprWrapper::new($crate::ast::expressions::PrefixExpr::new(
            $crate::ast::operators::PrefixOperator::$operator,
            $right,
            $crate::Span::null(),
        ))
    };
}

/// Creates a variable declaration, with an optional type name and initializer.
///
/// # Example
///
/// ```ignore
/// let typed = MK_VARIABLE!("x": "number");
/// let inferred = MK_VARIABLE!("y" = MK_LITERAL!(string "hi"));
/// let both = MK_VARIABLE!("z": "[]char" = MK_SYMBOL!("letters"));
/// ```
#[macro_export]
macro_rules! MK_VARIABLE {
    ($name:literal) => {
        $crate::ast::statements::Variable::new($name, None, None, $crate::Span::null())
    };
    ($name:literal : $type_name:literal) => {
        $crate::ast::statements::Variable::new(
            $name,
            Some(String::from($type_name)),
            None,
            $crate::Span::null(),
        )
    };
    ($name:literal = $initializer:expr) => {
        $crate::ast::statements::Variable::new(
            $name,
            None,
            Some($initializer),
            $crate::Span::null(),
        )
    };
    ($name:literal : $type_name:literal = $initializer:expr) => {
        $crate::ast::statements::Variable::new(
            $name,
            Some(String::from($type_name)),
            Some($initializer),
            $crate::Span::null(),
        )
    };
}
