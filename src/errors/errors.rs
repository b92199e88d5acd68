use std::fmt::Display;

use thiserror::Error;

use crate::{ast::types::Type, Position};

/// A user-facing semantic diagnostic: what went wrong and where.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Stable identifier of the diagnostic, suitable for tests and tooling.
    pub fn get_key(&self) -> &'static str {
        match &self.internal_error {
            ErrorImpl::NonArithmetic { .. } => "non_arithmetic",
            ErrorImpl::NonInteger { .. } => "non_integer",
            ErrorImpl::NonBoolean { .. } => "non_boolean",
            ErrorImpl::NonChar { .. } => "non_char",
            ErrorImpl::NonArray { .. } => "non_array",
            ErrorImpl::NonString { .. } => "non_string",
            ErrorImpl::NonArrayOrString { .. } => "non_array_or_string",
            ErrorImpl::NonComparable { .. } => "non_comparable",
            ErrorImpl::EqualityTypeMismatch { .. } => "eq.type.error",
            ErrorImpl::InitializerOrTypeRequired { .. } => "initializer_or_type_required",
            ErrorImpl::TypeMismatch { context, .. } => context.get_key(),
            ErrorImpl::NonWritableLValue => "non_writable_lvalue",
            ErrorImpl::UnknownType { .. } => "unknown_type",
            ErrorImpl::VariableNotDeclared { .. } => "variable_not_declared",
            ErrorImpl::VariableAlreadyDeclared { .. } => "variable_already_declared",
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::NonArithmetic { .. } => "NonArithmetic",
            ErrorImpl::NonInteger { .. } => "NonInteger",
            ErrorImpl::NonBoolean { .. } => "NonBoolean",
            ErrorImpl::NonChar { .. } => "NonChar",
            ErrorImpl::NonArray { .. } => "NonArray",
            ErrorImpl::NonString { .. } => "NonString",
            ErrorImpl::NonArrayOrString { .. } => "NonArrayOrString",
            ErrorImpl::NonComparable { .. } => "NonComparable",
            ErrorImpl::EqualityTypeMismatch { .. } => "EqualityTypeMismatch",
            ErrorImpl::InitializerOrTypeRequired { .. } => "InitializerOrTypeRequired",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::NonWritableLValue => "NonWritableLValue",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::NonArithmetic { context, received } => ErrorTip::Suggestion(format!(
                "Operator `{}` expects a number, found `{}`",
                context, received
            )),
            ErrorImpl::NonInteger { context, received } => ErrorTip::Suggestion(format!(
                "Operator `{}` expects an integer, found `{}`",
                context, received
            )),
            ErrorImpl::NonBoolean { context, received } => ErrorTip::Suggestion(format!(
                "Operator `{}` expects a boolean, found `{}`",
                context, received
            )),
            ErrorImpl::NonChar { context, received } => ErrorTip::Suggestion(format!(
                "Operator `{}` expects a char, found `{}`",
                context, received
            )),
            ErrorImpl::NonArray { context, received } => ErrorTip::Suggestion(format!(
                "Operator `{}` expects an array, found `{}`",
                context, received
            )),
            ErrorImpl::NonString { context, received } => ErrorTip::Suggestion(format!(
                "Operator `{}` expects a string, found `{}`",
                context, received
            )),
            ErrorImpl::NonArrayOrString { context, received } => {
                ErrorTip::Suggestion(format!(
                    "Operator `{}` expects an array or a string, found `{}`",
                    context, received
                ))
            }
            ErrorImpl::NonComparable { context, received } => ErrorTip::Suggestion(format!(
                "Values of type `{}` cannot be ordered with `{}`",
                received, context
            )),
            ErrorImpl::EqualityTypeMismatch {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "Cannot compare `{}` and `{}` with `{}`",
                left, right, operator
            )),
            ErrorImpl::InitializerOrTypeRequired { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` needs a type or an initial value",
                variable
            )),
            ErrorImpl::TypeMismatch {
                expected, received, ..
            } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::NonWritableLValue => ErrorTip::None,
            ErrorImpl::UnknownType { type_name } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_name))
            }
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.get_key(), self.internal_error)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Where a value was checked against an expected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchContext {
    VariableInitialization,
    Assignment,
    ArrayElement,
}

impl MismatchContext {
    pub fn get_key(&self) -> &'static str {
        match self {
            MismatchContext::VariableInitialization => "variable_initialization_type_mismatch",
            MismatchContext::Assignment => "assignment_type_mismatch",
            MismatchContext::ArrayElement => "array_element_type_mismatch",
        }
    }
}

impl Display for MismatchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MismatchContext::VariableInitialization => write!(f, "variable initialization"),
            MismatchContext::Assignment => write!(f, "assignment"),
            MismatchContext::ArrayElement => write!(f, "array element"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("operator {context:?} requires a number, found {received}")]
    NonArithmetic { context: String, received: Type },
    #[error("operator {context:?} requires an integer, found {received}")]
    NonInteger { context: String, received: Type },
    #[error("operator {context:?} requires a boolean, found {received}")]
    NonBoolean { context: String, received: Type },
    #[error("operator {context:?} requires a char, found {received}")]
    NonChar { context: String, received: Type },
    #[error("operator {context:?} requires an array, found {received}")]
    NonArray { context: String, received: Type },
    #[error("operator {context:?} requires a string, found {received}")]
    NonString { context: String, received: Type },
    #[error("operator {context:?} requires an array or a string, found {received}")]
    NonArrayOrString { context: String, received: Type },
    #[error("operator {context:?} cannot order values of type {received}")]
    NonComparable { context: String, received: Type },
    #[error("operator {operator:?} cannot compare {left} with {right}")]
    EqualityTypeMismatch {
        operator: String,
        left: Type,
        right: Type,
    },
    #[error("variable {variable:?} has neither a type nor an initializer")]
    InitializerOrTypeRequired { variable: String },
    #[error("types do not match in {context}: expected {expected}, received {received}")]
    TypeMismatch {
        context: MismatchContext,
        expected: Type,
        received: Type,
    },
    #[error("expression is not assignable")]
    NonWritableLValue,
    #[error("unknown type {type_name:?}")]
    UnknownType { type_name: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
}

/// Invariant violations raised while building a tree. These are never reported
/// as diagnostics: a well-formed front end does not produce them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InternalError {
    #[error("unknown operator {operator:?}")]
    UnknownOperator { operator: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("position {position} exceeds source length {length}")]
    PositionOutOfRange { position: u32, length: usize },
}
