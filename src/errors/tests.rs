//! Unit tests for diagnostics.
//!
//! This module contains tests for diagnostic records and the sink that collects them.

use std::rc::Rc;

use pretty_assertions::assert_eq;

use crate::ast::types::Type;
use crate::errors::diagnostics::Diagnostics;
use crate::errors::errors::{Error, ErrorImpl, ErrorTip, InternalError, MismatchContext};
use crate::Position;

fn position(offset: u32) -> Position {
    Position(offset, Rc::new("test.fire".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::NonArithmetic {
            context: "+".to_string(),
            received: Type::String,
        },
        position(10),
    );

    assert_eq!(error.get_error_name(), "NonArithmetic");
    assert_eq!(error.get_key(), "non_arithmetic");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::VariableNotDeclared {
            variable: "foo".to_string(),
        },
        position(42),
    );

    assert_eq!(error.get_position().0, 42);
}

#[test]
fn test_equality_error_key() {
    let error = Error::new(
        ErrorImpl::EqualityTypeMismatch {
            operator: "==".to_string(),
            left: Type::Number,
            right: Type::String,
        },
        position(0),
    );

    assert_eq!(error.get_key(), "eq.type.error");
    assert_eq!(
        error.to_string(),
        "eq.type.error: operator \"==\" cannot compare number with string"
    );
}

#[test]
fn test_type_mismatch_keys_follow_context() {
    let keys: Vec<&str> = [
        MismatchContext::VariableInitialization,
        MismatchContext::Assignment,
        MismatchContext::ArrayElement,
    ]
    .into_iter()
    .map(|context| {
        Error::new(
            ErrorImpl::TypeMismatch {
                context,
                expected: Type::Number,
                received: Type::Boolean,
            },
            position(0),
        )
        .get_key()
    })
    .collect();

    assert_eq!(
        keys,
        vec![
            "variable_initialization_type_mismatch",
            "assignment_type_mismatch",
            "array_element_type_mismatch"
        ]
    );
}

#[test]
fn test_unknown_type_tip() {
    let error = Error::new(
        ErrorImpl::UnknownType {
            type_name: "CustomType".to_string(),
        },
        position(0),
    );

    assert_eq!(error.get_error_name(), "UnknownType");
    assert_eq!(error.get_tip().to_string(), "Unknown type `CustomType` found");
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::TypeMismatch {
            context: MismatchContext::VariableInitialization,
            expected: Type::array_of(Type::Number),
            received: Type::String,
        },
        position(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert_eq!(tip, "Expected type `[]number`, received `string`"),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_internal_error_message() {
    let error = InternalError::UnknownOperator {
        operator: "**".to_string(),
    };

    assert_eq!(error.to_string(), "unknown operator \"**\"");
}

#[test]
fn test_diagnostics_keep_report_order() {
    let mut diagnostics = Diagnostics::new();
    assert!(!diagnostics.has_errors());

    diagnostics.error(
        ErrorImpl::InitializerOrTypeRequired {
            variable: "a".to_string(),
        },
        position(3),
    );
    diagnostics.error(ErrorImpl::NonWritableLValue, position(1));
    diagnostics.error(
        ErrorImpl::UnknownType {
            type_name: "thing".to_string(),
        },
        position(2),
    );

    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.len(), 3);
    assert_eq!(
        diagnostics.keys(),
        vec!["initializer_or_type_required", "non_writable_lvalue", "unknown_type"]
    );

    let offsets: Vec<u32> = diagnostics.iter().map(|error| error.get_position().0).collect();
    assert_eq!(offsets, vec![3, 1, 2]);
}
