//! Operators of the language.
//!
//! Operator tokens are turned into closed enums when the tree is built, so the
//! analyzer only ever matches exhaustively over known operators.

use std::{fmt::Display, str::FromStr};

use crate::errors::errors::InternalError;

/// Behaviour class of a binary operator, deciding which typing rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorClass {
    Arithmetic,
    Shift,
    Relational,
    Equality,
    Logical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Plus,
    Dash,
    Star,
    Slash,
    ShiftLeft,
    ShiftRight,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    Equals,
    NotEquals,
    And,
    Or,
}

impl BinaryOperator {
    pub fn get_class(&self) -> OperatorClass {
        match self {
            BinaryOperator::Plus | BinaryOperator::Dash | BinaryOperator::Star | BinaryOperator::Slash => {
                OperatorClass::Arithmetic
            }
            BinaryOperator::ShiftLeft | BinaryOperator::ShiftRight => OperatorClass::Shift,
            BinaryOperator::Less
            | BinaryOperator::LessEquals
            | BinaryOperator::Greater
            | BinaryOperator::GreaterEquals => OperatorClass::Relational,
            BinaryOperator::Equals | BinaryOperator::NotEquals => OperatorClass::Equality,
            BinaryOperator::And | BinaryOperator::Or => OperatorClass::Logical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Dash => "-",
            BinaryOperator::Star => "*",
            BinaryOperator::Slash => "/",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEquals => "<=",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEquals => ">=",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
        }
    }
}

impl FromStr for BinaryOperator {
    type Err = InternalError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let operator = match token {
            "+" => BinaryOperator::Plus,
            "-" => BinaryOperator::Dash,
            "*" => BinaryOperator::Star,
            "/" => BinaryOperator::Slash,
            "<<" => BinaryOperator::ShiftLeft,
            ">>" => BinaryOperator::ShiftRight,
            "<" => BinaryOperator::Less,
            "<=" => BinaryOperator::LessEquals,
            ">" => BinaryOperator::Greater,
            ">=" => BinaryOperator::GreaterEquals,
            "==" => BinaryOperator::Equals,
            "!=" => BinaryOperator::NotEquals,
            "&&" => BinaryOperator::And,
            "||" => BinaryOperator::Or,
            _ => {
                return Err(InternalError::UnknownOperator {
                    operator: token.to_string(),
                })
            }
        };
        Ok(operator)
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrefixOperator {
    /// `-x`
    Negate,
    /// `!x`
    Not,
    /// `#x`, the length of an array or string
    Length,
}

impl PrefixOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixOperator::Negate => "-",
            PrefixOperator::Not => "!",
            PrefixOperator::Length => "#",
        }
    }
}

impl FromStr for PrefixOperator {
    type Err = InternalError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token {
            "-" => Ok(PrefixOperator::Negate),
            "!" => Ok(PrefixOperator::Not),
            "#" => Ok(PrefixOperator::Length),
            _ => Err(InternalError::UnknownOperator {
                operator: token.to_string(),
            }),
        }
    }
}

impl Display for PrefixOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
