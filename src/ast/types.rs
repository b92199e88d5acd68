//! Static types of the language.
//!
//! The set of types is closed:
//!
//! - Primitive types (numbers, characters, strings, booleans)
//! - Arrays of any element type
//! - The arbitrary type, a wildcard used after an error has been reported
//!
//! Assignability between types is decided in one place,
//! [`Type::can_be_assigned_to`].

use std::fmt::Display;

/// A static type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Number,
    Character,
    String,
    Boolean,
    /// Compatible with every type in both directions. Stands in for the type of
    /// anything that already failed analysis, so no second error is reported.
    Arbitrary,
    Array(Box<Type>),
}

impl Type {
    pub fn array_of(element: Type) -> Type {
        Type::Array(Box::new(element))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Type::Number | Type::Character | Type::String | Type::Boolean
        )
    }

    pub fn is_arithmetic(&self) -> bool {
        matches!(self, Type::Number)
    }

    /// Numbers are the only integer-valued type.
    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Number)
    }

    pub fn is_arbitrary(&self) -> bool {
        matches!(self, Type::Arbitrary)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Type::Array(_))
    }

    pub fn is_array_or_string(&self) -> bool {
        self.is_array() || matches!(self, Type::String)
    }

    pub fn get_element_type(&self) -> Option<&Type> {
        match self {
            Type::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Whether a value of this type can be stored where `other` is expected.
    ///
    /// Arrays are assignable element-wise, so `[]<arbitrary>` fits any array.
    pub fn can_be_assigned_to(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Arbitrary, _) | (_, Type::Arbitrary) => true,
            (Type::Array(element), Type::Array(other_element)) => {
                element.can_be_assigned_to(other_element)
            }
            _ => self == other,
        }
    }

    /// Assignability in at least one direction.
    pub fn is_compatible_with(&self, other: &Type) -> bool {
        self.can_be_assigned_to(other) || other.can_be_assigned_to(self)
    }

    pub fn get_name(&self) -> String {
        match self {
            Type::Number => "number".to_string(),
            Type::Character => "char".to_string(),
            Type::String => "string".to_string(),
            Type::Boolean => "boolean".to_string(),
            Type::Arbitrary => "<arbitrary>".to_string(),
            Type::Array(element) => format!("[]{}", element.get_name()),
        }
    }
}

impl Drop for Type {
    // Nested arrays are unwound one level at a time so that dropping a deep
    // type does not recurse.
    fn drop(&mut self) {
        if let Type::Array(element) = self {
            let mut next = std::mem::replace(element.as_mut(), Type::Arbitrary);
            loop {
                let taken = match &mut next {
                    Type::Array(inner) => std::mem::replace(inner.as_mut(), Type::Arbitrary),
                    _ => break,
                };
                next = taken;
            }
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get_name())
    }
}
