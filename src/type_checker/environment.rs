use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    ast::types::Type,
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    Position,
};

lazy_static! {
    static ref BUILT_IN_TYPES: HashMap<&'static str, Type> = {
        let mut types = HashMap::new();
        types.insert("number", Type::Number);
        types.insert("char", Type::Character);
        types.insert("string", Type::String);
        types.insert("boolean", Type::Boolean);
        types
    };
    /// The `[]` prefixes of an array type name such as `[][]T`
    static ref ARRAY_TYPE_PREFIX: Regex = Regex::new(r"^(?:\[\]\s*)+").expect("array type pattern is valid");
    static ref ARBITRARY_VARIABLE: VariableSymbol = VariableSymbol {
        name: String::from("<arbitrary>"),
        ty: Type::Arbitrary,
        constant: false,
    };
}

/// A declared variable as seen by the code that refers to it.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSymbol {
    pub name: String,
    pub ty: Type,
    pub constant: bool,
}

impl VariableSymbol {
    /// Stands in for a variable that was never declared. It has the arbitrary
    /// type and is writable, so uses of it report nothing further.
    pub fn arbitrary() -> VariableSymbol {
        ARBITRARY_VARIABLE.clone()
    }

    pub fn is_arbitrary(&self) -> bool {
        *self == *ARBITRARY_VARIABLE
    }
}

/// Name resolution needed by semantic analysis.
///
/// Lookups never fail: an unknown name is reported to `diagnostics` and
/// resolved to an arbitrary replacement.
pub trait SymbolTable {
    fn lookup_type(&self, name: &str, position: Position, diagnostics: &mut Diagnostics) -> Type;
    fn lookup_variable(&self, name: &str, position: Position, diagnostics: &mut Diagnostics) -> VariableSymbol;
}

#[derive(Debug, Default)]
pub struct Scope {
    pub variable_lookup: HashMap<String, VariableSymbol>,
    pub type_lookup: HashMap<String, Type>, // User defined type names
}

/// Nested scopes of variables and type names. The outermost scope is never popped.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<Scope>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::default()],
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    fn current_scope(&mut self) -> &mut Scope {
        let last = self.scopes.len() - 1;
        &mut self.scopes[last]
    }

    pub fn declare_variable(&mut self, variable: VariableSymbol, current_position: Position) -> Result<(), Error> {
        let scope = self.current_scope();
        if scope.variable_lookup.contains_key(&variable.name) {
            Err(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: variable.name,
                },
                current_position,
            ))
        } else {
            scope.variable_lookup.insert(variable.name.clone(), variable);
            Ok(())
        }
    }

    /// Registers `name` as another name for `ty` in the current scope. It
    /// shadows any built-in or outer type of the same name.
    pub fn declare_type(&mut self, name: impl Into<String>, ty: Type) {
        self.current_scope().type_lookup.insert(name.into(), ty);
    }

    /// Innermost declaration of `name`, if any.
    pub fn get_variable(&self, name: &str) -> Option<&VariableSymbol> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.variable_lookup.get(name))
    }

    /// Resolves `[]T` array names, user type names and built-in names.
    pub fn get_type(&self, name: &str) -> Option<Type> {
        let name = name.trim();
        let (depth, element_name) = match ARRAY_TYPE_PREFIX.find(name) {
            Some(prefix) => (prefix.as_str().matches("[]").count(), &name[prefix.end()..]),
            None => (0, name),
        };

        let mut ty = self.get_named_type(element_name)?;
        for _ in 0..depth {
            ty = Type::array_of(ty);
        }
        Some(ty)
    }

    /// Innermost user type named `name`, else the built-in one.
    fn get_named_type(&self, name: &str) -> Option<Type> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.type_lookup.get(name).cloned())
            .or_else(|| BUILT_IN_TYPES.get(name).cloned())
    }
}

impl SymbolTable for Environment {
    fn lookup_type(&self, name: &str, position: Position, diagnostics: &mut Diagnostics) -> Type {
        match self.get_type(name) {
            Some(ty) => ty,
            None => {
                diagnostics.error(
                    ErrorImpl::UnknownType {
                        type_name: name.to_string(),
                    },
                    position,
                );
                Type::Arbitrary
            }
        }
    }

    fn lookup_variable(&self, name: &str, position: Position, diagnostics: &mut Diagnostics) -> VariableSymbol {
        match self.get_variable(name) {
            Some(variable) => variable.clone(),
            None => {
                diagnostics.error(
                    ErrorImpl::VariableNotDeclared {
                        variable: name.to_string(),
                    },
                    position,
                );
                VariableSymbol::arbitrary()
            }
        }
    }
}
