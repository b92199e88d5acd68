/// AST (Abstract Syntax Tree) module
/// Contains the tree consumed and typed by semantic analysis
///
/// Submodules:
/// - ast: The expression trait, its wrapper and the shared type assertions
/// - expressions: Expression nodes and their typing rules
/// - operators: Closed sets of binary and prefix operators
/// - statements: Declarations, expression statements and blocks
/// - types: The static types of the language
pub mod ast;
pub mod expressions;
pub mod operators;
pub mod statements;
pub mod types;
