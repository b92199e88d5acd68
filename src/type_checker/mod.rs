//! Type checking and semantic analysis module.
//!
//! This module drives semantic analysis over the AST. It:
//!
//! - Threads the analysis context (diagnostics, symbols, enclosing
//!   subroutine, loop flag, options) through every node
//! - Resolves type names and variable references through a symbol table
//! - Declares analyzed variables into nested scopes
//! - Collects every diagnostic instead of stopping at the first one
//!
//! The tree is typed in place; a node's type is available once it has been
//! analyzed.

pub mod environment;
pub mod type_checker;
