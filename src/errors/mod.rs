//! Diagnostics produced by semantic analysis.
//!
//! This module defines:
//!
//! - Diagnostic records with source position information
//! - Stable keys for each kind of semantic error
//! - The append-only sink that collects diagnostics during a walk
//! - Internal errors that signal a malformed tree rather than a user mistake

pub mod diagnostics;
pub mod errors;

#[cfg(test)]
mod tests;
