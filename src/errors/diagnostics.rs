use std::slice::Iter;

use tracing::trace;

use crate::Position;

use super::errors::{Error, ErrorImpl};

/// Append-only collection of the diagnostics reported during analysis.
///
/// Diagnostics keep the order in which they were reported, which for a
/// post-order walk is the order of the offending code.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<Error>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { errors: vec![] }
    }

    pub fn error(&mut self, error_impl: ErrorImpl, position: Position) {
        self.push(Error::new(error_impl, position));
    }

    pub fn push(&mut self, error: Error) {
        trace!(key = error.get_key(), position = error.get_position().0, "diagnostic reported");
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Error> {
        self.errors.iter()
    }

    pub fn get_errors(&self) -> &[Error] {
        &self.errors
    }

    /// Stable keys of every diagnostic, in report order.
    pub fn keys(&self) -> Vec<&'static str> {
        self.errors.iter().map(|error| error.get_key()).collect()
    }

    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Error;
    type IntoIter = Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
