//! The error returned by [`parse_document`](crate::parse_document) and
//! [`flatten`](crate::flatten).

use std::fmt;

use crate::error::{Diagnostic, ErrorCode};

/// Result of a single classification or resolution step.
pub type Result<T> = std::result::Result<T, Diagnostic>;

/// A document that could not be turned into a parts list.
///
/// Loading stops at the first fatal problem, so the error holds exactly one
/// [`Diagnostic`].
#[derive(Debug)]
pub struct ParseError {
    diagnostic: Diagnostic,
}

impl ParseError {
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    pub fn code(&self) -> ErrorCode {
        self.diagnostic.code()
    }

    pub fn into_diagnostic(self) -> Diagnostic {
        self.diagnostic
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.diagnostic, f)
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }
}
