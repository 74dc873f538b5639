//! Error types for parts list extraction.
//!
//! This module provides the main error type [`MocError`] which wraps the
//! error conditions that can occur while loading a model.

use std::io;

use thiserror::Error;

use mocparts_parser::error::ParseError;

use crate::lxfml::ImportError;

/// The main error type for mocparts operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant carries the decoded document next to the diagnostics,
/// so that their spans can be rendered as source snippets.
#[derive(Debug, Error)]
pub enum MocError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Import error: {0}")]
    Import(#[from] ImportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report error: {0}")]
    Report(#[from] serde_json::Error),
}

impl MocError {
    /// Create a new `Parse` error with the associated source code.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
