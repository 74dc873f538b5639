//! Error codes for the mocparts diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Line classification errors
//! - `E1xx` - Reference resolution errors
//! - `E2xx` - Model map consistency errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Classification Errors (E0xx)
    // =========================================================================
    /// Blank sub-model reference name.
    ///
    /// A placement row names an `.ldr` file but the name is empty after
    /// trimming, so the reference can never be resolved.
    E001,

    /// Blank PLI block target.
    ///
    /// An LPub `PLI BEGIN SUB` block has no target part or model.
    E002,

    /// Blank model name.
    ///
    /// A `0 FILE` line opens a model without a name.
    E003,

    // =========================================================================
    // Resolution Errors (E1xx)
    // =========================================================================
    /// Cyclic sub-model reference.
    ///
    /// Flattening did not reach a fixed point within the pass limit, which
    /// only happens when a model (directly or indirectly) contains itself.
    E100,

    // =========================================================================
    // Model Map Errors (E2xx)
    // =========================================================================
    /// Root model missing.
    ///
    /// The model map names a root model that has no definition.
    E200,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E100 => "E100",
            ErrorCode::E200 => "E200",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "blank sub-model reference name",
            ErrorCode::E002 => "blank PLI block target",
            ErrorCode::E003 => "blank model name",
            ErrorCode::E100 => "cyclic sub-model reference",
            ErrorCode::E200 => "root model missing",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
