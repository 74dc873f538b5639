//! Color tokens as they appear in placement rows.
//!
//! A [`ColorId`] is an opaque token: usually an LDraw color number such as
//! `4`, occasionally a direct color (`0x2FF0000`) or a mnemonic. Two tokens
//! carry meaning of their own:
//!
//! - [`ColorId::INHERIT`] (`16`), the "main color" of a model, which is
//!   replaced by whatever color the model is instantiated with.
//! - [`ColorId::NO_COLOR`] (`-1`), used when a color is unknown or was never
//!   supplied.

use std::{fmt, str::FromStr};

use serde::Serialize;
use thiserror::Error;

/// Errors produced when a color token cannot be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("color token is empty")]
    Empty,

    #[error("color token `{0}` contains whitespace")]
    Whitespace(String),
}

/// An opaque color token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ColorId(String);

impl ColorId {
    /// The reserved "inherit the instantiating color" token.
    pub const INHERIT: &'static str = "16";

    /// The token used for parts without a known color.
    pub const NO_COLOR: &'static str = "-1";

    /// Create a color from a raw token. Surrounding whitespace is trimmed.
    pub fn new(token: impl AsRef<str>) -> Self {
        Self(token.as_ref().trim().to_string())
    }

    /// The inherit sentinel.
    pub fn inherit() -> Self {
        Self(Self::INHERIT.to_string())
    }

    /// The "no color" token.
    pub fn no_color() -> Self {
        Self(Self::NO_COLOR.to_string())
    }

    /// Returns `true` if this is the inherit sentinel.
    pub fn is_inherit(&self) -> bool {
        self.0 == Self::INHERIT
    }

    /// Converts a color written at a reference site into an override.
    ///
    /// A reference that asks for the inherit color carries no override.
    pub fn into_override(self) -> Option<ColorId> {
        if self.is_inherit() { None } else { Some(self) }
    }

    /// Returns the token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ColorId {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(ColorError::Empty);
        }
        if token.chars().any(char::is_whitespace) {
            return Err(ColorError::Whitespace(token.to_string()));
        }
        Ok(Self(token.to_string()))
    }
}
