//! Model names and the entries that make up a model.
//!
//! A model is an ordered list of [`RawEntry`] values: concrete parts and
//! references to other models. Flattening turns the entries reachable from
//! the root model into [`FlatEntry`] values whose colors are fully resolved.

use std::fmt;

use serde::Serialize;

use crate::{color::ColorId, part::PartId};

/// A case-insensitive model name.
///
/// Names are trimmed and lower-cased on construction, so two names compare
/// equal exactly when they refer to the same model. Names may contain spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ModelName(String);

impl ModelName {
    /// The name given to a model that starts without any boundary line.
    pub const UNNAMED: &'static str = "unnamed";

    /// Create a normalized model name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(name.as_ref().trim().to_lowercase())
    }

    /// The implicit model name.
    pub fn unnamed() -> Self {
        Self(Self::UNNAMED.to_string())
    }

    /// Returns the normalized name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the name is empty after normalization.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of a model definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawEntry {
    /// A concrete placed part.
    DirectPart { color: ColorId, part: PartId },

    /// A placement of another model.
    ///
    /// `override_color` replaces the inherit color inside the referenced
    /// model. It is never the inherit sentinel itself.
    SubModelRef {
        override_color: Option<ColorId>,
        model_name: ModelName,
    },
}

impl RawEntry {
    /// Create a part entry.
    pub fn part(color: ColorId, part: PartId) -> Self {
        Self::DirectPart { color, part }
    }

    /// Create a reference entry. An inherit override is dropped.
    pub fn reference(override_color: Option<ColorId>, model_name: ModelName) -> Self {
        Self::SubModelRef {
            override_color: override_color.and_then(ColorId::into_override),
            model_name,
        }
    }

    /// Copy this entry into a model instance placed with `override_color`.
    ///
    /// Only inherit-colored parts take the override. Nested references keep
    /// their own override (or none) and are expanded by a later pass.
    pub fn instantiate(&self, override_color: Option<&ColorId>) -> Self {
        match (self, override_color) {
            (Self::DirectPart { color, part }, Some(override_color)) if color.is_inherit() => {
                Self::DirectPart {
                    color: override_color.clone(),
                    part: part.clone(),
                }
            }
            _ => self.clone(),
        }
    }

    /// Convert a part entry into a flat entry, resolving a leftover inherit
    /// color to `default_color`. References have no flat form.
    pub fn into_flat(self, default_color: &ColorId) -> Option<FlatEntry> {
        match self {
            Self::DirectPart { color, part } => {
                let color = if color.is_inherit() {
                    default_color.clone()
                } else {
                    color
                };
                Some(FlatEntry::new(color, part))
            }
            Self::SubModelRef { .. } => None,
        }
    }
}

/// A fully resolved part placement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FlatEntry {
    color: ColorId,
    part: PartId,
}

impl FlatEntry {
    /// Create a flat entry.
    pub fn new(color: ColorId, part: PartId) -> Self {
        Self { color, part }
    }

    /// Returns the resolved color.
    pub fn color(&self) -> &ColorId {
        &self.color
    }

    /// Returns the part identifier.
    pub fn part(&self) -> &PartId {
        &self.part
    }

    /// Split into color and part.
    pub fn into_parts(self) -> (ColorId, PartId) {
        (self.color, self.part)
    }
}
