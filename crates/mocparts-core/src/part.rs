//! Part identifiers.

use std::fmt;

use serde::Serialize;

/// File suffixes stripped from part file names.
const FILE_SUFFIXES: [&str; 4] = ["dat", "ldr", "mpd", "l3b"];

/// An opaque part identifier, e.g. `3001` or `973p1b`.
///
/// The original case is kept for output. Use [`PartId::canonical`] for
/// case-insensitive comparisons.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PartId(String);

impl PartId {
    /// Create a part identifier from an already canonical id.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_string())
    }

    /// Create a part identifier from a part file name such as `3001.dat`.
    ///
    /// A trailing file type suffix is removed. Anything else, including
    /// subfile directories like `s\`, is kept verbatim.
    ///
    /// ```
    /// # use mocparts_core::part::PartId;
    /// assert_eq!(PartId::from_file_name("3001.DAT").as_str(), "3001");
    /// assert_eq!(PartId::from_file_name("973p1b").as_str(), "973p1b");
    /// ```
    pub fn from_file_name(file_name: &str) -> Self {
        let file_name = file_name.trim();
        let stem = file_name
            .rsplit_once('.')
            .filter(|(_, suffix)| {
                FILE_SUFFIXES
                    .iter()
                    .any(|known| suffix.eq_ignore_ascii_case(known))
            })
            .map_or(file_name, |(stem, _)| stem);
        Self(stem.to_string())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the upper-cased form used for case-insensitive matching.
    pub fn canonical(&self) -> String {
        self.0.to_ascii_uppercase()
    }

    /// Returns `true` if the identifier is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
