//! Input format detection.

use std::fmt;

use mocparts_parser::encoding::strip_bom;

/// The dialect of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    /// LEGO Digital Designer XML scene.
    Lxfml,
    /// Line-oriented LDraw document, multi-part (`.mpd`) or single (`.ldr`).
    Mpd,
}

impl InputFormat {
    /// Detect the format from the first bytes of a document.
    ///
    /// Documents starting with an XML declaration (`<?`), optionally after a
    /// UTF-8 byte-order mark, are LXFML. Everything else is read as LDraw.
    ///
    /// ```
    /// # use mocparts::format::InputFormat;
    /// assert_eq!(InputFormat::detect(b"<?xml version=\"1.0\"?>"), InputFormat::Lxfml);
    /// assert_eq!(InputFormat::detect(b"0 FILE main.ldr"), InputFormat::Mpd);
    /// ```
    pub fn detect(bytes: &[u8]) -> Self {
        if strip_bom(bytes).starts_with(b"<?") {
            Self::Lxfml
        } else {
            Self::Mpd
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Lxfml => "LXFML",
            Self::Mpd => "MPD",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
