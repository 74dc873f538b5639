//! Byte encoding detection for line-oriented documents.
//!
//! Most documents are plain 7-bit ASCII. Some authoring tools write UTF-8,
//! and older ones write the Windows code page of the author's machine. The
//! prober tries the candidates in that order and picks the first one that
//! decodes the whole input. The last candidate accepts every byte sequence,
//! so probing never fails, but it can silently pick the wrong code page.

use std::{borrow::Cow, fmt};

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use log::debug;

/// The UTF-8 byte-order mark.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// An encoding the prober can choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceEncoding {
    /// 7-bit ASCII.
    Ascii,
    /// UTF-8.
    Utf8,
    /// The single-byte Latin-1 compatible fallback (Windows-1252).
    Windows1252,
}

impl SourceEncoding {
    /// Candidates in probing order.
    pub const CANDIDATES: [SourceEncoding; 3] = [Self::Ascii, Self::Utf8, Self::Windows1252];

    /// Returns the lower-case label of the encoding.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Utf8 => "utf-8",
            Self::Windows1252 => "windows-1252",
        }
    }

    /// Decode `bytes` in full, or return `None` if this encoding rejects them.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            Self::Ascii => {
                if Encoding::ascii_valid_up_to(bytes) == bytes.len() {
                    UTF_8.decode_without_bom_handling_and_without_replacement(bytes)
                } else {
                    None
                }
            }
            Self::Utf8 => UTF_8.decode_without_bom_handling_and_without_replacement(bytes),
            Self::Windows1252 => {
                let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
                (!had_errors).then_some(text)
            }
        }
    }
}

impl fmt::Display for SourceEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded document text together with the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub encoding: SourceEncoding,
    pub text: String,
}

/// Strip a leading UTF-8 byte-order mark, if present.
pub fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Pick an encoding for `bytes` and decode them.
///
/// A leading UTF-8 byte-order mark is skipped before probing.
///
/// ```
/// # use mocparts_parser::encoding::{probe, SourceEncoding};
/// let decoded = probe(b"0 FILE caf\xE9.ldr");
/// assert_eq!(decoded.encoding, SourceEncoding::Windows1252);
/// assert_eq!(decoded.text, "0 FILE caf\u{e9}.ldr");
/// ```
pub fn probe(bytes: &[u8]) -> DecodedText {
    let bytes = strip_bom(bytes);

    for encoding in SourceEncoding::CANDIDATES {
        if let Some(text) = encoding.decode(bytes) {
            debug!(encoding = encoding.name(), bytes = bytes.len(); "Decoded document");
            return DecodedText {
                encoding,
                text: text.into_owned(),
            };
        }
        debug!(encoding = encoding.name(); "Encoding rejected input");
    }

    // Windows-1252 maps every byte, so the loop above always returns.
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    DecodedText {
        encoding: SourceEncoding::Windows1252,
        text: text.into_owned(),
    }
}
