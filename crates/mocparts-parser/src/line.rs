//! Physical lines and their classification.
//!
//! [`classify`] looks at one line in isolation and decides what it means for
//! the model being collected. It keeps no state; meta-command blocks are
//! tracked by the collector, which switches to [`classify_in_capture`] while
//! the rows of a capture block are being skipped.

use std::iter::FusedIterator;

use mocparts_core::{
    color::ColorId,
    model::{ModelName, RawEntry},
    part::PartId,
};

use crate::{
    error::{Diagnostic, ErrorCode, Result},
    fields::Fields,
};

/// Minimum number of fields before a sub-model reference name.
pub const REFERENCE_NAME_FIELD: usize = 14;

/// Field holding the part file of an MLCad hose row.
pub const HOSE_PART_FIELD: usize = 17;

/// Color recorded for MLCad hose rows.
pub const HOSE_COLOR: &str = "0";

/// Field holding the target of an LPub PLI capture block.
const PLI_TARGET_FIELD: usize = 5;

/// Field holding the color of an LPub PLI capture block.
const PLI_COLOR_FIELD: usize = 6;

/// One physical line of a decoded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number.
    pub number: usize,
    /// Byte offset of the first character in the document.
    pub offset: usize,
    /// Line text without the line terminator.
    pub text: &'a str,
}

/// Iterator over the physical lines of a document.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: std::str::SplitInclusive<'a, char>,
    number: usize,
    offset: usize,
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let raw = self.rest.next()?;
        self.number += 1;
        let line = Line {
            number: self.number,
            offset: self.offset,
            text: raw.trim_end_matches(['\n', '\r']),
        };
        self.offset += raw.len();
        Some(line)
    }
}

impl FusedIterator for Lines<'_> {}

/// Split `source` into lines. Both `\n` and `\r\n` terminators are accepted.
pub fn lines(source: &str) -> Lines<'_> {
    Lines {
        rest: source.split_inclusive('\n'),
        number: 0,
        offset: 0,
    }
}

/// How a model boundary was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    /// `0 FILE <name>`: always starts a new model.
    File,
    /// `0 Name: <name>`: starts a model only outside of any model.
    NameAnnotation,
}

/// The kind of an LPub PLI block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaBlock {
    /// `PLI BEGIN SUB`: the block stands for the captured entry and the rows
    /// inside it are discarded.
    Capture(RawEntry),
    /// `PLI BEGIN IGN`: rows inside the block are collected normally.
    PassThrough,
}

/// What a line means to the collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Ignore,
    ModelBoundary {
        name: ModelName,
        kind: BoundaryKind,
    },
    MetaBlockOpen(MetaBlock),
    MetaBlockClose,
    DirectPart {
        color: ColorId,
        part: PartId,
    },
    SubModelRef {
        override_color: Option<ColorId>,
        name: ModelName,
    },
    ModelEnd,
}

impl LineKind {
    /// Convert a placement into the entry it adds to the open model.
    pub fn into_entry(self) -> Option<RawEntry> {
        match self {
            Self::DirectPart { color, part } => Some(RawEntry::part(color, part)),
            Self::SubModelRef {
                override_color,
                name,
            } => Some(RawEntry::reference(override_color, name)),
            _ => None,
        }
    }
}

/// ASCII case-insensitive substring test. `needle` must be lower-case.
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .as_bytes()
        .windows(needle.len())
        .any(|window| window.eq_ignore_ascii_case(needle.as_bytes()))
}

/// Classify a single line.
///
/// # Errors
///
/// Returns a diagnostic for lines that can never be resolved: a model or
/// sub-model reference without a name, or a PLI capture block without a
/// target.
pub fn classify(line: &Line<'_>) -> Result<LineKind> {
    let fields = Fields::split(line.text, line.offset);

    if fields.is_empty() {
        return Ok(LineKind::Ignore);
    }
    if fields.is(0, "0") {
        return classify_meta(line, &fields);
    }

    if contains_ignore_case(line.text, ".dat") {
        return Ok(match (fields.text(1), fields.last()) {
            (Some(color), Some(last)) => LineKind::DirectPart {
                color: ColorId::new(color),
                part: PartId::from_file_name(last.text),
            },
            _ => LineKind::Ignore,
        });
    }

    if contains_ignore_case(line.text, ".ldr") {
        if fields.len() < REFERENCE_NAME_FIELD {
            return Ok(LineKind::Ignore);
        }

        let name = fields.rest(REFERENCE_NAME_FIELD);
        if name.is_empty() {
            let span = fields.last().map_or_else(|| fields.span(), |field| field.span);
            return Err(Diagnostic::new(ErrorCode::E001, "sub-model reference has no name")
                .at_line(line.number)
                .with_label(span, "expected a model name after this field")
                .with_help("a reference row is `1 <color> <x y z> <a b c d e f g h i> <name>.ldr`"));
        }

        return Ok(LineKind::SubModelRef {
            override_color: fields.text(1).map(ColorId::new).and_then(ColorId::into_override),
            name: ModelName::new(name),
        });
    }

    Ok(LineKind::Ignore)
}

/// Classify a line inside a capture block.
///
/// The rows of a capture block are discarded unread, so only the markers
/// that can end the block matter: `PLI END`, `SYNTH END`, `NOFILE` and a
/// `FILE` boundary. Everything else is [`LineKind::Ignore`].
///
/// # Errors
///
/// Returns a diagnostic for a `FILE` boundary without a name.
pub fn classify_in_capture(line: &Line<'_>) -> Result<LineKind> {
    if !line.text.trim_start().starts_with('0') {
        return Ok(LineKind::Ignore);
    }

    let fields = Fields::split(line.text, line.offset);
    if !fields.is(0, "0") {
        return Ok(LineKind::Ignore);
    }
    match classify_boundary(line, &fields)? {
        Some(kind) => Ok(kind),
        None if is_block_close(&fields) => Ok(LineKind::MetaBlockClose),
        None => Ok(LineKind::Ignore),
    }
}

/// `0 FILE <name>` and `0 NOFILE`.
fn classify_boundary(line: &Line<'_>, fields: &Fields<'_>) -> Result<Option<LineKind>> {
    let Some(keyword) = fields.get(1) else {
        return Ok(None);
    };

    if keyword.is("NOFILE") {
        return Ok(Some(LineKind::ModelEnd));
    }
    if !keyword.is("FILE") {
        return Ok(None);
    }

    let name = fields.rest(2);
    if name.is_empty() {
        return Err(Diagnostic::new(ErrorCode::E003, "model has no name")
            .at_line(line.number)
            .with_label(keyword.span, "expected a model name after `FILE`")
            .with_help("give every model a name, e.g. `0 FILE main.ldr`"));
    }
    Ok(Some(LineKind::ModelBoundary {
        name: ModelName::new(name),
        kind: BoundaryKind::File,
    }))
}

/// `0 !LPUB PLI END` and `0 SYNTH END`, in any of their spellings.
fn is_block_close(fields: &Fields<'_>) -> bool {
    let lpub = fields.is(1, "!LPUB") || fields.is(1, "LPUB");
    let synth = fields.is(1, "SYNTH") || fields.is(1, "!SYNTH");
    (lpub && fields.is(2, "PLI") && fields.is(3, "END")) || (synth && fields.is(2, "END"))
}

/// Classify a line whose first field is the meta marker `0`.
fn classify_meta(line: &Line<'_>, fields: &Fields<'_>) -> Result<LineKind> {
    if let Some(kind) = classify_boundary(line, fields)? {
        return Ok(kind);
    }
    if is_block_close(fields) {
        return Ok(LineKind::MetaBlockClose);
    }

    let Some(keyword) = fields.get(1) else {
        return Ok(LineKind::Ignore);
    };

    if let Some(glued) = strip_prefix_ignore_case(keyword.text, "Name:") {
        let name = if glued.is_empty() {
            fields.rest(2)
        } else {
            fields.rest(1).get("Name:".len()..).unwrap_or("").trim()
        };
        if name.is_empty() {
            return Ok(LineKind::Ignore);
        }
        return Ok(LineKind::ModelBoundary {
            name: ModelName::new(name),
            kind: BoundaryKind::NameAnnotation,
        });
    }

    if keyword.is("!LPUB") || keyword.is("LPUB") {
        return classify_lpub(line, fields);
    }

    if keyword.is("MLCAD") {
        if fields.is(2, "HIDE") || !contains_ignore_case(line.text, ".dat") {
            return Ok(LineKind::Ignore);
        }
        return Ok(match fields.text(HOSE_PART_FIELD) {
            Some(part) => LineKind::DirectPart {
                color: ColorId::new(HOSE_COLOR),
                part: PartId::from_file_name(part),
            },
            None => LineKind::Ignore,
        });
    }

    Ok(LineKind::Ignore)
}

/// Classify `0 !LPUB ...` lines. Only PLI block openers are left here.
fn classify_lpub(line: &Line<'_>, fields: &Fields<'_>) -> Result<LineKind> {
    if !fields.is(2, "PLI") || !fields.is(3, "BEGIN") {
        return Ok(LineKind::Ignore);
    }

    if fields.is(4, "IGN") {
        return Ok(LineKind::MetaBlockOpen(MetaBlock::PassThrough));
    }
    if !fields.is(4, "SUB") {
        return Ok(LineKind::Ignore);
    }

    let Some(target) = fields.text(PLI_TARGET_FIELD) else {
        return Err(Diagnostic::new(ErrorCode::E002, "PLI capture block has no target")
            .at_line(line.number)
            .with_label(fields.end_span(), "expected a part or model name")
            .with_context(fields.span(), "capture block header")
            .with_help("write `0 !LPUB PLI BEGIN SUB <part>.dat <color>`"));
    };

    let entry = if contains_ignore_case(target, ".ldr") {
        RawEntry::reference(None, ModelName::new(target))
    } else {
        let color = fields
            .text(PLI_COLOR_FIELD)
            .map_or_else(ColorId::no_color, ColorId::new);
        RawEntry::part(color, PartId::from_file_name(target))
    };

    Ok(LineKind::MetaBlockOpen(MetaBlock::Capture(entry)))
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &text[prefix.len()..])
}
