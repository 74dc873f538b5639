//! Whitespace-separated field lexer.
//!
//! Every row of the line-oriented dialect is a sequence of fields separated
//! by runs of whitespace. Fields keep their byte span in the document so that
//! diagnostics can point at them, and a row can be sliced verbatim from any
//! field to the end of the line (model names may contain spaces).

use winnow::{
    Parser as _,
    combinator::{preceded, repeat},
    error::ModalResult,
    stream::{LocatingSlice, Location},
    token::{take_till, take_while},
};

use crate::span::Span;

type Input<'a> = LocatingSlice<&'a str>;

/// A single field of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub text: &'a str,
    pub span: Span,
}

impl Field<'_> {
    /// Case-insensitive keyword comparison.
    pub fn is(&self, keyword: &str) -> bool {
        self.text.eq_ignore_ascii_case(keyword)
    }
}

/// Parse the text of one field at the current position.
fn field_text<'a>(input: &mut Input<'a>) -> ModalResult<(&'a str, Span)> {
    let start = input.current_token_start();
    let text = take_till(1.., |c: char| c.is_whitespace()).parse_next(input)?;
    let end = input.current_token_start();
    Ok((text, Span::new(start..end)))
}

/// Parse one field, skipping the whitespace in front of it.
fn field<'a>(input: &mut Input<'a>) -> ModalResult<(&'a str, Span)> {
    preceded(take_while(0.., |c: char| c.is_whitespace()), field_text).parse_next(input)
}

/// The fields of one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields<'a> {
    line: &'a str,
    offset: usize,
    fields: Vec<Field<'a>>,
}

impl<'a> Fields<'a> {
    /// Split `line`, which starts at byte `offset` of the document.
    pub fn split(line: &'a str, offset: usize) -> Self {
        let mut input = LocatingSlice::new(line);
        let parsed: ModalResult<Vec<(&str, Span)>> = repeat(0.., field).parse_next(&mut input);

        // `field` only backtracks at end of input, so `repeat` cannot fail.
        let fields = parsed
            .unwrap_or_default()
            .into_iter()
            .map(|(text, span)| Field {
                text,
                span: span.shift(offset),
            })
            .collect();

        Self {
            line,
            offset,
            fields,
        }
    }

    /// Get the field at `index`.
    pub fn get(&self, index: usize) -> Option<&Field<'a>> {
        self.fields.get(index)
    }

    /// Get the text of the field at `index`.
    pub fn text(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).map(|field| field.text)
    }

    /// Returns `true` if the field at `index` equals `keyword`, ignoring case.
    pub fn is(&self, index: usize, keyword: &str) -> bool {
        self.fields.get(index).is_some_and(|field| field.is(keyword))
    }

    /// Get the last field.
    pub fn last(&self) -> Option<&Field<'a>> {
        self.fields.last()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The verbatim text from the field at `index` to the end of the line,
    /// with trailing whitespace removed. Empty when the row is shorter.
    pub fn rest(&self, index: usize) -> &'a str {
        self.fields
            .get(index)
            .and_then(|field| self.line.get(field.span.start() - self.offset..))
            .map_or("", str::trim_end)
    }

    /// Span of the whole row, without surrounding whitespace.
    pub fn span(&self) -> Span {
        match (self.fields.first(), self.fields.last()) {
            (Some(first), Some(last)) => first.span.union(last.span),
            _ => Span::new(self.offset..self.offset),
        }
    }

    /// Empty span just after the last field, where a missing field would go.
    pub fn end_span(&self) -> Span {
        let end = self.span().end();
        Span::new(end..end)
    }
}
