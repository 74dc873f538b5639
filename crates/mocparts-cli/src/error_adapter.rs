//! Rendering [`MocError`] with miette.
//!
//! A parser diagnostic becomes a snippet of the decoded document with the
//! offending field underlined. Every other error is reported as a single
//! line under a `mocparts::*` code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use mocparts::{MocError, lxfml::ImportError};
use mocparts_parser::{
    Span,
    error::{Diagnostic, LabelRole},
};

/// A parser diagnostic shown against the document it was found in.
#[derive(Debug)]
pub struct SnippetReport<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> SnippetReport<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Display for SnippetReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diag.message())?;
        if let Some(model) = self.diag.model() {
            write!(f, " in model `{model}`")?;
        }
        Ok(())
    }
}

impl std::error::Error for SnippetReport<'_> {}

impl MietteDiagnostic for SnippetReport<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.diag.code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        if self.diag.labels().is_empty() {
            return None;
        }
        Some(Box::new(self.diag.labels().iter().map(|label| {
            let text = Some(label.message().to_string());
            let span = source_span(label.span());
            match label.role() {
                LabelRole::Offending => LabeledSpan::new_primary_with_span(text, span),
                LabelRole::Context => LabeledSpan::new_with_span(text, span),
            }
        })))
    }
}

/// An error without a position in the document.
#[derive(Debug)]
pub struct PlainReport<'a>(&'a MocError);

impl fmt::Display for PlainReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

impl std::error::Error for PlainReport<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for PlainReport<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            MocError::Io(_) => "mocparts::io",
            MocError::Parse { .. } => "mocparts::parse",
            MocError::Import(_) => "mocparts::import",
            MocError::Config(_) => "mocparts::config",
            MocError::Report(_) => "mocparts::report",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            MocError::Import(ImportError::MissingTable) => {
                "pass --table <ldraw.xml> or set `lxfml.translation_table` in the config"
            }
            MocError::Config(_) => "check the [resolve] and [inventory] sections of the config",
            _ => return None,
        };
        Some(Box::new(help))
    }
}

fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Pick the miette report for `err`.
pub fn to_report(err: &MocError) -> Box<dyn MietteDiagnostic + '_> {
    match err {
        MocError::Parse { err, src } => Box::new(SnippetReport::new(err.diagnostic(), src)),
        other => Box::new(PlainReport(other)),
    }
}
