//! Fatal document problems.
//!
//! Every problem the parser reports stops the load: a row that can never
//! be resolved, a reference cycle or a missing root. A [`Diagnostic`]
//! records which of those happened, where in the document it was found and
//! which model was being read at the time.

use std::fmt;

use mocparts_core::model::ModelName;

use crate::{
    error::{error_code::ErrorCode, label::Label},
    span::Span,
};

/// A fatal problem found while reading or flattening a document.
///
/// Rendered on one line as
///
/// ```text
/// error[E001]: sub-model reference has no name (line 12, model `chassis.ldr`)
/// ```
///
/// and, by the CLI, as a source snippet with the labels underlined.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: ErrorCode,
    message: String,
    line: Option<usize>,
    model: Option<ModelName>,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic for `code`.
    ///
    /// # Example
    ///
    /// ```
    /// # use mocparts_parser::error::{Diagnostic, ErrorCode};
    /// # use mocparts_parser::Span;
    /// let diag = Diagnostic::new(ErrorCode::E003, "model has no name")
    ///     .at_line(1)
    ///     .with_label(Span::new(2..6), "expected a model name after `FILE`");
    ///
    /// assert_eq!(diag.to_string(), "error[E003]: model has no name (line 1)");
    /// ```
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            line: None,
            model: None,
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The 1-based document line the problem was found on.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// The model that was open when the problem was found.
    pub fn model(&self) -> Option<&ModelName> {
        self.model.as_ref()
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Record the enclosing model. A model set earlier is kept.
    pub fn in_model(mut self, model: &ModelName) -> Self {
        self.model.get_or_insert_with(|| model.clone());
        self
    }

    /// Underline the text that caused the problem.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::offending(span, message));
        self
    }

    /// Point at surrounding text that explains the problem.
    pub fn with_context(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::context(span, message));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Line and model as a short suffix, e.g. `line 3, model `a.ldr``.
    pub fn location(&self) -> Option<String> {
        match (self.line, &self.model) {
            (Some(line), Some(model)) => Some(format!("line {line}, model `{model}`")),
            (Some(line), None) => Some(format!("line {line}")),
            (None, Some(model)) => Some(format!("model `{model}`")),
            (None, None) => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)?;
        if let Some(location) = self.location() {
            write!(f, " ({location})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}
