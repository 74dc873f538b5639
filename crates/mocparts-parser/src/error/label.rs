//! Underlined source text attached to a [`Diagnostic`](super::Diagnostic).

use crate::span::Span;

/// What a label points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelRole {
    /// The field or gap that makes the row unusable.
    Offending,
    /// Text around the problem, such as the block header a row belongs to.
    Context,
}

/// A message tied to a byte span of the decoded document.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    role: LabelRole,
}

impl Label {
    pub fn offending(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            role: LabelRole::Offending,
        }
    }

    pub fn context(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            role: LabelRole::Context,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn role(&self) -> LabelRole {
        self.role
    }

    pub fn is_context(&self) -> bool {
        self.role == LabelRole::Context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles() {
        let missing = Label::offending(Span::new(26..34), "expected a model name after this field");
        let header = Label::context(Span::new(2..21), "capture block opened here");

        assert_eq!(missing.role(), LabelRole::Offending);
        assert_eq!(missing.span().len(), 8);
        assert!(!missing.is_context());
        assert!(header.is_context());
        assert_eq!(header.message(), "capture block opened here");
    }
}
