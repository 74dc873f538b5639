//! The diagnostic trace collected while loading a model.
//!
//! Every stage appends human-readable messages to a [`DiagnosticTrace`].
//! The trace is append-only and only used for auditing; nothing reads it to
//! make decisions. Each message is also forwarded to the [`log`] facade.

use std::fmt;

use log::{info, warn};

/// Level of a trace message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceLevel {
    /// A progress note.
    Info,
    /// Something the user should look at, e.g. a missing sub-model.
    Warning,
}

/// A single trace message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceMessage {
    level: TraceLevel,
    text: String,
}

impl TraceMessage {
    /// Get the level of this message.
    pub fn level(&self) -> TraceLevel {
        self.level
    }

    /// Get the message text without any level prefix.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` if this is a warning.
    pub fn is_warning(&self) -> bool {
        self.level == TraceLevel::Warning
    }
}

impl fmt::Display for TraceMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            TraceLevel::Info => f.write_str(&self.text),
            TraceLevel::Warning => write!(f, "WARNING: {}", self.text),
        }
    }
}

/// Append-only, ordered sequence of trace messages.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticTrace {
    messages: Vec<TraceMessage>,
}

impl DiagnosticTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a progress note.
    pub fn info(&mut self, text: impl Into<String>) {
        let text = text.into();
        info!(target: "mocparts::trace", "{text}");
        self.push(TraceLevel::Info, text);
    }

    /// Append a warning.
    pub fn warn(&mut self, text: impl Into<String>) {
        let text = text.into();
        warn!(target: "mocparts::trace", "{text}");
        self.push(TraceLevel::Warning, text);
    }

    /// Get all messages in order.
    pub fn messages(&self) -> &[TraceMessage] {
        &self.messages
    }

    /// Iterate over the warnings only.
    pub fn warnings(&self) -> impl Iterator<Item = &TraceMessage> {
        self.messages.iter().filter(|message| message.is_warning())
    }

    /// Returns `true` if any message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|message| message.text.contains(needle))
    }

    /// Render every message as a string, in order.
    pub fn to_strings(&self) -> Vec<String> {
        self.messages.iter().map(ToString::to_string).collect()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if no message was recorded.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn push(&mut self, level: TraceLevel, text: String) {
        self.messages.push(TraceMessage { level, text });
    }
}
