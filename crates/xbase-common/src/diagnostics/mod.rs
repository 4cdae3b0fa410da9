//! Diagnostic types and message lookup for the binder core.
//!
//! Message data lives in `data.rs`. Rendering is the caller's business; this
//! module only produces structured diagnostics.

use rustc_hash::FxHashSet;
use serde::Serialize;

use crate::Span;

mod data;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// Secondary location attached to a diagnostic, such as the other candidate
/// of an ambiguity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// A binding diagnostic with optional related information.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Error with a preformatted message.
    #[must_use]
    pub fn error(file: &str, span: Span, message: String, code: u32) -> Self {
        Self::new(DiagnosticCategory::Error, file, span, message, code)
    }

    /// Warning with a preformatted message.
    #[must_use]
    pub fn warning(file: &str, span: Span, message: String, code: u32) -> Self {
        Self::new(DiagnosticCategory::Warning, file, span, message, code)
    }

    /// Create a diagnostic from the message table, filling `{0}`, `{1}`, ...
    #[must_use]
    pub fn from_code(file: &str, span: Span, code: u32, args: &[&str]) -> Self {
        let message = get_diagnostic_message(code);
        let category = message.map_or(DiagnosticCategory::Error, |m| m.category);
        let text = message.map_or_else(String::new, |m| format_message(m.message, args));
        Self::new(category, file, span, text, code)
    }

    fn new(
        category: DiagnosticCategory,
        file: &str,
        span: Span,
        message: String,
        code: u32,
    ) -> Self {
        Self {
            file: file.to_string(),
            start: span.start,
            length: span.length,
            message_text: message,
            category,
            code,
            related_information: Vec::new(),
        }
    }

    /// Attach a pointer to another location, such as a declaration.
    #[must_use]
    pub fn with_related(mut self, file: &str, span: Span, message: String) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file: file.to_string(),
            start: span.start,
            length: span.length,
            message_text: message,
            category: DiagnosticCategory::Message,
            code: 0,
        });
        self
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

// =============================================================================
// Diagnostic Sink
// =============================================================================

/// Caller-supplied diagnostic sink.
///
/// Identical diagnostics are stored once, so a query that is retried (for
/// example a lookup re-run with diagnostics enabled) never double-reports.
#[derive(Debug, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic. Returns `false` if it was already present.
    pub fn push(&mut self, diagnostic: Diagnostic) -> bool {
        if self.seen.contains(&diagnostic) {
            return false;
        }
        self.seen.insert(diagnostic.clone());
        self.diagnostics.push(diagnostic);
        true
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.push(diagnostic);
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Codes in emission order.
    pub fn codes(&self) -> Vec<u32> {
        self.diagnostics.iter().map(|d| d.code).collect()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

// =============================================================================
// Message Lookup
// =============================================================================

/// Substitute `{N}` placeholders with `args[N]`. Placeholders without an
/// argument are kept as written.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        let arg = tail
            .find('}')
            .and_then(|close| Some((close, tail[1..close].parse::<usize>().ok()?)))
            .and_then(|(close, index)| Some((close, *args.get(index)?)));
        match arg {
            Some((close, value)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// One row of the message table.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|entry| entry.code == code)
}

/// Raw template for `code`, placeholders unfilled.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|entry| entry.message)
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
