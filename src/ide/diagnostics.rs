//! Editor-facing view of syntax errors.

use smol_str::SmolStr;

use crate::base::Span;
use crate::parser::{RelatedInfo, Severity, SyntaxError};
use crate::preprocessor::PreprocessStats;

/// Source tag attached to every diagnostic.
pub const DIAGNOSTIC_SOURCE: &str = "clarion";

/// A diagnostic message (0-based positions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Span,
    pub severity: Severity,
    pub message: String,
    pub source: &'static str,
    pub code: Option<SmolStr>,
    pub hint: Option<String>,
    /// Related locations as byte ranges in the analyzed text
    pub related: Vec<RelatedInfo>,
}

impl Diagnostic {
    pub fn error(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            severity: Severity::Error,
            message: message.into(),
            source: DIAGNOSTIC_SOURCE,
            code: None,
            hint: None,
            related: Vec::new(),
        }
    }

    pub fn warning(span: Span, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(span, message)
        }
    }

    pub fn with_code(mut self, code: impl Into<SmolStr>) -> Self {
        self.code = Some(code.into());
        self
    }
}

/// Convert syntax errors into diagnostics.
///
/// Each range starts at the offending token and spans its width, at least
/// one column.
pub fn diagnostics(errors: &[SyntaxError]) -> Vec<Diagnostic> {
    errors
        .iter()
        .map(|error| {
            let line = error.line.saturating_sub(1);
            let span = Span::on_line(line, error.column, error.width());
            let mut diagnostic =
                Diagnostic::error(span, error.message.clone()).with_code(error.code.as_str());
            diagnostic.hint = error.hint.clone();
            diagnostic.related = error.related.clone();
            diagnostic
        })
        .collect()
}

/// Warnings for `COMPILE`/`OMIT` blocks whose terminator never appeared.
pub fn directive_diagnostics(stats: &PreprocessStats) -> Vec<Diagnostic> {
    stats
        .unterminated
        .iter()
        .map(|block| {
            let keyword = block.kind.as_str();
            let span = Span::on_line(block.line, block.column, keyword.len() as u32);
            Diagnostic::warning(
                span,
                format!(
                    "unterminated {} block: terminator '{}' not found",
                    keyword.to_ascii_uppercase(),
                    block.terminator
                ),
            )
            .with_code("unterminated-directive")
        })
        .collect()
}
