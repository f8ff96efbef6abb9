//! Syntax error types
//!
//! Provides error information including:
//! - Error codes for categorization
//! - Source position of the offending token
//! - Hints for fixes
//! - Related source locations

use rowan::{TextRange, TextSize};

use super::codes::ErrorCode;
use super::context::ParseContext;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// A hard error that prevents valid parsing
    #[default]
    Error,
    /// A warning that doesn't prevent parsing
    Warning,
    /// An informational hint
    Hint,
}

impl Severity {
    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Hint => "hint",
        }
    }
}

/// Related location information for an error
///
/// Used to point to related source locations, e.g.
/// "structure opened here" pointing to the `GROUP` keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub message: String,
    pub range: TextRange,
}

impl RelatedInfo {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// A syntax error located at the offending token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Human-readable error message
    pub message: String,
    /// Source range of the offending token
    pub range: TextRange,
    /// 1-based line of the offending token
    pub line: u32,
    /// 0-based column of the offending token
    pub column: u32,
    /// Text of the offending token (empty at end of input)
    pub token_text: String,
    /// Categorized error code
    pub code: ErrorCode,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
    /// Related source locations
    pub related: Vec<RelatedInfo>,
}

impl SyntaxError {
    pub fn new(
        message: impl Into<String>,
        range: TextRange,
        line: u32,
        column: u32,
        token_text: impl Into<String>,
        code: ErrorCode,
    ) -> Self {
        Self {
            message: message.into(),
            range,
            line,
            column,
            token_text: token_text.into(),
            code,
            hint: None,
            related: vec![],
        }
    }

    /// Create an error at a specific offset with a zero-width range
    pub fn at_offset(
        message: impl Into<String>,
        offset: TextSize,
        line: u32,
        column: u32,
        code: ErrorCode,
    ) -> Self {
        Self::new(message, TextRange::empty(offset), line, column, "", code)
    }

    /// Add a hint to this error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Add related information
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    pub fn has_hint(&self) -> bool {
        self.hint.is_some()
    }

    /// Width of the offending token in bytes, at least one
    pub fn width(&self) -> u32 {
        (self.token_text.len() as u32).max(1)
    }

    /// Format the error for display
    pub fn format(&self) -> String {
        let mut result = format!(
            "{}:{}: {}: {}",
            self.line, self.column, self.code, self.message
        );
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }
}

/// Message for a token that does not fit the surrounding structure
pub fn context_message(found: &str, context: ParseContext) -> String {
    format!(
        "unexpected {} {}, expected {}",
        found,
        context.description(),
        context.expected_description()
    )
}
