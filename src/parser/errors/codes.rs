//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid tokens)
//! - E02xx: Structural errors (end markers, delimiters, statement ends)
//! - E03xx: Declaration errors (data entries, structures)
//! - E04xx: Expression errors
//! - E05xx: Section errors (DATA/CODE/MAP placement)
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Missing end of statement (newline or `;`)
    E0201,
    /// Structure not closed by `END` or `.`
    E0202,
    /// Unclosed parenthesis `(`
    E0203,
    /// Unclosed brace `{` or bracket `[`
    E0204,
    /// `END` or `.` without an open structure
    E0205,

    // =========================================================================
    // E03xx: Declaration errors
    // =========================================================================
    /// Missing label or name
    E0301,
    /// Invalid data declaration
    E0303,
    /// Unexpected token inside a structure
    E0304,
    /// Structure requires at least one field
    E0306,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Invalid expression
    E0401,
    /// Missing operand in expression
    E0402,
    /// Unclosed call argument list
    E0404,

    // =========================================================================
    // E05xx: Section errors
    // =========================================================================
    /// Section keyword where it cannot appear
    E0501,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0301 => "E0301",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0306 => "E0306",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0404 => "E0404",
            Self::E0501 => "E0501",
            Self::E0901 => "E0901",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205 => {
                "structural error"
            }
            Self::E0301 | Self::E0303 | Self::E0304 | Self::E0306 => "declaration error",
            Self::E0401 | Self::E0402 | Self::E0404 => "expression error",
            Self::E0501 => "section error",
            Self::E0901 => "syntax error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string literal",
            Self::E0201 => "missing end of statement",
            Self::E0202 => "unclosed structure",
            Self::E0203 => "unclosed parenthesis",
            Self::E0204 => "unclosed brace or bracket",
            Self::E0205 => "unexpected end marker",
            Self::E0301 => "missing name",
            Self::E0303 => "invalid data declaration",
            Self::E0304 => "unexpected token in structure",
            Self::E0306 => "missing field list",
            Self::E0401 => "invalid expression",
            Self::E0402 => "missing operand",
            Self::E0404 => "unclosed argument list",
            Self::E0501 => "misplaced section",
            Self::E0901 => "unexpected token",
        }
    }

    /// Check if this is a structural error (delimiter-related)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
