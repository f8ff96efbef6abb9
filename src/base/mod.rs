//! Foundation types for the Clarion toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Line/column conversion
//! - [`Position`], [`Span`] - Line/column positions for editor-facing results
//! - [`DocumentId`], [`SourceBuffer`] - Documents handed in by the host
//!
//! This module has NO dependencies on other crate modules.

mod position;
mod source;
mod span;

pub use position::{Position, Span};
pub use source::{DocumentId, SourceBuffer};
pub use span::{LineCol, LineIndex, TextRange, TextSize, line_count};

// Re-export text-size types for convenience
pub use text_size;
