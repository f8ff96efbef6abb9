//! Rowan-based parser for Clarion source
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! The CST preserves all whitespace and comments; typed wrappers in [`ast`]
//! sit on top of it.
//!
//! ## Architecture
//!
//! ```text
//! Source Text (preprocessed)
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind, line and column
//!     ↓
//! Parser (Fast, then Full on error) → GreenNode tree + SyntaxErrors
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers over SyntaxNode
//! ```

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
pub mod errors;
pub mod grammar;
mod lexer;
mod syntax_kind;

pub use ast::*;
pub use errors::{ErrorCode, ParseContext, RelatedInfo, Severity, SyntaxError};
pub use grammar::Strategy;
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, parse, parse_with_cancellation, parse_with_strategy};
pub use syntax_kind::{
    ClarionLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxToken,
};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
