//! # clarion-base
//!
//! Core library for Clarion source analysis: conditional-block
//! preprocessing, lossless parsing, folding and diagnostics, redirection
//! search paths and overload-aware navigation.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide          → Folding ranges, diagnostics, cached analysis host
//!   ↓
//! hir          → Signatures, implementation/declaration lookup
//!   ↓
//! project      → Redirection files, search paths
//!   ↓
//! parser       → Logos lexer, recursive-descent parser, rowan trees
//!   ↓
//! preprocessor → COMPILE/OMIT blocks rewritten to placeholders
//!   ↓
//! base         → Primitives (Position, Span, LineIndex, SourceBuffer)
//! ```

// ============================================================================
// MODULES (dependency order: base → preprocessor → parser → project → hir → ide)
// ============================================================================

/// Foundation types: positions, line index, versioned source buffers
pub mod base;

/// Preprocessor: COMPILE/OMIT block rewriting
pub mod preprocessor;

/// Parser: Logos lexer, recursive-descent parser, error recovery
pub mod parser;

/// Project layout: redirection files and search paths
pub mod project;

/// Navigation: method signatures and symbol resolution
pub mod hir;

/// IDE features: folding ranges, diagnostics, parse cache
pub mod ide;

// Re-export foundation types
pub use base::{DocumentId, LineCol, LineIndex, Position, SourceBuffer, Span, TextRange, TextSize};

// Re-export the main entry points
pub use ide::{AnalysisHost, AnalysisOptions, Diagnostic, FoldingRange, folding_ranges};
pub use parser::{Parse, Strategy, SyntaxError, SyntaxKind, SyntaxNode, parse};
pub use preprocessor::{Preprocessed, preprocess};
pub use project::{RedirectionConfig, RedirectionResolver};

/// Cancellation token accepted by long-running operations.
pub use tokio_util::sync::CancellationToken;
