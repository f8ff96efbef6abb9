//! IDE features: tree-derived results for editor integrations.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: `folding_ranges` and `diagnostics` take a parse in
//!    and return data out
//! 2. **No LSP types**: Uses our own types, converted at the host boundary
//! 3. **Cached pipeline**: `AnalysisHost` runs preprocess → parse once per
//!    document version and serves every query from that result
//!
//! ## Usage
//!
//! ```ignore
//! use clarion::ide::{AnalysisHost, AnalysisOptions};
//!
//! let host = AnalysisHost::new(AnalysisOptions::default());
//! let folds = host.folding_ranges(&buffer);
//! ```

mod analysis;
pub mod cache;
mod diagnostics;
mod folding;

pub use analysis::{
    AnalysisHost, AnalysisOptions, ParsedDocument, parse_document, parse_document_with_cancellation,
};
pub use cache::{CacheStats, Clock, ManualClock, ParseCache, SystemClock};
pub use diagnostics::{DIAGNOSTIC_SOURCE, Diagnostic, diagnostics, directive_diagnostics};
pub use folding::{FoldPolicy, FoldableKind, FoldingRange, FoldingRangeKind, folding_ranges};
