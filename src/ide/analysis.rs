//! Entry point for editor features.
//!
//! The host owns the parse cache and options. Each query takes the
//! host's current `SourceBuffer`, runs the pipeline
//! (preprocess → parse → cache) and derives its result from the tree.
//!
//! ## Usage
//!
//! ```ignore
//! let host = AnalysisHost::new(AnalysisOptions::default());
//! let buffer = SourceBuffer::new("file:///main.clw", 1, text);
//!
//! let folds = host.folding_ranges(&buffer);
//! let diags = host.diagnostics(&buffer);
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::cache::{Clock, DEFAULT_FRESHNESS, ParseCache, SystemClock};
use super::{Diagnostic, FoldingRange, diagnostics, directive_diagnostics, folding_ranges};
use crate::base::{DocumentId, SourceBuffer};
use crate::parser::{Parse, parse_with_cancellation};
use crate::preprocessor::{PreprocessStats, preprocess};

/// Options for the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Age after which a cached parse is rebuilt
    pub freshness: Duration,
    /// Report `COMPILE`/`OMIT` blocks that never reach their terminator
    pub report_unterminated_directives: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            freshness: DEFAULT_FRESHNESS,
            report_unterminated_directives: false,
        }
    }
}

impl AnalysisOptions {
    pub fn with_freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    pub fn with_unterminated_directives(mut self, report: bool) -> Self {
        self.report_unterminated_directives = report;
        self
    }
}

/// A document run through the pipeline.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub version: i32,
    pub parse: Parse,
    pub stats: PreprocessStats,
}

/// Preprocess and parse a buffer.
pub fn parse_document(buffer: &SourceBuffer) -> ParsedDocument {
    parse_document_with_cancellation(buffer, &CancellationToken::new())
}

/// Like [`parse_document`], but skips the full-lookahead pass once
/// `cancel` fires; such documents are never cached.
pub fn parse_document_with_cancellation(
    buffer: &SourceBuffer,
    cancel: &CancellationToken,
) -> ParsedDocument {
    let preprocessed = preprocess(buffer.text());
    let parse = parse_with_cancellation(&preprocessed.text, cancel);
    tracing::debug!(
        document = %buffer.id(),
        version = buffer.version(),
        strategy = ?parse.strategy,
        errors = parse.errors.len(),
        "parsed document"
    );
    ParsedDocument {
        version: buffer.version(),
        parse,
        stats: preprocessed.stats,
    }
}

/// Owns the parse cache and serves tree-derived queries.
pub struct AnalysisHost<C: Clock = SystemClock> {
    cache: ParseCache<C>,
    options: AnalysisOptions,
}

impl Default for AnalysisHost<SystemClock> {
    fn default() -> Self {
        Self::new(AnalysisOptions::default())
    }
}

impl AnalysisHost<SystemClock> {
    pub fn new(options: AnalysisOptions) -> Self {
        Self::with_clock(SystemClock, options)
    }
}

impl<C: Clock> AnalysisHost<C> {
    pub fn with_clock(clock: C, options: AnalysisOptions) -> Self {
        Self {
            cache: ParseCache::with_clock(clock, options.freshness),
            options,
        }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    pub fn cache(&self) -> &ParseCache<C> {
        &self.cache
    }

    /// The parsed document for this buffer, from cache when still valid.
    pub fn analyze(&self, buffer: &SourceBuffer) -> Arc<ParsedDocument> {
        self.cache.get_or_parse(buffer, parse_document)
    }

    pub fn folding_ranges(&self, buffer: &SourceBuffer) -> Vec<FoldingRange> {
        folding_ranges(&self.analyze(buffer).parse)
    }

    /// Syntax errors, plus unterminated directives when enabled.
    pub fn diagnostics(&self, buffer: &SourceBuffer) -> Vec<Diagnostic> {
        let document = self.analyze(buffer);
        let mut result = diagnostics(&document.parse.errors);
        if self.options.report_unterminated_directives {
            result.extend(directive_diagnostics(&document.stats));
        }
        result
    }

    /// Analyze several documents, stopping once `cancel` fires.
    ///
    /// Documents analyzed before cancellation are returned.
    pub fn analyze_all(
        &self,
        buffers: &[SourceBuffer],
        cancel: &CancellationToken,
    ) -> Vec<Arc<ParsedDocument>> {
        let mut documents = Vec::with_capacity(buffers.len());
        for buffer in buffers {
            if cancel.is_cancelled() {
                tracing::debug!(
                    done = documents.len(),
                    total = buffers.len(),
                    "batch analysis cancelled"
                );
                break;
            }
            let document = self
                .cache
                .get_or_parse(buffer, |b| parse_document_with_cancellation(b, cancel));
            documents.push(document);
        }
        documents
    }

    /// Forget a deleted document.
    pub fn remove(&self, id: &DocumentId) {
        self.cache.invalidate(id);
    }

    /// Forget both identities of a renamed document.
    pub fn rename(&self, old: &DocumentId, new: &DocumentId) {
        self.cache.rename(old, new);
    }
}
