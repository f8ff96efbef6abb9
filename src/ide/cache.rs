//! Version-aware parse cache.
//!
//! Every entry is tagged with the document version that produced it and the
//! time it was stored. An entry is served only while the version matches
//! and it is younger than the freshness window; otherwise it is replaced.

use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::analysis::ParsedDocument;
use crate::base::{DocumentId, SourceBuffer};

/// Default age after which an entry is re-parsed even at the same version.
pub const DEFAULT_FRESHNESS: Duration = Duration::from_secs(5);

/// Time source for entry ages.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// A cached parse of one document version.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub version: i32,
    pub document: Arc<ParsedDocument>,
    pub stored_at: Instant,
}

/// Hit/miss counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: FxHashMap<DocumentId, CacheEntry>,
    stats: CacheStats,
}

/// Parse results keyed by document identity.
#[derive(Debug)]
pub struct ParseCache<C: Clock = SystemClock> {
    state: Mutex<CacheState>,
    clock: C,
    freshness: Duration,
}

impl ParseCache<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock, DEFAULT_FRESHNESS)
    }
}

impl Default for ParseCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> ParseCache<C> {
    pub fn with_clock(clock: C, freshness: Duration) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            clock,
            freshness,
        }
    }

    /// The cached document for this buffer's version, if still fresh.
    pub fn get(&self, buffer: &SourceBuffer) -> Option<Arc<ParsedDocument>> {
        let now = self.clock.now();
        let mut state = self.state.lock();
        let fresh = state
            .entries
            .get(buffer.id())
            .filter(|entry| {
                entry.version == buffer.version()
                    && now.saturating_duration_since(entry.stored_at) < self.freshness
            })
            .map(|entry| entry.document.clone());
        if fresh.is_some() {
            state.stats.hits += 1;
        }
        fresh
    }

    /// Return the cached document or compute and store a new one.
    ///
    /// `parse` runs without the lock held. Incomplete parses are returned
    /// but not stored.
    pub fn get_or_parse(
        &self,
        buffer: &SourceBuffer,
        parse: impl FnOnce(&SourceBuffer) -> ParsedDocument,
    ) -> Arc<ParsedDocument> {
        if let Some(document) = self.get(buffer) {
            tracing::trace!(document = %buffer.id(), version = buffer.version(), "parse cache hit");
            return document;
        }
        tracing::debug!(document = %buffer.id(), version = buffer.version(), "parse cache miss");

        let document = Arc::new(parse(buffer));
        if !document.parse.is_complete() {
            tracing::debug!(document = %buffer.id(), "cancelled parse not cached");
            self.state.lock().stats.misses += 1;
            return document;
        }
        let entry = CacheEntry {
            version: buffer.version(),
            document: document.clone(),
            stored_at: self.clock.now(),
        };
        let mut state = self.state.lock();
        state.stats.misses += 1;
        state.entries.insert(buffer.id().clone(), entry);
        document
    }

    /// Drop the entry for a deleted or changed document.
    pub fn invalidate(&self, id: &DocumentId) -> bool {
        let mut state = self.state.lock();
        let removed = state.entries.remove(id).is_some();
        if removed {
            state.stats.invalidations += 1;
            tracing::debug!(document = %id, "parse cache entry invalidated");
        }
        removed
    }

    /// Forget both identities of a renamed document.
    pub fn rename(&self, old: &DocumentId, new: &DocumentId) {
        self.invalidate(old);
        self.invalidate(new);
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        let count = state.entries.len();
        state.entries.clear();
        tracing::debug!(entries = count, "parse cache cleared");
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        self.state.lock().stats
    }

    pub fn freshness(&self) -> Duration {
        self.freshness
    }
}
