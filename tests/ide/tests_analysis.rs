//! Analysis host and parse cache tests.

use std::sync::Arc;
use std::time::Duration;

use clarion::CancellationToken;
use clarion::base::{DocumentId, SourceBuffer};
use clarion::ide::{
    AnalysisHost, AnalysisOptions, CacheStats, ManualClock, parse_document_with_cancellation,
};

fn host_with_clock(freshness: Duration) -> (AnalysisHost<Arc<ManualClock>>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let options = AnalysisOptions::default().with_freshness(freshness);
    (AnalysisHost::with_clock(clock.clone(), options), clock)
}

#[test]
fn test_same_version_is_served_from_cache() {
    let (host, _clock) = host_with_clock(Duration::from_secs(5));
    let buffer = SourceBuffer::new("a.clw", 1, "  CODE\n  x = 1\n");

    let first = host.analyze(&buffer);
    let second = host.analyze(&buffer);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        host.cache().stats(),
        CacheStats {
            hits: 1,
            misses: 1,
            invalidations: 0
        }
    );
}

#[test]
fn test_new_version_is_reparsed() {
    let (host, _clock) = host_with_clock(Duration::from_secs(5));
    let v1 = SourceBuffer::new("a.clw", 1, "  CODE\n");
    let v2 = v1.with_text("  CODE\n  IF x = 1\n    y = 2\n  END\n");
    assert_eq!(v2.version(), 2);

    assert!(host.folding_ranges(&v1).is_empty());
    let folds = host.folding_ranges(&v2);
    assert_eq!(folds.len(), 2);
    assert_eq!(host.analyze(&v2).version, 2);
}

#[test]
fn test_stale_entry_is_reparsed() {
    let (host, clock) = host_with_clock(Duration::from_secs(5));
    let buffer = SourceBuffer::new("a.clw", 1, "  CODE\n");

    let first = host.analyze(&buffer);
    clock.advance(Duration::from_secs(4));
    assert!(Arc::ptr_eq(&first, &host.analyze(&buffer)));
    clock.advance(Duration::from_secs(2));
    assert!(!Arc::ptr_eq(&first, &host.analyze(&buffer)));
    assert_eq!(host.cache().stats().misses, 2);
}

#[test]
fn test_remove_and_rename_invalidate() {
    let (host, _clock) = host_with_clock(Duration::from_secs(5));
    let a = SourceBuffer::new("a.clw", 1, "  CODE\n");
    let b = SourceBuffer::new("b.clw", 1, "  CODE\n");
    host.analyze(&a);
    host.analyze(&b);
    assert_eq!(host.cache().len(), 2);

    host.remove(&DocumentId::new("a.clw"));
    assert_eq!(host.cache().len(), 1);

    host.rename(&DocumentId::new("b.clw"), &DocumentId::new("c.clw"));
    assert!(host.cache().is_empty());
    assert_eq!(host.cache().stats().invalidations, 2);
}

#[test]
fn test_analyze_all_returns_in_order() {
    let host = AnalysisHost::default();
    let buffers: Vec<_> = (0..3)
        .map(|i| SourceBuffer::new(format!("doc{i}.clw"), i, "  CODE\n"))
        .collect();
    let documents = host.analyze_all(&buffers, &CancellationToken::new());
    let versions: Vec<_> = documents.iter().map(|d| d.version).collect();
    assert_eq!(versions, vec![0, 1, 2]);
}

#[test]
fn test_host_is_shareable_across_threads() {
    let host = Arc::new(AnalysisHost::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let host = host.clone();
            std::thread::spawn(move || {
                let buffer = SourceBuffer::new("shared.clw", 1, "  CODE\n  x = 1\n");
                host.analyze(&buffer).parse.ok()
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
    assert_eq!(host.cache().len(), 1);
}

#[test]
fn test_cancelled_parse_does_not_poison_cache() {
    let (host, _clock) = host_with_clock(Duration::from_secs(5));
    let buffer = SourceBuffer::new("a.clw", 1, "  CODE\n  a[1, 2, 3, 4, 5] = 1\n");
    let cancel = CancellationToken::new();
    cancel.cancel();

    let partial = host
        .cache()
        .get_or_parse(&buffer, |b| parse_document_with_cancellation(b, &cancel));
    assert!(!partial.parse.is_complete());
    assert!(host.cache().is_empty());

    let document = host.analyze(&buffer);
    assert!(document.parse.is_complete());
    assert!(document.parse.ok(), "{:?}", document.parse.errors);
    assert!(host.diagnostics(&buffer).is_empty());
}
