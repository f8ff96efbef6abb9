//! Diagnostics tests.

use clarion::base::{Position, SourceBuffer};
use clarion::ide::{AnalysisHost, AnalysisOptions, DIAGNOSTIC_SOURCE, diagnostics};
use clarion::parser::{Severity, parse};

#[test]
fn test_syntax_error_becomes_diagnostic() {
    let parse = parse("  CODE\n  x = (1 + 2\n");
    let diags = diagnostics(&parse.errors);
    assert_eq!(diags.len(), 1);

    let diag = &diags[0];
    assert_eq!(diag.span.start, Position::new(1, 12));
    assert_eq!(diag.span.end, Position::new(1, 13));
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.source, DIAGNOSTIC_SOURCE);
    assert_eq!(diag.code.as_deref(), Some("E0203"));
    assert_eq!(diag.related.len(), 1);
}

#[test]
fn test_width_covers_offending_token() {
    let parse = parse("  CODE\n  x = 1\n  END\n");
    let diags = diagnostics(&parse.errors);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].span.start, Position::new(2, 2));
    assert_eq!(diags[0].span.end, Position::new(2, 5));
}

#[test]
fn test_clean_source_has_no_diagnostics() {
    let host = AnalysisHost::default();
    let buffer = SourceBuffer::new("ok.clw", 1, "  CODE\n  x = 1\n");
    assert!(host.diagnostics(&buffer).is_empty());
}

#[test]
fn test_omitted_code_produces_no_diagnostics() {
    let host = AnalysisHost::default();
    let buffer = SourceBuffer::new(
        "omit.clw",
        1,
        "  CODE\n  OMIT('**')\n  IF (((\n  **\n  x = 1\n",
    );
    assert!(host.diagnostics(&buffer).is_empty());
}

#[test]
fn test_unterminated_directive_warning() {
    let host = AnalysisHost::new(AnalysisOptions::default().with_unterminated_directives(true));
    let buffer = SourceBuffer::new("open.clw", 1, "  CODE\n  x = 1\n    OMIT('EndSkip')\n  y = 2\n");
    let diags = host.diagnostics(&buffer);
    assert_eq!(diags.len(), 1);

    let diag = &diags[0];
    assert_eq!(diag.severity, Severity::Warning);
    assert_eq!(diag.span.start, Position::new(2, 4));
    assert_eq!(diag.span.end, Position::new(2, 8));
    assert_eq!(diag.code.as_deref(), Some("unterminated-directive"));
    assert!(diag.message.contains("EndSkip"), "{}", diag.message);
}
