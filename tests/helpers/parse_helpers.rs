//! Parse test helpers.

use clarion::ide::FoldingRange;
use clarion::parser::{ErrorCode, Parse, SyntaxKind, parse};

/// Parses `source` and asserts that no errors were reported.
pub fn parse_clean(source: &str) -> Parse {
    let parse = parse(source);
    assert!(
        parse.ok(),
        "unexpected parse errors: {:#?}",
        parse.errors.iter().map(|e| e.format()).collect::<Vec<_>>()
    );
    parse
}

/// Parses `source` and returns the error codes in report order.
pub fn error_codes(source: &str) -> Vec<ErrorCode> {
    parse(source).errors.iter().map(|e| e.code).collect()
}

/// Counts nodes of `kind` anywhere in the tree.
pub fn count_nodes(parse: &Parse, kind: SyntaxKind) -> usize {
    parse.syntax().descendants().filter(|n| n.kind() == kind).count()
}

/// (start, end) line pairs of folding ranges.
pub fn fold_lines(ranges: &[FoldingRange]) -> Vec<(u32, u32)> {
    ranges.iter().map(|r| (r.start_line, r.end_line)).collect()
}
