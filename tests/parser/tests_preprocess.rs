//! Preprocessing ahead of parsing.

use crate::helpers::parse_helpers::*;
use clarion::base::line_count;
use clarion::ide::{FoldingRangeKind, folding_ranges};
use clarion::preprocessor::{is_placeholder, preprocess};
use rstest::rstest;

#[rstest]
#[case::empty("")]
#[case::no_directives("  CODE\n  x = 1\n")]
#[case::no_trailing_newline("  CODE\n  OMIT('**')\n  x\n  **")]
#[case::crlf("  OMIT('**')\r\n  x\r\n  **\r\n  y\r\n")]
#[case::mixed_endings("a\r\nOMIT('E')\nb\r\nE\n")]
#[case::unterminated("  COMPILE('never')\n  a\n  b\n")]
#[case::back_to_back("  OMIT('A')\n  A\n  OMIT('B')\n  B\n")]
#[case::nested("  OMIT('A')\n  COMPILE('B')\n  B\n  A\n")]
#[case::directive_in_comment("  ! OMIT('X')\n  x = 1\n")]
#[case::directive_in_string("  s = 'OMIT(''X'')'\n  X\n")]
fn test_line_count_is_preserved(#[case] source: &str) {
    let result = preprocess(source);
    assert_eq!(line_count(&result.text), line_count(source));
}

#[test]
fn test_compile_block_with_condition() {
    let source = "  x = 1\n  COMPILE('***',_DEBUG_=1)\n  Trace('a')\n  ***\n  y = 2\n";
    let result = preprocess(source);
    let lines: Vec<_> = result.text.lines().collect();
    assert_eq!(lines[0], "  x = 1");
    assert!(is_placeholder(lines[1]));
    assert_eq!(lines[2], "");
    assert!(is_placeholder(lines[3]));
    assert_eq!(lines[4], "  y = 2");
    assert!(lines[1].starts_with("  "));
}

#[test]
fn test_omitted_text_never_reaches_the_parser() {
    let source = "  CODE\n  COMPILE('***',_DEBUG_)\n  Trace(((\n  ***\n  IF a = 1\n    b = 2\n  END\n";
    let result = preprocess(source);
    let parse = parse_clean(&result.text);
    let folds = fold_lines(&folding_ranges(&parse));
    assert!(folds.contains(&(4, 6)), "{folds:?}");
    assert!(folds.contains(&(0, 6)), "{folds:?}");
}

#[test]
fn test_placeholders_do_not_fold_as_comments() {
    let source = "  CODE\n  OMIT('X')\n  a\n  X\n  b = 1\n";
    let result = preprocess(source);
    let parse = parse_clean(&result.text);
    assert!(
        folding_ranges(&parse)
            .iter()
            .all(|r| r.kind != Some(FoldingRangeKind::Comment))
    );
}
