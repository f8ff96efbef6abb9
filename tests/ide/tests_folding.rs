//! Folding ranges tests for the IDE layer.

use crate::helpers::parse_helpers::*;
use crate::helpers::source_fixtures::*;
use clarion::ide::{FoldingRangeKind, folding_ranges};

// =============================================================================
// FOLDING RANGES - STRUCTURE
// =============================================================================

#[test]
fn test_order_program_folds() {
    let parse = parse_clean(ORDER_PROGRAM);
    let ranges = folding_ranges(&parse);
    assert_eq!(
        fold_lines(&ranges),
        vec![
            (2, 7),   // MAP
            (3, 5),   // MODULE
            (10, 13), // GROUP
            (14, 16), // QUEUE
            (18, 19), // global CODE
            (21, 41), // Main PROCEDURE
            (23, 38), // CODE
            (24, 30), // LOOP
            (25, 29), // IF
            (27, 29), // ELSE of IF
            (31, 38), // CASE
            (36, 38), // ELSE of CASE
            (40, 41), // ROUTINE
        ]
    );
    assert!(ranges.iter().all(|r| r.kind == Some(FoldingRangeKind::Region)));
}

#[test]
fn test_file_and_window_folds() {
    let parse = parse_clean(FILE_AND_WINDOW);
    assert_eq!(
        fold_lines(&folding_ranges(&parse)),
        vec![
            (1, 7),   // FILE
            (3, 6),   // RECORD
            (9, 20),  // WINDOW
            (10, 14), // MENUBAR
            (11, 13), // MENU
            (15, 19), // SHEET
            (16, 18), // TAB
        ]
    );
}

#[test]
fn test_class_folds() {
    let parse = parse_clean(CLASS_DECLARATION);
    assert_eq!(fold_lines(&folding_ranges(&parse)), vec![(0, 5)]);
}

// =============================================================================
// FOLDING RANGES - IF FORMS
// =============================================================================

#[test]
fn test_single_line_if_never_folds() {
    let source = "  CODE\n  IF a THEN b = 1.\n  IF c THEN d = 2 END\n  e = 3\n";
    let parse = parse_clean(source);
    assert_eq!(fold_lines(&folding_ranges(&parse)), vec![(0, 3)]);
}

#[test]
fn test_multi_line_if_folds_each_clause_to_its_end() {
    let source = "  CODE\n  IF a = 1\n    b = 1\n  ELSIF a = 2\n    b = 2\n  ELSE\n    b = 3\n  END\n";
    let parse = parse_clean(source);
    assert_eq!(
        fold_lines(&folding_ranges(&parse)),
        vec![(0, 7), (1, 7), (3, 7), (5, 7)]
    );
}

#[test]
fn test_nested_if_in_elsif_folds_to_its_own_end() {
    let source = "  CODE\n  IF a = 1\n    b = 1\n  ELSIF a = 2\n    IF c\n      d = 1\n    END\n  ELSE\n    b = 3\n  END\n";
    let parse = parse_clean(source);
    let folds = fold_lines(&folding_ranges(&parse));
    assert!(folds.contains(&(3, 9)), "{folds:?}");
    assert!(folds.contains(&(4, 6)), "{folds:?}");
    assert!(folds.contains(&(7, 9)), "{folds:?}");
}

// =============================================================================
// FOLDING RANGES - COMMENTS
// =============================================================================

#[test]
fn test_comment_runs_fold_separately() {
    let source = "! one\n! two\n  CODE\n  ! three\n  ! four\n  ! five\n  x = 1 ! trailing\n  ! lone\n";
    let parse = parse_clean(source);
    let comments: Vec<_> = folding_ranges(&parse)
        .into_iter()
        .filter(|r| r.kind == Some(FoldingRangeKind::Comment))
        .map(|r| (r.start_line, r.end_line))
        .collect();
    assert_eq!(comments, vec![(0, 1), (3, 5)]);
}
