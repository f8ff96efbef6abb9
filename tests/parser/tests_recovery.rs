//! Error recovery tests.

use crate::helpers::parse_helpers::*;
use clarion::parser::{ErrorCode, Strategy, SyntaxKind, parse, parse_with_strategy};
use rstest::rstest;

#[rstest]
#[case::empty("")]
#[case::blank_lines("\n\n\n")]
#[case::bare_if("  IF")]
#[case::stray_end("END")]
#[case::open_paren("  CODE\n  x = (1 + ")]
#[case::open_args("  CODE\n  a = b(1,,3\n")]
#[case::open_map("  MAP\n")]
#[case::open_string("  CODE\n  x = 'unterminated\n")]
#[case::open_params("Proc PROCEDURE(\n")]
#[case::case_without_value("  CODE\n  CASE x\n  OF\n")]
#[case::lone_dots(".\n.\n")]
#[case::open_queue("Q QUEUE\n")]
#[case::open_window("W WINDOW('x')\n  MENU\n")]
#[case::open_loop("  CODE\n  LOOP\n")]
#[case::crlf("  CODE\r\n  x = 1\r\n")]
fn test_parse_is_lossless_on_any_input(#[case] source: &str) {
    let parse = parse(source);
    assert_eq!(parse.syntax().to_string(), source);
}

#[rstest]
#[case::indented_code("  CODE")]
#[case::indented_statement("  CODE\n  x = 1\n")]
#[case::leading_comment("! Order entry\n! generated\n  PROGRAM\n  CODE\n  x = 1\n")]
#[case::leading_blank_line("\n  MEMBER('app')\n")]
fn test_leading_trivia_belongs_to_source_file(#[case] source: &str) {
    for strategy in [Strategy::Fast, Strategy::Full] {
        let parse = parse_with_strategy(source, strategy);
        let root = parse.syntax();
        assert_eq!(root.kind(), SyntaxKind::SOURCE_FILE);
        assert_eq!(root.to_string(), source);
        assert!(parse.ok(), "{strategy:?}: {:?}", parse.errors);
    }
}

#[test]
fn test_missing_operand_keeps_statement() {
    let source = "  CODE\n  x = \n  y = 1\n";
    assert_eq!(error_codes(source), vec![ErrorCode::E0402]);
    assert_eq!(count_nodes(&parse(source), SyntaxKind::ASSIGNMENT_STMT), 2);
}

#[test]
fn test_unclosed_if_points_at_opener() {
    let parse = parse("  CODE\n  IF a = 1\n    b = 2\n");
    assert_eq!(parse.errors.len(), 1);
    let error = &parse.errors[0];
    assert_eq!(error.code, ErrorCode::E0202);
    assert!(error.message.contains("IF"), "{}", error.message);
    assert_eq!(error.related.len(), 1);
    assert_eq!(u32::from(error.related[0].range.start()), 9);
}

#[test]
fn test_stray_end_is_skipped() {
    let source = "  CODE\n  x = 1\n  END\n  y = 2\n";
    assert_eq!(error_codes(source), vec![ErrorCode::E0205]);
    assert_eq!(count_nodes(&parse(source), SyntaxKind::ASSIGNMENT_STMT), 2);
}

#[test]
fn test_unclosed_argument_list() {
    let source = "  CODE\n  Foo(a, b\n  x = 1\n";
    assert_eq!(error_codes(source), vec![ErrorCode::E0404]);
    assert_eq!(count_nodes(&parse(source), SyntaxKind::ASSIGNMENT_STMT), 1);
}

#[test]
fn test_queue_requires_a_field() {
    assert_eq!(
        error_codes("Q           QUEUE\n            END\n"),
        vec![ErrorCode::E0306]
    );
    assert!(error_codes("Q           QUEUE\nId            LONG\n            END\n").is_empty());
}

#[test]
fn test_error_position_is_one_based_line() {
    let parse = parse("  CODE\n  x = (1 + 2\n");
    assert_eq!(parse.errors.len(), 1);
    let error = &parse.errors[0];
    assert_eq!(error.code, ErrorCode::E0203);
    assert_eq!((error.line, error.column), (2, 12));
}

#[test]
fn test_errors_trigger_full_strategy() {
    assert_eq!(parse("  CODE\n  x = 1\n").strategy, Strategy::Fast);
    assert_eq!(parse("  CODE\n  x = \n").strategy, Strategy::Full);
}

#[test]
fn test_full_strategy_resolves_long_assignment_target() {
    let source = "  CODE\n  ?OkButton{PROP:Text} = 'Go'\n";
    let parse = parse_clean(source);
    assert_eq!(parse.strategy, Strategy::Full);
    assert_eq!(count_nodes(&parse, SyntaxKind::ASSIGNMENT_STMT), 1);
}

#[test]
fn test_file_body_errors_name_the_file() {
    let parse = parse("Cust FILE,DRIVER('TOPSPEED')\n  + 1\nRec RECORD\nId LONG\n  END\n  END\n");
    assert_eq!(parse.errors.len(), 1, "{:?}", parse.errors);
    let error = &parse.errors[0];
    assert_eq!(error.code, ErrorCode::E0303);
    assert!(error.message.contains("in FILE declaration"), "{}", error.message);
    assert_eq!(count_nodes(&parse, SyntaxKind::FILE_DECL), 1);
}
