//! Statement and expression tests.

use crate::helpers::parse_helpers::*;
use crate::helpers::source_fixtures::ORDER_PROGRAM;
use clarion::parser::{AstNode, CaseStmt, DoStmt, IfStmt, SyntaxKind, SyntaxNode};
use rstest::rstest;

fn first<N: AstNode>(root: &SyntaxNode) -> N {
    root.descendants().find_map(N::cast).unwrap()
}

// =============================================================================
// CONTROL FLOW
// =============================================================================

#[test]
fn test_order_program_statements() {
    let parse = parse_clean(ORDER_PROGRAM);
    let root = parse.syntax();

    assert_eq!(count_nodes(&parse, SyntaxKind::LOOP_STMT), 1);
    let if_stmt: IfStmt = first(&root);
    assert!(if_stmt.is_terminated());
    assert!(if_stmt.else_clause().is_some());
    assert_eq!(if_stmt.elsif_clauses().count(), 0);

    let case: CaseStmt = first(&root);
    assert_eq!(case.of_clauses().count(), 2);

    let do_stmt: DoStmt = first(&root);
    assert_eq!(do_stmt.target().as_deref(), Some("Report"));

    assert_eq!(count_nodes(&parse, SyntaxKind::RETURN_STMT), 1);
    assert_eq!(count_nodes(&parse, SyntaxKind::EXIT_STMT), 1);
}

#[test]
fn test_elsif_clauses_are_children_of_if() {
    let source = "  CODE\n  IF a = 1\n    b = 1\n  ELSIF a = 2\n    b = 2\n  ELSIF a = 3\n    b = 3\n  END\n";
    let parse = parse_clean(source);
    let if_stmt: IfStmt = first(&parse.syntax());
    assert_eq!(if_stmt.elsif_clauses().count(), 2);
    assert!(if_stmt.else_clause().is_none());
}

#[test]
fn test_single_line_if() {
    let parse = parse_clean("  CODE\n  IF x THEN y = 1.\n  z = 2\n");
    let if_stmt: IfStmt = first(&parse.syntax());
    assert!(if_stmt.is_terminated());
    assert_eq!(count_nodes(&parse, SyntaxKind::ASSIGNMENT_STMT), 2);
}

#[rstest]
#[case::counter("  LOOP i = 1 TO 10 BY 2\n    x += i\n  END\n")]
#[case::times("  LOOP 3 TIMES\n    x += 1\n  END\n")]
#[case::until_head("  LOOP UNTIL x > 10\n    x += 1\n  END\n")]
#[case::while_trailer("  LOOP\n    x += 1\n  WHILE x < 10\n")]
#[case::plain("  LOOP\n    BREAK\n  END\n")]
#[case::dot_terminated("  LOOP\n    CYCLE\n  .\n")]
fn test_loop_forms(#[case] body: &str) {
    let parse = parse_clean(&format!("  CODE\n{body}"));
    assert_eq!(count_nodes(&parse, SyntaxKind::LOOP_STMT), 1);
}

#[test]
fn test_execute_statement() {
    let source = "  CODE\n  EXECUTE choice\n    DoFirst()\n    DoSecond()\n  ELSE\n    DoOther()\n  END\n";
    let parse = parse_clean(source);
    assert_eq!(count_nodes(&parse, SyntaxKind::EXECUTE_STMT), 1);
    assert_eq!(count_nodes(&parse, SyntaxKind::CALL_STMT), 3);
}

#[test]
fn test_semicolon_separates_statements() {
    let parse = parse_clean("  CODE\n  a = 1; b = 2\n");
    assert_eq!(count_nodes(&parse, SyntaxKind::ASSIGNMENT_STMT), 2);
}

#[test]
fn test_keywords_are_case_insensitive() {
    let parse = parse_clean("  code\n  if a = 1 then b = 1.\n  Loop\n    Break\n  End\n");
    assert_eq!(count_nodes(&parse, SyntaxKind::IF_STMT), 1);
    assert_eq!(count_nodes(&parse, SyntaxKind::LOOP_STMT), 1);
}

#[rstest]
#[case::plain("x = 1")]
#[case::add("x += 1")]
#[case::subtract("x -= 1")]
#[case::multiply("x *= 2")]
#[case::divide("x /= 2")]
#[case::reference("x &= y")]
#[case::deep("x :=: y")]
#[case::member("SELF.Count = Pre:Field + 1")]
#[case::field_equate("?OkButton{PROP:Text} = 'Go'")]
fn test_assignment_operators(#[case] statement: &str) {
    let parse = parse_clean(&format!("  CODE\n  {statement}\n"));
    assert_eq!(count_nodes(&parse, SyntaxKind::ASSIGNMENT_STMT), 1);
}

// =============================================================================
// EXPRESSIONS
// =============================================================================

/// Operator tokens directly under each BINARY_EXPR, outermost first.
fn binary_operators(source: &str) -> Vec<SyntaxKind> {
    let parse = parse_clean(source);
    parse
        .syntax()
        .descendants()
        .filter(|n| n.kind() == SyntaxKind::BINARY_EXPR)
        .filter_map(|n| {
            n.children_with_tokens()
                .filter_map(|e| e.into_token())
                .map(|t| t.kind())
                .find(|k| k.is_significant())
        })
        .collect()
}

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(
        binary_operators("  CODE\n  x = 1 + 2 * 3\n"),
        vec![SyntaxKind::PLUS, SyntaxKind::STAR]
    );
}

#[test]
fn test_logical_operators_bind_loosest() {
    assert_eq!(
        binary_operators("  CODE\n  IF a = 1 OR b & c = 'x' AND NOT d THEN e = 1.\n"),
        vec![
            SyntaxKind::OR_KW,
            SyntaxKind::EQ,
            SyntaxKind::AND_KW,
            SyntaxKind::EQ,
            SyntaxKind::AMP,
        ]
    );
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(
        binary_operators("  CODE\n  x = (1 + 2) * 3\n"),
        vec![SyntaxKind::STAR, SyntaxKind::PLUS]
    );
}

#[test]
fn test_call_with_omitted_arguments() {
    let parse = parse_clean("  CODE\n  x = Format(a, , 'z')\n  Obj.Method(1, Inner(2))\n");
    assert_eq!(count_nodes(&parse, SyntaxKind::CALL_EXPR), 3);
}

#[test]
fn test_property_and_index_access() {
    let parse = parse_clean("  CODE\n  x = ?List{PROP:Selected, 2} + arr[i]\n");
    assert_eq!(count_nodes(&parse, SyntaxKind::PROPERTY_EXPR), 1);
    assert_eq!(count_nodes(&parse, SyntaxKind::INDEX_EXPR), 1);
}
