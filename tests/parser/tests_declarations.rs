//! Program structure and data declaration tests.

use crate::helpers::parse_helpers::*;
use crate::helpers::source_fixtures::*;
use clarion::parser::{AstNode, DataSection, SourceFile, SyntaxKind};

// =============================================================================
// PROGRAM STRUCTURE
// =============================================================================

#[test]
fn test_program_structure() {
    let parse = parse_clean(ORDER_PROGRAM);
    let file = SourceFile::cast(parse.syntax()).unwrap();

    assert!(!file.header().unwrap().is_member());

    let map = file.maps().next().unwrap();
    let module = map.modules().next().unwrap();
    assert_eq!(module.file_name().as_deref(), Some("util.clw"));
    let helper = module.prototypes().next().unwrap();
    assert_eq!(helper.name().as_deref(), Some("Helper"));
    assert_eq!(
        helper.parameters().unwrap().parameters(),
        vec!["LONG pCount".to_string()]
    );
    assert_eq!(
        map.prototypes().filter_map(|p| p.name()).collect::<Vec<_>>(),
        vec!["Main"]
    );

    let procedures: Vec<_> = file.procedures().collect();
    assert_eq!(procedures.len(), 1);
    assert_eq!(procedures[0].name().as_deref(), Some("Main"));
    assert!(!procedures[0].header().unwrap().is_method());
    let routines: Vec<_> = procedures[0].routines().filter_map(|r| r.name()).collect();
    assert_eq!(routines, vec!["Report".to_string()]);
}

#[test]
fn test_global_structures() {
    let parse = parse_clean(ORDER_PROGRAM);
    assert_eq!(count_nodes(&parse, SyntaxKind::GROUP_BLOCK), 1);
    assert_eq!(count_nodes(&parse, SyntaxKind::QUEUE_BLOCK), 1);
    assert_eq!(count_nodes(&parse, SyntaxKind::CODE_SECTION), 2);
}

#[test]
fn test_member_file_with_method() {
    let parse = parse_clean(CLASS_IMPLEMENTATION);
    let file = SourceFile::cast(parse.syntax()).unwrap();
    assert!(file.header().unwrap().is_member());
    let names: Vec<_> = file.procedures().filter_map(|p| p.name()).collect();
    assert_eq!(
        names,
        vec![
            "MyClass.AddLine",
            "MyClass.AddLine",
            "MyClass.Process",
            "MyClass.Process"
        ]
    );
    assert!(file.procedures().all(|p| p.header().unwrap().is_method()));
}

// =============================================================================
// FILE AND WINDOW
// =============================================================================

#[test]
fn test_file_declaration() {
    let parse = parse_clean(FILE_AND_WINDOW);
    let data = parse
        .syntax()
        .children()
        .find_map(DataSection::cast)
        .unwrap();
    let file = data.files().next().unwrap();
    assert_eq!(file.name().as_deref(), Some("Customers"));
    assert_eq!(file.keys().count(), 1);
    assert!(file.record().is_some());
}

#[test]
fn test_window_control_tree() {
    let parse = parse_clean(FILE_AND_WINDOW);
    let data = parse
        .syntax()
        .children()
        .find_map(DataSection::cast)
        .unwrap();
    let window = data.windows().next().unwrap();
    assert_eq!(window.name().as_deref(), Some("Browse"));
    assert!(!window.is_application());

    assert_eq!(count_nodes(&parse, SyntaxKind::MENUBAR_BLOCK), 1);
    assert_eq!(count_nodes(&parse, SyntaxKind::MENU_BLOCK), 1);
    assert_eq!(count_nodes(&parse, SyntaxKind::SHEET_BLOCK), 1);
    assert_eq!(count_nodes(&parse, SyntaxKind::TAB_BLOCK), 1);
    assert_eq!(count_nodes(&parse, SyntaxKind::CONTROL), 2);
}

#[test]
fn test_class_body_is_opaque() {
    let source = format!("  MEMBER('app')\n{CLASS_DECLARATION}");
    let parse = parse_clean(&source);
    let data = parse
        .syntax()
        .children()
        .find_map(DataSection::cast)
        .unwrap();
    let class = data.classes().next().unwrap();
    assert_eq!(class.name().as_deref(), Some("MyClass"));
    let attributes = class.attributes().unwrap();
    assert!(attributes.has("TYPE"));
    assert!(attributes.has("module"));
    // Prototypes inside the body are kept as tokens, not declarations
    assert_eq!(count_nodes(&parse, SyntaxKind::PROCEDURE), 0);
}

#[test]
fn test_equate_and_include() {
    let source = "  MEMBER()\n  INCLUDE('equates.clw'),ONCE\nMaxItems    EQUATE(100)\nRef         &MyClass\n";
    let parse = parse_clean(source);
    assert_eq!(count_nodes(&parse, SyntaxKind::INCLUDE_DIRECTIVE), 1);
    assert_eq!(count_nodes(&parse, SyntaxKind::EQUATE_DEF), 1);
    assert_eq!(count_nodes(&parse, SyntaxKind::VARIABLE_DECL), 1);
}
