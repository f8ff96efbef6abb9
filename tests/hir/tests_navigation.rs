//! Navigation between declarations, implementations and call sites.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clarion::Position;
use clarion::hir::{
    CallSite, ImplementationQuery, MethodSignature, SourceText, SymbolResolver, class_module,
    receiver_class,
};
use clarion::project::{DEFAULT_REDIRECTION_FILE, RedirectionResolver};
use rstest::rstest;

use crate::helpers::source_fixtures::{CLASS_DECLARATION, CLASS_IMPLEMENTATION};

fn implementation_source() -> SourceText {
    SourceText::new("MyClass.clw", CLASS_IMPLEMENTATION)
}

fn declaration_line(n: usize) -> &'static str {
    CLASS_DECLARATION.lines().nth(n).unwrap()
}

// =============================================================================
// DECLARATION → IMPLEMENTATION
// =============================================================================

#[rstest]
#[case::by_value("AddLine       PROCEDURE(STRING pValue)", Some(1))]
#[case::by_address("AddLine       PROCEDURE(*STRING pValue)", Some(4))]
#[case::by_reference("AddLine       PROCEDURE(&STRING pValue)", None)]
fn test_overload_resolved_by_signature(#[case] prototype: &str, #[case] expected: Option<u32>) {
    let query = ImplementationQuery::from_declaration(Some("MyClass"), prototype).unwrap();
    let found = SymbolResolver::new().find_implementation(&query, &[implementation_source()]);
    assert_eq!(found.map(|location| location.line), expected);
}

#[test]
fn test_declared_prototypes_reach_distinct_implementations() {
    let resolver = SymbolResolver::new();
    let sources = [implementation_source()];
    let lines: Vec<u32> = (1..=4)
        .map(|n| {
            let query =
                ImplementationQuery::from_declaration(Some("MyClass"), declaration_line(n)).unwrap();
            resolver.find_implementation(&query, &sources).unwrap().line
        })
        .collect();
    assert_eq!(lines, vec![1, 4, 8, 11]);
}

#[test]
fn test_signatures_of_overloads_differ() {
    let signatures: Vec<MethodSignature> = (1..=4)
        .map(|n| {
            ImplementationQuery::from_declaration(None, declaration_line(n))
                .and_then(|query| query.signature)
                .unwrap()
        })
        .collect();
    for (i, a) in signatures.iter().enumerate() {
        for b in &signatures[i + 1..] {
            assert!(!a.matches(b), "{a} should differ from {b}");
        }
    }
}

#[test]
fn test_class_mismatch_finds_nothing() {
    let query =
        ImplementationQuery::from_declaration(Some("OtherClass"), declaration_line(1)).unwrap();
    assert!(SymbolResolver::new()
        .find_implementation(&query, &[implementation_source()])
        .is_none());
}

#[test]
fn test_first_source_wins() {
    let sources = [
        SourceText::new("a.clw", "MyClass.Process PROCEDURE()\n"),
        SourceText::new("b.clw", "MyClass.Process PROCEDURE()\n"),
    ];
    let query = ImplementationQuery::from_declaration(Some("MyClass"), declaration_line(3)).unwrap();
    let found = SymbolResolver::new().find_implementation(&query, &sources).unwrap();
    assert_eq!(found.path, PathBuf::from("a.clw"));
    assert_eq!((found.line, found.column), (0, 0));
}

// =============================================================================
// IMPLEMENTATION → DECLARATION
// =============================================================================

#[rstest]
#[case("MyClass.AddLine PROCEDURE(STRING pValue)", 1)]
#[case("MyClass.AddLine PROCEDURE(*STRING pValue)", 2)]
#[case("MyClass.Process PROCEDURE()", 3)]
#[case("MyClass.Process PROCEDURE(STRING s, LONG n)", 4)]
fn test_declaration_for_header(#[case] header: &str, #[case] line: u32) {
    let found = SymbolResolver::new().find_declaration(header, CLASS_DECLARATION);
    assert_eq!(found, Some(Position::new(line, 0)));
}

// =============================================================================
// CALL SITES
// =============================================================================

#[test]
fn test_self_call_resolves_by_arity() {
    let line = 6;
    let text = CLASS_IMPLEMENTATION.lines().nth(line).unwrap();
    let call = CallSite::at(text, 8).unwrap();
    assert_eq!(call, CallSite::new(Some("SELF".to_string()), "Process", 2));

    let class = receiver_class(CLASS_IMPLEMENTATION, line, "SELF").unwrap();
    let query = ImplementationQuery::from_call_site(call).with_class(class);
    let found = SymbolResolver::new()
        .find_implementation(&query, &[implementation_source()])
        .unwrap();
    assert_eq!(found.line, 11);
}

#[test]
fn test_parent_call_uses_base_class() {
    let text = format!("{CLASS_DECLARATION}{CLASS_IMPLEMENTATION}");
    let offset = CLASS_DECLARATION.lines().count();
    let class = receiver_class(&text, offset + 13, "PARENT");
    assert_eq!(class.as_deref(), Some("BaseClass"));
}

#[test]
fn test_closest_arity_without_exact_match() {
    let query = ImplementationQuery::from_call_site(CallSite::new(
        Some("MyClass".to_string()),
        "Process",
        3,
    ));
    let found = SymbolResolver::new()
        .find_implementation(&query, &[implementation_source()])
        .unwrap();
    assert_eq!(found.line, 11);
}

// =============================================================================
// MODULE FILES
// =============================================================================

#[test]
fn test_declaration_to_implementation_across_files() {
    let project = tempfile::tempdir().unwrap();
    fs::write(project.path().join(DEFAULT_REDIRECTION_FILE), "[Common]\n*.clw=src\n").unwrap();
    fs::create_dir(project.path().join("src")).unwrap();
    let implementation = project.path().join("src").join("MyClass.clw");
    fs::write(&implementation, CLASS_IMPLEMENTATION).unwrap();

    let module = class_module(CLASS_DECLARATION, "MyClass").unwrap();
    let resolver =
        SymbolResolver::new().with_redirection(Arc::new(RedirectionResolver::default()));
    let files = resolver.candidate_files(&[module, "Missing.clw".to_string()], project.path());
    assert_eq!(files, vec![implementation.clone()]);

    let query =
        ImplementationQuery::from_declaration(Some("MyClass"), declaration_line(2)).unwrap();
    let found = resolver.find_implementation_in_files(&query, &files).unwrap();
    assert_eq!(found.path, implementation);
    assert_eq!(found.line, 4);
}

#[test]
fn test_candidate_files_fall_back_to_project_dir() {
    let project = tempfile::tempdir().unwrap();
    let local = project.path().join("Helpers.clw");
    fs::write(&local, "  MEMBER()\n").unwrap();

    let files = SymbolResolver::new().candidate_files(
        &["Helpers.clw".to_string(), "Helpers.clw".to_string()],
        project.path(),
    );
    assert_eq!(files, vec![local]);
}

#[test]
fn test_unreadable_files_are_skipped() {
    let project = tempfile::tempdir().unwrap();
    let query =
        ImplementationQuery::from_declaration(Some("MyClass"), declaration_line(1)).unwrap();
    let found = SymbolResolver::new()
        .find_implementation_in_files(&query, &[project.path().join("gone.clw")]);
    assert!(found.is_none());
}
