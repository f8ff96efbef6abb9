//! Redirection resolver tests against on-disk fixtures.

use std::fs;
use std::path::Path;

use clarion::project::{DEFAULT_REDIRECTION_FILE, RedirectionConfig, RedirectionResolver};
use rstest::rstest;
use tempfile::TempDir;

fn project_with(red: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(DEFAULT_REDIRECTION_FILE), red).unwrap();
    dir
}

fn dir_string(path: &Path) -> String {
    path.display().to_string()
}

// =============================================================================
// SEARCH PATHS
// =============================================================================

#[test]
fn test_common_section_with_bin_macro() {
    let project = project_with("[COMMON]\n*.clw=src;%BIN%\\lib\n");
    let resolver = RedirectionResolver::new(RedirectionConfig::new().with_bin_dir(r"C:\cw"));

    let paths = resolver.resolve_search_paths("clw", Some(project.path()));
    assert_eq!(
        paths,
        vec![dir_string(project.path()), "src".to_string(), r"C:\cw\lib".to_string()]
    );
}

#[rstest]
#[case::release(Some("Release"), vec!["common", "release"])]
#[case::debug(Some("debug"), vec!["common", "debug"])]
#[case::no_mode(None, vec!["common"])]
fn test_compile_mode_filters_sections(#[case] mode: Option<&str>, #[case] expected: Vec<&str>) {
    let project = project_with(
        "[Common]\n*.clw=common\n[Debug]\n*.clw=debug\n[Release]\n*.clw=release\n[Copy]\n*.clw=copy\n",
    );
    let mut config = RedirectionConfig::new();
    if let Some(mode) = mode {
        config = config.with_compile_mode(mode);
    }
    let resolver = RedirectionResolver::new(config);

    let paths = resolver.resolve_search_paths("clw", Some(project.path()));
    assert_eq!(&paths[1..], expected.as_slice());
}

#[test]
fn test_lines_before_first_section_always_apply() {
    let project = project_with("-- header comment\n*.*=all\n\n[Release]\n*.clw=rel\n");
    let resolver = RedirectionResolver::new(RedirectionConfig::new().with_compile_mode("Debug"));
    let paths = resolver.resolve_search_paths("inc", Some(project.path()));
    assert_eq!(&paths[1..], ["all"]);
}

#[test]
fn test_mask_selects_extension() {
    let project = project_with("[Common]\n*.inc=inc\n*.cl?=src\n*.*=any\n");
    let resolver = RedirectionResolver::default();
    assert_eq!(&resolver.resolve_search_paths("clw", Some(project.path()))[1..], ["src", "any"]);
    assert_eq!(&resolver.resolve_search_paths(".INC", Some(project.path()))[1..], ["inc", "any"]);
}

#[test]
fn test_duplicates_keep_first_position() {
    let project = project_with("[Common]\n*.clw=a;b\n*.clw=b;c;a\n");
    let resolver = RedirectionResolver::default();
    assert_eq!(
        &resolver.resolve_search_paths("clw", Some(project.path()))[1..],
        ["a", "b", "c"]
    );
}

#[test]
fn test_custom_and_unknown_macros() {
    let project = project_with("[Common]\n*.clw=%root%\\src;%MISSING%\\x;%REDNAME%.dir\n");
    let config = RedirectionConfig::new().with_macro("ROOT", "base");
    let resolver = RedirectionResolver::new(config);
    assert_eq!(
        &resolver.resolve_search_paths("clw", Some(project.path()))[1..],
        [r"base\src", r"%MISSING%\x", "Clarion100.red.dir"]
    );
}

// =============================================================================
// FILE LOOKUP
// =============================================================================

#[test]
fn test_missing_redirection_file_is_empty() {
    let project = tempfile::tempdir().unwrap();
    let resolver = RedirectionResolver::default();
    assert!(resolver.resolve_search_paths("clw", Some(project.path())).is_empty());
    assert!(resolver.locate_redirection_file(Some(project.path())).is_err());
}

#[test]
fn test_global_file_in_bin_dir() {
    let bin = project_with("[Common]\n*.clw=libsrc\n");
    let project = tempfile::tempdir().unwrap();
    let resolver =
        RedirectionResolver::new(RedirectionConfig::new().with_bin_dir(dir_string(bin.path())));
    assert_eq!(
        resolver.resolve_search_paths("clw", Some(project.path())),
        vec![dir_string(bin.path()), "libsrc".to_string()]
    );
}

#[test]
fn test_without_project_uses_global_file() {
    let bin = project_with("[Common]\n*.clw=libsrc;%BIN%\\..\\shared\n");
    let resolver =
        RedirectionResolver::new(RedirectionConfig::new().with_bin_dir(dir_string(bin.path())));

    let expected_file = bin.path().join(DEFAULT_REDIRECTION_FILE);
    assert_eq!(resolver.locate_redirection_file(None).unwrap(), expected_file);
    assert_eq!(
        resolver.resolve_search_paths("clw", None),
        vec![
            dir_string(bin.path()),
            "libsrc".to_string(),
            format!("{}\\..\\shared", dir_string(bin.path())),
        ]
    );
}

#[test]
fn test_without_project_or_bin_dir_is_empty() {
    let resolver = RedirectionResolver::default();
    assert!(resolver.locate_redirection_file(None).is_err());
    assert!(resolver.resolve_search_paths("clw", None).is_empty());
}

#[test]
fn test_project_file_preferred_over_global() {
    let bin = project_with("[Common]\n*.clw=global\n");
    let project = project_with("[Common]\n*.clw=local\n");
    let resolver =
        RedirectionResolver::new(RedirectionConfig::new().with_bin_dir(dir_string(bin.path())));
    assert_eq!(
        resolver.resolve_search_paths("clw", Some(project.path())),
        vec![dir_string(project.path()), "local".to_string()]
    );
}

#[test]
fn test_include_merges_paths() {
    let project = project_with("[Common]\n*.clw=first\n{include extra.red}\n*.clw=last\n");
    fs::write(project.path().join("extra.red"), "[Common]\n*.clw=included\n").unwrap();
    let resolver = RedirectionResolver::default();
    assert_eq!(
        &resolver.resolve_search_paths("clw", Some(project.path()))[1..],
        ["first", "included", "last"]
    );
}

#[test]
fn test_include_cycle_is_cut() {
    let project = project_with("[Common]\n*.clw=a\n{include other.red}\n");
    fs::write(
        project.path().join("other.red"),
        format!("[Common]\n*.clw=b\n{{include {DEFAULT_REDIRECTION_FILE}}}\n"),
    )
    .unwrap();
    let resolver = RedirectionResolver::default();
    assert_eq!(&resolver.resolve_search_paths("clw", Some(project.path()))[1..], ["a", "b"]);
}

#[test]
fn test_missing_include_is_skipped() {
    let project = project_with("[Common]\n{include nowhere.red}\n*.clw=src\n");
    let resolver = RedirectionResolver::default();
    assert_eq!(&resolver.resolve_search_paths("clw", Some(project.path()))[1..], ["src"]);
}

#[test]
fn test_results_are_memoized_until_cleared() {
    let project = project_with("[Common]\n*.clw=old\n");
    let resolver = RedirectionResolver::default();
    assert_eq!(&resolver.resolve_search_paths("clw", Some(project.path()))[1..], ["old"]);

    fs::write(project.path().join(DEFAULT_REDIRECTION_FILE), "[Common]\n*.clw=new\n").unwrap();
    assert_eq!(&resolver.resolve_search_paths("clw", Some(project.path()))[1..], ["old"]);

    resolver.clear_cache();
    assert_eq!(&resolver.resolve_search_paths("clw", Some(project.path()))[1..], ["new"]);
}

#[test]
fn test_resolve_for_projects_unions_in_order() {
    let shared = project_with("[Common]\n*.clw=shared\n");
    let one = project_with(&format!("[Common]\n*.clw=one;{}\n", dir_string(shared.path())));
    let two = project_with("[Common]\n*.clw=two;one\n");
    let resolver = RedirectionResolver::default();

    let paths = resolver.resolve_for_projects("clw", &[one.path(), two.path()]);
    assert_eq!(
        paths,
        vec![
            dir_string(one.path()),
            "one".to_string(),
            dir_string(shared.path()),
            dir_string(two.path()),
            "two".to_string(),
        ]
    );
}

#[test]
fn test_find_file_case_insensitive() {
    let project = project_with("[Common]\n*.clw=src\n");
    fs::create_dir(project.path().join("src")).unwrap();
    fs::write(project.path().join("src").join("Util.CLW"), "  MEMBER()\n").unwrap();
    let resolver = RedirectionResolver::default();

    let found = resolver.find_file("util.clw", project.path()).unwrap();
    assert_eq!(found, project.path().join("src").join("Util.CLW"));
    assert!(resolver.find_file("missing.clw", project.path()).is_none());
    assert!(resolver.find_file("noextension", project.path()).is_none());
}
