//! Redirection file format.
//!
//! ```text
//! -- comment
//! *.clw = .;%BIN%\..\libsrc      (lines before any section always apply)
//! [Common]
//! *.inc = inc
//! {include %REDNAME%.local}
//! [Debug]
//! *.obj = obj\debug
//! ```
//!
//! A mapping's right-hand side is a `;`-separated list of directories.

use std::sync::LazyLock;

use regex::Regex;

use super::config::RedirectionConfig;

static MACRO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([A-Za-z0-9_]+)%").expect("macro pattern is valid"));

/// One meaningful line of a redirection file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectionLine {
    /// `[Name]`
    Section(String),
    /// `mask=path1;path2`
    Mapping { mask: String, paths: Vec<String> },
    /// `{include path}`
    Include(String),
}

/// Parse redirection file text, dropping comments and blank lines.
pub fn parse_redirection(text: &str) -> Vec<RedirectionLine> {
    text.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<RedirectionLine> {
    let line = line.trim();
    if line.is_empty() || line.starts_with("--") {
        return None;
    }
    if let Some(name) = section_name(line) {
        return Some(RedirectionLine::Section(name.to_string()));
    }
    if let Some(path) = include_target(line) {
        return Some(RedirectionLine::Include(path.to_string()));
    }
    let Some((mask, paths)) = line.split_once('=') else {
        tracing::trace!(line, "ignoring unrecognized redirection line");
        return None;
    };
    let paths = paths
        .split(';')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    Some(RedirectionLine::Mapping {
        mask: mask.trim().to_string(),
        paths,
    })
}

fn section_name(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() || inner.contains(['[', ']']) {
        return None;
    }
    Some(inner.trim())
}

fn include_target(line: &str) -> Option<&str> {
    let inner = line.strip_prefix('{')?.strip_suffix('}')?.trim_start();
    let keyword = inner.get(..7)?;
    if !keyword.eq_ignore_ascii_case("include") {
        return None;
    }
    let path = inner[7..].trim();
    (!path.is_empty()).then_some(path)
}

/// Whether entries under `section` apply in the given compile mode.
///
/// `None` is the unnamed section before the first header.
pub fn section_applies(section: Option<&str>, compile_mode: Option<&str>) -> bool {
    let Some(section) = section else {
        return true;
    };
    if section.eq_ignore_ascii_case("copy") {
        return false;
    }
    match compile_mode {
        None => !(section.eq_ignore_ascii_case("debug") || section.eq_ignore_ascii_case("release")),
        Some(mode) => section.eq_ignore_ascii_case(mode) || section.eq_ignore_ascii_case("common"),
    }
}

/// Whether a file mask covers files with `extension` (no leading dot).
pub fn mask_matches(mask: &str, extension: &str) -> bool {
    let mask = mask.to_ascii_lowercase();
    let extension = extension.trim_start_matches('.').to_ascii_lowercase();
    if mask == "*.*" || mask.contains(&extension) {
        return true;
    }
    let mask_ext = mask.rsplit_once('.').map_or(mask.as_str(), |(_, ext)| ext);
    wildcard_regex(mask_ext).is_some_and(|re| re.is_match(&extension))
}

fn wildcard_regex(pattern: &str) -> Option<Regex> {
    let mut source = String::from("^");
    for c in pattern.chars() {
        match c {
            '*' => source.push_str(".*"),
            '?' => source.push('.'),
            c => source.push_str(&regex::escape(&c.to_string())),
        }
    }
    source.push('$');
    Regex::new(&source).ok()
}

/// Replace `%NAME%` macros; unknown macros are left as written.
pub fn expand_macros(text: &str, config: &RedirectionConfig) -> String {
    MACRO
        .replace_all(text, |caps: &regex::Captures<'_>| {
            match config.macro_value(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
