//! Line matchers for conditional compilation directives.

use std::sync::LazyLock;

use regex::Regex;

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(COMPILE|OMIT)\s*\(\s*['"]([^'"]+)['"]"#)
        .expect("directive pattern is valid")
});

/// Which directive opened a conditional block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Compile,
    Omit,
}

impl DirectiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compile => "compile",
            Self::Omit => "omit",
        }
    }
}

/// A `COMPILE('term')` / `OMIT('term')` directive found on a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive<'a> {
    pub kind: DirectiveKind,
    pub terminator: &'a str,
    /// Byte column of the directive keyword within the line
    pub column: usize,
}

/// How a line was recognised as the end of a conditional block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminatorMatch {
    /// The trimmed line is exactly the terminator
    Exact,
    /// The trimmed line starts with the terminator
    Prefix,
    /// The terminator follows a leading `!` comment marker
    AfterComment,
    /// The terminator appears somewhere in the line
    Contains,
}

/// Find a conditional-block directive in the code part of `line`.
///
/// Text after an unquoted `!` is a comment and never opens a block.
pub fn match_directive(line: &str) -> Option<Directive<'_>> {
    let code = code_part(line);
    let caps = DIRECTIVE.captures(code)?;
    let keyword = caps.get(1)?;
    let kind = if keyword.as_str().eq_ignore_ascii_case("omit") {
        DirectiveKind::Omit
    } else {
        DirectiveKind::Compile
    };
    Some(Directive {
        kind,
        terminator: caps.get(2)?.as_str(),
        column: keyword.start(),
    })
}

/// Check whether `line` ends a block opened with `terminator`.
///
/// Rules are tried in order and the first one that holds is reported.
pub fn match_terminator(line: &str, terminator: &str) -> Option<TerminatorMatch> {
    if terminator.is_empty() {
        return None;
    }
    let trimmed = line.trim();
    if trimmed == terminator {
        return Some(TerminatorMatch::Exact);
    }
    if trimmed.starts_with(terminator) {
        return Some(TerminatorMatch::Prefix);
    }
    if let Some(comment) = trimmed.strip_prefix('!') {
        if comment.trim_start().starts_with(terminator) {
            return Some(TerminatorMatch::AfterComment);
        }
    }
    if line.contains(terminator) {
        return Some(TerminatorMatch::Contains);
    }
    None
}

/// The part of a line before an unquoted `!` comment marker.
pub fn code_part(line: &str) -> &str {
    let mut in_string = false;
    for (idx, c) in line.char_indices() {
        match c {
            '\'' => in_string = !in_string,
            '!' if !in_string => return &line[..idx],
            _ => {}
        }
    }
    line
}
