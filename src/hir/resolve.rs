//! Navigation between declarations and implementations.
//!
//! Resolution works on raw source lines rather than parse trees: the files
//! involved are usually not open, and a single pass over their text is enough
//! to find headers.
//!
//! - [`SymbolResolver::find_implementation`] - declaration or call site → `Class.Method PROCEDURE`
//! - [`SymbolResolver::find_declaration`] - implementation header → CLASS or MAP prototype
//! - [`receiver_class`] / [`class_module`] - which class a call goes to, and where it lives

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use indexmap::IndexSet;
use regex::Regex;

use super::signature::{
    HeaderMatch, MethodSignature, match_method_header, match_procedure_header, match_prototype,
};
use super::text_utils::{balanced_group, find_dotted_name, leading_name, split_top_level};
use crate::base::Position;
use crate::project::RedirectionResolver;

static MODULE_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bMODULE\s*\(\s*['"]([^'"]+)['"]\s*\)"#).expect("module pattern is valid")
});

/// A place in a file (0-based line and column).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub path: PathBuf,
    pub line: u32,
    pub column: u32,
}

/// Text of a file to search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub path: PathBuf,
    pub text: String,
}

impl SourceText {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Read a file once; unreadable files yield `None`.
    pub fn read(path: &Path) -> Option<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Some(Self::new(path, text)),
            Err(err) => {
                tracing::debug!(path = %path.display(), "cannot read source: {err}");
                None
            }
        }
    }
}

/// A call such as `SELF.AddLine(a, b)` under the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    /// Object the method is called on (`SELF`, `PARENT`, a variable)
    pub receiver: Option<String>,
    pub name: String,
    /// Arguments written, omitted ones included
    pub arg_count: usize,
}

impl CallSite {
    pub fn new(receiver: Option<String>, name: impl Into<String>, arg_count: usize) -> Self {
        Self {
            receiver,
            name: name.into(),
            arg_count,
        }
    }

    /// The call whose name covers character `column` of `line`.
    pub fn at(line: &str, column: usize) -> Option<Self> {
        let chars: Vec<char> = line.chars().collect();
        let (start, end) = find_dotted_name(&chars, column)?;
        let dotted: String = chars[start..end].iter().collect();
        let (receiver, name) = match dotted.rsplit_once('.') {
            Some((receiver, name)) => (Some(receiver.to_string()), name.to_string()),
            None => (None, dotted),
        };
        let rest: String = chars[end..].iter().collect();
        Some(Self::new(receiver, name, count_arguments(&rest)))
    }
}

/// Arguments in a leading `( ... )`, or zero without one
fn count_arguments(rest: &str) -> usize {
    let Some(args) = rest.trim_start().strip_prefix('(') else {
        return 0;
    };
    let inner = balanced_group(args);
    if inner.trim().is_empty() {
        0
    } else {
        split_top_level(inner).len()
    }
}

/// What to look for when searching implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImplementationQuery {
    /// Class of a method; `None` for a plain procedure
    pub class: Option<String>,
    pub name: String,
    /// Exact signature to require, when the declaration is known
    pub signature: Option<MethodSignature>,
    /// Arguments at a call site, when only the call is known
    pub arg_count: Option<usize>,
}

impl ImplementationQuery {
    /// Query from a call; the receiver is used as the class name.
    ///
    /// Resolve `SELF` and object variables first with [`receiver_class`]
    /// and [`with_class`](Self::with_class).
    pub fn from_call_site(call: CallSite) -> Self {
        Self {
            class: call.receiver,
            name: call.name,
            signature: None,
            arg_count: Some(call.arg_count),
        }
    }

    /// Query from a prototype line inside `class` (or a MAP when `None`).
    pub fn from_declaration(class: Option<&str>, prototype_line: &str) -> Option<Self> {
        let proto = match_prototype(prototype_line)?;
        Some(Self {
            class: class.map(str::to_string),
            name: proto.name,
            signature: Some(proto.signature),
            arg_count: None,
        })
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    fn header_matches(&self, header: &HeaderMatch) -> bool {
        header.name.eq_ignore_ascii_case(&self.name)
            && match (&self.class, &header.class) {
                (Some(want), Some(have)) => want.eq_ignore_ascii_case(have),
                (None, None) => true,
                _ => false,
            }
    }
}

/// Overload-aware lookup of procedure implementations and declarations.
#[derive(Debug, Clone, Default)]
pub struct SymbolResolver {
    redirection: Option<Arc<RedirectionResolver>>,
}

impl SymbolResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_redirection(mut self, resolver: Arc<RedirectionResolver>) -> Self {
        self.redirection = Some(resolver);
        self
    }

    /// Find the implementation header for `query` in `sources`, in order.
    ///
    /// With a known signature the first exact match wins. Otherwise the
    /// header whose parameter count is closest to the argument count wins,
    /// and an exact count ends the search.
    pub fn find_implementation(
        &self,
        query: &ImplementationQuery,
        sources: &[SourceText],
    ) -> Option<Location> {
        let mut best: Option<(usize, Location)> = None;

        for source in sources {
            for (line_no, line) in source.text.lines().enumerate() {
                let header = match query.class {
                    Some(_) => match_method_header(line),
                    None => match_procedure_header(line),
                };
                let Some(header) = header.filter(|h| query.header_matches(h)) else {
                    continue;
                };
                let location = Location {
                    path: source.path.clone(),
                    line: line_no as u32,
                    column: header.column as u32,
                };

                if let Some(signature) = &query.signature {
                    if header.signature.matches(signature) {
                        tracing::debug!(name = %query.name, %signature, "implementation found");
                        return Some(location);
                    }
                    continue;
                }

                let distance = query
                    .arg_count
                    .map_or(0, |count| header.signature.len().abs_diff(count));
                if distance == 0 {
                    tracing::debug!(name = %query.name, "implementation found");
                    return Some(location);
                }
                if best.as_ref().is_none_or(|(d, _)| distance < *d) {
                    best = Some((distance, location));
                }
            }
        }

        if best.is_none() {
            tracing::debug!(name = %query.name, class = ?query.class, "no implementation found");
        }
        best.map(|(_, location)| location)
    }

    /// Read `paths` once each and search them with [`find_implementation`](Self::find_implementation).
    pub fn find_implementation_in_files(
        &self,
        query: &ImplementationQuery,
        paths: &[PathBuf],
    ) -> Option<Location> {
        let sources: Vec<SourceText> = paths.iter().filter_map(|p| SourceText::read(p)).collect();
        self.find_implementation(query, &sources)
    }

    /// Find the declaration for an implementation header.
    ///
    /// `Class.Method` headers are looked up in the `CLASS` block, preferring
    /// the prototype with the same signature. Plain procedures are looked up
    /// in `MAP` blocks.
    pub fn find_declaration(&self, header_line: &str, source: &str) -> Option<Position> {
        if let Some(header) = match_method_header(header_line) {
            let class = header.class.as_deref()?;
            return find_in_class(source, class, &header);
        }
        let header = match_procedure_header(header_line)?;
        find_in_maps(source, &header.name)
    }

    /// Existing files for `modules`, via redirection when configured.
    pub fn candidate_files(&self, modules: &[String], project_dir: &Path) -> Vec<PathBuf> {
        let mut found = IndexSet::new();
        for module in modules {
            let via_redirection = self
                .redirection
                .as_ref()
                .and_then(|r| r.find_file(module, project_dir));
            let path = via_redirection.or_else(|| {
                let local = project_dir.join(module);
                local.is_file().then_some(local)
            });
            match path {
                Some(path) => {
                    found.insert(path);
                }
                None => tracing::debug!(module = %module, "module file not found"),
            }
        }
        found.into_iter().collect()
    }
}

/// Lines of the `CLASS` block labelled `class`, with their line numbers
fn class_block<'a>(source: &'a str, class: &str) -> Option<Vec<(usize, &'a str)>> {
    let lines: Vec<&str> = source.lines().collect();
    let start = lines.iter().position(|line| is_class_declaration(line, class))?;
    let mut block = vec![(start, lines[start])];
    let mut depth = 1usize;
    for (idx, line) in lines.iter().enumerate().skip(start + 1) {
        block.push((idx, line));
        if opens_structure(line) {
            depth += 1;
        } else if closes_structure(line) {
            depth -= 1;
            if depth == 0 {
                break;
            }
        }
    }
    Some(block)
}

fn is_class_declaration(line: &str, class: &str) -> bool {
    let Some(label) = leading_name(line) else {
        return false;
    };
    if line.starts_with(char::is_whitespace) || !label.eq_ignore_ascii_case(class) {
        return false;
    }
    second_word(line).is_some_and(|w| w.eq_ignore_ascii_case("CLASS"))
}

/// The word after the leading name, up to `(` or `,`
fn second_word(line: &str) -> Option<&str> {
    let label = leading_name(line)?;
    let rest = line.trim_start()[label.len()..].trim_start();
    let word = rest.split(|c: char| c == '(' || c == ',' || c.is_whitespace()).next()?;
    (!word.is_empty()).then_some(word)
}

const STRUCTURE_KEYWORDS: &[&str] = &[
    "GROUP", "QUEUE", "CLASS", "FILE", "RECORD", "VIEW", "MAP", "MODULE", "ITEMIZE", "WINDOW",
];

fn opens_structure(line: &str) -> bool {
    let code = code_of(line);
    let word = if code.starts_with(char::is_whitespace) {
        first_word(code)
    } else {
        second_word(code)
    };
    word.is_some_and(|w| STRUCTURE_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(w)))
        && !code.trim_end().ends_with('.')
}

fn closes_structure(line: &str) -> bool {
    let code = code_of(line).trim();
    code == "." || first_word(code).is_some_and(|w| w.eq_ignore_ascii_case("END"))
}

fn first_word(code: &str) -> Option<&str> {
    code.split(|c: char| c == '(' || c == ',' || c.is_whitespace())
        .find(|w| !w.is_empty())
}

/// The line without its `!` comment
fn code_of(line: &str) -> &str {
    crate::preprocessor::code_part(line)
}

fn find_in_class(source: &str, class: &str, header: &HeaderMatch) -> Option<Position> {
    let block = class_block(source, class)?;
    let mut same_name = Vec::new();
    for (line_no, line) in block.iter().skip(1) {
        let Some(proto) = match_prototype(line) else {
            continue;
        };
        if !proto.name.eq_ignore_ascii_case(&header.name) {
            continue;
        }
        let position = Position::new(*line_no as u32, proto.column as u32);
        if proto.signature.matches(&header.signature) {
            return Some(position);
        }
        same_name.push(position);
    }
    // Without an exact match, only an unambiguous name is accepted
    match same_name.as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

fn find_in_maps(source: &str, name: &str) -> Option<Position> {
    let mut depth = 0usize;
    for (line_no, line) in source.lines().enumerate() {
        let code = code_of(line);
        let first = first_word(code);
        if depth == 0 {
            if first.is_some_and(|w| w.eq_ignore_ascii_case("MAP")) {
                depth = 1;
            }
            continue;
        }
        if first.is_some_and(|w| w.eq_ignore_ascii_case("MODULE")) {
            depth += 1;
            continue;
        }
        if closes_structure(code) {
            depth -= 1;
            continue;
        }
        if let Some(proto) = match_prototype(code) {
            if proto.name.eq_ignore_ascii_case(name) {
                return Some(Position::new(line_no as u32, proto.column as u32));
            }
        }
    }
    None
}

/// The class a call on `object` at `line` dispatches to.
///
/// `SELF` is the class of the enclosing method, `PARENT` its base class;
/// other names are looked up as variable declarations, nearest first.
pub fn receiver_class(text: &str, line: usize, object: &str) -> Option<String> {
    let lines: Vec<&str> = text.lines().collect();
    let enclosing = || {
        lines
            .iter()
            .take(line + 1)
            .rev()
            .find_map(|l| match_method_header(l))
            .and_then(|h| h.class)
    };

    if object.eq_ignore_ascii_case("SELF") {
        return enclosing();
    }
    if object.eq_ignore_ascii_case("PARENT") {
        let class = enclosing()?;
        return base_class(&lines, &class);
    }

    let before = lines.iter().take(line + 1).rev();
    let after = lines.iter().skip(line + 1);
    before
        .chain(after)
        .find_map(|l| declared_type(l, object))
}

/// `Derived CLASS(Base)` → `Base`
fn base_class(lines: &[&str], class: &str) -> Option<String> {
    let declaration = lines.iter().find(|l| is_class_declaration(l, class))?;
    let open = declaration.find('(')?;
    let close = declaration[open..].find(')')? + open;
    let base = declaration[open + 1..close].trim();
    (!base.is_empty()).then(|| base.to_string())
}

/// Type of `object` if `line` declares it
fn declared_type(line: &str, object: &str) -> Option<String> {
    if line.starts_with(char::is_whitespace) {
        return None;
    }
    let label = leading_name(line)?;
    if !label.eq_ignore_ascii_case(object) {
        return None;
    }
    let rest = line[label.len()..].trim_start();
    let rest = rest.strip_prefix('&').unwrap_or(rest).trim_start();
    let type_name = leading_name(rest)?;
    if type_name.eq_ignore_ascii_case("CLASS") {
        return Some(label.to_string());
    }
    Some(type_name.to_string())
}

/// File named by a class's `MODULE('file')` attribute.
pub fn class_module(text: &str, class: &str) -> Option<String> {
    let declaration = text.lines().find(|l| is_class_declaration(l, class))?;
    let caps = MODULE_ATTRIBUTE.captures(code_of(declaration))?;
    Some(caps.get(1)?.as_str().to_string())
}
