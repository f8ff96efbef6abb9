//! Parameter-kind signatures and procedure header matching.
//!
//! Overloads share a name and differ only in their parameter kinds, so a
//! signature keeps just what distinguishes them: the lower-cased type of
//! each parameter with its `*`/`&` sigil, `<type>` when omittable.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use smol_str::SmolStr;

use super::text_utils::{balanced_group, is_name_character, split_top_level};

static METHOD_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Za-z_][\w:]*)\.([A-Za-z_][\w:]*)\s+(?:PROCEDURE|FUNCTION)\b\s*(\()?")
        .expect("method header pattern is valid")
});

static PROCEDURE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([A-Za-z_][\w:]*)\s+(?:PROCEDURE|FUNCTION)\b\s*(\()?")
        .expect("procedure header pattern is valid")
});

static PROTOTYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\s*)([A-Za-z_][\w:]*)(?:\s+(?:PROCEDURE|FUNCTION)\b\s*(\()?|\s*(\())")
        .expect("prototype pattern is valid")
});

/// Ordered parameter kinds of a procedure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MethodSignature(Vec<SmolStr>);

impl MethodSignature {
    pub fn new(kinds: Vec<SmolStr>) -> Self {
        Self(kinds)
    }

    /// Signature of a parameter list, with or without the parentheses.
    pub fn from_params(text: &str) -> Self {
        let text = text.trim();
        let inner = text
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .unwrap_or(text);
        if inner.trim().is_empty() {
            return Self::default();
        }
        Self(split_top_level(inner).into_iter().map(param_kind).collect())
    }

    pub fn kinds(&self) -> &[SmolStr] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact positional equality, sigils included.
    pub fn matches(&self, other: &MethodSignature) -> bool {
        self == other
    }
}

impl fmt::Display for MethodSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(","))
    }
}

/// Kind of one parameter: `string`, `*string`, `&long`, `<long>`
fn param_kind(param: &str) -> SmolStr {
    let param = param.trim();
    if let Some(rest) = param.strip_prefix('<') {
        let inner = rest.split('>').next().unwrap_or(rest);
        return SmolStr::new(format!("<{}>", type_token(inner)));
    }
    type_token(param)
}

/// Leading type of a parameter, lower-cased, keeping a `*` or `&` sigil
fn type_token(text: &str) -> SmolStr {
    let text = text.trim();
    let (sigil, rest) = match text.chars().next() {
        Some(c @ ('*' | '&')) => (Some(c), text[1..].trim_start()),
        _ => (None, text),
    };
    let end = rest
        .char_indices()
        .find(|(idx, c)| {
            if *idx == 0 {
                c.is_whitespace()
            } else {
                !is_name_character(*c)
            }
        })
        .map_or(rest.len(), |(idx, _)| idx);
    let mut kind = String::with_capacity(end + 1);
    if let Some(sigil) = sigil {
        kind.push(sigil);
    }
    kind.push_str(&rest[..end].to_lowercase());
    SmolStr::new(kind)
}

/// Signature of the parameter list opened by `open`, empty without one
fn signature_after(line: &str, open: Option<regex::Match<'_>>) -> MethodSignature {
    open.map(|m| MethodSignature::from_params(balanced_group(&line[m.end()..])))
        .unwrap_or_default()
}

/// A procedure or method header found on a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMatch {
    /// Class of a `Class.Method` header
    pub class: Option<String>,
    pub name: String,
    pub signature: MethodSignature,
    /// Byte column of the name
    pub column: usize,
}

/// `Class.Method PROCEDURE(params)` in column 0.
pub fn match_method_header(line: &str) -> Option<HeaderMatch> {
    let caps = METHOD_HEADER.captures(line)?;
    Some(HeaderMatch {
        class: Some(caps.get(1)?.as_str().to_string()),
        name: caps.get(2)?.as_str().to_string(),
        signature: signature_after(line, caps.get(3)),
        column: 0,
    })
}

/// `Name PROCEDURE(params)` in column 0.
pub fn match_procedure_header(line: &str) -> Option<HeaderMatch> {
    let caps = PROCEDURE_HEADER.captures(line)?;
    Some(HeaderMatch {
        class: None,
        name: caps.get(1)?.as_str().to_string(),
        signature: signature_after(line, caps.get(2)),
        column: 0,
    })
}

/// A declaration: `Name PROCEDURE(params)` or `Name(params)`, any indentation.
pub fn match_prototype(line: &str) -> Option<HeaderMatch> {
    let caps = PROTOTYPE.captures(line)?;
    let name = caps.get(2)?;
    let open = caps.get(3).or_else(|| caps.get(4));
    Some(HeaderMatch {
        class: None,
        name: name.as_str().to_string(),
        signature: signature_after(line, open),
        column: name.start(),
    })
}
