//! Conditional-block preprocessor
//!
//! `COMPILE('term')` and `OMIT('term')` blocks end at the next line that
//! *contains* an arbitrary terminator string, which no context-free grammar
//! can describe. This pass rewrites each such block into comment
//! placeholders and blank lines so the parser sees a plain token stream.
//!
//! Every output line replaces exactly one input line, and line terminators
//! are preserved, so line numbers in the parse tree match the original text.

mod matchers;

pub use matchers::{
    Directive, DirectiveKind, TerminatorMatch, code_part, match_directive, match_terminator,
};

/// Comment prefix used for placeholder lines.
pub const PLACEHOLDER_PREFIX: &str = "!#pp:";

/// Result of preprocessing a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    pub text: String,
    pub stats: PreprocessStats,
}

/// Counters describing what the preprocessor rewrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreprocessStats {
    /// Directive blocks opened (terminated or not)
    pub blocks_processed: usize,
    /// Interior lines replaced with blanks
    pub lines_removed: usize,
    /// Blocks whose terminator never appeared
    pub unterminated: Vec<UnterminatedBlock>,
}

/// A directive block that ran to the end of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnterminatedBlock {
    pub kind: DirectiveKind,
    /// 0-indexed line of the opening directive
    pub line: u32,
    /// 0-indexed column of the directive keyword
    pub column: u32,
    pub terminator: String,
}

/// Rewrite conditional blocks into placeholders, preserving line count.
pub fn preprocess(text: &str) -> Preprocessed {
    let mut out = String::with_capacity(text.len());
    let mut stats = PreprocessStats::default();
    let mut open: Option<(DirectiveKind, String)> = None;
    let mut opened_at: Option<UnterminatedBlock> = None;

    for (line_no, raw) in text.split_inclusive('\n').enumerate() {
        let (body, ending) = split_ending(raw);

        match open.take() {
            Some((kind, terminator)) => {
                if match_terminator(body, &terminator).is_some() {
                    push_placeholder(&mut out, body, kind, "end");
                    opened_at = None;
                } else {
                    stats.lines_removed += 1;
                    open = Some((kind, terminator));
                }
            }
            None => match match_directive(body) {
                Some(directive) => {
                    stats.blocks_processed += 1;
                    push_placeholder(&mut out, body, directive.kind, "begin");
                    opened_at = Some(UnterminatedBlock {
                        kind: directive.kind,
                        line: line_no as u32,
                        column: directive.column as u32,
                        terminator: directive.terminator.to_string(),
                    });
                    open = Some((directive.kind, directive.terminator.to_string()));
                }
                None => out.push_str(body),
            },
        }

        out.push_str(ending);
    }

    if let Some(block) = opened_at {
        tracing::debug!(
            line = block.line,
            terminator = %block.terminator,
            "conditional block not terminated; blanked to end of input"
        );
        stats.unterminated.push(block);
    }

    Preprocessed { text: out, stats }
}

fn split_ending(raw: &str) -> (&str, &str) {
    if let Some(body) = raw.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = raw.strip_suffix('\n') {
        (body, "\n")
    } else {
        (raw, "")
    }
}

fn push_placeholder(out: &mut String, body: &str, kind: DirectiveKind, edge: &str) {
    let indent_len = body.len() - body.trim_start().len();
    out.push_str(&body[..indent_len]);
    out.push_str(PLACEHOLDER_PREFIX);
    out.push_str(kind.as_str());
    out.push('-');
    out.push_str(edge);
}

/// Check whether a line is a placeholder emitted by [`preprocess`].
pub fn is_placeholder(line: &str) -> bool {
    line.trim_start().starts_with(PLACEHOLDER_PREFIX)
}
