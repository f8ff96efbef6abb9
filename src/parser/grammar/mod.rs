//! Grammar rules for Clarion source files
//!
//! The rules are organized by area:
//! - `program` - file structure: headers, MAP blocks, procedures, routines
//! - `data` - data declarations: variables, equates, GROUP, QUEUE, CLASS
//! - `files` - FILE declarations with KEY/INDEX and RECORD, VIEW
//! - `windows` - WINDOW/APPLICATION control trees
//! - `statements` - executable statements
//! - `expressions` - the expression precedence chain
//! - `predict` - alternative selection under the active [`Strategy`]
//!
//! The rule functions are generic over [`ClarionParser`] so they can be driven
//! by any parser implementation.

pub mod data;
pub mod expressions;
pub mod files;
pub mod predict;
pub mod program;
pub mod statements;
pub mod windows;

use rowan::{Checkpoint, TextRange};

use crate::parser::errors::{ErrorCode, ParseContext, RelatedInfo, context_message};
use crate::parser::syntax_kind::SyntaxKind;

pub use program::parse_source_file;

/// How the parser chooses between competing alternatives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Decide from a fixed number of lookahead tokens
    #[default]
    Fast,
    /// Decide from the whole logical line
    Full,
}

/// Number of significant tokens `Strategy::Fast` may inspect
pub const FAST_LOOKAHEAD: usize = 4;

/// Interface between the grammar rules and the parser that drives them
///
/// Inspection methods look past trivia (whitespace, comments, line
/// continuations) but not past newlines, which separate statements.
pub trait ClarionParser {
    // Token inspection
    fn current_kind(&self) -> SyntaxKind;
    fn current_text(&self) -> &str;
    fn current_range(&self) -> TextRange;
    fn at_eof(&self) -> bool;

    /// Peek at the kind of the nth significant token ahead
    fn nth(&self, n: usize) -> SyntaxKind;
    fn nth_text(&self, n: usize) -> &str;

    /// Whether the current token is the first one on its line
    fn at_line_start(&self) -> bool;

    /// Whether the current `.` joins the names on either side without spacing
    fn at_member_dot(&self) -> bool;

    // Position tracking
    fn pos(&self) -> usize;
    fn strategy(&self) -> Strategy;

    // Token consumption
    fn bump(&mut self);
    fn skip_trivia(&mut self);

    // Node building
    fn start_node(&mut self, kind: SyntaxKind);
    fn finish_node(&mut self);
    fn checkpoint(&mut self) -> Checkpoint;
    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind);

    // Errors
    fn push_error(&mut self, message: String, code: ErrorCode, related: Option<RelatedInfo>);

    /// Record an error and discard tokens up to one in `recovery`
    ///
    /// The discarded tokens are wrapped in an `ERROR` node. At least one token
    /// is consumed unless the parser is at a newline or end of input.
    fn error_recover(&mut self, message: String, code: ErrorCode, recovery: &[SyntaxKind]);

    // =========================================================================
    // Provided helpers
    // =========================================================================

    fn at(&self, kind: SyntaxKind) -> bool {
        !self.at_eof() && self.current_kind() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        !self.at_eof() && kinds.contains(&self.current_kind())
    }

    fn at_name(&self) -> bool {
        !self.at_eof() && self.current_kind().is_name()
    }

    /// Identifier with the given text, compared case-insensitively
    fn at_soft_kw(&self, kw: &str) -> bool {
        self.nth_soft_kw(0, kw)
    }

    fn nth_soft_kw(&self, n: usize, kw: &str) -> bool {
        self.nth(n) == SyntaxKind::IDENT && self.nth_text(n).eq_ignore_ascii_case(kw)
    }

    /// At a newline, `;` or end of input
    fn at_line_end(&self) -> bool {
        self.at_eof() || self.at_any(&[SyntaxKind::NEWLINE, SyntaxKind::SEMICOLON])
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind, code: ErrorCode) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!("expected {}, found {}", describe(kind), self.found()), code);
            false
        }
    }

    fn error(&mut self, message: String, code: ErrorCode) {
        self.push_error(message, code, None);
    }

    /// Report the current token as out of place in `context` and recover
    fn unexpected_in(&mut self, context: ParseContext, code: ErrorCode) {
        let message = context_message(&self.found(), context);
        self.error_recover(message, code, context.recovery_tokens());
    }

    /// Human-readable description of the current token
    fn found(&self) -> String {
        if self.at_eof() {
            "end of file".to_string()
        } else if self.at(SyntaxKind::NEWLINE) {
            "end of line".to_string()
        } else {
            format!("'{}'", self.current_text())
        }
    }

    fn skip_newlines(&mut self) {
        while self.at(SyntaxKind::NEWLINE) {
            self.bump();
        }
    }

    /// Skip newlines and `;` statement separators
    fn skip_separators(&mut self) {
        while self.at_any(&[SyntaxKind::NEWLINE, SyntaxKind::SEMICOLON]) {
            self.bump();
        }
    }

    /// Require the end of the logical line, discarding anything left on it
    fn expect_line_end(&mut self) {
        if !self.at_line_end() && !self.at_any(&[SyntaxKind::END_KW, SyntaxKind::DOT]) {
            let message = format!("expected end of line, found {}", self.found());
            self.error_recover(
                message,
                ErrorCode::E0201,
                &[SyntaxKind::NEWLINE, SyntaxKind::SEMICOLON],
            );
        }
    }

    /// Close a structure with `END` or `.`
    ///
    /// `opened` is the range of the keyword that opened the structure.
    fn expect_terminator(&mut self, what: &str, opened: TextRange) -> bool {
        if self.at_any(&[SyntaxKind::END_KW, SyntaxKind::DOT]) {
            self.bump();
            return true;
        }
        let message = format!("unclosed {what}: expected END or '.', found {}", self.found());
        self.push_error(
            message,
            ErrorCode::E0202,
            Some(RelatedInfo::new(format!("{what} opened here"), opened)),
        );
        false
    }
}

/// Display form of a token kind for error messages
pub fn describe(kind: SyntaxKind) -> String {
    let punct = match kind {
        SyntaxKind::L_PAREN => "'('",
        SyntaxKind::R_PAREN => "')'",
        SyntaxKind::L_BRACKET => "'['",
        SyntaxKind::R_BRACKET => "']'",
        SyntaxKind::L_BRACE => "'{'",
        SyntaxKind::R_BRACE => "'}'",
        SyntaxKind::COMMA => "','",
        SyntaxKind::DOT => "'.'",
        SyntaxKind::EQ => "'='",
        SyntaxKind::STRING => "string",
        SyntaxKind::IDENT | SyntaxKind::LABEL => "name",
        SyntaxKind::NEWLINE => "end of line",
        _ => "",
    };
    if !punct.is_empty() {
        return punct.to_string();
    }
    let debug = format!("{kind:?}");
    match debug.strip_suffix("_KW") {
        Some(keyword) => keyword.to_string(),
        None => debug.to_lowercase(),
    }
}
