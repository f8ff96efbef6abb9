//! Recursive descent parser for Clarion
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};
use tokio_util::sync::CancellationToken;

use super::errors::{ErrorCode, RelatedInfo, SyntaxError};
use super::grammar::{self, ClarionParser, Strategy};
use super::lexer::{Token, tokenize};
use super::syntax_kind::{SyntaxKind, SyntaxNode};
use crate::base::LineIndex;

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
    /// The strategy of the pass that produced this result
    pub strategy: Strategy,
    line_index: LineIndex,
    complete: bool,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// False when the full-lookahead pass was cancelled and an erroring
    /// fast pass was kept in its place.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// 0-based lines of the first and last significant tokens of `node`
    ///
    /// Returns `None` for nodes holding only trivia and newlines, which
    /// error recovery can produce.
    pub fn node_lines(&self, node: &SyntaxNode) -> Option<(u32, u32)> {
        let mut significant = node
            .descendants_with_tokens()
            .filter_map(|element| element.into_token())
            .filter(|token| token.kind().is_significant());
        let first = significant.next()?;
        let last = significant.last().unwrap_or_else(|| first.clone());
        let start = self.line_index.line_col(first.text_range().start()).line;
        let end = self.line_index.line_col(last.text_range().start()).line;
        Some((start, end))
    }
}

/// Parse Clarion source into a CST
///
/// Runs a [`Strategy::Fast`] pass first and, if it reported any error,
/// discards it and re-parses with [`Strategy::Full`].
pub fn parse(input: &str) -> Parse {
    parse_with_cancellation(input, &CancellationToken::new())
}

/// Like [`parse`], but skips the second pass once `cancel` is triggered
pub fn parse_with_cancellation(input: &str, cancel: &CancellationToken) -> Parse {
    let tokens = tokenize(input);
    let fast = run(input, &tokens, Strategy::Fast);
    if fast.ok() {
        return fast;
    }
    if cancel.is_cancelled() {
        tracing::debug!("parse cancelled before full-lookahead pass");
        return Parse {
            complete: false,
            ..fast
        };
    }
    tracing::debug!(
        errors = fast.errors.len(),
        "fast parse reported errors, retrying with full lookahead"
    );
    run(input, &tokens, Strategy::Full)
}

/// Parse with a single pass of the given strategy
pub fn parse_with_strategy(input: &str, strategy: Strategy) -> Parse {
    let tokens = tokenize(input);
    run(input, &tokens, strategy)
}

fn run(input: &str, tokens: &[Token<'_>], strategy: Strategy) -> Parse {
    let mut parser = Parser::new(tokens, strategy);
    grammar::parse_source_file(&mut parser);
    parser.finish(input)
}

/// The parser state
struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
    strategy: Strategy,
    /// Raw index of the last lexical error token reported
    last_lexical: Option<usize>,
    /// Open nodes; trivia before the root must go inside it
    depth: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [Token<'a>], strategy: Strategy) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
            strategy,
            last_lexical: None,
            depth: 0,
        }
    }

    fn finish(self, input: &str) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
            strategy: self.strategy,
            line_index: LineIndex::new(input),
            complete: true,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    /// Raw index of the nth non-trivia token at or after `pos`
    fn significant_index(&self, n: usize) -> Option<usize> {
        self.tokens[self.pos..]
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .nth(n)
            .map(|(idx, _)| self.pos + idx)
    }

    fn current(&self) -> Option<(usize, &Token<'a>)> {
        let idx = self.significant_index(0)?;
        Some((idx, &self.tokens[idx]))
    }

    /// Line and column just past the last token
    fn eof_position(&self) -> (TextSize, u32, u32) {
        let Some(last) = self.tokens.last() else {
            return (TextSize::new(0), 1, 0);
        };
        let end = last.offset + TextSize::of(last.text);
        let newlines = last.text.matches('\n').count() as u32;
        let column = match last.text.rfind('\n') {
            Some(idx) => (last.text.len() - idx - 1) as u32,
            None => last.column + last.text.len() as u32,
        };
        (end, last.line + newlines, column)
    }

    fn lexical_error(&mut self, idx: usize) {
        if self.last_lexical.is_some_and(|last| last >= idx) {
            return;
        }
        self.last_lexical = Some(idx);
        let token = &self.tokens[idx];
        let (code, message) = if token.text.starts_with('\'') {
            (ErrorCode::E0102, "unterminated string literal".to_string())
        } else {
            (ErrorCode::E0101, format!("invalid character '{}'", token.text))
        };
        let error = SyntaxError::new(
            message,
            TextRange::at(token.offset, TextSize::of(token.text)),
            token.line,
            token.column,
            token.text,
            code,
        );
        self.errors.push(error);
    }

    fn bump_raw(&mut self) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }
}

impl ClarionParser for Parser<'_, '_> {
    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|(_, t)| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn current_text(&self) -> &str {
        self.current().map(|(_, t)| t.text).unwrap_or("")
    }

    fn current_range(&self) -> TextRange {
        match self.current() {
            Some((_, t)) => TextRange::at(t.offset, TextSize::of(t.text)),
            None => TextRange::empty(self.eof_position().0),
        }
    }

    fn at_eof(&self) -> bool {
        self.current().is_none()
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.significant_index(n)
            .map(|idx| self.tokens[idx].kind)
            .unwrap_or(SyntaxKind::ERROR)
    }

    fn nth_text(&self, n: usize) -> &str {
        self.significant_index(n)
            .map(|idx| self.tokens[idx].text)
            .unwrap_or("")
    }

    fn at_line_start(&self) -> bool {
        let Some(idx) = self.significant_index(0) else {
            return false;
        };
        self.tokens[..idx]
            .iter()
            .rev()
            .find(|t| !t.kind.is_trivia())
            .is_none_or(|t| t.kind == SyntaxKind::NEWLINE)
    }

    fn at_member_dot(&self) -> bool {
        let Some((idx, token)) = self.current() else {
            return false;
        };
        if token.kind != SyntaxKind::DOT || idx == 0 {
            return false;
        }
        let before = &self.tokens[idx - 1];
        let after = self.tokens.get(idx + 1);
        let joins_before = matches!(
            before.kind,
            SyntaxKind::IDENT
                | SyntaxKind::LABEL
                | SyntaxKind::SELF_KW
                | SyntaxKind::PARENT_KW
                | SyntaxKind::R_PAREN
                | SyntaxKind::R_BRACKET
        ) || before.kind.is_keyword();
        joins_before && after.is_some_and(|t| t.kind.is_name())
    }

    fn pos(&self) -> usize {
        self.pos
    }

    fn strategy(&self) -> Strategy {
        self.strategy
    }

    fn bump(&mut self) {
        self.skip_trivia();
        if self.tokens.get(self.pos).is_some_and(|t| t.kind == SyntaxKind::ERROR) {
            self.lexical_error(self.pos);
        }
        self.bump_raw();
    }

    fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        if self.depth > 0 {
            self.skip_trivia();
        }
        self.builder.start_node(kind.into());
        self.depth += 1;
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
        self.depth = self.depth.saturating_sub(1);
    }

    fn checkpoint(&mut self) -> Checkpoint {
        if self.depth > 0 {
            self.skip_trivia();
        }
        self.builder.checkpoint()
    }

    fn start_node_at(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
        self.depth += 1;
    }

    fn push_error(&mut self, message: String, code: ErrorCode, related: Option<RelatedInfo>) {
        if let Some((idx, token)) = self.current() {
            if token.kind == SyntaxKind::ERROR {
                self.lexical_error(idx);
                return;
            }
        }
        let mut error = match self.current() {
            Some((_, t)) => SyntaxError::new(
                message,
                TextRange::at(t.offset, TextSize::of(t.text)),
                t.line,
                t.column,
                t.text,
                code,
            ),
            None => {
                let (offset, line, column) = self.eof_position();
                SyntaxError::at_offset(message, offset, line, column, code)
            }
        };
        if let Some(info) = related {
            error = error.with_related(info);
        }
        tracing::trace!(line = error.line, column = error.column, code = %error.code, "syntax error");
        self.errors.push(error);
    }

    fn error_recover(&mut self, message: String, code: ErrorCode, recovery: &[SyntaxKind]) {
        self.push_error(message, code, None);
        // Newlines separate statements and are never swallowed
        if self.at_eof() || self.at(SyntaxKind::NEWLINE) {
            return;
        }
        self.start_node(SyntaxKind::ERROR);
        // Always consume at least one token to make progress
        self.bump_raw();
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump_raw();
        }
        self.finish_node();
    }
}
