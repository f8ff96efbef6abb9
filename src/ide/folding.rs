//! Folding ranges: collapsible regions derived from the syntax tree.

use crate::parser::{Parse, SyntaxKind, SyntaxNode, SyntaxToken};
use crate::preprocessor::is_placeholder;

/// A folding range (0-based lines, inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FoldingRange {
    pub start_line: u32,
    pub end_line: u32,
    pub kind: Option<FoldingRangeKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldingRangeKind {
    Region,
    Comment,
}

/// Structures that can fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldableKind {
    Procedure,
    Routine,
    Map,
    Module,
    Code,
    If,
    Elsif,
    Else,
    Loop,
    Case,
    Execute,
    Do,
    Class,
    File,
    Record,
    View,
    Group,
    Queue,
    Window,
    MenuBar,
    Menu,
    ToolBar,
    Sheet,
    Tab,
    GroupControl,
    Option,
}

/// Where a fold ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldPolicy {
    /// The node's own last line
    OwnSpan,
    /// The last line of the enclosing structure
    EnclosingEnd,
}

impl FoldableKind {
    pub fn from_syntax(kind: SyntaxKind) -> Option<Self> {
        let foldable = match kind {
            SyntaxKind::PROCEDURE => Self::Procedure,
            SyntaxKind::ROUTINE => Self::Routine,
            SyntaxKind::MAP_BLOCK => Self::Map,
            SyntaxKind::MODULE_BLOCK => Self::Module,
            SyntaxKind::CODE_SECTION => Self::Code,
            SyntaxKind::IF_STMT => Self::If,
            SyntaxKind::ELSIF_CLAUSE => Self::Elsif,
            SyntaxKind::ELSE_CLAUSE => Self::Else,
            SyntaxKind::LOOP_STMT => Self::Loop,
            SyntaxKind::CASE_STMT => Self::Case,
            SyntaxKind::EXECUTE_STMT => Self::Execute,
            SyntaxKind::DO_STMT => Self::Do,
            SyntaxKind::CLASS_DECL => Self::Class,
            SyntaxKind::FILE_DECL => Self::File,
            SyntaxKind::RECORD_BLOCK => Self::Record,
            SyntaxKind::VIEW_DECL => Self::View,
            SyntaxKind::GROUP_BLOCK => Self::Group,
            SyntaxKind::QUEUE_BLOCK => Self::Queue,
            SyntaxKind::WINDOW_DEF => Self::Window,
            SyntaxKind::MENUBAR_BLOCK => Self::MenuBar,
            SyntaxKind::MENU_BLOCK => Self::Menu,
            SyntaxKind::TOOLBAR_BLOCK => Self::ToolBar,
            SyntaxKind::SHEET_BLOCK => Self::Sheet,
            SyntaxKind::TAB_BLOCK => Self::Tab,
            SyntaxKind::GROUP_CONTROL => Self::GroupControl,
            SyntaxKind::OPTION_BLOCK => Self::Option,
            _ => return None,
        };
        Some(foldable)
    }

    /// Independent of this table, an `IF` whose first line holds `THEN` and
    /// an end marker never folds, even when the marker closes a structure
    /// nested on that line (see `is_single_line_if`).
    pub fn policy(self) -> FoldPolicy {
        match self {
            Self::Elsif | Self::Else => FoldPolicy::EnclosingEnd,
            Self::Procedure
            | Self::Routine
            | Self::Map
            | Self::Module
            | Self::Code
            | Self::If
            | Self::Loop
            | Self::Case
            | Self::Execute
            | Self::Do
            | Self::Class
            | Self::File
            | Self::Record
            | Self::View
            | Self::Group
            | Self::Queue
            | Self::Window
            | Self::MenuBar
            | Self::Menu
            | Self::ToolBar
            | Self::Sheet
            | Self::Tab
            | Self::GroupControl
            | Self::Option => FoldPolicy::OwnSpan,
        }
    }
}

/// Get folding ranges for a parsed document, sorted by start line.
///
/// Only ranges spanning more than one line are returned.
pub fn folding_ranges(parse: &Parse) -> Vec<FoldingRange> {
    let mut ranges: Vec<FoldingRange> = parse
        .syntax()
        .descendants()
        .filter_map(|node| {
            let kind = FoldableKind::from_syntax(node.kind())?;
            fold_node(parse, &node, kind)
        })
        .collect();

    collect_comment_runs(parse, &mut ranges);

    ranges.retain(|r| r.end_line > r.start_line);
    ranges.sort_by_key(|r| (r.start_line, r.end_line));
    ranges
}

fn fold_node(parse: &Parse, node: &SyntaxNode, kind: FoldableKind) -> Option<FoldingRange> {
    let (start_line, own_end) = parse.node_lines(node)?;
    let end_line = match kind.policy() {
        FoldPolicy::OwnSpan => own_end,
        FoldPolicy::EnclosingEnd => {
            let parent = node.parent()?;
            parse.node_lines(&parent)?.1
        }
    };
    if kind == FoldableKind::If && is_single_line_if(parse, node, start_line) {
        return None;
    }
    Some(FoldingRange {
        start_line,
        end_line,
        kind: Some(FoldingRangeKind::Region),
    })
}

/// `IF cond THEN stmt.` closes on the line it opens
///
/// Only the first line is inspected: any `END` or terminating `.` there
/// counts, including one that closes a nested structure, so such an IF is
/// not folded. Member-access dots do not count.
fn is_single_line_if(parse: &Parse, node: &SyntaxNode, start_line: u32) -> bool {
    let first_line: Vec<SyntaxToken> = node
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| t.kind().is_significant())
        .take_while(|t| parse.line_index().line_col(t.text_range().start()).line == start_line)
        .collect();
    let has_then = first_line.iter().any(|t| t.kind() == SyntaxKind::THEN_KW);
    let closes = first_line.iter().any(|t| match t.kind() {
        SyntaxKind::END_KW => true,
        SyntaxKind::DOT => t.parent().is_none_or(|p| p.kind() != SyntaxKind::NAME_REF),
        _ => false,
    });
    has_then && closes
}

/// Runs of two or more consecutive full-line comments
fn collect_comment_runs(parse: &Parse, ranges: &mut Vec<FoldingRange>) {
    let mut run: Option<(u32, u32)> = None;
    let comment_lines = parse
        .syntax()
        .descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .filter(|t| t.kind() == SyntaxKind::COMMENT && !is_placeholder(t.text()))
        .filter(is_full_line)
        .map(|t| parse.line_index().line_col(t.text_range().start()).line);

    for line in comment_lines {
        run = match run {
            Some((start, end)) if line == end + 1 => Some((start, line)),
            Some((start, end)) => {
                push_comment_range(ranges, start, end);
                Some((line, line))
            }
            None => Some((line, line)),
        };
    }
    if let Some((start, end)) = run {
        push_comment_range(ranges, start, end);
    }
}

fn push_comment_range(ranges: &mut Vec<FoldingRange>, start_line: u32, end_line: u32) {
    if end_line > start_line {
        ranges.push(FoldingRange {
            start_line,
            end_line,
            kind: Some(FoldingRangeKind::Comment),
        });
    }
}

fn is_full_line(token: &SyntaxToken) -> bool {
    let mut prev = token.prev_token();
    while let Some(t) = prev {
        match t.kind() {
            SyntaxKind::WHITESPACE => prev = t.prev_token(),
            SyntaxKind::NEWLINE => return true,
            _ => return false,
        }
    }
    true
}
