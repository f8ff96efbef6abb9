//! Alternative selection
//!
//! Where two rules start alike, the choice is made here. Under
//! [`Strategy::Fast`] only a fixed window of tokens is inspected; under
//! [`Strategy::Full`] the whole logical line is scanned, so a `Full` parse
//! accepts everything a `Fast` parse does and more.

use super::{ClarionParser, FAST_LOOKAHEAD, Strategy};
use crate::parser::syntax_kind::SyntaxKind;

/// Tokens that end the scan for a statement's assignment operator
const STATEMENT_BREAKS: &[SyntaxKind] = &[
    SyntaxKind::NEWLINE,
    SyntaxKind::SEMICOLON,
    SyntaxKind::THEN_KW,
    SyntaxKind::ELSE_KW,
    SyntaxKind::ELSIF_KW,
    SyntaxKind::END_KW,
    SyntaxKind::OF_KW,
    SyntaxKind::OROF_KW,
];

fn is_procedure_kw(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::PROCEDURE_KW | SyntaxKind::FUNCTION_KW)
}

/// Find the first token of `targets` at bracket depth zero on the current line
///
/// `limit` caps the number of significant tokens inspected.
fn scan_line<P: ClarionParser>(
    p: &P,
    targets: impl Fn(SyntaxKind) -> bool,
    breaks: &[SyntaxKind],
    limit: Option<usize>,
) -> Option<usize> {
    let mut depth = 0usize;
    let mut n = 0;
    loop {
        if limit.is_some_and(|limit| n >= limit) {
            return None;
        }
        let kind = p.nth(n);
        if kind == SyntaxKind::ERROR && p.nth_text(n).is_empty() {
            return None;
        }
        match kind {
            SyntaxKind::L_PAREN | SyntaxKind::L_BRACKET | SyntaxKind::L_BRACE => depth += 1,
            SyntaxKind::R_PAREN | SyntaxKind::R_BRACKET | SyntaxKind::R_BRACE => {
                depth = depth.saturating_sub(1)
            }
            SyntaxKind::NEWLINE => return None,
            _ if depth == 0 && breaks.contains(&kind) => return None,
            _ if depth == 0 && targets(kind) => return Some(n),
            _ => {}
        }
        n += 1;
    }
}

fn window<P: ClarionParser>(p: &P) -> Option<usize> {
    match p.strategy() {
        Strategy::Fast => Some(FAST_LOOKAHEAD),
        Strategy::Full => None,
    }
}

/// Whether the statement at the current position is an assignment
pub fn predict_assignment<P: ClarionParser>(p: &P) -> bool {
    scan_line(p, SyntaxKind::is_assign_op, STATEMENT_BREAKS, window(p)).is_some()
}

/// Whether `LOOP` is followed by a counter header `i = a TO b`
///
/// Called with the parser positioned after `LOOP`.
pub fn predict_counter_loop<P: ClarionParser>(p: &P) -> bool {
    match p.strategy() {
        Strategy::Fast => p.at_name() && p.nth(1) == SyntaxKind::EQ,
        Strategy::Full => {
            scan_line(p, |kind| kind == SyntaxKind::TO_KW, &[SyntaxKind::SEMICOLON], None)
                .is_some()
        }
    }
}

/// Whether a label starts a procedure header `Label[.Name]* PROCEDURE`
pub fn at_procedure_header<P: ClarionParser>(p: &P) -> bool {
    if !p.at(SyntaxKind::LABEL) {
        return false;
    }
    match p.strategy() {
        Strategy::Fast => {
            is_procedure_kw(p.nth(1))
                || (p.nth(1) == SyntaxKind::DOT && is_procedure_kw(p.nth(3)))
        }
        Strategy::Full => {
            let mut n = 1;
            while p.nth(n) == SyntaxKind::DOT && p.nth(n + 1).is_name() {
                n += 2;
            }
            is_procedure_kw(p.nth(n))
        }
    }
}

/// Whether a label starts a routine header `Label ROUTINE`
pub fn at_routine_header<P: ClarionParser>(p: &P) -> bool {
    p.at(SyntaxKind::LABEL) && p.nth(1) == SyntaxKind::ROUTINE_KW
}

/// Whether the current position starts a new procedure or routine, or ends the file
pub fn at_section_boundary<P: ClarionParser>(p: &P) -> bool {
    p.at_eof() || at_procedure_header(p) || at_routine_header(p)
}
