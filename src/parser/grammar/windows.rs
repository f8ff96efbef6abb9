//! WINDOW and APPLICATION control trees
//!
//! ```text
//! Window  = Label ('WINDOW' | 'APPLICATION') AttributeArgs? Attributes Entry* ('END' | '.')
//! Entry   = Block | Control
//! Block   = Label? ('MENUBAR' | 'MENU' | 'TOOLBAR' | 'SHEET' | 'TAB' | 'GROUP' | 'OPTION')
//!           AttributeArgs? Attributes Entry* ('END' | '.')
//! Control = Label? Name AttributeArgs? Attributes
//! ```

use super::{ClarionParser, data};
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::syntax_kind::SyntaxKind;

/// Window = Label ('WINDOW' | 'APPLICATION') header body ('END' | '.')
pub fn parse_window<P: ClarionParser>(p: &mut P, labelled: bool) {
    p.start_node(SyntaxKind::WINDOW_DEF);
    if labelled {
        p.bump();
    }
    let opened = p.current_range();
    let what = if p.at(SyntaxKind::APPLICATION_KW) {
        "APPLICATION"
    } else {
        "WINDOW"
    };
    p.bump();
    parse_block_header(p);
    if !p.at_any(&[SyntaxKind::END_KW, SyntaxKind::DOT]) {
        p.expect_line_end();
        parse_window_body(p);
    }
    p.expect_terminator(what, opened);
    p.finish_node();
}

fn parse_block_header<P: ClarionParser>(p: &mut P) {
    if p.at(SyntaxKind::L_PAREN) {
        data::parse_attribute_args(p);
    }
    data::parse_attribute_list(p);
}

fn parse_window_body<P: ClarionParser>(p: &mut P) {
    loop {
        p.skip_separators();
        if data::at_structure_end(p) {
            break;
        }
        let start = p.pos();
        parse_window_entry(p);
        if p.pos() == start && !p.at_eof() {
            let message = format!("stuck on token: {}", p.found());
            p.error_recover(message, ErrorCode::E0901, &[SyntaxKind::NEWLINE]);
        }
    }
}

/// Node kind and display name of a nesting control keyword
fn block_kind(kind: SyntaxKind) -> Option<(SyntaxKind, &'static str)> {
    let block = match kind {
        SyntaxKind::MENUBAR_KW => (SyntaxKind::MENUBAR_BLOCK, "MENUBAR"),
        SyntaxKind::MENU_KW => (SyntaxKind::MENU_BLOCK, "MENU"),
        SyntaxKind::TOOLBAR_KW => (SyntaxKind::TOOLBAR_BLOCK, "TOOLBAR"),
        SyntaxKind::SHEET_KW => (SyntaxKind::SHEET_BLOCK, "SHEET"),
        SyntaxKind::TAB_KW => (SyntaxKind::TAB_BLOCK, "TAB"),
        SyntaxKind::GROUP_KW => (SyntaxKind::GROUP_CONTROL, "GROUP"),
        SyntaxKind::OPTION_KW => (SyntaxKind::OPTION_BLOCK, "OPTION"),
        _ => return None,
    };
    Some(block)
}

fn parse_window_entry<P: ClarionParser>(p: &mut P) {
    let labelled = p.at(SyntaxKind::LABEL) && p.nth(1).is_name();
    let offset = usize::from(labelled);

    if let Some((kind, what)) = block_kind(p.nth(offset)) {
        p.start_node(kind);
        if labelled {
            p.bump();
        }
        let opened = p.current_range();
        p.bump();
        parse_block_header(p);
        if !p.at_any(&[SyntaxKind::END_KW, SyntaxKind::DOT]) {
            p.expect_line_end();
            parse_window_body(p);
        }
        p.expect_terminator(what, opened);
        p.finish_node();
        return;
    }

    if !p.nth(offset).is_name() {
        p.unexpected_in(ParseContext::WindowBody, ErrorCode::E0304);
        return;
    }

    p.start_node(SyntaxKind::CONTROL);
    if labelled {
        p.bump();
    }
    p.bump();
    parse_block_header(p);
    p.expect_line_end();
    p.finish_node();
}
