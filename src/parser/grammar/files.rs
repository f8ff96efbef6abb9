//! FILE declarations
//!
//! ```text
//! File    = Label 'FILE' Attributes (Key | Record | DataEntry)* ('END' | '.')
//! Key     = Label ('KEY' | 'INDEX') ('(' KeyField (',' KeyField)* ')')? Attributes
//! KeyField = ('+' | '-')? Name
//! ```
//!
//! `RECORD` blocks are parsed as ordinary field structures.

use super::{ClarionParser, data};
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::syntax_kind::SyntaxKind;

/// File = Label 'FILE' Attributes body ('END' | '.')
pub fn parse_file<P: ClarionParser>(p: &mut P, labelled: bool) {
    p.start_node(SyntaxKind::FILE_DECL);
    if labelled {
        p.bump();
    } else {
        p.error("FILE requires a label".to_string(), ErrorCode::E0301);
    }
    let opened = p.current_range();
    p.bump();
    data::parse_attribute_list(p);

    if !p.at_any(&[SyntaxKind::END_KW, SyntaxKind::DOT]) {
        p.expect_line_end();
        data::parse_field_list(p, ParseContext::FileBody);
    }
    p.expect_terminator("FILE", opened);
    p.finish_node();
}

/// Key = Label ('KEY' | 'INDEX') KeyFields? Attributes
pub fn parse_key<P: ClarionParser>(p: &mut P, labelled: bool) {
    p.start_node(SyntaxKind::KEY_DEF);
    if labelled {
        p.bump();
    } else {
        p.error("KEY requires a label".to_string(), ErrorCode::E0301);
    }
    p.bump();

    if p.eat(SyntaxKind::L_PAREN) && !p.eat(SyntaxKind::R_PAREN) {
        loop {
            parse_key_field(p);
            if !p.eat(SyntaxKind::COMMA) {
                break;
            }
        }
        p.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
    }
    data::parse_attribute_list(p);
    p.expect_line_end();
    p.finish_node();
}

fn parse_key_field<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::KEY_FIELD);
    if !p.eat(SyntaxKind::PLUS) {
        p.eat(SyntaxKind::MINUS);
    }
    if p.at_name() {
        p.bump();
    } else {
        let message = format!("expected a key field name, found {}", p.found());
        p.error(message, ErrorCode::E0301);
    }
    p.finish_node();
}
