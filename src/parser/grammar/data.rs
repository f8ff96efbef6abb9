//! Data declarations
//!
//! ```text
//! DataEntry    = Include | Map | Label? Declaration
//! Declaration  = Equate | Window | Group | Queue | Class | File | View | Itemize | Variable
//! Variable     = TypeRef Attributes
//! TypeRef      = ('&' | '*')? Name AttributeArgs?
//! Attributes   = (',' Name AttributeArgs?)*
//! ```
//!
//! Attribute arguments and CLASS/VIEW bodies are kept opaque: their tokens
//! are preserved in the tree without further structure.

use super::predict::at_section_boundary;
use super::{ClarionParser, expressions, files, program, windows};
use crate::parser::errors::{ErrorCode, ParseContext, RelatedInfo};
use crate::parser::syntax_kind::SyntaxKind;

/// Keywords that open a nested structure inside an opaque CLASS body
const CLASS_OPENERS: &[SyntaxKind] = &[
    SyntaxKind::GROUP_KW,
    SyntaxKind::QUEUE_KW,
    SyntaxKind::CLASS_KW,
    SyntaxKind::FILE_KW,
    SyntaxKind::RECORD_KW,
    SyntaxKind::VIEW_KW,
    SyntaxKind::JOIN_KW,
    SyntaxKind::MAP_KW,
    SyntaxKind::MODULE_KW,
    SyntaxKind::WINDOW_KW,
    SyntaxKind::APPLICATION_KW,
    SyntaxKind::MENUBAR_KW,
    SyntaxKind::MENU_KW,
    SyntaxKind::TOOLBAR_KW,
    SyntaxKind::SHEET_KW,
    SyntaxKind::TAB_KW,
    SyntaxKind::OPTION_KW,
];

const VIEW_OPENERS: &[SyntaxKind] = &[SyntaxKind::JOIN_KW];

/// DataEntry = Include | Map | Label? Declaration
pub fn parse_data_entry<P: ClarionParser>(p: &mut P, context: ParseContext) {
    match p.current_kind() {
        SyntaxKind::INCLUDE_KW => parse_include(p),
        SyntaxKind::MAP_KW => program::parse_map(p),
        SyntaxKind::END_KW | SyntaxKind::DOT => {
            let message = format!("unexpected {} without an open structure", p.found());
            p.error_recover(message, ErrorCode::E0205, &[SyntaxKind::NEWLINE]);
        }
        SyntaxKind::CODE_KW
        | SyntaxKind::DATA_KW
        | SyntaxKind::PROGRAM_KW
        | SyntaxKind::MEMBER_KW
        | SyntaxKind::ROUTINE_KW => {
            let message = format!("{} is not allowed {}", p.found(), context.description());
            p.error_recover(message, ErrorCode::E0501, &[SyntaxKind::NEWLINE]);
        }
        SyntaxKind::LABEL => {
            let kind = declaration_kind(p, 1);
            parse_declaration(p, kind, true);
        }
        SyntaxKind::AMP | SyntaxKind::STAR => parse_variable(p, false),
        kind if kind.is_name() => {
            let kind = declaration_kind(p, 0);
            parse_declaration(p, kind, false);
        }
        _ => p.unexpected_in(context, ErrorCode::E0303),
    }
}

/// Node kind of the declaration whose type keyword is the nth token
fn declaration_kind<P: ClarionParser>(p: &P, n: usize) -> SyntaxKind {
    match p.nth(n) {
        SyntaxKind::GROUP_KW => SyntaxKind::GROUP_BLOCK,
        SyntaxKind::QUEUE_KW => SyntaxKind::QUEUE_BLOCK,
        SyntaxKind::CLASS_KW => SyntaxKind::CLASS_DECL,
        SyntaxKind::FILE_KW => SyntaxKind::FILE_DECL,
        SyntaxKind::VIEW_KW => SyntaxKind::VIEW_DECL,
        SyntaxKind::RECORD_KW => SyntaxKind::RECORD_BLOCK,
        SyntaxKind::WINDOW_KW | SyntaxKind::APPLICATION_KW => SyntaxKind::WINDOW_DEF,
        _ if p.nth_soft_kw(n, "EQUATE") => SyntaxKind::EQUATE_DEF,
        _ if p.nth_soft_kw(n, "ITEMIZE") => SyntaxKind::ITEMIZE_BLOCK,
        _ if p.nth_soft_kw(n, "KEY") || p.nth_soft_kw(n, "INDEX") => SyntaxKind::KEY_DEF,
        _ => SyntaxKind::VARIABLE_DECL,
    }
}

fn parse_declaration<P: ClarionParser>(p: &mut P, kind: SyntaxKind, labelled: bool) {
    match kind {
        SyntaxKind::GROUP_BLOCK => parse_structure(p, kind, "GROUP", labelled),
        SyntaxKind::QUEUE_BLOCK => parse_structure(p, kind, "QUEUE", labelled),
        SyntaxKind::RECORD_BLOCK => parse_structure(p, kind, "RECORD", labelled),
        SyntaxKind::ITEMIZE_BLOCK => parse_structure(p, kind, "ITEMIZE", labelled),
        SyntaxKind::CLASS_DECL => parse_opaque_structure(p, kind, "CLASS", labelled),
        SyntaxKind::VIEW_DECL => parse_opaque_structure(p, kind, "VIEW", labelled),
        SyntaxKind::FILE_DECL => files::parse_file(p, labelled),
        SyntaxKind::KEY_DEF => files::parse_key(p, labelled),
        SyntaxKind::WINDOW_DEF => windows::parse_window(p, labelled),
        SyntaxKind::EQUATE_DEF => parse_equate(p, labelled),
        _ => parse_variable(p, labelled),
    }
}

/// Include = 'INCLUDE' '(' String (',' String)? ')' Attributes
pub fn parse_include<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::INCLUDE_DIRECTIVE);
    p.bump();
    if p.expect(SyntaxKind::L_PAREN, ErrorCode::E0901) {
        p.expect(SyntaxKind::STRING, ErrorCode::E0303);
        if p.eat(SyntaxKind::COMMA) {
            p.expect(SyntaxKind::STRING, ErrorCode::E0303);
        }
        p.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
    }
    parse_attribute_list(p);
    p.expect_line_end();
    p.finish_node();
}

/// Equate = Label 'EQUATE' ('(' Expression ')')?
fn parse_equate<P: ClarionParser>(p: &mut P, labelled: bool) {
    p.start_node(SyntaxKind::EQUATE_DEF);
    if labelled {
        p.bump();
    } else {
        p.error("EQUATE requires a label".to_string(), ErrorCode::E0301);
    }
    p.bump();
    if p.eat(SyntaxKind::L_PAREN) {
        expressions::parse_expression(p);
        p.expect(SyntaxKind::R_PAREN, ErrorCode::E0203);
    }
    parse_attribute_list(p);
    p.expect_line_end();
    p.finish_node();
}

/// Variable = Label? TypeRef Attributes
fn parse_variable<P: ClarionParser>(p: &mut P, labelled: bool) {
    p.start_node(SyntaxKind::VARIABLE_DECL);
    if labelled {
        p.bump();
    }
    if p.at_line_end() || p.at_any(&[SyntaxKind::END_KW, SyntaxKind::DOT]) {
        let message = format!("expected a data type, found {}", p.found());
        p.error(message, ErrorCode::E0303);
    } else {
        parse_type_ref(p);
        parse_attribute_list(p);
        p.expect_line_end();
    }
    p.finish_node();
}

/// TypeRef = ('&' | '*')? Name ('.' Name)* AttributeArgs?
fn parse_type_ref<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::TYPE_REF);
    if !p.eat(SyntaxKind::AMP) {
        p.eat(SyntaxKind::STAR);
    }
    if p.at_name() {
        p.bump();
        while p.at_member_dot() {
            p.bump();
            p.bump();
        }
        if p.at(SyntaxKind::L_PAREN) {
            parse_attribute_args(p);
        }
    } else {
        let message = format!("expected a data type, found {}", p.found());
        p.error_recover(
            message,
            ErrorCode::E0303,
            &[SyntaxKind::NEWLINE, SyntaxKind::COMMA],
        );
    }
    p.finish_node();
}

/// GROUP, QUEUE, RECORD and ITEMIZE: header, field list, end marker
///
/// A QUEUE must declare at least one field.
fn parse_structure<P: ClarionParser>(p: &mut P, kind: SyntaxKind, what: &str, labelled: bool) {
    p.start_node(kind);
    if labelled {
        p.bump();
    }
    let opened = p.current_range();
    p.bump();
    if p.at(SyntaxKind::L_PAREN) {
        parse_attribute_args(p);
    }
    parse_attribute_list(p);

    let mut fields = 0;
    if !p.at_any(&[SyntaxKind::END_KW, SyntaxKind::DOT]) {
        p.expect_line_end();
        fields = parse_field_list(p, ParseContext::FieldList);
    }
    if kind == SyntaxKind::QUEUE_BLOCK && fields == 0 {
        p.push_error(
            format!("{what} must declare at least one field"),
            ErrorCode::E0306,
            Some(RelatedInfo::new(format!("{what} declared here"), opened)),
        );
    }
    p.expect_terminator(what, opened);
    p.finish_node();
}

/// FieldList = DataEntry*, up to the structure's end marker
///
/// Returns the number of entries parsed. `context` names the enclosing
/// structure in error messages.
pub fn parse_field_list<P: ClarionParser>(p: &mut P, context: ParseContext) -> usize {
    let mut count = 0;
    loop {
        p.skip_separators();
        if at_structure_end(p) {
            break;
        }
        let start = p.pos();
        parse_data_entry(p, context);
        count += 1;
        if p.pos() == start && !p.at_eof() {
            let message = format!("stuck on token: {}", p.found());
            p.error_recover(message, ErrorCode::E0901, &[SyntaxKind::NEWLINE]);
        }
    }
    count
}

/// End marker, or a token no structure body can contain
pub fn at_structure_end<P: ClarionParser>(p: &P) -> bool {
    p.at_any(&[SyntaxKind::END_KW, SyntaxKind::DOT, SyntaxKind::CODE_KW])
        || at_section_boundary(p)
}

/// CLASS and VIEW: header, opaque body, end marker
fn parse_opaque_structure<P: ClarionParser>(
    p: &mut P,
    kind: SyntaxKind,
    what: &str,
    labelled: bool,
) {
    p.start_node(kind);
    if labelled {
        p.bump();
    }
    let opened = p.current_range();
    p.bump();
    if p.at(SyntaxKind::L_PAREN) {
        parse_attribute_args(p);
    }
    parse_attribute_list(p);

    if !p.at_any(&[SyntaxKind::END_KW, SyntaxKind::DOT]) {
        p.expect_line_end();
        let (body, openers) = if kind == SyntaxKind::CLASS_DECL {
            (SyntaxKind::CLASS_BODY, CLASS_OPENERS)
        } else {
            (SyntaxKind::VIEW_BODY, VIEW_OPENERS)
        };
        parse_opaque_body(p, body, openers);
    }
    p.expect_terminator(what, opened);
    p.finish_node();
}

/// Consume tokens up to the end marker matching the enclosing structure
///
/// Nested structures are counted when their keyword is the first token on a
/// line or directly follows a label; `&QUEUE` style references never open one.
fn parse_opaque_body<P: ClarionParser>(p: &mut P, kind: SyntaxKind, openers: &[SyntaxKind]) {
    p.start_node(kind);
    let mut depth = 0usize;
    let mut after_label = false;
    while !p.at_eof() {
        let line_start = p.at_line_start();
        let current = p.current_kind();
        let closes =
            current == SyntaxKind::END_KW || (current == SyntaxKind::DOT && !p.at_member_dot());
        if closes && depth == 0 {
            break;
        }
        let opens = (line_start || after_label)
            && (openers.contains(&current)
                || (openers == CLASS_OPENERS && p.at_soft_kw("ITEMIZE")));
        if opens {
            depth += 1;
        } else if closes {
            depth -= 1;
        }
        after_label = line_start && current == SyntaxKind::LABEL;
        p.bump();
    }
    p.finish_node();
}

/// Attributes = (',' Attribute)*
pub fn parse_attribute_list<P: ClarionParser>(p: &mut P) {
    if !p.at(SyntaxKind::COMMA) {
        return;
    }
    p.start_node(SyntaxKind::ATTRIBUTE_LIST);
    while p.eat(SyntaxKind::COMMA) {
        if p.at_name() {
            p.start_node(SyntaxKind::ATTRIBUTE);
            p.bump();
            if p.at(SyntaxKind::L_PAREN) {
                parse_attribute_args(p);
            }
            p.finish_node();
        } else {
            p.unexpected_in(ParseContext::AttributeList, ErrorCode::E0304);
        }
    }
    p.finish_node();
}

/// AttributeArgs = '(' balanced tokens ')'
pub fn parse_attribute_args<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::ATTRIBUTE_ARGS);
    let opened = p.current_range();
    p.bump();
    let mut depth = 1usize;
    loop {
        if p.at_eof() || p.at(SyntaxKind::NEWLINE) {
            p.push_error(
                format!("unclosed '(': expected ')', found {}", p.found()),
                ErrorCode::E0203,
                Some(RelatedInfo::new("'(' opened here", opened)),
            );
            break;
        }
        match p.current_kind() {
            SyntaxKind::L_PAREN => depth += 1,
            SyntaxKind::R_PAREN => depth -= 1,
            _ => {}
        }
        p.bump();
        if depth == 0 {
            break;
        }
    }
    p.finish_node();
}
