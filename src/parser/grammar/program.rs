//! File structure: PROGRAM/MEMBER headers, MAP blocks, procedures and routines
//!
//! ```text
//! SourceFile  = ProgramHeader? (DataSection | MapBlock | CodeSection | Procedure | Routine)*
//! Procedure   = ProcedureHeader DataSection? CodeSection? Routine*
//! Routine     = Label 'ROUTINE' ('DATA' DataEntry* )? ('CODE')? Statement*
//! MapBlock    = 'MAP' (ModuleBlock | Include | Prototype)* ('END' | '.')
//! ```

use super::predict::{at_procedure_header, at_routine_header, at_section_boundary};
use super::{ClarionParser, data, statements};
use crate::parser::errors::{ErrorCode, ParseContext, RelatedInfo};
use crate::parser::syntax_kind::SyntaxKind;

/// Whether a data section may contain `MAP` blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataScope {
    /// Before the first procedure; `MAP` blocks are siblings of the section
    Global,
    /// Inside a procedure or routine
    Local,
}

/// SourceFile = ProgramHeader? member*
pub fn parse_source_file<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::SOURCE_FILE);
    p.skip_separators();

    if p.at_any(&[SyntaxKind::PROGRAM_KW, SyntaxKind::MEMBER_KW]) {
        parse_program_header(p);
    }

    loop {
        p.skip_separators();
        if p.at_eof() {
            break;
        }
        let start = p.pos();
        match p.current_kind() {
            SyntaxKind::MAP_KW => parse_map(p),
            SyntaxKind::CODE_KW => parse_code_section(p),
            SyntaxKind::PROGRAM_KW | SyntaxKind::MEMBER_KW => {
                let message = format!("{} must be the first statement of the file", p.found());
                p.error_recover(message, ErrorCode::E0501, &[SyntaxKind::NEWLINE]);
            }
            _ if at_procedure_header(p) => parse_procedure(p),
            _ if at_routine_header(p) => parse_routine(p),
            _ => parse_data_section(p, DataScope::Global),
        }
        // Safety: if we didn't make progress, force-skip a token
        if p.pos() == start && !p.at_eof() {
            p.unexpected_in(ParseContext::SourceFile, ErrorCode::E0901);
        }
    }

    p.skip_trivia();
    p.finish_node();
}

/// ProgramHeader = ('PROGRAM' | 'MEMBER' ('(' ... ')')?) Attributes
fn parse_program_header<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::PROGRAM_HEADER);
    p.bump();
    if p.at(SyntaxKind::L_PAREN) {
        data::parse_attribute_args(p);
    }
    data::parse_attribute_list(p);
    p.expect_line_end();
    p.finish_node();
}

/// DataSection = DataEntry*
///
/// For routines the section starts with the `DATA` keyword.
pub fn parse_data_section<P: ClarionParser>(p: &mut P, scope: DataScope) {
    p.start_node(SyntaxKind::DATA_SECTION);
    if p.at(SyntaxKind::DATA_KW) {
        p.bump();
        p.expect_line_end();
    }
    loop {
        p.skip_separators();
        if at_section_boundary(p) || p.at(SyntaxKind::CODE_KW) {
            break;
        }
        if scope == DataScope::Global && p.at(SyntaxKind::MAP_KW) {
            break;
        }
        let start = p.pos();
        data::parse_data_entry(p, ParseContext::DataSection);
        if p.pos() == start && !p.at_eof() {
            let message = format!("stuck on token: {}", p.found());
            p.error_recover(message, ErrorCode::E0901, &[SyntaxKind::NEWLINE]);
        }
    }
    p.finish_node();
}

/// CodeSection = 'CODE' Statement*
pub fn parse_code_section<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::CODE_SECTION);
    p.bump();
    p.expect_line_end();
    statements::parse_statement_list(p, &[], false);
    p.finish_node();
}

/// Procedure = ProcedureHeader DataSection? CodeSection? Routine*
fn parse_procedure<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::PROCEDURE);
    parse_procedure_header(p);

    p.skip_separators();
    if !p.at(SyntaxKind::CODE_KW) && !at_section_boundary(p) {
        parse_data_section(p, DataScope::Local);
    }
    if p.at(SyntaxKind::CODE_KW) {
        parse_code_section(p);
    }
    loop {
        p.skip_separators();
        if !at_routine_header(p) {
            break;
        }
        parse_routine(p);
    }

    p.finish_node();
}

/// ProcedureHeader = QualifiedName ('PROCEDURE' | 'FUNCTION') ParameterList? Attributes
fn parse_procedure_header<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::PROCEDURE_HEADER);

    p.start_node(SyntaxKind::QUALIFIED_NAME);
    p.bump();
    while p.at(SyntaxKind::DOT)
        && p.nth(1).is_name()
        && !matches!(p.nth(1), SyntaxKind::PROCEDURE_KW | SyntaxKind::FUNCTION_KW)
    {
        p.bump();
        p.bump();
    }
    p.finish_node();

    if !p.eat(SyntaxKind::PROCEDURE_KW) && !p.eat(SyntaxKind::FUNCTION_KW) {
        let message = format!("expected PROCEDURE or FUNCTION, found {}", p.found());
        p.error(message, ErrorCode::E0901);
    }
    if p.at(SyntaxKind::L_PAREN) {
        parse_parameter_list(p);
    }
    data::parse_attribute_list(p);
    p.expect_line_end();

    p.finish_node();
}

/// Routine = Label 'ROUTINE' ('DATA' DataEntry*)? 'CODE'? Statement*
fn parse_routine<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::ROUTINE);
    p.bump();
    p.bump();
    p.expect_line_end();

    p.skip_separators();
    if p.at(SyntaxKind::DATA_KW) {
        parse_data_section(p, DataScope::Local);
        if !p.at(SyntaxKind::CODE_KW) {
            let message = format!("expected CODE after routine data, found {}", p.found());
            p.error(message, ErrorCode::E0501);
        }
    }
    if p.at(SyntaxKind::CODE_KW) {
        parse_code_section(p);
    } else {
        statements::parse_statement_list(p, &[], false);
    }

    p.finish_node();
}

/// ParameterList = '(' (Parameter (',' Parameter)*)? ')'
pub fn parse_parameter_list<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::PARAMETER_LIST);
    let opened = p.current_range();
    p.bump();

    loop {
        if p.eat(SyntaxKind::R_PAREN) {
            break;
        }
        if p.at_line_end() {
            p.push_error(
                format!("unclosed parameter list: expected ')', found {}", p.found()),
                ErrorCode::E0203,
                Some(RelatedInfo::new("'(' opened here", opened)),
            );
            break;
        }
        parse_parameter(p);
        if p.eat(SyntaxKind::COMMA) {
            continue;
        }
        if !p.at(SyntaxKind::R_PAREN) && !p.at_line_end() {
            p.unexpected_in(ParseContext::ParameterList, ErrorCode::E0901);
        }
    }

    p.finish_node();
}

/// Parameter = tokens up to a top-level ',' or ')'
///
/// Omittable parameters are wrapped in `<` `>`.
fn parse_parameter<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::PARAMETER);
    let mut depth = 0usize;
    let mut angle = p.at(SyntaxKind::LT);
    if angle {
        p.bump();
    }
    while !p.at_eof() && !p.at(SyntaxKind::NEWLINE) {
        match p.current_kind() {
            SyntaxKind::L_PAREN => depth += 1,
            SyntaxKind::R_PAREN if depth == 0 => break,
            SyntaxKind::R_PAREN => depth -= 1,
            SyntaxKind::COMMA if depth == 0 => break,
            SyntaxKind::GT if angle && depth == 0 => angle = false,
            _ => {}
        }
        p.bump();
    }
    p.finish_node();
}

/// MapBlock = 'MAP' MapEntry* ('END' | '.')
pub fn parse_map<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::MAP_BLOCK);
    let opened = p.current_range();
    p.bump();
    p.expect_line_end();
    parse_map_entries(p, ParseContext::MapBlock);
    p.expect_terminator("MAP", opened);
    p.finish_node();
}

fn parse_map_entries<P: ClarionParser>(p: &mut P, context: ParseContext) {
    loop {
        p.skip_separators();
        if p.at_eof() || p.at_any(&[SyntaxKind::END_KW, SyntaxKind::DOT, SyntaxKind::CODE_KW]) {
            break;
        }
        let start = p.pos();
        match p.current_kind() {
            SyntaxKind::MODULE_KW if context == ParseContext::MapBlock => parse_module(p),
            SyntaxKind::INCLUDE_KW => data::parse_include(p),
            SyntaxKind::IDENT | SyntaxKind::LABEL => parse_prototype(p),
            _ => p.unexpected_in(context, ErrorCode::E0304),
        }
        if p.pos() == start && !p.at_eof() {
            let message = format!("stuck on token: {}", p.found());
            p.error_recover(message, ErrorCode::E0901, &[SyntaxKind::NEWLINE]);
        }
    }
}

/// ModuleBlock = 'MODULE' '(' ... ')' Prototype* ('END' | '.')
fn parse_module<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::MODULE_BLOCK);
    let opened = p.current_range();
    p.bump();
    if p.at(SyntaxKind::L_PAREN) {
        data::parse_attribute_args(p);
    } else {
        let message = format!("expected '(' after MODULE, found {}", p.found());
        p.error(message, ErrorCode::E0901);
    }
    p.expect_line_end();
    parse_map_entries(p, ParseContext::ModuleBlock);
    p.expect_terminator("MODULE", opened);
    p.finish_node();
}

/// Prototype = Name ('PROCEDURE' | 'FUNCTION')? ParameterList? Attributes
fn parse_prototype<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::PROTOTYPE);
    p.bump();
    if !p.eat(SyntaxKind::PROCEDURE_KW) {
        p.eat(SyntaxKind::FUNCTION_KW);
    }
    if p.at(SyntaxKind::L_PAREN) {
        parse_parameter_list(p);
    }
    data::parse_attribute_list(p);
    p.expect_line_end();
    p.finish_node();
}
