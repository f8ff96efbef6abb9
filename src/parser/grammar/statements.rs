//! Executable statements
//!
//! ```text
//! Statement = If | Loop | Case | Execute | Do | Return | Exit | Break | Cycle
//!           | Assignment | Call
//! If        = 'IF' Expr 'THEN'? Stmts ('ELSIF' Expr 'THEN'? Stmts)* ('ELSE' Stmts)? End
//! Loop      = ('LOOP' LoopHead? | 'ACCEPT') Stmts (End | ('UNTIL' | 'WHILE') Expr)
//! Case      = 'CASE' Expr (('OF' | 'OROF') Value ('OROF' Value)* Stmts)* ('ELSE' Stmts)? End
//! Execute   = 'EXECUTE' Expr Stmts ('ELSE' Stmts)? End
//! End       = 'END' | '.'
//! ```
//!
//! Statements are separated by newlines or `;`.

use super::predict::{at_section_boundary, predict_assignment, predict_counter_loop};
use super::{ClarionParser, expressions};
use crate::parser::errors::{ErrorCode, ParseContext};
use crate::parser::syntax_kind::SyntaxKind;

/// Keywords that continue or close an enclosing structure
const CLAUSE_KEYWORDS: &[SyntaxKind] = &[
    SyntaxKind::END_KW,
    SyntaxKind::DOT,
    SyntaxKind::ELSE_KW,
    SyntaxKind::ELSIF_KW,
    SyntaxKind::OF_KW,
    SyntaxKind::OROF_KW,
    SyntaxKind::UNTIL_KW,
    SyntaxKind::WHILE_KW,
];

const IF_BODY_STOPS: &[SyntaxKind] = &[
    SyntaxKind::ELSIF_KW,
    SyntaxKind::ELSE_KW,
    SyntaxKind::END_KW,
    SyntaxKind::DOT,
];

const LOOP_BODY_STOPS: &[SyntaxKind] = &[
    SyntaxKind::END_KW,
    SyntaxKind::DOT,
    SyntaxKind::UNTIL_KW,
    SyntaxKind::WHILE_KW,
];

const CASE_BODY_STOPS: &[SyntaxKind] = &[
    SyntaxKind::OF_KW,
    SyntaxKind::OROF_KW,
    SyntaxKind::ELSE_KW,
    SyntaxKind::END_KW,
    SyntaxKind::DOT,
];

const EXECUTE_BODY_STOPS: &[SyntaxKind] = &[SyntaxKind::ELSE_KW, SyntaxKind::END_KW, SyntaxKind::DOT];

const ELSE_BODY_STOPS: &[SyntaxKind] = &[SyntaxKind::END_KW, SyntaxKind::DOT];

/// Parse statements until one of `stops`, a clause keyword, or a section boundary
///
/// A `nested` list leaves clause keywords it does not stop at to the
/// enclosing structure. A top-level list reports them and moves on.
pub fn parse_statement_list<P: ClarionParser>(p: &mut P, stops: &[SyntaxKind], nested: bool) {
    loop {
        p.skip_separators();
        if at_section_boundary(p) || p.at_any(stops) {
            break;
        }
        if nested && p.at_any(CLAUSE_KEYWORDS) {
            break;
        }
        let start = p.pos();
        parse_statement(p);
        if !at_statement_end(p) {
            let message = format!("expected end of statement, found {}", p.found());
            p.error_recover(
                message,
                ErrorCode::E0201,
                ParseContext::CodeSection.recovery_tokens(),
            );
        }
        if p.pos() == start && !p.at_eof() {
            let message = format!("stuck on token: {}", p.found());
            p.error_recover(message, ErrorCode::E0901, &[SyntaxKind::NEWLINE]);
        }
    }
}

/// At a statement separator or a token that closes the enclosing structure
fn at_statement_end<P: ClarionParser>(p: &P) -> bool {
    p.at_line_end() || p.at_any(CLAUSE_KEYWORDS)
}

pub fn parse_statement<P: ClarionParser>(p: &mut P) {
    match p.current_kind() {
        SyntaxKind::LABEL => parse_labelled_statement(p),
        SyntaxKind::IF_KW => parse_if(p),
        SyntaxKind::LOOP_KW => parse_loop(p),
        SyntaxKind::CASE_KW => parse_case(p),
        SyntaxKind::EXECUTE_KW => parse_execute(p),
        SyntaxKind::DO_KW => parse_do(p),
        SyntaxKind::RETURN_KW => parse_return(p),
        SyntaxKind::EXIT_KW => {
            p.start_node(SyntaxKind::EXIT_STMT);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::BREAK_KW => parse_jump(p, SyntaxKind::BREAK_STMT),
        SyntaxKind::CYCLE_KW => parse_jump(p, SyntaxKind::CYCLE_STMT),
        SyntaxKind::END_KW | SyntaxKind::DOT => {
            let message = format!("unexpected {} without an open structure", p.found());
            p.error_recover(message, ErrorCode::E0205, &[SyntaxKind::NEWLINE, SyntaxKind::SEMICOLON]);
        }
        SyntaxKind::CODE_KW | SyntaxKind::DATA_KW | SyntaxKind::MAP_KW => {
            let message = format!("{} is not allowed in a code section", p.found());
            p.error_recover(message, ErrorCode::E0501, &[SyntaxKind::NEWLINE]);
        }
        SyntaxKind::IDENT if p.at_soft_kw("ACCEPT") && accept_stands_alone(p) => parse_loop(p),
        SyntaxKind::IDENT
        | SyntaxKind::SELF_KW
        | SyntaxKind::PARENT_KW
        | SyntaxKind::FIELD_EQUATE
        | SyntaxKind::QUESTION => parse_simple_statement(p),
        kind if CLAUSE_KEYWORDS.contains(&kind) => {
            let message = format!("{} without a matching structure", p.found());
            p.error_recover(
                message,
                ErrorCode::E0901,
                ParseContext::CodeSection.recovery_tokens(),
            );
        }
        _ => p.unexpected_in(ParseContext::CodeSection, ErrorCode::E0901),
    }
}

fn accept_stands_alone<P: ClarionParser>(p: &P) -> bool {
    matches!(p.nth(1), SyntaxKind::NEWLINE | SyntaxKind::SEMICOLON) || p.nth_text(1).is_empty()
}

/// A label in column 0 of a code section names the statement that follows it
fn parse_labelled_statement<P: ClarionParser>(p: &mut P) {
    match p.nth(1) {
        SyntaxKind::NEWLINE | SyntaxKind::SEMICOLON => p.bump(),
        kind if kind == SyntaxKind::IDENT || kind.is_keyword() => {
            p.bump();
            parse_statement(p);
        }
        _ => parse_simple_statement(p),
    }
}

/// Assignment = Target AssignOp Expr; Call = Target
fn parse_simple_statement<P: ClarionParser>(p: &mut P) {
    if predict_assignment(p) {
        p.start_node(SyntaxKind::ASSIGNMENT_STMT);
        expressions::parse_postfix_expression(p);
        if p.current_kind().is_assign_op() && !p.at_eof() {
            p.bump();
            expressions::parse_expression(p);
        } else {
            let message = format!("expected an assignment operator, found {}", p.found());
            p.error(message, ErrorCode::E0901);
        }
        p.finish_node();
    } else {
        p.start_node(SyntaxKind::CALL_STMT);
        expressions::parse_postfix_expression(p);
        p.finish_node();
    }
}

/// If = 'IF' Expr 'THEN'? Stmts ElsifClause* ElseClause? End
fn parse_if<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::IF_STMT);
    let opened = p.current_range();
    p.bump();
    expressions::parse_expression(p);
    p.eat(SyntaxKind::THEN_KW);
    parse_statement_list(p, IF_BODY_STOPS, true);

    while p.at(SyntaxKind::ELSIF_KW) {
        p.start_node(SyntaxKind::ELSIF_CLAUSE);
        p.bump();
        expressions::parse_expression(p);
        p.eat(SyntaxKind::THEN_KW);
        parse_statement_list(p, IF_BODY_STOPS, true);
        p.finish_node();
    }
    if p.at(SyntaxKind::ELSE_KW) {
        parse_else_clause(p);
    }

    p.expect_terminator("IF", opened);
    p.finish_node();
}

fn parse_else_clause<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::ELSE_CLAUSE);
    p.bump();
    parse_statement_list(p, ELSE_BODY_STOPS, true);
    p.finish_node();
}

/// Loop = 'LOOP' LoopHead? Stmts (End | ('UNTIL' | 'WHILE') Expr)
///
/// LoopHead = Target '=' Expr 'TO' Expr ('BY' Expr)?
///          | Expr 'TIMES'
///          | ('UNTIL' | 'WHILE') Expr
///
/// `ACCEPT` opens the same structure without a head.
fn parse_loop<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::LOOP_STMT);
    let opened = p.current_range();
    let what = if p.at(SyntaxKind::LOOP_KW) { "LOOP" } else { "ACCEPT" };
    let is_loop = p.at(SyntaxKind::LOOP_KW);
    p.bump();

    if is_loop && !p.at_line_end() {
        if p.at_any(&[SyntaxKind::UNTIL_KW, SyntaxKind::WHILE_KW]) {
            p.bump();
            expressions::parse_expression(p);
        } else if predict_counter_loop(p) {
            expressions::parse_postfix_expression(p);
            p.expect(SyntaxKind::EQ, ErrorCode::E0901);
            expressions::parse_expression(p);
            p.expect(SyntaxKind::TO_KW, ErrorCode::E0901);
            expressions::parse_expression(p);
            if p.eat(SyntaxKind::BY_KW) {
                expressions::parse_expression(p);
            }
        } else {
            expressions::parse_expression(p);
            p.expect(SyntaxKind::TIMES_KW, ErrorCode::E0901);
        }
    }

    parse_statement_list(p, LOOP_BODY_STOPS, true);
    if p.at_any(&[SyntaxKind::UNTIL_KW, SyntaxKind::WHILE_KW]) {
        p.bump();
        expressions::parse_expression(p);
    } else {
        p.expect_terminator(what, opened);
    }
    p.finish_node();
}

/// Case = 'CASE' Expr OfClause* ElseClause? End
fn parse_case<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::CASE_STMT);
    let opened = p.current_range();
    p.bump();
    expressions::parse_expression(p);

    loop {
        p.skip_separators();
        match p.current_kind() {
            _ if at_section_boundary(p) => break,
            SyntaxKind::OF_KW | SyntaxKind::OROF_KW => parse_of_clause(p),
            SyntaxKind::ELSE_KW => parse_else_clause(p),
            SyntaxKind::END_KW | SyntaxKind::DOT => break,
            _ => {
                let message = format!("expected OF, ELSE or END in CASE, found {}", p.found());
                p.error_recover(
                    message,
                    ErrorCode::E0304,
                    ParseContext::CodeSection.recovery_tokens(),
                );
            }
        }
    }

    p.expect_terminator("CASE", opened);
    p.finish_node();
}

/// OfClause = ('OF' | 'OROF') Value ('OROF' Value)* Stmts
fn parse_of_clause<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::OF_CLAUSE);
    p.bump();
    parse_case_value(p);
    while p.eat(SyntaxKind::OROF_KW) {
        parse_case_value(p);
    }
    parse_statement_list(p, CASE_BODY_STOPS, true);
    p.finish_node();
}

/// Value = Expr ('TO' Expr)?
fn parse_case_value<P: ClarionParser>(p: &mut P) {
    expressions::parse_expression(p);
    if p.eat(SyntaxKind::TO_KW) {
        expressions::parse_expression(p);
    }
}

/// Execute = 'EXECUTE' Expr Stmts ElseClause? End
fn parse_execute<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::EXECUTE_STMT);
    let opened = p.current_range();
    p.bump();
    expressions::parse_expression(p);
    parse_statement_list(p, EXECUTE_BODY_STOPS, true);
    if p.at(SyntaxKind::ELSE_KW) {
        parse_else_clause(p);
    }
    p.expect_terminator("EXECUTE", opened);
    p.finish_node();
}

/// Do = 'DO' Name
fn parse_do<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::DO_STMT);
    p.bump();
    if p.at_name() {
        p.start_node(SyntaxKind::NAME_REF);
        p.bump();
        p.finish_node();
    } else {
        let message = format!("expected a routine name after DO, found {}", p.found());
        p.error(message, ErrorCode::E0301);
    }
    p.finish_node();
}

/// Return = 'RETURN' Expr?
fn parse_return<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::RETURN_STMT);
    p.bump();
    if !at_statement_end(p) {
        expressions::parse_expression(p);
    }
    p.finish_node();
}

/// Break = 'BREAK' Label?; Cycle = 'CYCLE' Label?
fn parse_jump<P: ClarionParser>(p: &mut P, kind: SyntaxKind) {
    p.start_node(kind);
    p.bump();
    p.eat(SyntaxKind::IDENT);
    p.finish_node();
}
