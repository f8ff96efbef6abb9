//! Expression parsing
//!
//! Precedence from loosest to tightest:
//!
//! ```text
//! Expr       = OrExpr
//! OrExpr     = AndExpr (('OR' | 'XOR') AndExpr)*
//! AndExpr    = CmpExpr ('AND' CmpExpr)*
//! CmpExpr    = ConcatExpr (CmpOp ConcatExpr)*
//! ConcatExpr = AddExpr ('&' AddExpr)*
//! AddExpr    = MulExpr (('+' | '-') MulExpr)*
//! MulExpr    = PowExpr (('*' | '/' | '%') PowExpr)*
//! PowExpr    = Unary ('^' Unary)*
//! Unary      = ('-' | '+' | 'NOT' | '~' | 'NEW') Unary | Postfix
//! Postfix    = Factor (Arguments | '{' Expr (',' Expr)* '}' | '[' Expr (',' Expr)* ']')*
//! Factor     = Name ('.' Name)* | '?' Name | Literal | '(' Expr ')'
//! ```

use super::ClarionParser;
use crate::parser::errors::{ErrorCode, ParseContext, RelatedInfo};
use crate::parser::syntax_kind::SyntaxKind;

/// One level of the binary operator chain, loosest first
const BINARY_LEVELS: &[&[SyntaxKind]] = &[
    &[SyntaxKind::OR_KW, SyntaxKind::XOR_KW],
    &[SyntaxKind::AND_KW],
    &[
        SyntaxKind::EQ,
        SyntaxKind::NOT_EQ,
        SyntaxKind::LT,
        SyntaxKind::GT,
        SyntaxKind::LT_EQ,
        SyntaxKind::GT_EQ,
    ],
    &[SyntaxKind::AMP],
    &[SyntaxKind::PLUS, SyntaxKind::MINUS],
    &[SyntaxKind::STAR, SyntaxKind::SLASH, SyntaxKind::PERCENT],
    &[SyntaxKind::CARET],
];

/// Tokens that close an expression; a missing operand before one is not skipped
const EXPRESSION_CLOSERS: &[SyntaxKind] = &[
    SyntaxKind::NEWLINE,
    SyntaxKind::SEMICOLON,
    SyntaxKind::COMMA,
    SyntaxKind::R_PAREN,
    SyntaxKind::R_BRACKET,
    SyntaxKind::R_BRACE,
    SyntaxKind::THEN_KW,
    SyntaxKind::TO_KW,
    SyntaxKind::BY_KW,
    SyntaxKind::TIMES_KW,
    SyntaxKind::END_KW,
    SyntaxKind::DOT,
];

pub fn parse_expression<P: ClarionParser>(p: &mut P) {
    parse_binary(p, 0);
}

fn parse_binary<P: ClarionParser>(p: &mut P, level: usize) {
    let Some(operators) = BINARY_LEVELS.get(level) else {
        parse_unary(p);
        return;
    };
    let checkpoint = p.checkpoint();
    parse_binary(p, level + 1);
    while p.at_any(operators) {
        p.start_node_at(checkpoint, SyntaxKind::BINARY_EXPR);
        p.bump();
        parse_binary(p, level + 1);
        p.finish_node();
    }
}

fn parse_unary<P: ClarionParser>(p: &mut P) {
    let prefix = p.at_any(&[
        SyntaxKind::MINUS,
        SyntaxKind::PLUS,
        SyntaxKind::NOT_KW,
        SyntaxKind::TILDE,
    ]) || (p.at_soft_kw("NEW") && p.nth(1).is_name());
    if prefix {
        p.start_node(SyntaxKind::UNARY_EXPR);
        p.bump();
        parse_unary(p);
        p.finish_node();
    } else {
        parse_postfix_expression(p);
    }
}

/// Postfix = Factor (Arguments | Property | Index | '.' Name)*
///
/// Also used for assignment targets and call statements.
pub fn parse_postfix_expression<P: ClarionParser>(p: &mut P) {
    let checkpoint = p.checkpoint();
    parse_factor(p);
    loop {
        match p.current_kind() {
            _ if p.at_eof() => break,
            SyntaxKind::L_PAREN => {
                p.start_node_at(checkpoint, SyntaxKind::CALL_EXPR);
                parse_argument_list(p);
                p.finish_node();
            }
            SyntaxKind::L_BRACE => {
                p.start_node_at(checkpoint, SyntaxKind::PROPERTY_EXPR);
                parse_bracketed(p, SyntaxKind::R_BRACE, "property");
                p.finish_node();
            }
            SyntaxKind::L_BRACKET => {
                p.start_node_at(checkpoint, SyntaxKind::INDEX_EXPR);
                parse_bracketed(p, SyntaxKind::R_BRACKET, "index");
                p.finish_node();
            }
            SyntaxKind::DOT if p.at_member_dot() => {
                p.start_node_at(checkpoint, SyntaxKind::NAME_REF);
                p.bump();
                p.bump();
                p.finish_node();
            }
            _ => break,
        }
    }
}

fn parse_factor<P: ClarionParser>(p: &mut P) {
    match p.current_kind() {
        _ if p.at_eof() => missing_operand(p),
        SyntaxKind::IDENT | SyntaxKind::LABEL | SyntaxKind::SELF_KW | SyntaxKind::PARENT_KW => {
            p.start_node(SyntaxKind::NAME_REF);
            p.bump();
            while p.at_member_dot() {
                p.bump();
                p.bump();
            }
            p.finish_node();
        }
        SyntaxKind::FIELD_EQUATE => {
            p.start_node(SyntaxKind::FIELD_EQUATE_REF);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::QUESTION => {
            p.start_node(SyntaxKind::FIELD_EQUATE_REF);
            p.bump();
            if p.at_name() {
                p.bump();
            }
            p.finish_node();
        }
        kind if kind.is_literal() => {
            p.start_node(SyntaxKind::LITERAL);
            p.bump();
            p.finish_node();
        }
        SyntaxKind::L_PAREN => parse_paren(p),
        _ => missing_operand(p),
    }
}

fn missing_operand<P: ClarionParser>(p: &mut P) {
    let message = format!("expected expression, found {}", p.found());
    if p.at_eof() || p.at_any(EXPRESSION_CLOSERS) {
        p.error(message, ErrorCode::E0402);
    } else {
        p.error_recover(
            message,
            ErrorCode::E0402,
            ParseContext::Expression.recovery_tokens(),
        );
    }
}

/// Paren = '(' Expr ')'
fn parse_paren<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::PAREN_EXPR);
    let opened = p.current_range();
    p.bump();
    parse_expression(p);
    if !p.eat(SyntaxKind::R_PAREN) {
        p.push_error(
            format!("unclosed parenthesis: expected ')', found {}", p.found()),
            ErrorCode::E0203,
            Some(RelatedInfo::new("'(' opened here", opened)),
        );
    }
    p.finish_node();
}

/// Arguments = '(' (Arg (',' Arg)*)? ')'
///
/// An argument may be omitted: `Foo(a,,c)`.
fn parse_argument_list<P: ClarionParser>(p: &mut P) {
    p.start_node(SyntaxKind::ARGUMENT_LIST);
    let opened = p.current_range();
    p.bump();
    loop {
        if p.eat(SyntaxKind::R_PAREN) {
            break;
        }
        if p.at_line_end() {
            p.push_error(
                format!("unclosed argument list: expected ')', found {}", p.found()),
                ErrorCode::E0404,
                Some(RelatedInfo::new("'(' opened here", opened)),
            );
            break;
        }
        if p.eat(SyntaxKind::COMMA) {
            continue;
        }
        let start = p.pos();
        parse_expression(p);
        if !p.at_any(&[SyntaxKind::COMMA, SyntaxKind::R_PAREN]) && !p.at_line_end() {
            p.unexpected_in(ParseContext::ArgumentList, ErrorCode::E0401);
        }
        if p.pos() == start && !p.at_line_end() {
            let message = format!("stuck on token: {}", p.found());
            p.error_recover(message, ErrorCode::E0901, ParseContext::ArgumentList.recovery_tokens());
        }
    }
    p.finish_node();
}

/// '{' Expr (',' Expr)* '}' or '[' Expr (',' Expr)* ']'
fn parse_bracketed<P: ClarionParser>(p: &mut P, close: SyntaxKind, what: &str) {
    let opened = p.current_range();
    p.bump();
    loop {
        parse_expression(p);
        if !p.eat(SyntaxKind::COMMA) {
            break;
        }
    }
    if !p.eat(close) {
        p.push_error(
            format!(
                "unclosed {what}: expected {}, found {}",
                super::describe(close),
                p.found()
            ),
            ErrorCode::E0204,
            Some(RelatedInfo::new(format!("{what} opened here"), opened)),
        );
    }
}
