//! Parse contexts for context-aware error messages
//!
//! Grammar functions name the structure they are in when reporting an
//! unexpected token, which picks both the message and the tokens at which
//! panic-mode recovery stops.

use crate::parser::SyntaxKind;

/// The structure being parsed when an error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseContext {
    /// Outside any procedure
    #[default]
    SourceFile,
    /// Global or local data declarations
    DataSection,
    /// Inside a `MAP` block
    MapBlock,
    /// Inside a `MODULE` block of a `MAP`
    ModuleBlock,
    /// Executable statements
    CodeSection,
    /// Field list of a `GROUP`, `QUEUE` or `RECORD`
    FieldList,
    /// Body of a `FILE` declaration
    FileBody,
    /// Body of a `WINDOW` or `APPLICATION` or one of its nested blocks
    WindowBody,
    /// Parsing an expression
    Expression,
    /// Parsing a call argument list
    ArgumentList,
    /// Parsing a procedure parameter list
    ParameterList,
    /// Parsing a comma-separated attribute list
    AttributeList,
}

/// Tokens every context stops at: the end of the logical line and end markers
const LINE_END: &[SyntaxKind] = &[
    SyntaxKind::NEWLINE,
    SyntaxKind::SEMICOLON,
    SyntaxKind::END_KW,
    SyntaxKind::DOT,
];

const SECTION: &[SyntaxKind] = &[
    SyntaxKind::NEWLINE,
    SyntaxKind::END_KW,
    SyntaxKind::DOT,
    SyntaxKind::CODE_KW,
    SyntaxKind::DATA_KW,
    SyntaxKind::MAP_KW,
    SyntaxKind::PROCEDURE_KW,
    SyntaxKind::FUNCTION_KW,
    SyntaxKind::ROUTINE_KW,
];

const STATEMENT: &[SyntaxKind] = &[
    SyntaxKind::NEWLINE,
    SyntaxKind::SEMICOLON,
    SyntaxKind::END_KW,
    SyntaxKind::DOT,
    SyntaxKind::ELSIF_KW,
    SyntaxKind::ELSE_KW,
    SyntaxKind::OF_KW,
    SyntaxKind::OROF_KW,
];

const CLOSERS: &[SyntaxKind] = &[
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
];

const LIST: &[SyntaxKind] = &[SyntaxKind::NEWLINE, SyntaxKind::COMMA, SyntaxKind::R_PAREN];

impl ParseContext {
    /// Description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::SourceFile => "at top level",
            Self::DataSection => "in data section",
            Self::MapBlock => "in MAP block",
            Self::ModuleBlock => "in MODULE block",
            Self::CodeSection => "in code section",
            Self::FieldList => "in field list",
            Self::FileBody => "in FILE declaration",
            Self::WindowBody => "in window definition",
            Self::Expression => "in expression",
            Self::ArgumentList => "in argument list",
            Self::ParameterList => "in parameter list",
            Self::AttributeList => "in attribute list",
        }
    }

    /// Description of what this context accepts
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::SourceFile => "PROGRAM, MEMBER, MAP, CODE or a procedure",
            Self::DataSection => "a labelled declaration",
            Self::MapBlock => "a prototype, MODULE or INCLUDE",
            Self::ModuleBlock => "a prototype",
            Self::CodeSection => "a statement",
            Self::FieldList => "a field declaration or END",
            Self::FileBody => "KEY, INDEX, RECORD or END",
            Self::WindowBody => "a control or END",
            Self::Expression => "an operand",
            Self::ArgumentList => "an argument or ')'",
            Self::ParameterList => "a parameter or ')'",
            Self::AttributeList => "an attribute name",
        }
    }

    /// Tokens at which panic-mode recovery stops in this context
    pub fn recovery_tokens(&self) -> &'static [SyntaxKind] {
        match self {
            Self::SourceFile | Self::DataSection | Self::MapBlock | Self::ModuleBlock => SECTION,
            Self::CodeSection => STATEMENT,
            Self::FieldList | Self::FileBody | Self::WindowBody => LINE_END,
            Self::Expression => CLOSERS,
            Self::ArgumentList | Self::ParameterList | Self::AttributeList => LIST,
        }
    }
}
