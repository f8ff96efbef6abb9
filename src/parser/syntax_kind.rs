//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.
//! It follows the structure of Clarion programs: program/member headers,
//! data sections, MAP blocks, procedures, routines and statements.

/// All syntax kinds (tokens and nodes) in Clarion source
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (procedures, structures, statements).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,           // ! to end of line
    LINE_CONTINUATION, // | at end of line, including the newline

    // Newlines separate statements, so they are significant tokens
    NEWLINE,

    // =========================================================================
    // LITERALS AND NAMES
    // =========================================================================
    IDENT,         // identifier, may contain ':' (Pre:Field)
    LABEL,         // identifier in column 0
    FIELD_EQUATE,  // ?Name
    INTEGER,       // 42, 0FFh, 101b
    DECIMAL,       // 3.14
    STRING,        // 'text' with '' escapes
    PICTURE,       // @n10.2

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,     // (
    R_PAREN,     // )
    L_BRACKET,   // [
    R_BRACKET,   // ]
    L_BRACE,     // {
    R_BRACE,     // }
    COMMA,       // ,
    DOT,         // .
    COLON,       // :
    SEMICOLON,   // ;
    EQ,          // =
    NOT_EQ,      // <> or ~=
    LT,          // <
    GT,          // >
    LT_EQ,       // <= or =<
    GT_EQ,       // >= or =>
    PLUS,        // +
    MINUS,       // -
    STAR,        // *
    SLASH,       // /
    PERCENT,     // %
    CARET,       // ^
    AMP,         // &
    TILDE,       // ~
    QUESTION,    // ?
    PLUS_EQ,     // +=
    MINUS_EQ,    // -=
    STAR_EQ,     // *=
    SLASH_EQ,    // /=
    AMP_EQ,      // &=
    DEEP_ASSIGN, // :=:

    // =========================================================================
    // KEYWORDS (reserved words; case-insensitive)
    // =========================================================================
    PROGRAM_KW,
    MEMBER_KW,
    MAP_KW,
    MODULE_KW,
    END_KW,
    CODE_KW,
    DATA_KW,
    PROCEDURE_KW,
    FUNCTION_KW,
    ROUTINE_KW,
    IF_KW,
    THEN_KW,
    ELSIF_KW,
    ELSE_KW,
    LOOP_KW,
    TO_KW,
    BY_KW,
    TIMES_KW,
    UNTIL_KW,
    WHILE_KW,
    CASE_KW,
    OF_KW,
    OROF_KW,
    EXECUTE_KW,
    DO_KW,
    RETURN_KW,
    EXIT_KW,
    BREAK_KW,
    CYCLE_KW,
    GROUP_KW,
    QUEUE_KW,
    CLASS_KW,
    FILE_KW,
    RECORD_KW,
    VIEW_KW,
    JOIN_KW,
    WINDOW_KW,
    APPLICATION_KW,
    MENUBAR_KW,
    MENU_KW,
    TOOLBAR_KW,
    SHEET_KW,
    TAB_KW,
    OPTION_KW,
    INCLUDE_KW,
    SELF_KW,
    PARENT_KW,
    AND_KW,
    OR_KW,
    XOR_KW,
    NOT_KW,

    // =========================================================================
    // NODES - program structure
    // =========================================================================
    SOURCE_FILE,
    PROGRAM_HEADER,
    DATA_SECTION,
    MAP_BLOCK,
    MODULE_BLOCK,
    PROTOTYPE,
    PROCEDURE,
    PROCEDURE_HEADER,
    ROUTINE,
    CODE_SECTION,
    PARAMETER_LIST,
    PARAMETER,
    ATTRIBUTE_LIST,
    ATTRIBUTE,
    ATTRIBUTE_ARGS,
    QUALIFIED_NAME,

    // =========================================================================
    // NODES - data declarations
    // =========================================================================
    INCLUDE_DIRECTIVE,
    EQUATE_DEF,
    VARIABLE_DECL,
    TYPE_REF,
    GROUP_BLOCK,
    QUEUE_BLOCK,
    ITEMIZE_BLOCK,
    CLASS_DECL,
    CLASS_BODY,
    FILE_DECL,
    KEY_DEF,
    KEY_FIELD,
    RECORD_BLOCK,
    VIEW_DECL,
    VIEW_BODY,

    // =========================================================================
    // NODES - windows and controls
    // =========================================================================
    WINDOW_DEF,
    MENUBAR_BLOCK,
    MENU_BLOCK,
    TOOLBAR_BLOCK,
    SHEET_BLOCK,
    TAB_BLOCK,
    GROUP_CONTROL,
    OPTION_BLOCK,
    CONTROL,

    // =========================================================================
    // NODES - statements
    // =========================================================================
    IF_STMT,
    ELSIF_CLAUSE,
    ELSE_CLAUSE,
    LOOP_STMT,
    CASE_STMT,
    OF_CLAUSE,
    EXECUTE_STMT,
    DO_STMT,
    RETURN_STMT,
    EXIT_STMT,
    BREAK_STMT,
    CYCLE_STMT,
    ASSIGNMENT_STMT,
    CALL_STMT,

    // =========================================================================
    // NODES - expressions
    // =========================================================================
    BINARY_EXPR,
    UNARY_EXPR,
    PAREN_EXPR,
    CALL_EXPR,
    NAME_REF,
    PROPERTY_EXPR,
    INDEX_EXPR,
    FIELD_EQUATE_REF,
    LITERAL,
    ARGUMENT_LIST,

    // Special
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::COMMENT | Self::LINE_CONTINUATION
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::PROGRAM_KW as u16) && (self as u16) <= (Self::NOT_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::DEEP_ASSIGN as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER | Self::DECIMAL | Self::STRING | Self::PICTURE
        )
    }

    /// Check if this token can name something (identifier, label or keyword used as a name)
    pub fn is_name(self) -> bool {
        matches!(self, Self::IDENT | Self::LABEL) || self.is_keyword()
    }

    /// Check if this is an assignment operator
    pub fn is_assign_op(self) -> bool {
        matches!(
            self,
            Self::EQ
                | Self::PLUS_EQ
                | Self::MINUS_EQ
                | Self::STAR_EQ
                | Self::SLASH_EQ
                | Self::AMP_EQ
                | Self::DEEP_ASSIGN
        )
    }

    /// Check if this token carries line information for start/stop purposes
    pub fn is_significant(self) -> bool {
        !self.is_trivia() && self != Self::NEWLINE
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ClarionLanguage {}

impl rowan::Language for ClarionLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<ClarionLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<ClarionLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<ClarionLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<ClarionLanguage>;
