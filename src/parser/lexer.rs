//! Logos-based lexer for Clarion
//!
//! Fast tokenization using the logos crate. Keywords are case-insensitive.
//! The wrapper tracks line/column positions and reclassifies any name that
//! starts in column 0 as a [`SyntaxKind::LABEL`], since only labels may
//! occupy the first column.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
    /// 1-based line of the token start
    pub line: u32,
    /// 0-based byte column of the token start
    pub column: u32,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
    line: u32,
    line_start: u32,
    at_line_start: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
            line: 1,
            line_start: 0,
            at_line_start: true,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        let line = self.line;
        let column = self.offset - self.line_start;

        let mut kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };
        if self.at_line_start && column == 0 && (kind == SyntaxKind::IDENT || kind.is_keyword()) {
            kind = SyntaxKind::LABEL;
        }

        self.offset += text.len() as u32;
        if let Some(last_newline) = text.rfind('\n') {
            self.line += text.matches('\n').count() as u32;
            self.line_start = offset.into();
            self.line_start += last_newline as u32 + 1;
        }
        self.at_line_start = kind == SyntaxKind::NEWLINE;

        Some(Token {
            kind,
            text,
            offset,
            line,
            column,
        })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\f\r]+")]
    Whitespace,

    #[regex(r"![^\r\n]*")]
    Comment,

    #[regex(r"\|[ \t]*(![^\n]*)?\r?\n")]
    LineContinuation,

    #[regex(r"\r?\n")]
    Newline,

    // =========================================================================
    // LITERALS AND NAMES
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_:]*")]
    Ident,

    #[regex(r"\?[a-zA-Z_][a-zA-Z0-9_:]*")]
    FieldEquate,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[0-9][0-9a-fA-F]*[hH]")]
    HexInteger,

    #[regex(r"[01]+[bB]")]
    BinaryInteger,

    #[regex(r"[0-7]+[oO]")]
    OctalInteger,

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?")]
    Decimal,

    #[regex(r"'([^'\r\n]|'')*'")]
    String,

    #[regex(r"'([^'\r\n]|'')*")]
    UnterminatedString,

    #[regex(r"@[a-zA-Z][^ \t\r\n,()']*")]
    Picture,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token(":=:")]
    DeepAssign,
    #[token("<>")]
    #[token("~=")]
    NotEq,
    #[token("<=")]
    #[token("=<")]
    LtEq,
    #[token(">=")]
    #[token("=>")]
    GtEq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("*=")]
    StarEq,
    #[token("/=")]
    SlashEq,
    #[token("&=")]
    AmpEq,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    #[token("&")]
    Amp,
    #[token("~")]
    Tilde,
    #[token("?")]
    Question,
    #[token("|")]
    Pipe,

    // =========================================================================
    // KEYWORDS (alphabetical, case-insensitive)
    // =========================================================================
    #[token("and", ignore(ascii_case))]
    AndKw,
    #[token("application", ignore(ascii_case))]
    ApplicationKw,
    #[token("break", ignore(ascii_case))]
    BreakKw,
    #[token("by", ignore(ascii_case))]
    ByKw,
    #[token("case", ignore(ascii_case))]
    CaseKw,
    #[token("class", ignore(ascii_case))]
    ClassKw,
    #[token("code", ignore(ascii_case))]
    CodeKw,
    #[token("cycle", ignore(ascii_case))]
    CycleKw,
    #[token("data", ignore(ascii_case))]
    DataKw,
    #[token("do", ignore(ascii_case))]
    DoKw,
    #[token("else", ignore(ascii_case))]
    ElseKw,
    #[token("elsif", ignore(ascii_case))]
    ElsifKw,
    #[token("end", ignore(ascii_case))]
    EndKw,
    #[token("execute", ignore(ascii_case))]
    ExecuteKw,
    #[token("exit", ignore(ascii_case))]
    ExitKw,
    #[token("file", ignore(ascii_case))]
    FileKw,
    #[token("function", ignore(ascii_case))]
    FunctionKw,
    #[token("group", ignore(ascii_case))]
    GroupKw,
    #[token("if", ignore(ascii_case))]
    IfKw,
    #[token("include", ignore(ascii_case))]
    IncludeKw,
    #[token("join", ignore(ascii_case))]
    JoinKw,
    #[token("loop", ignore(ascii_case))]
    LoopKw,
    #[token("map", ignore(ascii_case))]
    MapKw,
    #[token("member", ignore(ascii_case))]
    MemberKw,
    #[token("menu", ignore(ascii_case))]
    MenuKw,
    #[token("menubar", ignore(ascii_case))]
    MenubarKw,
    #[token("module", ignore(ascii_case))]
    ModuleKw,
    #[token("not", ignore(ascii_case))]
    NotKw,
    #[token("of", ignore(ascii_case))]
    OfKw,
    #[token("option", ignore(ascii_case))]
    OptionKw,
    #[token("or", ignore(ascii_case))]
    OrKw,
    #[token("orof", ignore(ascii_case))]
    OrofKw,
    #[token("parent", ignore(ascii_case))]
    ParentKw,
    #[token("procedure", ignore(ascii_case))]
    ProcedureKw,
    #[token("program", ignore(ascii_case))]
    ProgramKw,
    #[token("queue", ignore(ascii_case))]
    QueueKw,
    #[token("record", ignore(ascii_case))]
    RecordKw,
    #[token("return", ignore(ascii_case))]
    ReturnKw,
    #[token("routine", ignore(ascii_case))]
    RoutineKw,
    #[token("self", ignore(ascii_case))]
    SelfKw,
    #[token("sheet", ignore(ascii_case))]
    SheetKw,
    #[token("tab", ignore(ascii_case))]
    TabKw,
    #[token("then", ignore(ascii_case))]
    ThenKw,
    #[token("times", ignore(ascii_case))]
    TimesKw,
    #[token("to", ignore(ascii_case))]
    ToKw,
    #[token("toolbar", ignore(ascii_case))]
    ToolbarKw,
    #[token("until", ignore(ascii_case))]
    UntilKw,
    #[token("view", ignore(ascii_case))]
    ViewKw,
    #[token("while", ignore(ascii_case))]
    WhileKw,
    #[token("window", ignore(ascii_case))]
    WindowKw,
    #[token("xor", ignore(ascii_case))]
    XorKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia
            Whitespace => SyntaxKind::WHITESPACE,
            Comment => SyntaxKind::COMMENT,
            LineContinuation => SyntaxKind::LINE_CONTINUATION,
            Newline => SyntaxKind::NEWLINE,

            // Literals and names
            Ident => SyntaxKind::IDENT,
            FieldEquate => SyntaxKind::FIELD_EQUATE,
            Integer | HexInteger | BinaryInteger | OctalInteger => SyntaxKind::INTEGER,
            Decimal => SyntaxKind::DECIMAL,
            String => SyntaxKind::STRING,
            UnterminatedString => SyntaxKind::ERROR,
            Picture => SyntaxKind::PICTURE,

            // Multi-char punctuation
            DeepAssign => SyntaxKind::DEEP_ASSIGN,
            NotEq => SyntaxKind::NOT_EQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            PlusEq => SyntaxKind::PLUS_EQ,
            MinusEq => SyntaxKind::MINUS_EQ,
            StarEq => SyntaxKind::STAR_EQ,
            SlashEq => SyntaxKind::SLASH_EQ,
            AmpEq => SyntaxKind::AMP_EQ,

            // Single-char punctuation
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            LBrace => SyntaxKind::L_BRACE,
            RBrace => SyntaxKind::R_BRACE,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            Colon => SyntaxKind::COLON,
            Semicolon => SyntaxKind::SEMICOLON,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Caret => SyntaxKind::CARET,
            Amp => SyntaxKind::AMP,
            Tilde => SyntaxKind::TILDE,
            Question => SyntaxKind::QUESTION,
            Pipe => SyntaxKind::ERROR,

            // Keywords
            AndKw => SyntaxKind::AND_KW,
            ApplicationKw => SyntaxKind::APPLICATION_KW,
            BreakKw => SyntaxKind::BREAK_KW,
            ByKw => SyntaxKind::BY_KW,
            CaseKw => SyntaxKind::CASE_KW,
            ClassKw => SyntaxKind::CLASS_KW,
            CodeKw => SyntaxKind::CODE_KW,
            CycleKw => SyntaxKind::CYCLE_KW,
            DataKw => SyntaxKind::DATA_KW,
            DoKw => SyntaxKind::DO_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            ElsifKw => SyntaxKind::ELSIF_KW,
            EndKw => SyntaxKind::END_KW,
            ExecuteKw => SyntaxKind::EXECUTE_KW,
            ExitKw => SyntaxKind::EXIT_KW,
            FileKw => SyntaxKind::FILE_KW,
            FunctionKw => SyntaxKind::FUNCTION_KW,
            GroupKw => SyntaxKind::GROUP_KW,
            IfKw => SyntaxKind::IF_KW,
            IncludeKw => SyntaxKind::INCLUDE_KW,
            JoinKw => SyntaxKind::JOIN_KW,
            LoopKw => SyntaxKind::LOOP_KW,
            MapKw => SyntaxKind::MAP_KW,
            MemberKw => SyntaxKind::MEMBER_KW,
            MenuKw => SyntaxKind::MENU_KW,
            MenubarKw => SyntaxKind::MENUBAR_KW,
            ModuleKw => SyntaxKind::MODULE_KW,
            NotKw => SyntaxKind::NOT_KW,
            OfKw => SyntaxKind::OF_KW,
            OptionKw => SyntaxKind::OPTION_KW,
            OrKw => SyntaxKind::OR_KW,
            OrofKw => SyntaxKind::OROF_KW,
            ParentKw => SyntaxKind::PARENT_KW,
            ProcedureKw => SyntaxKind::PROCEDURE_KW,
            ProgramKw => SyntaxKind::PROGRAM_KW,
            QueueKw => SyntaxKind::QUEUE_KW,
            RecordKw => SyntaxKind::RECORD_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            RoutineKw => SyntaxKind::ROUTINE_KW,
            SelfKw => SyntaxKind::SELF_KW,
            SheetKw => SyntaxKind::SHEET_KW,
            TabKw => SyntaxKind::TAB_KW,
            ThenKw => SyntaxKind::THEN_KW,
            TimesKw => SyntaxKind::TIMES_KW,
            ToKw => SyntaxKind::TO_KW,
            ToolbarKw => SyntaxKind::TOOLBAR_KW,
            UntilKw => SyntaxKind::UNTIL_KW,
            ViewKw => SyntaxKind::VIEW_KW,
            WhileKw => SyntaxKind::WHILE_KW,
            WindowKw => SyntaxKind::WINDOW_KW,
            XorKw => SyntaxKind::XOR_KW,
        }
    }
}
