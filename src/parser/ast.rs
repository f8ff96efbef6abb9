//! Typed AST wrappers over the untyped rowan CST.
//!
//! Each struct wraps a SyntaxNode and provides methods to access children.
//! The wrappers never fail on malformed trees; missing parts are `None`.

use super::syntax_kind::SyntaxKind;
use super::{SyntaxNode, SyntaxToken};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

fn tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens().filter_map(|e| e.into_token())
}

fn first_token_of(node: &SyntaxNode, kinds: &[SyntaxKind]) -> Option<SyntaxToken> {
    tokens(node).find(|t| kinds.contains(&t.kind()))
}

fn label(node: &SyntaxNode) -> Option<String> {
    first_token_of(node, &[SyntaxKind::LABEL]).map(|t| t.text().to_string())
}

// ============================================================================
// Root
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    /// `PROGRAM` or `MEMBER` header, when present
    pub fn header(&self) -> Option<ProgramHeader> {
        self.0.children().find_map(ProgramHeader::cast)
    }

    pub fn maps(&self) -> impl Iterator<Item = MapBlock> + '_ {
        self.0.children().filter_map(MapBlock::cast)
    }

    pub fn procedures(&self) -> impl Iterator<Item = Procedure> + '_ {
        self.0.children().filter_map(Procedure::cast)
    }

    /// Routines that follow the program's own `CODE` section
    pub fn routines(&self) -> impl Iterator<Item = Routine> + '_ {
        self.0.children().filter_map(Routine::cast)
    }
}

ast_node!(ProgramHeader, PROGRAM_HEADER);

impl ProgramHeader {
    pub fn is_member(&self) -> bool {
        tokens(&self.0).any(|t| t.kind() == SyntaxKind::MEMBER_KW)
    }
}

// ============================================================================
// MAP
// ============================================================================

ast_node!(MapBlock, MAP_BLOCK);

impl MapBlock {
    pub fn modules(&self) -> impl Iterator<Item = ModuleBlock> + '_ {
        self.0.children().filter_map(ModuleBlock::cast)
    }

    /// Prototypes declared directly in the MAP, outside any MODULE
    pub fn prototypes(&self) -> impl Iterator<Item = Prototype> + '_ {
        self.0.children().filter_map(Prototype::cast)
    }
}

ast_node!(ModuleBlock, MODULE_BLOCK);

impl ModuleBlock {
    /// The quoted file name from `MODULE('file')`, without quotes
    pub fn file_name(&self) -> Option<String> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::ATTRIBUTE_ARGS)
            .and_then(|args| first_token_of(&args, &[SyntaxKind::STRING]))
            .map(|t| unquote(t.text()))
    }

    pub fn prototypes(&self) -> impl Iterator<Item = Prototype> + '_ {
        self.0.children().filter_map(Prototype::cast)
    }
}

ast_node!(Prototype, PROTOTYPE);

impl Prototype {
    pub fn name(&self) -> Option<String> {
        first_token_of(&self.0, &[SyntaxKind::IDENT, SyntaxKind::LABEL])
            .map(|t| t.text().to_string())
    }

    pub fn parameters(&self) -> Option<ParameterList> {
        self.0.children().find_map(ParameterList::cast)
    }
}

// ============================================================================
// Procedures and routines
// ============================================================================

ast_node!(Procedure, PROCEDURE);

impl Procedure {
    pub fn header(&self) -> Option<ProcedureHeader> {
        self.0.children().find_map(ProcedureHeader::cast)
    }

    /// Full name as written, e.g. `MyClass.Init`
    pub fn name(&self) -> Option<String> {
        self.header().and_then(|h| h.name())
    }

    pub fn data(&self) -> Option<DataSection> {
        self.0.children().find_map(DataSection::cast)
    }

    pub fn code(&self) -> Option<CodeSection> {
        self.0.children().find_map(CodeSection::cast)
    }

    pub fn routines(&self) -> impl Iterator<Item = Routine> + '_ {
        self.0.children().filter_map(Routine::cast)
    }
}

ast_node!(ProcedureHeader, PROCEDURE_HEADER);

impl ProcedureHeader {
    pub fn name(&self) -> Option<String> {
        let qualified = self
            .0
            .children()
            .find(|n| n.kind() == SyntaxKind::QUALIFIED_NAME)?;
        let text: String = tokens(&qualified)
            .filter(|t| !t.kind().is_trivia())
            .map(|t| t.text().to_string())
            .collect();
        Some(text)
    }

    pub fn is_method(&self) -> bool {
        self.name().is_some_and(|name| name.contains('.'))
    }

    pub fn parameters(&self) -> Option<ParameterList> {
        self.0.children().find_map(ParameterList::cast)
    }
}

ast_node!(ParameterList, PARAMETER_LIST);

impl ParameterList {
    /// Source text of each parameter, trimmed
    pub fn parameters(&self) -> Vec<String> {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::PARAMETER)
            .map(|n| n.text().to_string().trim().to_string())
            .collect()
    }
}

ast_node!(Routine, ROUTINE);

impl Routine {
    pub fn name(&self) -> Option<String> {
        label(&self.0)
    }

    pub fn data(&self) -> Option<DataSection> {
        self.0.children().find_map(DataSection::cast)
    }
}

ast_node!(DataSection, DATA_SECTION);

impl DataSection {
    pub fn classes(&self) -> impl Iterator<Item = ClassDecl> + '_ {
        self.0.children().filter_map(ClassDecl::cast)
    }

    pub fn files(&self) -> impl Iterator<Item = FileDecl> + '_ {
        self.0.children().filter_map(FileDecl::cast)
    }

    pub fn windows(&self) -> impl Iterator<Item = WindowDef> + '_ {
        self.0.children().filter_map(WindowDef::cast)
    }
}

ast_node!(CodeSection, CODE_SECTION);

impl CodeSection {
    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() != SyntaxKind::ERROR)
    }
}

// ============================================================================
// Declarations
// ============================================================================

ast_node!(ClassDecl, CLASS_DECL);

impl ClassDecl {
    pub fn name(&self) -> Option<String> {
        label(&self.0)
    }

    pub fn attributes(&self) -> Option<AttributeList> {
        self.0.children().find_map(AttributeList::cast)
    }
}

ast_node!(FileDecl, FILE_DECL);

impl FileDecl {
    pub fn name(&self) -> Option<String> {
        label(&self.0)
    }

    pub fn keys(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::KEY_DEF)
    }

    pub fn record(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::RECORD_BLOCK)
    }
}

ast_node!(WindowDef, WINDOW_DEF);

impl WindowDef {
    pub fn name(&self) -> Option<String> {
        label(&self.0)
    }

    pub fn is_application(&self) -> bool {
        tokens(&self.0).any(|t| t.kind() == SyntaxKind::APPLICATION_KW)
    }
}

ast_node!(AttributeList, ATTRIBUTE_LIST);

impl AttributeList {
    /// Attribute names, upper-cased
    pub fn names(&self) -> Vec<String> {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::ATTRIBUTE)
            .filter_map(|n| tokens(&n).find(|t| t.kind().is_name()))
            .map(|t| t.text().to_ascii_uppercase())
            .collect()
    }

    pub fn has(&self, name: &str) -> bool {
        self.names().iter().any(|n| n.eq_ignore_ascii_case(name))
    }
}

// ============================================================================
// Statements
// ============================================================================

ast_node!(IfStmt, IF_STMT);

impl IfStmt {
    pub fn elsif_clauses(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::ELSIF_CLAUSE)
    }

    pub fn else_clause(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::ELSE_CLAUSE)
    }

    /// Whether the statement is closed by `END` or `.`
    pub fn is_terminated(&self) -> bool {
        tokens(&self.0).any(|t| matches!(t.kind(), SyntaxKind::END_KW | SyntaxKind::DOT))
    }
}

ast_node!(CaseStmt, CASE_STMT);

impl CaseStmt {
    pub fn of_clauses(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::OF_CLAUSE)
    }
}

ast_node!(DoStmt, DO_STMT);

impl DoStmt {
    /// The routine being called
    pub fn target(&self) -> Option<String> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::NAME_REF)
            .map(|n| n.text().to_string())
    }
}

fn unquote(text: &str) -> String {
    let inner = text
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(text);
    inner.replace("''", "'")
}
