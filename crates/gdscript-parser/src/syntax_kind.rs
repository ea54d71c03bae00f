//! The CST alphabet: every [`TokenKind`] widened with the composite node
//! kinds the tree needs, plus the two bookkeeping sentinels rowan requires.

use gdscript_common::token::TokenKind;

#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SyntaxKind {
    /// Placeholder used only while building the tree (forward-parent
    /// bookkeeping in `build_tree`); never present in a finished tree.
    TOMBSTONE = 0,

    // ── Mirrors of TokenKind ─────────────────────────────────────────
    VAR_KW,
    CONST_KW,
    FUNC_KW,
    CLASS_KW,
    CLASS_NAME_KW,
    EXTENDS_KW,
    TOOL_KW,
    STATIC_KW,
    SIGNAL_KW,
    ENUM_KW,
    IF_KW,
    ELIF_KW,
    ELSE_KW,
    FOR_KW,
    IN_KW,
    WHILE_KW,
    MATCH_KW,
    WHEN_KW,
    RETURN_KW,
    PASS_KW,
    BREAK_KW,
    CONTINUE_KW,
    BREAKPOINT_KW,
    AND_KW,
    OR_KW,
    NOT_KW,
    IS_KW,
    AS_KW,
    AWAIT_KW,
    YIELD_KW,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,
    SELF_KW,
    SUPER_KW,
    GET_KW,
    SET_KW,
    ONREADY_KW,
    ABSTRACT_KW,
    REMOTE_KW,
    MASTER_KW,
    PUPPET_KW,
    REMOTE_SYNC_KW,
    MASTER_SYNC_KW,
    PUPPET_SYNC_KW,

    PLUS,
    MINUS,
    STAR,
    STAR_STAR,
    SLASH,
    PERCENT,
    AMP,
    AMP_AMP,
    PIPE,
    PIPE_PIPE,
    CARET,
    TILDE,
    BANG,
    LT_LT,
    GT_GT,
    EQ_EQ,
    BANG_EQ,
    LT,
    LT_EQ,
    GT,
    GT_EQ,
    EQ,
    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    STAR_STAR_EQ,
    SLASH_EQ,
    PERCENT_EQ,
    AMP_EQ,
    PIPE_EQ,
    CARET_EQ,
    LT_LT_EQ,
    GT_GT_EQ,
    COLON_EQ,
    ARROW,
    DOT,
    DOT_DOT,

    L_PAREN,
    R_PAREN,
    L_BRACKET,
    R_BRACKET,
    L_BRACE,
    R_BRACE,
    COMMA,
    COLON,
    SEMICOLON,
    DOLLAR,
    AT,

    INT_NUMBER,
    FLOAT_NUMBER,
    STRING_LITERAL,
    IDENT,

    WHITESPACE,
    INDENT,
    NEWLINE,
    COMMENT,
    LINE_CONTINUATION,

    EOF,
    /// A leaf wrapping one or more characters that no reader could
    /// incorporate into a valid token — the invalid-token surface.
    INVALID,

    // ── Composite node kinds ─────────────────────────────────────────
    SOURCE_FILE,
    ATTRIBUTE,
    ATTRIBUTE_ARG_LIST,
    CLASS_NAME_DECL,
    EXTENDS_DECL,
    CLASS_BODY,
    INNER_CLASS_DEF,

    VAR_DECL,
    CONST_DECL,
    SIGNAL_DECL,
    ENUM_DECL,
    ENUM_VARIANT,
    PROPERTY_BODY,
    GETTER,
    SETTER,

    FUNC_DEF,
    PARAM_LIST,
    PARAM,
    TYPE_ANNOTATION,
    TYPE_REF,
    TYPE_GENERIC,
    RETURN_TYPE,

    BLOCK,
    IF_STMT,
    ELIF_CLAUSE,
    ELSE_CLAUSE,
    WHILE_STMT,
    FOR_STMT,
    MATCH_STMT,
    MATCH_ARM,
    MATCH_GUARD,
    PATTERN_WILDCARD,
    PATTERN_BINDING,
    PATTERN_ARRAY,
    PATTERN_DICT,
    PATTERN_DICT_ENTRY,
    PATTERN_REST,
    PATTERN_LITERAL,
    PATTERN_EXPR,
    PATTERN_OR,
    RETURN_STMT,
    PASS_STMT,
    BREAK_STMT,
    CONTINUE_STMT,
    BREAKPOINT_STMT,
    EXPR_STMT,
    ASSIGN_STMT,

    LITERAL_EXPR,
    NAME_REF,
    BINARY_EXPR,
    UNARY_EXPR,
    TERNARY_EXPR,
    CALL_EXPR,
    INDEX_EXPR,
    FIELD_EXPR,
    ARG_LIST,
    NAMED_ARG,
    ARRAY_EXPR,
    DICT_EXPR,
    DICT_ENTRY,
    GROUPED_EXPR,
    LAMBDA_EXPR,
    STRING_NAME_EXPR,
    NODE_PATH_EXPR,
    GET_NODE_EXPR,
    UNIQUE_NODE_EXPR,
    AWAIT_EXPR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::WHITESPACE
                | SyntaxKind::INDENT
                | SyntaxKind::NEWLINE
                | SyntaxKind::COMMENT
                | SyntaxKind::LINE_CONTINUATION
        )
    }
}

impl From<TokenKind> for SyntaxKind {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::VarKw => SyntaxKind::VAR_KW,
            TokenKind::ConstKw => SyntaxKind::CONST_KW,
            TokenKind::FuncKw => SyntaxKind::FUNC_KW,
            TokenKind::ClassKw => SyntaxKind::CLASS_KW,
            TokenKind::ClassNameKw => SyntaxKind::CLASS_NAME_KW,
            TokenKind::ExtendsKw => SyntaxKind::EXTENDS_KW,
            TokenKind::ToolKw => SyntaxKind::TOOL_KW,
            TokenKind::StaticKw => SyntaxKind::STATIC_KW,
            TokenKind::SignalKw => SyntaxKind::SIGNAL_KW,
            TokenKind::EnumKw => SyntaxKind::ENUM_KW,
            TokenKind::IfKw => SyntaxKind::IF_KW,
            TokenKind::ElifKw => SyntaxKind::ELIF_KW,
            TokenKind::ElseKw => SyntaxKind::ELSE_KW,
            TokenKind::ForKw => SyntaxKind::FOR_KW,
            TokenKind::InKw => SyntaxKind::IN_KW,
            TokenKind::WhileKw => SyntaxKind::WHILE_KW,
            TokenKind::MatchKw => SyntaxKind::MATCH_KW,
            TokenKind::WhenKw => SyntaxKind::WHEN_KW,
            TokenKind::ReturnKw => SyntaxKind::RETURN_KW,
            TokenKind::PassKw => SyntaxKind::PASS_KW,
            TokenKind::BreakKw => SyntaxKind::BREAK_KW,
            TokenKind::ContinueKw => SyntaxKind::CONTINUE_KW,
            TokenKind::BreakpointKw => SyntaxKind::BREAKPOINT_KW,
            TokenKind::AndKw => SyntaxKind::AND_KW,
            TokenKind::OrKw => SyntaxKind::OR_KW,
            TokenKind::NotKw => SyntaxKind::NOT_KW,
            TokenKind::IsKw => SyntaxKind::IS_KW,
            TokenKind::AsKw => SyntaxKind::AS_KW,
            TokenKind::AwaitKw => SyntaxKind::AWAIT_KW,
            TokenKind::YieldKw => SyntaxKind::YIELD_KW,
            TokenKind::TrueKw => SyntaxKind::TRUE_KW,
            TokenKind::FalseKw => SyntaxKind::FALSE_KW,
            TokenKind::NullKw => SyntaxKind::NULL_KW,
            TokenKind::SelfKw => SyntaxKind::SELF_KW,
            TokenKind::SuperKw => SyntaxKind::SUPER_KW,
            TokenKind::GetKw => SyntaxKind::GET_KW,
            TokenKind::SetKw => SyntaxKind::SET_KW,
            TokenKind::OnreadyKw => SyntaxKind::ONREADY_KW,
            TokenKind::AbstractKw => SyntaxKind::ABSTRACT_KW,
            TokenKind::RemoteKw => SyntaxKind::REMOTE_KW,
            TokenKind::MasterKw => SyntaxKind::MASTER_KW,
            TokenKind::PuppetKw => SyntaxKind::PUPPET_KW,
            TokenKind::RemoteSyncKw => SyntaxKind::REMOTE_SYNC_KW,
            TokenKind::MasterSyncKw => SyntaxKind::MASTER_SYNC_KW,
            TokenKind::PuppetSyncKw => SyntaxKind::PUPPET_SYNC_KW,

            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Minus => SyntaxKind::MINUS,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::StarStar => SyntaxKind::STAR_STAR,
            TokenKind::Slash => SyntaxKind::SLASH,
            TokenKind::Percent => SyntaxKind::PERCENT,
            TokenKind::Amp => SyntaxKind::AMP,
            TokenKind::AmpAmp => SyntaxKind::AMP_AMP,
            TokenKind::Pipe => SyntaxKind::PIPE,
            TokenKind::PipePipe => SyntaxKind::PIPE_PIPE,
            TokenKind::Caret => SyntaxKind::CARET,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::Bang => SyntaxKind::BANG,
            TokenKind::LtLt => SyntaxKind::LT_LT,
            TokenKind::GtGt => SyntaxKind::GT_GT,
            TokenKind::EqEq => SyntaxKind::EQ_EQ,
            TokenKind::BangEq => SyntaxKind::BANG_EQ,
            TokenKind::Lt => SyntaxKind::LT,
            TokenKind::LtEq => SyntaxKind::LT_EQ,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::GtEq => SyntaxKind::GT_EQ,
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::PlusEq => SyntaxKind::PLUS_EQ,
            TokenKind::MinusEq => SyntaxKind::MINUS_EQ,
            TokenKind::StarEq => SyntaxKind::STAR_EQ,
            TokenKind::StarStarEq => SyntaxKind::STAR_STAR_EQ,
            TokenKind::SlashEq => SyntaxKind::SLASH_EQ,
            TokenKind::PercentEq => SyntaxKind::PERCENT_EQ,
            TokenKind::AmpEq => SyntaxKind::AMP_EQ,
            TokenKind::PipeEq => SyntaxKind::PIPE_EQ,
            TokenKind::CaretEq => SyntaxKind::CARET_EQ,
            TokenKind::LtLtEq => SyntaxKind::LT_LT_EQ,
            TokenKind::GtGtEq => SyntaxKind::GT_GT_EQ,
            TokenKind::ColonEq => SyntaxKind::COLON_EQ,
            TokenKind::Arrow => SyntaxKind::ARROW,
            TokenKind::Dot => SyntaxKind::DOT,
            TokenKind::DotDot => SyntaxKind::DOT_DOT,

            TokenKind::LParen => SyntaxKind::L_PAREN,
            TokenKind::RParen => SyntaxKind::R_PAREN,
            TokenKind::LBracket => SyntaxKind::L_BRACKET,
            TokenKind::RBracket => SyntaxKind::R_BRACKET,
            TokenKind::LBrace => SyntaxKind::L_BRACE,
            TokenKind::RBrace => SyntaxKind::R_BRACE,
            TokenKind::Comma => SyntaxKind::COMMA,
            TokenKind::Colon => SyntaxKind::COLON,
            TokenKind::Semicolon => SyntaxKind::SEMICOLON,
            TokenKind::Dollar => SyntaxKind::DOLLAR,
            TokenKind::At => SyntaxKind::AT,

            TokenKind::IntNumber => SyntaxKind::INT_NUMBER,
            TokenKind::FloatNumber => SyntaxKind::FLOAT_NUMBER,
            TokenKind::StringLiteral => SyntaxKind::STRING_LITERAL,
            TokenKind::Ident => SyntaxKind::IDENT,

            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Indent => SyntaxKind::INDENT,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Comment => SyntaxKind::COMMENT,
            TokenKind::LineContinuation => SyntaxKind::LINE_CONTINUATION,

            TokenKind::Eof => SyntaxKind::EOF,
            TokenKind::Error => SyntaxKind::INVALID,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tombstone_is_zero() {
        assert_eq!(SyntaxKind::TOMBSTONE as u16, 0);
    }

    #[test]
    fn token_kind_conversion_round_trips_a_sample() {
        assert_eq!(SyntaxKind::from(TokenKind::VarKw), SyntaxKind::VAR_KW);
        assert_eq!(SyntaxKind::from(TokenKind::Error), SyntaxKind::INVALID);
        assert_eq!(SyntaxKind::from(TokenKind::Newline), SyntaxKind::NEWLINE);
    }

    #[test]
    fn trivia_kinds_self_report() {
        assert!(SyntaxKind::NEWLINE.is_trivia());
        assert!(SyntaxKind::INDENT.is_trivia());
        assert!(!SyntaxKind::IDENT.is_trivia());
        assert!(!SyntaxKind::BLOCK.is_trivia());
    }
}
