use serde::Serialize;

use crate::span::Span;

/// A single terminal token: a classification plus the span it occupies.
///
/// Every byte of the input ends up inside exactly one `Token` (trivia tokens
/// included) — there is no whitespace-skipping lexer mode here, unlike a
/// lexer for a language where formatting doesn't need to round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, start: u32, end: u32) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }
}

/// The complete terminal alphabet of GDScript, lexical level.
///
/// Organized the way `snow-common::token::TokenKind` is: keywords, then
/// operators, then delimiters/punctuation, then literals, then trivia
/// (which that enum declares but never produces — here every variant in the
/// trivia section is emitted, since round-trip requires it), then the two
/// special markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    // ── Keywords ─────────────────────────────────────────────────────
    VarKw,
    ConstKw,
    FuncKw,
    ClassKw,
    ClassNameKw,
    ExtendsKw,
    ToolKw,
    StaticKw,
    SignalKw,
    EnumKw,
    IfKw,
    ElifKw,
    ElseKw,
    ForKw,
    InKw,
    WhileKw,
    MatchKw,
    WhenKw,
    ReturnKw,
    PassKw,
    BreakKw,
    ContinueKw,
    BreakpointKw,
    AndKw,
    OrKw,
    NotKw,
    IsKw,
    AsKw,
    AwaitKw,
    YieldKw,
    TrueKw,
    FalseKw,
    NullKw,
    SelfKw,
    SuperKw,
    GetKw,
    SetKw,
    OnreadyKw,
    AbstractKw,
    // legacy RPC-mode keywords; superseded by the `@rpc(...)` attribute but
    // still accepted wherever a method modifier appears.
    RemoteKw,
    MasterKw,
    PuppetKw,
    RemoteSyncKw,
    MasterSyncKw,
    PuppetSyncKw,

    // ── Operators ────────────────────────────────────────────────────
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    Amp,
    AmpAmp,
    Pipe,
    PipePipe,
    Caret,
    Tilde,
    Bang,
    LtLt,
    GtGt,
    EqEq,
    BangEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    StarStarEq,
    SlashEq,
    PercentEq,
    AmpEq,
    PipeEq,
    CaretEq,
    LtLtEq,
    GtGtEq,
    ColonEq,
    Arrow,
    Dot,
    DotDot,

    // ── Delimiters & punctuation ─────────────────────────────────────
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Semicolon,
    Dollar,
    At,

    // ── Literals ─────────────────────────────────────────────────────
    IntNumber,
    FloatNumber,
    /// A whole string literal, quotes and escapes included verbatim;
    /// unterminated strings are still a single token (flagged by the
    /// parser as an invalid leaf, never split apart by the lexer).
    StringLiteral,
    Ident,

    // ── Trivia (all emitted) ─────────────────────────────────────────
    Whitespace,
    Indent,
    Newline,
    Comment,
    LineContinuation,

    // ── Special ──────────────────────────────────────────────────────
    Eof,
    /// A code point no reader could classify (e.g. U+00A0 NBSP).
    Error,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace
                | TokenKind::Indent
                | TokenKind::Newline
                | TokenKind::Comment
                | TokenKind::LineContinuation
        )
    }
}

/// Look up a keyword by its exact text. Returns `None` for ordinary
/// identifiers, including every underscore-prefixed name — underscore
/// identifiers get no special treatment at the lexical level.
pub fn keyword_from_str(s: &str) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match s {
        "var" => VarKw,
        "const" => ConstKw,
        "func" => FuncKw,
        "class" => ClassKw,
        "class_name" => ClassNameKw,
        "extends" => ExtendsKw,
        "tool" => ToolKw,
        "static" => StaticKw,
        "signal" => SignalKw,
        "enum" => EnumKw,
        "if" => IfKw,
        "elif" => ElifKw,
        "else" => ElseKw,
        "for" => ForKw,
        "in" => InKw,
        "while" => WhileKw,
        "match" => MatchKw,
        "when" => WhenKw,
        "return" => ReturnKw,
        "pass" => PassKw,
        "break" => BreakKw,
        "continue" => ContinueKw,
        "breakpoint" => BreakpointKw,
        "and" => AndKw,
        "or" => OrKw,
        "not" => NotKw,
        "is" => IsKw,
        "as" => AsKw,
        "await" => AwaitKw,
        "yield" => YieldKw,
        "true" => TrueKw,
        "false" => FalseKw,
        "null" => NullKw,
        "self" => SelfKw,
        "super" => SuperKw,
        "get" => GetKw,
        "set" => SetKw,
        "onready" => OnreadyKw,
        "abstract" => AbstractKw,
        "remote" => RemoteKw,
        "master" => MasterKw,
        "puppet" => PuppetKw,
        "remotesync" => RemoteSyncKw,
        "mastersync" => MasterSyncKw,
        "puppetsync" => PuppetSyncKw,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_hits_and_misses() {
        assert_eq!(keyword_from_str("var"), Some(TokenKind::VarKw));
        assert_eq!(keyword_from_str("class_name"), Some(TokenKind::ClassNameKw));
        assert_eq!(keyword_from_str("_private"), None);
        assert_eq!(keyword_from_str("variance"), None);
    }

    #[test]
    fn trivia_classification() {
        assert!(TokenKind::Newline.is_trivia());
        assert!(TokenKind::Comment.is_trivia());
        assert!(!TokenKind::Ident.is_trivia());
    }
}
