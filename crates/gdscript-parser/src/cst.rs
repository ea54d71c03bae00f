//! Rowan-based concrete syntax tree types for GDScript.

use crate::syntax_kind::SyntaxKind;

/// Marker type connecting [`SyntaxKind`] to rowan's generic tree machinery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GdscriptLanguage {}

impl rowan::Language for GdscriptLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        // Safety: SyntaxKind is #[repr(u16)] and every value rowan hands
        // back here was produced by `kind_to_raw` below, so it is always
        // one of our own valid discriminants.
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

pub type SyntaxNode = rowan::SyntaxNode<GdscriptLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<GdscriptLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<GdscriptLanguage>;
