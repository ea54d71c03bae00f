//! Shared types for the GDScript reader: byte-offset spans, the line index,
//! and the terminal token alphabet.

pub mod span;
pub mod token;

pub use span::{LineIndex, Span};
pub use token::TokenKind;
