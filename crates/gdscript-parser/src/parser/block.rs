//! The block/indentation resolver (the off-side rule).
//!
//! A [`BlockReader`] holds the indentation threshold of the *enclosing*
//! construct and, once it has seen its first statement, its own intrinsic
//! indentation. On every line start it measures the new line's indentation
//! width and decides whether to read another statement at this level, or
//! to complete and hand control back to whatever opened it — mirroring the
//! real reader-stack vocabulary (`feed` / `Action`) even though, for this
//! reader, "consume" means "read one more statement" rather than "consume
//! one character": the grain a reader operates at is whatever unit it
//! actually governs.

use gdscript_common::token::TokenKind;

use super::reader::{Action, Reader};
use super::statements;
use super::Parser;
use crate::syntax_kind::SyntaxKind;

pub struct BlockReader {
    threshold: u32,
    intrinsic: Option<u32>,
    tab_width: u32,
}

impl BlockReader {
    pub fn new(threshold: u32, tab_width: u32) -> Self {
        Self {
            threshold,
            intrinsic: None,
            tab_width,
        }
    }

    /// Width of the indentation run currently at the front of the stream,
    /// using the configured tab visual width. Zero if the line has no
    /// leading whitespace at all.
    fn line_indent_width(&self, p: &Parser) -> u32 {
        if p.current() != TokenKind::Indent {
            return 0;
        }
        p.current_text()
            .chars()
            .map(|c| if c == '\t' { self.tab_width } else { 1 })
            .sum()
    }

    /// A line is blank or comment-only when, after its indentation, the
    /// only thing before the terminating newline (or end of input) is
    /// nothing or a single comment. Such lines never affect the threshold
    /// decision; their trivia simply stays inside this block, per the
    /// block-consistency invariant.
    fn at_blank_or_comment_line(&self, p: &Parser) -> bool {
        let first = if p.current() == TokenKind::Indent {
            p.nth(1)
        } else {
            p.nth(0)
        };
        matches!(first, TokenKind::Newline | TokenKind::Eof)
            || (first == TokenKind::Comment
                && matches!(
                    if p.current() == TokenKind::Indent {
                        p.nth(2)
                    } else {
                        p.nth(1)
                    },
                    TokenKind::Newline | TokenKind::Eof
                ))
    }

    fn consume_blank_and_comment_lines(&self, p: &mut Parser) {
        while !p.at_eof() && self.at_blank_or_comment_line(p) {
            if p.current() == TokenKind::Indent {
                p.advance();
            }
            if p.current() == TokenKind::Comment {
                p.advance();
            }
            if p.current() == TokenKind::Newline {
                p.advance();
            } else {
                break;
            }
        }
    }
}

impl Reader for BlockReader {
    fn feed(&mut self, p: &mut Parser) -> Action {
        self.consume_blank_and_comment_lines(p);
        if p.at_eof() {
            return Action::Complete;
        }
        let w = self.line_indent_width(p);
        match self.intrinsic {
            None => {
                if w > self.threshold {
                    self.intrinsic = Some(w);
                    Action::Consume
                } else {
                    Action::Complete
                }
            }
            Some(iw) => {
                if w >= iw {
                    // Over-indentation beyond the block's own level is
                    // tolerated; the statement reader absorbs the extra
                    // indent token as leading trivia.
                    Action::Consume
                } else {
                    Action::Complete
                }
            }
        }
    }

    fn force_complete(&mut self, _p: &mut Parser) {}
}

/// Parse the body introduced by a header-line `:`: either a same-line list
/// of `;`-separated statements, or a newline followed by an indented
/// block. Both paths are wrapped in the same `BLOCK` node kind.
pub fn parse_colon_body(p: &mut Parser, threshold: u32, tab_width: u32) -> Result<(), crate::error::ParseFailure> {
    let m = p.open()?;
    if p.current() == TokenKind::Newline {
        p.advance();
        let mut reader = BlockReader::new(threshold, tab_width);
        loop {
            p.check_cancellation()?;
            let pos_before = p.pos();
            match reader.feed(p) {
                Action::Consume => {
                    if p.current() == TokenKind::Indent {
                        p.advance();
                    }
                    statements::parse_stmt(p)?;
                }
                Action::Complete => break,
                Action::Reject => break,
            }
            p.note_loop_iteration(pos_before)?;
            if p.fatal().is_some() {
                break;
            }
        }
    } else {
        // inline body: one or more `;`-separated statements on this line.
        // `parse_stmt` only swallows a trailing `NEWLINE` when it sees one,
        // so it works unmodified for a same-line statement followed by `;`.
        loop {
            statements::parse_stmt(p)?;
            if p.eat(TokenKind::Semicolon) {
                if p.current() == TokenKind::Newline || p.at_eof() {
                    break;
                }
                continue;
            }
            break;
        }
        if p.current() == TokenKind::Newline {
            p.advance();
        }
    }
    p.close(m, SyntaxKind::BLOCK);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::SyntaxNode;
    use crate::settings::ParseSettings;

    fn block_text(src: &str) -> String {
        let mut p = Parser::new(src, ParseSettings::default());
        let root = p.open().unwrap();
        p.advance(); // `:`
        parse_colon_body(&mut p, 0, 4).unwrap();
        p.close(root, SyntaxKind::SOURCE_FILE);
        SyntaxNode::new_root(p.build_tree()).text().to_string()
    }

    #[test]
    fn inline_body_round_trips() {
        let src = ": pass\n";
        assert_eq!(block_text(src), src);
    }

    #[test]
    fn multiline_body_round_trips_with_comment() {
        let src = ":\n\tvar x = 1\n# zero-indent comment\n\tvar y = 2\n";
        assert_eq!(block_text(src), src);
    }
}
