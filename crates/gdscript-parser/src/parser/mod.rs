//! The parsing engine: the primitive operations (`open`/`close`/`advance`)
//! that every reader — whether a plain recursive function or a heap-resident
//! [`reader::Reader`] — uses to talk to the tree being built.
//!
//! Events are recorded as a flat list and replayed into a
//! `rowan::GreenNodeBuilder` at the end, including the forward-parent
//! ("open before") trick for retroactively wrapping an already-closed node
//! as the child of a node opened later — needed for left-recursive
//! constructs like postfix call/index/member chains.

pub mod block;
pub mod expressions;
pub mod items;
pub mod patterns;
pub mod reader;
pub mod statements;

use gdscript_common::token::{Token, TokenKind};
use gdscript_lexer::Lexer;
use rowan::GreenNodeBuilder;

use crate::cst::GdscriptLanguage;
use crate::error::ParseFailure;
use crate::settings::{CancelSignal, ParseSettings};
use crate::syntax_kind::SyntaxKind;

#[derive(Debug)]
enum Event {
    Open {
        kind: SyntaxKind,
        forward_parent: Option<usize>,
    },
    Close,
    Advance,
}

/// An opened-but-not-yet-closed node in the event stream.
#[derive(Debug, Clone, Copy)]
pub struct MarkOpened {
    index: usize,
}

/// A closed node; can still be retroactively wrapped via [`Parser::open_before`].
#[derive(Debug, Clone, Copy)]
pub struct MarkClosed {
    index: usize,
}

pub struct Parser {
    tokens: Vec<Token>,
    text: Vec<String>,
    pos: usize,
    events: Vec<Event>,

    paren_depth: u32,

    depth: u32,
    max_depth: Option<u32>,
    fatal: Option<ParseFailure>,

    cancel: Box<dyn CancelSignal>,
    chars_since_cancel_check: u32,
    cancellation_check_interval: u32,

    stall_counter: u32,
    infinite_loop_guard: bool,
}

const INFINITE_LOOP_BOUND: u32 = 10_000;

impl Parser {
    pub fn new(source: &str, settings: ParseSettings) -> Self {
        Self::new_with_cancel(source, settings, ())
    }

    /// Like [`Parser::new`], but wired to a cancellation signal polled by
    /// [`Parser::check_cancellation`] every `cancellation_check_interval`
    /// characters.
    pub fn new_with_cancel(
        source: &str,
        settings: ParseSettings,
        cancel: impl CancelSignal + 'static,
    ) -> Self {
        let tokens: Vec<Token> = Lexer::tokenize(source);
        let text = tokens
            .iter()
            .map(|t| source[t.span.start as usize..t.span.end as usize].to_string())
            .collect();
        Self {
            tokens,
            text,
            pos: 0,
            events: Vec::new(),
            paren_depth: 0,
            depth: 0,
            max_depth: settings.max_reading_stack,
            fatal: None,
            cancel: Box::new(cancel),
            chars_since_cancel_check: 0,
            cancellation_check_interval: settings.cancellation_check_interval,
            stall_counter: 0,
            infinite_loop_guard: settings.infinite_loop_guard,
        }
    }

    // ── lookahead ────────────────────────────────────────────────────

    fn should_skip(&self, kind: TokenKind) -> bool {
        match kind {
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::LineContinuation => true,
            TokenKind::Newline | TokenKind::Indent => self.paren_depth > 0,
            _ => false,
        }
    }

    fn raw_kind(&self, idx: usize) -> TokenKind {
        self.tokens
            .get(idx)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    /// The next significant token kind, skipping insignificant trivia.
    pub fn current(&self) -> TokenKind {
        self.nth(0)
    }

    pub fn nth(&self, n: usize) -> TokenKind {
        let mut i = self.pos;
        let mut seen = 0usize;
        loop {
            if i >= self.tokens.len() {
                return TokenKind::Eof;
            }
            let k = self.raw_kind(i);
            if self.should_skip(k) {
                i += 1;
                continue;
            }
            if seen == n {
                return k;
            }
            seen += 1;
            i += 1;
        }
    }

    pub fn current_text(&self) -> &str {
        let mut i = self.pos;
        loop {
            let k = self.raw_kind(i);
            if self.should_skip(k) {
                i += 1;
                continue;
            }
            return self.text.get(i).map(|s| s.as_str()).unwrap_or("");
        }
    }

    pub fn at(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    pub fn at_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.current())
    }

    pub fn at_eof(&self) -> bool {
        self.current() == TokenKind::Eof
    }

    /// Raw token cursor position, for readers driving their own
    /// no-progress detection (the infinite-loop guard).
    pub fn pos(&self) -> usize {
        self.pos
    }

    // ── tree building ────────────────────────────────────────────────

    pub fn open(&mut self) -> Result<MarkOpened, ParseFailure> {
        self.depth += 1;
        if let Some(max) = self.max_depth {
            if self.depth > max {
                let f = ParseFailure::ReadingStackOverflow {
                    max_depth: max,
                    current_depth: self.depth,
                };
                self.fatal = Some(f.clone());
                return Err(f);
            }
        }
        let mark = MarkOpened {
            index: self.events.len(),
        };
        self.events.push(Event::Open {
            kind: SyntaxKind::TOMBSTONE,
            forward_parent: None,
        });
        Ok(mark)
    }

    /// Retroactively make `closed` the first child of a new node that
    /// starts where `closed` started. Used for postfix wrapping: parse the
    /// left-hand side first, then decide it is actually the head of a
    /// larger construct (`a(b)`, `a[b]`, `a.b`).
    ///
    /// Appends a new `Open` event at the end of the list (cheap) instead of
    /// shifting everything after `closed` (which `Vec::insert` would cost
    /// for every postfix wrap in a long chain like `a(b)(c)(d)`), and links
    /// `closed`'s own event forward to it; `build_tree` follows that link
    /// and opens the chain outermost-first.
    pub fn open_before(&mut self, closed: MarkClosed) -> MarkOpened {
        let mark = MarkOpened {
            index: self.events.len(),
        };
        self.events.push(Event::Open {
            kind: SyntaxKind::TOMBSTONE,
            forward_parent: None,
        });
        if let Event::Open { forward_parent, .. } = &mut self.events[closed.index] {
            *forward_parent = Some(mark.index);
        }
        mark
    }

    pub fn close(&mut self, mark: MarkOpened, kind: SyntaxKind) -> MarkClosed {
        self.depth = self.depth.saturating_sub(1);
        if let Event::Open { kind: k, .. } = &mut self.events[mark.index] {
            *k = kind;
        }
        self.events.push(Event::Close);
        MarkClosed { index: mark.index }
    }

    /// Consume the current significant token, after flushing any skipped
    /// trivia ahead of it into the tree as ordinary children — every
    /// byte ends up attached to whatever node is open right now.
    pub fn advance(&mut self) {
        self.guard_progress();
        loop {
            if self.pos >= self.tokens.len() {
                return;
            }
            let k = self.raw_kind(self.pos);
            if self.should_skip(k) {
                self.bump_raw();
                continue;
            }
            self.bump_raw();
            return;
        }
    }

    /// Advance exactly one raw token (trivia or not) without skip logic.
    /// Used by readers (the block resolver) that must consume a `NEWLINE`
    /// or `INDENT` token themselves.
    pub fn bump_raw(&mut self) {
        if self.pos >= self.tokens.len() {
            return;
        }
        let kind = self.raw_kind(self.pos);
        self.update_delimiter_depth(kind);
        self.pos += 1;
        self.events.push(Event::Advance);
        self.poll_cancellation();
    }

    fn update_delimiter_depth(&mut self, kind: TokenKind) {
        match kind {
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                self.paren_depth += 1;
            }
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                self.paren_depth = self.paren_depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> bool {
        self.eat(kind)
    }

    /// Consume one raw token (whatever it is) and wrap it as an `INVALID`
    /// leaf — the category-1 fallback when nothing can make sense of it.
    pub fn advance_as_invalid(&mut self) {
        if self.pos >= self.tokens.len() {
            return;
        }
        let m = self.open();
        self.bump_raw();
        if let Ok(m) = m {
            self.close(m, SyntaxKind::INVALID);
        }
    }

    pub fn is_paren_context(&self) -> bool {
        self.paren_depth > 0
    }

    // ── guards ───────────────────────────────────────────────────────

    fn poll_cancellation(&mut self) {
        if self.cancellation_check_interval == 0 {
            return;
        }
        self.chars_since_cancel_check += 1;
    }

    /// The §5 cooperative suspension point: called from the driving loops
    /// in `block.rs`/`items.rs`/`statements.rs`/`lib.rs` once per iteration.
    /// Only actually polls the signal every `cancellation_check_interval`
    /// characters read, per [`ParseSettings::cancellation_check_interval`].
    pub fn check_cancellation(&mut self) -> Result<(), ParseFailure> {
        if self.cancellation_check_interval == 0 {
            return Ok(());
        }
        if self.chars_since_cancel_check >= self.cancellation_check_interval {
            self.chars_since_cancel_check = 0;
            if self.cancel.is_cancelled() {
                self.fatal = Some(ParseFailure::Cancelled);
                return Err(ParseFailure::Cancelled);
            }
        }
        Ok(())
    }

    /// Called once per outer dispatch-loop iteration (block/statement
    /// level) to detect a reader that fails to consume anything.
    fn guard_progress(&mut self) {
        // reset happens in `note_progress`; nothing to do on entry.
        let _ = self;
    }

    pub fn note_loop_iteration(&mut self, pos_before: usize) -> Result<(), ParseFailure> {
        if !self.infinite_loop_guard {
            return Ok(());
        }
        if self.pos == pos_before {
            self.stall_counter += 1;
            if self.stall_counter > INFINITE_LOOP_BOUND {
                let span = self
                    .tokens
                    .get(self.pos)
                    .map(|t| t.span)
                    .unwrap_or(gdscript_common::span::Span::at(0));
                let f = ParseFailure::InfiniteLoopGuardTripped { span };
                self.fatal = Some(f.clone());
                return Err(f);
            }
        } else {
            self.stall_counter = 0;
        }
        Ok(())
    }

    pub fn fatal(&self) -> Option<ParseFailure> {
        self.fatal.clone()
    }

    // ── finish ───────────────────────────────────────────────────────

    /// Replay the recorded events into a rowan tree. A single left-to-right
    /// pass; `Open` events that carry a `forward_parent` are resolved by
    /// following the chain and opening outermost-first, so `open_before`
    /// wrapping is transparent here.
    pub fn build_tree(mut self) -> rowan::GreenNode {
        const TOMBSTONE: Event = Event::Open {
            kind: SyntaxKind::TOMBSTONE,
            forward_parent: None,
        };

        let mut builder = GreenNodeBuilder::new();
        let mut events = std::mem::take(&mut self.events);
        let mut pos = 0usize;

        for i in 0..events.len() {
            let taken = std::mem::replace(&mut events[i], TOMBSTONE);
            match taken {
                Event::Open {
                    kind: SyntaxKind::TOMBSTONE,
                    forward_parent: None,
                } => {
                    // Either a genuine tombstone, or an entry already
                    // consumed as a link in an earlier chain.
                }
                Event::Open {
                    kind,
                    forward_parent,
                } => {
                    let mut kinds = vec![kind];
                    let mut fp = forward_parent;
                    while let Some(target) = fp {
                        let linked = std::mem::replace(&mut events[target], TOMBSTONE);
                        match linked {
                            Event::Open {
                                kind: k,
                                forward_parent: next,
                            } => {
                                kinds.push(k);
                                fp = next;
                            }
                            _ => break,
                        }
                    }
                    for kind in kinds.into_iter().rev() {
                        builder.start_node(GdscriptLanguage::kind_to_raw_public(kind));
                    }
                }
                Event::Close => builder.finish_node(),
                Event::Advance => {
                    let token = &self.tokens[pos];
                    let text = &self.text[pos];
                    builder.token(
                        GdscriptLanguage::kind_to_raw_public(SyntaxKind::from(token.kind)),
                        text,
                    );
                    pos += 1;
                }
            }
        }

        builder.finish()
    }
}

// `rowan::Language::kind_to_raw` is an associated function, not a method on
// a value, so expose it under a short alias for `build_tree` to call.
trait KindToRawPublic {
    fn kind_to_raw_public(kind: SyntaxKind) -> rowan::SyntaxKind;
}

impl KindToRawPublic for GdscriptLanguage {
    fn kind_to_raw_public(kind: SyntaxKind) -> rowan::SyntaxKind {
        <GdscriptLanguage as rowan::Language>::kind_to_raw(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::SyntaxNode;

    fn parse_source_file(p: &mut Parser) {
        let m = p.open().unwrap();
        while !p.at_eof() {
            p.advance();
        }
        p.close(m, SyntaxKind::SOURCE_FILE);
    }

    #[test]
    fn smoke_builds_a_tree_covering_every_byte() {
        let src = "var x = 1\n";
        let mut p = Parser::new(src, ParseSettings::default());
        parse_source_file(&mut p);
        let green = p.build_tree();
        let node = SyntaxNode::new_root(green);
        assert_eq!(node.text().to_string(), src);
    }

    #[test]
    fn paren_depth_suppresses_newline_significance() {
        let mut p = Parser::new("(\n)", ParseSettings::default());
        assert_eq!(p.current(), TokenKind::LParen);
        p.advance();
        assert!(p.is_paren_context());
        // inside the paren, a NEWLINE is insignificant trivia so `current`
        // should already see the closing paren.
        assert_eq!(p.current(), TokenKind::RParen);
    }

    #[test]
    fn newline_significant_outside_parens() {
        let mut p = Parser::new("a\nb", ParseSettings::default());
        assert_eq!(p.current(), TokenKind::Ident);
        p.advance();
        assert_eq!(p.current(), TokenKind::Newline);
    }

    #[test]
    fn open_before_wraps_as_first_child() {
        let src = "f(1)";
        let mut p = Parser::new(src, ParseSettings::default());
        let root = p.open().unwrap();
        let name = p.open().unwrap();
        p.advance(); // `f`
        let name = p.close(name, SyntaxKind::NAME_REF);
        let call = p.open_before(name);
        p.advance(); // `(`
        p.advance(); // `1`
        p.advance(); // `)`
        p.close(call, SyntaxKind::CALL_EXPR);
        p.close(root, SyntaxKind::SOURCE_FILE);
        let green = p.build_tree();
        let node = SyntaxNode::new_root(green);
        assert_eq!(node.text().to_string(), src);
        let call_node = node
            .descendants()
            .find(|n| n.kind() == SyntaxKind::CALL_EXPR)
            .unwrap();
        assert!(call_node
            .children()
            .any(|c| c.kind() == SyntaxKind::NAME_REF));
    }

    #[test]
    fn reading_stack_overflow_is_typed() {
        let mut p = Parser::new("((((()))))", ParseSettings {
            max_reading_stack: Some(2),
            ..ParseSettings::default()
        });
        let r1 = p.open();
        assert!(r1.is_ok());
        let r2 = p.open();
        assert!(r2.is_ok());
        let r3 = p.open();
        assert!(matches!(
            r3,
            Err(ParseFailure::ReadingStackOverflow { max_depth: 2, .. })
        ));
    }
}
