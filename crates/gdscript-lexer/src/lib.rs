//! Tokenizer for GDScript.
//!
//! Unlike a lexer that only needs to feed a parser (where whitespace can be
//! silently skipped), this one must account for every byte of the input
//! (invariant I2 in the round-trip contract), so whitespace, indentation
//! runs, newlines, comments, and line continuations are all real tokens in
//! the output stream rather than being discarded. Bracket depth and
//! indentation *significance* are decided one layer up, by the parser —
//! this lexer only classifies.

pub mod classify;
pub mod cursor;

use cursor::Cursor;
use gdscript_common::token::{keyword_from_str, Token, TokenKind};
use classify::{classify, is_id_continue, CharClass};

/// Produces the full token stream for a GDScript source string.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    at_line_start: bool,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            at_line_start: true,
            done: false,
        }
    }

    /// Tokenize the entire input, ending with a single `Eof` token.
    pub fn tokenize(source: &'src str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    fn start(&self) -> u32 {
        self.cursor.pos()
    }

    fn make(&self, kind: TokenKind, start: u32) -> Token {
        Token::new(kind, start, self.cursor.pos())
    }

    /// Drop any run of bare `\r` code units; they never become a leaf
    /// (the round-trip contract normalizes `\r\n` and lone `\r` to `\n`,
    /// dropping the `\r` silently).
    fn skip_carriage_returns(&mut self) {
        while matches!(self.cursor.peek(), Some('\r')) {
            self.cursor.advance();
        }
    }

    fn next_token(&mut self) -> Option<Token> {
        self.skip_carriage_returns();
        let start = self.start();

        if self.at_line_start {
            self.cursor.eat_while(|c| c == ' ' || c == '\t');
            if self.cursor.pos() != start {
                self.at_line_start = false;
                return Some(self.make(TokenKind::Indent, start));
            }
            self.at_line_start = false;
        }

        let c = match self.cursor.peek() {
            Some(c) => c,
            None => return None,
        };

        match classify(c) {
            CharClass::CarriageReturn => unreachable!("stripped above"),
            CharClass::IdContinue => unreachable!("classify() never yields IdContinue directly"),
            CharClass::Newline => {
                self.cursor.advance();
                self.at_line_start = true;
                Some(self.make(TokenKind::Newline, start))
            }
            CharClass::Space => {
                self.cursor.eat_while(|c| c == ' ' || c == '\t');
                Some(self.make(TokenKind::Whitespace, start))
            }
            CharClass::Hash => {
                self.cursor.eat_while(|c| c != '\n' && c != '\r');
                Some(self.make(TokenKind::Comment, start))
            }
            CharClass::Backslash => Some(self.lex_backslash(start)),
            CharClass::Digit => Some(self.lex_number(start)),
            CharClass::Quote => Some(self.lex_string(start, false)),
            CharClass::IdStart => Some(self.lex_ident_or_raw_string(start)),
            CharClass::OperatorStart => Some(self.lex_operator(start, c)),
            CharClass::Punctuation => {
                self.cursor.advance();
                let kind = match c {
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    '[' => TokenKind::LBracket,
                    ']' => TokenKind::RBracket,
                    '{' => TokenKind::LBrace,
                    '}' => TokenKind::RBrace,
                    ',' => TokenKind::Comma,
                    ';' => TokenKind::Semicolon,
                    '$' => TokenKind::Dollar,
                    '@' => TokenKind::At,
                    _ => unreachable!(),
                };
                Some(self.make(kind, start))
            }
            CharClass::Invalid => {
                self.cursor.advance();
                Some(self.make(TokenKind::Error, start))
            }
        }
    }

    /// A backslash is a line continuation only when, after optional
    /// trailing spaces/tabs, a newline immediately follows. Otherwise it is
    /// a lone invalid character.
    fn lex_backslash(&mut self, start: u32) -> Token {
        let mut probe = 1usize;
        while matches!(self.cursor.peek_at(probe), Some(' ') | Some('\t')) {
            probe += 1;
        }
        match self.cursor.peek_at(probe) {
            Some('\r') | Some('\n') => {
                self.cursor.advance(); // the backslash
                self.cursor.eat_while(|c| c == ' ' || c == '\t');
                self.skip_carriage_returns();
                if matches!(self.cursor.peek(), Some('\n')) {
                    self.cursor.advance();
                }
                self.at_line_start = true;
                self.make(TokenKind::LineContinuation, start)
            }
            _ => {
                self.cursor.advance();
                self.make(TokenKind::Error, start)
            }
        }
    }

    fn lex_ident_or_raw_string(&mut self, start: u32) -> Token {
        // `r`/`R` directly followed by a quote is a raw string prefix, not
        // an identifier — but only when nothing else has been consumed yet.
        if matches!(self.cursor.peek(), Some('r') | Some('R'))
            && matches!(self.cursor.peek_next(), Some('\'') | Some('"'))
        {
            self.cursor.advance();
            return self.lex_string(start, true);
        }
        self.cursor.advance();
        self.cursor.eat_while(is_id_continue);
        let text = self.cursor.slice(start, self.cursor.pos());
        let kind = keyword_from_str(text).unwrap_or(TokenKind::Ident);
        self.make(kind, start)
    }

    /// A string literal, any of the four bounding styles, optional raw
    /// prefix already consumed by the caller. The whole literal (quotes,
    /// escapes, content) is one token; unterminated strings still produce a
    /// single best-effort token rather than throwing (category 1 in the
    /// failure taxonomy).
    fn lex_string(&mut self, start: u32, raw: bool) -> Token {
        let quote = self.cursor.advance().expect("caller verified a quote");
        let triple = self.cursor.peek() == Some(quote) && self.cursor.peek_next() == Some(quote);
        if triple {
            self.cursor.advance();
            self.cursor.advance();
        }
        loop {
            match self.cursor.peek() {
                None => break,
                Some('\\') if !raw => {
                    self.cursor.advance();
                    if self.cursor.peek().is_some() {
                        self.cursor.advance();
                    }
                }
                Some(c) if c == quote => {
                    if !triple {
                        self.cursor.advance();
                        break;
                    }
                    if self.cursor.peek_next() == Some(quote)
                        && self.cursor.peek_at(2) == Some(quote)
                    {
                        self.cursor.advance();
                        self.cursor.advance();
                        self.cursor.advance();
                        break;
                    }
                    self.cursor.advance();
                }
                Some('\n') if !triple => break,
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
        self.make(TokenKind::StringLiteral, start)
    }

    fn lex_number(&mut self, start: u32) -> Token {
        if self.cursor.peek() == Some('0')
            && matches!(self.cursor.peek_next(), Some('x') | Some('X'))
        {
            self.cursor.advance();
            self.cursor.advance();
            self.cursor
                .eat_while(|c| c.is_ascii_hexdigit() || c == '_');
            return self.make(TokenKind::IntNumber, start);
        }
        if self.cursor.peek() == Some('0')
            && matches!(self.cursor.peek_next(), Some('b') | Some('B'))
        {
            self.cursor.advance();
            self.cursor.advance();
            self.cursor.eat_while(|c| c == '0' || c == '1' || c == '_');
            return self.make(TokenKind::IntNumber, start);
        }

        self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
        let mut is_float = false;
        if self.cursor.peek() == Some('.') && matches!(self.cursor.peek_next(), Some(c) if c.is_ascii_digit())
        {
            is_float = true;
            self.cursor.advance();
            self.cursor.eat_while(|c| c.is_ascii_digit() || c == '_');
        }
        if matches!(self.cursor.peek(), Some('e') | Some('E')) {
            let mut probe = 1usize;
            if matches!(self.cursor.peek_at(probe), Some('+') | Some('-')) {
                probe += 1;
            }
            if matches!(self.cursor.peek_at(probe), Some(c) if c.is_ascii_digit()) {
                is_float = true;
                self.cursor.advance();
                if matches!(self.cursor.peek(), Some('+') | Some('-')) {
                    self.cursor.advance();
                }
                self.cursor.eat_while(|c| c.is_ascii_digit());
            }
        }
        self.make(
            if is_float {
                TokenKind::FloatNumber
            } else {
                TokenKind::IntNumber
            },
            start,
        )
    }

    fn lex_operator(&mut self, start: u32, c: char) -> Token {
        self.cursor.advance();
        use TokenKind::*;
        let kind = match c {
            '+' => {
                if self.eat('=') {
                    PlusEq
                } else {
                    Plus
                }
            }
            '-' => {
                if self.eat('=') {
                    MinusEq
                } else if self.eat('>') {
                    Arrow
                } else {
                    Minus
                }
            }
            '*' => {
                if self.eat('*') {
                    if self.eat('=') {
                        StarStarEq
                    } else {
                        StarStar
                    }
                } else if self.eat('=') {
                    StarEq
                } else {
                    Star
                }
            }
            '/' => {
                if self.eat('=') {
                    SlashEq
                } else {
                    Slash
                }
            }
            '%' => {
                if self.eat('=') {
                    PercentEq
                } else {
                    Percent
                }
            }
            '&' => {
                if self.eat('&') {
                    AmpAmp
                } else if self.eat('=') {
                    AmpEq
                } else {
                    Amp
                }
            }
            '|' => {
                if self.eat('|') {
                    PipePipe
                } else if self.eat('=') {
                    PipeEq
                } else {
                    Pipe
                }
            }
            '^' => {
                if self.eat('=') {
                    CaretEq
                } else {
                    Caret
                }
            }
            '~' => Tilde,
            '!' => {
                if self.eat('=') {
                    BangEq
                } else {
                    Bang
                }
            }
            '<' => {
                if self.eat('<') {
                    if self.eat('=') {
                        LtLtEq
                    } else {
                        LtLt
                    }
                } else if self.eat('=') {
                    LtEq
                } else {
                    Lt
                }
            }
            '>' => {
                if self.eat('>') {
                    if self.eat('=') {
                        GtGtEq
                    } else {
                        GtGt
                    }
                } else if self.eat('=') {
                    GtEq
                } else {
                    Gt
                }
            }
            '=' => {
                if self.eat('=') {
                    EqEq
                } else {
                    Eq
                }
            }
            ':' => {
                if self.eat('=') {
                    ColonEq
                } else {
                    Colon
                }
            }
            '.' => {
                if self.eat('.') {
                    DotDot
                } else {
                    Dot
                }
            }
            _ => unreachable!("classify() guarantees operator_start set"),
        };
        self.make(kind, start)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.cursor.peek() == Some(c) {
            self.cursor.advance();
            true
        } else {
            false
        }
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        match self.next_token() {
            Some(t) => Some(t),
            None => {
                self.done = true;
                let pos = self.cursor.pos();
                Some(Token::new(TokenKind::Eof, pos, pos))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::tokenize(src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lex_simple_assignment() {
        assert_eq!(
            kinds("var x = 1\n"),
            vec![
                TokenKind::VarKw,
                TokenKind::Whitespace,
                TokenKind::Ident,
                TokenKind::Whitespace,
                TokenKind::Eq,
                TokenKind::Whitespace,
                TokenKind::IntNumber,
                TokenKind::Newline,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lex_indent_token_emitted_at_line_start() {
        let toks = Lexer::tokenize("if true:\n\tpass\n");
        assert!(toks.iter().any(|t| t.kind == TokenKind::Indent));
    }

    #[test]
    fn lex_string_triple_quoted() {
        let toks = Lexer::tokenize("\"\"\"a\nb\"\"\"");
        assert_eq!(toks[0].kind, TokenKind::StringLiteral);
        assert_eq!(toks[0].span.len(), 9);
    }

    #[test]
    fn lex_raw_string_prefix() {
        let toks = Lexer::tokenize(r#"r"a\b""#);
        assert_eq!(toks[0].kind, TokenKind::StringLiteral);
        assert_eq!(toks[0].span.len(), 6);
    }

    #[test]
    fn lex_r_without_quote_is_identifier() {
        assert_eq!(kinds("result"), vec![TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn lex_not_in_is_two_keyword_tokens() {
        assert_eq!(
            kinds("not in"),
            vec![TokenKind::NotKw, TokenKind::Whitespace, TokenKind::InKw, TokenKind::Eof]
        );
    }

    #[test]
    fn lex_line_continuation_token() {
        let toks = Lexer::tokenize("a = 1 + \\\n    2\n");
        assert!(toks.iter().any(|t| t.kind == TokenKind::LineContinuation));
    }

    #[test]
    fn lex_crlf_drops_carriage_return() {
        let toks = Lexer::tokenize("var x\r\n");
        assert!(toks.iter().all(|t| t.kind != TokenKind::Error));
        assert!(toks.iter().any(|t| t.kind == TokenKind::Newline));
    }

    #[test]
    fn lex_nbsp_is_error_token() {
        let toks = Lexer::tokenize("\u{00A0}");
        assert_eq!(toks[0].kind, TokenKind::Error);
    }

    #[test]
    fn lex_hex_and_binary_numbers() {
        assert_eq!(kinds("0x1F"), vec![TokenKind::IntNumber, TokenKind::Eof]);
        assert_eq!(kinds("0b101"), vec![TokenKind::IntNumber, TokenKind::Eof]);
    }

    #[test]
    fn lex_float_with_exponent() {
        assert_eq!(kinds("1.5e-10"), vec![TokenKind::FloatNumber, TokenKind::Eof]);
    }

    #[test]
    fn lex_covers_every_byte() {
        let src = "var d = {\"a\"=1, \"b\":2}  # comment\n";
        let toks = Lexer::tokenize(src);
        let total: u32 = toks.iter().map(|t| t.span.len()).sum();
        // total omits dropped \r (none here), so it must equal source length.
        assert_eq!(total as usize, src.len());
    }
}
