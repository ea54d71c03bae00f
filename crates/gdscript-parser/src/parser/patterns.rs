//! `match` patterns: wildcards, bindings, literals, and the structural
//! array/dict forms with rest (`..`).

use gdscript_common::token::TokenKind;

use super::{expressions, MarkClosed, Parser};
use crate::error::ParseFailure;
use crate::syntax_kind::SyntaxKind;

/// A comma-separated list of patterns preceding `:` in a match arm. More
/// than one pattern is wrapped in `PATTERN_OR`, since a comma there means
/// "matches any of these", not a tuple.
pub fn parse_pattern_list(p: &mut Parser) -> Result<(), ParseFailure> {
    let first = parse_pattern(p)?;
    if p.current() != TokenKind::Comma {
        return Ok(());
    }
    let m = p.open_before(first);
    while p.eat(TokenKind::Comma) {
        if p.current() == TokenKind::Colon || p.current() == TokenKind::WhenKw {
            break;
        }
        parse_pattern(p)?;
    }
    p.close(m, SyntaxKind::PATTERN_OR);
    Ok(())
}

fn parse_pattern(p: &mut Parser) -> Result<MarkClosed, ParseFailure> {
    match p.current() {
        TokenKind::Ident if p.current_text() == "_" => {
            let m = p.open()?;
            p.advance();
            Ok(p.close(m, SyntaxKind::PATTERN_WILDCARD))
        }
        TokenKind::VarKw => {
            let m = p.open()?;
            p.advance();
            p.eat(TokenKind::Ident);
            Ok(p.close(m, SyntaxKind::PATTERN_BINDING))
        }
        TokenKind::LBracket => parse_array_pattern(p),
        TokenKind::LBrace => parse_dict_pattern(p),
        TokenKind::DotDot => {
            let m = p.open()?;
            p.advance();
            Ok(p.close(m, SyntaxKind::PATTERN_REST))
        }
        _ => {
            let m = p.open()?;
            expressions::parse_expr(p)?;
            Ok(p.close(m, SyntaxKind::PATTERN_LITERAL))
        }
    }
}

fn parse_array_pattern(p: &mut Parser) -> Result<MarkClosed, ParseFailure> {
    let m = p.open()?;
    p.advance(); // `[`
    while p.current() != TokenKind::RBracket && !p.at_eof() {
        let pos_before = p.pos();
        parse_pattern(p)?;
        if !p.eat(TokenKind::Comma) {
            break;
        }
        p.note_loop_iteration(pos_before)?;
    }
    p.eat(TokenKind::RBracket);
    Ok(p.close(m, SyntaxKind::PATTERN_ARRAY))
}

fn parse_dict_pattern(p: &mut Parser) -> Result<MarkClosed, ParseFailure> {
    let m = p.open()?;
    p.advance(); // `{`
    while p.current() != TokenKind::RBrace && !p.at_eof() {
        let pos_before = p.pos();
        if p.current() == TokenKind::DotDot {
            parse_pattern(p)?;
        } else {
            let entry = p.open()?;
            expressions::parse_expr(p)?; // key
            if p.eat(TokenKind::Colon) {
                parse_pattern(p)?;
            }
            p.close(entry, SyntaxKind::PATTERN_DICT_ENTRY);
        }
        if !p.eat(TokenKind::Comma) {
            break;
        }
        p.note_loop_iteration(pos_before)?;
    }
    p.eat(TokenKind::RBrace);
    Ok(p.close(m, SyntaxKind::PATTERN_DICT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::SyntaxNode;
    use crate::settings::ParseSettings;

    fn parse(src: &str) -> SyntaxNode {
        let mut p = Parser::new(src, ParseSettings::default());
        let m = p.open().unwrap();
        parse_pattern_list(&mut p).unwrap();
        p.close(m, SyntaxKind::SOURCE_FILE);
        SyntaxNode::new_root(p.build_tree())
    }

    #[test]
    fn wildcard_round_trips() {
        let node = parse("_");
        assert_eq!(node.text().to_string(), "_");
        assert!(node
            .descendants()
            .any(|n| n.kind() == SyntaxKind::PATTERN_WILDCARD));
    }

    #[test]
    fn comma_patterns_wrap_in_pattern_or() {
        let node = parse("1, 2, 3");
        assert_eq!(node.text().to_string(), "1, 2, 3");
        assert!(node
            .descendants()
            .any(|n| n.kind() == SyntaxKind::PATTERN_OR));
    }

    #[test]
    fn array_pattern_with_rest_round_trips() {
        let node = parse("[1, var x, ..]");
        assert_eq!(node.text().to_string(), "[1, var x, ..]");
    }
}
