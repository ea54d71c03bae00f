//! The expression reader: a Pratt parser over [`Parser`], plus the postfix
//! chain (`open_before`-driven) for call/index/field/await forms.

use gdscript_common::token::TokenKind;

use super::{MarkClosed, Parser};
use crate::error::ParseFailure;
use crate::syntax_kind::SyntaxKind;

/// Binding power of a binary operator: `(left, right)`. Equal values mean
/// left-associative; a higher right power than left means right-assoc
/// (assignment, `**`, the ternary).
fn infix_binding_power(kind: TokenKind) -> Option<(u8, u8)> {
    use TokenKind::*;
    // Assignment is a statement, not a general expression (`x = (y = 2)` is
    // not legal), so no assignment operator appears in this table; the
    // statement reader parses an expression then checks for one itself.
    Some(match kind {
        OrKw | PipePipe => (4, 5),
        AndKw | AmpAmp => (6, 7),
        EqEq | BangEq | Lt | LtEq | Gt | GtEq | InKw | IsKw | AsKw => (10, 11),
        Pipe => (12, 13),
        Caret => (14, 15),
        Amp => (16, 17),
        LtLt | GtGt => (18, 19),
        Plus | Minus => (20, 21),
        Star | Slash | Percent => (22, 23),
        StarStar => (27, 26),
        _ => return None,
    })
}

fn prefix_binding_power(kind: TokenKind) -> Option<u8> {
    use TokenKind::*;
    match kind {
        NotKw | Bang => Some(8),
        Minus | Plus | Tilde => Some(24),
        _ => None,
    }
}

/// Parse a full expression, honoring `not in` as a single operator and the
/// right-associative `if`/`else` ternary that binds looser than `or`.
pub fn parse_expr(p: &mut Parser) -> Result<MarkClosed, ParseFailure> {
    parse_expr_bp(p, 0)
}

fn parse_expr_bp(p: &mut Parser, min_bp: u8) -> Result<MarkClosed, ParseFailure> {
    let mut lhs = parse_prefix(p)?;

    loop {
        // `a if cond else b` — ternary, looser than `or`, right-assoc.
        if p.current() == TokenKind::IfKw {
            if 3 < min_bp {
                break;
            }
            let m = p.open_before(lhs);
            p.advance(); // `if`
            parse_expr_bp(p, 0)?;
            if p.current() == TokenKind::ElseKw {
                p.advance();
                parse_expr_bp(p, 0)?;
            }
            lhs = p.close(m, SyntaxKind::TERNARY_EXPR);
            continue;
        }

        // `not in` is a single dual-keyword operator at comparison level.
        if p.current() == TokenKind::NotKw && p.nth(1) == TokenKind::InKw {
            let (l_bp, r_bp) = (10, 11);
            if l_bp < min_bp {
                break;
            }
            let m = p.open_before(lhs);
            p.advance(); // `not`
            p.advance(); // `in`
            parse_expr_bp(p, r_bp)?;
            lhs = p.close(m, SyntaxKind::BINARY_EXPR);
            continue;
        }

        let kind = p.current();
        let Some((l_bp, r_bp)) = infix_binding_power(kind) else {
            break;
        };
        if l_bp < min_bp {
            break;
        }
        let m = p.open_before(lhs);
        p.advance(); // the operator token
        parse_expr_bp(p, r_bp)?;
        lhs = p.close(m, SyntaxKind::BINARY_EXPR);
    }

    Ok(lhs)
}

fn parse_prefix(p: &mut Parser) -> Result<MarkClosed, ParseFailure> {
    if let Some(bp) = prefix_binding_power(p.current()) {
        let m = p.open()?;
        p.advance();
        parse_expr_bp(p, bp)?;
        return Ok(p.close(m, SyntaxKind::UNARY_EXPR));
    }
    if p.current() == TokenKind::AwaitKw {
        let m = p.open()?;
        p.advance();
        parse_expr_bp(p, 24)?;
        return Ok(p.close(m, SyntaxKind::AWAIT_EXPR));
    }
    parse_postfix(p)
}

fn parse_postfix(p: &mut Parser) -> Result<MarkClosed, ParseFailure> {
    let mut lhs = parse_primary(p)?;
    loop {
        match p.current() {
            TokenKind::Dot => {
                let m = p.open_before(lhs);
                p.advance();
                p.eat(TokenKind::Ident);
                lhs = p.close(m, SyntaxKind::FIELD_EXPR);
            }
            TokenKind::LParen => {
                let m = p.open_before(lhs);
                parse_arg_list(p)?;
                lhs = p.close(m, SyntaxKind::CALL_EXPR);
            }
            TokenKind::LBracket => {
                let m = p.open_before(lhs);
                p.advance();
                parse_expr_bp(p, 0)?;
                p.eat(TokenKind::RBracket);
                lhs = p.close(m, SyntaxKind::INDEX_EXPR);
            }
            _ => break,
        }
    }
    Ok(lhs)
}

fn parse_arg_list(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.advance(); // `(`
    while p.current() != TokenKind::RParen && !p.at_eof() {
        let pos_before = p.pos();
        if p.current() == TokenKind::Ident && p.nth(1) == TokenKind::Eq {
            let arg = p.open()?;
            p.advance(); // name
            p.advance(); // `=`
            parse_expr_bp(p, 0)?;
            p.close(arg, SyntaxKind::NAMED_ARG);
        } else {
            parse_expr_bp(p, 0)?;
        }
        if !p.eat(TokenKind::Comma) {
            break;
        }
        p.note_loop_iteration(pos_before)?;
    }
    p.eat(TokenKind::RParen);
    p.close(m, SyntaxKind::ARG_LIST);
    Ok(())
}

fn parse_primary(p: &mut Parser) -> Result<MarkClosed, ParseFailure> {
    use TokenKind::*;
    match p.current() {
        IntNumber | FloatNumber | StringLiteral | TrueKw | FalseKw | NullKw => {
            let m = p.open()?;
            p.advance();
            Ok(p.close(m, SyntaxKind::LITERAL_EXPR))
        }
        SelfKw | SuperKw => {
            let m = p.open()?;
            p.advance();
            Ok(p.close(m, SyntaxKind::NAME_REF))
        }
        Ident => {
            let m = p.open()?;
            p.advance();
            Ok(p.close(m, SyntaxKind::NAME_REF))
        }
        Amp => {
            let m = p.open()?;
            p.advance();
            p.eat(TokenKind::StringLiteral);
            Ok(p.close(m, SyntaxKind::STRING_NAME_EXPR))
        }
        Caret => {
            let m = p.open()?;
            p.advance();
            p.eat(TokenKind::StringLiteral);
            Ok(p.close(m, SyntaxKind::NODE_PATH_EXPR))
        }
        Dollar => {
            let m = p.open()?;
            p.advance();
            while p.at_any(&[Ident, Slash]) {
                p.advance();
            }
            Ok(p.close(m, SyntaxKind::GET_NODE_EXPR))
        }
        Percent if p.nth(1) == Ident => {
            let m = p.open()?;
            p.advance(); // `%`
            p.advance(); // the node name
            Ok(p.close(m, SyntaxKind::UNIQUE_NODE_EXPR))
        }
        LParen => {
            let m = p.open()?;
            p.advance();
            parse_expr_bp(p, 0)?;
            p.eat(RParen);
            Ok(p.close(m, SyntaxKind::GROUPED_EXPR))
        }
        LBracket => {
            let m = p.open()?;
            p.advance();
            while p.current() != RBracket && !p.at_eof() {
                let pos_before = p.pos();
                parse_expr_bp(p, 0)?;
                if !p.eat(Comma) {
                    break;
                }
                p.note_loop_iteration(pos_before)?;
            }
            p.eat(RBracket);
            Ok(p.close(m, SyntaxKind::ARRAY_EXPR))
        }
        LBrace => parse_dict(p),
        FuncKw => parse_lambda(p),
        _ => parse_error_token(p),
    }
}

fn parse_error_token(p: &mut Parser) -> Result<MarkClosed, ParseFailure> {
    let m = p.open()?;
    if !p.at_eof() {
        p.advance();
    }
    Ok(p.close(m, SyntaxKind::INVALID))
}

fn parse_dict(p: &mut Parser) -> Result<MarkClosed, ParseFailure> {
    let m = p.open()?;
    p.advance(); // `{`
    while p.current() != TokenKind::RBrace && !p.at_eof() {
        let pos_before = p.pos();
        let entry = p.open()?;
        parse_expr_bp(p, 0)?; // key (bare ident keys are NAME_REF-shaped too)
        if p.eat(TokenKind::Colon) || p.eat(TokenKind::Eq) {
            parse_expr_bp(p, 0)?;
        }
        p.close(entry, SyntaxKind::DICT_ENTRY);
        if !p.eat(TokenKind::Comma) {
            break;
        }
        p.note_loop_iteration(pos_before)?;
    }
    p.eat(TokenKind::RBrace);
    Ok(p.close(m, SyntaxKind::DICT_EXPR))
}

fn parse_lambda(p: &mut Parser) -> Result<MarkClosed, ParseFailure> {
    let m = p.open()?;
    p.advance(); // `func`
    if p.current() == TokenKind::Ident {
        p.advance();
    }
    super::items::parse_param_list(p)?;
    if p.eat(TokenKind::Arrow) {
        super::items::parse_type_ref(p)?;
    }
    p.eat(TokenKind::Colon);
    super::block::parse_colon_body(p, 0, 4)?;
    Ok(p.close(m, SyntaxKind::LAMBDA_EXPR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::SyntaxNode;
    use crate::settings::ParseSettings;
    use crate::syntax_kind::SyntaxKind;

    fn parse(src: &str) -> SyntaxNode {
        let mut p = Parser::new(src, ParseSettings::default());
        let root = p.open().unwrap();
        parse_expr(&mut p).unwrap();
        p.close(root, SyntaxKind::SOURCE_FILE);
        SyntaxNode::new_root(p.build_tree())
    }

    #[test]
    fn precedence_binds_mul_tighter_than_add() {
        let node = parse("1 + 2 * 3");
        assert_eq!(node.text().to_string(), "1 + 2 * 3");
        let top = node.first_child().unwrap();
        assert_eq!(top.kind(), SyntaxKind::BINARY_EXPR);
    }

    #[test]
    fn call_chain_wraps_name_ref() {
        let node = parse("f(1)(2)");
        assert_eq!(node.text().to_string(), "f(1)(2)");
        let calls: Vec<_> = node
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::CALL_EXPR)
            .collect();
        assert_eq!(calls.len(), 2);
    }

    #[test]
    fn ternary_is_right_associative_and_looser_than_or() {
        let node = parse("a if b or c else d");
        assert_eq!(node.text().to_string(), "a if b or c else d");
        assert_eq!(
            node.first_child().unwrap().kind(),
            SyntaxKind::TERNARY_EXPR
        );
    }

    #[test]
    fn not_in_parses_as_single_operator() {
        let node = parse("x not in y");
        assert_eq!(node.text().to_string(), "x not in y");
    }

    #[test]
    fn power_is_right_associative() {
        let node = parse("2 ** 3 ** 2");
        assert_eq!(node.text().to_string(), "2 ** 3 ** 2");
    }
}
