//! Executable statements. Local `var`/`const` reuse the same readers as
//! class-level declarations ([`super::items`]); everything else here is
//! control flow, the three bare keyword statements, and the fallback
//! expression/assignment statement.

use gdscript_common::token::TokenKind;

use super::{block, expressions, items, patterns, Parser};
use crate::error::ParseFailure;
use crate::syntax_kind::SyntaxKind;

fn is_assign_op(kind: TokenKind) -> bool {
    use TokenKind::*;
    matches!(
        kind,
        Eq | PlusEq
            | MinusEq
            | StarEq
            | SlashEq
            | PercentEq
            | StarStarEq
            | AmpEq
            | PipeEq
            | CaretEq
            | LtLtEq
            | GtGtEq
    )
}

pub fn parse_stmt(p: &mut Parser) -> Result<(), ParseFailure> {
    match p.current() {
        TokenKind::VarKw | TokenKind::OnreadyKw => items::parse_var_decl(p),
        TokenKind::ConstKw => items::parse_const_decl(p),
        TokenKind::IfKw => parse_if(p),
        TokenKind::WhileKw => parse_while(p),
        TokenKind::ForKw => parse_for(p),
        TokenKind::MatchKw => parse_match(p),
        TokenKind::ReturnKw => parse_return(p),
        TokenKind::PassKw => parse_bare_kw(p, SyntaxKind::PASS_STMT),
        TokenKind::BreakKw => parse_bare_kw(p, SyntaxKind::BREAK_STMT),
        TokenKind::ContinueKw => parse_bare_kw(p, SyntaxKind::CONTINUE_STMT),
        TokenKind::BreakpointKw => parse_bare_kw(p, SyntaxKind::BREAKPOINT_STMT),
        _ => parse_expr_or_assign_stmt(p),
    }
}

fn parse_bare_kw(p: &mut Parser, kind: SyntaxKind) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.advance();
    if p.current() == TokenKind::Newline {
        p.advance();
    }
    p.close(m, kind);
    Ok(())
}

fn parse_expr_or_assign_stmt(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    expressions::parse_expr(p)?;
    if is_assign_op(p.current()) {
        p.advance();
        expressions::parse_expr(p)?;
        if p.current() == TokenKind::Newline {
            p.advance();
        }
        p.close(m, SyntaxKind::ASSIGN_STMT);
    } else {
        if p.current() == TokenKind::Newline {
            p.advance();
        }
        p.close(m, SyntaxKind::EXPR_STMT);
    }
    Ok(())
}

fn parse_return(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.advance(); // `return`
    if !matches!(p.current(), TokenKind::Newline | TokenKind::Eof) {
        expressions::parse_expr(p)?;
    }
    if p.current() == TokenKind::Newline {
        p.advance();
    }
    p.close(m, SyntaxKind::RETURN_STMT);
    Ok(())
}

fn parse_if(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.advance(); // `if`
    expressions::parse_expr(p)?;
    p.eat(TokenKind::Colon);
    block::parse_colon_body(p, 0, 4)?;
    while p.current() == TokenKind::ElifKw {
        let elif = p.open()?;
        p.advance();
        expressions::parse_expr(p)?;
        p.eat(TokenKind::Colon);
        block::parse_colon_body(p, 0, 4)?;
        p.close(elif, SyntaxKind::ELIF_CLAUSE);
    }
    if p.current() == TokenKind::ElseKw {
        let els = p.open()?;
        p.advance();
        p.eat(TokenKind::Colon);
        block::parse_colon_body(p, 0, 4)?;
        p.close(els, SyntaxKind::ELSE_CLAUSE);
    }
    p.close(m, SyntaxKind::IF_STMT);
    Ok(())
}

fn parse_while(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.advance(); // `while`
    expressions::parse_expr(p)?;
    p.eat(TokenKind::Colon);
    block::parse_colon_body(p, 0, 4)?;
    p.close(m, SyntaxKind::WHILE_STMT);
    Ok(())
}

fn parse_for(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.advance(); // `for`
    p.eat(TokenKind::Ident);
    if p.eat(TokenKind::Colon) {
        items::parse_type_ref(p)?;
    }
    p.eat(TokenKind::InKw);
    expressions::parse_expr(p)?;
    p.eat(TokenKind::Colon);
    block::parse_colon_body(p, 0, 4)?;
    p.close(m, SyntaxKind::FOR_STMT);
    Ok(())
}

fn parse_match(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.advance(); // `match`
    expressions::parse_expr(p)?;
    p.eat(TokenKind::Colon);
    if p.current() == TokenKind::Newline {
        p.advance();
    }
    let threshold = 0;
    let mut intrinsic: Option<u32> = None;
    loop {
        p.check_cancellation()?;
        skip_blank_lines(p);
        if p.at_eof() {
            break;
        }
        let w = indent_width(p, 4);
        match intrinsic {
            None => {
                if w <= threshold {
                    break;
                }
                intrinsic = Some(w);
            }
            Some(iw) => {
                if w < iw {
                    break;
                }
            }
        }
        if p.current() == TokenKind::Indent {
            p.advance();
        }
        if p.at_eof() {
            break;
        }
        let pos_before = p.pos();
        parse_match_arm(p)?;
        p.note_loop_iteration(pos_before)?;
        if p.fatal().is_some() {
            break;
        }
    }
    p.close(m, SyntaxKind::MATCH_STMT);
    Ok(())
}

fn parse_match_arm(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    patterns::parse_pattern_list(p)?;
    if p.current() == TokenKind::WhenKw {
        let g = p.open()?;
        p.advance();
        expressions::parse_expr(p)?;
        p.close(g, SyntaxKind::MATCH_GUARD);
    }
    p.eat(TokenKind::Colon);
    block::parse_colon_body(p, 0, 4)?;
    p.close(m, SyntaxKind::MATCH_ARM);
    Ok(())
}

fn indent_width(p: &Parser, tab_width: u32) -> u32 {
    if p.current() != TokenKind::Indent {
        return 0;
    }
    p.current_text()
        .chars()
        .map(|c| if c == '\t' { tab_width } else { 1 })
        .sum()
}

fn skip_blank_lines(p: &mut Parser) {
    loop {
        let indent = p.current() == TokenKind::Indent;
        let after = if indent { p.nth(1) } else { p.nth(0) };
        if !matches!(after, TokenKind::Newline) {
            break;
        }
        if indent {
            p.advance();
        }
        p.advance();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::SyntaxNode;
    use crate::settings::ParseSettings;

    fn parse(src: &str) -> SyntaxNode {
        let mut p = Parser::new(src, ParseSettings::default());
        let m = p.open().unwrap();
        parse_stmt(&mut p).unwrap();
        p.close(m, SyntaxKind::SOURCE_FILE);
        SyntaxNode::new_root(p.build_tree())
    }

    #[test]
    fn assignment_is_its_own_statement_kind() {
        let node = parse("x = 1\n");
        assert_eq!(node.text().to_string(), "x = 1\n");
        assert!(node
            .descendants()
            .any(|n| n.kind() == SyntaxKind::ASSIGN_STMT));
    }

    #[test]
    fn bare_call_is_expr_stmt() {
        let node = parse("foo()\n");
        assert!(node
            .descendants()
            .any(|n| n.kind() == SyntaxKind::EXPR_STMT));
    }

    #[test]
    fn if_elif_else_round_trips() {
        let src = "if a:\n\tpass\nelif b:\n\tpass\nelse:\n\tpass\n";
        let node = parse(src);
        assert_eq!(node.text().to_string(), src);
    }

    #[test]
    fn for_loop_with_typed_var_round_trips() {
        let src = "for i: int in range(10):\n\tpass\n";
        let node = parse(src);
        assert_eq!(node.text().to_string(), src);
    }

    #[test]
    fn match_with_guard_round_trips() {
        let src = "match x:\n\t1, 2:\n\t\tpass\n\t_ when y:\n\t\tpass\n";
        let node = parse(src);
        assert_eq!(node.text().to_string(), src);
    }
}
