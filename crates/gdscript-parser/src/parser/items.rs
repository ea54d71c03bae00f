//! The file/class reader: attributes, `class_name`/`extends`, and the
//! member list (vars, consts, signals, enums, funcs, inner classes), plus
//! the shared `PARAM_LIST`/`TYPE_REF` readers used by both methods and
//! lambdas.

use gdscript_common::token::TokenKind;

use super::{expressions, MarkClosed, Parser};
use crate::error::ParseFailure;
use crate::syntax_kind::SyntaxKind;

/// Entry point for a whole file: a flat run of attributes, at most one
/// `class_name` and one `extends`, then the top-level member list, which
/// continues until end of input (there is no enclosing indentation to
/// fall off of).
pub fn parse_file(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    parse_member_list(p, 0, true)?;
    p.close(m, SyntaxKind::SOURCE_FILE);
    Ok(())
}

/// Members of a file or inner class. `threshold` is the indentation level
/// members must sit at (0 for the file itself); `top_level` allows
/// `class_name`/`extends`/`tool` only at the outermost scope.
fn parse_member_list(p: &mut Parser, outer_threshold: u32, top_level: bool) -> Result<(), ParseFailure> {
    let mut intrinsic: Option<u32> = None;
    loop {
        p.check_cancellation()?;
        skip_blank_lines(p);
        if p.at_eof() {
            break;
        }
        let indent_w = current_indent_width(p, 4);
        if !top_level {
            match intrinsic {
                None => {
                    if indent_w <= outer_threshold {
                        break;
                    }
                    intrinsic = Some(indent_w);
                }
                Some(iw) => {
                    if indent_w < iw {
                        break;
                    }
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
        parse_member(p, top_level)?;
        p.note_loop_iteration(pos_before)?;
        if p.fatal().is_some() {
            break;
        }
    }
    Ok(())
}

fn current_indent_width(p: &Parser, tab_width: u32) -> u32 {
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
        p.advance(); // the newline
    }
}

fn parse_member(p: &mut Parser, top_level: bool) -> Result<(), ParseFailure> {
    match p.current() {
        TokenKind::At => parse_attribute(p),
        TokenKind::ClassNameKw if top_level => parse_class_name_decl(p),
        TokenKind::ExtendsKw if top_level => parse_extends_decl(p),
        TokenKind::ToolKw => {
            let m = p.open()?;
            p.advance();
            if p.current() == TokenKind::Newline {
                p.advance();
            }
            p.close(m, SyntaxKind::ATTRIBUTE);
            Ok(())
        }
        TokenKind::VarKw | TokenKind::OnreadyKw => parse_var_decl(p),
        TokenKind::ConstKw => parse_const_decl(p),
        TokenKind::SignalKw => parse_signal_decl(p),
        TokenKind::EnumKw => parse_enum_decl(p),
        TokenKind::StaticKw | TokenKind::FuncKw => parse_func_def(p),
        TokenKind::ClassKw => parse_inner_class(p),
        _ => {
            p.advance_as_invalid();
            Ok(())
        }
    }
}

fn parse_attribute(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.advance(); // `@`
    p.eat(TokenKind::Ident);
    if p.current() == TokenKind::LParen {
        let args = p.open()?;
        p.advance();
        while p.current() != TokenKind::RParen && !p.at_eof() {
            let pos_before = p.pos();
            expressions::parse_expr(p)?;
            if !p.eat(TokenKind::Comma) {
                break;
            }
            p.note_loop_iteration(pos_before)?;
        }
        p.eat(TokenKind::RParen);
        p.close(args, SyntaxKind::ATTRIBUTE_ARG_LIST);
    }
    if p.current() == TokenKind::Newline {
        p.advance();
    }
    p.close(m, SyntaxKind::ATTRIBUTE);
    Ok(())
}

fn parse_class_name_decl(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.advance(); // `class_name`
    p.eat(TokenKind::Ident);
    if p.eat(TokenKind::Comma) {
        p.eat(TokenKind::StringLiteral); // optional icon path
    }
    if p.current() == TokenKind::Newline {
        p.advance();
    }
    p.close(m, SyntaxKind::CLASS_NAME_DECL);
    Ok(())
}

fn parse_extends_decl(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.advance(); // `extends`
    if p.current() == TokenKind::StringLiteral {
        p.advance();
    } else {
        parse_type_ref(p)?;
    }
    if p.current() == TokenKind::Newline {
        p.advance();
    }
    p.close(m, SyntaxKind::EXTENDS_DECL);
    Ok(())
}

pub(super) fn parse_var_decl(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    if p.current() == TokenKind::OnreadyKw {
        p.advance();
    }
    p.advance(); // `var`
    p.eat(TokenKind::Ident);
    if p.eat(TokenKind::Colon) {
        if p.current() == TokenKind::Eq {
            // `:=` is lexed as one token (ColonEq); a bare `:` followed
            // immediately by `=` never happens, so this branch is only
            // reachable for an explicit `: Type`.
        } else {
            parse_type_ref(p)?;
        }
    } else {
        p.eat(TokenKind::ColonEq);
    }
    if p.eat(TokenKind::Eq) {
        expressions::parse_expr(p)?;
    }
    if p.current() == TokenKind::Colon {
        parse_property_body(p)?;
    } else if p.current() == TokenKind::Newline {
        p.advance();
    }
    p.close(m, SyntaxKind::VAR_DECL);
    Ok(())
}

/// `var x: int: get: return _x set(v): _x = v` — inline property accessors.
fn parse_property_body(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.advance(); // `:`
    if p.current() == TokenKind::Newline {
        p.advance();
        loop {
            let indent_w = current_indent_width(p, 4);
            if indent_w == 0 {
                break;
            }
            if p.current() == TokenKind::Indent {
                p.advance();
            }
            let pos_before = p.pos();
            parse_accessor(p)?;
            p.note_loop_iteration(pos_before)?;
        }
    } else {
        parse_accessor(p)?;
    }
    p.close(m, SyntaxKind::PROPERTY_BODY);
    Ok(())
}

fn parse_accessor(p: &mut Parser) -> Result<(), ParseFailure> {
    let (m, kind) = match p.current() {
        TokenKind::GetKw => (p.open()?, SyntaxKind::GETTER),
        TokenKind::SetKw => (p.open()?, SyntaxKind::SETTER),
        _ => {
            p.advance_as_invalid();
            return Ok(());
        }
    };
    p.advance(); // `get` / `set`
    if p.current() == TokenKind::LParen {
        parse_param_list(p)?;
    }
    p.eat(TokenKind::Colon);
    super::block::parse_colon_body(p, 0, 4)?;
    p.close(m, kind);
    Ok(())
}

pub(super) fn parse_const_decl(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.advance(); // `const`
    p.eat(TokenKind::Ident);
    if p.eat(TokenKind::Colon) {
        parse_type_ref(p)?;
    } else {
        p.eat(TokenKind::ColonEq);
    }
    p.eat(TokenKind::Eq);
    expressions::parse_expr(p)?;
    if p.current() == TokenKind::Newline {
        p.advance();
    }
    p.close(m, SyntaxKind::CONST_DECL);
    Ok(())
}

fn parse_signal_decl(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.advance(); // `signal`
    p.eat(TokenKind::Ident);
    if p.current() == TokenKind::LParen {
        parse_param_list(p)?;
    }
    if p.current() == TokenKind::Newline {
        p.advance();
    }
    p.close(m, SyntaxKind::SIGNAL_DECL);
    Ok(())
}

fn parse_enum_decl(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.advance(); // `enum`
    if p.current() == TokenKind::Ident {
        p.advance();
    }
    p.eat(TokenKind::LBrace);
    while p.current() != TokenKind::RBrace && !p.at_eof() {
        let pos_before = p.pos();
        let v = p.open()?;
        p.eat(TokenKind::Ident);
        if p.eat(TokenKind::Eq) {
            expressions::parse_expr(p)?;
        }
        p.close(v, SyntaxKind::ENUM_VARIANT);
        if !p.eat(TokenKind::Comma) {
            break;
        }
        p.note_loop_iteration(pos_before)?;
    }
    p.eat(TokenKind::RBrace);
    if p.current() == TokenKind::Newline {
        p.advance();
    }
    p.close(m, SyntaxKind::ENUM_DECL);
    Ok(())
}

fn parse_func_def(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    if p.current() == TokenKind::StaticKw {
        p.advance();
    }
    p.advance(); // `func`
    if p.current() == TokenKind::Ident {
        p.advance();
    }
    if p.current() == TokenKind::LParen {
        parse_param_list(p)?;
    }
    if p.eat(TokenKind::Arrow) {
        parse_type_ref(p)?;
    }
    if p.current() == TokenKind::Colon {
        p.advance();
        super::block::parse_colon_body(p, 0, 4)?;
    } else if p.current() == TokenKind::Newline {
        // an abstract method: header only, no body, terminates at the
        // end of the return type with no colon.
        p.advance();
    }
    p.close(m, SyntaxKind::FUNC_DEF);
    Ok(())
}

fn parse_inner_class(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.advance(); // `class`
    p.eat(TokenKind::Ident);
    if p.eat(TokenKind::ExtendsKw) {
        parse_type_ref(p)?;
    }
    p.eat(TokenKind::Colon);
    if p.current() == TokenKind::Newline {
        p.advance();
    }
    let body = p.open()?;
    parse_member_list(p, 0, false)?;
    p.close(body, SyntaxKind::CLASS_BODY);
    p.close(m, SyntaxKind::INNER_CLASS_DEF);
    Ok(())
}

pub fn parse_param_list(p: &mut Parser) -> Result<(), ParseFailure> {
    let m = p.open()?;
    p.eat(TokenKind::LParen);
    while p.current() != TokenKind::RParen && !p.at_eof() {
        let pos_before = p.pos();
        let param = p.open()?;
        p.eat(TokenKind::Ident);
        if p.eat(TokenKind::Colon) {
            if p.current() != TokenKind::Eq {
                parse_type_ref(p)?;
            }
        } else {
            p.eat(TokenKind::ColonEq);
        }
        if p.eat(TokenKind::Eq) {
            expressions::parse_expr(p)?;
        }
        p.close(param, SyntaxKind::PARAM);
        if !p.eat(TokenKind::Comma) {
            break;
        }
        p.note_loop_iteration(pos_before)?;
    }
    p.eat(TokenKind::RParen);
    p.close(m, SyntaxKind::PARAM_LIST);
    Ok(())
}

/// A dotted/generic type name: `Array[Dictionary]`, `Foo.Bar`.
pub fn parse_type_ref(p: &mut Parser) -> Result<MarkClosed, ParseFailure> {
    let m = p.open()?;
    p.eat(TokenKind::Ident);
    while p.eat(TokenKind::Dot) {
        p.eat(TokenKind::Ident);
    }
    if p.current() == TokenKind::LBracket {
        let g = p.open()?;
        p.advance();
        parse_type_ref(p)?;
        p.eat(TokenKind::RBracket);
        p.close(g, SyntaxKind::TYPE_GENERIC);
    }
    Ok(p.close(m, SyntaxKind::TYPE_REF))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::SyntaxNode;
    use crate::settings::ParseSettings;

    fn parse(src: &str) -> SyntaxNode {
        let mut p = Parser::new(src, ParseSettings::default());
        parse_file(&mut p).unwrap();
        SyntaxNode::new_root(p.build_tree())
    }

    #[test]
    fn var_decl_with_type_round_trips() {
        let src = "var x: int = 1\n";
        let node = parse(src);
        assert_eq!(node.text().to_string(), src);
    }

    #[test]
    fn func_with_return_type_and_body_round_trips() {
        let src = "func foo() -> int:\n\treturn 1\n";
        let node = parse(src);
        assert_eq!(node.text().to_string(), src);
        assert!(node
            .descendants()
            .any(|n| n.kind() == SyntaxKind::FUNC_DEF));
    }

    #[test]
    fn abstract_method_without_colon_has_no_body() {
        let src = "func foo() -> int\nfunc bar():\n\tpass\n";
        let node = parse(src);
        assert_eq!(node.text().to_string(), src);
        let funcs: Vec<_> = node
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::FUNC_DEF)
            .collect();
        assert_eq!(funcs.len(), 2);
        assert!(!funcs[0]
            .children()
            .any(|c| c.kind() == SyntaxKind::BLOCK));
    }

    #[test]
    fn class_name_and_extends_round_trip() {
        let src = "class_name Foo\nextends Node\n";
        let node = parse(src);
        assert_eq!(node.text().to_string(), src);
    }
}
