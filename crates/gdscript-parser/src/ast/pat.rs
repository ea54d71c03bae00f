//! Typed AST nodes for match patterns.

use crate::ast::expr::Expr;
use crate::ast::{ast_node, child_node, AstNode};
use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone)]
pub enum Pattern {
    Wildcard(PatternWildcard),
    Binding(PatternBinding),
    Array(PatternArray),
    Dict(PatternDict),
    Rest(PatternRest),
    Literal(PatternLiteral),
    Or(PatternOr),
}

impl Pattern {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        Some(match node.kind() {
            SyntaxKind::PATTERN_WILDCARD => Pattern::Wildcard(PatternWildcard { syntax: node }),
            SyntaxKind::PATTERN_BINDING => Pattern::Binding(PatternBinding { syntax: node }),
            SyntaxKind::PATTERN_ARRAY => Pattern::Array(PatternArray { syntax: node }),
            SyntaxKind::PATTERN_DICT => Pattern::Dict(PatternDict { syntax: node }),
            SyntaxKind::PATTERN_REST => Pattern::Rest(PatternRest { syntax: node }),
            SyntaxKind::PATTERN_LITERAL => Pattern::Literal(PatternLiteral { syntax: node }),
            SyntaxKind::PATTERN_OR => Pattern::Or(PatternOr { syntax: node }),
            _ => return None,
        })
    }
}

ast_node!(PatternWildcard, PATTERN_WILDCARD);
ast_node!(PatternBinding, PATTERN_BINDING);
ast_node!(PatternArray, PATTERN_ARRAY);
ast_node!(PatternDict, PATTERN_DICT);
ast_node!(PatternDictEntry, PATTERN_DICT_ENTRY);
ast_node!(PatternRest, PATTERN_REST);
ast_node!(PatternLiteral, PATTERN_LITERAL);
ast_node!(PatternOr, PATTERN_OR);

impl PatternBinding {
    pub fn name(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| t.kind() == SyntaxKind::IDENT)
    }
}

impl PatternArray {
    pub fn elements(&self) -> impl Iterator<Item = Pattern> + '_ {
        self.syntax.children().filter_map(Pattern::cast)
    }
}

impl PatternDict {
    pub fn entries(&self) -> impl Iterator<Item = PatternDictEntry> + '_ {
        crate::ast::child_nodes(&self.syntax)
    }
}

impl PatternDictEntry {
    pub fn key(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn value(&self) -> Option<Pattern> {
        self.syntax.children().find_map(Pattern::cast)
    }
}

impl PatternLiteral {
    pub fn expr(&self) -> Option<Expr> {
        child_node(&self.syntax)
    }
}

impl PatternOr {
    pub fn alternatives(&self) -> impl Iterator<Item = Pattern> + '_ {
        self.syntax.children().filter_map(Pattern::cast)
    }
}
