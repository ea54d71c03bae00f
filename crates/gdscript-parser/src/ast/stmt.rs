//! Typed AST nodes for statements.

use crate::ast::expr::Expr;
use crate::ast::item::Block;
use crate::ast::pat::Pattern;
use crate::ast::{ast_node, child_node, AstNode};
use crate::cst::SyntaxNode;
use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone)]
pub enum Stmt {
    IfStmt(IfStmt),
    WhileStmt(WhileStmt),
    ForStmt(ForStmt),
    MatchStmt(MatchStmt),
    ReturnStmt(ReturnStmt),
    PassStmt(PassStmt),
    BreakStmt(BreakStmt),
    ContinueStmt(ContinueStmt),
    BreakpointStmt(BreakpointStmt),
    ExprStmt(ExprStmt),
    AssignStmt(AssignStmt),
    VarDecl(crate::ast::item::VarDecl),
    ConstDecl(crate::ast::item::ConstDecl),
}

impl Stmt {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        use crate::ast::item::{ConstDecl, VarDecl};
        Some(match node.kind() {
            SyntaxKind::IF_STMT => Stmt::IfStmt(IfStmt { syntax: node }),
            SyntaxKind::WHILE_STMT => Stmt::WhileStmt(WhileStmt { syntax: node }),
            SyntaxKind::FOR_STMT => Stmt::ForStmt(ForStmt { syntax: node }),
            SyntaxKind::MATCH_STMT => Stmt::MatchStmt(MatchStmt { syntax: node }),
            SyntaxKind::RETURN_STMT => Stmt::ReturnStmt(ReturnStmt { syntax: node }),
            SyntaxKind::PASS_STMT => Stmt::PassStmt(PassStmt { syntax: node }),
            SyntaxKind::BREAK_STMT => Stmt::BreakStmt(BreakStmt { syntax: node }),
            SyntaxKind::CONTINUE_STMT => Stmt::ContinueStmt(ContinueStmt { syntax: node }),
            SyntaxKind::BREAKPOINT_STMT => {
                Stmt::BreakpointStmt(BreakpointStmt { syntax: node })
            }
            SyntaxKind::EXPR_STMT => Stmt::ExprStmt(ExprStmt { syntax: node }),
            SyntaxKind::ASSIGN_STMT => Stmt::AssignStmt(AssignStmt { syntax: node }),
            SyntaxKind::VAR_DECL => Stmt::VarDecl(VarDecl { syntax: node }),
            SyntaxKind::CONST_DECL => Stmt::ConstDecl(ConstDecl { syntax: node }),
            _ => return None,
        })
    }
}

ast_node!(IfStmt, IF_STMT);
ast_node!(ElifClause, ELIF_CLAUSE);
ast_node!(ElseClause, ELSE_CLAUSE);
ast_node!(WhileStmt, WHILE_STMT);
ast_node!(ForStmt, FOR_STMT);
ast_node!(MatchStmt, MATCH_STMT);
ast_node!(MatchArm, MATCH_ARM);
ast_node!(MatchGuard, MATCH_GUARD);
ast_node!(ReturnStmt, RETURN_STMT);
ast_node!(PassStmt, PASS_STMT);
ast_node!(BreakStmt, BREAK_STMT);
ast_node!(ContinueStmt, CONTINUE_STMT);
ast_node!(BreakpointStmt, BREAKPOINT_STMT);
ast_node!(ExprStmt, EXPR_STMT);
ast_node!(AssignStmt, ASSIGN_STMT);

impl IfStmt {
    pub fn condition(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn then_branch(&self) -> Option<Block> {
        child_node(&self.syntax)
    }

    pub fn elif_clauses(&self) -> impl Iterator<Item = ElifClause> + '_ {
        crate::ast::child_nodes(&self.syntax)
    }

    pub fn else_clause(&self) -> Option<ElseClause> {
        child_node(&self.syntax)
    }
}

impl ElifClause {
    pub fn condition(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn body(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

impl ElseClause {
    pub fn body(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

impl WhileStmt {
    pub fn condition(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn body(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

impl ForStmt {
    pub fn iterable(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn body(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

impl MatchStmt {
    pub fn subject(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn arms(&self) -> impl Iterator<Item = MatchArm> + '_ {
        crate::ast::child_nodes(&self.syntax)
    }
}

impl MatchArm {
    pub fn patterns(&self) -> impl Iterator<Item = Pattern> + '_ {
        self.syntax.children().filter_map(Pattern::cast)
    }

    pub fn guard(&self) -> Option<MatchGuard> {
        child_node(&self.syntax)
    }

    pub fn body(&self) -> Option<Block> {
        child_node(&self.syntax)
    }
}

impl ReturnStmt {
    pub fn value(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }
}

impl ExprStmt {
    pub fn expr(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }
}

impl AssignStmt {
    pub fn target(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).next()
    }

    pub fn value(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).nth(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ParseSettings;

    #[test]
    fn if_stmt_exposes_condition_and_branches() {
        let src = "if a:\n\tpass\nelif b:\n\tpass\nelse:\n\tpass\n";
        let mut p = crate::parser::Parser::new(src, ParseSettings::default());
        let root = p.open().unwrap();
        crate::parser::statements::parse_stmt(&mut p).unwrap();
        p.close(root, SyntaxKind::SOURCE_FILE);
        let node = SyntaxNode::new_root(p.build_tree());
        let if_stmt = node
            .descendants()
            .find_map(IfStmt::cast)
            .unwrap();
        assert!(if_stmt.condition().is_some());
        assert!(if_stmt.then_branch().is_some());
        assert_eq!(if_stmt.elif_clauses().count(), 1);
        assert!(if_stmt.else_clause().is_some());
    }
}
