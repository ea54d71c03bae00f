//! Typed AST nodes for expressions.

use crate::ast::item::{ParamList, TypeRef};
use crate::ast::{ast_node, child_node, child_nodes, child_token, AstNode};
use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone)]
pub enum Expr {
    Literal(Literal),
    NameRef(NameRef),
    BinaryExpr(BinaryExpr),
    UnaryExpr(UnaryExpr),
    TernaryExpr(TernaryExpr),
    CallExpr(CallExpr),
    IndexExpr(IndexExpr),
    FieldExpr(FieldExpr),
    ArrayExpr(ArrayExpr),
    DictExpr(DictExpr),
    GroupedExpr(GroupedExpr),
    LambdaExpr(LambdaExpr),
    StringNameExpr(StringNameExpr),
    NodePathExpr(NodePathExpr),
    GetNodeExpr(GetNodeExpr),
    UniqueNodeExpr(UniqueNodeExpr),
    AwaitExpr(AwaitExpr),
}

impl AstNode for Expr {
    fn cast(node: SyntaxNode) -> Option<Self> {
        Some(match node.kind() {
            SyntaxKind::LITERAL_EXPR => Expr::Literal(Literal { syntax: node }),
            SyntaxKind::NAME_REF => Expr::NameRef(NameRef { syntax: node }),
            SyntaxKind::BINARY_EXPR => Expr::BinaryExpr(BinaryExpr { syntax: node }),
            SyntaxKind::UNARY_EXPR => Expr::UnaryExpr(UnaryExpr { syntax: node }),
            SyntaxKind::TERNARY_EXPR => Expr::TernaryExpr(TernaryExpr { syntax: node }),
            SyntaxKind::CALL_EXPR => Expr::CallExpr(CallExpr { syntax: node }),
            SyntaxKind::INDEX_EXPR => Expr::IndexExpr(IndexExpr { syntax: node }),
            SyntaxKind::FIELD_EXPR => Expr::FieldExpr(FieldExpr { syntax: node }),
            SyntaxKind::ARRAY_EXPR => Expr::ArrayExpr(ArrayExpr { syntax: node }),
            SyntaxKind::DICT_EXPR => Expr::DictExpr(DictExpr { syntax: node }),
            SyntaxKind::GROUPED_EXPR => Expr::GroupedExpr(GroupedExpr { syntax: node }),
            SyntaxKind::LAMBDA_EXPR => Expr::LambdaExpr(LambdaExpr { syntax: node }),
            SyntaxKind::STRING_NAME_EXPR => {
                Expr::StringNameExpr(StringNameExpr { syntax: node })
            }
            SyntaxKind::NODE_PATH_EXPR => Expr::NodePathExpr(NodePathExpr { syntax: node }),
            SyntaxKind::GET_NODE_EXPR => Expr::GetNodeExpr(GetNodeExpr { syntax: node }),
            SyntaxKind::UNIQUE_NODE_EXPR => {
                Expr::UniqueNodeExpr(UniqueNodeExpr { syntax: node })
            }
            SyntaxKind::AWAIT_EXPR => Expr::AwaitExpr(AwaitExpr { syntax: node }),
            _ => return None,
        })
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Expr::Literal(n) => &n.syntax,
            Expr::NameRef(n) => &n.syntax,
            Expr::BinaryExpr(n) => &n.syntax,
            Expr::UnaryExpr(n) => &n.syntax,
            Expr::TernaryExpr(n) => &n.syntax,
            Expr::CallExpr(n) => &n.syntax,
            Expr::IndexExpr(n) => &n.syntax,
            Expr::FieldExpr(n) => &n.syntax,
            Expr::ArrayExpr(n) => &n.syntax,
            Expr::DictExpr(n) => &n.syntax,
            Expr::GroupedExpr(n) => &n.syntax,
            Expr::LambdaExpr(n) => &n.syntax,
            Expr::StringNameExpr(n) => &n.syntax,
            Expr::NodePathExpr(n) => &n.syntax,
            Expr::GetNodeExpr(n) => &n.syntax,
            Expr::UniqueNodeExpr(n) => &n.syntax,
            Expr::AwaitExpr(n) => &n.syntax,
        }
    }
}

ast_node!(Literal, LITERAL_EXPR);
ast_node!(NameRef, NAME_REF);
ast_node!(BinaryExpr, BINARY_EXPR);
ast_node!(UnaryExpr, UNARY_EXPR);
ast_node!(TernaryExpr, TERNARY_EXPR);
ast_node!(CallExpr, CALL_EXPR);
ast_node!(IndexExpr, INDEX_EXPR);
ast_node!(FieldExpr, FIELD_EXPR);
ast_node!(ArgList, ARG_LIST);
ast_node!(NamedArg, NAMED_ARG);
ast_node!(ArrayExpr, ARRAY_EXPR);
ast_node!(DictExpr, DICT_EXPR);
ast_node!(DictEntry, DICT_ENTRY);
ast_node!(GroupedExpr, GROUPED_EXPR);
ast_node!(LambdaExpr, LAMBDA_EXPR);
ast_node!(StringNameExpr, STRING_NAME_EXPR);
ast_node!(NodePathExpr, NODE_PATH_EXPR);
ast_node!(GetNodeExpr, GET_NODE_EXPR);
ast_node!(UniqueNodeExpr, UNIQUE_NODE_EXPR);
ast_node!(AwaitExpr, AWAIT_EXPR);

impl NameRef {
    pub fn name_token(&self) -> Option<SyntaxToken> {
        self.syntax.first_token()
    }
}

impl BinaryExpr {
    pub fn lhs(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn rhs(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).nth(1)
    }

    pub fn op_token(&self) -> Option<SyntaxToken> {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|t| !t.kind().is_trivia())
    }
}

impl TernaryExpr {
    pub fn then_branch(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).next()
    }

    pub fn condition(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).nth(1)
    }

    pub fn else_branch(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).nth(2)
    }
}

impl UnaryExpr {
    pub fn operand(&self) -> Option<Expr> {
        child_node_any(&self.syntax)
    }
}

impl CallExpr {
    pub fn callee(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn args(&self) -> Option<ArgList> {
        child_node(&self.syntax)
    }
}

impl ArgList {
    pub fn args(&self) -> impl Iterator<Item = Expr> + '_ {
        self.syntax.children().filter_map(Expr::cast)
    }

    pub fn named_args(&self) -> impl Iterator<Item = NamedArg> + '_ {
        child_nodes(&self.syntax)
    }
}

impl FieldExpr {
    pub fn base(&self) -> Option<Expr> {
        self.syntax.children().find_map(Expr::cast)
    }

    pub fn field_name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::IDENT)
    }
}

impl IndexExpr {
    pub fn base(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).next()
    }

    pub fn index(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).nth(1)
    }
}

impl ArrayExpr {
    pub fn elements(&self) -> impl Iterator<Item = Expr> + '_ {
        self.syntax.children().filter_map(Expr::cast)
    }
}

impl DictExpr {
    pub fn entries(&self) -> impl Iterator<Item = DictEntry> + '_ {
        child_nodes(&self.syntax)
    }
}

impl DictEntry {
    pub fn key(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).next()
    }

    pub fn value(&self) -> Option<Expr> {
        self.syntax.children().filter_map(Expr::cast).nth(1)
    }
}

impl GroupedExpr {
    pub fn inner(&self) -> Option<Expr> {
        child_node_any(&self.syntax)
    }
}

impl LambdaExpr {
    pub fn params(&self) -> Option<ParamList> {
        child_node(&self.syntax)
    }

    pub fn return_type(&self) -> Option<TypeRef> {
        child_node(&self.syntax)
    }

    pub fn body(&self) -> Option<crate::ast::item::Block> {
        child_node(&self.syntax)
    }
}

impl AwaitExpr {
    pub fn operand(&self) -> Option<Expr> {
        child_node_any(&self.syntax)
    }
}

fn child_node_any(parent: &SyntaxNode) -> Option<Expr> {
    parent.children().find_map(Expr::cast)
}
