//! Typed AST nodes for the file/class level: `SourceFile`, declarations,
//! and the shared `ParamList`/`TypeRef`/`Block` building blocks.

use crate::ast::expr::Expr;
use crate::ast::stmt::Stmt;
use crate::ast::{ast_node, child_node, child_nodes, child_token, AstNode};
use crate::cst::{SyntaxNode, SyntaxToken};
use crate::syntax_kind::SyntaxKind;

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn class_name(&self) -> Option<ClassNameDecl> {
        child_node(&self.syntax)
    }

    pub fn extends(&self) -> Option<ExtendsDecl> {
        child_node(&self.syntax)
    }

    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.syntax.children().filter_map(Member::cast)
    }
}

ast_node!(Attribute, ATTRIBUTE);
ast_node!(ClassNameDecl, CLASS_NAME_DECL);
ast_node!(ExtendsDecl, EXTENDS_DECL);
ast_node!(ClassBody, CLASS_BODY);
ast_node!(InnerClassDef, INNER_CLASS_DEF);

impl InnerClassDef {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::IDENT)
    }

    pub fn body(&self) -> Option<ClassBody> {
        child_node(&self.syntax)
    }
}

impl ClassBody {
    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.syntax.children().filter_map(Member::cast)
    }
}

ast_node!(VarDecl, VAR_DECL);
ast_node!(ConstDecl, CONST_DECL);
ast_node!(SignalDecl, SIGNAL_DECL);
ast_node!(EnumDecl, ENUM_DECL);
ast_node!(EnumVariant, ENUM_VARIANT);
ast_node!(PropertyBody, PROPERTY_BODY);
ast_node!(Getter, GETTER);
ast_node!(Setter, SETTER);
ast_node!(FuncDef, FUNC_DEF);

impl VarDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::IDENT)
    }

    pub fn type_ref(&self) -> Option<TypeRef> {
        child_node(&self.syntax)
    }

    pub fn initializer(&self) -> Option<Expr> {
        child_node(&self.syntax)
    }

    pub fn property_body(&self) -> Option<PropertyBody> {
        child_node(&self.syntax)
    }

    pub fn is_onready(&self) -> bool {
        child_token(&self.syntax, SyntaxKind::ONREADY_KW).is_some()
    }
}

impl ConstDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::IDENT)
    }

    pub fn value(&self) -> Option<Expr> {
        child_node(&self.syntax)
    }
}

impl FuncDef {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::IDENT)
    }

    pub fn params(&self) -> Option<ParamList> {
        child_node(&self.syntax)
    }

    pub fn return_type(&self) -> Option<TypeRef> {
        child_node(&self.syntax)
    }

    pub fn body(&self) -> Option<Block> {
        child_node(&self.syntax)
    }

    pub fn is_static(&self) -> bool {
        child_token(&self.syntax, SyntaxKind::STATIC_KW).is_some()
    }

    /// An abstract method has a header (name, params, optional return
    /// type) but no `Block`.
    pub fn is_abstract(&self) -> bool {
        self.body().is_none()
    }
}

ast_node!(ParamList, PARAM_LIST);
ast_node!(Param, PARAM);

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        child_nodes(&self.syntax)
    }
}

impl Param {
    pub fn name(&self) -> Option<SyntaxToken> {
        child_token(&self.syntax, SyntaxKind::IDENT)
    }

    pub fn type_ref(&self) -> Option<TypeRef> {
        child_node(&self.syntax)
    }

    pub fn default_value(&self) -> Option<Expr> {
        child_node(&self.syntax)
    }
}

ast_node!(TypeRef, TYPE_REF);
ast_node!(TypeGeneric, TYPE_GENERIC);

impl TypeRef {
    pub fn names(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.syntax
            .children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|t| t.kind() == SyntaxKind::IDENT)
    }

    pub fn generic_arg(&self) -> Option<TypeRef> {
        let generic = child_node::<TypeGeneric>(&self.syntax)?;
        child_node(&generic.syntax)
    }
}

ast_node!(Block, BLOCK);

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = Stmt> + '_ {
        self.syntax.children().filter_map(Stmt::cast)
    }
}

/// Any member that can appear directly in a file or class body.
#[derive(Debug, Clone)]
pub enum Member {
    Attribute(Attribute),
    VarDecl(VarDecl),
    ConstDecl(ConstDecl),
    SignalDecl(SignalDecl),
    EnumDecl(EnumDecl),
    FuncDef(FuncDef),
    InnerClassDef(InnerClassDef),
}

impl Member {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::ATTRIBUTE => Some(Member::Attribute(Attribute { syntax: node })),
            SyntaxKind::VAR_DECL => Some(Member::VarDecl(VarDecl { syntax: node })),
            SyntaxKind::CONST_DECL => Some(Member::ConstDecl(ConstDecl { syntax: node })),
            SyntaxKind::SIGNAL_DECL => Some(Member::SignalDecl(SignalDecl { syntax: node })),
            SyntaxKind::ENUM_DECL => Some(Member::EnumDecl(EnumDecl { syntax: node })),
            SyntaxKind::FUNC_DEF => Some(Member::FuncDef(FuncDef { syntax: node })),
            SyntaxKind::INNER_CLASS_DEF => {
                Some(Member::InnerClassDef(InnerClassDef { syntax: node }))
            }
            _ => None,
        }
    }

    pub fn syntax(&self) -> &SyntaxNode {
        match self {
            Member::Attribute(n) => &n.syntax,
            Member::VarDecl(n) => &n.syntax,
            Member::ConstDecl(n) => &n.syntax,
            Member::SignalDecl(n) => &n.syntax,
            Member::EnumDecl(n) => &n.syntax,
            Member::FuncDef(n) => &n.syntax,
            Member::InnerClassDef(n) => &n.syntax,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::items::parse_file;
    use crate::settings::ParseSettings;

    #[test]
    fn source_file_exposes_extends_and_funcs() {
        let src = "extends Node\nfunc ready() -> void:\n\tpass\n";
        let mut p = crate::parser::Parser::new(src, ParseSettings::default());
        parse_file(&mut p).unwrap();
        let node = SyntaxNode::new_root(p.build_tree());
        let file = SourceFile::cast(node).unwrap();
        assert!(file.extends().is_some());
        let funcs: Vec<_> = file
            .members()
            .filter_map(|m| match m {
                Member::FuncDef(f) => Some(f),
                _ => None,
            })
            .collect();
        assert_eq!(funcs.len(), 1);
        assert_eq!(funcs[0].name().unwrap().text(), "ready");
    }
}
