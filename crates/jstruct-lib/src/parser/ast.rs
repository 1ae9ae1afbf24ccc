//! Typed AST wrappers over CST nodes.
//!
//! Each struct wraps a `SyntaxNode` and provides typed accessors.
//! Cast is infallible for correct `SyntaxKind` - validation happens elsewhere.

use jstruct_core::TypeKind;

use super::cst::{SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $name {
            pub fn cast(node: SyntaxNode) -> Option<Self> {
                (node.kind() == SyntaxKind::$kind).then(|| Self(node))
            }

            pub fn as_cst(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(CompilationUnit, CompilationUnit);
ast_node!(PackageDecl, PackageDecl);
ast_node!(ImportDecl, ImportDecl);
ast_node!(Name, Name);
ast_node!(Modifiers, Modifiers);
ast_node!(Annotation, Annotation);
ast_node!(ElementValuePair, ElementValuePair);
ast_node!(ElementValue, ElementValue);
ast_node!(ElementArray, ElementArray);
ast_node!(ExtendsClause, ExtendsClause);
ast_node!(ImplementsClause, ImplementsClause);
ast_node!(TypeRef, TypeRef);
ast_node!(ClassBody, ClassBody);
ast_node!(FieldDecl, FieldDecl);
ast_node!(VarDeclarator, VarDeclarator);
ast_node!(MethodDecl, MethodDecl);
ast_node!(ConstructorDecl, ConstructorDecl);
ast_node!(ElementDecl, ElementDecl);
ast_node!(DefaultValue, DefaultValue);
ast_node!(Param, Param);
ast_node!(Block, Block);

/// First direct child token of `kind`.
fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    node.children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .find(|t| t.kind() == kind)
}

fn child<T>(node: &SyntaxNode, cast: fn(SyntaxNode) -> Option<T>) -> Option<T> {
    node.children().find_map(cast)
}

/// Non-trivia text of `node` with whitespace and comments removed.
pub fn compact_text(node: &SyntaxNode) -> String {
    node.descendants_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .filter(|t| !t.kind().is_trivia())
        .map(|t| t.text().to_owned())
        .collect()
}

impl CompilationUnit {
    pub fn package(&self) -> Option<PackageDecl> {
        child(&self.0, PackageDecl::cast)
    }

    pub fn imports(&self) -> impl Iterator<Item = ImportDecl> + '_ {
        self.0.children().filter_map(ImportDecl::cast)
    }

    pub fn type_decls(&self) -> impl Iterator<Item = TypeDecl> + '_ {
        self.0.children().filter_map(TypeDecl::cast)
    }
}

impl PackageDecl {
    pub fn name(&self) -> Option<Name> {
        child(&self.0, Name::cast)
    }
}

impl ImportDecl {
    pub fn name(&self) -> Option<Name> {
        child(&self.0, Name::cast)
    }

    pub fn is_static(&self) -> bool {
        token(&self.0, SyntaxKind::KwStatic).is_some()
    }

    pub fn is_on_demand(&self) -> bool {
        token(&self.0, SyntaxKind::Star).is_some()
    }
}

impl Name {
    /// Dotted text, trivia removed.
    pub fn text(&self) -> String {
        compact_text(&self.0)
    }
}

/// Class, interface or annotation type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDecl(SyntaxNode);

impl TypeDecl {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        node.kind().is_type_decl().then(|| Self(node))
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        &self.0
    }

    pub fn kind(&self) -> TypeKind {
        match self.0.kind() {
            SyntaxKind::InterfaceDecl => TypeKind::Interface,
            SyntaxKind::AnnotationTypeDecl => TypeKind::AnnotationType,
            _ => TypeKind::Class,
        }
    }

    pub fn modifiers(&self) -> Option<Modifiers> {
        child(&self.0, Modifiers::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn extends_clause(&self) -> Option<ExtendsClause> {
        child(&self.0, ExtendsClause::cast)
    }

    pub fn implements_clause(&self) -> Option<ImplementsClause> {
        child(&self.0, ImplementsClause::cast)
    }

    pub fn body(&self) -> Option<ClassBody> {
        child(&self.0, ClassBody::cast)
    }
}

impl Modifiers {
    /// Keyword modifiers in source order, `non-sealed` joined into one string.
    pub fn keywords(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut tokens = self
            .0
            .children_with_tokens()
            .filter_map(SyntaxElement::into_token)
            .filter(|t| !t.kind().is_trivia())
            .peekable();
        while let Some(tok) = tokens.next() {
            if tok.kind() == SyntaxKind::Id && tok.text() == "non" {
                // `non` `-` `sealed`
                tokens.next();
                tokens.next();
                out.push("non-sealed".to_owned());
            } else {
                out.push(tok.text().to_owned());
            }
        }
        out
    }

    pub fn annotations(&self) -> impl Iterator<Item = Annotation> + '_ {
        self.0.children().filter_map(Annotation::cast)
    }
}

impl Annotation {
    pub fn name(&self) -> Option<Name> {
        child(&self.0, Name::cast)
    }

    /// `None` for a marker annotation; `Some` (possibly empty) once parentheses are written.
    pub fn args(&self) -> Option<SyntaxNode> {
        self.0
            .children()
            .find(|n| n.kind() == SyntaxKind::AnnotationArgs)
    }
}

/// Right-hand side of an annotation argument or element default.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Expr(ElementValue),
    Array(ElementArray),
    Annotation(Annotation),
}

impl Value {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::ElementValue => ElementValue::cast(node).map(Value::Expr),
            SyntaxKind::ElementArray => ElementArray::cast(node).map(Value::Array),
            SyntaxKind::Annotation => Annotation::cast(node).map(Value::Annotation),
            _ => None,
        }
    }

    pub fn as_cst(&self) -> &SyntaxNode {
        match self {
            Value::Expr(n) => n.as_cst(),
            Value::Array(n) => n.as_cst(),
            Value::Annotation(n) => n.as_cst(),
        }
    }
}

/// Argument inside `@Name(...)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationArg {
    Named(ElementValuePair),
    Single(Value),
}

/// Arguments of an annotation in source order.
pub fn annotation_args(args: &SyntaxNode) -> impl Iterator<Item = AnnotationArg> + '_ {
    args.children().filter_map(|node| {
        if node.kind() == SyntaxKind::ElementValuePair {
            ElementValuePair::cast(node).map(AnnotationArg::Named)
        } else {
            Value::cast(node).map(AnnotationArg::Single)
        }
    })
}

impl ElementValuePair {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn value(&self) -> Option<Value> {
        child(&self.0, Value::cast)
    }
}

impl ElementValue {
    /// Non-trivia tokens of the expression, nested `TypeArgs` included.
    pub fn tokens(&self) -> Vec<SyntaxToken> {
        self.0
            .descendants_with_tokens()
            .filter_map(SyntaxElement::into_token)
            .filter(|t| !t.kind().is_trivia())
            .collect()
    }
}

impl ElementArray {
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        self.0.children().filter_map(Value::cast)
    }
}

impl ExtendsClause {
    pub fn types(&self) -> impl Iterator<Item = TypeRef> + '_ {
        self.0.children().filter_map(TypeRef::cast)
    }
}

impl ImplementsClause {
    pub fn types(&self) -> impl Iterator<Item = TypeRef> + '_ {
        self.0.children().filter_map(TypeRef::cast)
    }
}

impl TypeRef {
    /// Dotted name without type arguments or array dimensions: `Map.Entry`.
    pub fn name(&self) -> String {
        self.0
            .children_with_tokens()
            .filter_map(SyntaxElement::into_token)
            .filter(|t| matches!(t.kind(), SyntaxKind::Id | SyntaxKind::Dot))
            .map(|t| t.text().to_owned())
            .collect()
    }

    /// Full type as written, trivia removed: `Map<String,Integer>[]`.
    pub fn text(&self) -> String {
        compact_text(&self.0)
    }
}

/// A class body member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Element(ElementDecl),
    Type(TypeDecl),
}

impl Member {
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        match node.kind() {
            SyntaxKind::FieldDecl => FieldDecl::cast(node).map(Member::Field),
            SyntaxKind::MethodDecl => MethodDecl::cast(node).map(Member::Method),
            SyntaxKind::ConstructorDecl => ConstructorDecl::cast(node).map(Member::Constructor),
            SyntaxKind::ElementDecl => ElementDecl::cast(node).map(Member::Element),
            _ => TypeDecl::cast(node).map(Member::Type),
        }
    }
}

impl ClassBody {
    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.0.children().filter_map(Member::cast)
    }
}

impl FieldDecl {
    pub fn modifiers(&self) -> Option<Modifiers> {
        child(&self.0, Modifiers::cast)
    }

    pub fn ty(&self) -> Option<TypeRef> {
        child(&self.0, TypeRef::cast)
    }

    pub fn declarators(&self) -> impl Iterator<Item = VarDeclarator> + '_ {
        self.0.children().filter_map(VarDeclarator::cast)
    }
}

impl VarDeclarator {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    /// Extra `[]` written after the name (`int a[]`).
    pub fn dims(&self) -> usize {
        self.0
            .children_with_tokens()
            .filter_map(SyntaxElement::into_token)
            .filter(|t| t.kind() == SyntaxKind::BracketOpen)
            .count()
    }
}

/// Shared accessors for method-shaped declarations.
macro_rules! callable {
    ($name:ident) => {
        impl $name {
            pub fn modifiers(&self) -> Option<Modifiers> {
                child(&self.0, Modifiers::cast)
            }

            pub fn name(&self) -> Option<SyntaxToken> {
                token(&self.0, SyntaxKind::Id)
            }

            pub fn return_type(&self) -> Option<TypeRef> {
                child(&self.0, TypeRef::cast)
            }

            pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
                self.0
                    .children()
                    .filter(|n| n.kind() == SyntaxKind::ParamList)
                    .flat_map(|list| list.children().filter_map(Param::cast))
            }

            pub fn body(&self) -> Option<Block> {
                child(&self.0, Block::cast)
            }
        }
    };
}

callable!(MethodDecl);
callable!(ConstructorDecl);
callable!(ElementDecl);

impl ElementDecl {
    pub fn default_value(&self) -> Option<DefaultValue> {
        child(&self.0, DefaultValue::cast)
    }
}

impl DefaultValue {
    pub fn value(&self) -> Option<Value> {
        child(&self.0, Value::cast)
    }
}

impl Param {
    pub fn modifiers(&self) -> Option<Modifiers> {
        child(&self.0, Modifiers::cast)
    }

    pub fn ty(&self) -> Option<TypeRef> {
        child(&self.0, TypeRef::cast)
    }

    pub fn name(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::Id)
    }

    pub fn is_varargs(&self) -> bool {
        token(&self.0, SyntaxKind::Ellipsis).is_some()
    }
}

impl Block {
    /// Non-trivia tokens in source order.
    pub fn tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0
            .descendants_with_tokens()
            .filter_map(SyntaxElement::into_token)
            .filter(|t| !t.kind().is_trivia())
    }
}

/// Javadoc token directly in front of `node`, skipping whitespace and comments only.
pub fn leading_javadoc(node: &SyntaxNode) -> Option<SyntaxToken> {
    let mut sibling = node.prev_sibling_or_token();
    while let Some(element) = sibling {
        let tok = element.into_token()?;
        match tok.kind() {
            SyntaxKind::Javadoc => return Some(tok),
            SyntaxKind::Whitespace | SyntaxKind::LineComment | SyntaxKind::BlockComment => {
                sibling = tok.prev_sibling_or_token();
            }
            _ => return None,
        }
    }
    None
}
