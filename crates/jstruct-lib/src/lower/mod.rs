//! Lowering: typed CST views → per-file declaration model.
//!
//! Walks the tree once in source order. Type declarations are stored in a
//! per-unit arena in pre-order, so a parent always precedes its nested types
//! and top-level declarations keep their file order. Declarations the parser
//! could not name are dropped together with everything inside them; the
//! parser has already reported them.

mod literal;


use std::path::Path;

use indexmap::IndexSet;
use jstruct_core::{
    AnnotationArg, AnnotationUsage, AnnotationValue, DeclIndex, Import, Member, MemberKind,
    Modifier, Modifiers, Param, Span, TypeDeclaration, TypeKind, TypeRef, javadoc_text,
};
use rowan::TextRange;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::parser::ast::{self, Value};
use crate::parser::{ParseResult, SyntaxKind, SyntaxNode, SyntaxToken};

pub use literal::{parse_int_literal, unescape};

/// One source file: its declarations and everything reported while processing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompilationUnit {
    path: String,
    source: String,
    package: Option<String>,
    imports: Vec<Import>,
    decls: Vec<TypeDeclaration>,
    top_level: Vec<DeclIndex>,
    #[serde(skip)]
    diagnostics: Diagnostics,
}

impl CompilationUnit {
    pub(crate) fn from_parse(path: String, source: String, parsed: ParseResult) -> Self {
        let mut lowering = Lowering::default();
        let root = parsed.root;

        let package = root
            .package()
            .and_then(|p| p.name())
            .map(|name| name.text());
        let imports = root.imports().filter_map(|i| lower_import(&i)).collect();
        let top_level = root
            .type_decls()
            .filter_map(|decl| lowering.type_decl(&decl))
            .collect();

        Self {
            path,
            source,
            package,
            imports,
            decls: lowering.decls,
            top_level,
            diagnostics: parsed.diagnostics,
        }
    }

    /// A file whose parse was abandoned: no declarations, one `ParseAborted` diagnostic
    /// after whatever the lexer reported.
    pub(crate) fn aborted(
        path: String,
        source: String,
        mut diagnostics: Diagnostics,
        reason: &crate::Error,
    ) -> Self {
        let range = TextRange::up_to((source.len() as u32).into());
        diagnostics
            .report(DiagnosticKind::ParseAborted, range)
            .message(reason.to_string())
            .emit();
        Self {
            path,
            source,
            package: None,
            imports: Vec::new(),
            decls: Vec::new(),
            top_level: Vec::new(),
            diagnostics,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// File name without directories and extension: `Foo` for `src/a/Foo.java`.
    pub fn file_stem(&self) -> Option<&str> {
        Path::new(&self.path).file_stem().and_then(|s| s.to_str())
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source text covered by `span`, e.g. the original code of a declaration.
    pub fn text(&self, span: Span) -> &str {
        self.source.get(span.range()).unwrap_or("")
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    pub fn imports(&self) -> &[Import] {
        &self.imports
    }

    /// Every type declaration of the file, parents before their nested types.
    pub fn decls(&self) -> &[TypeDeclaration] {
        &self.decls
    }

    pub fn decl(&self, index: DeclIndex) -> &TypeDeclaration {
        &self.decls[index.as_usize()]
    }

    pub fn top_level(&self) -> &[DeclIndex] {
        &self.top_level
    }

    pub fn top_level_types(&self) -> impl Iterator<Item = &TypeDeclaration> {
        self.top_level.iter().map(|&index| self.decl(index))
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub(crate) fn diagnostics_mut(&mut self) -> &mut Diagnostics {
        &mut self.diagnostics
    }

    /// Diagnostics with source snippets, labelled with this file's path.
    pub fn render_diagnostics(&self, colored: bool) -> String {
        self.diagnostics
            .printer()
            .source(&self.source)
            .path(&self.path)
            .colored(colored)
            .render()
    }

    /// Whether the file produced any error-severity diagnostic.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}

fn span(range: TextRange) -> Span {
    Span::new(range.start().into(), range.end().into())
}

fn lower_import(import: &ast::ImportDecl) -> Option<Import> {
    let name = import.name()?;
    Some(Import {
        path: name.text(),
        is_static: import.is_static(),
        on_demand: import.is_on_demand(),
        span: span(import.as_cst().text_range()),
    })
}

#[derive(Default)]
struct Lowering {
    decls: Vec<TypeDeclaration>,
}

impl Lowering {
    fn type_decl(&mut self, decl: &ast::TypeDecl) -> Option<DeclIndex> {
        let name = decl.name()?;
        let kind = decl.kind();

        // Reserve the slot first so the arena stays in pre-order.
        let index = DeclIndex::from_usize(self.decls.len());
        self.decls.push(TypeDeclaration::new(kind, name.text()));

        let mut out = TypeDeclaration::new(kind, name.text());
        out.span = span(decl.as_cst().text_range());
        out.name_span = span(name.text_range());
        out.javadoc = javadoc(decl.as_cst());
        if let Some(modifiers) = decl.modifiers() {
            out.modifiers = lower_modifiers(&modifiers);
            out.annotations = lower_annotations(&modifiers);
        }

        if let Some(extends) = decl.extends_clause() {
            let refs = extends.types().map(|t| lower_type_ref(&t));
            match kind {
                // Extra superclasses were reported by the parser and are ignored.
                TypeKind::Class => out.superclass = refs.take(1).next(),
                TypeKind::Interface => out.interfaces.extend(refs),
                TypeKind::AnnotationType => {}
            }
        }
        if kind == TypeKind::Class
            && let Some(implements) = decl.implements_clause()
        {
            out.interfaces
                .extend(implements.types().map(|t| lower_type_ref(&t)));
        }

        if let Some(body) = decl.body() {
            for member in body.members() {
                match member {
                    ast::Member::Type(nested) => {
                        if let Some(child) = self.type_decl(&nested) {
                            out.nested.push(child);
                        }
                    }
                    ast::Member::Field(field) => out.members.extend(lower_field(&field)),
                    ast::Member::Method(method) => out.members.extend(lower_method(&method)),
                    ast::Member::Constructor(ctor) => out.members.extend(lower_constructor(&ctor)),
                    ast::Member::Element(element) => out.members.extend(lower_element(&element)),
                }
            }
        }

        self.decls[index.as_usize()] = out;
        Some(index)
    }
}

fn javadoc(node: &SyntaxNode) -> Option<String> {
    ast::leading_javadoc(node).map(|tok| javadoc_text(tok.text()))
}

fn lower_modifiers(modifiers: &ast::Modifiers) -> Modifiers {
    modifiers
        .keywords()
        .iter()
        .filter_map(|kw| Modifier::from_keyword(kw))
        .collect()
}

fn lower_annotations(modifiers: &ast::Modifiers) -> Vec<AnnotationUsage> {
    modifiers
        .annotations()
        .filter_map(|a| lower_annotation(&a))
        .collect()
}

fn lower_type_ref(ty: &ast::TypeRef) -> TypeRef {
    TypeRef::new(ty.name(), span(ty.as_cst().text_range()))
}

fn lower_annotation(annotation: &ast::Annotation) -> Option<AnnotationUsage> {
    let name = annotation.name()?.text();
    let mut args = Vec::new();
    if let Some(arg_list) = annotation.args() {
        for arg in ast::annotation_args(&arg_list) {
            let (arg_name, value) = match arg {
                ast::AnnotationArg::Named(pair) => {
                    let Some(arg_name) = pair.name() else { continue };
                    (arg_name.text().to_owned(), pair.value())
                }
                ast::AnnotationArg::Single(value) => ("value".to_owned(), Some(value)),
            };
            if let Some(value) = value.as_ref().and_then(lower_value) {
                args.push(AnnotationArg {
                    name: arg_name,
                    value,
                });
            }
        }
    }
    Some(AnnotationUsage {
        name,
        args,
        span: span(annotation.as_cst().text_range()),
    })
}

fn lower_value(value: &Value) -> Option<AnnotationValue> {
    match value {
        Value::Annotation(annotation) => lower_annotation(annotation)
            .map(Box::new)
            .map(AnnotationValue::Annotation),
        Value::Array(array) => Some(AnnotationValue::Array(
            array.values().filter_map(|v| lower_value(&v)).collect(),
        )),
        Value::Expr(expr) => {
            let tokens = expr.tokens();
            if tokens.is_empty() {
                return None;
            }
            let raw = expr.as_cst().text().to_string();
            Some(literal::lower_expression(&tokens, raw.trim()))
        }
    }
}

/// `int a = 1, b[];` yields one member per declarator.
fn lower_field(field: &ast::FieldDecl) -> Vec<Member> {
    let (modifiers, annotations) = lower_member_modifiers(field.modifiers());
    let ty = field.ty().map(|t| t.text());
    let javadoc = javadoc(field.as_cst());
    let field_span = span(field.as_cst().text_range());

    field
        .declarators()
        .filter_map(|declarator| {
            let name = declarator.name()?;
            let ty = ty
                .as_ref()
                .map(|base| format!("{base}{}", "[]".repeat(declarator.dims())));
            Some(Member {
                ty,
                has_body: false,
                javadoc: javadoc.clone(),
                ..member(MemberKind::Field, &name, field_span, &modifiers, &annotations)
            })
        })
        .collect()
}

fn lower_method(method: &ast::MethodDecl) -> Option<Member> {
    let name = method.name()?;
    let (modifiers, annotations) = lower_member_modifiers(method.modifiers());
    let body = method.body();
    Some(Member {
        params: method.params().filter_map(|p| lower_param(&p)).collect(),
        ty: method.return_type().map(|t| t.text()),
        javadoc: javadoc(method.as_cst()),
        has_body: body.is_some(),
        invocations: body.map(|b| invocations(&b)).unwrap_or_default(),
        ..member(
            MemberKind::Method,
            &name,
            span(method.as_cst().text_range()),
            &modifiers,
            &annotations,
        )
    })
}

fn lower_constructor(ctor: &ast::ConstructorDecl) -> Option<Member> {
    let name = ctor.name()?;
    let (modifiers, annotations) = lower_member_modifiers(ctor.modifiers());
    let body = ctor.body();
    Some(Member {
        params: ctor.params().filter_map(|p| lower_param(&p)).collect(),
        javadoc: javadoc(ctor.as_cst()),
        has_body: body.is_some(),
        invocations: body.map(|b| invocations(&b)).unwrap_or_default(),
        ..member(
            MemberKind::Constructor,
            &name,
            span(ctor.as_cst().text_range()),
            &modifiers,
            &annotations,
        )
    })
}

fn lower_element(element: &ast::ElementDecl) -> Option<Member> {
    let name = element.name()?;
    let (modifiers, annotations) = lower_member_modifiers(element.modifiers());
    Some(Member {
        ty: element.return_type().map(|t| t.text()),
        default_value: element
            .default_value()
            .and_then(|d| d.value())
            .and_then(|v| lower_value(&v)),
        javadoc: javadoc(element.as_cst()),
        ..member(
            MemberKind::Element,
            &name,
            span(element.as_cst().text_range()),
            &modifiers,
            &annotations,
        )
    })
}

fn lower_member_modifiers(modifiers: Option<ast::Modifiers>) -> (Modifiers, Vec<AnnotationUsage>) {
    match modifiers {
        Some(m) => (lower_modifiers(&m), lower_annotations(&m)),
        None => (Modifiers::new(), Vec::new()),
    }
}

/// Member skeleton; callers fill in the kind-specific parts.
fn member(
    kind: MemberKind,
    name: &SyntaxToken,
    member_span: Span,
    modifiers: &Modifiers,
    annotations: &[AnnotationUsage],
) -> Member {
    Member {
        kind,
        name: name.text().to_owned(),
        modifiers: modifiers.clone(),
        annotations: annotations.to_vec(),
        params: Vec::new(),
        ty: None,
        default_value: None,
        javadoc: None,
        has_body: false,
        invocations: Vec::new(),
        span: member_span,
        name_span: span(name.text_range()),
    }
}

/// `final String... names`; the receiver parameter `Foo this` is skipped.
fn lower_param(param: &ast::Param) -> Option<Param> {
    let name = param.name()?;
    let ty = param.ty()?.text();
    let (modifiers, annotations) = lower_member_modifiers(param.modifiers());
    Some(Param {
        name: name.text().to_owned(),
        ty,
        varargs: param.is_varargs(),
        modifiers,
        annotations,
    })
}

/// Names called as `name(` or `recv.name(` inside a body, first occurrence order.
///
/// Constructor calls (`new Foo(`) and local declarations (`void helper(`) are not calls.
fn invocations(body: &ast::Block) -> Vec<String> {
    let mut names = IndexSet::new();
    let mut previous: Option<SyntaxKind> = None;
    let mut tokens = body.tokens().peekable();
    while let Some(tok) = tokens.next() {
        let kind = tok.kind();
        let is_call = kind == SyntaxKind::Id
            && tokens
                .peek()
                .is_some_and(|next| next.kind() == SyntaxKind::ParenOpen)
            && !matches!(
                previous,
                Some(
                    SyntaxKind::KwNew
                        | SyntaxKind::Id
                        | SyntaxKind::PrimitiveType
                        | SyntaxKind::KwVoid
                        | SyntaxKind::BracketClose
                )
            );
        if is_call {
            names.insert(tok.text().to_owned());
        }
        previous = Some(kind);
    }
    names.into_iter().collect()
}
