use serde::{Deserialize, Serialize};

use crate::{AnnotationUsage, AnnotationValue, DeclIndex, Modifiers, Span};

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
    AnnotationType,
}

impl TypeKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Interface => "interface",
            Self::AnnotationType => "@interface",
        }
    }

    /// Interfaces and annotation types: no superclass, members implicitly static.
    pub fn is_interface_like(self) -> bool {
        matches!(self, Self::Interface | Self::AnnotationType)
    }
}

/// Tag of a parent → child containment edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NestingKind {
    Static,
    Instance,
}

impl NestingKind {
    /// Java's rule: explicit `static`, or any interface-like child or parent.
    pub fn classify(child: &TypeDeclaration, parent_kind: TypeKind) -> Self {
        if child.modifiers.is_static()
            || child.kind.is_interface_like()
            || parent_kind.is_interface_like()
        {
            Self::Static
        } else {
            Self::Instance
        }
    }
}

/// A type name written in `extends` / `implements`.
///
/// `name` is the dotted name with type arguments and whitespace removed,
/// e.g. `Map.Entry` for `Map.Entry<K, V>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    pub name: String,
    pub span: Span,
}

impl TypeRef {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }

    pub fn is_qualified(&self) -> bool {
        self.name.contains('.')
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.name.split('.')
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// `import` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    /// Imported name without a trailing `.*`.
    pub path: String,
    pub is_static: bool,
    /// `import a.b.*;`
    pub on_demand: bool,
    pub span: Span,
}

impl Import {
    /// Last segment of a single-type import.
    pub fn simple_name(&self) -> Option<&str> {
        if self.on_demand {
            return None;
        }
        self.path.rsplit('.').next()
    }
}

/// Formal parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    /// Type as written, whitespace removed (`String[]`, `List<String>`).
    pub ty: String,
    pub varargs: bool,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationUsage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    Field,
    Method,
    Constructor,
    /// Element of an `@interface`.
    Element,
}

/// Field, method, constructor or annotation element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub kind: MemberKind,
    pub name: String,
    pub modifiers: Modifiers,
    pub annotations: Vec<AnnotationUsage>,
    pub params: Vec<Param>,
    /// Field type, return type or element type; `None` for constructors.
    pub ty: Option<String>,
    /// `default` value of an annotation element.
    pub default_value: Option<AnnotationValue>,
    /// Javadoc text without the `/** */` delimiters and `*` gutter.
    pub javadoc: Option<String>,
    pub has_body: bool,
    /// Names invoked as `name(...)` inside the body, first occurrence order.
    pub invocations: Vec<String>,
    pub span: Span,
    pub name_span: Span,
}

impl Member {
    pub fn is_static(&self) -> bool {
        self.modifiers.is_static()
    }
}

/// Class, interface or annotation type, nested or top-level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub kind: TypeKind,
    pub name: String,
    pub modifiers: Modifiers,
    /// Javadoc text without the `/** */` delimiters and `*` gutter.
    pub javadoc: Option<String>,
    pub annotations: Vec<AnnotationUsage>,
    /// Classes only.
    pub superclass: Option<TypeRef>,
    /// `implements` of a class, `extends` of an interface.
    pub interfaces: Vec<TypeRef>,
    pub members: Vec<Member>,
    /// Immediate nested types, indices into the owning unit's arena.
    pub nested: Vec<DeclIndex>,
    pub span: Span,
    pub name_span: Span,
}

impl TypeDeclaration {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            modifiers: Modifiers::new(),
            javadoc: None,
            annotations: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            nested: Vec::new(),
            span: Span::default(),
            name_span: Span::default(),
        }
    }

    pub fn is_public(&self) -> bool {
        self.modifiers.is_public()
    }

    pub fn methods(&self) -> impl Iterator<Item = &Member> {
        self.members
            .iter()
            .filter(|m| matches!(m.kind, MemberKind::Method | MemberKind::Constructor))
    }

    pub fn fields(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.kind == MemberKind::Field)
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }
}
