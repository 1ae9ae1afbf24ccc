//! Resolved structural model and its query API.
//!
//! The model owns every [`CompilationUnit`] of a batch plus the facts the
//! resolver derived for each type declaration: parent link, nesting kind,
//! qualified name and resolved supertypes. It is immutable; queries return
//! borrowed data or lazy iterators.

use indexmap::IndexMap;
use jstruct_core::{
    AnnotationUsage, DeclIndex, Member, NestingKind, TypeDeclaration, TypeRef,
};
use serde::{Deserialize, Serialize};

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::lower::CompilationUnit;
use crate::{Error, Result};

/// Position of a compilation unit in its batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(u32);

impl UnitId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub(crate) fn from_usize(index: usize) -> Self {
        Self(u32::try_from(index).expect("batch exceeds u32::MAX files"))
    }

    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// A type declaration anywhere in the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeId {
    pub unit: UnitId,
    pub decl: DeclIndex,
}

impl TypeId {
    pub fn new(unit: UnitId, decl: DeclIndex) -> Self {
        Self { unit, decl }
    }
}

/// Type or member declaration, as returned by [`StructuralModel::find_declaration_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclRef {
    Type(TypeId),
    /// `index` into the owner's `members`.
    Member { owner: TypeId, index: usize },
}

/// Where an `extends` / `implements` reference points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    Declared(TypeId),
    /// Not declared in this batch (library type, or a file that failed to parse).
    External,
}

/// Supertype reference as written plus its resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRef {
    pub reference: TypeRef,
    pub target: Target,
}

impl ResolvedRef {
    pub fn declared(&self) -> Option<TypeId> {
        match self.target {
            Target::Declared(id) => Some(id),
            Target::External => None,
        }
    }

    pub fn is_external(&self) -> bool {
        self.target == Target::External
    }
}

/// Parent → child containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NestingEdge {
    pub parent: TypeId,
    pub child: TypeId,
    pub kind: NestingKind,
}

/// Resolver output for one type declaration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TypeInfo {
    pub parent: Option<DeclIndex>,
    /// `None` for top-level types.
    pub nesting: Option<NestingKind>,
    pub qualified_name: String,
    pub superclass: Option<ResolvedRef>,
    pub interfaces: Vec<ResolvedRef>,
}

/// Immutable, resolved view of a batch of compilation units.
#[derive(Debug, Clone)]
pub struct StructuralModel {
    units: Vec<CompilationUnit>,
    /// Parallel to each unit's declaration arena.
    info: Vec<Vec<TypeInfo>>,
    /// Qualified name → first declaration with that name.
    by_name: IndexMap<String, TypeId>,
}

impl StructuralModel {
    pub(crate) fn new(
        units: Vec<CompilationUnit>,
        info: Vec<Vec<TypeInfo>>,
        by_name: IndexMap<String, TypeId>,
    ) -> Self {
        debug_assert_eq!(units.len(), info.len());
        Self {
            units,
            info,
            by_name,
        }
    }

    fn info(&self, id: TypeId) -> &TypeInfo {
        &self.info[id.unit.as_usize()][id.decl.as_usize()]
    }

    // ------------------------------------------------------------------
    // Units
    // ------------------------------------------------------------------

    pub fn units(&self) -> &[CompilationUnit] {
        &self.units
    }

    pub fn unit_ids(&self) -> impl Iterator<Item = UnitId> + '_ {
        (0..self.units.len()).map(UnitId::from_usize)
    }

    pub fn unit(&self, unit: UnitId) -> &CompilationUnit {
        &self.units[unit.as_usize()]
    }

    pub fn unit_by_path(&self, path: &str) -> Option<UnitId> {
        self.units
            .iter()
            .position(|u| u.path() == path)
            .map(UnitId::from_usize)
    }

    /// Top-level types of `unit` in source order.
    pub fn list_top_level_types(&self, unit: UnitId) -> impl Iterator<Item = TypeId> + '_ {
        self.unit(unit)
            .top_level()
            .iter()
            .map(move |&decl| TypeId::new(unit, decl))
    }

    /// Lexer, parser and resolver diagnostics of one unit.
    pub fn diagnostics(&self, unit: UnitId) -> &Diagnostics {
        self.unit(unit).diagnostics()
    }

    /// Every diagnostic of the batch with the path of the file it belongs to.
    pub fn diagnostics_iter(&self) -> impl Iterator<Item = (&str, &Diagnostic)> {
        self.units
            .iter()
            .flat_map(|u| u.diagnostics().iter().map(move |d| (u.path(), d)))
    }

    pub fn has_errors(&self) -> bool {
        self.units.iter().any(|u| u.has_errors())
    }

    /// Fails with every error-severity diagnostic of the batch, if there is any.
    pub fn into_strict(self) -> Result<Self> {
        let errors: Diagnostics = self
            .diagnostics_iter()
            .filter(|(_, d)| d.is_error())
            .map(|(_, d)| d.clone())
            .collect();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(Error::Diagnostics(errors))
        }
    }

    // ------------------------------------------------------------------
    // Declarations
    // ------------------------------------------------------------------

    /// All type declarations: unit order, then pre-order within a unit.
    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.units.iter().enumerate().flat_map(|(u, unit)| {
            (0..unit.decls().len())
                .map(move |d| TypeId::new(UnitId::from_usize(u), DeclIndex::from_usize(d)))
        })
    }

    pub fn decl(&self, id: TypeId) -> &TypeDeclaration {
        self.unit(id.unit).decl(id.decl)
    }

    pub fn member(&self, owner: TypeId, index: usize) -> &Member {
        &self.decl(owner).members[index]
    }

    /// `package.Outer.Inner`; no package prefix in the unnamed package.
    pub fn qualified_name(&self, id: TypeId) -> &str {
        &self.info(id).qualified_name
    }

    pub fn find_type(&self, qualified_name: &str) -> Option<TypeId> {
        self.by_name.get(qualified_name).copied()
    }

    /// Annotations of a type or member in source order.
    pub fn get_annotations(&self, decl: DeclRef) -> &[AnnotationUsage] {
        match decl {
            DeclRef::Type(id) => &self.decl(id).annotations,
            DeclRef::Member { owner, index } => &self.member(owner, index).annotations,
        }
    }

    /// Innermost type or member whose span covers `offset`.
    pub fn find_declaration_at(&self, unit: UnitId, offset: u32) -> Option<DeclRef> {
        let file = self.unit(unit);
        let mut found = file
            .top_level()
            .iter()
            .copied()
            .find(|&d| file.decl(d).span.contains(offset))?;

        while let Some(inner) = file
            .decl(found)
            .nested
            .iter()
            .copied()
            .find(|&d| file.decl(d).span.contains(offset))
        {
            found = inner;
        }

        let owner = TypeId::new(unit, found);
        let member = file
            .decl(found)
            .members
            .iter()
            .position(|m| m.span.contains(offset));
        Some(match member {
            Some(index) => DeclRef::Member { owner, index },
            None => DeclRef::Type(owner),
        })
    }

    // ------------------------------------------------------------------
    // Inheritance
    // ------------------------------------------------------------------

    pub fn get_superclass(&self, id: TypeId) -> Option<&ResolvedRef> {
        self.info(id).superclass.as_ref()
    }

    pub fn get_interfaces(&self, id: TypeId) -> &[ResolvedRef] {
        &self.info(id).interfaces
    }

    /// Types in the batch whose superclass or interfaces resolve to `id`.
    pub fn direct_subtypes(&self, id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.type_ids().filter(move |&candidate| {
            let info = self.info(candidate);
            info.superclass
                .iter()
                .chain(&info.interfaces)
                .any(|r| r.declared() == Some(id))
        })
    }

    // ------------------------------------------------------------------
    // Nesting
    // ------------------------------------------------------------------

    pub fn parent(&self, id: TypeId) -> Option<TypeId> {
        self.info(id).parent.map(|p| TypeId::new(id.unit, p))
    }

    /// Immediate nested types in source order.
    pub fn get_nested_types(&self, id: TypeId) -> impl Iterator<Item = TypeId> + '_ {
        self.decl(id)
            .nested
            .iter()
            .map(move |&child| TypeId::new(id.unit, child))
    }

    /// `None` for top-level types.
    pub fn nesting_kind(&self, id: TypeId) -> Option<NestingKind> {
        self.info(id).nesting
    }

    /// Static nested type. `false` for top-level types.
    pub fn is_static(&self, id: TypeId) -> bool {
        self.nesting_kind(id) == Some(NestingKind::Static)
    }

    /// Enclosing instances of `id`, innermost first. Empty for top-level and static types.
    pub fn get_enclosing_chain(&self, id: TypeId) -> EnclosingChain<'_> {
        EnclosingChain {
            model: self,
            current: Some(id),
        }
    }

    /// Every containment edge of the batch.
    pub fn nesting_edges(&self) -> impl Iterator<Item = NestingEdge> + '_ {
        self.type_ids().filter_map(|child| {
            Some(NestingEdge {
                parent: self.parent(child)?,
                child,
                kind: self.nesting_kind(child)?,
            })
        })
    }
}

/// Lazy walk up the chain of enclosing instances.
#[derive(Debug, Clone)]
pub struct EnclosingChain<'m> {
    model: &'m StructuralModel,
    current: Option<TypeId>,
}

impl Iterator for EnclosingChain<'_> {
    type Item = TypeId;

    fn next(&mut self) -> Option<TypeId> {
        let current = self.current.take()?;
        if self.model.nesting_kind(current) != Some(NestingKind::Instance) {
            return None;
        }
        let parent = self.model.parent(current)?;
        self.current = Some(parent);
        Some(parent)
    }
}
