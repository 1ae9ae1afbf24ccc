//! Type name lookup.
//!
//! A simple name is looked up in the nested types of the declaring type and
//! of each enclosing type (innermost outwards), then among the top-level types
//! of the same package anywhere in the batch, then through single-type imports
//! and finally through on-demand imports. A dotted name is tried as a
//! qualified name first, then as `First.Nested...` with `First` looked up as
//! a simple name.

use indexmap::IndexMap;
use jstruct_core::TypeDeclaration;

use crate::lower::CompilationUnit;
use crate::model::{TypeId, TypeInfo, UnitId};

pub(super) struct Scope<'a> {
    units: &'a [CompilationUnit],
    info: &'a [Vec<TypeInfo>],
    by_name: &'a IndexMap<String, TypeId>,
    /// Package (empty for the unnamed package) → simple name → top-level type.
    packages: IndexMap<&'a str, IndexMap<&'a str, TypeId>>,
}

impl<'a> Scope<'a> {
    pub(super) fn new(
        units: &'a [CompilationUnit],
        info: &'a [Vec<TypeInfo>],
        by_name: &'a IndexMap<String, TypeId>,
    ) -> Self {
        let mut packages: IndexMap<&str, IndexMap<&str, TypeId>> = IndexMap::new();
        for (u, unit) in units.iter().enumerate() {
            let members = packages.entry(unit.package().unwrap_or("")).or_default();
            for &decl in unit.top_level() {
                members
                    .entry(unit.decl(decl).name.as_str())
                    .or_insert(TypeId::new(UnitId::from_usize(u), decl));
            }
        }
        Self {
            units,
            info,
            by_name,
            packages,
        }
    }

    pub(super) fn decl(&self, id: TypeId) -> &'a TypeDeclaration {
        self.units[id.unit.as_usize()].decl(id.decl)
    }

    pub(super) fn qualified_name(&self, id: TypeId) -> &'a str {
        &self.info[id.unit.as_usize()][id.decl.as_usize()].qualified_name
    }

    fn parent(&self, id: TypeId) -> Option<TypeId> {
        self.info[id.unit.as_usize()][id.decl.as_usize()]
            .parent
            .map(|p| TypeId::new(id.unit, p))
    }

    /// Resolves `name` as written inside the declaration `from`.
    pub(super) fn lookup(&self, from: TypeId, name: &str) -> Option<TypeId> {
        match name.split_once('.') {
            None => self.lookup_simple(from, name),
            Some((first, rest)) => self
                .by_name
                .get(name)
                .copied()
                .or_else(|| self.lookup_member_path(self.lookup_simple(from, first)?, rest)),
        }
    }

    fn lookup_simple(&self, from: TypeId, name: &str) -> Option<TypeId> {
        self.lookup_enclosing(from, name)
            .or_else(|| self.lookup_package(from.unit, name))
            .or_else(|| self.lookup_single_import(from.unit, name))
            .or_else(|| self.lookup_on_demand_import(from.unit, name))
    }

    fn nested_named(&self, owner: TypeId, name: &str) -> Option<TypeId> {
        self.decl(owner)
            .nested
            .iter()
            .map(|&child| TypeId::new(owner.unit, child))
            .find(|&child| self.decl(child).name == name)
    }

    fn lookup_enclosing(&self, from: TypeId, name: &str) -> Option<TypeId> {
        let mut scope = Some(from);
        while let Some(owner) = scope {
            if let Some(found) = self.nested_named(owner, name) {
                return Some(found);
            }
            scope = self.parent(owner);
        }
        None
    }

    fn lookup_package(&self, unit: UnitId, name: &str) -> Option<TypeId> {
        let package = self.units[unit.as_usize()].package().unwrap_or("");
        self.packages.get(package)?.get(name).copied()
    }

    fn lookup_single_import(&self, unit: UnitId, name: &str) -> Option<TypeId> {
        self.units[unit.as_usize()]
            .imports()
            .iter()
            .filter(|import| import.simple_name() == Some(name))
            .find_map(|import| self.by_name.get(&import.path).copied())
    }

    fn lookup_on_demand_import(&self, unit: UnitId, name: &str) -> Option<TypeId> {
        self.units[unit.as_usize()]
            .imports()
            .iter()
            .filter(|import| import.on_demand)
            .find_map(|import| self.by_name.get(&format!("{}.{name}", import.path)).copied())
    }

    /// `rest` of a dotted name (`Inner.Deeper`) walked through nested types of `owner`.
    fn lookup_member_path(&self, owner: TypeId, rest: &str) -> Option<TypeId> {
        rest.split('.')
            .try_fold(owner, |current, segment| self.nested_named(current, segment))
    }
}
