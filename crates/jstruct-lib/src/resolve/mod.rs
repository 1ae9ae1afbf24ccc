//! Batch resolution: compilation units → [`StructuralModel`].
//!
//! Runs once every unit of the batch has been parsed. Passes, in order:
//!
//! 1. Nesting: parent links, static/instance tags, qualified names
//! 2. Declarations: duplicate sibling names, duplicate qualified names,
//!    public top-level type checks
//! 3. References: `extends` / `implements` lookup and kind checks
//! 4. Cycles in the resolved inheritance graph
//!
//! No finding stops resolution; each is reported on the unit it concerns.

mod cycles;
mod scope;


use indexmap::IndexMap;
use jstruct_core::{DeclIndex, NestingKind, Span, TypeKind, TypeRef};
use rowan::TextRange;

use crate::diagnostics::DiagnosticKind;
use crate::lower::CompilationUnit;
use crate::model::{ResolvedRef, StructuralModel, Target, TypeId, TypeInfo, UnitId};

use scope::Scope;

fn range(span: Span) -> TextRange {
    TextRange::new(span.start.into(), span.end.into())
}

/// Resolves a batch of compilation units into an immutable model.
pub fn resolve(mut units: Vec<CompilationUnit>) -> StructuralModel {
    let _span = tracing::debug_span!("resolve", units = units.len()).entered();

    let mut info: Vec<Vec<TypeInfo>> = units.iter().map(nesting_info).collect();
    let by_name = check_declarations(&mut units, &info);

    let resolved: Vec<Vec<Resolution>> = {
        let scope = Scope::new(&units, &info, &by_name);
        units
            .iter()
            .enumerate()
            .map(|(u, unit)| {
                let unit_id = UnitId::from_usize(u);
                (0..unit.decls().len())
                    .map(|d| {
                        scope.resolve_supertypes(TypeId::new(unit_id, DeclIndex::from_usize(d)))
                    })
                    .collect()
            })
            .collect()
    };

    for (u, per_unit) in resolved.into_iter().enumerate() {
        for (d, resolution) in per_unit.into_iter().enumerate() {
            let type_info = &mut info[u][d];
            type_info.superclass = resolution.superclass;
            type_info.interfaces = resolution.interfaces;
            for diagnostic in resolution.diagnostics {
                diagnostic.emit(&mut units[u]);
            }
        }
    }

    for id in cycles::find(&units, &info) {
        let decl = units[id.unit.as_usize()].decl(id.decl);
        let name_span = decl.name_span;
        let name = info[id.unit.as_usize()][id.decl.as_usize()]
            .qualified_name
            .clone();
        units[id.unit.as_usize()]
            .diagnostics_mut()
            .report(DiagnosticKind::CyclicInheritance, range(name_span))
            .message(name)
            .emit();
    }

    let model = StructuralModel::new(units, info, by_name);
    tracing::debug!(
        types = model.type_ids().count(),
        errors = model.diagnostics_iter().filter(|(_, d)| d.is_error()).count(),
        "batch resolved"
    );
    model
}

/// Parent links, nesting tags and qualified names of one unit. Relies on the
/// arena being in pre-order, so a parent's entry exists before its children's.
fn nesting_info(unit: &CompilationUnit) -> Vec<TypeInfo> {
    let decls = unit.decls();
    let mut info: Vec<TypeInfo> = decls
        .iter()
        .map(|decl| TypeInfo {
            parent: None,
            nesting: None,
            qualified_name: match unit.package() {
                Some(package) => format!("{package}.{}", decl.name),
                None => decl.name.clone(),
            },
            superclass: None,
            interfaces: Vec::new(),
        })
        .collect();

    for (p, parent) in decls.iter().enumerate() {
        for &child in &parent.nested {
            let c = child.as_usize();
            info[c].parent = Some(DeclIndex::from_usize(p));
            info[c].nesting = Some(NestingKind::classify(&decls[c], parent.kind));
            info[c].qualified_name = format!("{}.{}", info[p].qualified_name, decls[c].name);
        }
    }
    info
}

/// Sibling and batch-wide name clashes, public type rules. Returns the
/// qualified-name table; the first declaration of a name wins.
fn check_declarations(
    units: &mut [CompilationUnit],
    info: &[Vec<TypeInfo>],
) -> IndexMap<String, TypeId> {
    let mut by_name: IndexMap<String, TypeId> = IndexMap::new();

    for (u, unit) in units.iter_mut().enumerate() {
        let unit_id = UnitId::from_usize(u);
        let mut pending = Vec::new();

        // Nested siblings
        for parent in unit.decls() {
            let mut seen: IndexMap<&str, Span> = IndexMap::new();
            for &child in &parent.nested {
                let decl = unit.decl(child);
                match seen.get(decl.name.as_str()) {
                    Some(&first) => pending.push(
                        Pending::new(
                            DiagnosticKind::AmbiguousNestedName,
                            decl.name_span,
                            &decl.name,
                        )
                        .related("first declared here", first),
                    ),
                    None => {
                        seen.insert(&decl.name, decl.name_span);
                    }
                }
            }
        }

        // Qualified names across the batch
        for (d, decl) in unit.decls().iter().enumerate() {
            let id = TypeId::new(unit_id, DeclIndex::from_usize(d));
            let qualified = &info[u][d].qualified_name;
            match by_name.get(qualified) {
                Some(_) if info[u][d].parent.is_some() => {
                    // Already reported as an ambiguous sibling.
                }
                Some(first) => {
                    let mut diag = Pending::new(
                        DiagnosticKind::DuplicateTypeDeclaration,
                        decl.name_span,
                        qualified,
                    );
                    if first.unit == unit_id {
                        let first_span = unit.decl(first.decl).name_span;
                        diag = diag.related("first declared here", first_span);
                    }
                    pending.push(diag);
                }
                None => {
                    by_name.insert(qualified.clone(), id);
                }
            }
        }

        // Public top-level types
        let stem = unit
            .path()
            .ends_with(".java")
            .then(|| unit.file_stem())
            .flatten();
        let mut first_public: Option<Span> = None;
        for decl in unit.top_level_types() {
            if !decl.is_public() {
                continue;
            }
            match first_public {
                Some(first) => pending.push(
                    Pending::new(DiagnosticKind::MultiplePublicTypes, decl.name_span, &decl.name)
                        .related("first public type", first),
                ),
                None => first_public = Some(decl.name_span),
            }
            if let Some(stem) = stem
                && stem != decl.name
            {
                pending.push(Pending::new(
                    DiagnosticKind::PublicTypeFileMismatch,
                    decl.name_span,
                    &decl.name,
                ));
            }
        }

        for diagnostic in pending {
            diagnostic.emit(unit);
        }
    }

    by_name
}

/// Resolved supertypes of one declaration plus what went wrong.
struct Resolution {
    superclass: Option<ResolvedRef>,
    interfaces: Vec<ResolvedRef>,
    diagnostics: Vec<Pending>,
}

/// Diagnostic collected while the units are borrowed immutably.
struct Pending {
    kind: DiagnosticKind,
    span: Span,
    detail: String,
    related: Option<(&'static str, Span)>,
}

impl Pending {
    fn new(kind: DiagnosticKind, span: Span, detail: &str) -> Self {
        Self {
            kind,
            span,
            detail: detail.to_owned(),
            related: None,
        }
    }

    fn related(mut self, message: &'static str, span: Span) -> Self {
        self.related = Some((message, span));
        self
    }

    fn emit(self, unit: &mut CompilationUnit) {
        let builder = unit
            .diagnostics_mut()
            .report(self.kind, range(self.span))
            .message(self.detail);
        match self.related {
            Some((message, span)) => builder.related_to(message, range(span)).emit(),
            None => builder.emit(),
        }
    }
}

impl Scope<'_> {
    fn resolve_supertypes(&self, id: TypeId) -> Resolution {
        let decl = self.decl(id);
        let mut diagnostics = Vec::new();

        let mut resolve_one = |reference: &TypeRef, expect_interface: bool| {
            let target = match self.lookup(id, &reference.name) {
                Some(found) => {
                    tracing::trace!(
                        from = %self.qualified_name(id),
                        reference = %reference.name,
                        to = %self.qualified_name(found),
                        "resolved"
                    );
                    let kind = self.decl(found).kind;
                    if expect_interface && !kind.is_interface_like() {
                        diagnostics.push(Pending::new(
                            DiagnosticKind::InvalidInterface,
                            reference.span,
                            &reference.name,
                        ));
                    } else if !expect_interface && kind != TypeKind::Class {
                        diagnostics.push(Pending::new(
                            DiagnosticKind::InvalidSuperclass,
                            reference.span,
                            &reference.name,
                        ));
                    }
                    Target::Declared(found)
                }
                None => {
                    tracing::trace!(
                        from = %self.qualified_name(id),
                        reference = %reference.name,
                        "external"
                    );
                    diagnostics.push(Pending::new(
                        DiagnosticKind::UnresolvedReference,
                        reference.span,
                        &reference.name,
                    ));
                    Target::External
                }
            };
            ResolvedRef {
                reference: reference.clone(),
                target,
            }
        };

        let superclass = decl.superclass.as_ref().map(|r| resolve_one(r, false));
        let interfaces = decl
            .interfaces
            .iter()
            .map(|r| resolve_one(r, true))
            .collect();

        Resolution {
            superclass,
            interfaces,
            diagnostics,
        }
    }
}
