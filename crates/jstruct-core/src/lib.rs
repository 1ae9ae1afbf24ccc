#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Declaration model for Java compilation units.
//!
//! Plain data only: no parsing, no resolution. The pipeline in `jstruct-lib`
//! produces these values and the structural model borrows them for queries.
//!
//! Declarations of one file live in a per-file arena ([`DeclIndex`]);
//! a [`TypeDeclaration`] refers to its nested types by index, never by pointer.

mod annotation;
mod decl;
mod modifiers;


pub use annotation::{AnnotationArg, AnnotationUsage, AnnotationValue};
pub use decl::{
    Import, Member, MemberKind, NestingKind, Param, TypeDeclaration, TypeKind, TypeRef,
};
pub use modifiers::{Modifier, Modifiers};

use serde::{Deserialize, Serialize};

// ============================================================================
// Positions
// ============================================================================

/// Half-open byte range `[start, end)` into a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` falls inside the span.
    pub fn contains(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end
    }

    pub fn covers(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

// ============================================================================
// Arena indices
// ============================================================================

/// Position of a [`TypeDeclaration`] in its compilation unit's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclIndex(u32);

impl DeclIndex {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn from_usize(index: usize) -> Self {
        Self(u32::try_from(index).expect("declaration arena exceeds u32::MAX entries"))
    }

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

// ============================================================================
// Javadoc
// ============================================================================

/// Strips the `/**`, `*/` delimiters and the leading `*` gutter of a javadoc block.
///
/// Blank leading and trailing lines are dropped; interior blank lines are kept.
pub fn javadoc_text(raw: &str) -> String {
    let inner = raw.strip_prefix("/**").unwrap_or(raw);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);

    let lines: Vec<&str> = inner
        .lines()
        .map(|line| {
            let line = line.trim();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line).trim_end()
        })
        .collect();

    let first = lines.iter().position(|l| !l.is_empty());
    let last = lines.iter().rposition(|l| !l.is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}
