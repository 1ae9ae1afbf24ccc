//! jstruct: structural extraction for Java source.
//!
//! Parses Java compilation units into a declaration model (types, members,
//! annotations, inheritance and nesting), resolves references across a batch
//! of files and answers read-only queries over the result.
//!
//! # Example
//!
//! ```
//! use jstruct_lib::{ingest, resolve};
//!
//! let source = r#"
//!     package demo;
//!
//!     public class Outer {
//!         class Inner {}
//!     }
//! "#;
//!
//! let unit = ingest("Outer.java", source);
//! let model = resolve(vec![unit]);
//!
//! let outer = model.find_type("demo.Outer").expect("declared above");
//! let inner = model.get_nested_types(outer).next().expect("one nested type");
//! assert!(!model.is_static(inner));
//! assert_eq!(model.get_enclosing_chain(inner).collect::<Vec<_>>(), vec![outer]);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod batch;
pub mod config;
pub mod diagnostics;
pub mod lower;
pub mod model;
pub mod parser;
pub mod resolve;

#[cfg(test)]
mod test_utils;

use std::path::PathBuf;

pub use batch::{Batch, ParsedBatch, ingest, ingest_with};
pub use config::Config;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use lower::CompilationUnit;
pub use model::{
    DeclRef, EnclosingChain, NestingEdge, ResolvedRef, StructuralModel, Target, TypeId, UnitId,
};
pub use resolve::resolve;

pub use jstruct_core::{
    AnnotationArg, AnnotationUsage, AnnotationValue, DeclIndex, Import, Member, MemberKind,
    Modifier, Modifiers, NestingKind, Param, Span, TypeDeclaration, TypeKind, TypeRef,
};

/// Errors that stop processing of a file or a batch.
///
/// Everything recoverable is a [`Diagnostic`] instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Execution fuel exhausted (too many parser operations).
    #[error("execution limit exceeded")]
    ExecFuelExhausted,

    /// Recursion fuel exhausted (declarations nested too deeply).
    #[error("recursion limit exceeded")]
    RecursionLimitExceeded,

    #[error("parse deadline exceeded")]
    Timeout,

    #[error("parse cancelled")]
    Cancelled,

    #[error("failed to read `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{}` is not valid UTF-8", path.display())]
    InvalidUtf8 { path: PathBuf },

    /// Strict mode found error-severity diagnostics.
    #[error("structural model has {} errors", .0.error_count())]
    Diagnostics(Diagnostics),
}

/// Result type for jstruct operations.
pub type Result<T> = std::result::Result<T, Error>;
