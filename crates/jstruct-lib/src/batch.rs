//! Batch driver: ingestion, parallel parsing and the resolution barrier.
//!
//! Each file is lexed, parsed and lowered independently; a file that runs out
//! of fuel, hits its deadline or is cancelled becomes an empty unit with a
//! `ParseAborted` diagnostic and never affects the other files. Resolution
//! starts only after every file of the batch has been ingested.

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, debug_span, warn};

use crate::config::Config;
use crate::lower::CompilationUnit;
use crate::model::StructuralModel;
use crate::parser::Parser;
use crate::parser::lexer::lex;
use crate::resolve::resolve;
use crate::{Error, Result};

/// Parses one file with default limits.
pub fn ingest(path: impl Into<String>, source: impl Into<String>) -> CompilationUnit {
    ingest_with(&Config::default(), path, source)
}

/// Parses one file. Never fails: problems end up in the unit's diagnostics.
pub fn ingest_with(
    config: &Config,
    path: impl Into<String>,
    source: impl Into<String>,
) -> CompilationUnit {
    let path = path.into();
    let source = source.into();
    let _span = debug_span!("ingest", path = %path, bytes = source.len()).entered();

    let lexed = lex(&source, config.max_lex_errors);
    let token_count = lexed.tokens.len();
    let parsed = Parser::new(&source, lexed.tokens).with_config(config).parse();

    match parsed {
        Ok(mut parsed) => {
            let mut diagnostics = lexed.diagnostics;
            diagnostics.extend(parsed.diagnostics);
            parsed.diagnostics = diagnostics;
            let fuel = parsed.exec_fuel_consumed;
            let unit = CompilationUnit::from_parse(path, source, parsed);
            debug!(
                tokens = token_count,
                fuel,
                types = unit.decls().len(),
                diagnostics = unit.diagnostics().len(),
                "parsed"
            );
            unit
        }
        Err(err) => {
            warn!(path = %path, error = %err, "parse aborted");
            CompilationUnit::aborted(path, source, lexed.diagnostics, &err)
        }
    }
}

/// Collects sources, then parses them all.
///
/// ```
/// use jstruct_lib::{Batch, Config};
///
/// let model = Batch::new(Config::default())
///     .add_source("A.java", "class A extends B {}")
///     .add_source("B.java", "class B {}")
///     .parse()
///     .resolve();
///
/// let a = model.find_type("A").unwrap();
/// let b = model.find_type("B").unwrap();
/// assert_eq!(model.get_superclass(a).and_then(|r| r.declared()), Some(b));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Batch {
    config: Config,
    sources: Vec<(String, String)>,
}

impl Batch {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            sources: Vec::new(),
        }
    }

    pub fn add_source(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.sources.push((path.into(), source.into()));
        self
    }

    /// Reads a UTF-8 source file from disk.
    pub fn add_file(self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8 {
            path: path.to_path_buf(),
        })?;
        Ok(self.add_source(path.to_string_lossy(), text))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Ingests every source, on the rayon pool when the config allows it.
    /// Units keep the order in which sources were added.
    pub fn parse(self) -> ParsedBatch {
        let _span = debug_span!("parse_batch", files = self.sources.len()).entered();
        let config = &self.config;

        let units: Vec<CompilationUnit> = if config.parallel {
            self.sources
                .into_par_iter()
                .map(|(path, source)| ingest_with(config, path, source))
                .collect()
        } else {
            self.sources
                .into_iter()
                .map(|(path, source)| ingest_with(config, path, source))
                .collect()
        };

        ParsedBatch { units }
    }
}

/// Every file of a batch parsed, not yet resolved.
#[derive(Debug, Clone)]
pub struct ParsedBatch {
    units: Vec<CompilationUnit>,
}

impl ParsedBatch {
    pub fn units(&self) -> &[CompilationUnit] {
        &self.units
    }

    pub fn into_units(self) -> Vec<CompilationUnit> {
        self.units
    }

    pub fn resolve(self) -> StructuralModel {
        resolve(self.units)
    }
}
