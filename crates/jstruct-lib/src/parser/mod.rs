//! Parser infrastructure for Java compilation units.
//!
//! # Architecture
//!
//! This parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder.
//! Key design decisions borrowed from rust-analyzer, rnix-parser, and taplo:
//!
//! - Zero-copy parsing: tokens carry spans, text sliced only when building tree nodes
//! - Trivia buffering: whitespace/comments collected, then attached as leading trivia
//! - Checkpoint-based wrapping: modifiers are parsed before the declaration kind is known
//! - Explicit recovery sets: per-production sets determine when to bail vs consume diagnostics
//!
//! Only declaration structure is modelled. Method bodies and field initializers are
//! kept as flat token runs so the parser never needs an expression grammar.
//!
//! # Recovery Strategy
//!
//! The parser is resilient: it always produces a tree. Recovery follows these rules:
//!
//! 1. Unknown tokens get wrapped in `SyntaxKind::Error` nodes and consumed
//! 2. Missing expected tokens emit a diagnostic but don't consume (parent may handle)
//! 3. Recovery sets define "synchronization points" per production
//! 4. A malformed member is skipped through its `;` or `{...}` group
//!
//! Fuel exhaustion, recursion limit, deadline and cancellation return an error instead.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod tests;

pub use cst::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use core::{ParseResult, Parser};

use std::fmt::Write;

use crate::{Config, Error};
use lexer::lex;

/// Lexes and parses `source` with the limits in `config`.
///
/// Lexer diagnostics come first in the result, followed by parser diagnostics.
pub fn parse(source: &str, config: &Config) -> Result<ParseResult, Error> {
    let lexed = lex(source, config.max_lex_errors);
    let mut result = Parser::new(source, lexed.tokens)
        .with_config(config)
        .parse()?;
    let mut diagnostics = lexed.diagnostics;
    diagnostics.extend(result.diagnostics);
    result.diagnostics = diagnostics;
    Ok(result)
}

/// Indented tree dump: one node or token per line.
pub fn dump_cst(node: &SyntaxNode, include_trivia: bool) -> String {
    let mut out = String::new();
    dump_node(node, 0, include_trivia, &mut out);
    out
}

fn dump_node(node: &SyntaxNode, depth: usize, include_trivia: bool, out: &mut String) {
    let _ = writeln!(out, "{:indent$}{:?}", "", node.kind(), indent = depth * 2);
    for element in node.children_with_tokens() {
        match element {
            rowan::NodeOrToken::Node(child) => dump_node(&child, depth + 1, include_trivia, out),
            rowan::NodeOrToken::Token(token) => {
                if !include_trivia && token.kind().is_trivia() {
                    continue;
                }
                let _ = writeln!(
                    out,
                    "{:indent$}{:?} {:?}",
                    "",
                    token.kind(),
                    token.text(),
                    indent = (depth + 1) * 2
                );
            }
        }
    }
}
