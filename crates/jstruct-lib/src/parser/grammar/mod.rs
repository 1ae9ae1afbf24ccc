//! Grammar productions for Java compilation units.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! Only declaration structure is parsed: method bodies, initializers and
//! annotation arguments that are not literals are kept as flat token runs.

mod annotations;
mod items;
mod members;
mod types;
mod utils;
