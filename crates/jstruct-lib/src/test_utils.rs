use crate::diagnostics::Diagnostics;
use crate::parser::{ParseResult, dump_cst, parse};
use crate::{CompilationUnit, Config, StructuralModel, TypeId, ingest, resolve};

pub fn parse_ok(source: &str) -> ParseResult {
    parse(source, &Config::default()).expect("default limits are enough for test input")
}

/// CST without trivia.
pub fn cst(source: &str) -> String {
    dump_cst(parse_ok(source).root.as_cst(), false)
}

pub fn cst_with_trivia(source: &str) -> String {
    dump_cst(parse_ok(source).root.as_cst(), true)
}

pub fn parse_diagnostics(source: &str) -> Diagnostics {
    parse_ok(source).diagnostics
}

/// One line per diagnostic.
pub fn diagnostics_text(diagnostics: &Diagnostics) -> String {
    diagnostics.to_string()
}

pub fn unit(source: &str) -> CompilationUnit {
    ingest("Test.java", source)
}

pub fn model(files: &[(&str, &str)]) -> StructuralModel {
    resolve(
        files
            .iter()
            .map(|(path, source)| ingest(*path, *source))
            .collect(),
    )
}

pub fn find(model: &StructuralModel, qualified_name: &str) -> TypeId {
    model
        .find_type(qualified_name)
        .unwrap_or_else(|| panic!("type `{qualified_name}` not in model"))
}

pub fn names(model: &StructuralModel, ids: impl IntoIterator<Item = TypeId>) -> Vec<String> {
    ids.into_iter()
        .map(|id| model.decl(id).name.clone())
        .collect()
}
