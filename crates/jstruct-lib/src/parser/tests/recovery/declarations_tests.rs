use indoc::indoc;

use crate::diagnostics::DiagnosticKind;
use crate::test_utils::{cst, parse_diagnostics};

#[test]
fn stray_tokens_before_class() {
    let input = "foo bar;\nclass A {}";

    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      Error
        Id "foo"
        Id "bar"
      Semicolon ";"
      ClassDecl
        Modifiers
        KwClass "class"
        Id "A"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 0..3: expected a type declaration");
}

#[test]
fn stray_block_is_skipped_whole() {
    let input = "x { class Hidden {} }\nclass A {}";

    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      Error
        Id "x"
        BraceOpen "{"
        KwClass "class"
        Id "Hidden"
        BraceOpen "{"
        BraceClose "}"
        BraceClose "}"
      ClassDecl
        Modifiers
        KwClass "class"
        Id "A"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn missing_class_name() {
    let input = "class {}";

    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
        KwClass "class"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 6..7: expected an identifier: name after `class`");
}

#[test]
fn missing_body() {
    let input = "class A extends B\nclass C {}";

    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 18..23: expected `{`: class body");
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
        KwClass "class"
        Id "A"
        ExtendsClause
          KwExtends "extends"
          TypeRef
            Id "B"
      ClassDecl
        Modifiers
        KwClass "class"
        Id "C"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn modifiers_without_declaration_at_eof() {
    let input = "class A {}\npublic static";

    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 24..24: expected a type declaration");
}

#[test]
fn class_extends_two_classes() {
    let input = "class A extends B, C {}";

    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 19..20: a class cannot extend more than one class (hint: a class can extend one class; use `implements` for interfaces)");
}

#[test]
fn interface_implements() {
    let input = "interface I implements J {}";

    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 12..22: `implements` is not allowed here: on interface (hint: interfaces inherit with `extends`)");
}

#[test]
fn annotation_type_extends() {
    let input = "@interface A extends B {}";

    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 13..20: `extends` is not allowed here: annotation types cannot inherit");
}

#[test]
fn extends_without_type() {
    let input = "class A extends {}";

    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 16..17: expected a type name: after `extends`");
}

#[test]
fn duplicate_modifier() {
    let input = "public public class A {}";

    let diagnostics = parse_diagnostics(input);
    insta::assert_snapshot!(diagnostics.to_string(), @"warning at 7..13: repeated modifier `public`");
    assert!(!diagnostics.has_errors());
}

#[test]
fn unclosed_type_parameters() {
    let input = "class A<T {}";

    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 7..8: unexpected token: unclosed `<`");
}

#[test]
fn unclosed_class_body() {
    let input = "class A {\n  void f() {}\n";

    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 8..24: missing closing `}`; expected `}` before end of file (related: class body opened here at 8..9)");
}

#[test]
fn later_declarations_survive_broken_one() {
    let input = indoc! {"
        class Broken extends {
            int = ;
        }
        class Fine {}
        interface AlsoFine {}
    "};

    let diagnostics = parse_diagnostics(input);
    assert!(diagnostics.contains_kind(DiagnosticKind::ExpectedTypeName));
    assert!(diagnostics.contains_kind(DiagnosticKind::ExpectedIdentifier));

    let tree = cst(input);
    assert!(tree.contains("Id \"Fine\""));
    assert!(tree.contains("Id \"AlsoFine\""));
}
