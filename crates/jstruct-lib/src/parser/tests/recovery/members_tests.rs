use indoc::indoc;

use crate::diagnostics::DiagnosticKind;
use crate::test_utils::{cst, parse_diagnostics};

#[test]
fn field_without_name() {
    let input = indoc! {"
        class A {
            int = 5;
            void ok() {}
        }
    "};

    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
        KwClass "class"
        Id "A"
        ClassBody
          BraceOpen "{"
          FieldDecl
            Modifiers
            TypeRef
              PrimitiveType "int"
            Error
              Equals "="
              IntLiteral "5"
              Semicolon ";"
          MethodDecl
            Modifiers
            TypeRef
              KwVoid "void"
            Id "ok"
            ParamList
              ParenOpen "("
              ParenClose ")"
            Block
              BraceOpen "{"
              BraceClose "}"
          BraceClose "}"
    "#);
    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 18..19: expected an identifier: member name");
}

#[test]
fn garbage_member_is_skipped_through_braces() {
    let input = "class A { ) junk { x; } int y; }";

    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
        KwClass "class"
        Id "A"
        ClassBody
          BraceOpen "{"
          Error
            ParenClose ")"
            Id "junk"
            BraceOpen "{"
            Id "x"
            Semicolon ";"
            BraceClose "}"
          FieldDecl
            Modifiers
            TypeRef
              PrimitiveType "int"
            VarDeclarator
              Id "y"
            Semicolon ";"
          BraceClose "}"
    "#);
    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 10..11: expected a member declaration");
}

#[test]
fn dangling_modifiers_before_close() {
    let input = "class A { public }";

    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 17..18: expected a member declaration");
}

#[test]
fn method_without_return_type() {
    let input = "class A { foo() {} }";

    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
        KwClass "class"
        Id "A"
        ClassBody
          BraceOpen "{"
          MethodDecl
            Modifiers
            Id "foo"
            ParamList
              ParenOpen "("
              ParenClose ")"
            Block
              BraceOpen "{"
              BraceClose "}"
          BraceClose "}"
    "#);
    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 10..13: method is missing a return type: `foo`");
}

#[test]
fn default_on_class_method() {
    let input = "class A { int f() default 1; }";

    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 18..25: `default` value is only allowed on annotation elements");
}

#[test]
fn missing_semicolon_after_field() {
    let input = "class A { int x\n int y; }";

    let diagnostics = parse_diagnostics(input);
    insta::assert_snapshot!(diagnostics.to_string(), @"error at 17..20: expected `;`");
    assert!(cst(input).contains("Id \"y\""));
}

#[test]
fn missing_method_body() {
    let input = "class A { void f() int x; }";

    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 19..22: unexpected token: expected method body or `;`");
    assert!(cst(input).contains("Id \"x\""));
}

#[test]
fn unclosed_parameter_list() {
    let input = "class A { void f(int a { } int b; }";

    let diagnostics = parse_diagnostics(input);
    insta::assert_snapshot!(diagnostics.to_string(), @"error at 23..24: unexpected token: expected `)` after parameters");
    assert!(cst(input).contains("Id \"b\""));
}

#[test]
fn unclosed_method_body() {
    let input = "class A {\n  void f() {\n    g();\n";

    let diagnostics = parse_diagnostics(input);
    assert_eq!(diagnostics.len(), 1);
    insta::assert_snapshot!(diagnostics.to_string(), @"error at 21..32: missing closing `}`; expected `}` before end of file (related: block opened here at 21..22)");
}

#[test]
fn unclosed_annotation_arguments() {
    let input = "@A(x = 1 class B {}";

    let diagnostics = parse_diagnostics(input);
    assert!(diagnostics.contains_kind(DiagnosticKind::UnexpectedToken));
    assert!(cst(input).contains("ClassDecl"));
}

#[test]
fn empty_annotation_value() {
    let input = "@A(x = ) class B {}";

    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 7..8: expected an annotation value");
}
