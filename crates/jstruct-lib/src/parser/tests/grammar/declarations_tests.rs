use indoc::indoc;

use crate::test_utils::{cst, parse_diagnostics};

#[test]
fn empty_input() {
    insta::assert_snapshot!(cst(""), @"CompilationUnit");
}

#[test]
fn package_and_imports() {
    let input = indoc! {"
        package a.b;
        import java.util.List;
        import static x.Y.z;
        import p.*;
    "};

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      PackageDecl
        Modifiers
        KwPackage "package"
        Name
          Id "a"
          Dot "."
          Id "b"
        Semicolon ";"
      ImportDecl
        KwImport "import"
        Name
          Id "java"
          Dot "."
          Id "util"
          Dot "."
          Id "List"
        Semicolon ";"
      ImportDecl
        KwImport "import"
        KwStatic "static"
        Name
          Id "x"
          Dot "."
          Id "Y"
          Dot "."
          Id "z"
        Semicolon ";"
      ImportDecl
        KwImport "import"
        Name
          Id "p"
        Dot "."
        Star "*"
        Semicolon ";"
    "#);
}

#[test]
fn class_header() {
    let input = "public class Foo<T> extends Bar<T> implements A, b.C {}";

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
          KwPublic "public"
        KwClass "class"
        Id "Foo"
        TypeParams
          Lt "<"
          Id "T"
          Gt ">"
        ExtendsClause
          KwExtends "extends"
          TypeRef
            Id "Bar"
            TypeArgs
              Lt "<"
              Id "T"
              Gt ">"
        ImplementsClause
          KwImplements "implements"
          TypeRef
            Id "A"
          Comma ","
          TypeRef
            Id "b"
            Dot "."
            Id "C"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn interface_extends_many() {
    let input = "interface I extends J, K<String> {}";

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      InterfaceDecl
        Modifiers
        KwInterface "interface"
        Id "I"
        ExtendsClause
          KwExtends "extends"
          TypeRef
            Id "J"
          Comma ","
          TypeRef
            Id "K"
            TypeArgs
              Lt "<"
              Id "String"
              Gt ">"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn annotation_type() {
    let input = indoc! {r#"
        @interface Meta {
            String name() default "x";
            int[] values();
        }
    "#};

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      AnnotationTypeDecl
        Modifiers
        At "@"
        KwInterface "interface"
        Id "Meta"
        ClassBody
          BraceOpen "{"
          ElementDecl
            Modifiers
            TypeRef
              Id "String"
            Id "name"
            ParamList
              ParenOpen "("
              ParenClose ")"
            DefaultValue
              KwDefault "default"
              ElementValue
                StringLiteral "\"x\""
            Semicolon ";"
          ElementDecl
            Modifiers
            TypeRef
              PrimitiveType "int"
              BracketOpen "["
              BracketClose "]"
            Id "values"
            ParamList
              ParenOpen "("
              ParenClose ")"
            Semicolon ";"
          BraceClose "}"
    "#);
}

#[test]
fn sealed_interface_with_permits() {
    let input = "public sealed interface Shape permits Circle, Square {}";

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      InterfaceDecl
        Modifiers
          KwPublic "public"
          Id "sealed"
        KwInterface "interface"
        Id "Shape"
        PermitsClause
          Id "permits"
          TypeRef
            Id "Circle"
          Comma ","
          TypeRef
            Id "Square"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn non_sealed_class() {
    let input = "non-sealed class A extends S {}";

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
          Id "non"
          Minus "-"
          Id "sealed"
        KwClass "class"
        Id "A"
        ExtendsClause
          KwExtends "extends"
          TypeRef
            Id "S"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn nested_types() {
    let input = indoc! {"
        class Outer {
            static class Nested {}
            interface Callback {}
            class Inner {}
        }
    "};

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
        KwClass "class"
        Id "Outer"
        ClassBody
          BraceOpen "{"
          ClassDecl
            Modifiers
              KwStatic "static"
            KwClass "class"
            Id "Nested"
            ClassBody
              BraceOpen "{"
              BraceClose "}"
          InterfaceDecl
            Modifiers
            KwInterface "interface"
            Id "Callback"
            ClassBody
              BraceOpen "{"
              BraceClose "}"
          ClassDecl
            Modifiers
            KwClass "class"
            Id "Inner"
            ClassBody
              BraceOpen "{"
              BraceClose "}"
          BraceClose "}"
    "#);
}

#[test]
fn multiple_top_level_types() {
    let input = indoc! {"
        public class A {}
        class B {}
        ;
        interface C {}
    "};

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
          KwPublic "public"
        KwClass "class"
        Id "A"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
      ClassDecl
        Modifiers
        KwClass "class"
        Id "B"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
      Semicolon ";"
      InterfaceDecl
        Modifiers
        KwInterface "interface"
        Id "C"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn enum_is_skipped() {
    let input = indoc! {"
        enum Color { RED, GREEN }
        class A {}
    "};

    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      UnsupportedDecl
        Modifiers
        KwEnum "enum"
        Id "Color"
        BraceOpen "{"
        Id "RED"
        Comma ","
        Id "GREEN"
        BraceClose "}"
      ClassDecl
        Modifiers
        KwClass "class"
        Id "A"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 0..4: `enum` declarations are not supported (hint: the declaration is skipped)");
}

#[test]
fn record_is_skipped() {
    let input = "public record Point(int x, int y) { Point {} }";

    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      UnsupportedDecl
        Modifiers
          KwPublic "public"
        Id "record"
        Id "Point"
        ParenOpen "("
        PrimitiveType "int"
        Id "x"
        Comma ","
        PrimitiveType "int"
        Id "y"
        ParenClose ")"
        BraceOpen "{"
        Id "Point"
        BraceOpen "{"
        BraceClose "}"
        BraceClose "}"
    "#);
    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 7..13: `record` declarations are not supported (hint: the declaration is skipped)");
}

#[test]
fn record_as_identifier_is_not_a_declaration() {
    let input = "class record {}";

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
        KwClass "class"
        Id "record"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
}
