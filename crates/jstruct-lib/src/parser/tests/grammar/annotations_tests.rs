use indoc::indoc;

use crate::test_utils::{cst, parse_diagnostics};

#[test]
fn marker_and_single_value() {
    let input = r#"@Deprecated @SuppressWarnings("unused") class A {}"#;

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
          Annotation
            At "@"
            Name
              Id "Deprecated"
          Annotation
            At "@"
            Name
              Id "SuppressWarnings"
            AnnotationArgs
              ParenOpen "("
              ElementValue
                StringLiteral "\"unused\""
              ParenClose ")"
        KwClass "class"
        Id "A"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn named_pairs() {
    let input = r#"@MyAnnotation(name = "test", value = 100) class A {}"#;

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
          Annotation
            At "@"
            Name
              Id "MyAnnotation"
            AnnotationArgs
              ParenOpen "("
              ElementValuePair
                Id "name"
                Equals "="
                ElementValue
                  StringLiteral "\"test\""
              Comma ","
              ElementValuePair
                Id "value"
                Equals "="
                ElementValue
                  IntLiteral "100"
              ParenClose ")"
        KwClass "class"
        Id "A"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn array_value_with_trailing_comma() {
    let input = r#"@SuppressWarnings({"unchecked", "rawtypes",}) class A {}"#;

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
          Annotation
            At "@"
            Name
              Id "SuppressWarnings"
            AnnotationArgs
              ParenOpen "("
              ElementArray
                BraceOpen "{"
                ElementValue
                  StringLiteral "\"unchecked\""
                Comma ","
                ElementValue
                  StringLiteral "\"rawtypes\""
                Comma ","
                BraceClose "}"
              ParenClose ")"
        KwClass "class"
        Id "A"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn qualified_name_and_nested_annotation() {
    let input = "@a.b.Outer(inner = @Inner(1), type = String.class) class A {}";

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
          Annotation
            At "@"
            Name
              Id "a"
              Dot "."
              Id "b"
              Dot "."
              Id "Outer"
            AnnotationArgs
              ParenOpen "("
              ElementValuePair
                Id "inner"
                Equals "="
                Annotation
                  At "@"
                  Name
                    Id "Inner"
                  AnnotationArgs
                    ParenOpen "("
                    ElementValue
                      IntLiteral "1"
                    ParenClose ")"
              Comma ","
              ElementValuePair
                Id "type"
                Equals "="
                ElementValue
                  Id "String"
                  Dot "."
                  KwClass "class"
              ParenClose ")"
        KwClass "class"
        Id "A"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn expression_value_is_flat() {
    let input = "@Timeout(60 * 1000) class A {}";

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
          Annotation
            At "@"
            Name
              Id "Timeout"
            AnnotationArgs
              ParenOpen "("
              ElementValue
                IntLiteral "60"
                Star "*"
                IntLiteral "1000"
              ParenClose ")"
        KwClass "class"
        Id "A"
        ClassBody
          BraceOpen "{"
          BraceClose "}"
    "#);
}

#[test]
fn annotations_mixed_with_modifiers() {
    let input = indoc! {"
        class A {
            @Override public @Nullable String toString() { return null; }
        }
    "};

    assert!(parse_diagnostics(input).is_empty());
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
              Annotation
                At "@"
                Name
                  Id "Override"
              KwPublic "public"
              Annotation
                At "@"
                Name
                  Id "Nullable"
            TypeRef
              Id "String"
            Id "toString"
            ParamList
              ParenOpen "("
              ParenClose ")"
            Block
              BraceOpen "{"
              KwStatement "return"
              KwNull "null"
              Semicolon ";"
              BraceClose "}"
          BraceClose "}"
    "#);
}

#[test]
fn parameter_annotation() {
    let input = "class A { void m(@Named(\"x\") final String s) {} }";

    assert!(parse_diagnostics(input).is_empty());
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
            TypeRef
              KwVoid "void"
            Id "m"
            ParamList
              ParenOpen "("
              Param
                Modifiers
                  Annotation
                    At "@"
                    Name
                      Id "Named"
                    AnnotationArgs
                      ParenOpen "("
                      ElementValue
                        StringLiteral "\"x\""
                      ParenClose ")"
                  KwFinal "final"
                TypeRef
                  Id "String"
                Id "s"
              ParenClose ")"
            Block
              BraceOpen "{"
              BraceClose "}"
          BraceClose "}"
    "#);
}

#[test]
fn annotated_package() {
    let input = "@Generated package a;";

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      PackageDecl
        Modifiers
          Annotation
            At "@"
            Name
              Id "Generated"
        KwPackage "package"
        Name
          Id "a"
        Semicolon ";"
    "#);
}
