use indoc::indoc;

use crate::test_utils::{cst, parse_diagnostics};

#[test]
fn field_declarators() {
    let input = "class A { private int x = 1, y[]; }";

    assert!(parse_diagnostics(input).is_empty());
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
              KwPrivate "private"
            TypeRef
              PrimitiveType "int"
            VarDeclarator
              Id "x"
              VarInit
                Equals "="
                IntLiteral "1"
            Comma ","
            VarDeclarator
              Id "y"
              BracketOpen "["
              BracketClose "]"
            Semicolon ";"
          BraceClose "}"
    "#);
}

#[test]
fn field_initializer_with_generics_and_commas() {
    let input = "class A { Map<K, V> m = new HashMap<K, V>(f(a, b)), n; }";

    assert!(parse_diagnostics(input).is_empty());
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
              Id "Map"
              TypeArgs
                Lt "<"
                Id "K"
                Comma ","
                Id "V"
                Gt ">"
            VarDeclarator
              Id "m"
              VarInit
                Equals "="
                KwNew "new"
                Id "HashMap"
                TypeArgs
                  Lt "<"
                  Id "K"
                  Comma ","
                  Id "V"
                  Gt ">"
                ParenOpen "("
                Id "f"
                ParenOpen "("
                Id "a"
                Comma ","
                Id "b"
                ParenClose ")"
                ParenClose ")"
            Comma ","
            VarDeclarator
              Id "n"
            Semicolon ";"
          BraceClose "}"
    "#);
}

#[test]
fn field_initializer_comparison() {
    let input = "class A { boolean b = x < y, c = p > q; }";

    assert!(parse_diagnostics(input).is_empty());
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
              PrimitiveType "boolean"
            VarDeclarator
              Id "b"
              VarInit
                Equals "="
                Id "x"
                Lt "<"
                Id "y"
            Comma ","
            VarDeclarator
              Id "c"
              VarInit
                Equals "="
                Id "p"
                Gt ">"
                Id "q"
            Semicolon ";"
          BraceClose "}"
    "#);
}

#[test]
fn constructor() {
    let input = "class A { A(String s) throws E {} }";

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
        KwClass "class"
        Id "A"
        ClassBody
          BraceOpen "{"
          ConstructorDecl
            Modifiers
            Id "A"
            ParamList
              ParenOpen "("
              Param
                Modifiers
                TypeRef
                  Id "String"
                Id "s"
              ParenClose ")"
            ThrowsClause
              KwThrows "throws"
              TypeRef
                Id "E"
            Block
              BraceOpen "{"
              BraceClose "}"
          BraceClose "}"
    "#);
}

#[test]
fn abstract_method() {
    let input = "abstract class A { abstract void run(); }";

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
          KwAbstract "abstract"
        KwClass "class"
        Id "A"
        ClassBody
          BraceOpen "{"
          MethodDecl
            Modifiers
              KwAbstract "abstract"
            TypeRef
              KwVoid "void"
            Id "run"
            ParamList
              ParenOpen "("
              ParenClose ")"
            Semicolon ";"
          BraceClose "}"
    "#);
}

#[test]
fn generic_method_with_varargs_and_body() {
    let input = "class A { <T> T get(final int... xs) { return null; } }";

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
            TypeParams
              Lt "<"
              Id "T"
              Gt ">"
            TypeRef
              Id "T"
            Id "get"
            ParamList
              ParenOpen "("
              Param
                Modifiers
                  KwFinal "final"
                TypeRef
                  PrimitiveType "int"
                Ellipsis "..."
                Id "xs"
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
fn receiver_parameter() {
    let input = "class A { void m(A this, int x) {} }";

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
                TypeRef
                  Id "A"
                KwThis "this"
              Comma ","
              Param
                Modifiers
                TypeRef
                  PrimitiveType "int"
                Id "x"
              ParenClose ")"
            Block
              BraceOpen "{"
              BraceClose "}"
          BraceClose "}"
    "#);
}

#[test]
fn nested_braces_in_body() {
    let input = indoc! {"
        class A {
            void f() { if (x) { g(); } else { h(); } }
            int after;
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
            TypeRef
              KwVoid "void"
            Id "f"
            ParamList
              ParenOpen "("
              ParenClose ")"
            Block
              BraceOpen "{"
              KwStatement "if"
              ParenOpen "("
              Id "x"
              ParenClose ")"
              BraceOpen "{"
              Id "g"
              ParenOpen "("
              ParenClose ")"
              Semicolon ";"
              BraceClose "}"
              KwStatement "else"
              BraceOpen "{"
              Id "h"
              ParenOpen "("
              ParenClose ")"
              Semicolon ";"
              BraceClose "}"
              BraceClose "}"
          FieldDecl
            Modifiers
            TypeRef
              PrimitiveType "int"
            VarDeclarator
              Id "after"
            Semicolon ";"
          BraceClose "}"
    "#);
}

#[test]
fn initializer_blocks() {
    let input = "class A { static { init(); } { } }";

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
        KwClass "class"
        Id "A"
        ClassBody
          BraceOpen "{"
          InitializerBlock
            Modifiers
              KwStatic "static"
            Block
              BraceOpen "{"
              Id "init"
              ParenOpen "("
              ParenClose ")"
              Semicolon ";"
              BraceClose "}"
          InitializerBlock
            Modifiers
            Block
              BraceOpen "{"
              BraceClose "}"
          BraceClose "}"
    "#);
}

#[test]
fn interface_default_and_static_methods() {
    let input = indoc! {"
        interface I {
            int LIMIT = 10;
            void m();
            default void d() {}
            static I of() { return null; }
        }
    "};

    assert!(parse_diagnostics(input).is_empty());
    insta::assert_snapshot!(cst(input), @r#"
    CompilationUnit
      InterfaceDecl
        Modifiers
        KwInterface "interface"
        Id "I"
        ClassBody
          BraceOpen "{"
          FieldDecl
            Modifiers
            TypeRef
              PrimitiveType "int"
            VarDeclarator
              Id "LIMIT"
              VarInit
                Equals "="
                IntLiteral "10"
            Semicolon ";"
          MethodDecl
            Modifiers
            TypeRef
              KwVoid "void"
            Id "m"
            ParamList
              ParenOpen "("
              ParenClose ")"
            Semicolon ";"
          MethodDecl
            Modifiers
              KwDefault "default"
            TypeRef
              KwVoid "void"
            Id "d"
            ParamList
              ParenOpen "("
              ParenClose ")"
            Block
              BraceOpen "{"
              BraceClose "}"
          MethodDecl
            Modifiers
              KwStatic "static"
            TypeRef
              Id "I"
            Id "of"
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
fn qualified_generic_field_type() {
    let input = "class A { java.util.Map.Entry<String, int[]>[] entries; }";

    assert!(parse_diagnostics(input).is_empty());
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
              Id "java"
              Dot "."
              Id "util"
              Dot "."
              Id "Map"
              Dot "."
              Id "Entry"
              TypeArgs
                Lt "<"
                Id "String"
                Comma ","
                PrimitiveType "int"
                BracketOpen "["
                BracketClose "]"
                Gt ">"
              BracketOpen "["
              BracketClose "]"
            VarDeclarator
              Id "entries"
            Semicolon ";"
          BraceClose "}"
    "#);
}
