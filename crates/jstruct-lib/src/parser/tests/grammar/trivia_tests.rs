use indoc::indoc;

use crate::test_utils::{cst, cst_with_trivia, parse_diagnostics, parse_ok};

#[test]
fn javadoc_precedes_declaration() {
    let input = "/** Doc */\npublic class A {}\n";

    insta::assert_snapshot!(cst_with_trivia(input), @r#"
    CompilationUnit
      Javadoc "/** Doc */"
      Whitespace "\n"
      ClassDecl
        Modifiers
          KwPublic "public"
        Whitespace " "
        KwClass "class"
        Whitespace " "
        Id "A"
        Whitespace " "
        ClassBody
          BraceOpen "{"
          BraceClose "}"
      Whitespace "\n"
    "#);
}

#[test]
fn comments_between_members() {
    let input = "class A {\n  // note\n  int x;\n}";

    insta::assert_snapshot!(cst_with_trivia(input), @r#"
    CompilationUnit
      ClassDecl
        Modifiers
        KwClass "class"
        Whitespace " "
        Id "A"
        Whitespace " "
        ClassBody
          BraceOpen "{"
          Whitespace "\n  "
          LineComment "// note"
          Whitespace "\n  "
          FieldDecl
            Modifiers
            TypeRef
              PrimitiveType "int"
            Whitespace " "
            VarDeclarator
              Id "x"
            Semicolon ";"
          Whitespace "\n"
          BraceClose "}"
    "#);
}

#[test]
fn lexer_garbage_is_stepped_over() {
    let input = "class A { int # x; }";

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
            VarDeclarator
              Id "x"
            Semicolon ";"
          BraceClose "}"
    "#);
    insta::assert_snapshot!(parse_diagnostics(input).to_string(), @"error at 14..15: unrecognized character");
}

#[test]
fn tree_is_lossless() {
    let input = indoc! {r#"
        package p; // trailing
        /* header */
        import a.*;

        /**
         * Docs.
         */
        @Ann(x = {1, 2}) public class A<T extends Comparable<T>> extends B implements C {
            private static final String S = "s" + 'c';
            A() { super(); }
            void m() throws E { if (a < b && c > d) { return; } }
            class Inner {}
        }
        garbage here
        interface I { int f(); }
    "#};

    let parsed = parse_ok(input);
    assert_eq!(parsed.root.as_cst().text().to_string(), input);
}
