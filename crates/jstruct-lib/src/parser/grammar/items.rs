use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::SyntaxKind;
use crate::parser::cst::token_sets::ROOT_RECOVERY;

impl Parser<'_> {
    pub fn parse_compilation_unit(&mut self) {
        self.start_node(SyntaxKind::CompilationUnit);

        while !self.at_end() {
            match self.current() {
                SyntaxKind::KwImport => self.parse_import_decl(),
                SyntaxKind::Semicolon => self.bump(),
                _ if self.currently_is(SyntaxKind::KwPackage) || self.at_declaration_start() => {
                    self.parse_top_level_item();
                }
                _ => self.recover_to_declaration(),
            }
        }

        self.eat_trivia();
        self.finish_node();
    }

    /// `[modifiers] package a.b;` or `[modifiers] class ...`
    fn parse_top_level_item(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_modifiers();

        if self.currently_is(SyntaxKind::KwPackage) {
            self.start_node_at(checkpoint, SyntaxKind::PackageDecl);
            self.bump();
            self.parse_qualified_name();
            self.expect_semicolon();
            self.finish_node();
            return;
        }

        if self.at_type_decl_start() {
            self.parse_type_decl(checkpoint);
            return;
        }

        if !self.at_end() {
            self.recover_to_declaration();
        } else {
            self.error(DiagnosticKind::ExpectedTypeDeclaration);
        }
    }

    /// `import [static] a.b.C;` | `import a.b.*;`
    fn parse_import_decl(&mut self) {
        self.assert_current(SyntaxKind::KwImport);
        self.start_node(SyntaxKind::ImportDecl);
        self.bump();
        self.eat_token(SyntaxKind::KwStatic);
        self.parse_qualified_name();
        if self.currently_is(SyntaxKind::Dot) && self.next_is(SyntaxKind::Star) {
            self.bump();
            self.bump();
        }
        self.expect_semicolon();
        self.finish_node();
    }

    /// Wraps tokens up to the next plausible declaration start in an `Error` node.
    /// Always consumes at least one token.
    fn recover_to_declaration(&mut self) {
        self.start_node(SyntaxKind::Error);
        self.error(DiagnosticKind::ExpectedTypeDeclaration);
        loop {
            if self.currently_is(SyntaxKind::BraceOpen) {
                self.skip_balanced_braces();
                break;
            }
            self.bump();
            if self.at_end()
                || self.currently_is_one_of(ROOT_RECOVERY)
                || self.at_declaration_start()
            {
                break;
            }
        }
        self.finish_node();
    }
}
