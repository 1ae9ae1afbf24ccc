use jstruct_core::TypeKind;
use rowan::{Checkpoint, TextRange};

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::{SyntaxKind, TokenSet};
use crate::parser::cst::token_sets::{DECL_START, HEADER_RECOVERY};

impl Parser<'_> {
    /// Type declaration whose modifiers are already parsed after `checkpoint`.
    ///
    /// `class` | `interface` | `@interface` declarations are parsed in full;
    /// `enum` and `record` are reported and skipped as `UnsupportedDecl`.
    pub(super) fn parse_type_decl(&mut self, checkpoint: Checkpoint) {
        let (node_kind, type_kind) = match self.current() {
            SyntaxKind::KwClass => (SyntaxKind::ClassDecl, TypeKind::Class),
            SyntaxKind::KwInterface => (SyntaxKind::InterfaceDecl, TypeKind::Interface),
            SyntaxKind::At => (SyntaxKind::AnnotationTypeDecl, TypeKind::AnnotationType),
            _ => {
                self.parse_unsupported_decl(checkpoint);
                return;
            }
        };

        if !self.enter_recursion() {
            return;
        }
        self.start_node_at(checkpoint, node_kind);

        if type_kind == TypeKind::AnnotationType {
            self.bump(); // '@'
        }
        self.bump(); // keyword

        let name = if self.currently_is(SyntaxKind::Id) {
            let name = self.current_text().to_owned();
            self.bump();
            name
        } else {
            self.error_recover(
                DiagnosticKind::ExpectedIdentifier,
                &format!("name after `{}`", type_kind.keyword()),
                HEADER_RECOVERY
                    .union(DECL_START)
                    .union(TokenSet::single(SyntaxKind::Lt)),
            );
            String::new()
        };

        if self.currently_is(SyntaxKind::Lt) {
            self.parse_type_params();
        }

        self.parse_type_header(type_kind);

        if !self.currently_is(SyntaxKind::BraceOpen) {
            self.error_recover(
                DiagnosticKind::ExpectedClassBody,
                &format!("{} body", type_kind.keyword()),
                HEADER_RECOVERY.union(DECL_START),
            );
        }
        if self.currently_is(SyntaxKind::BraceOpen) {
            self.type_names.push(name);
            self.parse_class_body(type_kind);
            self.type_names.pop();
        }

        self.finish_node();
        self.exit_recursion();
    }

    /// `extends`, `implements` and `permits` clauses, in any order.
    fn parse_type_header(&mut self, type_kind: TypeKind) {
        loop {
            match self.current() {
                SyntaxKind::KwExtends => self.parse_extends_clause(type_kind),
                SyntaxKind::KwImplements => self.parse_implements_clause(type_kind),
                SyntaxKind::Id if self.current_text() == "permits" => {
                    self.start_node(SyntaxKind::PermitsClause);
                    self.bump();
                    self.parse_clause_types("`permits`");
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    fn parse_extends_clause(&mut self, type_kind: TypeKind) {
        self.start_node(SyntaxKind::ExtendsClause);
        let extends_span = self.current_span();
        self.bump();
        let spans = self.parse_clause_types("`extends`");
        self.finish_node();

        match type_kind {
            TypeKind::Class => {
                if let Some(extra) = spans.get(1) {
                    self.error_at(DiagnosticKind::MultipleSuperclasses, *extra);
                }
            }
            TypeKind::AnnotationType => {
                self.error_at_msg(
                    DiagnosticKind::ExtendsNotAllowed,
                    extends_span,
                    "annotation types cannot inherit",
                );
            }
            TypeKind::Interface => {}
        }
    }

    fn parse_implements_clause(&mut self, type_kind: TypeKind) {
        self.start_node(SyntaxKind::ImplementsClause);
        let implements_span = self.current_span();
        self.bump();
        self.parse_clause_types("`implements`");
        self.finish_node();

        if type_kind.is_interface_like() {
            self.error_at_msg(
                DiagnosticKind::ImplementsNotAllowed,
                implements_span,
                format!("on {}", type_kind.keyword()),
            );
        }
    }

    fn parse_clause_types(&mut self, after: &str) -> Vec<TextRange> {
        if !self.currently_is(SyntaxKind::Id) {
            self.error_msg(DiagnosticKind::ExpectedTypeName, format!("after {after}"));
            return Vec::new();
        }
        self.parse_type_list()
    }

    /// `{ members }`
    fn parse_class_body(&mut self, owner: TypeKind) {
        self.assert_current(SyntaxKind::BraceOpen);
        self.start_node(SyntaxKind::ClassBody);
        self.push_delimiter();
        self.bump();

        loop {
            if self.has_fatal_error() {
                break;
            }
            if self.at_end() {
                if let Some(open) = self.delimiter_stack.last().copied() {
                    self.error_unclosed_delimiter(
                        DiagnosticKind::UnclosedBody,
                        "expected `}` before end of file",
                        format!("{} body opened here", owner.keyword()),
                        open.span,
                    );
                }
                break;
            }
            match self.current() {
                SyntaxKind::BraceClose => break,
                SyntaxKind::Semicolon => self.bump(),
                _ => self.parse_member(owner),
            }
        }

        self.pop_delimiter();
        self.eat_token(SyntaxKind::BraceClose);
        self.finish_node();
    }

    /// `enum E { ... }` / `record R(...) { ... }` skipped as one node.
    fn parse_unsupported_decl(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, SyntaxKind::UnsupportedDecl);
        let keyword = self.current_text();
        self.error_msg(DiagnosticKind::UnsupportedDeclaration, keyword);
        self.bump();

        while !self.at_end() {
            match self.current() {
                SyntaxKind::BraceOpen => {
                    self.skip_balanced_braces();
                    break;
                }
                SyntaxKind::Semicolon => {
                    self.bump();
                    break;
                }
                SyntaxKind::BraceClose => break,
                _ => self.bump(),
            }
        }
        self.finish_node();
    }
}
