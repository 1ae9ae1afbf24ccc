use jstruct_core::TypeKind;
use rowan::Checkpoint;

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::token_sets::{DECL_START, TYPE_FIRST};
use crate::parser::cst::{SyntaxKind, TokenSet};

/// Ends a field initializer at nesting depth 0.
const INITIALIZER_END: TokenSet = TokenSet::new(&[SyntaxKind::Comma, SyntaxKind::Semicolon]);

/// Member recovery stops in front of these.
const MEMBER_RECOVERY: TokenSet = DECL_START.union(TokenSet::new(&[
    SyntaxKind::PrimitiveType,
    SyntaxKind::KwVoid,
]));

impl Parser<'_> {
    /// One class body member. Always consumes at least one token.
    pub(super) fn parse_member(&mut self, owner: TypeKind) {
        let checkpoint = self.checkpoint();
        let start_pos = self.pos;
        self.parse_modifiers();

        if self.at_type_decl_start() {
            self.parse_type_decl(checkpoint);
            return;
        }

        if self.currently_is(SyntaxKind::BraceOpen) {
            self.start_node_at(checkpoint, SyntaxKind::InitializerBlock);
            self.parse_block();
            self.finish_node();
            return;
        }

        if self.currently_is(SyntaxKind::Lt) {
            self.parse_type_params();
        }

        if self.currently_is(SyntaxKind::Id) && self.next_is(SyntaxKind::ParenOpen) {
            self.parse_constructor(checkpoint);
            return;
        }

        if self.currently_is_one_of(TYPE_FIRST) {
            self.parse_typed_member(checkpoint, owner);
            return;
        }

        let consumed = self.pos > start_pos;
        if consumed && self.currently_is(SyntaxKind::BraceClose) {
            self.error(DiagnosticKind::ExpectedMember);
            return;
        }
        self.recover_member(DiagnosticKind::ExpectedMember, None);
    }

    /// `Name(params) [throws ...] { ... }`
    ///
    /// A name that differs from the enclosing type is a method missing its return type.
    fn parse_constructor(&mut self, checkpoint: Checkpoint) {
        let name = self.current_text();
        let is_constructor = self.type_names.last().is_some_and(|owner| owner == name);

        if is_constructor {
            self.start_node_at(checkpoint, SyntaxKind::ConstructorDecl);
        } else {
            self.start_node_at(checkpoint, SyntaxKind::MethodDecl);
            self.error_msg(DiagnosticKind::MissingReturnType, format!("`{name}`"));
        }
        self.bump();
        self.parse_params();
        self.parse_throws();
        self.parse_method_body();
        self.finish_node();
    }

    /// Field, method or annotation element: all start with a type.
    fn parse_typed_member(&mut self, checkpoint: Checkpoint, owner: TypeKind) {
        self.parse_type();

        if !self.currently_is(SyntaxKind::Id) {
            self.start_node_at(checkpoint, SyntaxKind::FieldDecl);
            self.recover_member(DiagnosticKind::ExpectedIdentifier, Some("member name"));
            self.finish_node();
            return;
        }

        if self.next_is(SyntaxKind::ParenOpen) {
            let is_element = owner == TypeKind::AnnotationType;
            let kind = if is_element {
                SyntaxKind::ElementDecl
            } else {
                SyntaxKind::MethodDecl
            };
            self.start_node_at(checkpoint, kind);
            self.bump();
            self.parse_params();
            self.parse_dims();
            self.parse_throws();
            if is_element {
                if self.currently_is(SyntaxKind::KwDefault) {
                    self.parse_default_value();
                }
                self.expect_semicolon();
            } else {
                self.parse_method_body();
            }
            self.finish_node();
            return;
        }

        self.start_node_at(checkpoint, SyntaxKind::FieldDecl);
        self.parse_var_declarators();
        self.expect_semicolon();
        self.finish_node();
    }

    /// `a = 1, b[], c`
    fn parse_var_declarators(&mut self) {
        loop {
            self.start_node(SyntaxKind::VarDeclarator);
            if !self.expect_identifier("field name") {
                self.finish_node();
                break;
            }
            self.parse_dims();
            if self.currently_is(SyntaxKind::Equals) {
                self.start_node(SyntaxKind::VarInit);
                self.bump();
                self.skip_expression(INITIALIZER_END);
                self.finish_node();
            }
            self.finish_node();
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
    }

    /// `(T a, final U... b)`
    fn parse_params(&mut self) {
        self.start_node(SyntaxKind::ParamList);
        if !self.expect(SyntaxKind::ParenOpen, "`(`") {
            self.finish_node();
            return;
        }

        if !self.currently_is(SyntaxKind::ParenClose) {
            loop {
                self.parse_param();
                if !self.eat_token(SyntaxKind::Comma) {
                    break;
                }
            }
        }

        if !self.eat_token(SyntaxKind::ParenClose) {
            self.error_msg(DiagnosticKind::UnexpectedToken, "expected `)` after parameters");
            self.start_node(SyntaxKind::Error);
            while !self.at_end()
                && !self.currently_is_one_of(TokenSet::new(&[
                    SyntaxKind::ParenClose,
                    SyntaxKind::BraceOpen,
                    SyntaxKind::BraceClose,
                    SyntaxKind::Semicolon,
                ]))
            {
                self.bump();
            }
            self.finish_node();
            self.eat_token(SyntaxKind::ParenClose);
        }
        self.finish_node();
    }

    fn parse_param(&mut self) {
        self.start_node(SyntaxKind::Param);
        self.parse_modifiers();
        if !self.parse_type() {
            self.finish_node();
            return;
        }
        self.eat_token(SyntaxKind::Ellipsis);
        if !self.eat_token(SyntaxKind::KwThis) && self.expect_identifier("parameter name") {
            self.parse_dims();
        }
        self.finish_node();
    }

    /// `throws A, B`
    fn parse_throws(&mut self) {
        if !self.currently_is(SyntaxKind::KwThrows) {
            return;
        }
        self.start_node(SyntaxKind::ThrowsClause);
        self.bump();
        self.parse_type_list();
        self.finish_node();
    }

    /// `{ ... }` | `;`
    fn parse_method_body(&mut self) {
        match self.current() {
            SyntaxKind::BraceOpen => self.parse_block(),
            SyntaxKind::Semicolon => self.bump(),
            SyntaxKind::KwDefault => {
                self.error(DiagnosticKind::DefaultNotAllowed);
                self.parse_default_value();
                self.expect_semicolon();
            }
            _ => {
                self.error_msg(DiagnosticKind::UnexpectedToken, "expected method body or `;`");
            }
        }
    }

    /// `default <element value>`
    fn parse_default_value(&mut self) {
        self.assert_current(SyntaxKind::KwDefault);
        self.start_node(SyntaxKind::DefaultValue);
        self.bump();
        self.parse_element_value();
        self.finish_node();
    }

    /// `{ ... }` kept as a flat token run; only brace nesting is tracked.
    fn parse_block(&mut self) {
        self.assert_current(SyntaxKind::BraceOpen);
        self.start_node(SyntaxKind::Block);
        let open = self.current_span();
        self.bump();

        let mut depth = 1u32;
        loop {
            if self.at_end() {
                if !self.has_fatal_error() {
                    self.error_unclosed_delimiter(
                        DiagnosticKind::UnclosedBody,
                        "expected `}` before end of file",
                        "block opened here",
                        open,
                    );
                }
                break;
            }
            match self.current() {
                SyntaxKind::BraceOpen => depth += 1,
                SyntaxKind::BraceClose => {
                    depth -= 1;
                    if depth == 0 {
                        self.bump();
                        break;
                    }
                }
                _ => {}
            }
            self.bump();
        }

        self.finish_node();
    }

    /// Wraps a malformed member in an `Error` node: up to and including `;`,
    /// through a `{...}` group, or up to the next member start or `}`.
    fn recover_member(&mut self, kind: DiagnosticKind, message: Option<&str>) {
        self.start_node(SyntaxKind::Error);
        match message {
            Some(message) => self.error_msg(kind, message),
            None => self.error(kind),
        }
        let mut consumed = false;
        while !self.at_end() {
            match self.current() {
                SyntaxKind::BraceClose => break,
                SyntaxKind::Semicolon => {
                    self.bump();
                    break;
                }
                SyntaxKind::BraceOpen => {
                    self.skip_balanced_braces();
                    break;
                }
                _ if consumed && self.currently_is_one_of(MEMBER_RECOVERY) => break,
                _ => {
                    self.bump();
                    consumed = true;
                }
            }
        }
        self.finish_node();
    }
}
