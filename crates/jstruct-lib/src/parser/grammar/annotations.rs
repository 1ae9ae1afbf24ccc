use jstruct_core::{Modifier, Modifiers};
use rowan::TextRange;

use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::token_sets::MODIFIER_KEYWORDS;
use crate::parser::cst::{SyntaxKind, TokenSet};

/// Ends an element value at nesting depth 0.
const ELEMENT_VALUE_END: TokenSet = TokenSet::new(&[
    SyntaxKind::Comma,
    SyntaxKind::ParenClose,
    SyntaxKind::BraceClose,
    SyntaxKind::Semicolon,
]);

impl Parser<'_> {
    /// Keyword modifiers and annotations in any order, always wrapped in a
    /// (possibly empty) `Modifiers` node.
    pub(super) fn parse_modifiers(&mut self) {
        self.start_node(SyntaxKind::Modifiers);
        let mut seen = Modifiers::new();

        loop {
            let kind = self.current();
            if MODIFIER_KEYWORDS.contains(kind) {
                let span = self.current_span();
                let text = self.current_text();
                self.note_modifier(&mut seen, text, span);
                self.bump();
            } else if kind == SyntaxKind::At && !self.next_is(SyntaxKind::KwInterface) {
                self.parse_annotation();
            } else if self.at_contextual_modifier() {
                let start = self.current_span().start();
                let text = if self.currently_is_word("non") {
                    self.bump();
                    self.bump();
                    "non-sealed"
                } else {
                    "sealed"
                };
                self.bump();
                let span = TextRange::new(start, self.last_non_trivia_end().unwrap_or(start));
                self.note_modifier(&mut seen, text, span);
            } else {
                break;
            }
        }

        self.finish_node();
    }

    fn note_modifier(&mut self, seen: &mut Modifiers, text: &str, span: TextRange) {
        if let Some(modifier) = Modifier::from_keyword(text)
            && !seen.insert(modifier)
        {
            self.error_at_msg(DiagnosticKind::DuplicateModifier, span, text);
        }
    }

    /// `@Name` | `@a.b.Name(args)`
    pub(super) fn parse_annotation(&mut self) {
        self.assert_current(SyntaxKind::At);
        self.start_node(SyntaxKind::Annotation);
        self.bump();
        self.parse_qualified_name();
        if self.currently_is(SyntaxKind::ParenOpen) {
            self.parse_annotation_args();
        }
        self.finish_node();
    }

    /// `(value)` | `(name = value, ...)`
    fn parse_annotation_args(&mut self) {
        if !self.enter_recursion() {
            return;
        }
        self.start_node(SyntaxKind::AnnotationArgs);
        self.bump();

        if !self.currently_is(SyntaxKind::ParenClose) {
            loop {
                if self.currently_is(SyntaxKind::Id) && self.next_is(SyntaxKind::Equals) {
                    self.start_node(SyntaxKind::ElementValuePair);
                    self.bump();
                    self.bump();
                    self.parse_element_value();
                    self.finish_node();
                } else {
                    self.parse_element_value();
                }
                if !self.eat_token(SyntaxKind::Comma) {
                    break;
                }
            }
        }

        self.expect(SyntaxKind::ParenClose, "`)` to close annotation arguments");
        self.finish_node();
        self.exit_recursion();
    }

    /// Nested annotation, `{...}` array, or an expression kept as a flat token run.
    pub(super) fn parse_element_value(&mut self) {
        match self.current() {
            SyntaxKind::At => self.parse_annotation(),
            SyntaxKind::BraceOpen => self.parse_element_array(),
            _ => {
                self.start_node(SyntaxKind::ElementValue);
                let consumed = self.skip_expression(ELEMENT_VALUE_END);
                self.finish_node();
                if !consumed {
                    self.error(DiagnosticKind::ExpectedAnnotationValue);
                }
            }
        }
    }

    /// `{a, b, c}`, trailing comma allowed.
    fn parse_element_array(&mut self) {
        if !self.enter_recursion() {
            return;
        }
        self.start_node(SyntaxKind::ElementArray);
        self.bump();

        while !self.currently_is(SyntaxKind::BraceClose) && !self.at_end() {
            self.parse_element_value();
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }

        self.expect(SyntaxKind::BraceClose, "`}` to close the array");
        self.finish_node();
        self.exit_recursion();
    }
}
