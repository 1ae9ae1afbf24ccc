use crate::diagnostics::DiagnosticKind;
use crate::parser::Parser;
use crate::parser::cst::token_sets::{DECL_START, MODIFIER_KEYWORDS};
use crate::parser::cst::{SyntaxKind, TokenSet};

/// Tokens that never occur at nesting depth 0 of an expression; a skipped
/// initializer that runs into one is missing its terminator.
const EXPR_BARRIER: TokenSet = MODIFIER_KEYWORDS.union(TokenSet::new(&[
    SyntaxKind::KwInterface,
    SyntaxKind::KwEnum,
    SyntaxKind::At,
]));

/// Type arguments longer than this are read as comparisons.
const TYPE_ARGS_LOOKAHEAD: usize = 64;

/// Tokens that cannot appear inside `<...>` of a type.
const TYPE_ARGS_BARRIER: TokenSet = TokenSet::new(&[
    SyntaxKind::Semicolon,
    SyntaxKind::BraceOpen,
    SyntaxKind::BraceClose,
    SyntaxKind::ParenOpen,
    SyntaxKind::ParenClose,
    SyntaxKind::Equals,
]);

impl Parser<'_> {
    pub(super) fn expect_semicolon(&mut self) -> bool {
        if self.eat_token(SyntaxKind::Semicolon) {
            return true;
        }
        self.error(DiagnosticKind::ExpectedSemicolon);
        false
    }

    pub(super) fn expect_identifier(&mut self, what: &str) -> bool {
        if self.eat_token(SyntaxKind::Id) {
            return true;
        }
        self.error_msg(DiagnosticKind::ExpectedIdentifier, what);
        false
    }

    /// `a.b.c` wrapped in a `Name` node. Stops before a `.` not followed by an identifier.
    pub(super) fn parse_qualified_name(&mut self) -> bool {
        self.start_node(SyntaxKind::Name);
        if !self.expect_identifier("name") {
            self.finish_node();
            return false;
        }
        while self.currently_is(SyntaxKind::Dot) && self.next_is(SyntaxKind::Id) {
            self.bump();
            self.bump();
        }
        self.finish_node();
        true
    }

    /// `int` | `void` | `a.b.C<T>[]`, wrapped in a `TypeRef` node.
    pub(super) fn parse_type(&mut self) -> bool {
        self.start_node(SyntaxKind::TypeRef);
        match self.current() {
            SyntaxKind::PrimitiveType | SyntaxKind::KwVoid => self.bump(),
            SyntaxKind::Id => {
                self.bump();
                if self.currently_is(SyntaxKind::Lt) {
                    self.parse_angle_group(SyntaxKind::TypeArgs);
                }
                while self.currently_is(SyntaxKind::Dot) && self.next_is(SyntaxKind::Id) {
                    self.bump();
                    self.bump();
                    if self.currently_is(SyntaxKind::Lt) {
                        self.parse_angle_group(SyntaxKind::TypeArgs);
                    }
                }
            }
            _ => {
                self.error(DiagnosticKind::ExpectedTypeName);
                self.finish_node();
                return false;
            }
        }
        self.parse_dims();
        self.finish_node();
        true
    }

    /// `A, B<C>, D`. Returns the span of each parsed type.
    pub(super) fn parse_type_list(&mut self) -> Vec<rowan::TextRange> {
        let mut spans = Vec::new();
        loop {
            let start = self.current_span().start();
            if !self.parse_type() {
                break;
            }
            let end = self.last_non_trivia_end().unwrap_or(start);
            spans.push(rowan::TextRange::new(start, end));
            if !self.eat_token(SyntaxKind::Comma) {
                break;
            }
        }
        spans
    }

    /// `<...>` as `TypeArgs` or `TypeParams`. Content is kept flat; nesting is tracked
    /// only to find the matching `>`.
    pub(super) fn parse_type_params(&mut self) {
        self.parse_angle_group(SyntaxKind::TypeParams);
    }

    fn parse_angle_group(&mut self, kind: SyntaxKind) {
        self.assert_current(SyntaxKind::Lt);
        self.start_node(kind);
        let open = self.current_span();
        self.bump();
        let mut depth = 1u32;
        loop {
            if self.at_end() || self.currently_is_one_of(TYPE_ARGS_BARRIER) {
                self.error_at_msg(DiagnosticKind::UnexpectedToken, open, "unclosed `<`");
                break;
            }
            match self.current() {
                SyntaxKind::Lt => depth += 1,
                SyntaxKind::Gt => {
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

    /// `[]` pairs after a type or a declarator name.
    pub(super) fn parse_dims(&mut self) {
        while self.currently_is(SyntaxKind::BracketOpen) && self.next_is(SyntaxKind::BracketClose) {
            self.bump();
            self.bump();
        }
    }

    /// Consumes an expression as a flat token run, stopping at depth 0 on `stop`,
    /// on an unmatched closer, or on a token that cannot be part of an expression.
    /// Returns whether anything was consumed.
    pub(super) fn skip_expression(&mut self, stop: TokenSet) -> bool {
        let mut depth = 0u32;
        let mut consumed = false;
        loop {
            if self.at_end() {
                break;
            }
            let kind = self.current();
            if depth == 0 && (stop.contains(kind) || self.at_expression_barrier(kind)) {
                break;
            }
            match kind {
                SyntaxKind::Lt if self.looks_like_type_args() => {
                    self.parse_angle_group(SyntaxKind::TypeArgs);
                    consumed = true;
                    continue;
                }
                SyntaxKind::ParenOpen | SyntaxKind::BracketOpen | SyntaxKind::BraceOpen => {
                    depth += 1;
                }
                SyntaxKind::ParenClose | SyntaxKind::BracketClose | SyntaxKind::BraceClose => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.bump();
            consumed = true;
        }
        consumed
    }

    /// `class` ends an expression unless it is a class literal (`String.class`).
    fn at_expression_barrier(&self, kind: SyntaxKind) -> bool {
        EXPR_BARRIER.contains(kind)
            || (kind == SyntaxKind::KwClass && self.previous_kind() != Some(SyntaxKind::Dot))
    }

    /// Whether the `<` at the current position opens type arguments (`new HashMap<K, V>()`)
    /// rather than being a comparison. Scans at most [`TYPE_ARGS_LOOKAHEAD`] significant
    /// tokens ahead without consuming.
    fn looks_like_type_args(&self) -> bool {
        let mut depth = 0u32;
        let significant = self.tokens[self.pos..]
            .iter()
            .filter(|token| !token.kind.is_trivia())
            .take(TYPE_ARGS_LOOKAHEAD);
        for token in significant {
            match token.kind {
                SyntaxKind::Lt => depth += 1,
                SyntaxKind::Gt => {
                    depth -= 1;
                    if depth == 0 {
                        return true;
                    }
                }
                SyntaxKind::Id
                | SyntaxKind::Dot
                | SyntaxKind::Comma
                | SyntaxKind::Question
                | SyntaxKind::Amp
                | SyntaxKind::At
                | SyntaxKind::KwExtends
                | SyntaxKind::KwSuper
                | SyntaxKind::PrimitiveType
                | SyntaxKind::BracketOpen
                | SyntaxKind::BracketClose => {}
                _ => return false,
            }
        }
        false
    }

    /// Current token can begin a declaration (modifier, annotation, type keyword).
    pub(super) fn at_declaration_start(&mut self) -> bool {
        self.currently_is_one_of(DECL_START)
            || self.at_contextual_modifier()
            || self.at_record_start()
    }

    /// After modifiers: `class` | `interface` | `@interface` | `enum` | `record Name`
    pub(super) fn at_type_decl_start(&mut self) -> bool {
        match self.current() {
            SyntaxKind::KwClass | SyntaxKind::KwInterface | SyntaxKind::KwEnum => true,
            SyntaxKind::At => self.next_is(SyntaxKind::KwInterface),
            _ => self.at_record_start(),
        }
    }

    /// `sealed` or `non-sealed` in modifier position.
    pub(super) fn at_contextual_modifier(&mut self) -> bool {
        if self.currently_is_word("sealed") {
            let next = self.peek_nth(1);
            return DECL_START.contains(next)
                || (next == SyntaxKind::Id
                    && matches!(self.peek_nth_text(1), "record" | "non" | "sealed"));
        }
        self.currently_is_word("non")
            && self.peek_nth(1) == SyntaxKind::Minus
            && self.peek_nth(2) == SyntaxKind::Id
            && self.peek_nth_text(2) == "sealed"
    }

    /// `record Name(` or `record Name<`
    pub(super) fn at_record_start(&mut self) -> bool {
        self.currently_is_word("record")
            && self.peek_nth(1) == SyntaxKind::Id
            && matches!(self.peek_nth(2), SyntaxKind::ParenOpen | SyntaxKind::Lt)
    }
}
