//! Lexer for Java source.
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//!
//! ## Error handling
//!
//! The lexer never stops early. Consecutive unrecognized characters are coalesced into a
//! single `Garbage` token, unterminated literals and comments become dedicated token kinds,
//! and each of these is reported once. After `error_limit` reports, a single
//! `TooManyLexErrors` note is emitted and further problems are tokenized silently.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

use super::cst::SyntaxKind;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

/// Token stream plus the diagnostics raised while producing it.
#[derive(Debug, Default)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub diagnostics: Diagnostics,
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes source into a vector of span-based tokens.
///
/// Post-processes the Logos output:
/// - Coalesces consecutive lexer errors into single `Garbage` tokens
/// - Re-tags the empty comment `/**/` as `BlockComment`
/// - Turns a failed `/*` or `"""` match into an unterminated token
pub fn lex(source: &str, error_limit: usize) -> Lexed {
    let mut tokens = Vec::new();
    let mut reporter = ErrorReporter::new(error_limit);
    let mut lexer = SyntaxKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    push_garbage(&mut tokens, &mut reporter, start..end);
                }

                let span = lexer.span();
                let kind = match kind {
                    SyntaxKind::Javadoc if lexer.slice() == "/**/" => SyntaxKind::BlockComment,
                    SyntaxKind::UnterminatedString => {
                        reporter.report(DiagnosticKind::UnterminatedString, span.clone());
                        kind
                    }
                    SyntaxKind::UnterminatedChar => {
                        reporter.report(DiagnosticKind::UnterminatedChar, span.clone());
                        kind
                    }
                    _ => kind,
                };
                tokens.push(Token::new(kind, range_to_text_range(span)));
            }
            Some(Err(())) => {
                let span = lexer.span();
                let text = &source[span.clone()];
                let unterminated = if text.starts_with("/*") {
                    Some((SyntaxKind::UnterminatedComment, DiagnosticKind::UnterminatedComment))
                } else if text.starts_with("\"\"\"") {
                    Some((SyntaxKind::UnterminatedString, DiagnosticKind::UnterminatedString))
                } else {
                    None
                };

                match unterminated {
                    Some((token_kind, diag_kind)) => {
                        if let Some(start) = error_start.take() {
                            push_garbage(&mut tokens, &mut reporter, start..span.start);
                        }
                        reporter.report(diag_kind, span.clone());
                        tokens.push(Token::new(token_kind, range_to_text_range(span)));
                    }
                    None => {
                        if error_start.is_none() {
                            error_start = Some(span.start);
                        }
                    }
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    push_garbage(&mut tokens, &mut reporter, start..source.len());
                }
                break;
            }
        }
    }

    Lexed {
        tokens,
        diagnostics: reporter.finish(),
    }
}

fn push_garbage(tokens: &mut Vec<Token>, reporter: &mut ErrorReporter, range: Range<usize>) {
    reporter.report(DiagnosticKind::UnrecognizedCharacter, range.clone());
    tokens.push(Token::new(SyntaxKind::Garbage, range_to_text_range(range)));
}

/// Caps the number of lexer diagnostics per file.
struct ErrorReporter {
    diagnostics: Diagnostics,
    limit: usize,
    reported: usize,
}

impl ErrorReporter {
    fn new(limit: usize) -> Self {
        Self {
            diagnostics: Diagnostics::new(),
            limit,
            reported: 0,
        }
    }

    fn report(&mut self, kind: DiagnosticKind, range: Range<usize>) {
        self.reported += 1;
        if self.reported <= self.limit {
            self.diagnostics
                .report(kind, range_to_text_range(range))
                .emit();
        } else if self.reported == self.limit + 1 {
            self.diagnostics
                .report(DiagnosticKind::TooManyLexErrors, range_to_text_range(range))
                .emit();
        }
    }

    fn finish(self) -> Diagnostics {
        self.diagnostics
    }
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'q>(source: &'q str, token: &Token) -> &'q str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
