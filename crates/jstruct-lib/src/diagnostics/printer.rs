//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostics;
use super::message::{Diagnostic, Severity};

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return self.format_plain(w);
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            let report = self.report(diag, source);
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }

    /// One group per diagnostic: the primary span, related spans as context
    /// labels, then each hint as a help line.
    fn report<'a>(&self, diag: &'a Diagnostic, source: &'a str) -> Vec<Group<'a>>
    where
        's: 'a,
    {
        let mut snippet = Snippet::source(source)
            .line_start(1)
            .annotation(
                AnnotationKind::Primary
                    .span(adjust_range(diag.range, source.len()))
                    .label(&diag.message),
            );
        if let Some(p) = self.path {
            snippet = snippet.path(p);
        }
        for related in &diag.related {
            snippet = snippet.annotation(
                AnnotationKind::Context
                    .span(adjust_range(related.range, source.len()))
                    .label(&related.message),
            );
        }

        let mut group = severity_to_level(diag.severity)
            .primary_title(&diag.message)
            .element(snippet);
        for hint in &diag.hints {
            group = group.element(Level::HELP.message(hint.as_str()));
        }
        vec![group]
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", diag)?;
        }
        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
        Severity::Info => Level::INFO,
    }
}

fn adjust_range(range: TextRange, limit: usize) -> std::ops::Range<usize> {
    let start: usize = usize::from(range.start()).min(limit);
    let end: usize = usize::from(range.end()).min(limit);

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}
