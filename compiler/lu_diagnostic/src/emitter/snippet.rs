//! Snippet Emitter
//!
//! Renders diagnostics as annotated source excerpts using `ariadne`.

use std::io::{self, Write};
use std::ops::Range;

use ariadne::{Color, Config, Label as SnippetLabel, Report, ReportKind, Source};

use crate::span_utils::char_range;
use crate::{Diagnostic, Severity};

use super::{plural_s, DiagnosticEmitter};

/// Emitter that prints each diagnostic with the source lines it points at.
pub struct SnippetEmitter<W: Write> {
    writer: W,
    path: String,
    source: String,
    colors: bool,
}

impl<W: Write> SnippetEmitter<W> {
    pub fn new(writer: W, path: impl Into<String>, source: impl Into<String>, colors: bool) -> Self {
        SnippetEmitter {
            writer,
            path: path.into(),
            source: source.into(),
            colors,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl SnippetEmitter<io::Stderr> {
    pub fn stderr(path: impl Into<String>, source: impl Into<String>, colors: bool) -> Self {
        SnippetEmitter::new(io::stderr(), path, source, colors)
    }
}

impl<W: Write> DiagnosticEmitter for SnippetEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let kind = match diagnostic.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
            Severity::Note | Severity::Help => ReportKind::Advice,
        };
        let offset = diagnostic
            .primary_span()
            .map_or(0, |span| char_range(&self.source, span).start);

        let mut report = Report::<(String, Range<usize>)>::build(kind, self.path.clone(), offset)
            .with_code(diagnostic.code.as_str())
            .with_message(&diagnostic.message)
            .with_config(Config::default().with_color(self.colors));

        for label in &diagnostic.labels {
            let range = char_range(&self.source, label.span);
            let color = if label.is_primary {
                Color::Red
            } else {
                Color::Blue
            };
            report = report.with_label(
                SnippetLabel::new((self.path.clone(), range))
                    .with_message(&label.message)
                    .with_color(color),
            );
        }
        for note in &diagnostic.notes {
            report = report.with_note(note);
        }
        for suggestion in &diagnostic.suggestions {
            report = report.with_help(suggestion);
        }

        let cache = (self.path.clone(), Source::from(self.source.clone()));
        let _ = report.finish().write(cache, &mut self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        if error_count > 0 {
            let _ = writeln!(
                self.writer,
                "error: aborting due to {error_count} error{}",
                plural_s(error_count)
            );
        } else if warning_count > 0 {
            let _ = writeln!(
                self.writer,
                "warning: {warning_count} warning{} emitted",
                plural_s(warning_count)
            );
        }
    }
}
