//! Renders diagnostics against the OpenDRIVE document they came from.
//!
//! Spans cover whole XML elements. A `<road>` can run for hundreds of lines,
//! so only its start tag is underlined.

use std::fmt::Write;
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

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

    /// Document text. Without it every diagnostic prints as one plain line.
    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// File name shown in the `-->` header.
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
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let Some(source) = self.source else {
            return self.format_lines(w);
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
            let report = [self.group(diag, source)];
            write!(w, "{}", renderer.render(&report))?;
        }
        Ok(())
    }

    fn group<'a>(&self, diag: &'a DiagnosticMessage, source: &'a str) -> Group<'a>
    where
        's: 'a,
    {
        let primary = AnnotationKind::Primary
            .span(start_tag(&diag.range, source))
            .label(&diag.message);
        let mut snippet = Snippet::source(source).line_start(1).annotation(primary);
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }
        for related in &diag.related {
            let context = AnnotationKind::Context
                .span(start_tag(&related.range, source))
                .label(&related.message);
            snippet = snippet.annotation(context);
        }

        let level = match diag.severity() {
            Severity::Error => Level::ERROR,
            Severity::Warning => Level::WARNING,
        };
        let mut group = level.primary_title(&diag.message).element(snippet);
        for hint in &diag.hints {
            group = group.element(Level::HELP.message(hint));
        }
        group
    }

    fn format_lines(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{diag}")?;
        }
        Ok(())
    }
}

/// `range` clamped to the source and cut after the first `>`.
///
/// Empty spans widen to one byte so the caret stays visible.
fn start_tag(range: &Range<usize>, source: &str) -> Range<usize> {
    let limit = source.len();
    let start = range.start.min(limit);
    let end = range.end.min(limit);
    if start == end {
        return start..(start + 1).min(limit);
    }

    let end = source
        .get(start..end)
        .and_then(|element| element.find('>'))
        .map_or(end, |at| start + at + 1);
    start..end
}

impl Diagnostics {
    pub fn printer(&self) -> DiagnosticsPrinter<'_, '_> {
        DiagnosticsPrinter::new(self)
    }
}
