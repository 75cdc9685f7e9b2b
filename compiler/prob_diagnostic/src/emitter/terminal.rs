//! Terminal Emitter
//!
//! Human-readable diagnostic output. With source text attached, each label
//! is located as `path:line:col` and the primary label quotes its source
//! line with a caret underline:
//!
//! ```text
//! warning[W3001]: definition of `x` is the last statement of its block
//!  --> model.prob:2:3
//!   |
//! 2 |   (define x 1))
//!   |   ^^^^^^^^^^^^ nothing follows this definition
//!   = note: the block evaluates to `x`
//! ```

use std::io::{self, Write};

use prob_ir::Span;

use crate::{Diagnostic, Label, Severity};

use super::DiagnosticEmitter;

/// ANSI escapes.
mod style {
    pub const ERROR: &str = "\x1b[1;31m";
    pub const WARNING: &str = "\x1b[1;33m";
    pub const NOTE: &str = "\x1b[1;36m";
    pub const GUTTER: &str = "\x1b[1;34m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Color output mode for terminal emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color only when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    pub fn should_use_colors(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Source text a diagnostic's spans point into.
#[derive(Clone, Copy)]
struct SourceFile<'src> {
    path: &'src str,
    text: &'src str,
}

impl<'src> SourceFile<'src> {
    /// 1-based line and column of the span start, plus the text of that line.
    fn locate(self, span: Span) -> (usize, usize, &'src str) {
        let (line, col) = span.line_col(self.text);
        let line_text = self.text.lines().nth(line - 1).unwrap_or("");
        (line, col, line_text)
    }
}

/// Writes diagnostics as text, optionally colored.
pub struct TerminalEmitter<'src, W: Write> {
    writer: W,
    colors: bool,
    source: Option<SourceFile<'src>>,
}

impl<'src, W: Write> TerminalEmitter<'src, W> {
    pub fn with_color_mode(writer: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            writer,
            colors: mode.should_use_colors(is_tty),
            source: None,
        }
    }

    /// Resolve spans against `source`, reported under `path`.
    #[must_use]
    pub fn with_source(mut self, path: &'src str, source: &'src str) -> Self {
        self.source = Some(SourceFile { path, text: source });
        self
    }

    fn paint(&mut self, text: &str, escape: &str) {
        let _ = if self.colors {
            write!(self.writer, "{escape}{text}{}", style::RESET)
        } else {
            write!(self.writer, "{text}")
        };
    }

    fn severity_style(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => style::ERROR,
            Severity::Warning => style::WARNING,
            Severity::Note => style::NOTE,
        }
    }

    fn header(&mut self, diagnostic: &Diagnostic) {
        let tone = Self::severity_style(diagnostic.severity);
        let head = format!("{}[{}]", diagnostic.severity, diagnostic.code);
        self.paint(&head, tone);
        let _ = write!(self.writer, ": ");
        self.paint(&diagnostic.message, style::BOLD);
        let _ = writeln!(self.writer);
    }

    /// `--> path:line:col` plus a quoted source line for the primary label;
    /// a plain located line for secondary labels.
    fn label(&mut self, label: &Label, severity: Severity) {
        let Some(file) = self.source else {
            let marker = if label.is_primary { "-->" } else { "..." };
            let _ = writeln!(self.writer, "  {marker} {:?}: {}", label.span, label.message);
            return;
        };
        let (line, col, line_text) = file.locate(label.span);
        if !label.is_primary {
            let _ = write!(self.writer, "  ... {}:{line}:{col}: ", file.path);
            self.paint(&label.message, style::GUTTER);
            let _ = writeln!(self.writer);
            return;
        }

        let gutter = line.to_string().len();
        let pad = " ".repeat(gutter);
        let _ = writeln!(self.writer, "{pad}--> {}:{line}:{col}", file.path);
        self.paint(&format!("{pad} |"), style::GUTTER);
        let _ = writeln!(self.writer);
        self.paint(&format!("{line} |"), style::GUTTER);
        let _ = writeln!(self.writer, " {line_text}");
        self.paint(&format!("{pad} |"), style::GUTTER);

        // Underline to the end of the span or of the line, whichever is first.
        let available = line_text.chars().count().saturating_sub(col - 1).max(1);
        let width = (label.span.len() as usize).clamp(1, available);
        let underline = format!("{}{} {}", " ".repeat(col), "^".repeat(width), label.message);
        self.paint(&underline, Self::severity_style(severity));
        let _ = writeln!(self.writer);
    }
}

impl TerminalEmitter<'static, io::Stderr> {
    pub fn stderr(mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter::with_color_mode(io::stderr(), mode, is_tty)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<'_, W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        self.header(diagnostic);
        for label in &diagnostic.labels {
            self.label(label, diagnostic.severity);
        }
        for note in &diagnostic.notes {
            let _ = write!(self.writer, "  = ");
            self.paint("note", style::BOLD);
            let _ = writeln!(self.writer, ": {note}");
        }
        let _ = writeln!(self.writer);
    }

    fn flush(&mut self) {
        let _ = self.writer.flush();
    }

    fn emit_summary(&mut self, error_count: usize, warning_count: usize) {
        let warnings = match warning_count {
            0 => None,
            1 => Some("1 warning emitted".to_string()),
            n => Some(format!("{n} warnings emitted")),
        };
        if error_count == 0 {
            if let Some(warnings) = warnings {
                self.paint("warning", style::WARNING);
                let _ = writeln!(self.writer, ": {warnings}");
            }
            return;
        }
        let errors = if error_count == 1 {
            "previous error".to_string()
        } else {
            format!("{error_count} previous errors")
        };
        self.paint("error", style::ERROR);
        let _ = match warnings {
            Some(warnings) => writeln!(self.writer, ": aborting due to {errors}; {warnings}"),
            None => writeln!(self.writer, ": aborting due to {errors}"),
        };
    }
}
