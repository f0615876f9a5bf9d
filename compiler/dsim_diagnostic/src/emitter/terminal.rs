//! Text output with optional ANSI colors.
//!
//! ```text
//! error[E2003]: `ChildD` inherits conflicting bodies for `action()` from {ChildA, ChildB}
//!   = note: body provided by `ChildA`
//!   = note: body provided by `ChildB`
//!   = help: override `action()` in `ChildD` and delegate with `ChildA.super.action()`
//! ```

use std::io::{self, Write};

use crate::Diagnostic;

use super::DiagnosticEmitter;

/// Whether to color output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Color when writing to a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Parse the value of `--color=`.
    pub fn from_flag(s: &str) -> Option<Self> {
        match s {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }

    pub fn enabled(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Copy, Clone)]
enum Style {
    Error,
    Code,
    Label,
    Help,
}

impl Style {
    const fn ansi(self) -> &'static str {
        match self {
            Style::Error => "\x1b[1;31m",
            Style::Code | Style::Label => "\x1b[1m",
            Style::Help => "\x1b[1;32m",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Writes diagnostics as text.
///
/// Write errors are dropped: a broken pipe while reporting should not turn
/// into a second failure.
pub struct TerminalEmitter<W: Write> {
    out: W,
    colors: bool,
}

impl<W: Write> TerminalEmitter<W> {
    /// `is_tty` only matters for [`ColorMode::Auto`].
    pub fn with_color_mode(out: W, mode: ColorMode, is_tty: bool) -> Self {
        TerminalEmitter {
            out,
            colors: mode.enabled(is_tty),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&mut self, style: Style, text: &str) -> io::Result<()> {
        if self.colors {
            write!(self.out, "{}{text}{RESET}", style.ansi())
        } else {
            self.out.write_all(text.as_bytes())
        }
    }

    fn write_diagnostic(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        self.paint(Style::Error, "error")?;
        self.paint(Style::Code, &format!("[{}]", diagnostic.code))?;
        writeln!(self.out, ": {}", diagnostic.message)?;

        let lines = diagnostic
            .notes
            .iter()
            .map(|note| (Style::Label, "note", note))
            .chain(diagnostic.suggestions.iter().map(|help| (Style::Help, "help", help)));
        for (style, label, text) in lines {
            self.out.write_all(b"  = ")?;
            self.paint(style, label)?;
            writeln!(self.out, ": {text}")?;
        }
        writeln!(self.out)
    }
}

impl<W: Write> DiagnosticEmitter for TerminalEmitter<W> {
    fn emit(&mut self, diagnostic: &Diagnostic) {
        let _ = self.write_diagnostic(diagnostic);
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }
}
