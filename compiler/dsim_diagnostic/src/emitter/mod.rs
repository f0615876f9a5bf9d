//! Diagnostic output.
//!
//! [`TerminalEmitter`] writes human-readable text to any `io::Write`;
//! other formats plug in through [`DiagnosticEmitter`].

mod terminal;

pub use terminal::{ColorMode, TerminalEmitter};

use crate::Diagnostic;

pub trait DiagnosticEmitter {
    fn emit(&mut self, diagnostic: &Diagnostic);

    fn emit_all<'a>(&mut self, diagnostics: impl IntoIterator<Item = &'a Diagnostic>)
    where
        Self: Sized,
    {
        for diagnostic in diagnostics {
            self.emit(diagnostic);
        }
    }

    fn flush(&mut self);
}
