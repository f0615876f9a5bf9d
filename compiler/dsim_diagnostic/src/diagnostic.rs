use std::fmt;

use crate::ErrorCode;

/// When a problem was found.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Phase {
    /// While building a graph or catalog. Fatal to the catalog.
    Construction,
    /// While resolving one call site. Later queries are unaffected.
    Resolution,
}

/// A rendered construction or resolution error.
///
/// Catalogs have no source text, so there are no spans: the subject (a
/// type or call site) is named in the message and the conflicting set is
/// listed one entry per note.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub message: String,
    pub notes: Vec<String>,
    /// How to fix it, when there is an obvious fix.
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    /// A diagnostic whose message is the code's title until replaced.
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            message: code.title().to_owned(),
            notes: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// One note per item of a conflicting set, each rendered by `describe`.
    pub fn with_notes<I, F>(mut self, items: I, describe: F) -> Self
    where
        I: IntoIterator,
        F: Fn(I::Item) -> String,
    {
        self.notes.extend(items.into_iter().map(describe));
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn phase(&self) -> Phase {
        if self.code.is_construction() {
            Phase::Construction
        } else {
            Phase::Resolution
        }
    }
}

/// Plain rendering; [`TerminalEmitter`](crate::emitter::TerminalEmitter)
/// produces the same layout with optional colors.
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code, self.message)?;
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        for suggestion in &self.suggestions {
            write!(f, "\n  = help: {suggestion}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn notes_follow_the_conflicting_set() {
        let diag = Diagnostic::error(ErrorCode::E2003)
            .with_message("conflicting defaults for `action()` in `ChildC`")
            .with_notes(["ChildA", "ChildB"], |p| format!("default provided by `{p}`"))
            .with_suggestion("override `action()` in `ChildC`");

        assert_eq!(
            diag.notes,
            vec![
                "default provided by `ChildA`".to_string(),
                "default provided by `ChildB`".to_string(),
            ]
        );
        assert_eq!(diag.suggestions.len(), 1);
    }

    #[test]
    fn display_lists_notes_then_help() {
        let diag = Diagnostic::error(ErrorCode::E2004)
            .with_message("cannot cast `A` to `C`")
            .with_note("`A` is not a subtype of `C`")
            .with_suggestion("remove the cast");

        assert_eq!(
            diag.to_string(),
            "error[E2004]: cannot cast `A` to `C`\n  = note: `A` is not a subtype of `C`\n  = help: remove the cast"
        );
    }

    #[test]
    fn phase_follows_code_range() {
        assert_eq!(Diagnostic::error(ErrorCode::E1003).phase(), Phase::Construction);
        assert_eq!(Diagnostic::error(ErrorCode::E2001).phase(), Phase::Resolution);
    }

    #[test]
    fn message_defaults_to_title() {
        assert_eq!(
            Diagnostic::error(ErrorCode::E2004).to_string(),
            "error[E2004]: invalid cast"
        );
    }
}
