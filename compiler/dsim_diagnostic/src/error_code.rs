use std::fmt;

/// Stable codes for every diagnostic the simulator reports.
///
/// `E1xxx` codes come from building a graph or catalog and abort the build.
/// `E2xxx` codes come from a single resolution query; other queries against
/// the same catalog are unaffected.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    E1001,
    E1002,
    E1003,
    E1004,
    E2001,
    E2002,
    E2003,
    E2004,
    E2005,
    E2006,
}

impl ErrorCode {
    /// Every code, in numeric order.
    pub const ALL: [ErrorCode; 10] = [
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E1004,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
    ];

    /// `"E2003"` and so on.
    pub fn as_str(self) -> &'static str {
        let (text, _) = self.describe();
        text
    }

    /// One-line title; the default message of a [`Diagnostic`](crate::Diagnostic).
    pub fn title(self) -> &'static str {
        let (_, title) = self.describe();
        title
    }

    fn describe(self) -> (&'static str, &'static str) {
        match self {
            ErrorCode::E1001 => ("E1001", "type declared twice"),
            ErrorCode::E1002 => ("E1002", "supertype is not declared"),
            ErrorCode::E1003 => ("E1003", "supertype relation has a cycle"),
            ErrorCode::E1004 => ("E1004", "member declared twice on one type"),
            ErrorCode::E2001 => ("E2001", "no applicable member"),
            ErrorCode::E2002 => ("E2002", "ambiguous member"),
            ErrorCode::E2003 => ("E2003", "conflicting inherited defaults"),
            ErrorCode::E2004 => ("E2004", "invalid cast"),
            ErrorCode::E2005 => ("E2005", "member has no implementation"),
            ErrorCode::E2006 => ("E2006", "type does not belong to the graph"),
        }
    }

    /// Parse `E2003`, `e2003` or a bare `2003`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let digits = s
            .strip_prefix('E')
            .or_else(|| s.strip_prefix('e'))
            .unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|code| &code.as_str()[1..] == digits)
    }

    /// Whether the code belongs to the construction range.
    pub fn is_construction(self) -> bool {
        matches!(
            self,
            ErrorCode::E1001 | ErrorCode::E1002 | ErrorCode::E1003 | ErrorCode::E1004
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_code_text() {
        assert_eq!(ErrorCode::E1003.to_string(), "E1003");
        assert_eq!(format!("error[{}]", ErrorCode::E2002), "error[E2002]");
    }

    #[test]
    fn parse_is_lenient_about_prefix() {
        assert_eq!(ErrorCode::parse("e2003"), Some(ErrorCode::E2003));
        assert_eq!(ErrorCode::parse(" E1001 "), Some(ErrorCode::E1001));
        assert_eq!(ErrorCode::parse("2005"), Some(ErrorCode::E2005));
        assert_eq!(ErrorCode::parse("E9999"), None);
        assert_eq!(ErrorCode::parse(""), None);
    }

    #[test]
    fn construction_range() {
        let construction: Vec<_> = ErrorCode::ALL
            .into_iter()
            .filter(|c| c.is_construction())
            .collect();
        assert_eq!(construction.len(), 4);
        assert!(!ErrorCode::E2004.is_construction());
    }

    #[test]
    fn titles_are_distinct() {
        let mut titles: Vec<_> = ErrorCode::ALL.iter().map(|c| c.title()).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), ErrorCode::ALL.len());
    }
}
