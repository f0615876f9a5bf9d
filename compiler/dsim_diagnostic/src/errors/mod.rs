//! Long-form documentation for every error code, shown by `dsim explain`.
//!
//! One markdown file per code in this directory, embedded at compile time.

use crate::ErrorCode;

/// Access to the embedded error documentation.
pub struct ErrorDocs;

impl ErrorDocs {
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        let doc = match code {
            ErrorCode::E1001 => include_str!("E1001.md"),
            ErrorCode::E1002 => include_str!("E1002.md"),
            ErrorCode::E1003 => include_str!("E1003.md"),
            ErrorCode::E1004 => include_str!("E1004.md"),
            ErrorCode::E2001 => include_str!("E2001.md"),
            ErrorCode::E2002 => include_str!("E2002.md"),
            ErrorCode::E2003 => include_str!("E2003.md"),
            ErrorCode::E2004 => include_str!("E2004.md"),
            ErrorCode::E2005 => include_str!("E2005.md"),
            ErrorCode::E2006 => include_str!("E2006.md"),
        };
        (!doc.trim().is_empty()).then_some(doc)
    }

    pub fn has_docs(code: ErrorCode) -> bool {
        Self::get(code).is_some()
    }

    /// Codes with documentation, in numeric order.
    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        ErrorCode::ALL.into_iter().filter(|&code| Self::has_docs(code))
    }
}
