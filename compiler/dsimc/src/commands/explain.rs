//! The `explain` command: display documentation for error codes.

use dsim_diagnostic::{ErrorCode, ErrorDocs};

/// Display detailed documentation for a given error code string.
pub fn explain_error(code_str: &str) -> i32 {
    let Some(code) = ErrorCode::parse(code_str) else {
        eprintln!("Unknown error code: {code_str}");
        eprintln!();
        eprintln!("Codes have the format EXXXX where X is a digit. Known codes:");
        for code in ErrorCode::ALL {
            eprintln!("  {code}  {}", code.title());
        }
        return 1;
    };

    if let Some(doc) = ErrorDocs::get(code) {
        println!("{doc}");
        0
    } else {
        eprintln!("No documentation available for {code} ({})", code.title());
        1
    }
}
