//! Error codes, diagnostics and their terminal rendering.
//!
//! `dsim_types` turns every construction and resolution error into a
//! [`Diagnostic`]: a stable [`ErrorCode`] (documented through
//! [`ErrorDocs`] and `dsim explain`), a one-line message naming the
//! subject, one note per member of the conflicting set, and a suggested
//! fix where one exists.

mod diagnostic;
pub mod emitter;
mod error_code;
pub mod errors;

pub use diagnostic::{Diagnostic, Phase};
pub use error_code::ErrorCode;
pub use errors::ErrorDocs;
