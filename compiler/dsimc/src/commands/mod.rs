//! Command handlers for the `dsim` CLI.
//!
//! Each handler writes its report to stdout and returns the process exit
//! code; `main` does the exiting.

mod explain;
mod list;
mod run;

pub use explain::explain_error;
pub use list::list_scenarios;
pub use run::run_scenarios;
