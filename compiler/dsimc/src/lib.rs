//! The `dsim` driver.
//!
//! Bundles the built-in dispatch scenarios, a runner that checks every call
//! site against its expected outcome, and the command handlers behind the
//! `dsim` binary.

pub mod commands;
pub mod runner;
pub mod scenarios;
mod tracing_setup;

pub use runner::{RunSummary, Runner, RunnerConfig};
pub use tracing_setup::init_tracing;
