//! The `run` command: check the built-in scenarios and report results.

use std::io::{self, IsTerminal};

use dsim_diagnostic::emitter::ColorMode;

use crate::runner::{print_summary, Runner, RunnerConfig};
use crate::scenarios;

/// Run the scenarios `selector` picks (all of them for `None`).
pub fn run_scenarios(selector: Option<&str>, config: &RunnerConfig) -> i32 {
    let scenarios = match scenarios::select(selector) {
        Ok(scenarios) => scenarios,
        Err(e) => {
            eprintln!("error: failed to build scenarios: {e}");
            return 2;
        }
    };

    if scenarios.is_empty() {
        if let Some(selector) = selector {
            eprintln!("Unknown scenario: {selector}");
            eprintln!("Available: {}", scenarios::NAMES.join(", "));
        }
        return 1;
    }

    let mut config = config.clone();
    if config.color == ColorMode::Auto && std::env::var_os("NO_COLOR").is_some() {
        config.color = ColorMode::Never;
    }

    let runner = Runner::with_config(config);
    let summary = runner.run(&scenarios);

    let stdout = io::stdout();
    let is_tty = stdout.is_terminal();
    let mut out = stdout.lock();
    if let Err(e) = print_summary(&mut out, &summary, runner.config(), is_tty) {
        eprintln!("error: failed to write report: {e}");
        return 2;
    }

    summary.exit_code()
}
