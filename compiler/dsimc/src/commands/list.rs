//! The `list` command: show the built-in scenarios.

use crate::scenarios;

/// Print every built-in scenario with its description and case count.
pub fn list_scenarios() -> i32 {
    let scenarios = match scenarios::all() {
        Ok(scenarios) => scenarios,
        Err(e) => {
            eprintln!("error: failed to build scenarios: {e}");
            return 2;
        }
    };

    let width = scenarios.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for scenario in &scenarios {
        println!(
            "  {:<width$}  {:>2} cases  {}",
            scenario.name,
            scenario.cases.len(),
            scenario.description
        );
    }
    0
}
