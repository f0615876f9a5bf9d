//! Scenario execution engine.
//!
//! Resolves every selected call site of every selected scenario and compares
//! the outcome with the scenario's expectation.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use dsim_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use dsim_diagnostic::Diagnostic;
use dsim_types::{CallSite, ResolutionResult};
use rayon::prelude::*;

use crate::scenarios::{Case, Expected, Scenario};

/// Configuration for the scenario runner.
#[derive(Clone, Debug)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "Config struct: each bool controls an independent flag"
)]
pub struct RunnerConfig {
    /// Only run cases whose `scenario/label` contains this substring.
    pub filter: Option<String>,
    /// Report passing cases and expected errors too.
    pub verbose: bool,
    /// Run scenarios, and the call sites within them, in parallel.
    pub parallel: bool,
    /// Color mode for diagnostics.
    pub color: ColorMode,
    /// Print resolution spans as an indented tree (needs `RUST_LOG`).
    pub tree: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            filter: None,
            verbose: false,
            parallel: true,
            color: ColorMode::Auto,
            tree: false,
        }
    }
}

/// Outcome of a single case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseOutcome {
    Passed,
    /// The resolution did not meet the expectation; carries what it produced.
    Failed(String),
}

impl CaseOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, CaseOutcome::Passed)
    }
}

/// Result of checking one case.
#[derive(Clone, Debug)]
pub struct CaseResult {
    pub label: &'static str,
    pub source: &'static str,
    pub expected: Expected,
    /// `Root.action() => ChildC.action()` or `error[E2003]`.
    pub actual: String,
    pub outcome: CaseOutcome,
    /// Rendered resolution error, if resolution failed.
    pub diagnostic: Option<Diagnostic>,
}

/// Results for one scenario.
#[derive(Clone, Debug)]
pub struct ScenarioSummary {
    pub name: &'static str,
    pub results: Vec<CaseResult>,
}

impl ScenarioSummary {
    pub fn failed(&self) -> usize {
        self.results.iter().filter(|r| !r.outcome.is_passed()).count()
    }
}

/// Results of a whole run.
#[derive(Clone, Debug, Default)]
pub struct RunSummary {
    pub scenarios: Vec<ScenarioSummary>,
    pub passed: usize,
    pub failed: usize,
    pub duration: Duration,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Process exit code: 1 if any case failed.
    pub fn exit_code(&self) -> i32 {
        i32::from(self.has_failures())
    }
}

/// Scenario runner.
pub struct Runner {
    config: RunnerConfig,
}

impl Runner {
    pub fn new() -> Self {
        Self::with_config(RunnerConfig::default())
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Runner { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Check every case of `scenarios` that passes the filter.
    pub fn run(&self, scenarios: &[Scenario]) -> RunSummary {
        let start = Instant::now();

        let summaries: Vec<ScenarioSummary> = if self.config.parallel {
            scenarios.par_iter().map(|s| self.run_scenario(s)).collect()
        } else {
            scenarios.iter().map(|s| self.run_scenario(s)).collect()
        };

        let mut summary = RunSummary {
            duration: start.elapsed(),
            ..RunSummary::default()
        };
        for scenario in summaries {
            if scenario.results.is_empty() {
                continue;
            }
            let failed = scenario.failed();
            summary.failed += failed;
            summary.passed += scenario.results.len() - failed;
            summary.scenarios.push(scenario);
        }
        summary
    }

    #[tracing::instrument(level = "debug", skip_all, fields(scenario = scenario.name))]
    fn run_scenario(&self, scenario: &Scenario) -> ScenarioSummary {
        let cases: Vec<&Case> = scenario
            .cases
            .iter()
            .filter(|case| self.matches_filter(scenario.name, case.label))
            .collect();
        let sites: Vec<CallSite> = cases.iter().map(|case| case.site.clone()).collect();

        let outcomes = if self.config.parallel {
            scenario.model.resolve_all(&sites)
        } else {
            sites.iter().map(|site| scenario.model.resolve(site)).collect()
        };

        let results = cases
            .into_iter()
            .zip(outcomes)
            .map(|(case, result)| check_case(scenario, case, &result))
            .collect();
        ScenarioSummary {
            name: scenario.name,
            results,
        }
    }

    fn matches_filter(&self, scenario: &str, label: &str) -> bool {
        match &self.config.filter {
            None => true,
            Some(filter) => format!("{scenario}/{label}").contains(filter.as_str()),
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

fn check_case(scenario: &Scenario, case: &Case, result: &ResolutionResult) -> CaseResult {
    let model = &scenario.model;
    let (actual, diagnostic) = match result {
        Ok(resolution) => (
            format!(
                "{} => {}",
                model.render_member(resolution.selected),
                model.render_member(resolution.target)
            ),
            None,
        ),
        Err(error) => (
            format!("error[{}]", error.code()),
            Some(model.resolve_diagnostic(error)),
        ),
    };

    let outcome = if case.expected.matches(model, result) {
        CaseOutcome::Passed
    } else {
        tracing::debug!(case = case.label, %actual, "expectation not met");
        CaseOutcome::Failed(actual.clone())
    };

    CaseResult {
        label: case.label,
        source: case.source,
        expected: case.expected.clone(),
        actual,
        outcome,
        diagnostic,
    }
}

/// Print a run summary.
///
/// Failures are always printed, with the diagnostic of the resolution error
/// if there was one. In verbose mode passing cases are listed too, and
/// expected errors show their diagnostic.
pub fn print_summary<W: Write>(
    out: &mut W,
    summary: &RunSummary,
    config: &RunnerConfig,
    is_tty: bool,
) -> io::Result<()> {
    for scenario in &summary.scenarios {
        let has_failures = scenario.failed() > 0;
        if config.verbose || has_failures {
            writeln!(out, "\n{}", scenario.name)?;
        }

        for result in &scenario.results {
            match &result.outcome {
                CaseOutcome::Passed => {
                    if !config.verbose {
                        continue;
                    }
                    writeln!(out, "  PASS: {} ({})", result.label, result.actual)?;
                }
                CaseOutcome::Failed(actual) => {
                    writeln!(
                        out,
                        "  FAIL: {} - expected {}, got {actual}",
                        result.label, result.expected
                    )?;
                    writeln!(out, "        {}", result.source)?;
                }
            }

            let show_diagnostic = config.verbose || !result.outcome.is_passed();
            if let Some(diagnostic) = result.diagnostic.as_ref().filter(|_| show_diagnostic) {
                let mut emitter = TerminalEmitter::with_color_mode(&mut *out, config.color, is_tty);
                emitter.emit(diagnostic);
                emitter.flush();
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "Scenario Summary:")?;
    writeln!(
        out,
        "  {} passed, {} failed ({} total)",
        summary.passed,
        summary.failed,
        summary.total()
    )?;
    writeln!(out, "  Completed in {:.2?}", summary.duration)?;

    if summary.has_failures() {
        writeln!(out)?;
        writeln!(out, "FAILED")?;
    } else if summary.total() == 0 {
        writeln!(out)?;
        writeln!(out, "NO CASES MATCHED")?;
    } else {
        writeln!(out)?;
        writeln!(out, "OK")?;
    }
    Ok(())
}
