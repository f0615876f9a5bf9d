use dsim_diagnostic::ErrorCode;
use dsim_types::OverloadMode;
use pretty_assertions::assert_eq;

use super::*;

fn check(scenario: &Scenario) -> Vec<String> {
    scenario
        .cases
        .iter()
        .filter_map(|case| {
            let result = scenario.model.resolve(&case.site);
            if case.expected.matches(&scenario.model, &result) {
                return None;
            }
            let actual = match &result {
                Ok(resolution) => scenario.model.render_member(resolution.target),
                Err(error) => format!("error[{}]", error.code()),
            };
            Some(format!(
                "{}/{}: expected {}, got {actual}",
                scenario.name, case.label, case.expected
            ))
        })
        .collect()
}

#[test]
fn every_scenario_builds_in_order() {
    let names: Vec<_> = all().unwrap().iter().map(|s| s.name).collect();
    assert_eq!(names, NAMES.to_vec());
}

#[test]
fn every_expectation_holds() {
    let failures: Vec<String> = all().unwrap().iter().flat_map(check).collect();
    assert!(failures.is_empty(), "{failures:#?}");
}

#[test]
fn labels_are_unique_within_a_scenario() {
    for scenario in all().unwrap() {
        let mut labels: Vec<_> = scenario.cases.iter().map(|c| c.label).collect();
        labels.sort_unstable();
        let before = labels.len();
        labels.dedup();
        assert_eq!(labels.len(), before, "duplicate label in {}", scenario.name);
    }
}

#[test]
fn selection_by_name_and_group() {
    let names = |selector: Option<&str>| -> Vec<&'static str> {
        select(selector).unwrap().iter().map(|s| s.name).collect()
    };
    assert_eq!(names(None).len(), NAMES.len());
    assert_eq!(names(Some("diamond")), vec!["diamond"]);
    assert_eq!(
        names(Some("overload")),
        vec!["overload/source", "overload/bytecode"]
    );
    assert_eq!(names(Some("overload/bytecode")), vec!["overload/bytecode"]);
    assert!(names(Some("over")).is_empty());
}

#[test]
fn overload_scenarios_differ_only_by_mode() {
    let source = overload::build_source().unwrap();
    let bytecode = overload::build_bytecode().unwrap();
    assert_eq!(source.model.catalog().mode(), OverloadMode::Source);
    assert_eq!(bytecode.model.catalog().mode(), OverloadMode::Bytecode);
    assert_eq!(source.model.catalog().len(), bytecode.model.catalog().len());
}

#[test]
fn expectation_display() {
    assert_eq!(Expected::Dispatch("A.print()").to_string(), "A.print()");
    assert_eq!(Expected::Error(ErrorCode::E2003).to_string(), "error[E2003]");
}

#[test]
fn dispatch_expectation_rejects_errors() {
    let scenario = linear::build().unwrap();
    let bad = scenario
        .cases
        .iter()
        .find(|c| c.label == "bad-downcast")
        .unwrap();
    let result = scenario.model.resolve(&bad.site);
    assert!(!Expected::Dispatch("C.print()").matches(&scenario.model, &result));
    assert!(!Expected::Error(ErrorCode::E2001).matches(&scenario.model, &result));
    assert!(bad.expected.matches(&scenario.model, &result));
}

#[test]
fn builder_rejects_unknown_names() {
    let mut b = Builder::new("t", "", OverloadMode::Source);
    b.class("A", &[]).unwrap();
    let err = b
        .case("x", "", ("A", "Missing"), &[], ("go", NO_ARGS), Expected::Dispatch(""))
        .unwrap_err();
    assert_eq!(err, ModelError::UnknownName("Missing".to_string()));
}
