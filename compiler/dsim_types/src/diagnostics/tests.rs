use dsim_diagnostic::ErrorCode;
use dsim_ir::{ParamKind, ReturnKind};
use pretty_assertions::assert_eq;

use crate::{BodyKind, Model, ModelError, OverloadMode, ResolveError};

const VOID: ReturnKind = ReturnKind::Void;

fn diamond_without_override() -> Model {
    let mut m = Model::new();
    m.interface("Root", &[]).unwrap();
    m.interface("ChildA", &["Root"]).unwrap();
    m.interface("ChildB", &["Root"]).unwrap();
    m.class("ChildC", &["ChildA", "ChildB"]).unwrap();
    m.member("Root", "action", &[], VOID, BodyKind::Abstract).unwrap();
    m.member("ChildA", "action", &[], VOID, BodyKind::Default).unwrap();
    m.member("ChildB", "action", &[], VOID, BodyKind::Default).unwrap();
    m
}

#[test]
fn diamond_conflict_names_providers_and_suggests_delegation() {
    let m = diamond_without_override();
    let site = m.call("Root", "ChildC", &[], "action", &[]).unwrap();
    let err = m.resolve(&site).unwrap_err();
    let diag = m.resolve_diagnostic(&err);

    assert_eq!(diag.code, ErrorCode::E2003);
    assert_eq!(
        diag.message,
        "`ChildC` inherits conflicting bodies for `action()` from {ChildA, ChildB}"
    );
    assert_eq!(
        diag.notes,
        vec![
            "body provided by `ChildA`".to_string(),
            "body provided by `ChildB`".to_string(),
        ]
    );
    assert_eq!(
        diag.suggestions,
        vec!["override `action()` in `ChildC` and delegate with `ChildA.super.action()`".to_string()]
    );
}

#[test]
fn ambiguity_lists_every_candidate() {
    let mut m = Model::with_mode(OverloadMode::Bytecode);
    m.class("Methods", &[]).unwrap();
    m.member("Methods", "noargs", &[], VOID, BodyKind::Concrete).unwrap();
    m.member(
        "Methods",
        "noargs",
        &[],
        ReturnKind::Value(ParamKind::Int),
        BodyKind::Concrete,
    )
    .unwrap();

    let site = m.call("Methods", "Methods", &[], "noargs", &[]).unwrap();
    let diag = m.resolve_diagnostic(&m.resolve(&site).unwrap_err());

    assert_eq!(diag.code, ErrorCode::E2002);
    assert_eq!(diag.message, "ambiguous call to `noargs() -> void` on `Methods`");
    assert_eq!(
        diag.notes,
        vec![
            "candidate `Methods.noargs() -> void`".to_string(),
            "candidate `Methods.noargs() -> int`".to_string(),
        ]
    );
}

#[test]
fn no_applicable_member_lists_rejected_candidates() {
    let mut m = Model::new();
    m.class("Methods", &[]).unwrap();
    m.member("Methods", "zarg", &[ParamKind::Boolean], VOID, BodyKind::Concrete)
        .unwrap();

    let site = m
        .call("Methods", "Methods", &[], "zarg", &[ParamKind::Int])
        .unwrap();
    let diag = m.resolve_diagnostic(&m.resolve(&site).unwrap_err());
    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(diag.message, "no applicable member `zarg(int)` on `Methods`");
    assert_eq!(diag.notes[0], "`Methods.zarg(boolean)` is not applicable");
}

#[test]
fn invalid_cast_names_both_types() {
    let m = diamond_without_override();
    let site = m.call("ChildB", "ChildB", &["ChildA"], "action", &[]).unwrap();
    let diag = m.resolve_diagnostic(&m.resolve(&site).unwrap_err());
    assert_eq!(diag.code, ErrorCode::E2004);
    assert_eq!(diag.message, "cannot cast `ChildB` to `ChildA`");
}

#[test]
fn unimplemented_member_points_at_the_runtime_type() {
    let mut m = Model::new();
    m.interface("Shape", &[]).unwrap();
    m.class("Blob", &["Shape"]).unwrap();
    m.member("Shape", "area", &[], VOID, BodyKind::Abstract).unwrap();
    let site = m.call("Shape", "Blob", &[], "area", &[]).unwrap();
    let diag = m.resolve_diagnostic(&m.resolve(&site).unwrap_err());
    assert_eq!(diag.code, ErrorCode::E2005);
    assert_eq!(diag.message, "`Blob` has no body for `Shape.area()`");
}

#[test]
fn construction_errors_map_to_e1_codes() {
    let mut m = Model::new();
    m.interface("Base", &[]).unwrap();

    let dup = m.interface("Base", &[]).unwrap_err();
    assert_eq!(m.model_diagnostic(&dup).code, ErrorCode::E1001);

    let unknown = m.class("A", &["Missing"]).unwrap_err();
    let diag = m.model_diagnostic(&unknown);
    assert_eq!(diag.code, ErrorCode::E1002);
    assert_eq!(diag.message, "type `A` extends unknown type `Missing`");

    let cycle = m.class("Loop", &["Loop"]).unwrap_err();
    let diag = m.model_diagnostic(&cycle);
    assert_eq!(diag.code, ErrorCode::E1003);
    assert_eq!(diag.message, "supertype cycle: Loop -> Loop");

    m.member("Base", "run", &[], VOID, BodyKind::Abstract).unwrap();
    let member = m
        .member("Base", "run", &[], ReturnKind::Value(ParamKind::Int), BodyKind::Abstract)
        .unwrap_err();
    let diag = m.model_diagnostic(&member);
    assert_eq!(diag.code, ErrorCode::E1004);
    assert!(diag.notes.contains(&"first declared as `Base.run()`".to_string()));

    let missing = m.ty("Nowhere").unwrap_err();
    assert_eq!(missing, ModelError::UnknownName("Nowhere".to_string()));
    assert_eq!(m.model_diagnostic(&missing).code, ErrorCode::E2006);
}

#[test]
fn unknown_type_id_is_e2006() {
    let m = Model::new();
    let err = ResolveError::UnknownType {
        id: crate::TypeId::from_raw(5),
    };
    let diag = m.resolve_diagnostic(&err);
    assert_eq!(diag.code, ErrorCode::E2006);
    assert_eq!(diag.message, "type id `type#5` does not belong to this graph");
}
