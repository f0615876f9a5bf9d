//! ```text
//!        Root
//!       /    \
//!  ChildA    ChildB
//!       \    /
//!   ChildC, ChildD
//! ```
//!
//! `ChildA` and `ChildB` both give `action()` a default body. `ChildC`
//! settles the conflict with its own override; `ChildD` does not.

use dsim_diagnostic::ErrorCode;
use dsim_ir::ReturnKind;
use dsim_types::{BodyKind, ModelError, OverloadMode};

use super::{Builder, Expected, Scenario, NO_ARGS};

pub(super) fn build() -> Result<Scenario, ModelError> {
    let mut b = Builder::new(
        "diamond",
        "two interface defaults meeting in one class",
        OverloadMode::Source,
    );

    b.interface("Root", &[])?;
    b.interface("ChildA", &["Root"])?;
    b.interface("ChildB", &["Root"])?;
    b.class("ChildC", &["ChildA", "ChildB"])?;
    b.class("ChildD", &["ChildA", "ChildB"])?;
    // `new ChildB() {}`
    b.class("AnonChildB", &["ChildB"])?;

    let void = ReturnKind::Void;
    b.member("Root", "action", &[], void, BodyKind::Abstract)?;
    b.member("ChildA", "action", &[], void, BodyKind::Default)?;
    b.member("ChildA", "doA", &[], void, BodyKind::Default)?;
    b.member("ChildB", "action", &[], void, BodyKind::Default)?;
    b.member("ChildB", "doB", &[], void, BodyKind::Default)?;
    b.member("ChildC", "action", &[], void, BodyKind::Concrete)?;

    let action = ("action", NO_ARGS);
    let do_a = ("doA", NO_ARGS);

    b.case(
        "case1",
        "ChildC c = new ChildC(); c.action()",
        ("ChildC", "ChildC"),
        &[],
        action,
        Expected::Dispatch("ChildC.action()"),
    )?;
    b.case(
        "case2/a",
        "ChildC c = new ChildC(); ((ChildA) c).action()",
        ("ChildC", "ChildC"),
        &["ChildA"],
        action,
        Expected::Dispatch("ChildC.action()"),
    )?;
    b.case(
        "case2/b",
        "ChildC c = new ChildC(); ((ChildB) c).action()",
        ("ChildC", "ChildC"),
        &["ChildB"],
        action,
        Expected::Dispatch("ChildC.action()"),
    )?;
    b.case(
        "case3",
        "ChildB b = new ChildC(); ((ChildC) ((Root) b)).doA()",
        ("ChildB", "ChildC"),
        &["Root", "ChildC"],
        do_a,
        Expected::Dispatch("ChildA.doA()"),
    )?;
    b.case(
        "case4",
        "ChildB b = new ChildB() {}; ((ChildC) ((Root) b)).doA()",
        ("ChildB", "AnonChildB"),
        &["Root", "ChildC"],
        do_a,
        Expected::Error(ErrorCode::E2004),
    )?;
    b.case(
        "inherited-default",
        "ChildB b = new ChildB() {}; b.action()",
        ("ChildB", "AnonChildB"),
        &[],
        action,
        Expected::Dispatch("ChildB.action()"),
    )?;
    b.case(
        "sibling-default",
        "ChildC c = new ChildC(); c.doB()",
        ("ChildC", "ChildC"),
        &[],
        ("doB", NO_ARGS),
        Expected::Dispatch("ChildB.doB()"),
    )?;
    b.case(
        "sibling-hidden",
        "ChildB b = new ChildC(); b.doA()",
        ("ChildB", "ChildC"),
        &[],
        do_a,
        Expected::Error(ErrorCode::E2001),
    )?;
    b.case(
        "unresolved-dispatch",
        "Root r = new ChildD(); r.action()",
        ("Root", "ChildD"),
        &[],
        action,
        Expected::Error(ErrorCode::E2003),
    )?;
    b.case(
        "unresolved-static",
        "ChildD d = new ChildD(); d.action()",
        ("ChildD", "ChildD"),
        &[],
        action,
        Expected::Error(ErrorCode::E2002),
    )?;

    Ok(b.finish())
}
