//! ```text
//! -Chain1      Chain2     Chain3     Chain4      Chain1-
//!       \     /     \     /    \     /    \     /
//!        Link1       Link2      Link3      Link4
//! ```
//!
//! Every chain gives `action1()`/`action2()` a default body, so every link
//! sits on a diamond and overrides both actions.

use dsim_diagnostic::ErrorCode;
use dsim_ir::ReturnKind;
use dsim_types::{BodyKind, ModelError, OverloadMode};

use super::Expected::{self, Dispatch};
use super::{Builder, Scenario, NO_ARGS};

const LINKS: [(&str, [&str; 2]); 4] = [
    ("Link1", ["Chain1", "Chain2"]),
    ("Link2", ["Chain2", "Chain3"]),
    ("Link3", ["Chain3", "Chain4"]),
    ("Link4", ["Chain4", "Chain1"]),
];

pub(super) fn build() -> Result<Scenario, ModelError> {
    let mut b = Builder::new(
        "zigzag",
        "links sharing chains pairwise; each link settles its own diamond",
        OverloadMode::Source,
    );
    let void = ReturnKind::Void;

    for chain in ["Chain1", "Chain2", "Chain3", "Chain4"] {
        b.interface(chain, &[])?;
        b.member(chain, "action1", &[], void, BodyKind::Default)?;
        b.member(chain, "action2", &[], void, BodyKind::Default)?;
    }
    b.interface("ChainUnused", &[])?;
    b.member("ChainUnused", "actionUnused", &[], void, BodyKind::Default)?;

    for (link, chains) in LINKS {
        b.class(link, &chains)?;
        b.member(link, "action1", &[], void, BodyKind::Concrete)?;
        b.member(link, "action2", &[], void, BodyKind::Concrete)?;
    }

    let action1 = ("action1", NO_ARGS);
    let action2 = ("action2", NO_ARGS);
    let link1 = ("Link1", "Link1");

    b.case("case1/a", "link.action1()", link1, &[], action1, Dispatch("Link1.action1()"))?;
    b.case("case1/b", "link.action2()", link1, &[], action2, Dispatch("Link1.action2()"))?;
    b.case(
        "case1/c",
        "((Chain2) link).action1()",
        link1,
        &["Chain2"],
        action1,
        Dispatch("Link1.action1()"),
    )?;
    b.case(
        "case1/d",
        "((Chain2) link).action2()",
        link1,
        &["Chain2"],
        action2,
        Dispatch("Link1.action2()"),
    )?;
    b.case(
        "case2",
        "Chain1 b = new Link1(); ((Chain2) ((Link1) b)).action1()",
        ("Chain1", "Link1"),
        &["Link1", "Chain2"],
        action1,
        Dispatch("Link1.action1()"),
    )?;
    b.case(
        "wraparound",
        "Chain1 c = new Link4(); c.action2()",
        ("Chain1", "Link4"),
        &[],
        action2,
        Dispatch("Link4.action2()"),
    )?;
    b.case(
        "unused-chain",
        "link.actionUnused()",
        link1,
        &[],
        ("actionUnused", NO_ARGS),
        Expected::Error(ErrorCode::E2001),
    )?;
    b.case(
        "skipped-chain",
        "Chain3 c = new Link2(); ((Chain4) c).action1()",
        ("Chain3", "Link2"),
        &["Chain4"],
        action1,
        Expected::Error(ErrorCode::E2004),
    )?;

    Ok(b.finish())
}
