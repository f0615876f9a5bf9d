//! `Base <- A <- B <- C`, every class overriding `print()`.

use dsim_diagnostic::ErrorCode;
use dsim_ir::ReturnKind;
use dsim_types::{BodyKind, ModelError, OverloadMode};

use super::Expected::{self, Dispatch};
use super::{Builder, Scenario, NO_ARGS};

pub(super) fn build() -> Result<Scenario, ModelError> {
    let mut b = Builder::new(
        "linear",
        "single inheritance chain; dispatch always reaches the runtime type",
        OverloadMode::Source,
    );

    b.interface("Base", &[])?;
    b.class("A", &["Base"])?;
    b.class("B", &["A"])?;
    b.class("C", &["B"])?;

    b.member("Base", "print", &[], ReturnKind::Void, BodyKind::Abstract)?;
    for owner in ["A", "B", "C"] {
        b.member(owner, "print", &[], ReturnKind::Void, BodyKind::Concrete)?;
    }

    let cases: [(&'static str, &'static str, (&str, &str), &[&str], Expected); 11] = [
        ("simple1/a", "A a = new A(); a.print()", ("A", "A"), &[], Dispatch("A.print()")),
        ("simple1/b", "B b = new B(); b.print()", ("B", "B"), &[], Dispatch("B.print()")),
        ("simple1/c", "C c = new C(); c.print()", ("C", "C"), &[], Dispatch("C.print()")),
        ("simple2/a", "A a = new A(); a.print()", ("A", "A"), &[], Dispatch("A.print()")),
        ("simple2/b", "A a = new B(); a.print()", ("A", "B"), &[], Dispatch("B.print()")),
        ("simple2/c", "A a = new C(); a.print()", ("A", "C"), &[], Dispatch("C.print()")),
        ("simple3/a", "A a = new C(); ((A) a).print()", ("A", "C"), &["A"], Dispatch("C.print()")),
        ("simple3/b", "A a = new C(); ((B) a).print()", ("A", "C"), &["B"], Dispatch("C.print()")),
        ("simple3/c", "A a = new C(); ((C) a).print()", ("A", "C"), &["C"], Dispatch("C.print()")),
        (
            "interface-view",
            "Base x = new B(); x.print()",
            ("Base", "B"),
            &[],
            Dispatch("B.print()"),
        ),
        (
            "bad-downcast",
            "A a = new A(); ((C) a).print()",
            ("A", "A"),
            &["C"],
            Expected::Error(ErrorCode::E2004),
        ),
    ];
    for (label, source, receiver, casts, expected) in cases {
        b.case(label, source, receiver, casts, ("print", NO_ARGS), expected)?;
    }

    Ok(b.finish())
}
