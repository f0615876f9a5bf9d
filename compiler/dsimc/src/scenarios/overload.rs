//! One class full of overloads, checked twice.
//!
//! In source form every method has its own name, so each call resolves by
//! name alone. After aggressive overload renaming each group shares one
//! name; groups whose members differ only by return kind become ambiguous,
//! and the others fall back on arity and the widening order.

use dsim_diagnostic::ErrorCode;
use dsim_ir::ParamKind::{self, Boolean, Byte, Char, Float, Int, Long, Reference};
use dsim_ir::ReturnKind;
use dsim_types::{BodyKind, ModelError, OverloadMode};

use super::Expected::{self, Dispatch};
use super::{Builder, Scenario, NO_ARGS};

/// A method of the class: source name, renamed name, parameters, result.
struct Method {
    source: &'static str,
    renamed: &'static str,
    params: &'static [ParamKind],
    ret: ReturnKind,
}

const fn method(
    source: &'static str,
    renamed: &'static str,
    params: &'static [ParamKind],
    ret: ReturnKind,
) -> Method {
    Method {
        source,
        renamed,
        params,
        ret,
    }
}

const VOID: ReturnKind = ReturnKind::Void;

const METHODS: [Method; 28] = [
    method("noargs1", "noargs", &[], VOID),
    method("noargs2", "noargs", &[], ReturnKind::Value(Int)),
    method("noargs3", "noargs", &[], ReturnKind::Value(Boolean)),
    method("noargs4", "noargs", &[], ReturnKind::Value(Reference)),
    method("iarg1", "iarg", &[Int], VOID),
    method("iarg2", "iarg", &[Int], ReturnKind::Value(Int)),
    method("iarg3", "iarg", &[Int], ReturnKind::Value(Boolean)),
    method("iarg4", "iarg", &[Int], ReturnKind::Value(Reference)),
    method("zarg", "barg", &[Boolean], VOID),
    method("carg", "barg", &[Char], VOID),
    method("jarg", "barg", &[Long], VOID),
    method("barg1", "barg", &[Byte], VOID),
    method("barg2", "barg", &[Byte, Byte], VOID),
    method("barg3", "barg", &[Byte, Byte, Byte], VOID),
    method("nothing1", "nothing", &[Float, Float, Float], VOID),
    method("nothing2", "nothing", &[Float, Float, Int], VOID),
    method("nothing3", "nothing", &[Float, Int, Float], VOID),
    method("nothing4", "nothing", &[Float, Int, Int], VOID),
    method("nothing5", "nothing", &[Int, Float, Float], VOID),
    method("nothing6", "nothing", &[Int, Float, Int], VOID),
    method("nothing8", "nothing", &[Int, Int, Float], VOID),
    method("nothing9", "nothing", &[Int, Int, Int], VOID),
    // Identical signatures: renaming has to keep these apart.
    method("theSame1", "theSame1", &[Reference, Reference], VOID),
    method("theSame2", "theSame2", &[Reference, Reference], VOID),
    method("theSame3", "theSame3", &[Reference, Reference], VOID),
    method("theSame4", "theSame4", &[Reference, Reference], VOID),
    method("theSame5", "theSame5", &[Reference, Reference], VOID),
    method("theSame6", "theSame6", &[Reference, Reference], VOID),
];

fn declare(b: &mut Builder, renamed: bool) -> Result<(), ModelError> {
    b.class("Methods", &[])?;
    for m in &METHODS {
        let name = if renamed { m.renamed } else { m.source };
        b.member("Methods", name, m.params, m.ret, BodyKind::Concrete)?;
    }
    Ok(())
}

const METHODS_VAR: (&str, &str) = ("Methods", "Methods");

pub(super) fn build_source() -> Result<Scenario, ModelError> {
    let mut b = Builder::new(
        "overload/source",
        "distinct method names; every call resolves by name",
        OverloadMode::Source,
    );
    declare(&mut b, false)?;

    let cases: [(&'static str, &'static str, (&str, &[ParamKind]), Expected); 9] = [
        ("noargs", "m.noargs3()", ("noargs3", NO_ARGS), Dispatch("Methods.noargs3()")),
        ("iarg-widened", "m.iarg2(byteValue)", ("iarg2", &[Byte]), Dispatch("Methods.iarg2(int)")),
        (
            "barg3",
            "m.barg3(b1, b2, b3)",
            ("barg3", &[Byte, Byte, Byte]),
            Dispatch("Methods.barg3(byte, byte, byte)"),
        ),
        ("jarg-widened", "m.jarg('c')", ("jarg", &[Char]), Dispatch("Methods.jarg(long)")),
        (
            "nothing8",
            "m.nothing8(1, 2, 3)",
            ("nothing8", &[Int, Int, Int]),
            Dispatch("Methods.nothing8(int, int, float)"),
        ),
        (
            "theSame4",
            "m.theSame4(s1, s2)",
            ("theSame4", &[Reference, Reference]),
            Dispatch("Methods.theSame4(reference, reference)"),
        ),
        ("zarg-int", "m.zarg(1)", ("zarg", &[Int]), Expected::Error(ErrorCode::E2001)),
        ("barg2-arity", "m.barg2(b1)", ("barg2", &[Byte]), Expected::Error(ErrorCode::E2001)),
        ("float-narrowing", "m.iarg1(1.0f)", ("iarg1", &[Float]), Expected::Error(ErrorCode::E2001)),
    ];
    for (label, source, call, expected) in cases {
        b.case(label, source, METHODS_VAR, &[], call, expected)?;
    }

    Ok(b.finish())
}

pub(super) fn build_bytecode() -> Result<Scenario, ModelError> {
    let mut b = Builder::new(
        "overload/bytecode",
        "aggressively renamed methods; return kinds tell declarations apart",
        OverloadMode::Bytecode,
    );
    declare(&mut b, true)?;

    let cases: [(&'static str, &'static str, (&str, &[ParamKind]), Expected); 16] = [
        ("noargs", "m.noargs()", ("noargs", NO_ARGS), Expected::Error(ErrorCode::E2002)),
        ("iarg", "m.iarg(1)", ("iarg", &[Int]), Expected::Error(ErrorCode::E2002)),
        ("barg/byte", "m.barg(b)", ("barg", &[Byte]), Dispatch("Methods.barg(byte) -> void")),
        ("barg/char", "m.barg('c')", ("barg", &[Char]), Dispatch("Methods.barg(char) -> void")),
        ("barg/int", "m.barg(1)", ("barg", &[Int]), Dispatch("Methods.barg(long) -> void")),
        ("barg/long", "m.barg(1L)", ("barg", &[Long]), Dispatch("Methods.barg(long) -> void")),
        (
            "barg/boolean",
            "m.barg(true)",
            ("barg", &[Boolean]),
            Dispatch("Methods.barg(boolean) -> void"),
        ),
        (
            "barg/two",
            "m.barg(b1, b2)",
            ("barg", &[Byte, Byte]),
            Dispatch("Methods.barg(byte, byte) -> void"),
        ),
        (
            "barg/three",
            "m.barg(b1, b2, b3)",
            ("barg", &[Byte, Byte, Byte]),
            Dispatch("Methods.barg(byte, byte, byte) -> void"),
        ),
        ("barg/float", "m.barg(1.0f)", ("barg", &[Float]), Expected::Error(ErrorCode::E2001)),
        (
            "nothing/iii",
            "m.nothing(1, 2, 3)",
            ("nothing", &[Int, Int, Int]),
            Dispatch("Methods.nothing(int, int, int) -> void"),
        ),
        (
            "nothing/fii",
            "m.nothing(1.0f, 2, 3)",
            ("nothing", &[Float, Int, Int]),
            Dispatch("Methods.nothing(float, int, int) -> void"),
        ),
        (
            "nothing/bytes",
            "m.nothing(b1, b2, b3)",
            ("nothing", &[Byte, Byte, Byte]),
            Dispatch("Methods.nothing(int, int, int) -> void"),
        ),
        (
            "nothing/iil",
            "m.nothing(1, 2, 3L)",
            ("nothing", &[Int, Int, Long]),
            Dispatch("Methods.nothing(int, int, float) -> void"),
        ),
        (
            "nothing/lll",
            "m.nothing(1L, 2L, 3L)",
            ("nothing", &[Long, Long, Long]),
            Dispatch("Methods.nothing(float, float, float) -> void"),
        ),
        (
            "theSame3",
            "m.theSame3(s1, s2)",
            ("theSame3", &[Reference, Reference]),
            Dispatch("Methods.theSame3(reference, reference) -> void"),
        ),
    ];
    for (label, source, call, expected) in cases {
        b.case(label, source, METHODS_VAR, &[], call, expected)?;
    }

    Ok(b.finish())
}
