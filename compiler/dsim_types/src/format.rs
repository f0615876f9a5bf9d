//! Human-readable rendering of types, signatures and members.
//!
//! Everything here needs a name table, so rendering is kept out of the
//! `Display` impls of the id types.

use dsim_ir::StringLookup;

use crate::catalog::{MemberCatalog, OverloadMode, Signature};
use crate::graph::TypeGraph;
use crate::{MemberId, TypeId};

/// Name of a type, or `<unknown>` for ids outside `graph`.
pub fn type_name<'a>(graph: &TypeGraph, names: &'a dyn StringLookup, id: TypeId) -> &'a str {
    if graph.contains(id) {
        names.lookup(graph.name(id))
    } else {
        "<unknown>"
    }
}

/// `action()`, `barg(byte, byte)`; bytecode catalogs append the return
/// kind (`noargs() -> int`) since it is part of the identity there.
pub fn signature(names: &dyn StringLookup, sig: &Signature, mode: OverloadMode) -> String {
    let params: Vec<&str> = sig.params.iter().map(|p| p.as_str()).collect();
    let mut out = format!("{}({})", names.lookup(sig.name), params.join(", "));
    if mode == OverloadMode::Bytecode {
        out.push_str(" -> ");
        out.push_str(&sig.ret.to_string());
    }
    out
}

/// `ChildA.action()`.
pub fn member(
    graph: &TypeGraph,
    catalog: &MemberCatalog,
    names: &dyn StringLookup,
    id: MemberId,
) -> String {
    match catalog.get(id) {
        Some(m) => format!(
            "{}.{}",
            type_name(graph, names, m.owner),
            signature(names, &m.signature, catalog.mode())
        ),
        None => format!("<unknown {id}>"),
    }
}

/// `{ChildA, ChildB}`.
pub fn type_set(graph: &TypeGraph, names: &dyn StringLookup, ids: &[TypeId]) -> String {
    let rendered: Vec<&str> = ids.iter().map(|&id| type_name(graph, names, id)).collect();
    format!("{{{}}}", rendered.join(", "))
}

#[cfg(test)]
mod tests {
    use dsim_ir::{ParamKind, ReturnKind, StringInterner};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::BodyKind;
    use crate::graph::TypeKind;

    #[test]
    fn renders_members_per_mode() {
        let names = StringInterner::new();
        let mut graph = TypeGraph::new();
        let methods = graph
            .add_type(names.intern("Methods"), TypeKind::Class, &[])
            .unwrap_or_else(|e| panic!("{e}"));

        let mut source = MemberCatalog::new();
        let mut bytecode = MemberCatalog::with_mode(OverloadMode::Bytecode);
        let params = [ParamKind::Byte, ParamKind::Byte];
        let ret = ReturnKind::Value(ParamKind::Int);
        let a = source
            .declare(methods, names.intern("barg"), &params, ret, BodyKind::Concrete)
            .unwrap_or_else(|e| panic!("{e}"));
        let b = bytecode
            .declare(methods, names.intern("barg"), &params, ret, BodyKind::Concrete)
            .unwrap_or_else(|e| panic!("{e}"));

        assert_eq!(member(&graph, &source, &names, a), "Methods.barg(byte, byte)");
        assert_eq!(
            member(&graph, &bytecode, &names, b),
            "Methods.barg(byte, byte) -> int"
        );
    }

    #[test]
    fn foreign_ids_render_as_unknown() {
        let names = StringInterner::new();
        let graph = TypeGraph::new();
        assert_eq!(type_name(&graph, &names, TypeId::from_raw(9)), "<unknown>");
        assert_eq!(
            type_set(&graph, &names, &[TypeId::from_raw(0)]),
            "{<unknown>}"
        );
    }
}
