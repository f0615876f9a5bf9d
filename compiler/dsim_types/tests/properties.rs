//! Property-based tests for the type graph and resolver.
//!
//! Random acyclic graphs are generated as "type i extends some of the types
//! before it", which is exactly the order `add_type` accepts.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use dsim_ir::{Name, ParamKind, ReturnKind, StringInterner};
use dsim_types::{
    resolve, resolve_all, BodyKind, CallSite, GraphError, MemberCatalog, TypeDecl, TypeGraph,
    TypeId, TypeKind,
};
use proptest::prelude::*;

// -- Strategies --

/// Supertype indices per type; entry `i` only refers to types before `i`.
fn dag_strategy() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(any::<usize>(), 0..3), 1..12).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, picks)| {
                if i == 0 {
                    Vec::new()
                } else {
                    picks.into_iter().map(|p| p % i).collect()
                }
            })
            .collect()
    })
}

fn body_strategy() -> impl Strategy<Value = Option<BodyKind>> {
    prop_oneof![
        Just(None),
        Just(Some(BodyKind::Abstract)),
        Just(Some(BodyKind::Default)),
        Just(Some(BodyKind::Concrete)),
    ]
}

fn kind_strategy() -> impl Strategy<Value = ParamKind> {
    prop::sample::select(ParamKind::ALL.to_vec())
}

// -- Helpers --

fn type_names(names: &StringInterner, n: usize) -> Vec<Name> {
    (0..n).map(|i| names.intern(&format!("T{i}"))).collect()
}

fn build(names: &[Name], supers: &[Vec<usize>]) -> TypeGraph {
    let mut graph = TypeGraph::new();
    for (i, picks) in supers.iter().enumerate() {
        let sup: Vec<Name> = picks.iter().map(|&p| names[p]).collect();
        graph.add_type(names[i], TypeKind::Interface, &sup).unwrap();
    }
    graph
}

fn ids(graph: &TypeGraph) -> Vec<TypeId> {
    graph.iter().map(|(id, _)| id).collect()
}

proptest! {
    #[test]
    fn subtype_is_reflexive(supers in dag_strategy()) {
        let interner = StringInterner::new();
        let names = type_names(&interner, supers.len());
        let graph = build(&names, &supers);
        for id in ids(&graph) {
            prop_assert!(graph.is_subtype(id, id));
        }
    }

    #[test]
    fn subtype_is_transitive(supers in dag_strategy()) {
        let interner = StringInterner::new();
        let names = type_names(&interner, supers.len());
        let graph = build(&names, &supers);
        let all = ids(&graph);
        for &a in &all {
            for &b in &all {
                for &c in &all {
                    if graph.is_subtype(a, b) && graph.is_subtype(b, c) {
                        prop_assert!(graph.is_subtype(a, c));
                    }
                }
            }
        }
    }

    #[test]
    fn subtype_agrees_with_ancestors(supers in dag_strategy()) {
        let interner = StringInterner::new();
        let names = type_names(&interner, supers.len());
        let graph = build(&names, &supers);
        let all = ids(&graph);
        for &a in &all {
            let ancestors = graph.ancestors(a);
            prop_assert_eq!(ancestors.first().copied(), Some(a));
            for &b in &all {
                prop_assert_eq!(graph.is_subtype(a, b), ancestors.contains(&b));
            }
        }
    }

    #[test]
    fn self_referencing_add_is_atomic(
        supers in dag_strategy(),
        extra in prop::collection::vec(any::<usize>(), 0..3),
    ) {
        let interner = StringInterner::new();
        let names = type_names(&interner, supers.len());
        let mut graph = build(&names, &supers);
        let before: Vec<Vec<TypeId>> = ids(&graph).into_iter().map(|id| graph.ancestors(id)).collect();

        let fresh = interner.intern("Fresh");
        let mut list: Vec<Name> = extra.iter().map(|&p| names[p % names.len()]).collect();
        list.push(fresh);
        let err = graph.add_type(fresh, TypeKind::Class, &list).unwrap_err();

        prop_assert_eq!(err, GraphError::CycleDetected { cycle: vec![fresh] });
        prop_assert_eq!(graph.len(), supers.len());
        prop_assert_eq!(graph.lookup(fresh), None);
        let after: Vec<Vec<TypeId>> = ids(&graph).into_iter().map(|id| graph.ancestors(id)).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn back_edge_yields_a_real_cycle(supers in dag_strategy(), pick in any::<usize>()) {
        let interner = StringInterner::new();
        let names = type_names(&interner, supers.len());
        let graph = build(&names, &supers);

        // Any type with a strict ancestor can close a cycle through it.
        let pairs: Vec<(usize, usize)> = (0..names.len())
            .flat_map(|sub| {
                graph
                    .ancestors(TypeId::from_raw(u32::try_from(sub).unwrap()))
                    .into_iter()
                    .skip(1)
                    .map(move |sup| (sub, sup.raw() as usize))
            })
            .collect();
        prop_assume!(!pairs.is_empty());
        let (sub, sup) = pairs[pick % pairs.len()];

        let mut decls: Vec<TypeDecl> = supers
            .iter()
            .enumerate()
            .map(|(i, picks)| {
                let list: Vec<Name> = picks.iter().map(|&p| names[p]).collect();
                TypeDecl::new(names[i], TypeKind::Interface, &list)
            })
            .collect();
        decls[sup].supertypes.push(names[sub]);

        let Err(GraphError::CycleDetected { cycle }) = TypeGraph::from_declarations(&decls) else {
            return Err(TestCaseError::fail("expected a cycle"));
        };
        prop_assert!(!cycle.is_empty());
        let decl_of = |n: Name| decls.iter().find(|d| d.name == n).unwrap();
        for (k, &name) in cycle.iter().enumerate() {
            let next = cycle[(k + 1) % cycle.len()];
            prop_assert!(decl_of(name).supertypes.contains(&next));
        }
    }

    #[test]
    fn declaration_order_does_not_matter(supers in dag_strategy()) {
        let interner = StringInterner::new();
        let names = type_names(&interner, supers.len());
        let graph = build(&names, &supers);

        let decls: Vec<TypeDecl> = supers
            .iter()
            .enumerate()
            .rev()
            .map(|(i, picks)| {
                let list: Vec<Name> = picks.iter().map(|&p| names[p]).collect();
                TypeDecl::new(names[i], TypeKind::Interface, &list)
            })
            .collect();
        let sorted = TypeGraph::from_declarations(&decls).unwrap();

        for &a in &names {
            for &b in &names {
                let here = graph.is_subtype(graph.lookup(a).unwrap(), graph.lookup(b).unwrap());
                let there = sorted.is_subtype(sorted.lookup(a).unwrap(), sorted.lookup(b).unwrap());
                prop_assert_eq!(here, there);
            }
        }
    }

    #[test]
    fn most_specific_is_an_antichain_covering_its_input(
        supers in dag_strategy(),
        picks in prop::collection::vec(any::<usize>(), 1..6),
    ) {
        let interner = StringInterner::new();
        let names = type_names(&interner, supers.len());
        let graph = build(&names, &supers);
        let all = ids(&graph);
        let input: Vec<TypeId> = picks.iter().map(|&p| all[p % all.len()]).collect();

        let result = graph.most_specific(&input);
        prop_assert!(!result.is_empty());
        for &a in &result {
            for &b in &result {
                prop_assert!(!graph.is_strict_subtype(a, b));
            }
        }
        for &t in &input {
            prop_assert!(result.iter().any(|&r| graph.is_subtype(r, t)));
        }
    }

    #[test]
    fn resolution_is_idempotent_and_order_preserving(
        supers in dag_strategy(),
        bodies in prop::collection::vec(body_strategy(), 12),
        params in prop::collection::vec(kind_strategy(), 0..3),
        calls in prop::collection::vec((any::<usize>(), any::<usize>(), prop::collection::vec(kind_strategy(), 0..3)), 1..8),
    ) {
        let interner = StringInterner::new();
        let names = type_names(&interner, supers.len());
        let graph = build(&names, &supers);
        let run = interner.intern("run");

        let mut catalog = MemberCatalog::new();
        for (id, body) in ids(&graph).into_iter().zip(&bodies) {
            if let Some(body) = *body {
                catalog.declare(id, run, &params, ReturnKind::Void, body).unwrap();
            }
        }

        let all = ids(&graph);
        let sites: Vec<CallSite> = calls
            .iter()
            .map(|(runtime, view, args)| {
                let runtime = all[runtime % all.len()];
                let ancestors = graph.ancestors(runtime);
                let declared = ancestors[view % ancestors.len()];
                CallSite::new(declared, runtime, run, args)
            })
            .collect();

        let first: Vec<_> = sites.iter().map(|s| resolve(&graph, &catalog, s)).collect();
        let second: Vec<_> = sites.iter().map(|s| resolve(&graph, &catalog, s)).collect();
        let parallel = resolve_all(&graph, &catalog, &sites);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &parallel);

        for (site, result) in sites.iter().zip(&first) {
            if let Ok(resolution) = result {
                let target = catalog.get(resolution.target).unwrap();
                prop_assert!(graph.is_subtype(site.runtime, target.owner));
                prop_assert_eq!(target.owner, resolution.owner);
            }
        }
    }
}
