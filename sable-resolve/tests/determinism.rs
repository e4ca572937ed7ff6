//! Property tests: resolution is a pure, order-insensitive function of
//! the declaration graph.

use proptest::prelude::*;

use sable_resolve::hir::{BodyId, DefId, MemberSig};
use sable_resolve::{GraphBuilder, ImplResolver, ResolutionCache};

/// Build a random-but-acyclic hierarchy: interface `i` may derive from
/// any subset of the interfaces declared before it, and may supply its
/// own default for the one shared member.
fn build(
    edges: &[Vec<bool>],
    defaults: &[bool],
    reverse_bases: bool,
) -> (sable_resolve::DeclGraph, Vec<DefId>, MemberSig) {
    let n = defaults.len();
    let mut b = GraphBuilder::new();
    let m = MemberSig::nullary(b.intern("M"));
    let mut ids: Vec<DefId> = Vec::with_capacity(n);
    for i in 0..n {
        let mut bases: Vec<DefId> = (0..i).filter(|&j| edges[i][j]).map(|j| ids[j]).collect();
        if reverse_bases {
            bases.reverse();
        }
        let id = b.add_interface(&format!("I{i}"), &bases);
        if defaults[i] {
            b.declare_default(id, m.clone(), BodyId::new(i as u32)).unwrap();
        }
        ids.push(id);
    }
    (b.finish().unwrap(), ids, m)
}

fn hierarchy_strategy() -> impl Strategy<Value = (Vec<Vec<bool>>, Vec<bool>)> {
    (2usize..10).prop_flat_map(|n| {
        (
            prop::collection::vec(prop::collection::vec(any::<bool>(), n), n),
            prop::collection::vec(any::<bool>(), n),
        )
    })
}

proptest! {
    /// Re-resolving any pair yields the identical classification.
    #[test]
    fn resolution_is_idempotent((edges, defaults) in hierarchy_strategy()) {
        let (graph, ids, m) = build(&edges, &defaults, false);
        let resolver = ImplResolver::new(&graph);
        for &ty in &ids {
            let first = resolver.resolve(ty, &m);
            prop_assert_eq!(resolver.resolve(ty, &m), first);
        }
    }

    /// Reordering sibling base lists changes nothing observable.
    #[test]
    fn resolution_ignores_sibling_order((edges, defaults) in hierarchy_strategy()) {
        let (graph_a, ids_a, m_a) = build(&edges, &defaults, false);
        let (graph_b, ids_b, m_b) = build(&edges, &defaults, true);
        prop_assert_eq!(&ids_a, &ids_b);

        let resolver_a = ImplResolver::new(&graph_a);
        let resolver_b = ImplResolver::new(&graph_b);
        for &ty in &ids_a {
            prop_assert_eq!(resolver_a.resolve(ty, &m_a), resolver_b.resolve(ty, &m_b));
        }
    }

    /// The memo arena is an optimization, never a semantic layer.
    #[test]
    fn cache_is_transparent((edges, defaults) in hierarchy_strategy()) {
        let (graph, ids, m) = build(&edges, &defaults, false);
        let resolver = ImplResolver::new(&graph);
        let mut cache = ResolutionCache::new(&graph);
        for &ty in &ids {
            prop_assert_eq!(cache.resolve(ty, &m), &resolver.resolve(ty, &m));
        }
        for &ty in &ids {
            prop_assert_eq!(cache.resolve(ty, &m), &resolver.resolve(ty, &m));
        }
        prop_assert_eq!(cache.len(), ids.len());
    }
}
