//! Hierarchy linearization.
//!
//! Ancestry in Sable is a DAG with no single root, so there is no one
//! linear method-resolution order. What resolution needs instead is the
//! ancestor closure of a type, a derived-first topological order for
//! deterministic iteration, and path-sensitive reachability: an inherited
//! implementation only counts if some base-edge path reaches its owner
//! without crossing an interface that retracted the signature.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::graph::{DeclGraph, FxIndexSet};
use crate::hir::DefId;

/// The ancestor-interface closure of one type.
#[derive(Debug, Clone)]
pub struct Ancestry {
    /// The type's effective direct interfaces: its own direct bases, or
    /// for a class the direct interfaces of the whole base-class chain.
    roots: Vec<DefId>,
    /// Every reachable ancestor interface, in discovery order.
    set: FxIndexSet<DefId>,
    /// Ancestors in derived-first topological order: an interface always
    /// precedes its own bases.
    order: Vec<DefId>,
}

impl Ancestry {
    /// Compute the closure for `ty` (interface or class). Unknown ids get
    /// an empty ancestry; the builder is where malformed references are
    /// rejected.
    pub fn of(graph: &DeclGraph, ty: DefId) -> Self {
        let roots = graph.direct_interfaces(ty);

        // Breadth-first closure over base edges.
        let mut set: FxIndexSet<DefId> = FxIndexSet::default();
        let mut queue: Vec<DefId> = roots.clone();
        let mut head = 0;
        while head < queue.len() {
            let id = queue[head];
            head += 1;
            if !set.insert(id) {
                continue;
            }
            if let Some(iface) = graph.interface(id) {
                queue.extend(iface.bases.iter().copied());
            }
        }

        let order = topo_order(graph, &set);
        trace!(ty = ty.index(), ancestors = order.len(), "linearized hierarchy");

        Self { roots, set, order }
    }

    /// Whether `id` is an ancestor interface of the type.
    pub fn contains(&self, id: DefId) -> bool {
        self.set.contains(&id)
    }

    /// Ancestors, most derived first.
    pub fn iter(&self) -> impl Iterator<Item = DefId> + '_ {
        self.order.iter().copied()
    }

    /// Number of ancestor interfaces.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the type has no ancestor interfaces.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The ancestors still reachable when traversal may not continue into
    /// any interface in `cut`.
    ///
    /// This is how deimplementation occludes: a record is out of
    /// consideration only when *every* path to its owner crosses a
    /// retracting interface; a clean sibling path keeps it alive.
    pub fn reachable_excluding(
        &self,
        graph: &DeclGraph,
        cut: &FxHashSet<DefId>,
    ) -> FxHashSet<DefId> {
        let mut reachable = FxHashSet::default();
        let mut queue: Vec<DefId> = self
            .roots
            .iter()
            .copied()
            .filter(|id| !cut.contains(id))
            .collect();
        while let Some(id) = queue.pop() {
            if !reachable.insert(id) {
                continue;
            }
            if let Some(iface) = graph.interface(id) {
                queue.extend(
                    iface.bases.iter().copied().filter(|base| !cut.contains(base)),
                );
            }
        }
        reachable
    }
}

/// Kahn's algorithm over the closure subgraph, seeded with the interfaces
/// nothing else in the closure derives from. Ties break on discovery
/// order, so the order is deterministic for a given graph.
fn topo_order(graph: &DeclGraph, set: &FxIndexSet<DefId>) -> Vec<DefId> {
    let mut in_degree: FxHashMap<DefId, usize> =
        set.iter().map(|&id| (id, 0)).collect();
    for &id in set {
        if let Some(iface) = graph.interface(id) {
            for base in &iface.bases {
                if let Some(count) = in_degree.get_mut(base) {
                    *count += 1;
                }
            }
        }
    }

    let mut queue: Vec<DefId> = set
        .iter()
        .copied()
        .filter(|id| in_degree[id] == 0)
        .collect();
    let mut order = Vec::with_capacity(set.len());
    let mut head = 0;
    while head < queue.len() {
        let id = queue[head];
        head += 1;
        order.push(id);
        if let Some(iface) = graph.interface(id) {
            for base in &iface.bases {
                if let Some(count) = in_degree.get_mut(base) {
                    *count -= 1;
                    if *count == 0 {
                        queue.push(*base);
                    }
                }
            }
        }
    }
    order
}
