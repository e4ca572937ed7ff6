//! Ambiguity classification.
//!
//! Two kinds of irreconcilable conflict exist, and diagnostics must tell
//! them apart: unrelated interfaces whose own default members happen to
//! unify structurally at a derived type, versus competing explicit
//! implementations of one inherited slot. Both are terminal: the engine
//! reports the distinguishing facts and lets the caller render them.

use crate::graph::DeclGraph;
use crate::hir::{DefId, MemberSig};

use super::result::BoundImpl;

/// Which kind of conflict an [`AmbiguityError`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbiguityKind {
    /// Independent interfaces each declare their own default for
    /// structurally identical, independently declared signatures.
    Declaration,
    /// Incomparable explicit implementations target the same inherited
    /// slot of a common ancestor.
    Implementation {
        /// The ancestor interface declaring the contested slot.
        root: DefId,
    },
}

/// Two or more incomparable implementations compete for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbiguityError {
    /// The contested signature.
    pub sig: MemberSig,
    /// Declaration versus implementation conflict.
    pub kind: AmbiguityKind,
    /// The maximal, mutually incomparable candidates, sorted by owner id
    /// so the value is independent of declaration order.
    pub candidates: Vec<BoundImpl>,
}

impl AmbiguityError {
    /// Classify a maximal candidate set.
    ///
    /// All candidates tracing to one origin slot means competing explicit
    /// implementations of that slot; anything else is a collision between
    /// independently declared members.
    pub(crate) fn classify(sig: MemberSig, mut candidates: Vec<BoundImpl>) -> Self {
        candidates.sort_by_key(|c| c.owner.index());

        let mut origins: Vec<DefId> = candidates.iter().filter_map(|c| c.origin_slot()).collect();
        origins.sort_by_key(|id| id.index());
        origins.dedup();

        let kind = match origins.as_slice() {
            // Every candidate fills the same declared slot.
            [root] => AmbiguityKind::Implementation { root: *root },
            _ => AmbiguityKind::Declaration,
        };

        Self { sig, kind, candidates }
    }

    /// Whether this is an implementation conflict over one inherited slot.
    pub fn is_implementation_conflict(&self) -> bool {
        matches!(self.kind, AmbiguityKind::Implementation { .. })
    }

    /// The interfaces declaring the slots the candidates fill, sorted and
    /// deduplicated. For a declaration conflict these are the independent
    /// declaring interfaces; for an implementation conflict this is the
    /// single common ancestor.
    pub fn declaring_interfaces(&self) -> Vec<DefId> {
        let mut ids: Vec<DefId> =
            self.candidates.iter().filter_map(|c| c.origin_slot()).collect();
        ids.sort_by_key(|id| id.index());
        ids.dedup();
        ids
    }

    /// The owners of the competing records, sorted.
    pub fn competing_owners(&self) -> Vec<DefId> {
        let mut ids: Vec<DefId> = self.candidates.iter().map(|c| c.owner).collect();
        ids.sort_by_key(|id| id.index());
        ids.dedup();
        ids
    }

    /// Render a qualified-call suggestion for the conflict.
    pub fn render(&self, graph: &DeclGraph) -> String {
        let member = graph
            .symbol_text(self.sig.name)
            .unwrap_or("<unknown>")
            .to_string();
        let owners: Vec<&str> =
            self.competing_owners().iter().map(|&id| graph.name(id)).collect();

        match self.kind {
            AmbiguityKind::Implementation { root } => format!(
                "`{}.{}` is implemented by each of {}; qualify the call \
                 (e.g. `{}.{}()`) or override it in the deriving type",
                graph.name(root),
                member,
                join_names(&owners),
                owners.first().copied().unwrap_or("<unknown>"),
                member,
            ),
            AmbiguityKind::Declaration => format!(
                "`{}` is declared independently by each of {}; qualify the \
                 call to pick one declaration",
                member,
                join_names(&owners),
            ),
        }
    }
}

fn join_names(names: &[&str]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("`{n}`")).collect();
    quoted.join(", ")
}
