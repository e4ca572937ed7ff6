//! Per-(type, signature) memoization.
//!
//! Resolution is a pure function of an immutable graph, so memoization is
//! only an optimization: re-resolving is idempotent and yields the same
//! classification every time. There is deliberately no invalidation:
//! any graph change means a new graph and a new cache.

use rustc_hash::FxHashMap;

use crate::graph::DeclGraph;
use crate::hir::{DefId, MemberSig};

use super::resolver::ImplResolver;
use super::result::ResolutionResult;

/// A memoizing wrapper around [`ImplResolver`].
pub struct ResolutionCache<'g> {
    resolver: ImplResolver<'g>,
    memo: FxHashMap<(DefId, MemberSig), ResolutionResult>,
}

impl<'g> ResolutionCache<'g> {
    /// Create an empty cache over a finished graph.
    pub fn new(graph: &'g DeclGraph) -> Self {
        Self {
            resolver: ImplResolver::new(graph),
            memo: FxHashMap::default(),
        }
    }

    /// Resolve, reusing a previous answer for the same pair if one exists.
    pub fn resolve(&mut self, ty: DefId, sig: &MemberSig) -> &ResolutionResult {
        let resolver = &self.resolver;
        self.memo
            .entry((ty, sig.clone()))
            .or_insert_with(|| resolver.resolve(ty, sig))
    }

    /// Number of memoized pairs.
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    /// Whether the cache holds no results yet.
    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }
}
