//! The most-specific resolver.

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::graph::{DeclGraph, DeclKind, MemberKind};
use crate::hir::{DefId, MemberSig};

use super::ambiguity::AmbiguityError;
use super::linearize::Ancestry;
use super::result::{BoundImpl, ImplOrigin, ResolutionResult};

/// Resolves which implementation record a (type, signature) pair binds to.
///
/// A pure query over the immutable declaration graph: no shared mutable
/// state, safe to evaluate concurrently for different pairs, idempotent.
pub struct ImplResolver<'g> {
    graph: &'g DeclGraph,
}

impl<'g> ImplResolver<'g> {
    /// Create a resolver over a finished graph.
    pub fn new(graph: &'g DeclGraph) -> Self {
        Self { graph }
    }

    /// The graph this resolver queries.
    pub fn graph(&self) -> &'g DeclGraph {
        self.graph
    }

    /// Resolve the implementation of `sig` for `ty`.
    ///
    /// Class members take precedence unconditionally; otherwise the
    /// candidates from the occlusion-filtered ancestor closure are ranked
    /// by the derives-from partial order, and the slot resolves to the
    /// unique maximal record, an explicit ambiguity, or nothing.
    pub fn resolve(&self, ty: DefId, sig: &MemberSig) -> ResolutionResult {
        // Step 1: class precedence. A base class member satisfying the
        // slot highjacks it from every interface default, regardless of
        // interface specificity.
        if self.graph.kind_of(ty) == Some(DeclKind::Class) {
            if let Some(record) = self.class_chain_record(ty, sig) {
                debug!(
                    ty = ty.index(),
                    owner = record.owner.index(),
                    "resolved to class member"
                );
                return ResolutionResult::Unique(record);
            }
        }

        let mut candidates: Vec<BoundImpl> = Vec::new();

        // Step 2: the type's own records, when it is an interface. A
        // deimplementation here retracts the slot for the whole type:
        // every inheritance path starts at the type itself.
        if self.graph.kind_of(ty) == Some(DeclKind::Interface) {
            if let Some(member) = self.graph.find_member(ty, sig) {
                match member.kind {
                    MemberKind::Deimplement => {
                        debug!(ty = ty.index(), "slot deimplemented by the type itself");
                        return ResolutionResult::Unimplemented;
                    }
                    MemberKind::Default { body } => candidates.push(BoundImpl {
                        owner: ty,
                        origin: ImplOrigin::Declared,
                        body,
                        sig: sig.clone(),
                    }),
                    MemberKind::Explicit { target, body } => candidates.push(BoundImpl {
                        owner: ty,
                        origin: ImplOrigin::Explicit { target },
                        body,
                        sig: sig.clone(),
                    }),
                    MemberKind::Abstract | MemberKind::Concrete { .. } => {}
                }
            }
        }

        // Step 3: candidates from the ancestor closure. Paths through an
        // interface that deimplements the signature are cut; records kept
        // alive by a clean sibling path stay in play.
        let ancestry = Ancestry::of(self.graph, ty);
        let cut: FxHashSet<DefId> = ancestry
            .iter()
            .filter(|&id| {
                self.graph
                    .find_member(id, sig)
                    .is_some_and(|m| matches!(m.kind, MemberKind::Deimplement))
            })
            .collect();
        let reachable = ancestry.reachable_excluding(self.graph, &cut);

        for id in ancestry.iter() {
            if !reachable.contains(&id) {
                continue;
            }
            let Some(member) = self.graph.find_member(id, sig) else {
                continue;
            };
            match member.kind {
                MemberKind::Default { body } => candidates.push(BoundImpl {
                    owner: id,
                    origin: ImplOrigin::Declared,
                    body,
                    sig: sig.clone(),
                }),
                MemberKind::Explicit { target, body } => candidates.push(BoundImpl {
                    owner: id,
                    origin: ImplOrigin::Explicit { target },
                    body,
                    sig: sig.clone(),
                }),
                _ => {}
            }
        }

        trace!(
            ty = ty.index(),
            candidates = candidates.len(),
            occluded = cut.len(),
            "collected candidates"
        );

        // Step 4: keep the maximal candidates and demand a unique winner.
        if candidates.is_empty() {
            return ResolutionResult::Unimplemented;
        }
        let maximal = self.find_maximal(candidates);
        if maximal.len() == 1 {
            return ResolutionResult::Unique(maximal.into_iter().next().unwrap());
        }
        ResolutionResult::Ambiguous(AmbiguityError::classify(sig.clone(), maximal))
    }

    /// The first record in the base-class chain (most derived first)
    /// matching the signature. At most one record per class exists for a
    /// structural signature; the builder rejects duplicates.
    fn class_chain_record(&self, class: DefId, sig: &MemberSig) -> Option<BoundImpl> {
        for id in self.graph.class_chain(class) {
            let Some(member) = self.graph.find_member(id, sig) else {
                continue;
            };
            match member.kind {
                MemberKind::Concrete { body } => {
                    return Some(BoundImpl {
                        owner: id,
                        origin: ImplOrigin::ClassMember,
                        body,
                        sig: sig.clone(),
                    })
                }
                MemberKind::Explicit { target, body } => {
                    return Some(BoundImpl {
                        owner: id,
                        origin: ImplOrigin::Explicit { target },
                        body,
                        sig: sig.clone(),
                    })
                }
                _ => {}
            }
        }
        None
    }

    /// Keep every candidate no other candidate's owner derives from.
    ///
    /// A record loses only to a record owned by a *more derived*
    /// interface; incomparable owners survive together and surface as an
    /// ambiguity.
    fn find_maximal(&self, candidates: Vec<BoundImpl>) -> Vec<BoundImpl> {
        candidates
            .iter()
            .filter(|c| {
                !candidates.iter().any(|other| {
                    other.owner != c.owner && self.graph.derives_from(other.owner, c.owner)
                })
            })
            .cloned()
            .collect()
    }
}
