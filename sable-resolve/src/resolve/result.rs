//! Resolution results and bound implementation records.

use crate::hir::{BodyId, DefId, MemberSig};

use super::ambiguity::AmbiguityError;

/// Where a bound implementation record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplOrigin {
    /// A default implementation of the owner's own declared slot.
    Declared,
    /// An explicit implementation bound to a named ancestor's slot.
    Explicit {
        /// The interface whose slot the record implements.
        target: DefId,
    },
    /// A class member satisfying the slot structurally.
    ClassMember,
}

/// A resolved implementation record: which declaration owns the body that
/// runs for a (type, signature) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundImpl {
    /// The interface or class that textually declares the record.
    pub owner: DefId,
    /// How the record binds to the slot.
    pub origin: ImplOrigin,
    /// The body to invoke.
    pub body: BodyId,
    /// The structural signature the record answers for.
    pub sig: MemberSig,
}

impl BoundImpl {
    /// The interface that declares the slot this record fills:
    /// the owner itself for defaults, the named target for explicit
    /// implementations. Class members fill slots structurally and have
    /// no declaring interface.
    pub fn origin_slot(&self) -> Option<DefId> {
        match self.origin {
            ImplOrigin::Declared => Some(self.owner),
            ImplOrigin::Explicit { target } => Some(target),
            ImplOrigin::ClassMember => None,
        }
    }
}

/// Result of resolving a (type, signature) pair.
///
/// Resolution is a pure function of the immutable declaration graph:
/// repeated calls return identical results, and results are invariant
/// under reordering of sibling declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
    /// Exactly one most specific implementation.
    Unique(BoundImpl),
    /// Two or more incomparable implementations compete for the slot.
    /// Terminal for any type that needs the resolution; never
    /// auto-resolved by priority.
    Ambiguous(AmbiguityError),
    /// No implementation reaches the type; the slot is abstract here.
    /// Legal for non-instantiable types.
    Unimplemented,
}

impl ResolutionResult {
    /// The unique record, if resolution succeeded.
    pub fn unique(&self) -> Option<&BoundImpl> {
        match self {
            ResolutionResult::Unique(record) => Some(record),
            _ => None,
        }
    }

    /// Whether the slot is ambiguous for this type.
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, ResolutionResult::Ambiguous(_))
    }
}
