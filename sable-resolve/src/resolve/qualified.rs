//! Explicitly-qualified ancestor calls.
//!
//! A qualified call names an ancestor interface and binds to that
//! interface's *own* implementation record, bypassing most-specific
//! resolution entirely. It is the one mechanism for disambiguating a
//! diamond from inside an implementation body, and for deliberately
//! reaching around the record resolution would have picked. Keeping it a
//! separate, narrower query means it can never weaken the general
//! algorithm's guarantees.

use thiserror::Error;
use tracing::debug;

use crate::graph::{DeclGraph, MemberKind};
use crate::hir::{DefId, MemberSig, Type};

use super::linearize::Ancestry;
use super::result::{BoundImpl, ImplOrigin};

/// Errors local to one qualified call expression. They never invalidate
/// unrelated resolutions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QualifiedCallError {
    /// The named interface is not an ancestor of the calling context.
    #[error("the named interface is not an ancestor of the calling context")]
    UnreachableTarget { context: DefId, ancestor: DefId },

    /// The named interface owns no implementation record for the
    /// signature. Qualified calls never fall back to a derived
    /// implementation.
    #[error("the named interface declares no implementation for this member")]
    NoSuchImplementation { ancestor: DefId, sig: MemberSig },

    /// Explicit type arguments do not match the member's generic arity.
    #[error("expected {expected} type argument(s), found {found}")]
    GenericArityMismatch { expected: u32, found: u32 },
}

/// Bind a qualified call to the named ancestor's own record.
///
/// `context` is the type the call occurs in (interface or class),
/// `ancestor` the named interface, and `type_args` the explicit generic
/// arguments, if the call supplies any. Succeeds with the single record
/// the ancestor owns for the signature (default or explicit) and fails
/// otherwise; abstract and deimplemented slots own no record.
pub fn resolve_qualified(
    graph: &DeclGraph,
    context: DefId,
    ancestor: DefId,
    sig: &MemberSig,
    type_args: Option<&[Type]>,
) -> Result<BoundImpl, QualifiedCallError> {
    if let Some(args) = type_args {
        if args.len() as u32 != sig.generic_arity {
            return Err(QualifiedCallError::GenericArityMismatch {
                expected: sig.generic_arity,
                found: args.len() as u32,
            });
        }
    }

    let ancestry = Ancestry::of(graph, context);
    if !ancestry.contains(ancestor) {
        return Err(QualifiedCallError::UnreachableTarget { context, ancestor });
    }

    let record = graph.find_member(ancestor, sig).and_then(|member| match member.kind {
        MemberKind::Default { body } => Some(BoundImpl {
            owner: ancestor,
            origin: ImplOrigin::Declared,
            body,
            sig: sig.clone(),
        }),
        MemberKind::Explicit { target, body } => Some(BoundImpl {
            owner: ancestor,
            origin: ImplOrigin::Explicit { target },
            body,
            sig: sig.clone(),
        }),
        MemberKind::Abstract | MemberKind::Deimplement | MemberKind::Concrete { .. } => None,
    });

    match record {
        Some(record) => {
            debug!(
                context = context.index(),
                ancestor = ancestor.index(),
                "bound qualified call"
            );
            Ok(record)
        }
        None => Err(QualifiedCallError::NoSuchImplementation {
            ancestor,
            sig: sig.clone(),
        }),
    }
}
