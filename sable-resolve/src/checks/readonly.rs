//! Read-only-reference marker consistency.
//!
//! A signature involving a by-reference read-only parameter or return
//! carries two markers: the descriptive `READONLY_REF`, for consumers
//! that understand the contract, and the blocking `POISONED`, which makes
//! the signature unconsumeable by consumers that do not. The blocking
//! marker is coarser than strictly necessary (a virtual member with one
//! unsafe override blocks every call to the member), but it is the
//! chosen safety margin, and once its shape is fixed the two markers
//! must never drift apart. Drift is a hard rejection on every
//! declaration path, source text and external metadata alike.

use thiserror::Error;

use crate::graph::MemberDecl;
use crate::hir::{MemberSig, PassMode, SigFlags};

/// The descriptive marker is present without its blocking counterpart,
/// or a read-only-reference shape is missing its markers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "inconsistent read-only reference markers \
     (descriptive: {has_descriptive}, blocking: {has_blocking})"
)]
pub struct InconsistentReadOnlyMarker {
    /// The offending signature.
    pub sig: MemberSig,
    pub has_descriptive: bool,
    pub has_blocking: bool,
}

/// Validate the two read-only markers on one member declaration.
///
/// The rule is independent of whether the member is virtual, static, or
/// an explicit implementation.
pub fn check_readonly_markers(decl: &MemberDecl) -> Result<(), InconsistentReadOnlyMarker> {
    let shape_uses_readonly = decl
        .sig
        .params
        .iter()
        .any(|p| p.mode == PassMode::RefReadOnly)
        || decl.ret.mode == PassMode::RefReadOnly;

    let has_descriptive = decl.flags.contains(SigFlags::READONLY_REF);
    let has_blocking = decl.flags.contains(SigFlags::POISONED);

    let required = shape_uses_readonly || has_descriptive;
    if required && !(has_descriptive && has_blocking) {
        return Err(InconsistentReadOnlyMarker {
            sig: decl.sig.clone(),
            has_descriptive,
            has_blocking,
        });
    }
    Ok(())
}
