//! Extension receiver shape.
//!
//! A by-reference receiver (mutable or read-only) is only legal when the
//! declared receiver type is a concrete value kind, or a type parameter
//! constrained to value kind. The rule is evaluated purely on the
//! declared, unreified shape: a parameter constrained only by interfaces
//! might well be instantiated with a value kind at a use site, but
//! accepting it would mean mutation-through-reference on reference-kind
//! instantiations and silent defensive copies on read-only ones.

use thiserror::Error;

use crate::hir::{ConstraintKind, ParamSig, PassMode, TypeKind, TypeParamDecl};
use crate::span::Span;

/// An extension member declaration, as far as the receiver rule needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionDecl {
    /// The extension member's name.
    pub name: String,
    /// Type parameters in scope, with their constraints.
    pub type_params: Vec<TypeParamDecl>,
    /// The receiver parameter.
    pub receiver: ParamSig,
    /// Where the extension was declared.
    pub span: Span,
}

/// Why a by-reference receiver was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverRejection {
    /// The declared receiver type is a reference kind.
    ReferenceKind,
    /// The receiver is an unconstrained type parameter.
    UnconstrainedTypeParam,
    /// The receiver is a type parameter constrained only by interfaces.
    InterfaceOnlyConstraints,
}

/// A by-reference receiver on an illegal declared shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("by-reference receiver of extension `{extension}` is not a concrete value kind")]
pub struct InvalidExtensionReceiver {
    /// The extension member's name.
    pub extension: String,
    /// The specific shape violation.
    pub reason: ReceiverRejection,
    pub span: Span,
}

/// Validate the receiver shape of one extension declaration.
pub fn check_extension_receiver(decl: &ExtensionDecl) -> Result<(), InvalidExtensionReceiver> {
    if !matches!(decl.receiver.mode, PassMode::Ref | PassMode::RefReadOnly) {
        return Ok(());
    }

    let reject = |reason| {
        Err(InvalidExtensionReceiver {
            extension: decl.name.clone(),
            reason,
            span: decl.span,
        })
    };

    let ty = &decl.receiver.ty;
    if ty.is_value_kind() {
        return Ok(());
    }
    if ty.is_reference_kind() {
        return reject(ReceiverRejection::ReferenceKind);
    }

    // Only type parameters and upstream error types remain. One bad
    // upstream type should not cascade into a second error.
    let TypeKind::Param(var) = ty.kind() else {
        return Ok(());
    };
    let constraints = decl
        .type_params
        .iter()
        .find(|p| p.id == *var)
        .map(|p| p.constraints.as_slice())
        .unwrap_or(&[]);

    if constraints.contains(&ConstraintKind::ValueKind) {
        // The constraint fixes the declared shape to value kind.
        Ok(())
    } else if constraints.is_empty() {
        reject(ReceiverRejection::UnconstrainedTypeParam)
    } else if constraints.contains(&ConstraintKind::ReferenceKind) {
        reject(ReceiverRejection::ReferenceKind)
    } else {
        reject(ReceiverRejection::InterfaceOnlyConstraints)
    }
}
