//! Signature compatibility checks.
//!
//! Auxiliary per-declaration checks that share the graph's vocabulary but
//! are independent of resolution results, and of each other: one
//! declaration's violation never blocks checking the rest.
//!
//! - [`readonly`] - read-only-reference marker consistency
//! - [`receiver`] - extension receiver shape
//! - [`operators`] - operand defaultability for operators

mod operators;
mod readonly;
mod receiver;

pub use operators::{
    check_operator_operand, DefaultOperandRejected, Operand, OperatorApp, OperatorKind,
};
pub use readonly::{check_readonly_markers, InconsistentReadOnlyMarker};
pub use receiver::{
    check_extension_receiver, ExtensionDecl, InvalidExtensionReceiver, ReceiverRejection,
};
