//! Member-implementation resolution for the Sable compiler.
//!
//! Sable interfaces support multiple inheritance with default (bodied)
//! members, explicit implementations of named ancestor slots, and
//! retraction of inherited implementations. Ancestry is therefore a DAG
//! with no single root, and "which implementation runs" is a
//! constraint-satisfaction question rather than single-inheritance
//! virtual dispatch. This crate answers it: for every inherited member of
//! every type it produces a total, deterministic answer for well-formed
//! hierarchies and a precise, structured diagnostic for ill-formed ones.
//!
//! The crate is an in-process query service. The surrounding compiler
//! hands in already-parsed declarations, asks [`GraphBuilder::finish`]
//! for an immutable [`DeclGraph`], and then queries:
//!
//! - [`ImplResolver::resolve`] - the most specific implementation of a
//!   signature for a type, an explicit ambiguity, or "abstract here"
//! - [`resolve_qualified`] - bind an explicitly-qualified call to a named
//!   ancestor's own record, bypassing specificity ranking
//! - [`checks`] - per-declaration signature compatibility checks
//!
//! All queries are pure functions of the immutable graph: no locking, no
//! invalidation, results memoizable per (type, signature) with
//! [`ResolutionCache`]. Lexing, parsing, expression typing, diagnostic
//! rendering, and code generation are external collaborators.

pub mod checks;
pub mod graph;
pub mod hir;
pub mod resolve;
pub mod span;

pub use checks::{
    check_extension_receiver, check_operator_operand, check_readonly_markers,
};
pub use graph::{DeclGraph, GraphBuilder, GraphError};
pub use resolve::{
    resolve_qualified, AmbiguityError, AmbiguityKind, BoundImpl, ImplOrigin, ImplResolver,
    QualifiedCallError, ResolutionCache, ResolutionResult,
};
