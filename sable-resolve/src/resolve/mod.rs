//! Member-implementation resolution.
//!
//! This module implements the resolution algorithm that selects, for every
//! inherited member of every type, which declared implementation runs.
//! Sable interfaces support multiple inheritance with default (bodied)
//! members, so ancestry is a DAG rather than a chain of overrides: several
//! incomparable implementations can reach the same slot, "override" is
//! reframed as an explicit, name-qualified implementation, and an
//! interface may retract an inherited implementation outright.
//!
//! # Algorithm Overview
//!
//! 1. **Class precedence**: a base-class member satisfying the slot wins
//!    unconditionally over any interface default
//! 2. **Collect candidates**: walk the ancestor closure, skipping paths
//!    cut by a deimplementation of the queried signature
//! 3. **Select maximal**: discard every candidate whose owner is a base of
//!    another candidate's owner
//! 4. **Answer**: unique survivor, explicit ambiguity, or unimplemented,
//!    never a silently-arbitrary pick
//!
//! # Module Structure
//!
//! - [`linearize`] - Ancestor closure, derived-first order, occlusion
//! - [`resolver`] - Most-specific resolution algorithm
//! - [`result`] - Resolution results and bound records
//! - [`ambiguity`] - Ambiguity classification
//! - [`qualified`] - Explicitly-qualified ancestor calls
//! - [`cache`] - Per-(type, signature) memoization

mod ambiguity;
mod cache;
mod linearize;
mod qualified;
mod resolver;
mod result;


pub use ambiguity::{AmbiguityError, AmbiguityKind};
pub use cache::ResolutionCache;
pub use linearize::Ancestry;
pub use qualified::{resolve_qualified, QualifiedCallError};
pub use resolver::ImplResolver;
pub use result::{BoundImpl, ImplOrigin, ResolutionResult};
