//! The declaration graph.
//!
//! An immutable structure of interface and class declarations together
//! with their member implementation records. The graph is built once per
//! compilation unit by [`GraphBuilder`] and never mutated afterwards; all
//! resolution queries are pure functions over it, so results may be
//! evaluated concurrently and memoized without invalidation logic. Any
//! edit means rebuilding the graph wholesale.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use string_interner::DefaultStringInterner;

use crate::hir::{BodyId, DefId, MemberSig, RetSig, SigFlags, Symbol};
use crate::span::Span;

mod build;

pub use build::{GraphBuilder, GraphError};

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub(crate) type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// What an interface or class declares about one member signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberKind {
    /// Declared with no body; the slot is abstract at this declaration.
    Abstract,
    /// A body the declaring interface supplies for its own slot.
    Default { body: BodyId },
    /// A body bound to the slot a named ancestor interface declares.
    Explicit { target: DefId, body: BodyId },
    /// Retracts the inherited implementation for this signature along
    /// paths through the declaring interface.
    Deimplement,
    /// A class member that satisfies a structurally matching slot without
    /// any interface-side record.
    Concrete { body: BodyId },
}

impl MemberKind {
    /// The body this record carries, if any.
    pub fn body(&self) -> Option<BodyId> {
        match self {
            MemberKind::Default { body }
            | MemberKind::Explicit { body, .. }
            | MemberKind::Concrete { body } => Some(*body),
            MemberKind::Abstract | MemberKind::Deimplement => None,
        }
    }
}

/// One member record as declared by an interface or class.
///
/// Each record is owned exactly once by the declaration that textually
/// contains it; resolution ranks records, it never mutates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDecl {
    /// The structural signature the record declares or targets.
    pub sig: MemberSig,
    /// Return shape. Not part of signature identity.
    pub ret: RetSig,
    /// Modifiers and markers.
    pub flags: SigFlags,
    /// What kind of record this is.
    pub kind: MemberKind,
    /// Where the record was declared.
    pub span: Span,
}

impl MemberDecl {
    /// A record with unit return, no flags, and no source location.
    /// Use the `with_*` methods to refine.
    pub fn new(sig: MemberSig, kind: MemberKind) -> Self {
        Self {
            sig,
            ret: RetSig::unit(),
            flags: SigFlags::empty(),
            kind,
            span: Span::dummy(),
        }
    }

    /// Set the return shape.
    pub fn with_ret(mut self, ret: RetSig) -> Self {
        self.ret = ret;
        self
    }

    /// Set the modifier flags.
    pub fn with_flags(mut self, flags: SigFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the source span.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// An interface declaration.
#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub def_id: DefId,
    pub name: Symbol,
    /// Direct base interfaces.
    pub bases: Vec<DefId>,
    /// Member records this interface declares.
    pub members: Vec<MemberDecl>,
}

/// A class declaration.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub def_id: DefId,
    pub name: Symbol,
    /// The single optional base class.
    pub base: Option<DefId>,
    /// Directly implemented interfaces.
    pub interfaces: Vec<DefId>,
    /// Member records this class declares.
    pub members: Vec<MemberDecl>,
}

/// Which kind of declaration a [`DefId`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Interface,
    Class,
}

/// The immutable declaration graph for one compilation unit.
#[derive(Debug)]
pub struct DeclGraph {
    interner: DefaultStringInterner,
    interfaces: FxIndexMap<DefId, InterfaceDecl>,
    classes: FxIndexMap<DefId, ClassDecl>,
    /// Transitive base interfaces per interface, computed once at build.
    iface_ancestors: FxHashMap<DefId, FxHashSet<DefId>>,
}

impl DeclGraph {
    pub(crate) fn new(
        interner: DefaultStringInterner,
        interfaces: FxIndexMap<DefId, InterfaceDecl>,
        classes: FxIndexMap<DefId, ClassDecl>,
        iface_ancestors: FxHashMap<DefId, FxHashSet<DefId>>,
    ) -> Self {
        Self { interner, interfaces, classes, iface_ancestors }
    }

    /// Look up an interface declaration.
    pub fn interface(&self, id: DefId) -> Option<&InterfaceDecl> {
        self.interfaces.get(&id)
    }

    /// Look up a class declaration.
    pub fn class(&self, id: DefId) -> Option<&ClassDecl> {
        self.classes.get(&id)
    }

    /// Which kind of declaration `id` names, if any.
    pub fn kind_of(&self, id: DefId) -> Option<DeclKind> {
        if self.interfaces.contains_key(&id) {
            Some(DeclKind::Interface)
        } else if self.classes.contains_key(&id) {
            Some(DeclKind::Class)
        } else {
            None
        }
    }

    /// All interfaces, in declaration order.
    pub fn interfaces(&self) -> impl Iterator<Item = &InterfaceDecl> {
        self.interfaces.values()
    }

    /// All classes, in declaration order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.classes.values()
    }

    /// The display name of a declaration. Falls back to a synthetic name
    /// for ids the graph does not know.
    pub fn name(&self, id: DefId) -> &str {
        let sym = self
            .interfaces
            .get(&id)
            .map(|i| i.name)
            .or_else(|| self.classes.get(&id).map(|c| c.name));
        match sym.and_then(|s| self.interner.resolve(s)) {
            Some(name) => name,
            None => "<unknown>",
        }
    }

    /// Resolve an interned symbol back to text.
    pub fn symbol_text(&self, sym: Symbol) -> Option<&str> {
        self.interner.resolve(sym)
    }

    /// Whether `derived` has `base` among its transitive base interfaces.
    pub fn derives_from(&self, derived: DefId, base: DefId) -> bool {
        self.iface_ancestors
            .get(&derived)
            .is_some_and(|set| set.contains(&base))
    }

    /// Find a declaration's own member record for a structural signature.
    ///
    /// At most one record exists per (declaration, signature); the builder
    /// rejects duplicates.
    pub fn find_member(&self, owner: DefId, sig: &MemberSig) -> Option<&MemberDecl> {
        let members = match self.kind_of(owner)? {
            DeclKind::Interface => &self.interfaces[&owner].members,
            DeclKind::Class => &self.classes[&owner].members,
        };
        members.iter().find(|m| &m.sig == sig)
    }

    /// The base-class chain of a class, most derived first, starting with
    /// the class itself.
    pub fn class_chain(&self, class: DefId) -> Vec<DefId> {
        let mut chain = Vec::new();
        let mut cursor = Some(class);
        while let Some(id) = cursor {
            match self.classes.get(&id) {
                Some(decl) => {
                    chain.push(id);
                    cursor = decl.base;
                }
                None => break,
            }
        }
        chain
    }

    /// The effective direct interface set of a type: its own direct
    /// interfaces plus, for classes, those of every base class. Order is
    /// deterministic (declaration order, most derived class first).
    pub fn direct_interfaces(&self, ty: DefId) -> Vec<DefId> {
        match self.kind_of(ty) {
            Some(DeclKind::Interface) => self.interfaces[&ty].bases.clone(),
            Some(DeclKind::Class) => {
                let mut roots = Vec::new();
                let mut seen = FxHashSet::default();
                for class in self.class_chain(ty) {
                    for &iface in &self.classes[&class].interfaces {
                        if seen.insert(iface) {
                            roots.push(iface);
                        }
                    }
                }
                roots
            }
            None => Vec::new(),
        }
    }
}
