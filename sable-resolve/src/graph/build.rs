//! Graph construction and validation.
//!
//! The builder consumes already-parsed declarations from the frontend.
//! Upstream is expected to hand in a cycle-free hierarchy, but the builder
//! re-checks defensively: a cyclic graph would send every downstream
//! traversal into a loop. Validation happens in phases at [`finish`]:
//!
//! 1. Reference validation: every base/interface edge names a known
//!    declaration of the right kind
//! 2. Cycle detection over base edges
//! 3. Explicit-implementation targets name an inherited slot
//!
//! [`finish`]: GraphBuilder::finish

use rustc_hash::{FxHashMap, FxHashSet};
use string_interner::DefaultStringInterner;
use thiserror::Error;

use crate::hir::{BodyId, DefId, MemberSig, Symbol};

use super::{ClassDecl, DeclGraph, DeclKind, FxIndexMap, InterfaceDecl, MemberDecl, MemberKind};

/// Errors detected while building the declaration graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("cyclic hierarchy: {}", .cycle.join(" -> "))]
    CyclicHierarchy { cycle: Vec<String> },

    #[error("unknown declaration id {}", .id.index())]
    UnknownDecl { id: DefId },

    #[error("declaration `{name}` cannot be used as {expected:?} here")]
    WrongDeclKind { name: String, expected: DeclKind },

    #[error("`{owner}` declares `{member}` more than once")]
    DuplicateMember { owner: String, member: String },

    #[error(
        "explicit implementation in `{owner}` targets `{target}.{member}`, \
         which is not an inherited slot"
    )]
    InvalidExplicitTarget {
        owner: String,
        target: String,
        member: String,
    },
}

/// Builds a [`DeclGraph`] from frontend declarations.
///
/// Declarations are registered first (allocating their [`DefId`]s), then
/// wired with base edges and member records; forward references in base
/// lists are allowed and validated at [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct GraphBuilder {
    interner: DefaultStringInterner,
    interfaces: FxIndexMap<DefId, InterfaceDecl>,
    classes: FxIndexMap<DefId, ClassDecl>,
    next_def: u32,
}

impl GraphBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a name. Signatures are built against symbols from the same
    /// builder that produces the graph.
    pub fn intern(&mut self, text: &str) -> Symbol {
        self.interner.get_or_intern(text)
    }

    fn alloc(&mut self) -> DefId {
        let id = DefId::new(self.next_def);
        self.next_def += 1;
        id
    }

    /// Register an interface with its direct bases.
    pub fn add_interface(&mut self, name: &str, bases: &[DefId]) -> DefId {
        let name = self.interner.get_or_intern(name);
        let def_id = self.alloc();
        self.interfaces.insert(
            def_id,
            InterfaceDecl { def_id, name, bases: bases.to_vec(), members: Vec::new() },
        );
        def_id
    }

    /// Add a direct base to an already-registered interface.
    pub fn add_base(&mut self, iface: DefId, base: DefId) -> Result<(), GraphError> {
        match self.interfaces.get_mut(&iface) {
            Some(decl) => {
                decl.bases.push(base);
                Ok(())
            }
            None => Err(GraphError::UnknownDecl { id: iface }),
        }
    }

    /// Register a class with its optional base class and direct interfaces.
    pub fn add_class(
        &mut self,
        name: &str,
        base: Option<DefId>,
        interfaces: &[DefId],
    ) -> DefId {
        let name = self.interner.get_or_intern(name);
        let def_id = self.alloc();
        self.classes.insert(
            def_id,
            ClassDecl {
                def_id,
                name,
                base,
                interfaces: interfaces.to_vec(),
                members: Vec::new(),
            },
        );
        def_id
    }

    /// Attach a member record to its owning declaration.
    ///
    /// Rejects records whose kind is not legal for the owner (classes own
    /// concrete and explicit records; interfaces own everything else) and
    /// duplicate structural signatures within one declaration.
    pub fn declare(&mut self, owner: DefId, decl: MemberDecl) -> Result<(), GraphError> {
        let owner_name = self.name_of(owner);
        let member_name = self.member_name(decl.sig.name);

        let (members, legal) = if let Some(iface) = self.interfaces.get_mut(&owner) {
            let legal = !matches!(decl.kind, MemberKind::Concrete { .. });
            (&mut iface.members, legal)
        } else if let Some(class) = self.classes.get_mut(&owner) {
            let legal = matches!(
                decl.kind,
                MemberKind::Concrete { .. } | MemberKind::Explicit { .. }
            );
            (&mut class.members, legal)
        } else {
            return Err(GraphError::UnknownDecl { id: owner });
        };

        if !legal {
            return Err(GraphError::WrongDeclKind {
                name: owner_name,
                expected: match decl.kind {
                    MemberKind::Concrete { .. } => DeclKind::Class,
                    _ => DeclKind::Interface,
                },
            });
        }
        if members.iter().any(|m| m.sig == decl.sig) {
            return Err(GraphError::DuplicateMember {
                owner: owner_name,
                member: member_name,
            });
        }
        members.push(decl);
        Ok(())
    }

    /// Declare an abstract member on an interface.
    pub fn declare_abstract(&mut self, owner: DefId, sig: MemberSig) -> Result<(), GraphError> {
        self.declare(owner, MemberDecl::new(sig, MemberKind::Abstract))
    }

    /// Declare a member with a default implementation on an interface.
    pub fn declare_default(
        &mut self,
        owner: DefId,
        sig: MemberSig,
        body: BodyId,
    ) -> Result<(), GraphError> {
        self.declare(owner, MemberDecl::new(sig, MemberKind::Default { body }))
    }

    /// Declare an explicit implementation of an ancestor's slot.
    pub fn declare_explicit(
        &mut self,
        owner: DefId,
        target: DefId,
        sig: MemberSig,
        body: BodyId,
    ) -> Result<(), GraphError> {
        self.declare(owner, MemberDecl::new(sig, MemberKind::Explicit { target, body }))
    }

    /// Declare that an interface retracts the inherited implementation of
    /// a signature along paths through it.
    pub fn declare_deimpl(&mut self, owner: DefId, sig: MemberSig) -> Result<(), GraphError> {
        self.declare(owner, MemberDecl::new(sig, MemberKind::Deimplement))
    }

    /// Declare a concrete class member.
    pub fn declare_concrete(
        &mut self,
        owner: DefId,
        sig: MemberSig,
        body: BodyId,
    ) -> Result<(), GraphError> {
        self.declare(owner, MemberDecl::new(sig, MemberKind::Concrete { body }))
    }

    /// Validate and freeze the graph.
    pub fn finish(self) -> Result<DeclGraph, GraphError> {
        self.check_references()?;
        self.check_acyclic()?;
        let iface_ancestors = self.compute_ancestors();
        self.check_explicit_targets(&iface_ancestors)?;

        let GraphBuilder { interner, interfaces, classes, .. } = self;
        Ok(DeclGraph::new(interner, interfaces, classes, iface_ancestors))
    }

    fn name_of(&self, id: DefId) -> String {
        let sym = self
            .interfaces
            .get(&id)
            .map(|i| i.name)
            .or_else(|| self.classes.get(&id).map(|c| c.name));
        sym.and_then(|s| self.interner.resolve(s))
            .unwrap_or("<unknown>")
            .to_string()
    }

    fn member_name(&self, sym: Symbol) -> String {
        self.interner.resolve(sym).unwrap_or("<unknown>").to_string()
    }

    /// Every edge must name a known declaration of the right kind.
    fn check_references(&self) -> Result<(), GraphError> {
        for iface in self.interfaces.values() {
            for &base in &iface.bases {
                if self.classes.contains_key(&base) {
                    return Err(GraphError::WrongDeclKind {
                        name: self.name_of(base),
                        expected: DeclKind::Interface,
                    });
                }
                if !self.interfaces.contains_key(&base) {
                    return Err(GraphError::UnknownDecl { id: base });
                }
            }
        }
        for class in self.classes.values() {
            if let Some(base) = class.base {
                if self.interfaces.contains_key(&base) {
                    return Err(GraphError::WrongDeclKind {
                        name: self.name_of(base),
                        expected: DeclKind::Class,
                    });
                }
                if !self.classes.contains_key(&base) {
                    return Err(GraphError::UnknownDecl { id: base });
                }
            }
            for &iface in &class.interfaces {
                if self.classes.contains_key(&iface) {
                    return Err(GraphError::WrongDeclKind {
                        name: self.name_of(iface),
                        expected: DeclKind::Interface,
                    });
                }
                if !self.interfaces.contains_key(&iface) {
                    return Err(GraphError::UnknownDecl { id: iface });
                }
            }
        }
        Ok(())
    }

    /// Defensive cycle check over base edges. Upstream should already have
    /// rejected cycles; a cyclic graph here would loop every traversal.
    fn check_acyclic(&self) -> Result<(), GraphError> {
        #[derive(Clone, Copy, PartialEq)]
        enum State {
            Visiting,
            Done,
        }

        let mut state: FxHashMap<DefId, State> = FxHashMap::default();
        let mut path: Vec<DefId> = Vec::new();

        fn visit(
            builder: &GraphBuilder,
            id: DefId,
            state: &mut FxHashMap<DefId, State>,
            path: &mut Vec<DefId>,
        ) -> Result<(), GraphError> {
            match state.get(&id) {
                Some(State::Done) => return Ok(()),
                Some(State::Visiting) => {
                    let start = path.iter().position(|&p| p == id).unwrap_or(0);
                    let mut cycle: Vec<String> =
                        path[start..].iter().map(|&p| builder.name_of(p)).collect();
                    cycle.push(builder.name_of(id));
                    return Err(GraphError::CyclicHierarchy { cycle });
                }
                None => {}
            }
            state.insert(id, State::Visiting);
            path.push(id);

            if let Some(iface) = builder.interfaces.get(&id) {
                for &base in &iface.bases {
                    visit(builder, base, state, path)?;
                }
            } else if let Some(class) = builder.classes.get(&id) {
                if let Some(base) = class.base {
                    visit(builder, base, state, path)?;
                }
            }

            path.pop();
            state.insert(id, State::Done);
            Ok(())
        }

        for &id in self.interfaces.keys().chain(self.classes.keys()) {
            visit(self, id, &mut state, &mut path)?;
        }
        Ok(())
    }

    /// Transitive base interfaces per interface. Requires an acyclic graph.
    fn compute_ancestors(&self) -> FxHashMap<DefId, FxHashSet<DefId>> {
        fn ancestors_of(
            builder: &GraphBuilder,
            id: DefId,
            memo: &mut FxHashMap<DefId, FxHashSet<DefId>>,
        ) -> FxHashSet<DefId> {
            if let Some(found) = memo.get(&id) {
                return found.clone();
            }
            let mut set = FxHashSet::default();
            if let Some(iface) = builder.interfaces.get(&id) {
                for &base in &iface.bases {
                    set.insert(base);
                    set.extend(ancestors_of(builder, base, memo));
                }
            }
            memo.insert(id, set.clone());
            set
        }

        let mut memo = FxHashMap::default();
        for &id in self.interfaces.keys() {
            ancestors_of(self, id, &mut memo);
        }
        memo
    }

    /// An explicit implementation must target an inherited slot: an
    /// ancestor interface that itself declares the signature as its own
    /// (abstract or default).
    fn check_explicit_targets(
        &self,
        iface_ancestors: &FxHashMap<DefId, FxHashSet<DefId>>,
    ) -> Result<(), GraphError> {
        let slot_exists = |target: DefId, sig: &MemberSig| {
            self.interfaces.get(&target).is_some_and(|iface| {
                iface.members.iter().any(|m| {
                    &m.sig == sig
                        && matches!(m.kind, MemberKind::Abstract | MemberKind::Default { .. })
                })
            })
        };

        for iface in self.interfaces.values() {
            for member in &iface.members {
                if let MemberKind::Explicit { target, .. } = member.kind {
                    let reachable = iface_ancestors
                        .get(&iface.def_id)
                        .is_some_and(|set| set.contains(&target));
                    if !reachable || !slot_exists(target, &member.sig) {
                        return Err(GraphError::InvalidExplicitTarget {
                            owner: self.name_of(iface.def_id),
                            target: self.name_of(target),
                            member: self.member_name(member.sig.name),
                        });
                    }
                }
            }
        }

        for class in self.classes.values() {
            // The class's interface closure: every directly implemented
            // interface plus its transitive bases, across the whole chain.
            let mut closure = FxHashSet::default();
            let mut cursor = Some(class.def_id);
            while let Some(id) = cursor {
                let decl = &self.classes[&id];
                for &iface in &decl.interfaces {
                    closure.insert(iface);
                    if let Some(set) = iface_ancestors.get(&iface) {
                        closure.extend(set.iter().copied());
                    }
                }
                cursor = decl.base;
            }

            for member in &class.members {
                if let MemberKind::Explicit { target, .. } = member.kind {
                    if !closure.contains(&target) || !slot_exists(target, &member.sig) {
                        return Err(GraphError::InvalidExplicitTarget {
                            owner: self.name_of(class.def_id),
                            target: self.name_of(target),
                            member: self.member_name(member.sig.name),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
