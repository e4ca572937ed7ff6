//! Identifiers, type shapes, and member signatures.
//!
//! This is the vocabulary shared by the declaration graph and the
//! resolution queries. The engine only needs the *shapes* that member
//! signatures mention (whether a type is value kind or reference kind,
//! how a parameter is passed), not a full type representation; bodies are
//! opaque handles owned by the frontend.

use bitflags::bitflags;

/// Interned name symbol. Names are interned by the [`GraphBuilder`] and
/// resolved back to text through the finished graph.
///
/// [`GraphBuilder`]: crate::graph::GraphBuilder
pub type Symbol = string_interner::DefaultSymbol;

/// The ID of a top-level declaration (interface or class).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefId {
    /// The index of this definition.
    pub index: u32,
}

impl DefId {
    /// Create a DefId from an index.
    pub fn new(index: u32) -> Self {
        Self { index }
    }

    /// Get the index of this definition.
    pub fn index(self) -> u32 {
        self.index
    }
}

/// The ID of a type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TyVarId {
    /// The index of this type variable.
    pub index: u32,
}

impl TyVarId {
    /// Create a TyVarId from an index.
    pub fn new(index: u32) -> Self {
        Self { index }
    }

    /// Get the index of this type variable.
    pub fn index(self) -> u32 {
        self.index
    }
}

/// An opaque handle to a member body.
///
/// Bodies are owned by the frontend; the engine ranks implementation
/// records but never looks inside them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId {
    /// The index of this body.
    pub index: u32,
}

impl BodyId {
    /// Create a BodyId from an index.
    pub fn new(index: u32) -> Self {
        Self { index }
    }

    /// Get the index of this body.
    pub fn index(self) -> u32 {
        self.index
    }
}

/// Built-in value-kind types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveTy {
    Unit,
    Bool,
    Char,
    I32,
    I64,
    F64,
    Str,
}

/// A type shape as mentioned by a member signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A built-in value kind.
    Primitive(PrimitiveTy),
    /// A user-declared value kind.
    Struct(DefId),
    /// A user-declared reference kind.
    Class(DefId),
    /// An interface type (reference kind).
    Interface(DefId),
    /// A type parameter; its constraints live on the enclosing declaration.
    Param(TyVarId),
    /// A type that failed to resolve upstream. Checks treat it leniently
    /// so one bad declaration does not cascade.
    Error,
}

/// A type, boxed so signatures stay small to clone and hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Type {
    pub kind: Box<TypeKind>,
}

impl Type {
    /// Create a type from a kind.
    pub fn new(kind: TypeKind) -> Self {
        Self { kind: Box::new(kind) }
    }

    /// Get the kind of this type.
    pub fn kind(&self) -> &TypeKind {
        self.kind.as_ref()
    }

    pub fn unit() -> Self {
        Self::new(TypeKind::Primitive(PrimitiveTy::Unit))
    }

    pub fn bool() -> Self {
        Self::new(TypeKind::Primitive(PrimitiveTy::Bool))
    }

    pub fn i32() -> Self {
        Self::new(TypeKind::Primitive(PrimitiveTy::I32))
    }

    pub fn i64() -> Self {
        Self::new(TypeKind::Primitive(PrimitiveTy::I64))
    }

    pub fn f64() -> Self {
        Self::new(TypeKind::Primitive(PrimitiveTy::F64))
    }

    pub fn str() -> Self {
        Self::new(TypeKind::Primitive(PrimitiveTy::Str))
    }

    pub fn strukt(def_id: DefId) -> Self {
        Self::new(TypeKind::Struct(def_id))
    }

    pub fn class(def_id: DefId) -> Self {
        Self::new(TypeKind::Class(def_id))
    }

    pub fn interface(def_id: DefId) -> Self {
        Self::new(TypeKind::Interface(def_id))
    }

    pub fn param(var: TyVarId) -> Self {
        Self::new(TypeKind::Param(var))
    }

    pub fn error() -> Self {
        Self::new(TypeKind::Error)
    }

    /// Whether the declared shape is a concrete value kind.
    pub fn is_value_kind(&self) -> bool {
        matches!(self.kind(), TypeKind::Primitive(_) | TypeKind::Struct(_))
    }

    /// Whether the declared shape is a reference kind.
    pub fn is_reference_kind(&self) -> bool {
        matches!(self.kind(), TypeKind::Class(_) | TypeKind::Interface(_))
    }
}

/// How a parameter or return value is passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassMode {
    /// By value.
    Value,
    /// By mutable reference.
    Ref,
    /// By read-only reference.
    RefReadOnly,
    /// Output parameter.
    Out,
}

/// The shape of one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParamSig {
    pub mode: PassMode,
    pub ty: Type,
}

impl ParamSig {
    pub fn value(ty: Type) -> Self {
        Self { mode: PassMode::Value, ty }
    }

    pub fn by_ref(ty: Type) -> Self {
        Self { mode: PassMode::Ref, ty }
    }

    pub fn readonly_ref(ty: Type) -> Self {
        Self { mode: PassMode::RefReadOnly, ty }
    }
}

/// The return shape of a member. Not part of signature identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RetSig {
    pub mode: PassMode,
    pub ty: Type,
}

impl RetSig {
    pub fn value(ty: Type) -> Self {
        Self { mode: PassMode::Value, ty }
    }

    pub fn readonly_ref(ty: Type) -> Self {
        Self { mode: PassMode::RefReadOnly, ty }
    }

    pub fn unit() -> Self {
        Self::value(Type::unit())
    }
}

/// The identity of a member: name, parameter shapes, and generic arity.
///
/// Equality is structural and this is the key resolution works over. Two
/// independently declared members with the same shape unify at any type
/// that inherits both. The return shape is deliberately excluded; it lives
/// on [`MemberDecl`].
///
/// [`MemberDecl`]: crate::graph::MemberDecl
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberSig {
    /// The member's name.
    pub name: Symbol,
    /// Parameter shapes, in order.
    pub params: Vec<ParamSig>,
    /// Number of generic parameters the member declares.
    pub generic_arity: u32,
}

impl MemberSig {
    /// A non-generic member with the given parameters.
    pub fn method(name: Symbol, params: Vec<ParamSig>) -> Self {
        Self { name, params, generic_arity: 0 }
    }

    /// A non-generic member with no parameters.
    pub fn nullary(name: Symbol) -> Self {
        Self::method(name, vec![])
    }

    /// A generic member.
    pub fn generic(name: Symbol, params: Vec<ParamSig>, generic_arity: u32) -> Self {
        Self { name, params, generic_arity }
    }
}

bitflags! {
    /// Member modifiers and signature markers.
    ///
    /// `READONLY_REF` is the descriptive marker recording that the
    /// signature involves a by-reference read-only parameter or return;
    /// `POISONED` is the blocking marker that makes the signature
    /// unconsumeable by callers unaware of the read-only contract. The
    /// two must travel together; see [`check_readonly_markers`].
    ///
    /// [`check_readonly_markers`]: crate::checks::check_readonly_markers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SigFlags: u8 {
        const STATIC = 1 << 0;
        const VIRTUAL = 1 << 1;
        const SEALED = 1 << 2;
        /// Descriptive read-only-reference marker.
        const READONLY_REF = 1 << 3;
        /// Blocking marker: unaware consumers cannot bind this signature.
        const POISONED = 1 << 4;
    }
}

/// A constraint on a type parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Must implement the given interface.
    Interface(DefId),
    /// Must be a value kind.
    ValueKind,
    /// Must be a reference kind.
    ReferenceKind,
}

/// A type parameter declaration with its constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParamDecl {
    /// The type parameter name.
    pub name: String,
    /// The unique ID for this type parameter.
    pub id: TyVarId,
    /// Constraints on the type parameter.
    pub constraints: Vec<ConstraintKind>,
}

impl TypeParamDecl {
    /// An unconstrained type parameter.
    pub fn unconstrained(name: impl Into<String>, id: TyVarId) -> Self {
        Self { name: name.into(), id, constraints: vec![] }
    }

    /// A type parameter with the given constraints.
    pub fn constrained(
        name: impl Into<String>,
        id: TyVarId,
        constraints: Vec<ConstraintKind>,
    ) -> Self {
        Self { name: name.into(), id, constraints }
    }
}
