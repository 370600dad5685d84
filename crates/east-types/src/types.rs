//! Algebraic type values (spec §3.1).
//!
//! A [`Type`] is a cheap-to-clone handle (`Arc<TypeKind>`) onto a structural,
//! closed recursive sum. There is no separate `TypeId`/interner table the way
//! `tsz_solver::TypeId` works over a central arena: East's types are small
//! enough, and constructed infrequently enough (they describe a program's
//! static shape, not its runtime values), that plain `Arc` sharing gives the
//! same pointer-identity fast path the solver's interner gives, without the
//! bookkeeping of a global table. `Arc` rather than `Rc` because a type graph
//! is shared read-only across the parallel analyses `east-analyzer::analyze_many`
//! runs over disjoint IR roots (spec §5).

use east_common::Atom;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Inline storage for a function type's parameter list. Most East functions
/// take a handful of arguments; `SmallVec` avoids a heap allocation for the
/// common case the way the teacher's solver backs its own type lists with
/// `SmallVec<[TypeId; 8]>` (`tsz_common::limits`).
pub type TypeList = SmallVec<[Type; 4]>;

/// A handle to a type value. Clone is an `Arc` bump, not a deep copy.
#[derive(Clone)]
pub struct Type(pub(crate) Arc<TypeKind>);

/// Unique identity for a [`Recursive`](TypeKind::Recursive) type, used both as
/// the marker matched by [`TypeKind::RecursiveSelf`] and as half of the
/// visited-pair memo key during equality/subtype checks (see `equality.rs`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RecursiveId(u64);

impl RecursiveId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        RecursiveId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// A small, human-readable tag for diagnostic text only (spec §4.1's
    /// pretty-printer is for error messages, not a stable identity).
    pub fn for_display(&self) -> u64 {
        self.0
    }
}

/// The body and identity of a recursive type (spec §3.3).
#[derive(Clone)]
pub struct RecursiveShape {
    pub id: RecursiveId,
    pub body: Type,
}

impl RecursiveShape {
    pub fn id_for_display(&self) -> u64 {
        self.id.for_display()
    }
}

/// The closed sum of type kinds (spec §3.1 / §3.4's node-specific payload for
/// type values).
pub enum TypeKind {
    Never,
    Null,
    Boolean,
    Integer,
    Float,
    String,
    DateTime,
    Blob,
    Ref(Type),
    Array(Type),
    Set(Type),
    Dict(Type, Type),
    /// Ordered named fields; declaration order is part of the type's identity.
    Struct(Vec<(Atom, Type)>),
    /// Ordered tagged cases, canonicalized by lexical case name at
    /// construction time so two variants built with cases in different
    /// orders compare equal (spec §4.1 "variants canonicalize by lexical
    /// case name").
    Variant(Vec<(Atom, Type)>),
    Function(TypeList, Type),
    AsyncFunction(TypeList, Type),
    Recursive(RecursiveShape),
    /// Placeholder standing for "self" inside a [`TypeKind::Recursive`]'s
    /// body; never meaningful outside the body that defines it.
    RecursiveSelf(RecursiveId),
}

macro_rules! primitive_ctor {
    ($name:ident, $kind:ident) => {
        /// Constructs the primitive type. Each call allocates a fresh `Arc`;
        /// primitives compare equal structurally (see `equality.rs`), so
        /// there is no need for a process-wide singleton.
        pub fn $name() -> Type {
            Type(Arc::new(TypeKind::$kind))
        }
    };
}

impl Type {
    pub fn kind(&self) -> &TypeKind {
        &self.0
    }

    pub(crate) fn ptr(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    primitive_ctor!(never, Never);
    primitive_ctor!(null, Null);
    primitive_ctor!(boolean, Boolean);
    primitive_ctor!(integer, Integer);
    primitive_ctor!(float, Float);
    primitive_ctor!(string, String);
    primitive_ctor!(datetime, DateTime);
    primitive_ctor!(blob, Blob);

    pub fn r#ref(element: Type) -> Type {
        Type(Arc::new(TypeKind::Ref(element)))
    }

    pub fn array(element: Type) -> Type {
        Type(Arc::new(TypeKind::Array(element)))
    }

    pub fn set(key: Type) -> Type {
        Type(Arc::new(TypeKind::Set(key)))
    }

    pub fn dict(key: Type, value: Type) -> Type {
        Type(Arc::new(TypeKind::Dict(key, value)))
    }

    /// Fields are stored in the order given; that order is significant for
    /// equality (spec §3.1: "Field order is part of identity").
    pub fn r#struct(fields: impl IntoIterator<Item = (Atom, Type)>) -> Type {
        Type(Arc::new(TypeKind::Struct(fields.into_iter().collect())))
    }

    /// Cases are canonicalized by lexical name regardless of input order.
    pub fn variant(cases: impl IntoIterator<Item = (Atom, Type)>) -> Type {
        let mut cases: Vec<(Atom, Type)> = cases.into_iter().collect();
        cases.sort_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()));
        Type(Arc::new(TypeKind::Variant(cases)))
    }

    pub fn function(inputs: impl IntoIterator<Item = Type>, output: Type) -> Type {
        Type(Arc::new(TypeKind::Function(inputs.into_iter().collect(), output)))
    }

    pub fn async_function(inputs: impl IntoIterator<Item = Type>, output: Type) -> Type {
        Type(Arc::new(TypeKind::AsyncFunction(inputs.into_iter().collect(), output)))
    }

    /// Builds a recursive type. `ctor` is invoked exactly once, receiving a
    /// placeholder type standing for "self"; wherever the returned body
    /// places that placeholder is where `self` appears (spec §3.3).
    pub fn recursive(ctor: impl FnOnce(Type) -> Type) -> Type {
        let id = RecursiveId::fresh();
        let self_marker = Type(Arc::new(TypeKind::RecursiveSelf(id)));
        let body = ctor(self_marker);
        Type(Arc::new(TypeKind::Recursive(RecursiveShape { id, body })))
    }

    pub fn is_never(&self) -> bool {
        matches!(self.kind(), TypeKind::Never)
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::pretty::display(self))
    }
}
