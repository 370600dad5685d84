//! Variable identity in the IR.
//!
//! The AST refers to variables by textual name; lowering (`east-lowering`)
//! resolves every reference to a [`VarId`] tied to the definition it came
//! from, the way a closure-converting compiler replaces name lookup with a
//! slot index. The analyzer still keeps names around (in [`VarDef`]) purely
//! for diagnostic text.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use east_common::Atom;
use east_types::Type;

/// A unique identifier for one variable definition (a `Let`, a function
/// parameter, a loop variable, or a `TryCatch` catch binding). Two
/// [`Variable`](crate::ir::IrKind::Variable) references that resolve to the
/// same definition carry the same `VarId`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct VarId(u32);

impl VarId {
    /// Allocates a fresh id. Lowering owns one counter per lowering pass;
    /// ids are not meaningful across separate lowering runs.
    pub fn fresh() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        VarId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Debug for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A variable-definition node's metadata (spec §3.4: "Variable-definition IR
/// nodes additionally carry a unique name, a mutability flag, and a
/// `captured` flag").
#[derive(Debug)]
pub struct VarDef {
    pub var_id: VarId,
    pub name: Atom,
    pub ty: Type,
    pub mutable: bool,
    /// Set by the analyzer when some inner function body references this
    /// definition (spec §4.3, "Capture marking"). `false` until analysis runs.
    /// An atomic rather than a `Cell` so a whole `IrNode` tree stays `Sync`:
    /// `east-analyzer::analyze_many` hands disjoint roots to separate
    /// threads (spec §5), and each root's flags are touched by exactly one
    /// thread, so `Relaxed` ordering is enough.
    pub captured: AtomicBool,
}

impl VarDef {
    pub fn new(name: impl Into<Atom>, ty: Type, mutable: bool) -> Self {
        VarDef {
            var_id: VarId::fresh(),
            name: name.into(),
            ty,
            mutable,
            captured: AtomicBool::new(false),
        }
    }

    pub fn is_captured(&self) -> bool {
        self.captured.load(Ordering::Relaxed)
    }

    pub fn mark_captured(&self) {
        self.captured.store(true, Ordering::Relaxed);
    }
}

/// One entry of a function or async-function's explicit capture list (spec
/// §4.2): the captured variable's identity plus its original declared type
/// and mutability, carried forward so the analyzer can validate the capture
/// against the outer scope without re-deriving it.
#[derive(Clone, Debug)]
pub struct Capture {
    pub var_id: VarId,
    pub name: Atom,
    pub ty: Type,
    pub mutable: bool,
}
