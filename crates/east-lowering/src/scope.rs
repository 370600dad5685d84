//! The lowering pass's own name-resolution chain.
//!
//! This is distinct from the analyzer's scope chain (`east-analyzer`): it
//! exists only long enough to assign each `Variable` reference the
//! [`VarId`] of the definition it came from, and to look up a captured
//! name's declared type/mutability when building a function's capture list.
//! It carries no `captured`/validation state — that is the analyzer's job.

use east_common::Atom;
use east_ir::VarId;
use east_types::Type;
use rustc_hash::FxHashMap;

#[derive(Clone)]
pub struct Binding {
    pub var_id: VarId,
    pub ty: Type,
    pub mutable: bool,
}

/// A stack of blocks' bindings, innermost last. Lookups walk from the top.
#[derive(Default)]
pub struct LoweringScope {
    frames: Vec<FxHashMap<Atom, Binding>>,
}

impl LoweringScope {
    pub fn new() -> Self {
        LoweringScope { frames: vec![FxHashMap::default()] }
    }

    pub fn push(&mut self) {
        self.frames.push(FxHashMap::default());
    }

    pub fn pop(&mut self) {
        self.frames.pop();
    }

    pub fn insert(&mut self, name: Atom, var_id: VarId, ty: Type, mutable: bool) {
        self.frames
            .last_mut()
            .expect("lowering scope stack is never empty")
            .insert(name, Binding { var_id, ty, mutable });
    }

    pub fn resolve(&self, name: &Atom) -> Option<&Binding> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }
}
