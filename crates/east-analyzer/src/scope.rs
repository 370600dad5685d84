//! The analyzer's own variable context (spec §4.3: "Variable context").
//!
//! A scope chain with prototype-style linkage: lookups walk from the
//! innermost frame outward; writes insert into the innermost frame only
//! (spec §9, "Scope chains"). This is a distinct structure from
//! `east-lowering::scope::LoweringScope` — that one exists only to assign
//! `VarId`s during closure conversion; this one additionally carries the
//! metadata (`type`, `mutable`, the owning function) the analyzer checks a
//! `Variable`/`Assign` node against.
//!
//! Each entry records the id of the function whose body it was introduced
//! in (`function_id`). A `Function`/`AsyncFunction` node starts a *new*,
//! parent-less scope populated with its validated captures and parameters
//! (spec §4.3's `Function` contract: "Build a fresh scope populated first by
//! validated captures... then by parameters") — it is not chained to the
//! defining scope, because closure conversion has already made the function
//! self-contained. Ordinary nested scopes (`Block`, `Match` case bodies,
//! loop bodies, `TryCatch` catch bodies) chain to the current scope and
//! inherit its `function_id`. Comparing a resolved entry's `function_id`
//! against the function currently being visited is what tells the analyzer
//! whether a `Variable` reference crosses a function boundary — the
//! condition spec §4.3 phrases as "resolution hops past the innermost
//! scope" and which drives capture marking.

use std::cell::RefCell;

use east_common::Atom;
use east_ir::VarId;
use east_types::Type;
use rustc_hash::FxHashMap;

/// A resolved variable's context metadata (spec §4.3).
#[derive(Clone)]
pub struct VarEntry {
    pub var_id: VarId,
    pub ty: Type,
    pub mutable: bool,
    /// The id of the function scope this entry was inserted under (0 for
    /// the program root, before any function has been entered).
    pub function_id: u32,
}

/// One frame of the analyzer's scope chain.
pub struct Scope<'p> {
    parent: Option<&'p Scope<'p>>,
    pub function_id: u32,
    entries: RefCell<FxHashMap<Atom, VarEntry>>,
}

impl<'p> Scope<'p> {
    /// The program root: no parent, function id 0.
    pub fn root() -> Self {
        Scope { parent: None, function_id: 0, entries: RefCell::new(FxHashMap::default()) }
    }

    /// A fresh scope chained to `self`, inheriting its `function_id` (used
    /// for `Block`, `Match` case bodies, loop bodies, `TryCatch` catch
    /// bodies — spec §4.3's "fresh scope chained to the current one").
    pub fn nested(&'p self) -> Scope<'p> {
        Scope { parent: Some(self), function_id: self.function_id, entries: RefCell::new(FxHashMap::default()) }
    }

    /// A fresh, parent-less scope for a function body, tagged with a new
    /// function id (spec §4.3's `Function` contract).
    pub fn function_root(function_id: u32) -> Scope<'p> {
        Scope { parent: None, function_id, entries: RefCell::new(FxHashMap::default()) }
    }

    pub fn insert(&self, name: Atom, var_id: VarId, ty: Type, mutable: bool) {
        self.entries
            .borrow_mut()
            .insert(name, VarEntry { var_id, ty, mutable, function_id: self.function_id });
    }

    /// Walks from this frame outward; the first match wins (shadowing is
    /// disallowed at construction time, spec §3.5, so at most one binding
    /// per name is visible within a single function's scope tree in
    /// practice, but nothing here depends on that — it is enforced by
    /// `Let`'s analyzer contract, not by this lookup).
    pub fn resolve(&self, name: &Atom) -> Option<VarEntry> {
        if let Some(entry) = self.entries.borrow().get(name) {
            return Some(entry.clone());
        }
        self.parent.and_then(|p| p.resolve(name))
    }

    /// Is `name` already bound in *this* frame (not an ancestor)? Used by
    /// `Let` to enforce "scoping is lexical with shadowing disallowed within
    /// the same block" (spec §3.5).
    pub fn is_bound_locally(&self, name: &Atom) -> bool {
        self.entries.borrow().contains_key(name)
    }
}
