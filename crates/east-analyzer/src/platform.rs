//! The platform function table (spec §4.4, §6.2): an external collaborator
//! the analyzer consumes read-only. The registry's runtime implementation is
//! out of scope (spec §1) — the analyzer only ever needs a platform
//! function's signature and whether calling it suspends.

use rustc_hash::FxHashMap;

use east_common::Atom;
use east_types::Type;

use crate::error::AnalyzeError;

/// Whether calling a platform function suspends (spec §3.1's `AsyncFunction`
/// distinction, carried into the registry per spec §6.2).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatformKind {
    Sync,
    Async,
}

/// One platform function's signature, as the host's platform registry
/// supplies it (spec §6.2: `{name, inputs, output, kind: "sync" | "async"}`).
#[derive(Clone, Debug, PartialEq)]
pub struct PlatformSignature {
    pub name: Atom,
    pub inputs: Vec<Type>,
    pub output: Type,
    pub kind: PlatformKind,
}

impl PlatformSignature {
    pub fn sync(name: impl Into<Atom>, inputs: Vec<Type>, output: Type) -> Self {
        PlatformSignature { name: name.into(), inputs, output, kind: PlatformKind::Sync }
    }

    pub fn r#async(name: impl Into<Atom>, inputs: Vec<Type>, output: Type) -> Self {
        PlatformSignature { name: name.into(), inputs, output, kind: PlatformKind::Async }
    }

    pub fn is_async(&self) -> bool {
        matches!(self.kind, PlatformKind::Async)
    }
}

/// An immutable, by-name lookup over the host's platform registry (spec
/// §4.4). Built once; shared read-only across however many `analyze()`
/// calls run against it, including the parallel ones `analyze_many` issues
/// (spec §5).
#[derive(Debug, Default)]
pub struct PlatformTable {
    by_name: FxHashMap<Atom, PlatformSignature>,
}

impl PlatformTable {
    /// Builds a table from the host's registry records. Rejects setup with a
    /// `ScopeError` if any name is duplicated (spec §4.4: "names must be
    /// unique"; spec §6.2: "Duplicate names reject setup").
    pub fn new(
        records: impl IntoIterator<Item = PlatformSignature>,
    ) -> Result<Self, AnalyzeError> {
        let mut by_name = FxHashMap::default();
        for record in records {
            if by_name.contains_key(&record.name) {
                return Err(AnalyzeError::scope(
                    east_common::SourceLocation::synthetic(),
                    format!("duplicate platform function name '{}'", record.name),
                ));
            }
            by_name.insert(record.name.clone(), record);
        }
        Ok(PlatformTable { by_name })
    }

    pub fn empty() -> Self {
        PlatformTable { by_name: FxHashMap::default() }
    }

    pub fn get(&self, name: &Atom) -> Option<&PlatformSignature> {
        self.by_name.get(name)
    }
}
