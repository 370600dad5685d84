//! The builtin operation table (spec §4.5, §6.3): a static, host-supplied
//! mapping from a builtin's name to its input/output type schema. The
//! builtin standard library's actual bodies (Array/Set/Dict/String
//! operations) are out of scope (spec §1) — the analyzer only checks arity
//! and argument types against the declared signature.

use rustc_hash::FxHashMap;

use east_common::Atom;
use east_types::Type;

/// One builtin's declared signature (spec §6.3). Builtins are assumed
/// synchronous and already monomorphic at their call site — any generic
/// instantiation is resolved by the IR builder before the analyzer ever sees
/// the node (spec §4.5).
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltinSignature {
    pub inputs: Vec<Type>,
    pub output: Type,
}

impl BuiltinSignature {
    pub fn new(inputs: Vec<Type>, output: Type) -> Self {
        BuiltinSignature { inputs, output }
    }
}

/// An immutable, by-name lookup over the host's builtin registry (spec
/// §4.5). Unlike [`crate::platform::PlatformTable`], builtins carry no
/// sync/async distinction — they are always synchronous.
#[derive(Debug, Default)]
pub struct BuiltinTable {
    by_name: FxHashMap<Atom, BuiltinSignature>,
}

impl BuiltinTable {
    pub fn new(entries: impl IntoIterator<Item = (Atom, BuiltinSignature)>) -> Self {
        BuiltinTable { by_name: entries.into_iter().collect() }
    }

    pub fn empty() -> Self {
        BuiltinTable { by_name: FxHashMap::default() }
    }

    pub fn get(&self, name: &Atom) -> Option<&BuiltinSignature> {
        self.by_name.get(name)
    }
}
