//! Identifier and field-name text handles.
//!
//! An [`Atom`] is a cheaply-cloned, thread-safe handle to text used for
//! field names, case names, variable names, and platform/builtin names.
//! Equality is structural (`Arc<str>` content comparison): with no
//! surface-syntax parser in scope (spec §1), `Atom`s are never produced from
//! a shared source-text pool the way a real lexer's identifier table would
//! be, so there is no interning layer to dedupe against.

use std::fmt;
use std::sync::Arc;

/// A cheaply-cloned handle to text: a struct field name, variant case name,
/// variable name, or platform/builtin name.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Atom(Arc<str>);

impl Atom {
    pub fn new(text: impl AsRef<str>) -> Self {
        Atom(Arc::from(text.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialOrd for Atom {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Atom {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl From<&str> for Atom {
    fn from(s: &str) -> Self {
        Atom::new(s)
    }
}

impl From<String> for Atom {
    fn from(s: String) -> Self {
        Atom::new(s)
    }
}

impl std::borrow::Borrow<str> for Atom {
    fn borrow(&self) -> &str {
        &self.0
    }
}
