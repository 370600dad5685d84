//! East's type system (spec §3.1, §4.1): algebraic type values, structural
//! equality, subtyping, recursive-type expansion, the data-type predicate,
//! and a diagnostic pretty-printer.
//!
//! Types are represented as a closed recursive sum ([`TypeKind`]) behind a
//! cheap-to-clone handle ([`Type`]). There is no fallible constructor in
//! this crate: every predicate here is total (spec §4.1, "Error mode: none").

pub mod data_type;
pub mod equality;
pub mod pretty;
pub mod types;
pub mod well_known;

pub use data_type::is_data_type;
pub use equality::{expand, is_subtype, is_type_equal};
pub use types::{RecursiveId, RecursiveShape, Type, TypeKind};
pub use well_known::{stack_frame, stack_trace};

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        is_type_equal(self, other)
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", pretty::display(self))
    }
}
