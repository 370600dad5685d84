//! The "data type" predicate (spec §3.1): primitives, `Struct`/`Variant`
//! whose components are data, `Recursive` over data, and `Set`/`Dict`
//! thereof. Data types are the only types eligible as `Set` keys or `Dict`
//! keys, and the only types for which a total order is defined.

use crate::equality::expand;
use crate::types::{Type, TypeKind};
use rustc_hash::FxHashSet;

/// Is `ty` a data type (spec §3.1)? `Function`/`AsyncFunction`/`Ref`/`Array`
/// are not data types: they carry mutable or non-comparable identity.
pub fn is_data_type(ty: &Type) -> bool {
    let mut visiting = FxHashSet::default();
    is_data_type_rec(ty, &mut visiting)
}

fn is_data_type_rec(ty: &Type, visiting: &mut FxHashSet<usize>) -> bool {
    match ty.kind() {
        TypeKind::Never
        | TypeKind::Null
        | TypeKind::Boolean
        | TypeKind::Integer
        | TypeKind::Float
        | TypeKind::String
        | TypeKind::DateTime
        | TypeKind::Blob => true,
        TypeKind::Struct(fields) => fields.iter().all(|(_, t)| is_data_type_rec(t, visiting)),
        TypeKind::Variant(cases) => cases.iter().all(|(_, t)| is_data_type_rec(t, visiting)),
        TypeKind::Set(key) => is_data_type_rec(key, visiting),
        TypeKind::Dict(key, value) => is_data_type_rec(key, visiting) && is_data_type_rec(value, visiting),
        TypeKind::Recursive(_) => {
            let ptr = ty.ptr();
            if !visiting.insert(ptr) {
                // Already checking this recursive type further up the
                // stack; assume it holds (coinductive, same technique as
                // equality's visited-pair memo).
                return true;
            }
            let result = is_data_type_rec(&expand(ty), visiting);
            visiting.remove(&ptr);
            result
        }
        TypeKind::RecursiveSelf(_) => true,
        TypeKind::Ref(_) | TypeKind::Array(_) | TypeKind::Function(..) | TypeKind::AsyncFunction(..) => false,
    }
}
