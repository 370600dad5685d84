//! Structural equality, subtyping, and recursive-type expansion
//! (spec §3.2, §3.3, §4.1).

use crate::types::{RecursiveId, Type, TypeKind};
use east_common::limits::MAX_TYPE_PAIR_MEMO;
use rustc_hash::FxHashSet;

/// One-step unfolding of a `Recursive` type: substitutes every occurrence of
/// its `self` marker inside the body with the recursive type itself. All
/// other type kinds expand to themselves.
pub fn expand(ty: &Type) -> Type {
    match ty.kind() {
        TypeKind::Recursive(shape) => rewrite(&shape.body, &[(shape.id, ty.clone())]),
        _ => ty.clone(),
    }
}

/// Does `ty` contain a `RecursiveSelf` marker matching any id in `subst`,
/// anywhere in its structure (including inside nested recursive bodies)?
/// Used to skip rebuilding subtrees a substitution can't possibly touch,
/// which both saves allocation and keeps unrelated recursive subtrees
/// pointer-stable across repeated `expand()` calls (load-bearing for the
/// visited-pair memo in `equal_rec` to terminate without doing needless
/// extra work).
fn mentions_any(ty: &Type, subst: &[(RecursiveId, Type)]) -> bool {
    match ty.kind() {
        TypeKind::RecursiveSelf(id) => subst.iter().any(|(sid, _)| sid == id),
        TypeKind::Never
        | TypeKind::Null
        | TypeKind::Boolean
        | TypeKind::Integer
        | TypeKind::Float
        | TypeKind::String
        | TypeKind::DateTime
        | TypeKind::Blob => false,
        TypeKind::Ref(elem) | TypeKind::Array(elem) | TypeKind::Set(elem) => {
            mentions_any(elem, subst)
        }
        TypeKind::Dict(key, value) => mentions_any(key, subst) || mentions_any(value, subst),
        TypeKind::Struct(fields) | TypeKind::Variant(fields) => {
            fields.iter().any(|(_, t)| mentions_any(t, subst))
        }
        TypeKind::Function(inputs, output) | TypeKind::AsyncFunction(inputs, output) => {
            inputs.iter().any(|t| mentions_any(t, subst)) || mentions_any(output, subst)
        }
        TypeKind::Recursive(shape) => mentions_any(&shape.body, subst),
    }
}

/// Rewrites `ty`, replacing every marker in `subst` with its paired
/// replacement type. Subtrees that can't contain any of `subst`'s ids are
/// returned unchanged (same `Rc`, not a copy).
fn rewrite(ty: &Type, subst: &[(RecursiveId, Type)]) -> Type {
    if !mentions_any(ty, subst) {
        return ty.clone();
    }
    match ty.kind() {
        TypeKind::RecursiveSelf(id) => subst
            .iter()
            .rev()
            .find(|(sid, _)| sid == id)
            .map(|(_, replacement)| replacement.clone())
            .unwrap_or_else(|| ty.clone()),
        TypeKind::Never
        | TypeKind::Null
        | TypeKind::Boolean
        | TypeKind::Integer
        | TypeKind::Float
        | TypeKind::String
        | TypeKind::DateTime
        | TypeKind::Blob => ty.clone(),
        TypeKind::Ref(elem) => Type::r#ref(rewrite(elem, subst)),
        TypeKind::Array(elem) => Type::array(rewrite(elem, subst)),
        TypeKind::Set(key) => Type::set(rewrite(key, subst)),
        TypeKind::Dict(key, value) => Type::dict(rewrite(key, subst), rewrite(value, subst)),
        TypeKind::Struct(fields) => {
            Type::r#struct(fields.iter().map(|(name, t)| (name.clone(), rewrite(t, subst))))
        }
        TypeKind::Variant(cases) => {
            Type::variant(cases.iter().map(|(name, t)| (name.clone(), rewrite(t, subst))))
        }
        TypeKind::Function(inputs, output) => Type::function(
            inputs.iter().map(|t| rewrite(t, subst)),
            rewrite(output, subst),
        ),
        TypeKind::AsyncFunction(inputs, output) => Type::async_function(
            inputs.iter().map(|t| rewrite(t, subst)),
            rewrite(output, subst),
        ),
        TypeKind::Recursive(shape) => Type::recursive(|new_self| {
            let mut extended = subst.to_vec();
            extended.push((shape.id, new_self));
            rewrite(&shape.body, &extended)
        }),
    }
}

/// Tracks `(lhs, rhs)` type-pointer pairs currently assumed equal while
/// comparing recursive types, so that mutually-recursive bodies terminate
/// (spec §4.1, Amadio-Cardelli coinduction).
#[derive(Default)]
struct VisitedPairs {
    seen: FxHashSet<(usize, usize)>,
}

impl VisitedPairs {
    /// Returns `false` (meaning: assume equal, stop recursing) if this pair
    /// was already being compared further up the call stack; otherwise
    /// records it and returns `true`.
    fn enter(&mut self, a: &Type, b: &Type) -> bool {
        let key = (a.ptr(), b.ptr());
        if self.seen.contains(&key) {
            return false;
        }
        if self.seen.len() < MAX_TYPE_PAIR_MEMO {
            self.seen.insert(key);
        }
        true
    }
}

/// Structural equality (spec §3.2). `Recursive` pairs are compared by
/// one-step expansion under a visited-pair memo.
pub fn is_type_equal(a: &Type, b: &Type) -> bool {
    let mut env = VisitedPairs::default();
    equal_rec(a, b, &mut env)
}

fn equal_rec(a: &Type, b: &Type, env: &mut VisitedPairs) -> bool {
    if a.ptr() == b.ptr() {
        return true;
    }
    match (a.kind(), b.kind()) {
        (TypeKind::Never, TypeKind::Never)
        | (TypeKind::Null, TypeKind::Null)
        | (TypeKind::Boolean, TypeKind::Boolean)
        | (TypeKind::Integer, TypeKind::Integer)
        | (TypeKind::Float, TypeKind::Float)
        | (TypeKind::String, TypeKind::String)
        | (TypeKind::DateTime, TypeKind::DateTime)
        | (TypeKind::Blob, TypeKind::Blob) => true,
        (TypeKind::Ref(x), TypeKind::Ref(y)) => equal_rec(x, y, env),
        (TypeKind::Array(x), TypeKind::Array(y)) => equal_rec(x, y, env),
        (TypeKind::Set(x), TypeKind::Set(y)) => equal_rec(x, y, env),
        (TypeKind::Dict(k1, v1), TypeKind::Dict(k2, v2)) => {
            equal_rec(k1, k2, env) && equal_rec(v1, v2, env)
        }
        (TypeKind::Struct(f1), TypeKind::Struct(f2)) => {
            f1.len() == f2.len()
                && f1
                    .iter()
                    .zip(f2.iter())
                    .all(|((n1, t1), (n2, t2))| n1 == n2 && equal_rec(t1, t2, env))
        }
        (TypeKind::Variant(c1), TypeKind::Variant(c2)) => {
            // Both sides are already canonicalized by lexical case name at
            // construction time (`Type::variant`), so a positional zip is
            // sufficient.
            c1.len() == c2.len()
                && c1
                    .iter()
                    .zip(c2.iter())
                    .all(|((n1, t1), (n2, t2))| n1 == n2 && equal_rec(t1, t2, env))
        }
        (TypeKind::Function(i1, o1), TypeKind::Function(i2, o2))
        | (TypeKind::AsyncFunction(i1, o1), TypeKind::AsyncFunction(i2, o2)) => {
            i1.len() == i2.len()
                && i1.iter().zip(i2.iter()).all(|(x, y)| equal_rec(x, y, env))
                && equal_rec(o1, o2, env)
        }
        (TypeKind::Recursive(_), TypeKind::Recursive(_)) => {
            if !env.enter(a, b) {
                return true;
            }
            let ea = expand(a);
            let eb = expand(b);
            equal_rec(&ea, &eb, env)
        }
        (TypeKind::RecursiveSelf(x), TypeKind::RecursiveSelf(y)) => x == y,
        _ => false,
    }
}

/// Subtype test (spec §3.2 / §4.1): identical to equality except that
/// `Never` is a subtype of everything.
pub fn is_subtype(a: &Type, b: &Type) -> bool {
    a.is_never() || is_type_equal(a, b)
}
