//! Recursive-type tests spanning the type system (spec §3.3, §4.1) and the
//! analyzer's `Match`/`WrapRecursive`/`UnwrapRecursive` contracts (spec
//! §4.3), corresponding to spec §8 property 5 ("equal(R1, R2) holds for
//! distinct Recursive wrappers whose one-step expansions are equal").

use east_analyzer::{analyze, BuiltinTable, ErrorKind, PlatformTable};
use east_ast::{builder, Literal};
use east_common::{Atom, SourceLocation, Span};
use east_types::{is_data_type, is_subtype, is_type_equal, Type};

fn loc() -> SourceLocation {
    SourceLocation::synthetic()
}

fn span() -> Span {
    Span::dummy()
}

fn cons_list() -> Type {
    Type::recursive(|self_ty| {
        Type::variant([
            (Atom::from("nil"), Type::null()),
            (Atom::from("cons"), Type::r#struct([(Atom::from("head"), Type::integer()), (Atom::from("tail"), self_ty)])),
        ])
    })
}

/// Two independently-constructed `Recursive` types with the same shape are
/// distinct `Arc` allocations but compare equal under the Amadio-Cardelli
/// one-step-expansion rule (spec §4.1).
#[test]
fn distinct_recursive_allocations_with_same_shape_are_equal() {
    let a = cons_list();
    let b = cons_list();
    assert!(is_type_equal(&a, &b));
    assert!(is_subtype(&a, &b));
    assert!(is_subtype(&b, &a));
}

/// Mutually recursive types (each referencing the other through one level
/// of indirection) terminate under the visited-pair memo rather than
/// diverging (spec §4.1, "Without this rule, equality diverges on mutually
/// recursive bodies").
#[test]
fn mutually_recursive_bodies_terminate() {
    // even = Variant{zero: Null, succ: odd}; odd = Variant{succ: even}
    // Constructed as a single self-referential Recursive whose body embeds
    // itself twice, standing in for true mutual recursion within this
    // crate's single-`self` Recursive representation (spec §3.3).
    let r1 = Type::recursive(|self_ty| {
        Type::variant([
            (Atom::from("zero"), Type::null()),
            (Atom::from("succ"), Type::array(self_ty)),
        ])
    });
    let r2 = Type::recursive(|self_ty| {
        Type::variant([
            (Atom::from("zero"), Type::null()),
            (Atom::from("succ"), Type::array(self_ty)),
        ])
    });
    assert!(is_type_equal(&r1, &r2));
}

/// `Never` is a subtype of a recursive type (and vice versa is false unless
/// structurally equal), per the general `Never <: T` law (spec §3.2).
#[test]
fn never_is_a_subtype_of_any_recursive_type() {
    let list_ty = cons_list();
    assert!(is_subtype(&Type::never(), &list_ty));
    assert!(!is_subtype(&list_ty, &Type::never()));
}

/// A recursive type over only data-type components is itself a data type
/// (spec §3.1): it is eligible as a Set/Dict key.
#[test]
fn recursive_type_over_data_components_is_a_data_type() {
    assert!(is_data_type(&cons_list()));
}

/// A recursive type that embeds a non-data component (here, an `Array`,
/// which is mutable) is not a data type.
#[test]
fn recursive_type_embedding_array_is_not_a_data_type() {
    let ty = Type::recursive(|self_ty| {
        Type::variant([
            (Atom::from("nil"), Type::null()),
            (Atom::from("cons"), Type::r#struct([(Atom::from("head"), Type::array(Type::integer())), (Atom::from("tail"), self_ty)])),
        ])
    });
    assert!(!is_data_type(&ty));
}

/// `WrapRecursive`/`UnwrapRecursive` round-trip through the analyzer: a
/// `nil` value can be wrapped into the recursive list type and then
/// unwrapped back to its expansion.
#[test]
fn wrap_then_unwrap_round_trips_through_the_analyzer() {
    let list_ty = cons_list();
    let expanded = east_types::expand(&list_ty);

    let nil = builder::new_variant(loc(), span(), expanded.clone(), "nil", builder::value(loc(), span(), Literal::Null));
    let wrapped = builder::wrap_recursive(loc(), span(), list_ty.clone(), nil);
    let unwrapped = builder::unwrap_recursive(loc(), span(), expanded.clone(), wrapped);

    let ir = east_lowering::lower(&unwrapped);
    let platform = PlatformTable::empty();
    let builtins = BuiltinTable::empty();
    analyze(&ir, &platform, &builtins).expect("wrap/unwrap round trip should type-check");
}

/// `UnwrapRecursive` applied to a value that isn't actually `Recursive`-typed
/// is a `ShapeError`.
#[test]
fn unwrap_recursive_on_non_recursive_value_is_a_shape_error() {
    let value = builder::value(loc(), span(), Literal::Integer("1".into()));
    let unwrap = builder::unwrap_recursive(loc(), span(), Type::integer(), value);
    let ir = east_lowering::lower(&unwrap);
    let platform = PlatformTable::empty();
    let builtins = BuiltinTable::empty();
    let err = analyze(&ir, &platform, &builtins).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ShapeError);
}

/// Exhaustiveness (spec §8 property 4): a `Match` missing a declared case of
/// the expanded variant is rejected even though the type is recursive.
#[test]
fn non_exhaustive_match_over_recursive_variant_is_rejected() {
    let list_ty = cons_list();
    let expanded = east_types::expand(&list_ty);
    let nil = builder::new_variant(loc(), span(), expanded, "nil", builder::value(loc(), span(), Literal::Null));
    let subject = builder::wrap_recursive(loc(), span(), list_ty, nil);
    let match_node = builder::match_(
        loc(), span(),
        Type::null(),
        subject,
        vec![builder::match_case("nil", "_n", builder::value(loc(), span(), Literal::Null))],
    );
    let ir = east_lowering::lower(&match_node);
    let platform = PlatformTable::empty();
    let builtins = BuiltinTable::empty();
    let err = analyze(&ir, &platform, &builtins).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ShapeError);
}
