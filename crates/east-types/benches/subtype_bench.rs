//! Subtype/equality microbenchmarks (spec §8 test tooling,
//! SPEC_FULL.md §8).
//!
//! Focus: cost of recursive-type equality under the visited-pair memo
//! (spec §4.1), and of deep structural types on the subtype fast path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use east_common::Atom;
use east_types::{is_subtype, is_type_equal, Type};

/// `Recursive(self -> Variant{nil: Null, cons: Struct{head: Integer, tail: self}})`,
/// a minimal cons-list shape deep enough to exercise the visited-pair memo
/// more than once per comparison.
fn cons_list() -> Type {
    Type::recursive(|self_ty| {
        Type::variant([
            (Atom::from("nil"), Type::null()),
            (
                Atom::from("cons"),
                Type::r#struct([(Atom::from("head"), Type::integer()), (Atom::from("tail"), self_ty)]),
            ),
        ])
    })
}

/// A struct with `width` primitive fields, used to measure the linear cost
/// of structural equality over wide records.
fn wide_struct(width: usize) -> Type {
    Type::r#struct((0..width).map(|i| (Atom::from(format!("f{i}")), Type::integer())))
}

fn bench_recursive_equality(c: &mut Criterion) {
    let mut group = c.benchmark_group("recursive_type_equality");
    for pairs in [1usize, 4, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(pairs), &pairs, |b, &pairs| {
            let lists: Vec<Type> = (0..pairs).map(|_| cons_list()).collect();
            b.iter(|| {
                for t in &lists {
                    black_box(is_type_equal(t, t));
                }
            });
        });
    }
    group.finish();
}

fn bench_distinct_recursive_allocations(c: &mut Criterion) {
    c.bench_function("distinct_recursive_allocations_equal", |b| {
        let a = cons_list();
        let bty = cons_list();
        b.iter(|| black_box(is_type_equal(&a, &bty)));
    });
}

fn bench_wide_struct_subtype(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_struct_subtype");
    for width in [4usize, 32, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            let a = wide_struct(width);
            let bty = wide_struct(width);
            b.iter(|| black_box(is_subtype(&a, &bty)));
        });
    }
    group.finish();
}

fn bench_never_subtype_short_circuit(c: &mut Criterion) {
    c.bench_function("never_subtype_of_deep_recursive", |b| {
        let never = Type::never();
        let list = cons_list();
        b.iter(|| black_box(is_subtype(&never, &list)));
    });
}

criterion_group!(
    benches,
    bench_recursive_equality,
    bench_distinct_recursive_allocations,
    bench_wide_struct_subtype,
    bench_never_subtype_short_circuit
);
criterion_main!(benches);
