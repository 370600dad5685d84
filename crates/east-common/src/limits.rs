//! Centralized limits and thresholds for the East pipeline.
//!
//! Mirrors the teacher's practice of keeping magic numbers in one place
//! (`tsz_common::limits`) rather than scattered as literals through the
//! analyzer.

/// Recursion-stack nodes are tracked in a `visited` set to catch cyclic IR
/// (spec §5). The analyzer's `enter()` rejects a node with an `IrInvariant`
/// error once that set reaches this size, so a genuinely pathological IR
/// graph fails fast instead of exhausting memory or the native call stack.
pub const MAX_VISITING_DEPTH: usize = 10_000;

/// Maximum number of `(lhs, rhs)` pairs the type-equality/subtype visited-pair
/// memo will track before assuming divergence. In practice mutually
/// recursive type graphs are small; this is a backstop.
pub const MAX_TYPE_PAIR_MEMO: usize = 100_000;
