//! East's semantic analyzer (spec §2 item 3, §4.3): the hardest part of the
//! pipeline. A single recursive pass over an [`east_ir::IrNode`] tree that
//! validates every typing and scoping rule, computes `is_async` contagion,
//! and marks which variable definitions are captured by inner functions.
//!
//! Consumes two read-only, host-supplied tables (spec §4.4, §4.5):
//! [`PlatformTable`] and [`BuiltinTable`]. Produces an [`AnalyzedIr`] — a
//! proof that the borrowed tree was enriched in place, not a copy (spec
//! §6.1).

pub mod analyzer;
pub mod builtin;
pub mod error;
pub mod options;
pub mod platform;
pub mod scope;

pub use analyzer::{analyze, analyze_with_options, AnalyzedIr};
pub use builtin::{BuiltinSignature, BuiltinTable};
pub use error::{AnalyzeError, ErrorKind};
pub use options::AnalyzerOptions;
pub use platform::{PlatformKind, PlatformSignature, PlatformTable};

use east_ir::IrNode;

/// Analyzes every root in `roots` independently, in parallel (SPEC_FULL.md
/// §4.8). Sound because `analyze` touches only the tree reachable from its
/// own root plus the two read-only tables (spec §5: "multiple analyses may
/// run in parallel on disjoint IR roots provided the platform and builtin
/// tables are immutable") — disjoint roots never share a `VarDef`/`IrNode`,
/// so there is no data race on the atomics each analysis mutates.
pub fn analyze_many<'a>(
    roots: &'a [IrNode],
    platform: &PlatformTable,
    builtins: &BuiltinTable,
) -> Vec<Result<AnalyzedIr<'a>, AnalyzeError>> {
    use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
    roots.par_iter().map(|root| analyze(root, platform, builtins)).collect()
}
