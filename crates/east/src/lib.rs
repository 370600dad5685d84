//! East: an embedded, typed expression language (spec §1).
//!
//! This crate aggregates the typed-IR pipeline's individual crates the way
//! `tsz-core` aggregates `tsz-scanner`/`tsz-parser`/`tsz-binder`/.../
//! `tsz-checker` behind a single dependency — each constituent crate is
//! re-exported here as a same-named module, so a host embedding East
//! depends on one crate (`east`) rather than six.
//!
//! The pipeline, leaves first (spec §2):
//!
//! 1. [`types`] — the type system: algebraic type values, subtyping,
//!    equality, recursive-type expansion.
//! 2. [`common`] — source locations and compiler limits shared by every
//!    other module.
//! 3. [`ast`] — the AST node set and a constructor-level builder surface.
//! 4. [`ir`] — the IR node set shared by lowering and analysis.
//! 5. [`lowering`] — AST-to-IR lowering (closure conversion).
//! 6. [`analyzer`] — the semantic analyzer: typing, scoping, async
//!    contagion, capture marking.
//!
//! [`compile`] runs steps 5 and 6 back to back, the common case for a host
//! that has already built an AST and just wants validated, enriched IR.

pub mod analyzer {
    pub use east_analyzer::*;
}
pub mod ast {
    pub use east_ast::*;
}
pub mod common {
    pub use east_common::*;
}
pub mod ir {
    pub use east_ir::*;
}
pub mod lowering {
    pub use east_lowering::*;
}
pub mod types {
    pub use east_types::*;
}

/// Lowers `ast` to IR and runs the semantic analyzer over it in one call,
/// against the given platform and builtin tables (spec §2: "compiled to an
/// executable function", of which this is the validate-and-enrich half —
/// code generation itself is a backend concern, out of scope, spec §1).
///
/// Returns the lowered [`east_ir::IrNode`] alongside the
/// [`east_analyzer::AnalyzedIr`] proof token, since the latter only borrows
/// the former: callers that need to walk the enriched tree (to hand it to a
/// code generator) need the owned `IrNode` kept alive.
pub fn compile(
    ast: &east_ast::AstNode,
    platform: &east_analyzer::PlatformTable,
    builtins: &east_analyzer::BuiltinTable,
) -> Result<east_ir::IrNode, east_analyzer::AnalyzeError> {
    let ir = east_lowering::lower(ast);
    east_analyzer::analyze(&ir, platform, builtins)?;
    Ok(ir)
}
