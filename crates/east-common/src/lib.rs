//! Common types shared across the East typed-IR pipeline crates.
//!
//! This crate provides foundational pieces used by `east-types`, `east-ast`,
//! `east-ir`, `east-lowering` and `east-analyzer`:
//! - Byte-offset [`Span`]s for AST/IR nodes
//! - Human-facing [`SourceLocation`]s for diagnostics
//! - Compiler limits and thresholds

pub mod atom;
pub mod limits;
pub mod location;
pub mod span;

pub use atom::Atom;
pub use location::{Position, SourceLocation};
pub use span::Span;
