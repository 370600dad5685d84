//! The East abstract syntax tree: node definitions plus a constructor-level
//! builder surface (spec §2 item 2, §3.4).
//!
//! This crate has no parser: East's surface syntax is out of scope (spec
//! §1), so an `AstNode` tree is always produced programmatically, either by a
//! host embedding East or, in this workspace, by `builder` and by
//! `east-analyzer`'s tests.

pub mod ast;
pub mod builder;
pub mod literal;

pub use ast::{AstKind, AstNode, MatchCase, Param};
pub use literal::Literal;
