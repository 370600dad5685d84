//! AST-to-IR lowering bridge for East (spec §4.2): assigns every variable
//! reference a stable identifier tied to its definition and computes each
//! function's explicit capture list by closure conversion.

pub mod free_vars;
pub mod lower;
pub mod scope;

pub use free_vars::free_vars;
pub use lower::lower;
