//! The IR East's lowerer produces and its analyzer validates (spec §3.4).

pub mod ir;
pub mod var;

pub use ir::{IrKind, IrMatchCase, IrNode};
pub use var::{Capture, VarDef, VarId};
