//! Fixed type shapes that more than one crate in the pipeline needs to agree
//! on bit-for-bit, so they live here rather than being reconstructed
//! ad hoc wherever they're needed.

use east_common::Atom;

use crate::types::Type;

/// One stack frame as East represents it: `Struct{filename: String, line:
/// Integer, column: Integer}` (spec §4.3, the `TryCatch` node's catch-stack
/// variable type).
pub fn stack_frame() -> Type {
    Type::r#struct([
        (Atom::from("filename"), Type::string()),
        (Atom::from("line"), Type::integer()),
        (Atom::from("column"), Type::integer()),
    ])
}

/// `Array<Struct{filename: String, line: Integer, column: Integer}>` — the
/// declared type of a `TryCatch` node's catch-stack variable (spec §4.3).
pub fn stack_trace() -> Type {
    Type::array(stack_frame())
}
