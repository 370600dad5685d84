//! The analyzer's single error surface (spec §6.4, §7).
//!
//! One `AnalyzeError` per failed `analyze()` call: the analyzer fails fast
//! on the first contract violation it finds and never accumulates
//! diagnostics (spec §7, "Propagation policy"). `kind` is a closed enum
//! rather than a `tsz`-style numeric diagnostic code — East has no external
//! tooling contract that needs a stable code space (SPEC_FULL.md §3.7).

use std::fmt;

use east_common::SourceLocation;

/// The error taxonomy (spec §7).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Variable not in scope; assignment to const; mutability mismatch;
    /// duplicate platform/builtin name at setup.
    ScopeError,
    /// Expected exact type equality, found a different type.
    TypeMismatch,
    /// An `As` cast's child is not a subtype of the target, or is `Never`,
    /// or is an unnecessary identity cast.
    SubtypeError,
    /// Expected structural kind (Function/Struct/Variant/Array/Set/Dict/
    /// Recursive) found another; wrong field/case name; wrong arity;
    /// non-exhaustive match.
    ShapeError,
    /// `Return` outside a function; an `IfElse`/`Match` declared non-`Never`
    /// while every branch diverges, or declared `Never` while some branch
    /// does not.
    ControlFlowError,
    /// Cyclic IR reference; unknown builtin; a literal's runtime tag not
    /// matching its declared type; `Struct` construction field order that
    /// differs from the type's declaration order.
    IrInvariant,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::ScopeError => "ScopeError",
            ErrorKind::TypeMismatch => "TypeMismatch",
            ErrorKind::SubtypeError => "SubtypeError",
            ErrorKind::ShapeError => "ShapeError",
            ErrorKind::ControlFlowError => "ControlFlowError",
            ErrorKind::IrInvariant => "IrInvariant",
        };
        f.write_str(name)
    }
}

/// `{kind, message, location}` — the analyzer's sole failure value (spec
/// §6.4). `message` already carries any pretty-printed type text; there is
/// no structured payload beyond this triple, matching the teacher's plain
/// `Diagnostic` struct (`tsz_common::diagnostics::Diagnostic`) rather than a
/// `thiserror` derive tree (SPEC_FULL.md §7).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyzeError {
    pub kind: ErrorKind,
    pub message: String,
    pub location: SourceLocation,
}

impl AnalyzeError {
    pub fn new(kind: ErrorKind, location: SourceLocation, message: impl Into<String>) -> Self {
        AnalyzeError { kind, location, message: message.into() }
    }

    pub fn scope(location: SourceLocation, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ScopeError, location, message)
    }

    pub fn type_mismatch(location: SourceLocation, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeMismatch, location, message)
    }

    pub fn subtype(location: SourceLocation, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SubtypeError, location, message)
    }

    pub fn shape(location: SourceLocation, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ShapeError, location, message)
    }

    pub fn control_flow(location: SourceLocation, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ControlFlowError, location, message)
    }

    pub fn ir_invariant(location: SourceLocation, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IrInvariant, location, message)
    }
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.kind, self.message, self.location)
    }
}

impl std::error::Error for AnalyzeError {}
