//! Line/column source locations, as surfaced in diagnostics.
//!
//! The byte-offset [`Span`](crate::span::Span) is what nodes carry internally;
//! a `SourceLocation` is the human-facing `{file, line, column}` triple the
//! error surface (spec §6.4) promises callers. The AST builder is the only
//! producer of a `SourceLocation`; lowering and analysis pass it through
//! verbatim.

use std::fmt;
use std::sync::Arc;

/// A 1-based line/column position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// `{filename, line, column}` — the location a diagnostic or IR node points at.
///
/// Filenames are interned behind an `Arc<str>` since a single compilation
/// root typically shares one filename across every node in its tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub filename: Arc<str>,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(filename: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        SourceLocation { filename: filename.into(), line, column }
    }

    /// A location for synthetic/test nodes with no real source text behind them.
    pub fn synthetic() -> Self {
        SourceLocation { filename: Arc::from("<synthetic>"), line: 0, column: 0 }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}
