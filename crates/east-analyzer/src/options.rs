//! The analyzer's "configuration" (SPEC_FULL.md §4.7): constructor
//! arguments, not a file format. There is no project file or tsconfig
//! equivalent at this layer — the platform table and builtin table are
//! already the bulk of the analyzer's configuration surface (spec §4.4,
//! §4.5); [`AnalyzerOptions`] covers the one remaining knob.

/// Small, constructor-argument configuration for [`crate::analyze`], in the
/// shape of the teacher's `BinderOptions`/`CheckerOptions` structs rather
/// than a parsed config file.
#[derive(Clone, Copy, Debug)]
pub struct AnalyzerOptions {
    /// Whether the analyzer's visiting-stack cycle detector (spec §5) is
    /// active. Always `true` outside of tests; disabled only by tests that
    /// intentionally feed a cyclic IR graph to exercise the detector itself
    /// without the detector also firing on the test harness's own fixture
    /// construction.
    pub detect_cycles: bool,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        AnalyzerOptions { detect_cycles: true }
    }
}
