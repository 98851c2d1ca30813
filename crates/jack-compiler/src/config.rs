//! Compiler configuration.
//!
//! Thin today (a single verbosity knob), built as a small builder so that
//! future embedders of [`crate::compile_path`] can extend it without
//! breaking callers — the same shape the rest of this toolchain uses for
//! its configuration structs.

/// Configuration for a compilation run.
#[derive(Debug, Clone, Default)]
pub struct CompilerConfig {
    /// Install a `tracing` subscriber at `debug` level instead of `warn`.
    pub trace: bool,
}

impl CompilerConfig {
    pub fn new() -> Self {
        CompilerConfig::default()
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
