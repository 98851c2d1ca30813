//! Translator configuration.

/// Configuration for a translation run.
#[derive(Debug, Clone, Default)]
pub struct TranslatorConfig {
    /// Install a `tracing` subscriber at `debug` level instead of `warn`.
    pub trace: bool,
}

impl TranslatorConfig {
    pub fn new() -> Self {
        TranslatorConfig::default()
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }
}
