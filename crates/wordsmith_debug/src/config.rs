//! Configuration for grammar tracing.

/// Controls what the tracer records and how much history it keeps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugConfig {
    /// Whether tracing is enabled (false = nothing recorded).
    pub enabled: bool,

    /// Maximum trace records kept in memory.
    pub buffer_size: usize,

    /// Print each record to stderr as it is recorded.
    pub trace_to_stderr: bool,

    /// Record rule and transformation compilation.
    pub trace_compile: bool,

    /// Record each morphology step applied to a word.
    pub trace_morphology: bool,

    /// Prefix printed records with the time since the tracer started.
    pub show_timestamps: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            buffer_size: 1000,
            trace_to_stderr: true,
            trace_compile: false,
            trace_morphology: true,
            show_timestamps: false,
        }
    }
}

impl DebugConfig {
    /// Creates a configuration with tracing enabled.
    ///
    /// Only morphology derivations are recorded.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Creates a configuration that records everything with timestamps.
    #[must_use]
    pub fn verbose() -> Self {
        Self {
            enabled: true,
            buffer_size: 10_000,
            trace_to_stderr: true,
            trace_compile: true,
            trace_morphology: true,
            show_timestamps: true,
        }
    }

    /// Builder method to set enabled state.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Builder method to set the buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Builder method to enable/disable stderr output.
    #[must_use]
    pub fn with_trace_to_stderr(mut self, trace: bool) -> Self {
        self.trace_to_stderr = trace;
        self
    }

    /// Builder method to enable/disable compile tracing.
    #[must_use]
    pub fn with_trace_compile(mut self, trace: bool) -> Self {
        self.trace_compile = trace;
        self
    }

    /// Builder method to enable/disable morphology tracing.
    #[must_use]
    pub fn with_trace_morphology(mut self, trace: bool) -> Self {
        self.trace_morphology = trace;
        self
    }

    /// Builder method to show timestamps.
    #[must_use]
    pub fn with_timestamps(mut self, show: bool) -> Self {
        self.show_timestamps = show;
        self
    }
}
