//! Tracing of grammar compilation and word derivation.
//!
//! The [`Tracer`] plugs into the engine as both a compile observer and a
//! morphology observer. With tracing off, every hook returns immediately.
//!
//! # Example
//!
//! ```text
//! compile  compiled C (3 alternatives)
//! compile  loaded elvish.txt: 12 rules, 4 transformations
//! W0001    #1: than-a => dan-a
//! W0001 word "dana"
//! ```

pub mod buffer;
pub mod format;
pub mod record;

pub use buffer::{TraceBuffer, TraceBufferStats};
pub use format::{HumanFormatter, TraceFormatter};
pub use record::{TraceEvent, TraceRecord};

use std::io::{self, Write};
use std::time::Instant;

use wordsmith_engine::{CompileObserver, MorphologyObserver};
use wordsmith_foundation::RuleId;

use crate::config::DebugConfig;

/// Where trace output is sent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TraceOutput {
    /// Nowhere; records are only buffered.
    #[default]
    None,
    /// Standard error.
    Stderr,
}

/// Records compile and derivation events.
#[derive(Debug)]
pub struct Tracer {
    config: DebugConfig,
    output: TraceOutput,
    buffer: TraceBuffer,
    current_word: u64,
    start_time: Instant,
    formatter: HumanFormatter,
}

impl Tracer {
    /// Creates a tracer from a configuration.
    #[must_use]
    pub fn new(config: DebugConfig) -> Self {
        let output = if config.trace_to_stderr {
            TraceOutput::Stderr
        } else {
            TraceOutput::None
        };
        let mut formatter = HumanFormatter::new();
        if config.show_timestamps {
            formatter = formatter.with_timestamps();
        }

        Self {
            buffer: TraceBuffer::new(config.buffer_size),
            config,
            output,
            current_word: 0,
            start_time: Instant::now(),
            formatter,
        }
    }

    /// Creates a tracer that records nothing.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(DebugConfig::default())
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &DebugConfig {
        &self.config
    }

    /// Returns whether tracing is enabled.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Enables tracing.
    pub fn enable(&mut self) {
        self.config.enabled = true;
    }

    /// Disables tracing.
    pub fn disable(&mut self) {
        self.config.enabled = false;
    }

    /// Sets the output destination.
    pub fn set_output(&mut self, output: TraceOutput) {
        self.output = output;
    }

    /// Starts a new word; later events are tagged with its sequence number.
    pub fn begin_word(&mut self) {
        self.current_word += 1;
    }

    /// Returns the sequence number of the current word.
    #[must_use]
    pub fn current_word(&self) -> u64 {
        self.current_word
    }

    /// Records an event, subject to the configuration.
    #[inline]
    pub fn record(&mut self, event: TraceEvent) {
        if !self.config.enabled {
            return;
        }

        self.record_internal(event);
    }

    fn record_internal(&mut self, event: TraceEvent) {
        let wanted = match event {
            TraceEvent::RuleCompiled { .. } | TraceEvent::TransformationCompiled { .. } => {
                self.config.trace_compile
            }
            TraceEvent::MorphologyStep { .. } => self.config.trace_morphology,
            TraceEvent::GrammarLoaded { .. } | TraceEvent::WordGenerated { .. } => true,
        };
        if !wanted {
            return;
        }

        let word = if event.is_compile_event() {
            0
        } else {
            self.current_word
        };
        #[allow(clippy::cast_possible_truncation)]
        let timestamp_ns = self.start_time.elapsed().as_nanos() as u64;
        self.buffer.push(word, timestamp_ns, event);

        if self.output == TraceOutput::Stderr {
            if let Some(record) = self.buffer.last() {
                let _ = writeln!(io::stderr(), "{}", self.formatter.format(record));
            }
        }
    }

    /// Returns the trace buffer.
    #[must_use]
    pub fn buffer(&self) -> &TraceBuffer {
        &self.buffer
    }

    /// Clears the trace buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Returns buffer statistics.
    #[must_use]
    pub fn stats(&self) -> TraceBufferStats {
        self.buffer.stats()
    }

    /// Records a grammar load.
    pub fn grammar_loaded(&mut self, source: &str, rules: usize, transformations: usize) {
        self.record(TraceEvent::GrammarLoaded {
            source: source.to_string(),
            rules,
            transformations,
        });
    }

    /// Records the final form of the current word.
    pub fn word_generated(&mut self, word: &str) {
        self.record(TraceEvent::WordGenerated {
            word: word.to_string(),
        });
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::disabled()
    }
}

impl CompileObserver for Tracer {
    fn rule_compiled(&mut self, id: RuleId, alternatives: usize) {
        self.record(TraceEvent::RuleCompiled {
            rule: id,
            alternatives,
        });
    }

    fn transformation_compiled(&mut self, index: usize, expanded: &str) {
        self.record(TraceEvent::TransformationCompiled {
            index,
            expanded: expanded.to_string(),
        });
    }
}

impl MorphologyObserver for Tracer {
    fn step(&mut self, index: usize, before: &str, after: &str) {
        self.record(TraceEvent::MorphologyStep {
            index,
            before: before.to_string(),
            after: after.to_string(),
        });
    }
}
