//! Trace output formatting.

use std::fmt::Write;

use super::record::{TraceEvent, TraceRecord};

/// Formats trace records as text.
pub trait TraceFormatter {
    /// Formats a single record.
    fn format(&self, record: &TraceRecord) -> String;
}

/// Formats trace records for a terminal.
#[derive(Clone, Debug, Default)]
pub struct HumanFormatter {
    /// Whether to include timestamps.
    pub show_timestamps: bool,
    /// Whether to include record ids.
    pub show_ids: bool,
}

impl HumanFormatter {
    /// Creates a formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to show timestamps.
    #[must_use]
    pub fn with_timestamps(mut self) -> Self {
        self.show_timestamps = true;
        self
    }

    /// Builder method to show record ids.
    #[must_use]
    pub fn with_ids(mut self) -> Self {
        self.show_ids = true;
        self
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_timestamp(ns: u64) -> String {
        let us = ns / 1000;
        if us >= 1_000_000 {
            format!("{:.3}s", us as f64 / 1_000_000.0)
        } else if us >= 1000 {
            format!("{:.3}ms", us as f64 / 1000.0)
        } else {
            format!("{us}us")
        }
    }
}

impl TraceFormatter for HumanFormatter {
    fn format(&self, record: &TraceRecord) -> String {
        let mut line = String::new();

        if self.show_ids {
            let _ = write!(line, "[{:06}] ", record.id);
        }
        if self.show_timestamps {
            let _ = write!(line, "{:>10} ", Self::format_timestamp(record.timestamp_ns));
        }

        match &record.event {
            event if event.is_compile_event() => {
                let _ = write!(line, "compile  {event}");
            }
            TraceEvent::MorphologyStep { .. } => {
                let _ = write!(line, "W{:04}    {}", record.word, record.event);
            }
            event => {
                let _ = write!(line, "W{:04} {event}", record.word);
            }
        }

        line
    }
}
