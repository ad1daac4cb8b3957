//! Compilation and derivation tracing for Wordsmith.
//!
//! This crate provides:
//! - [`DebugConfig`] - What to trace and where to send it
//! - [`Tracer`] - Records compile and morphology events into a [`TraceBuffer`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod trace;

pub use config::DebugConfig;
pub use trace::{
    HumanFormatter, TraceBuffer, TraceBufferStats, TraceEvent, TraceFormatter, TraceOutput,
    TraceRecord, Tracer,
};
