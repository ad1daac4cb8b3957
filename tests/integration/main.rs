//! Cross-layer integration tests for Wordsmith
//!
//! Tests that verify correct interaction between multiple crates.

mod pipeline;
mod shell;
