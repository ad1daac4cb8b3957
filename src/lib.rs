//! Wordsmith - Procedural word generator for constructed languages
//!
//! This crate re-exports all layers of the Wordsmith system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: wordsmith_runtime    — Session, grammar shell, CLI
//! Layer 3: wordsmith_debug      — Compile and derivation tracing
//! Layer 2: wordsmith_engine     — Rule table, morphology, word generation
//! Layer 1: wordsmith_language   — Lexer, parser, declaration resolver
//! Layer 0: wordsmith_foundation — Core types (RuleId, Error)
//! ```

pub use wordsmith_debug as debug;
pub use wordsmith_engine as engine;
pub use wordsmith_foundation as foundation;
pub use wordsmith_language as language;
pub use wordsmith_runtime as runtime;
