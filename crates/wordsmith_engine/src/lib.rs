//! Rule table compilation, morphology, and word generation for Wordsmith.
//!
//! This crate provides:
//! - [`Pattern`] - Parsed rule patterns and their expansion
//! - [`RuleTable`] - Rule storage, dependency ordering, and compilation
//! - [`MorphologyList`] - Regex rewrites applied after generation
//! - [`WordGenerator`] - Seeded random word generation
//! - [`Grammar`] - The full source-to-grammar pipeline

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod generator;
pub mod grammar;
pub mod morphology;
pub mod observer;
pub mod pattern;
pub mod rule_table;


pub use generator::{
    GenerationContext, MAX_DEPTH, SYLLABLE_MARKER, WordGenerator, generate, generate_observed,
};
pub use grammar::{Grammar, compile, compile_observed};
pub use morphology::{MorphologyList, Transformation};
pub use observer::{CompileObserver, DerivationPrinter, MorphologyObserver, NoopObserver};
pub use pattern::{Pattern, Segment};
pub use rule_table::{Rule, RuleState, RuleTable};
