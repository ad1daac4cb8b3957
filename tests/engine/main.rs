//! Integration tests for Layer 2: Engine
//!
//! Tests grammar compilation, morphology and word generation.

mod compile;
mod generation;
mod morphology;
