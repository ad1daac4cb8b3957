//! Integration tests for Layer 1: Language
//!
//! Tests tokenization, parsing and resolution of grammar source.

mod parser;
