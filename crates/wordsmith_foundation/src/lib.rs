//! Core identifiers and error types for Wordsmith.
//!
//! This crate provides:
//! - [`RuleId`] - Single-letter rule identifiers
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod rule_id;

pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use rule_id::RuleId;
