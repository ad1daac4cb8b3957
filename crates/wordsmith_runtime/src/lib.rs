//! Command line and interactive grammar shell for Wordsmith.
//!
//! This crate provides:
//! - [`Session`] - A loaded grammar with generation settings
//! - [`Repl`] - The interactive grammar shell
//! - The `wordsmith` binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod highlight;
pub mod repl;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use highlight::GrammarHighlighter;
pub use repl::{Command, Repl, Response, Setting};
pub use session::Session;
