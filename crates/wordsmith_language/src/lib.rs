//! Lexer, parser, and declaration resolver for the Wordsmith grammar DSL.
//!
//! This crate provides:
//! - [`Lexer`] - Line-aware tokenization of grammar source
//! - [`Parser`] - Parsing tokens into [`Declaration`]s
//! - [`resolve`] - Reducing declarations to [`Resolved`] rules and transformations

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod declaration;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;


pub use ast::{Declaration, GroupDecl, TransformationDecl};
pub use declaration::{Resolved, resolve};
pub use lexer::Lexer;
pub use parser::{Parser, parse};
pub use span::Span;
pub use token::{Token, TokenKind};
