//! Error types for the Wordsmith system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::rule_id::RuleId;

/// Result type used throughout Wordsmith.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Wordsmith operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a grammar syntax error.
    #[must_use]
    pub fn syntax(message: impl Into<String>, line: u32, column: u32, context: String) -> Self {
        Self::new(ErrorKind::GrammarSyntax {
            message: message.into(),
            line,
            column,
            context,
        })
    }

    /// Creates an unresolved reference error.
    #[must_use]
    pub fn unresolved(id: RuleId, owner: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedReference {
            id,
            owner: owner.into(),
        })
    }

    /// Creates an error for a reference to a rule that has not been compiled yet.
    #[must_use]
    pub fn uncompiled(id: RuleId, owner: impl Into<String>) -> Self {
        Self::new(ErrorKind::UncompiledReference {
            id,
            owner: owner.into(),
        })
    }

    /// Creates a malformed optional group error.
    #[must_use]
    pub fn malformed_group(pattern: &str, offset: usize, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedGroup {
            pattern: pattern.to_string(),
            offset,
            message: message.into(),
        })
    }

    /// Creates an empty grammar error.
    #[must_use]
    pub fn empty_grammar() -> Self {
        Self::new(ErrorKind::EmptyGrammar)
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }

    /// Creates an invalid shell command error.
    #[must_use]
    pub fn invalid_command(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidCommand(message.into()))
    }

    /// Returns true if this error came from reading grammar source text.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(self.kind, ErrorKind::GrammarSyntax { .. })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A grammar line matched no declaration shape.
    #[error("syntax error at {line}:{column}: {message}")]
    GrammarSyntax {
        /// Description of the problem.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// A pattern or transformation references a rule that is not declared.
    #[error("unresolved reference to rule {id} in {owner}")]
    UnresolvedReference {
        /// The missing rule.
        id: RuleId,
        /// What contained the reference ("rule C", "transformation #2").
        owner: String,
    },

    /// A rule was compiled before one of the rules it references.
    #[error("rule {id} referenced from {owner} has not been compiled")]
    UncompiledReference {
        /// The referenced rule.
        id: RuleId,
        /// What contained the reference.
        owner: String,
    },

    /// A non-entry rule or transformation references the entry rule.
    #[error("{owner} references the entry rule W, which is never expanded ahead of generation")]
    EntryRuleReferenced {
        /// What contained the reference.
        owner: String,
    },

    /// Rules reference each other in a loop.
    #[error("cyclic rule reference: {}", format_cycle(.cycle))]
    CyclicReference {
        /// The rules forming the cycle, first rule repeated at the end.
        cycle: Vec<RuleId>,
    },

    /// Unbalanced optional-group parentheses.
    #[error("malformed optional group in {pattern:?} at offset {offset}: {message}")]
    MalformedGroup {
        /// The offending pattern.
        pattern: String,
        /// Byte offset of the unmatched parenthesis.
        offset: usize,
        /// Description of the problem.
        message: String,
    },

    /// The entry rule is missing or has no alternatives.
    #[error("cannot generate words: entry rule W is missing or empty")]
    EmptyGrammar,

    /// A transformation's expanded pattern is not a valid regex.
    #[error("invalid transformation pattern {pattern:?}: {message}")]
    InvalidRegex {
        /// The expanded pattern source.
        pattern: String,
        /// The message reported by the regex compiler.
        message: String,
    },

    /// Recursive entry expansion went deeper than allowed.
    #[error("expansion depth limit ({limit}) exceeded")]
    ExpansionLimit {
        /// The configured limit.
        limit: usize,
    },

    /// Reading a grammar file failed.
    #[error("failed to read {path}: {message}")]
    Io {
        /// The path being read.
        path: String,
        /// The underlying I/O error message.
        message: String,
    },

    /// A grammar shell command could not be understood.
    #[error("invalid command: {0}")]
    InvalidCommand(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

fn format_cycle(cycle: &[RuleId]) -> String {
    cycle
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file or grammar name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        Ok(())
    }
}
