//! Token types for the grammar DSL.
//!
//! Tokens are the output of the lexer and input to the parser.

use wordsmith_foundation::RuleId;

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the text this token covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    /// Returns true if this token ends a line.
    #[must_use]
    pub const fn is_line_end(&self) -> bool {
        matches!(self.kind, TokenKind::Newline | TokenKind::Eof)
    }
}

/// Token types for the grammar DSL.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// `X:` opening a character group declaration.
    RuleHead(RuleId),
    /// One whitespace-separated alternative of a character group.
    Word(String),
    /// `/body/` with `\/` unescaped.
    Regex(String),
    /// `>` between a transformation's pattern and replacement.
    Arrow,
    /// `"body"` with `\"` unescaped.
    Replacement(String),
    /// `# ...` up to the end of the line.
    Comment(String),
    /// A line ending (`\n`, `\r\n` or `\r`).
    Newline,
    /// End of input.
    Eof,
    /// Lexical error with message.
    Error(String),
}

impl TokenKind {
    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RuleHead(_) => "rule declaration",
            Self::Word(_) => "pattern",
            Self::Regex(_) => "transformation pattern",
            Self::Arrow => "'>'",
            Self::Replacement(_) => "replacement",
            Self::Comment(_) => "comment",
            Self::Newline => "end of line",
            Self::Eof => "end of input",
            Self::Error(_) => "error",
        }
    }
}
