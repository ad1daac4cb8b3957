//! Abstract syntax for grammar source.
//!
//! A grammar is a flat sequence of line-level declarations.

use wordsmith_foundation::RuleId;

use crate::span::Span;

/// One parsed grammar line (or trailing comment).
#[derive(Clone, Debug, PartialEq)]
pub enum Declaration {
    /// `X: tok tok ...`
    Group(GroupDecl),
    /// `/pattern/ > "replacement"`
    Transformation(TransformationDecl),
    /// `# text`, on its own line or after a declaration.
    Comment(String, Span),
    /// An empty line.
    Blank(Span),
}

impl Declaration {
    /// Returns the source span of this declaration.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Group(g) => g.span,
            Self::Transformation(t) => t.span,
            Self::Comment(_, s) | Self::Blank(s) => *s,
        }
    }

    /// Returns true for comments and blank lines.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Comment(..) | Self::Blank(_))
    }
}

/// A character-group declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupDecl {
    /// The rule being declared.
    pub id: RuleId,
    /// Raw pattern tokens, one alternative each.
    pub tokens: Vec<String>,
    /// Source span from the id to the last token.
    pub span: Span,
}

/// A morphology transformation declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformationDecl {
    /// Regex body between the slashes.
    pub pattern: String,
    /// Replacement body between the quotes.
    pub replacement: String,
    /// Source span of the whole declaration.
    pub span: Span,
}
