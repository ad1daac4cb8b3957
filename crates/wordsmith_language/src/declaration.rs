//! Resolution of parsed declarations into grammar records.
//!
//! The flow is: Source → Parser → `Declaration` → `resolve` → `Resolved` → rule table
//! and morphology list.

use wordsmith_foundation::RuleId;

use crate::ast::Declaration;
use crate::span::Span;

/// A declaration reduced to what the compiler needs.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    /// A rule and its raw pattern alternatives.
    Rule {
        /// The declared rule.
        id: RuleId,
        /// Raw pattern strings, in declaration order.
        patterns: Vec<String>,
        /// Where the rule was declared.
        span: Span,
    },
    /// A raw morphology transformation.
    Transformation {
        /// Regex source, possibly containing `|X` / `&X` markers.
        pattern: String,
        /// Replacement template.
        replacement: String,
        /// Where the transformation was declared.
        span: Span,
    },
}

impl Resolved {
    /// Returns the source span of this record.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Rule { span, .. } | Self::Transformation { span, .. } => *span,
        }
    }
}

/// Resolves declarations in source order, dropping comments and blank lines.
#[must_use]
pub fn resolve(declarations: &[Declaration]) -> Vec<Resolved> {
    declarations
        .iter()
        .filter_map(|decl| match decl {
            Declaration::Group(group) => Some(Resolved::Rule {
                id: group.id,
                patterns: group.tokens.clone(),
                span: group.span,
            }),
            Declaration::Transformation(t) => Some(Resolved::Transformation {
                pattern: t.pattern.clone(),
                replacement: t.replacement.clone(),
                span: t.span,
            }),
            Declaration::Comment(..) | Declaration::Blank(_) => None,
        })
        .collect()
}
