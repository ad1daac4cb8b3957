//! Pattern parsing and expansion.
//!
//! A pattern such as `CV(N)-(C(r))` is parsed into a tree of [`Segment`]s.
//! Compilation expands the tree into every literal alternative it can
//! produce; generation walks it once, drawing at random.

use wordsmith_foundation::{Error, Result, RuleId};

/// One piece of a parsed pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// A run of literal characters.
    Literal(String),
    /// A single-letter reference to another rule.
    Reference(RuleId),
    /// An optional group `( ... )`.
    Group(Vec<Segment>),
}

/// A parsed pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parses a raw pattern string.
    ///
    /// # Errors
    /// Returns a malformed group error for an unmatched `(` or `)`.
    pub fn parse(source: &str) -> Result<Self> {
        // Open groups, innermost last: (offset of '(', parent's segments).
        let mut open: Vec<(usize, Vec<Segment>)> = Vec::new();
        let mut current: Vec<Segment> = Vec::new();
        let mut literal = String::new();

        for (offset, c) in source.char_indices() {
            match c {
                '(' => {
                    flush_literal(&mut literal, &mut current);
                    open.push((offset, std::mem::take(&mut current)));
                }
                ')' => {
                    flush_literal(&mut literal, &mut current);
                    let Some((_, parent)) = open.pop() else {
                        return Err(Error::malformed_group(source, offset, "unmatched ')'"));
                    };
                    let group = std::mem::replace(&mut current, parent);
                    current.push(Segment::Group(group));
                }
                c => {
                    if let Some(id) = RuleId::new(c) {
                        flush_literal(&mut literal, &mut current);
                        current.push(Segment::Reference(id));
                    } else {
                        literal.push(c);
                    }
                }
            }
        }

        if let Some((offset, _)) = open.first() {
            return Err(Error::malformed_group(source, *offset, "unclosed '('"));
        }
        flush_literal(&mut literal, &mut current);

        Ok(Self { segments: current })
    }

    /// Returns the top-level segments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns true if the pattern is plain text with no references or groups.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.segments
            .iter()
            .all(|s| matches!(s, Segment::Literal(_)))
    }

    /// Expands the pattern into every literal string it can produce.
    ///
    /// `lookup` supplies the compiled alternatives of a referenced rule.
    /// Each optional group contributes its own expansions plus `""`.
    ///
    /// # Errors
    /// Propagates any error returned by `lookup`.
    pub fn expand<'t, F>(&self, lookup: &F) -> Result<Vec<String>>
    where
        F: Fn(RuleId) -> Result<&'t [String]>,
    {
        expand_sequence(&self.segments, lookup)
    }
}

/// Returns the rule ids referenced anywhere in a raw pattern string,
/// in order of appearance, including inside groups.
pub fn references(source: &str) -> impl Iterator<Item = RuleId> + '_ {
    source.chars().filter_map(RuleId::new)
}

/// Concatenates every element of `left` with every element of `right`,
/// `left` varying slowest.
#[must_use]
pub fn cross_join(left: &[String], right: &[String]) -> Vec<String> {
    let mut joined = Vec::with_capacity(left.len() * right.len());
    for l in left {
        for r in right {
            let mut s = String::with_capacity(l.len() + r.len());
            s.push_str(l);
            s.push_str(r);
            joined.push(s);
        }
    }
    joined
}

fn flush_literal(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

fn expand_sequence<'t, F>(segments: &[Segment], lookup: &F) -> Result<Vec<String>>
where
    F: Fn(RuleId) -> Result<&'t [String]>,
{
    let mut expansions = vec![String::new()];
    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                for expansion in &mut expansions {
                    expansion.push_str(text);
                }
            }
            Segment::Reference(id) => {
                expansions = cross_join(&expansions, lookup(*id)?);
            }
            Segment::Group(inner) => {
                let mut column = expand_sequence(inner, lookup)?;
                column.push(String::new());
                expansions = cross_join(&expansions, &column);
            }
        }
    }
    Ok(expansions)
}
