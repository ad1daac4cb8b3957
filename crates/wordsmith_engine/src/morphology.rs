//! Morphology: ordered regex rewrites applied to generated words.
//!
//! A transformation pattern may name a character group with a marker:
//! `|X` stands for the alternation of `X`'s compiled alternatives and `&X`
//! for their concatenation. So with `V: a e`,
//!
//! ```text
//! /-(|V)/ > "\1"     becomes     -(a|e)  →  ${1}
//! ```
//!
//! Markers are expanded once, when the list is compiled against the rule
//! table. Replacement templates use `\1`-style back-references and are
//! translated into `regex` replacement syntax at the same time.

use std::fmt;

use regex::Regex;
use wordsmith_foundation::{Error, ErrorKind, Result, RuleId};

use crate::observer::{CompileObserver, MorphologyObserver, NoopObserver};
use crate::rule_table::RuleTable;

/// A transformation after compilation.
#[derive(Clone, Debug)]
struct Compiled {
    regex: Regex,
    template: String,
}

/// A single find-and-replace step.
#[derive(Clone)]
pub struct Transformation {
    source: String,
    replacement: String,
    compiled: Option<Compiled>,
}

impl Transformation {
    /// Creates a raw transformation from its pattern source and replacement.
    #[must_use]
    pub fn new(source: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            replacement: replacement.into(),
            compiled: None,
        }
    }

    /// Returns the pattern source as written in the grammar.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the replacement as written in the grammar.
    #[must_use]
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Returns the expanded regex source, once compiled.
    #[must_use]
    pub fn expanded(&self) -> Option<&str> {
        self.compiled.as_ref().map(|c| c.regex.as_str())
    }

    /// Returns the compiled regex, once compiled.
    #[must_use]
    pub fn regex(&self) -> Option<&Regex> {
        self.compiled.as_ref().map(|c| &c.regex)
    }

    /// Returns true if the regex has been built.
    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.compiled.is_some()
    }

    /// Expands group markers and builds the regex. Does nothing if already compiled.
    ///
    /// `owner` names this transformation in error messages.
    ///
    /// # Errors
    /// Fails on references to undeclared, uncompiled, or entry rules, and on
    /// an invalid expanded regex.
    pub fn compile(&mut self, rules: &RuleTable, owner: &str) -> Result<()> {
        if self.compiled.is_some() {
            return Ok(());
        }

        let expanded = expand_markers(&self.source, rules, owner)?;
        let regex = Regex::new(&expanded).map_err(|e| {
            Error::new(ErrorKind::InvalidRegex {
                pattern: expanded.clone(),
                message: e.to_string(),
            })
        })?;

        self.compiled = Some(Compiled {
            regex,
            template: translate_template(&self.replacement),
        });
        Ok(())
    }

    /// Replaces every match in `word`.
    ///
    /// # Errors
    /// Fails if the transformation has not been compiled.
    pub fn apply(&self, word: &str) -> Result<String> {
        let compiled = self
            .compiled
            .as_ref()
            .ok_or_else(|| Error::internal(format!("transformation /{}/ is not compiled", self.source)))?;
        Ok(compiled
            .regex
            .replace_all(word, compiled.template.as_str())
            .into_owned())
    }
}

impl PartialEq for Transformation {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
            && self.replacement == other.replacement
            && self.expanded() == other.expanded()
    }
}

impl fmt::Debug for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transformation")
            .field("source", &self.source)
            .field("replacement", &self.replacement)
            .field("expanded", &self.expanded())
            .finish()
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/ > {:?}", self.source, self.replacement)
    }
}

/// Transformations applied in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MorphologyList {
    transformations: Vec<Transformation>,
}

impl MorphologyList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a raw transformation.
    pub fn push(&mut self, transformation: Transformation) {
        self.transformations.push(transformation);
    }

    /// Returns the number of transformations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transformations.len()
    }

    /// Returns true if there are no transformations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transformations.is_empty()
    }

    /// Iterates over the transformations in order.
    pub fn iter(&self) -> impl Iterator<Item = &Transformation> {
        self.transformations.iter()
    }

    /// Returns true if every transformation is compiled.
    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.transformations.iter().all(Transformation::is_compiled)
    }

    /// Compiles every transformation against the rule table.
    ///
    /// # Errors
    /// Returns the first compilation error; transformations are numbered
    /// from 1 in error messages.
    pub fn compile(&mut self, rules: &RuleTable) -> Result<()> {
        self.compile_observed(rules, &mut NoopObserver)
    }

    /// Like [`MorphologyList::compile`], reporting each expanded pattern.
    ///
    /// # Errors
    /// Returns the first compilation error.
    pub fn compile_observed(
        &mut self,
        rules: &RuleTable,
        observer: &mut dyn CompileObserver,
    ) -> Result<()> {
        for (index, transformation) in self.transformations.iter_mut().enumerate() {
            let owner = format!("transformation #{} /{}/", index + 1, transformation.source);
            transformation.compile(rules, &owner)?;
            if let Some(expanded) = transformation.expanded() {
                observer.transformation_compiled(index, expanded);
            }
        }
        Ok(())
    }

    /// Applies every transformation to `word` in order.
    ///
    /// # Errors
    /// Fails if the list has not been compiled.
    pub fn apply(&self, word: &str) -> Result<String> {
        self.apply_observed(word, &mut NoopObserver)
    }

    /// Like [`MorphologyList::apply`], reporting each step that changed the word.
    ///
    /// # Errors
    /// Fails if the list has not been compiled.
    pub fn apply_observed(
        &self,
        word: &str,
        observer: &mut dyn MorphologyObserver,
    ) -> Result<String> {
        observer.begin(word);
        let mut current = word.to_string();
        for (index, transformation) in self.transformations.iter().enumerate() {
            let next = transformation.apply(&current)?;
            if next != current {
                observer.step(index, &current, &next);
                current = next;
            }
        }
        observer.finish(&current);
        Ok(current)
    }
}

impl FromIterator<Transformation> for MorphologyList {
    fn from_iter<I: IntoIterator<Item = Transformation>>(iter: I) -> Self {
        Self {
            transformations: iter.into_iter().collect(),
        }
    }
}

/// Replaces `|X` and `&X` markers with rule `X`'s compiled alternatives.
///
/// Alternatives are regex-escaped. A backslash directly before a marker
/// belongs to the marker; any other backslash pair is copied unchanged.
///
/// # Errors
/// Fails if a marker names a rule that cannot be substituted.
pub fn expand_markers(source: &str, rules: &RuleTable, owner: &str) -> Result<String> {
    let chars: Vec<char> = source.chars().collect();
    let mut out = String::with_capacity(source.len());
    let mut i = 0;

    while i < chars.len() {
        let escaped = chars[i] == '\\';
        let at = if escaped { i + 1 } else { i };

        if let (Some(&joiner @ ('|' | '&')), Some(&letter)) = (chars.get(at), chars.get(at + 1)) {
            if let Some(id) = RuleId::new(letter) {
                let separator = if joiner == '|' { "|" } else { "" };
                let alternatives = rules.compiled_alternatives(id, owner)?;
                let escaped_alternatives: Vec<String> =
                    alternatives.iter().map(|a| regex::escape(a)).collect();
                out.push_str(&escaped_alternatives.join(separator));
                i = at + 2;
                continue;
            }
        }

        out.push(chars[i]);
        if escaped {
            if let Some(&next) = chars.get(i + 1) {
                out.push(next);
            }
            i += 2;
        } else {
            i += 1;
        }
    }

    Ok(out)
}

/// Translates a `\1`-style replacement into `regex` replacement syntax.
///
/// `\0`-`\9` and `\&` become numbered groups, `\k<name>` a named group,
/// `\\` a backslash, and `$` is escaped as `$$`.
#[must_use]
pub fn translate_template(replacement: &str) -> String {
    let chars: Vec<char> = replacement.chars().collect();
    let mut out = String::with_capacity(replacement.len());
    let mut i = 0;

    while i < chars.len() {
        match (chars[i], chars.get(i + 1).copied()) {
            ('$', _) => {
                out.push_str("$$");
                i += 1;
            }
            ('\\', Some(d)) if d.is_ascii_digit() => {
                out.push_str("${");
                out.push(d);
                out.push('}');
                i += 2;
            }
            ('\\', Some('&')) => {
                out.push_str("${0}");
                i += 2;
            }
            ('\\', Some('\\')) => {
                out.push('\\');
                i += 2;
            }
            ('\\', Some('k')) if chars.get(i + 2) == Some(&'<') => {
                let name_start = i + 3;
                match chars[name_start..].iter().position(|c| *c == '>') {
                    Some(len) if len > 0 => {
                        let name: String = chars[name_start..name_start + len].iter().collect();
                        out.push_str("${");
                        out.push_str(&name);
                        out.push('}');
                        i = name_start + len + 1;
                    }
                    _ => {
                        out.push('\\');
                        i += 1;
                    }
                }
            }
            (c, _) => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}
