//! Whole-grammar compilation.
//!
//! Runs the pipeline: source → declarations → rule table (optimized) →
//! morphology list (compiled). A [`Grammar`] is immutable once built and
//! can be shared across threads; each generator brings its own RNG.

use wordsmith_foundation::{ErrorContext, Result, RuleId};
use wordsmith_language::{Resolved, parse, resolve};

use crate::morphology::{MorphologyList, Transformation};
use crate::observer::{CompileObserver, NoopObserver};
use crate::rule_table::RuleTable;

/// A compiled grammar.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grammar {
    rules: RuleTable,
    morphology: MorphologyList,
    compile_order: Vec<RuleId>,
}

impl Grammar {
    /// Builds and compiles a grammar from resolved declarations.
    ///
    /// A rule declared twice keeps its last declaration.
    ///
    /// # Errors
    /// Propagates rule table and morphology compilation errors.
    pub fn from_resolved(
        records: &[Resolved],
        observer: &mut dyn CompileObserver,
    ) -> Result<Self> {
        let mut rules = RuleTable::new();
        let mut morphology = MorphologyList::new();
        let mut positions = Vec::new();

        for record in records {
            match record {
                Resolved::Rule { id, patterns, .. } => {
                    rules.insert(*id, patterns.iter().cloned());
                }
                Resolved::Transformation {
                    pattern,
                    replacement,
                    span,
                } => {
                    morphology.push(Transformation::new(pattern.clone(), replacement.clone()));
                    positions.push((span.line, span.column));
                }
            }
        }

        let compile_order = rules.optimize_observed(observer)?;
        if let Err(e) = morphology.compile_observed(&rules, observer) {
            let failed = morphology.iter().position(|t| !t.is_compiled());
            return Err(match failed.and_then(|index| positions.get(index)) {
                Some(&(line, column)) if e.context.is_none() => e.with_context(
                    ErrorContext::new()
                        .with_source("grammar")
                        .with_position(line as usize, column as usize),
                ),
                _ => e,
            });
        }

        Ok(Self {
            rules,
            morphology,
            compile_order,
        })
    }

    /// Returns the compiled rule table.
    #[must_use]
    pub const fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Returns the compiled morphology.
    #[must_use]
    pub const fn morphology(&self) -> &MorphologyList {
        &self.morphology
    }

    /// Returns the order in which rules were compiled.
    #[must_use]
    pub fn compile_order(&self) -> &[RuleId] {
        &self.compile_order
    }

    /// Returns true if the grammar has a non-empty entry rule.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.rules.has_entry()
    }

    /// Splits the grammar into its rule table and morphology.
    #[must_use]
    pub fn into_parts(self) -> (RuleTable, MorphologyList) {
        (self.rules, self.morphology)
    }
}

/// Parses and compiles grammar source.
///
/// # Errors
/// Returns the first syntax, reference, cycle, group, or regex error.
pub fn compile(source: &str) -> Result<Grammar> {
    compile_observed(source, &mut NoopObserver)
}

/// Like [`compile`], reporting progress to `observer`.
///
/// # Errors
/// See [`compile`].
pub fn compile_observed(source: &str, observer: &mut dyn CompileObserver) -> Result<Grammar> {
    let declarations = parse(source)?;
    Grammar::from_resolved(&resolve(&declarations), observer)
}
