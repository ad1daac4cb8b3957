//! The rule table: rule ids mapped to their pattern alternatives.
//!
//! Rules start out raw, holding the pattern strings from the grammar, and
//! are compiled one at a time into flat sets of literal alternatives.
//! [`RuleTable::optimize`] picks an order in which every rule's references are
//! compiled before the rule itself. The entry rule `W` is never expanded
//! ahead of time; the generator resolves it lazily.

use std::collections::{BTreeMap, HashSet};

use im::OrdMap;
use wordsmith_foundation::{Error, ErrorKind, Result, RuleId};

use crate::observer::{CompileObserver, NoopObserver};
use crate::pattern::{Pattern, references};

/// Compilation state of a single rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleState {
    /// Patterns may still contain references and optional groups.
    Raw,
    /// Patterns are deduplicated literal strings.
    Compiled,
}

/// A rule and its alternatives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    patterns: Vec<String>,
    state: RuleState,
}

impl Rule {
    /// Returns the rule's alternatives.
    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Returns the compilation state.
    #[must_use]
    pub const fn state(&self) -> RuleState {
        self.state
    }

    /// Returns true if the rule has been compiled.
    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.state == RuleState::Compiled
    }

    /// Returns the number of alternatives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns true if the rule has no alternatives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Mapping from rule id to pattern alternatives.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RuleTable {
    rules: OrdMap<RuleId, Rule>,
}

impl RuleTable {
    /// Creates an empty rule table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a raw rule, replacing any earlier declaration of the same id.
    ///
    /// Returns the replaced rule, if any.
    pub fn insert<I, S>(&mut self, id: RuleId, patterns: I) -> Option<Rule>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rule = Rule {
            patterns: patterns.into_iter().map(Into::into).collect(),
            state: RuleState::Raw,
        };
        self.rules.insert(id, rule)
    }

    /// Returns the rule with the given id.
    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.get(&id)
    }

    /// Returns the current alternatives of a rule.
    #[must_use]
    pub fn alternatives(&self, id: RuleId) -> Option<&[String]> {
        self.get(id).map(Rule::patterns)
    }

    /// Returns true if a rule with this id is declared.
    #[must_use]
    pub fn contains(&self, id: RuleId) -> bool {
        self.rules.contains_key(&id)
    }

    /// Returns true if the rule exists and is compiled.
    #[must_use]
    pub fn is_compiled(&self, id: RuleId) -> bool {
        self.get(id).is_some_and(Rule::is_compiled)
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over rules in id order.
    pub fn iter(&self) -> impl Iterator<Item = (RuleId, &Rule)> {
        self.rules.iter().map(|(id, rule)| (*id, rule))
    }

    /// Returns true if the entry rule exists and has at least one alternative.
    #[must_use]
    pub fn has_entry(&self) -> bool {
        self.get(RuleId::ENTRY).is_some_and(|rule| !rule.is_empty())
    }

    /// Returns the distinct rules referenced by `id`'s current patterns, in
    /// order of first appearance.
    #[must_use]
    pub fn dependencies(&self, id: RuleId) -> Vec<RuleId> {
        let mut seen = HashSet::new();
        self.get(id)
            .map(|rule| {
                rule.patterns
                    .iter()
                    .flat_map(|p| references(p))
                    .filter(|dep| seen.insert(*dep))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Estimates how much work compiling `id` involves.
    ///
    /// Sums, over every reference in the rule's patterns, the referenced
    /// rule's alternative count plus one. Rules without references score 0.
    #[must_use]
    pub fn dependency_depth(&self, id: RuleId) -> usize {
        let Some(rule) = self.get(id) else {
            return 0;
        };
        rule.patterns
            .iter()
            .flat_map(|p| references(p))
            .map(|dep| self.get(dep).map_or(0, Rule::len) + 1)
            .sum()
    }

    /// Expands every pattern of `id` into literal alternatives.
    ///
    /// Compiling an already compiled rule does nothing. Every rule referenced
    /// by `id` must already be compiled.
    ///
    /// # Errors
    /// Returns an error if `id` or a referenced rule is undeclared, if a
    /// referenced rule is not compiled yet or is the entry rule, or if a
    /// pattern has unbalanced parentheses.
    pub fn compile(&mut self, id: RuleId) -> Result<()> {
        if let Some(compiled) = self.expand_rule(id)? {
            self.rules.insert(
                id,
                Rule {
                    patterns: compiled,
                    state: RuleState::Compiled,
                },
            );
        }
        Ok(())
    }

    /// Expands a raw rule; `None` if it is already compiled.
    fn expand_rule(&self, id: RuleId) -> Result<Option<Vec<String>>> {
        let rule = self
            .get(id)
            .ok_or_else(|| Error::unresolved(id, "the rule table"))?;
        if rule.is_compiled() {
            return Ok(None);
        }

        let owner = format!("rule {id}");
        let lookup = |dep: RuleId| self.compiled_alternatives(dep, &owner);

        let mut seen = HashSet::new();
        let mut compiled = Vec::new();
        for source in &rule.patterns {
            for alternative in Pattern::parse(source)?.expand(&lookup)? {
                if seen.insert(alternative.clone()) {
                    compiled.push(alternative);
                }
            }
        }
        Ok(Some(compiled))
    }

    /// Returns the compiled alternatives `owner` may substitute for `dep`.
    ///
    /// # Errors
    /// Fails if `dep` is undeclared, is the entry rule, or is not compiled.
    pub fn compiled_alternatives(&self, dep: RuleId, owner: &str) -> Result<&[String]> {
        let rule = self
            .get(dep)
            .ok_or_else(|| Error::unresolved(dep, owner))?;
        if rule.is_compiled() {
            Ok(rule.patterns())
        } else if dep.is_entry() {
            Err(Error::new(ErrorKind::EntryRuleReferenced {
                owner: owner.to_string(),
            }))
        } else {
            Err(Error::uncompiled(dep, owner))
        }
    }

    /// Checks that every reference names a declared rule, and that only the
    /// entry rule itself references `W`.
    ///
    /// # Errors
    /// Returns the first unresolved or entry reference found, in id order.
    pub fn check_references(&self) -> Result<()> {
        for (id, _) in self.iter() {
            for dep in self.dependencies(id) {
                if !self.contains(dep) {
                    return Err(Error::unresolved(dep, format!("rule {id}")));
                }
                if dep.is_entry() && !id.is_entry() {
                    return Err(Error::new(ErrorKind::EntryRuleReferenced {
                        owner: format!("rule {id}"),
                    }));
                }
            }
        }
        Ok(())
    }

    /// Finds a reference cycle among the non-entry rules.
    ///
    /// Returns the cycle with its first rule repeated at the end, e.g.
    /// `[A, B, A]`.
    #[must_use]
    pub fn find_cycle(&self) -> Option<Vec<RuleId>> {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum Mark {
            Visiting,
            Done,
        }

        fn visit(
            table: &RuleTable,
            id: RuleId,
            marks: &mut BTreeMap<RuleId, Mark>,
            path: &mut Vec<RuleId>,
        ) -> Option<Vec<RuleId>> {
            match marks.get(&id) {
                Some(Mark::Done) => return None,
                Some(Mark::Visiting) => {
                    let start = path.iter().position(|p| *p == id).unwrap_or(0);
                    let mut cycle = path[start..].to_vec();
                    cycle.push(id);
                    return Some(cycle);
                }
                None => {}
            }

            marks.insert(id, Mark::Visiting);
            path.push(id);
            for dep in table.dependencies(id) {
                if dep.is_entry() || !table.contains(dep) {
                    continue;
                }
                if let Some(cycle) = visit(table, dep, marks, path) {
                    return Some(cycle);
                }
            }
            path.pop();
            marks.insert(id, Mark::Done);
            None
        }

        let mut marks = BTreeMap::new();
        let mut path = Vec::new();
        self.iter()
            .map(|(id, _)| id)
            .filter(|id| !id.is_entry())
            .find_map(|id| visit(self, id, &mut marks, &mut path))
    }

    /// Returns the order in which the non-entry rules should be compiled.
    ///
    /// Rules are taken by ascending dependency depth (ties broken by id);
    /// any rule reached before its dependencies pulls them in first.
    ///
    /// # Errors
    /// Returns an error for unresolved references, references to `W` from
    /// other rules, and reference cycles.
    pub fn compile_order(&self) -> Result<Vec<RuleId>> {
        self.check_references()?;
        if let Some(cycle) = self.find_cycle() {
            return Err(Error::new(ErrorKind::CyclicReference { cycle }));
        }

        let depth: BTreeMap<RuleId, usize> = self
            .iter()
            .map(|(id, _)| (id, self.dependency_depth(id)))
            .collect();
        let rank = |id: &RuleId| (depth.get(id).copied().unwrap_or(0), *id);

        let mut candidates: Vec<RuleId> = depth.keys().copied().filter(|id| !id.is_entry()).collect();
        candidates.sort_by_key(rank);

        let mut order = Vec::with_capacity(candidates.len());
        let mut placed = HashSet::new();
        for id in candidates {
            self.place(id, &rank, &mut placed, &mut order);
        }
        Ok(order)
    }

    /// Appends `id` to `order` after its not yet placed dependencies.
    fn place<K: Ord>(
        &self,
        id: RuleId,
        rank: &impl Fn(&RuleId) -> K,
        placed: &mut HashSet<RuleId>,
        order: &mut Vec<RuleId>,
    ) {
        if !placed.insert(id) {
            return;
        }
        let mut deps = self.dependencies(id);
        deps.sort_by_key(rank);
        for dep in deps {
            self.place(dep, rank, placed, order);
        }
        order.push(id);
    }

    /// Compiles every non-entry rule in dependency order and validates the
    /// entry rule's patterns without expanding them.
    ///
    /// Returns the order in which rules were compiled.
    ///
    /// # Errors
    /// See [`RuleTable::compile_order`] and [`RuleTable::compile`].
    pub fn optimize(&mut self) -> Result<Vec<RuleId>> {
        self.optimize_observed(&mut NoopObserver)
    }

    /// Like [`RuleTable::optimize`], reporting each compiled rule.
    ///
    /// # Errors
    /// See [`RuleTable::compile_order`] and [`RuleTable::compile`].
    pub fn optimize_observed(&mut self, observer: &mut dyn CompileObserver) -> Result<Vec<RuleId>> {
        let order = self.compile_order()?;
        for &id in &order {
            self.compile(id)?;
            observer.rule_compiled(id, self.get(id).map_or(0, Rule::len));
        }
        self.validate_entry()?;
        Ok(order)
    }

    /// Parses the entry rule's patterns to catch malformed groups early.
    ///
    /// # Errors
    /// Returns a malformed group error for an unbalanced entry pattern.
    pub fn validate_entry(&self) -> Result<()> {
        if let Some(rule) = self.get(RuleId::ENTRY) {
            for source in &rule.patterns {
                Pattern::parse(source)?;
            }
        }
        Ok(())
    }
}
