//! Random word generation.
//!
//! A word is produced by drawing one raw entry pattern and walking its
//! segment tree: references draw from the referenced rule's compiled
//! alternatives, optional groups are kept or dropped by a fair coin, and
//! the result is passed through morphology and syllable stripping.

use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use wordsmith_foundation::{Error, ErrorKind, Result, RuleId};

use crate::grammar::Grammar;
use crate::morphology::MorphologyList;
use crate::observer::{DerivationPrinter, MorphologyObserver, NoopObserver};
use crate::pattern::{Pattern, Segment};
use crate::rule_table::RuleTable;

/// How many times the entry rule may recurse into itself for one word.
pub const MAX_DEPTH: usize = 32;

/// The marker separating syllables in generated words.
pub const SYLLABLE_MARKER: char = '-';

/// Options controlling post-processing of generated words.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationContext {
    /// Apply morphology transformations.
    pub morphology: bool,
    /// Keep `-` syllable markers in the output.
    pub keep_syllables: bool,
    /// Print derivation chains to stderr.
    pub debug: bool,
}

impl GenerationContext {
    /// Creates a context with everything switched off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether morphology is applied.
    #[must_use]
    pub const fn with_morphology(mut self, enabled: bool) -> Self {
        self.morphology = enabled;
        self
    }

    /// Sets whether syllable markers are kept.
    #[must_use]
    pub const fn with_keep_syllables(mut self, enabled: bool) -> Self {
        self.keep_syllables = enabled;
        self
    }

    /// Sets whether derivation chains are printed.
    #[must_use]
    pub const fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }
}

/// Generates one word.
///
/// With `context.debug` set, each morphology derivation is printed to
/// stderr as `base => ... => final`.
///
/// # Errors
/// Returns [`ErrorKind::EmptyGrammar`] if the entry rule is absent or
/// empty, [`ErrorKind::ExpansionLimit`] if the entry rule recurses too
/// deeply, and propagates lookup and morphology errors.
pub fn generate<R: Rng + ?Sized>(
    rules: &RuleTable,
    morphology: &MorphologyList,
    context: &GenerationContext,
    rng: &mut R,
) -> Result<String> {
    if context.debug {
        generate_observed(rules, morphology, context, rng, &mut DerivationPrinter::new())
    } else {
        generate_observed(rules, morphology, context, rng, &mut NoopObserver)
    }
}

/// Like [`generate`], reporting morphology steps to `observer`.
///
/// The `debug` flag is ignored; the observer decides what to show.
///
/// # Errors
/// See [`generate`].
pub fn generate_observed<R: Rng + ?Sized>(
    rules: &RuleTable,
    morphology: &MorphologyList,
    context: &GenerationContext,
    rng: &mut R,
    observer: &mut dyn MorphologyObserver,
) -> Result<String> {
    let mut word = draw_entry(rules, rng, 0)?;

    if context.morphology && !morphology.is_empty() {
        word = morphology.apply_observed(&word, observer)?;
    }
    if !context.keep_syllables {
        word.retain(|c| c != SYLLABLE_MARKER);
    }

    Ok(word)
}

fn draw_entry<R: Rng + ?Sized>(rules: &RuleTable, rng: &mut R, depth: usize) -> Result<String> {
    if depth > MAX_DEPTH {
        return Err(Error::new(ErrorKind::ExpansionLimit { limit: MAX_DEPTH }));
    }

    let source = rules
        .get(RuleId::ENTRY)
        .and_then(|entry| entry.patterns().choose(rng))
        .ok_or_else(Error::empty_grammar)?;
    let pattern = Pattern::parse(source)?;

    let mut word = String::new();
    walk(pattern.segments(), rules, rng, depth, &mut word)?;
    Ok(word)
}

fn walk<R: Rng + ?Sized>(
    segments: &[Segment],
    rules: &RuleTable,
    rng: &mut R,
    depth: usize,
    out: &mut String,
) -> Result<()> {
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Reference(id) if id.is_entry() => {
                out.push_str(&draw_entry(rules, rng, depth + 1)?);
            }
            Segment::Reference(id) => {
                let alternatives = rules.compiled_alternatives(*id, "rule W")?;
                let pick = alternatives
                    .choose(rng)
                    .ok_or_else(|| Error::internal(format!("rule {id} has no alternatives")))?;
                out.push_str(pick);
            }
            Segment::Group(inner) => {
                // Inner groups are settled before the enclosing one.
                let mut text = String::new();
                walk(inner, rules, rng, depth, &mut text)?;
                if rng.gen_bool(0.5) {
                    out.push_str(&text);
                }
            }
        }
    }
    Ok(())
}

/// A word source bound to a compiled grammar, owning its random generator.
#[derive(Debug)]
pub struct WordGenerator<'g> {
    grammar: &'g Grammar,
    context: GenerationContext,
    rng: ChaCha8Rng,
}

impl<'g> WordGenerator<'g> {
    /// Creates a generator seeded from OS entropy.
    #[must_use]
    pub fn new(grammar: &'g Grammar, context: GenerationContext) -> Self {
        Self {
            grammar,
            context,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Creates a generator with a fixed seed; equal seeds give equal words.
    #[must_use]
    pub fn seeded(grammar: &'g Grammar, context: GenerationContext, seed: u64) -> Self {
        Self {
            grammar,
            context,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns the generation options.
    #[must_use]
    pub const fn context(&self) -> &GenerationContext {
        &self.context
    }

    /// Generates one word.
    ///
    /// # Errors
    /// See [`generate`].
    pub fn generate(&mut self) -> Result<String> {
        generate(
            self.grammar.rules(),
            self.grammar.morphology(),
            &self.context,
            &mut self.rng,
        )
    }

    /// Generates one word, reporting morphology steps to `observer`.
    ///
    /// # Errors
    /// See [`generate`].
    pub fn generate_observed(&mut self, observer: &mut dyn MorphologyObserver) -> Result<String> {
        generate_observed(
            self.grammar.rules(),
            self.grammar.morphology(),
            &self.context,
            &mut self.rng,
            observer,
        )
    }

    /// Generates `count` words, stopping at the first error.
    ///
    /// # Errors
    /// See [`generate`].
    pub fn take(&mut self, count: usize) -> Result<Vec<String>> {
        (0..count).map(|_| self.generate()).collect()
    }

    /// An endless stream of words.
    pub fn words(&mut self) -> impl Iterator<Item = Result<String>> + '_ {
        std::iter::from_fn(move || Some(self.generate()))
    }
}
