//! Source to words, through every layer
//!
//! Runs grammar text through the parser, resolver, compiler and generator.

use std::collections::HashSet;

use wordsmith::engine::{GenerationContext, Grammar, NoopObserver, WordGenerator, compile};
use wordsmith::foundation::RuleId;
use wordsmith::language::{parse, resolve};

const CONLANG: &str = "\
# Consonants and vowels
C: p t k s m n
L: l r
V: a e i o u
N: n m

# Syllable shapes
O: C CL
S: OV(N)

W: S-S S-S-S

# Nasals assimilate before stops, s voices after a vowel
/n-([pk])/ > \"m-\\1\"
/([&V])-s/ > \"\\1-z\"
";

fn words(context: GenerationContext, count: usize) -> Vec<String> {
    let grammar = compile(CONLANG).unwrap();
    WordGenerator::seeded(&grammar, context, 2024)
        .take(count)
        .unwrap()
}

// =============================================================================
// Layer Hand-off
// =============================================================================

#[test]
fn staged_pipeline_matches_compile() {
    let resolved = resolve(&parse(CONLANG).unwrap());
    let staged = Grammar::from_resolved(&resolved, &mut NoopObserver).unwrap();
    assert_eq!(staged, compile(CONLANG).unwrap());
}

#[test]
fn grammar_is_ready_after_compile() {
    let grammar = compile(CONLANG).unwrap();
    assert!(grammar.is_ready());
    assert_eq!(grammar.rules().len(), 7);
    assert_eq!(grammar.morphology().len(), 2);
}

#[test]
fn compiled_syllables_use_only_declared_letters() {
    let grammar = compile(CONLANG).unwrap();
    let alphabet: HashSet<char> = "ptksmnlraeiou".chars().collect();
    let syllables = grammar
        .rules()
        .alternatives(RuleId::new('S').unwrap())
        .unwrap();
    for syllable in syllables {
        assert!(syllable.chars().all(|c| alphabet.contains(&c)), "{syllable}");
    }
}

// =============================================================================
// Generation
// =============================================================================

#[test]
fn words_have_no_syllable_markers() {
    for word in words(GenerationContext::new().with_morphology(true), 500) {
        assert!(!word.contains('-'), "{word}");
        assert!(!word.is_empty());
    }
}

#[test]
fn kept_markers_separate_two_or_three_syllables() {
    let context = GenerationContext::new().with_keep_syllables(true);
    let counts: HashSet<usize> = words(context, 300)
        .iter()
        .map(|w| w.split('-').count())
        .collect();
    assert_eq!(counts, [2, 3].into_iter().collect());
}

#[test]
fn morphology_assimilates_nasals() {
    let context = GenerationContext::new()
        .with_morphology(true)
        .with_keep_syllables(true);
    for word in words(context, 500) {
        assert!(!word.contains("n-p"), "{word}");
        assert!(!word.contains("n-k"), "{word}");
    }
}

#[test]
fn morphology_changes_some_words() {
    let plain = words(GenerationContext::new().with_keep_syllables(true), 500);
    let mutated = words(
        GenerationContext::new()
            .with_keep_syllables(true)
            .with_morphology(true),
        500,
    );
    assert_ne!(plain, mutated);
}

#[test]
fn seeded_runs_repeat() {
    let context = GenerationContext::new().with_morphology(true);
    assert_eq!(words(context, 200), words(context, 200));
}
