//! Integration tests for word generation
//!
//! Tests entry expansion, optional groups, syllable markers and seeding.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wordsmith_engine::{GenerationContext, MAX_DEPTH, WordGenerator, compile, generate};
use wordsmith_foundation::ErrorKind;

fn sample(source: &str, context: GenerationContext, count: usize) -> Vec<String> {
    let grammar = compile(source).unwrap();
    WordGenerator::seeded(&grammar, context, 42)
        .take(count)
        .unwrap()
}

fn distinct(words: &[String]) -> HashSet<&str> {
    words.iter().map(String::as_str).collect()
}

// =============================================================================
// Entry Expansion
// =============================================================================

#[test]
fn two_vowel_words_cover_every_pair() {
    let words = sample("V: a e\nW: VV", GenerationContext::new(), 1000);
    let expected: HashSet<&str> = ["aa", "ae", "ea", "ee"].into_iter().collect();
    assert_eq!(distinct(&words), expected);
}

#[test]
fn entry_alternatives_are_all_used() {
    let words = sample("C: p t\nW: C aC", GenerationContext::new(), 500);
    let expected: HashSet<&str> = ["p", "t", "ap", "at"].into_iter().collect();
    assert_eq!(distinct(&words), expected);
}

#[test]
fn optional_group_is_kept_or_dropped() {
    let words = sample("W: a(b)c", GenerationContext::new(), 200);
    let expected: HashSet<&str> = ["ac", "abc"].into_iter().collect();
    assert_eq!(distinct(&words), expected);
}

#[test]
fn nested_groups_need_their_parent() {
    let words = sample("W: a(b(c))", GenerationContext::new(), 500);
    let expected: HashSet<&str> = ["a", "ab", "abc"].into_iter().collect();
    assert_eq!(distinct(&words), expected);
}

#[test]
fn groups_around_references() {
    let words = sample("C: p t\nV: a\nW: (C)V", GenerationContext::new(), 300);
    let expected: HashSet<&str> = ["a", "pa", "ta"].into_iter().collect();
    assert_eq!(distinct(&words), expected);
}

#[test]
fn non_ascii_literals_pass_through() {
    let words = sample("V: ä ö\nW: ÑV", GenerationContext::new(), 100);
    let expected: HashSet<&str> = ["Ñä", "Ñö"].into_iter().collect();
    assert_eq!(distinct(&words), expected);
}

#[test]
fn entry_may_recurse() {
    let words = sample("V: a\nW: V VW", GenerationContext::new(), 300);
    assert!(words.iter().all(|w| !w.is_empty() && w.chars().all(|c| c == 'a')));
    assert!(words.iter().any(|w| w.len() > 1));
}

#[test]
fn unbounded_recursion_hits_the_limit() {
    let grammar = compile("W: W").unwrap();
    let err = WordGenerator::seeded(&grammar, GenerationContext::new(), 1)
        .generate()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ExpansionLimit { limit } if limit == MAX_DEPTH));
}

#[test]
fn missing_entry_is_empty_grammar() {
    let grammar = compile("V: a e").unwrap();
    let err = WordGenerator::seeded(&grammar, GenerationContext::new(), 1)
        .generate()
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EmptyGrammar));
}

// =============================================================================
// Syllable Markers
// =============================================================================

#[test]
fn syllable_markers_are_stripped() {
    let words = sample("C: p t\nV: a i\nW: CV-CV(-CV)", GenerationContext::new(), 300);
    assert!(words.iter().all(|w| !w.contains('-')));
    assert!(words.iter().all(|w| w.len() == 4 || w.len() == 6));
}

#[test]
fn syllable_markers_can_be_kept() {
    let context = GenerationContext::new().with_keep_syllables(true);
    let words = sample("W: ka-ta", context, 5);
    assert!(words.iter().all(|w| w == "ka-ta"));
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn equal_seeds_give_equal_words() {
    let source = "C: p t k s\nV: a e i o u\nW: CV(C)CV";
    assert_eq!(
        sample(source, GenerationContext::new(), 100),
        sample(source, GenerationContext::new(), 100)
    );
}

#[test]
fn free_function_matches_generator() {
    let grammar = compile("C: p t k\nV: a i\nW: CVC").unwrap();
    let context = GenerationContext::new();

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let direct: Vec<String> = (0..20)
        .map(|_| generate(grammar.rules(), grammar.morphology(), &context, &mut rng).unwrap())
        .collect();
    let via_generator = WordGenerator::seeded(&grammar, context, 7).take(20).unwrap();

    assert_eq!(direct, via_generator);
}

#[test]
fn words_iterator_yields_forever() {
    let grammar = compile("V: a e\nW: V").unwrap();
    let mut generator = WordGenerator::seeded(&grammar, GenerationContext::new(), 3);
    let words: Vec<String> = generator
        .words()
        .take(50)
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(words.len(), 50);
}

// =============================================================================
// Properties
// =============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_seed_stays_in_the_pair_set(seed in any::<u64>()) {
            let grammar = compile("V: a e\nW: VV").unwrap();
            let word = WordGenerator::seeded(&grammar, GenerationContext::new(), seed)
                .generate()
                .unwrap();
            prop_assert!(["aa", "ae", "ea", "ee"].contains(&word.as_str()));
        }
    }
}
