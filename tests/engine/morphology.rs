//! Integration tests for morphology
//!
//! Tests rule markers in transformation patterns and template replacement.

use wordsmith_engine::{DerivationPrinter, GenerationContext, WordGenerator, compile};
use wordsmith_foundation::ErrorKind;

fn first_word(source: &str, context: GenerationContext) -> String {
    let grammar = compile(source).unwrap();
    WordGenerator::seeded(&grammar, context, 1).generate().unwrap()
}

fn mutating() -> GenerationContext {
    GenerationContext::new().with_morphology(true)
}

// =============================================================================
// Switching
// =============================================================================

#[test]
fn morphology_applies_only_when_enabled() {
    let source = "W: cat\n/a/ > \"e\"";
    assert_eq!(first_word(source, mutating()), "cet");
    assert_eq!(first_word(source, GenerationContext::new()), "cat");
}

#[test]
fn transformations_chain_in_order() {
    let source = "W: cat\n/a/ > \"e\"\n/e/ > \"i\"";
    assert_eq!(first_word(source, mutating()), "cit");
}

#[test]
fn morphology_sees_syllable_markers() {
    let source = "W: ka-ta\n/a-t/ > \"a-d\"";
    assert_eq!(first_word(source, mutating()), "kada");
    assert_eq!(
        first_word(source, mutating().with_keep_syllables(true)),
        "ka-da"
    );
}

// =============================================================================
// Rule Markers
// =============================================================================

#[test]
fn escaped_alternation_marker_matches_rule() {
    let grammar = compile("A: x y\n/\\|A/ > \"z\"").unwrap();
    let transformation = grammar.morphology().iter().next().unwrap();
    let regex = transformation.regex().unwrap();
    assert!(regex.is_match("x"));
    assert!(regex.is_match("y"));
    assert!(!regex.is_match("q"));
}

#[test]
fn concatenation_marker_builds_a_class() {
    let source = "V: a e\nW: tet\n/[&V]/ > \"o\"";
    assert_eq!(first_word(source, mutating()), "tot");
}

#[test]
fn alternation_inside_group() {
    let source = "C: pl t\nW: plat\n/(|C)a/ > \"\\1o\"";
    assert_eq!(first_word(source, mutating()), "plot");
}

#[test]
fn markers_see_compiled_alternatives() {
    let source = "L: l r\nC: pL\nW: Ca\n/^|C/ > \"b\"";
    let grammar = compile(source).unwrap();
    let expanded = grammar.morphology().iter().next().unwrap().expanded().unwrap();
    assert_eq!(expanded, "^pl|pr");
    assert_eq!(first_word(source, mutating()), "ba");
}

// =============================================================================
// Templates
// =============================================================================

#[test]
fn numbered_back_references_swap() {
    let source = "W: ab\n/(a)(b)/ > \"\\2\\1\"";
    assert_eq!(first_word(source, mutating()), "ba");
}

#[test]
fn back_references_across_a_syllable_break() {
    let source = "W: a-b\n/(a)-(b)/ > \"\\2\\1\"";
    assert_eq!(first_word(source, mutating()), "ba");
}

#[test]
fn whole_match_reference() {
    let source = "W: kat\n/a/ > \"\\&\\&\"";
    assert_eq!(first_word(source, mutating()), "kaat");
}

#[test]
fn dollar_is_literal() {
    let source = "W: kat\n/a/ > \"$1\"";
    assert_eq!(first_word(source, mutating()), "k$1t");
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn marker_to_missing_rule_is_unresolved() {
    let err = compile("W: a\n/|Q/ > \"b\"").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnresolvedReference { .. }));
}

#[test]
fn bad_regex_is_reported_with_position() {
    let err = compile("W: a\n\n/(a/ > \"b\"").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidRegex { .. }));
    assert_eq!(err.context.and_then(|c| c.line), Some(3));
}

// =============================================================================
// Derivation Chains
// =============================================================================

fn derivation(source: &str) -> String {
    let grammar = compile(source).unwrap();
    let mut printer = DerivationPrinter::with_writer(Vec::new());
    WordGenerator::seeded(&grammar, mutating().with_debug(true), 1)
        .generate_observed(&mut printer)
        .unwrap();
    String::from_utf8(printer.into_inner()).unwrap()
}

#[test]
fn changed_word_prints_its_chain() {
    let source = "W: cat\n/a/ > \"e\"\n/t/ > \"d\"\n/q/ > \"z\"";
    assert_eq!(derivation(source), "cat => cet => ced\n");
}

#[test]
fn unchanged_word_prints_nothing() {
    let source = "W: bob\n/a/ > \"e\"\n/q/ > \"z\"";
    assert_eq!(derivation(source), "");
}

#[test]
fn lookaround_is_rejected() {
    let err = compile("W: cat\n/a(?=t)/ > \"e\"").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidRegex { .. }));
}
