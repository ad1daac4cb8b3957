//! Integration tests for grammar compilation
//!
//! Tests dependency ordering, reference checks and the compiled rule form.

use wordsmith_engine::{RuleState, compile};
use wordsmith_foundation::{ErrorKind, RuleId};

fn id(c: char) -> RuleId {
    RuleId::new(c).unwrap()
}

const LAYERED: &str = "\
W: SS(S)
S: O(N)V
O: C CL
L: l r
C: p t k
V: a e a
N: n m
";

// =============================================================================
// Compiled Form
// =============================================================================

#[test]
fn compiled_rules_are_distinct_literals() {
    let grammar = compile(LAYERED).unwrap();
    for (rule_id, rule) in grammar.rules().iter() {
        if rule_id.is_entry() {
            assert_eq!(rule.state(), RuleState::Raw);
            continue;
        }
        assert_eq!(rule.state(), RuleState::Compiled, "rule {rule_id}");

        let alternatives = rule.patterns();
        for alternative in alternatives {
            assert!(
                !alternative.chars().any(|c| RuleId::is_reference(c) || c == '(' || c == ')'),
                "rule {rule_id} still holds {alternative:?}"
            );
        }
        let mut unique = alternatives.to_vec();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), alternatives.len(), "rule {rule_id} has duplicates");
    }
}

#[test]
fn duplicate_alternatives_are_collapsed() {
    let grammar = compile(LAYERED).unwrap();
    assert_eq!(grammar.rules().alternatives(id('V')).unwrap(), ["a", "e"]);
}

#[test]
fn nested_rules_expand_fully() {
    let grammar = compile(LAYERED).unwrap();
    let onsets = grammar.rules().alternatives(id('O')).unwrap();
    assert_eq!(onsets.len(), 3 + 3 * 2);
    assert!(onsets.contains(&"pl".to_string()));
    assert!(onsets.contains(&"kr".to_string()));

    // O(N)V: 9 onsets, with or without one of 2 nasals, then 2 vowels.
    let syllables = grammar.rules().alternatives(id('S')).unwrap();
    assert_eq!(syllables.len(), 9 * 3 * 2);
}

#[test]
fn dependencies_compile_first() {
    let grammar = compile(LAYERED).unwrap();
    let order = grammar.compile_order();
    let position = |c: char| order.iter().position(|r| *r == id(c)).unwrap();

    assert!(position('L') < position('O'));
    assert!(position('C') < position('O'));
    assert!(position('O') < position('S'));
    assert!(position('V') < position('S'));
    assert!(!order.contains(&RuleId::ENTRY));
}

#[test]
fn compiling_twice_is_identical() {
    assert_eq!(compile(LAYERED).unwrap(), compile(LAYERED).unwrap());
}

#[test]
fn declaration_order_does_not_matter() {
    let reversed: String = LAYERED.lines().rev().collect::<Vec<_>>().join("\n");
    let a = compile(LAYERED).unwrap();
    let b = compile(&reversed).unwrap();
    for c in ['S', 'O', 'L', 'C', 'V', 'N'] {
        assert_eq!(a.rules().alternatives(id(c)), b.rules().alternatives(id(c)));
    }
}

#[test]
fn grammar_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<wordsmith_engine::Grammar>();
}

#[test]
fn later_declaration_wins() {
    let grammar = compile("V: a\nV: o u\nW: V").unwrap();
    assert_eq!(grammar.rules().alternatives(id('V')).unwrap(), ["o", "u"]);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unresolved_reference_in_entry() {
    let err = compile("W: Q").unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnresolvedReference { id, .. } if id.as_char() == 'Q'
    ));
}

#[test]
fn unresolved_reference_in_group() {
    let err = compile("C: pX\nW: C").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnresolvedReference { .. }));
}

#[test]
fn cycles_are_rejected() {
    let err = compile("A: B\nB: A\nW: A").unwrap_err();
    match err.kind {
        ErrorKind::CyclicReference { cycle } => {
            assert_eq!(cycle.first(), cycle.last());
            assert!(cycle.contains(&id('A')));
            assert!(cycle.contains(&id('B')));
        }
        other => panic!("expected cycle, got {other:?}"),
    }
}

#[test]
fn self_reference_outside_entry_is_a_cycle() {
    let err = compile("A: aA\nW: A").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::CyclicReference { .. }));
}

#[test]
fn entry_rule_cannot_be_referenced() {
    let err = compile("A: W\nW: a").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::EntryRuleReferenced { .. }));
}

#[test]
fn unbalanced_group_is_malformed() {
    let err = compile("V: a(e\nW: V").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedGroup { .. }));

    let err = compile("W: a)").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedGroup { .. }));
}

#[test]
fn syntax_errors_surface_from_compile() {
    assert!(compile("W: a\nnot a declaration").unwrap_err().is_syntax());
}

#[test]
fn missing_entry_still_compiles() {
    let grammar = compile("V: a e").unwrap();
    assert!(!grammar.rules().has_entry());
}
