//! Integration tests for the parser and resolver
//!
//! Tests parsing grammar source into declarations and resolving them.

use wordsmith_foundation::ErrorKind;
use wordsmith_language::{Declaration, Resolved, parse, resolve};

const GRAMMAR: &str = "\
# A small grammar
V: a e i
C: p t k

W: CV(C)   # entry
/a/ > \"o\"
";

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn parse_full_grammar() {
    let decls = parse(GRAMMAR).unwrap();
    let groups = decls
        .iter()
        .filter(|d| matches!(d, Declaration::Group(_)))
        .count();
    let transformations = decls
        .iter()
        .filter(|d| matches!(d, Declaration::Transformation(_)))
        .count();
    assert_eq!(groups, 3);
    assert_eq!(transformations, 1);
}

#[test]
fn trivia_is_preserved_by_parse() {
    let decls = parse(GRAMMAR).unwrap();
    assert!(decls.iter().any(|d| matches!(d, Declaration::Comment(c, _) if c == "entry")));
    assert!(decls.iter().any(|d| matches!(d, Declaration::Blank(_))));
}

#[test]
fn syntax_error_reports_line() {
    let err = parse("V: a\n\n?? what\n").unwrap_err();
    match err.kind {
        ErrorKind::GrammarSyntax { line, context, .. } => {
            assert_eq!(line, 3);
            assert_eq!(context, "?? what");
        }
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn transformation_without_replacement_is_error() {
    assert!(parse("/a/ > \n").unwrap_err().is_syntax());
}

// =============================================================================
// Resolution
// =============================================================================

#[test]
fn resolve_drops_trivia_and_keeps_order() {
    let resolved = resolve(&parse(GRAMMAR).unwrap());
    assert_eq!(resolved.len(), 4);

    let ids: Vec<char> = resolved
        .iter()
        .filter_map(|r| match r {
            Resolved::Rule { id, .. } => Some(id.as_char()),
            Resolved::Transformation { .. } => None,
        })
        .collect();
    assert_eq!(ids, vec!['V', 'C', 'W']);

    assert!(matches!(
        &resolved[3],
        Resolved::Transformation { pattern, replacement, .. } if pattern == "a" && replacement == "o"
    ));
}

#[test]
fn resolved_spans_point_at_declarations() {
    let resolved = resolve(&parse(GRAMMAR).unwrap());
    assert_eq!(resolved[0].span().line, 2);
    assert_eq!(resolved[3].span().line, 6);
}
