//! Session and grammar shell tests
//!
//! Drives the shell the way a user would, through a scripted line editor.

use std::fs;
use std::path::PathBuf;

use wordsmith::foundation::{ErrorKind, Result};
use wordsmith::runtime::{LineEditor, ReadResult, Repl, Response, Session};

struct ScriptedEditor {
    lines: Vec<String>,
    history: Vec<String>,
}

impl ScriptedEditor {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().rev().map(|l| (*l).to_string()).collect(),
            history: Vec::new(),
        }
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self.lines.pop().map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }
}

fn shell() -> Repl<ScriptedEditor> {
    let mut repl = Repl::with_editor(ScriptedEditor::new(&[])).without_banner();
    repl.session_mut().reseed(11);
    repl
}

fn output(response: Response) -> String {
    match response {
        Response::Output(text) => text,
        other => panic!("expected output, got {other:?}"),
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wordsmith-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

// =============================================================================
// Building a Grammar Interactively
// =============================================================================

#[test]
fn declarations_then_generation() {
    let mut repl = shell();
    for line in ["C: p t", "V: a i", "W: CV(C)"] {
        assert_eq!(repl.eval(line).unwrap(), Response::Nothing);
    }

    let words = output(repl.eval(":gen 30").unwrap());
    let words: Vec<&str> = words.lines().collect();
    assert_eq!(words.len(), 30);
    assert!(words.iter().all(|w| w.len() == 2 || w.len() == 3));
}

#[test]
fn morphology_toggle() {
    let mut repl = shell();
    repl.eval("W: cat").unwrap();
    repl.eval("/a/ > \"e\"").unwrap();

    assert_eq!(output(repl.eval(":gen 1").unwrap()), "cat");
    repl.eval(":set morphology on").unwrap();
    assert_eq!(output(repl.eval(":gen 1").unwrap()), "cet");
    assert_eq!(output(repl.eval(":morph banana").unwrap()), "benene");
}

#[test]
fn rule_inspection() {
    let mut repl = shell();
    repl.eval("L: l r").unwrap();
    repl.eval("C: pL t").unwrap();

    assert_eq!(
        output(repl.eval(":rule C").unwrap()),
        "C: pl pr t (compiled, 3 alternatives)"
    );
    let listing = output(repl.eval(":rules").unwrap());
    assert!(listing.contains("C: 3 alternatives"));
    assert!(listing.contains("L: 2 alternatives"));
}

#[test]
fn failed_declaration_keeps_grammar() {
    let mut repl = shell();
    repl.eval("V: a").unwrap();
    let err = repl.eval("W: VQ").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnresolvedReference { .. }));
    assert!(!repl.session().source().contains("VQ"));
}

#[test]
fn unknown_command_is_rejected() {
    let mut repl = shell();
    let err = repl.eval(":frobnicate").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidCommand(_)));
}

#[test]
fn seed_command_repeats_output() {
    let mut repl = shell();
    repl.eval("V: a e i o u").unwrap();
    repl.eval("W: VVV").unwrap();

    repl.eval(":seed 5").unwrap();
    let first = output(repl.eval(":gen 10").unwrap());
    repl.eval(":seed 5").unwrap();
    let second = output(repl.eval(":gen 10").unwrap());
    assert_eq!(first, second);
}

// =============================================================================
// Files
// =============================================================================

#[test]
fn load_command_reads_file() {
    let dir = scratch_dir("load");
    let path = dir.join("tiny.txt");
    fs::write(&path, "V: a e\nW: VV\n/ea/ > \"ia\"\n").unwrap();

    let mut repl = shell();
    let summary = output(repl.eval(&format!(":load {}", path.display())).unwrap());
    assert!(summary.contains("2 rules"));
    assert!(summary.contains("1 transformations"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn session_loads_and_generates() {
    let dir = scratch_dir("session");
    let path = dir.join("grammar.txt");
    fs::write(&path, "C: p t k\nV: a\nW: CV-CV\n").unwrap();

    let mut session = Session::new().with_seed(3);
    session.load_file(&path).unwrap();
    let words = session.generate_batch(50).unwrap();
    assert!(words.iter().all(|w| w.len() == 4 && !w.contains('-')));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_file_is_io_error() {
    let mut repl = shell();
    let err = repl.eval(":load /no/such/grammar.txt").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io { .. }));
}

// =============================================================================
// Running the Loop
// =============================================================================

#[test]
fn run_consumes_script_until_quit() {
    let editor = ScriptedEditor::new(&["V: a", "", "W: V", ":gen 2", ":quit", "W: never"]);
    let mut repl = Repl::with_editor(editor).without_banner();
    repl.run().unwrap();

    assert!(repl.session().source().contains("W: V"));
    assert!(!repl.session().source().contains("never"));
}
