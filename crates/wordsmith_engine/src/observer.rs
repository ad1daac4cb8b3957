//! Observation hooks for compilation and morphology.
//!
//! The engine reports what it does through these traits; the debug layer
//! implements them to record and print traces.

use std::io::{self, Write};

use wordsmith_foundation::RuleId;

/// Receives events while a grammar is compiled.
pub trait CompileObserver {
    /// A rule was expanded into `alternatives` literal strings.
    fn rule_compiled(&mut self, _id: RuleId, _alternatives: usize) {}

    /// A transformation's pattern was expanded and compiled.
    fn transformation_compiled(&mut self, _index: usize, _expanded: &str) {}
}

/// Receives the intermediate forms of a word as morphology is applied.
pub trait MorphologyObserver {
    /// Called before the first transformation runs.
    fn begin(&mut self, _word: &str) {}

    /// Transformation `index` rewrote `before` into `after`.
    ///
    /// Only called when the word actually changed.
    fn step(&mut self, index: usize, before: &str, after: &str);

    /// Called after the last transformation ran.
    fn finish(&mut self, _word: &str) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl CompileObserver for NoopObserver {}

impl MorphologyObserver for NoopObserver {
    fn step(&mut self, _index: usize, _before: &str, _after: &str) {}
}

/// Prints each derivation chain as `base => step => ... => final`.
///
/// Words that no transformation touched are not printed. Output goes to
/// stderr unless another writer is supplied.
#[derive(Debug)]
pub struct DerivationPrinter<W: Write = io::Stderr> {
    out: W,
    chain: Vec<String>,
}

impl DerivationPrinter {
    /// Creates a printer that writes to stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::with_writer(io::stderr())
    }
}

impl Default for DerivationPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> DerivationPrinter<W> {
    /// Creates a printer that writes to `out`.
    #[must_use]
    pub fn with_writer(out: W) -> Self {
        Self {
            out,
            chain: Vec::new(),
        }
    }

    /// Returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MorphologyObserver for DerivationPrinter<W> {
    fn begin(&mut self, word: &str) {
        self.chain.clear();
        self.chain.push(word.to_string());
    }

    fn step(&mut self, _index: usize, _before: &str, after: &str) {
        self.chain.push(after.to_string());
    }

    fn finish(&mut self, _word: &str) {
        if self.chain.len() > 1 {
            let _ = writeln!(self.out, "{}", self.chain.join(" => "));
        }
        self.chain.clear();
    }
}
