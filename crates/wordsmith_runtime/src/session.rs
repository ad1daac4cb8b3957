//! Session state for the CLI and the grammar shell.
//!
//! A session owns the current grammar together with the source text it was
//! compiled from, so declarations typed at the shell can be appended and the
//! whole grammar recompiled.

use std::fs;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wordsmith_debug::Tracer;
use wordsmith_engine::{
    DerivationPrinter, GenerationContext, Grammar, compile_observed, generate, generate_observed,
};
use wordsmith_foundation::{Error, ErrorKind, Result};

/// Name used for grammar text that did not come from a file.
pub const INLINE_SOURCE: &str = "<shell>";

/// A loaded grammar plus generation settings.
pub struct Session {
    grammar: Grammar,
    source: String,
    origin: String,
    context: GenerationContext,
    rng: ChaCha8Rng,
    tracer: Tracer,
    load_path: PathBuf,
}

impl Session {
    /// Creates a session with an empty grammar and an entropy-seeded RNG.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grammar: Grammar::default(),
            source: String::new(),
            origin: INLINE_SOURCE.to_string(),
            context: GenerationContext::default(),
            rng: ChaCha8Rng::from_entropy(),
            tracer: Tracer::disabled(),
            load_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Sets the generation options.
    #[must_use]
    pub fn with_context(mut self, context: GenerationContext) -> Self {
        self.set_context(context);
        self
    }

    /// Seeds the generator.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.reseed(seed);
        self
    }

    /// Replaces the tracer.
    #[must_use]
    pub fn with_tracer(mut self, tracer: Tracer) -> Self {
        self.tracer = tracer;
        self
    }

    /// Returns the current grammar.
    #[must_use]
    pub const fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Returns the grammar source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns where the grammar came from.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Returns the generation options.
    #[must_use]
    pub const fn context(&self) -> &GenerationContext {
        &self.context
    }

    /// Replaces the generation options.
    ///
    /// With `debug` set, derivation chains of changed words go to stderr.
    /// The tracer is left as it is.
    pub fn set_context(&mut self, context: GenerationContext) {
        self.context = context;
    }

    /// Reseeds the generator.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
    }

    /// Returns the tracer.
    #[must_use]
    pub const fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    /// Returns the tracer mutably.
    pub fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }

    /// Reads and compiles a grammar file, replacing the current grammar.
    ///
    /// Relative paths resolve against the directory of the last loaded file.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read, or any compile error.
    /// On error the current grammar is kept.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let resolved = if path.is_relative() {
            self.load_path.join(path)
        } else {
            path.to_path_buf()
        };

        let source = fs::read_to_string(&resolved).map_err(|e| {
            Error::new(ErrorKind::Io {
                path: resolved.display().to_string(),
                message: e.to_string(),
            })
        })?;

        self.load_source(&source, &path.display().to_string())?;
        if let Some(parent) = resolved.parent() {
            self.load_path = parent.to_path_buf();
        }
        Ok(())
    }

    /// Compiles grammar text, replacing the current grammar.
    ///
    /// # Errors
    /// Returns any compile error; the current grammar is kept.
    pub fn load_source(&mut self, source: &str, origin: &str) -> Result<()> {
        self.grammar = self.compile(source)?;
        self.source = source.to_string();
        self.origin = origin.to_string();
        self.tracer.grammar_loaded(
            origin,
            self.grammar.rules().len(),
            self.grammar.morphology().len(),
        );
        Ok(())
    }

    /// Appends one declaration line and recompiles.
    ///
    /// A rule that already exists is replaced by the new declaration.
    ///
    /// # Errors
    /// Returns any compile error; the grammar is left unchanged.
    pub fn append_declaration(&mut self, line: &str) -> Result<()> {
        let mut source = self.source.clone();
        if !source.is_empty() && !source.ends_with('\n') {
            source.push('\n');
        }
        source.push_str(line.trim_end());
        source.push('\n');

        self.grammar = self.compile(&source)?;
        self.source = source;
        Ok(())
    }

    fn compile(&mut self, source: &str) -> Result<Grammar> {
        compile_observed(source, &mut self.tracer)
    }

    /// Generates one word.
    ///
    /// # Errors
    /// See [`wordsmith_engine::generate`].
    pub fn generate(&mut self) -> Result<String> {
        let word = if self.tracer.is_enabled() {
            self.tracer.begin_word();
            generate_observed(
                self.grammar.rules(),
                self.grammar.morphology(),
                &self.context,
                &mut self.rng,
                &mut self.tracer,
            )?
        } else {
            generate(
                self.grammar.rules(),
                self.grammar.morphology(),
                &self.context,
                &mut self.rng,
            )?
        };
        self.tracer.word_generated(&word);
        Ok(word)
    }

    /// Generates `count` words.
    ///
    /// # Errors
    /// Stops at the first generation error.
    pub fn generate_batch(&mut self, count: usize) -> Result<Vec<String>> {
        (0..count).map(|_| self.generate()).collect()
    }

    /// Runs a word through the morphology, regardless of the morphology flag.
    ///
    /// # Errors
    /// Fails if the morphology has not been compiled.
    pub fn mutate(&mut self, word: &str) -> Result<String> {
        let morphology = self.grammar.morphology();
        if self.tracer.is_enabled() {
            self.tracer.begin_word();
            let mutated = morphology.apply_observed(word, &mut self.tracer)?;
            self.tracer.word_generated(&mutated);
            Ok(mutated)
        } else if self.context.debug {
            morphology.apply_observed(word, &mut DerivationPrinter::new())
        } else {
            morphology.apply(word)
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
