//! Wordsmith CLI entry point.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use wordsmith_debug::{DebugConfig, Tracer};
use wordsmith_engine::GenerationContext;
use wordsmith_runtime::{Repl, Session};

/// Generate words from a Wordsmith grammar file.
#[derive(Parser, Debug)]
#[command(name = "wordsmith", version)]
#[command(about = "Procedural word generator driven by a grammar of character groups")]
struct CliConfig {
    /// Grammar file to load
    file: PathBuf,

    /// Number of words to generate
    #[arg(short, long, default_value_t = 50)]
    number: usize,

    /// Generate words until interrupted
    #[arg(short, long)]
    infinite: bool,

    /// Separate words with a tab instead of a newline
    #[arg(short, long)]
    compact: bool,

    /// Apply morphology transformations
    #[arg(short, long)]
    mutate: bool,

    /// Keep '-' syllable markers in the output
    #[arg(long)]
    keep_syllables: bool,

    /// Print morphology derivations to stderr
    #[arg(long)]
    debug: bool,

    /// Record compile events and derivations to stderr
    #[arg(long)]
    trace: bool,

    /// Seed the generator for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Open the grammar shell with the file loaded
    #[arg(long)]
    interactive: bool,
}

impl CliConfig {
    fn context(&self) -> GenerationContext {
        GenerationContext::new()
            .with_morphology(self.mutate)
            .with_keep_syllables(self.keep_syllables)
            .with_debug(self.debug)
    }

    fn separator(&self) -> &'static str {
        if self.compact { "\t" } else { "\n" }
    }
}

fn main() -> ExitCode {
    let config = CliConfig::parse();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CliConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new();
    if config.trace {
        session = session.with_tracer(Tracer::new(DebugConfig::verbose()));
    }
    session = session.with_context(config.context());
    if let Some(seed) = config.seed {
        session.reseed(seed);
    }

    let started = Instant::now();
    session.load_file(&config.file)?;
    eprintln!(
        "Took {:.4} seconds to load",
        started.elapsed().as_secs_f64()
    );

    if config.interactive {
        let mut repl = Repl::new()?.with_session(session);
        repl.run()?;
        return Ok(());
    }

    if config.infinite {
        eprintln!("Generating words from {}", config.file.display());
    } else {
        eprintln!(
            "Generating {} words from {}",
            config.number,
            config.file.display()
        );
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let separator = config.separator();
    let mut written = 0usize;

    while config.infinite || written < config.number {
        let word = session.generate()?;
        if written > 0 && write!(out, "{separator}").is_err() {
            break;
        }
        // A closed pipe ends the run quietly.
        if write!(out, "{word}").is_err() {
            break;
        }
        written += 1;
        if config.infinite && out.flush().is_err() {
            break;
        }
    }

    let _ = writeln!(out);
    let _ = out.flush();
    Ok(())
}
