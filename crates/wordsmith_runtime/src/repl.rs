//! The interactive grammar shell.
//!
//! Lines starting with `:` are commands; anything else is a grammar
//! declaration that is appended to the session grammar.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::PathBuf;

use wordsmith_debug::{DebugConfig, Tracer};
use wordsmith_engine::RuleState;
use wordsmith_foundation::{Error, Result, RuleId};

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::session::Session;

/// Number of words `:gen` produces without an argument.
pub const DEFAULT_GEN_COUNT: usize = 10;

/// A switch that `:set` can flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Setting {
    /// Apply morphology to generated words.
    Morphology,
    /// Keep syllable markers.
    Syllables,
    /// Print derivations.
    Debug,
    /// Record compile events as well as derivations.
    Trace,
}

/// One parsed line of shell input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `:load PATH`
    Load(PathBuf),
    /// `:gen [N]`
    Generate(usize),
    /// `:rule X`
    ShowRule(RuleId),
    /// `:rules`
    ListRules,
    /// `:morph WORD`
    Mutate(String),
    /// `:set NAME on|off`
    Set(Setting, bool),
    /// `:seed N`
    Seed(u64),
    /// `:help`
    Help,
    /// `:quit`
    Quit,
    /// Any line not starting with `:`.
    Declare(String),
}

impl Command {
    /// Parses one line of input.
    ///
    /// # Errors
    /// Returns an invalid command error for unknown commands or bad arguments.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let Some(command) = line.strip_prefix(':') else {
            return Ok(Self::Declare(line.to_string()));
        };

        let mut words = command.split_whitespace();
        let name = words.next().unwrap_or_default();
        let args: Vec<&str> = words.collect();

        match (name, args.as_slice()) {
            ("load" | "l", [path]) => Ok(Self::Load(PathBuf::from(*path))),
            ("gen" | "g", []) => Ok(Self::Generate(DEFAULT_GEN_COUNT)),
            ("gen" | "g", [n]) => n
                .parse()
                .map(Self::Generate)
                .map_err(|_| Error::invalid_command(format!("not a word count: {n}"))),
            ("rule", [id]) => {
                let mut chars = id.chars();
                match (chars.next().and_then(RuleId::new), chars.next()) {
                    (Some(rule), None) => Ok(Self::ShowRule(rule)),
                    _ => Err(Error::invalid_command(format!("not a rule name: {id}"))),
                }
            }
            ("rules", []) => Ok(Self::ListRules),
            ("morph" | "m", [word]) => Ok(Self::Mutate((*word).to_string())),
            ("set", [setting, value]) => {
                let setting = match *setting {
                    "morphology" | "mutate" => Setting::Morphology,
                    "syllables" => Setting::Syllables,
                    "debug" => Setting::Debug,
                    "trace" => Setting::Trace,
                    other => {
                        return Err(Error::invalid_command(format!("unknown setting: {other}")));
                    }
                };
                let enabled = match *value {
                    "on" | "true" | "yes" => true,
                    "off" | "false" | "no" => false,
                    other => {
                        return Err(Error::invalid_command(format!(
                            "expected on or off, got {other}"
                        )));
                    }
                };
                Ok(Self::Set(setting, enabled))
            }
            ("seed", [n]) => n
                .parse()
                .map(Self::Seed)
                .map_err(|_| Error::invalid_command(format!("not a seed: {n}"))),
            ("help" | "h" | "?", []) => Ok(Self::Help),
            ("quit" | "q" | "exit", []) => Ok(Self::Quit),
            _ => Err(Error::invalid_command(format!(
                "{line} (type :help for commands)"
            ))),
        }
    }
}

/// What the shell should do after a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// Print this text and continue.
    Output(String),
    /// Continue silently.
    Nothing,
    /// Leave the shell.
    Quit,
}

/// The interactive grammar shell.
pub struct Repl<E: LineEditor = RustylineEditor> {
    editor: E,
    session: Session,
    show_banner: bool,
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a shell with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a shell with the given editor.
    pub fn with_editor(editor: E) -> Self {
        Self {
            editor,
            session: Session::new(),
            show_banner: true,
            prompt: "ws> ".to_string(),
        }
    }

    /// Sets the session for this shell.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the session mutably.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the shell until EOF or `:quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            let line = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history(&line);

            match self.eval(&line) {
                Ok(Response::Output(text)) => println!("{text}"),
                Ok(Response::Nothing) => {}
                Ok(Response::Quit) => break,
                Err(e) => Self::print_error(&e),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Evaluates one line of input.
    ///
    /// # Errors
    ///
    /// Returns command parse, I/O, compile, and generation errors.
    pub fn eval(&mut self, input: &str) -> Result<Response> {
        if input.trim().is_empty() {
            return Ok(Response::Nothing);
        }
        let command = Command::parse(input)?;
        self.execute(command)
    }

    /// Executes a parsed command.
    ///
    /// # Errors
    ///
    /// See [`Repl::eval`].
    pub fn execute(&mut self, command: Command) -> Result<Response> {
        match command {
            Command::Load(path) => {
                self.session.load_file(&path)?;
                let grammar = self.session.grammar();
                Ok(Response::Output(format!(
                    "loaded {}: {} rules, {} transformations",
                    path.display(),
                    grammar.rules().len(),
                    grammar.morphology().len()
                )))
            }
            Command::Generate(count) => {
                let words = self.session.generate_batch(count)?;
                Ok(Response::Output(words.join("\n")))
            }
            Command::ShowRule(id) => Ok(Response::Output(self.describe_rule(id)?)),
            Command::ListRules => Ok(Response::Output(self.list_rules())),
            Command::Mutate(word) => Ok(Response::Output(self.session.mutate(&word)?)),
            Command::Set(setting, enabled) => {
                self.apply_setting(setting, enabled);
                Ok(Response::Nothing)
            }
            Command::Seed(seed) => {
                self.session.reseed(seed);
                Ok(Response::Nothing)
            }
            Command::Help => Ok(Response::Output(HELP.trim_end().to_string())),
            Command::Quit => Ok(Response::Quit),
            Command::Declare(line) => {
                self.session.append_declaration(&line)?;
                Ok(Response::Nothing)
            }
        }
    }

    fn apply_setting(&mut self, setting: Setting, enabled: bool) {
        let context = *self.session.context();
        match setting {
            Setting::Morphology => self.session.set_context(context.with_morphology(enabled)),
            Setting::Syllables => self.session.set_context(context.with_keep_syllables(enabled)),
            Setting::Debug => self.session.set_context(context.with_debug(enabled)),
            Setting::Trace => {
                let tracer = if enabled {
                    Tracer::new(DebugConfig::verbose())
                } else {
                    Tracer::disabled()
                };
                *self.session.tracer_mut() = tracer;
            }
        }
    }

    fn describe_rule(&self, id: RuleId) -> Result<String> {
        let rule = self
            .session
            .grammar()
            .rules()
            .get(id)
            .ok_or_else(|| Error::invalid_command(format!("no rule {id}")))?;
        let state = match rule.state() {
            RuleState::Raw => "raw",
            RuleState::Compiled => "compiled",
        };
        Ok(format!(
            "{id}: {} ({state}, {} alternatives)",
            rule.patterns().join(" "),
            rule.len()
        ))
    }

    fn list_rules(&self) -> String {
        let grammar = self.session.grammar();
        let mut out = String::new();
        for (id, rule) in grammar.rules().iter() {
            let _ = writeln!(out, "{id}: {} alternatives", rule.len());
        }
        for transformation in grammar.morphology().iter() {
            let _ = writeln!(out, "{transformation}");
        }
        if out.is_empty() {
            out.push_str("no rules loaded");
        }
        out.trim_end().to_string()
    }

    fn print_error(error: &Error) {
        eprintln!("\x1b[31mError: {error}\x1b[0m");
    }

    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mWordsmith grammar shell v{}\x1b[0m", env!("CARGO_PKG_VERSION"));
        println!("Type declarations to extend the grammar, :help for commands, Ctrl+D to exit.\n");
        let _ = io::stdout().flush();
    }
}

const HELP: &str = "
:load PATH              load a grammar file, replacing the current grammar
:gen [N]                generate N words (default 10)
:rule X                 show rule X
:rules                  list rules and transformations
:morph WORD             run WORD through the transformations
:set NAME on|off        NAME is morphology, syllables, debug, or trace
:seed N                 reseed the generator
:help                   show this help
:quit                   leave the shell
X: a b c                declare or replace a rule
/pattern/ > \"text\"      add a transformation
";
