//! Syntax highlighting for the grammar shell.

use std::borrow::Cow;

use wordsmith_foundation::RuleId;
use wordsmith_language::{Lexer, TokenKind};

const RESET: &str = "\x1b[0m";
const RULE_HEAD: &str = "\x1b[1;36m";
const REFERENCE: &str = "\x1b[1m";
const REGEX: &str = "\x1b[35m";
const REPLACEMENT: &str = "\x1b[33m";
const COMMENT: &str = "\x1b[2;3m";
const ERROR: &str = "\x1b[31m";
const COMMAND: &str = "\x1b[36m";

/// Colors grammar declarations and shell commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct GrammarHighlighter;

impl GrammarHighlighter {
    /// Creates a new highlighter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Highlights one line of input.
    #[allow(clippy::unused_self)]
    #[must_use]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.trim().is_empty() {
            return Cow::Borrowed(line);
        }
        if line.starts_with(':') {
            return Cow::Owned(highlight_command(line));
        }

        let mut result = String::with_capacity(line.len() * 2);
        let mut cursor = 0;

        for token in Lexer::tokenize_all(line) {
            let span = token.span;
            if span.start > cursor {
                result.push_str(&line[cursor..span.start]);
            }
            let text = token.text(line);

            match &token.kind {
                TokenKind::RuleHead(_) => paint(&mut result, RULE_HEAD, text),
                TokenKind::Word(_) => highlight_pattern(&mut result, text),
                TokenKind::Regex(_) => paint(&mut result, REGEX, text),
                TokenKind::Replacement(_) => paint(&mut result, REPLACEMENT, text),
                TokenKind::Comment(_) => paint(&mut result, COMMENT, text),
                TokenKind::Error(_) => paint(&mut result, ERROR, text),
                TokenKind::Arrow | TokenKind::Newline | TokenKind::Eof => result.push_str(text),
            }
            cursor = cursor.max(span.end);
        }

        if cursor < line.len() {
            result.push_str(&line[cursor..]);
        }
        Cow::Owned(result)
    }
}

fn paint(out: &mut String, color: &str, text: &str) {
    out.push_str(color);
    out.push_str(text);
    out.push_str(RESET);
}

/// Bolds rule references inside a pattern.
fn highlight_pattern(out: &mut String, text: &str) {
    for c in text.chars() {
        if RuleId::is_reference(c) {
            out.push_str(REFERENCE);
            out.push(c);
            out.push_str(RESET);
        } else {
            out.push(c);
        }
    }
}

fn highlight_command(line: &str) -> String {
    let end = line.find(char::is_whitespace).unwrap_or(line.len());
    let mut result = String::with_capacity(line.len() + 8);
    paint(&mut result, COMMAND, &line[..end]);
    result.push_str(&line[end..]);
    result
}
