//! Lexer for the grammar DSL.
//!
//! The grammar is line oriented, so the lexer tracks what kind of line it is
//! in: the first token decides whether the rest of the line is a list of
//! pattern words or the `> "replacement"` tail of a transformation.

use wordsmith_foundation::RuleId;

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// What the lexer expects next on the current line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineState {
    /// Nothing significant has been read on this line yet.
    Start,
    /// Inside a character group, after `X:`.
    Group,
    /// Inside a transformation, after `/.../`.
    Transform,
}

/// Lexer for grammar source text.
pub struct Lexer<'src> {
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
    /// Line-level mode.
    state: LineState,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            position: 0,
            line: 1,
            column: 1,
            state: LineState::Start,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_blanks();

        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some('\n' | '\r') => self.scan_newline(),
            Some('#') => self.scan_comment(),
            Some(c) => match self.state {
                LineState::Start => self.scan_line_start(c),
                LineState::Group => TokenKind::Word(self.scan_word()),
                LineState::Transform => self.scan_transform_tail(c),
            },
        };

        Token::new(
            kind,
            Span::new(start, self.position, start_line, start_column),
        )
    }

    /// Tokenizes all source and returns a vector of tokens ending in `Eof`.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Skips spaces and tabs but never line endings.
    fn skip_blanks(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() && c != '\n' && c != '\r' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn scan_newline(&mut self) -> TokenKind {
        if self.peek_char() == Some('\r') {
            self.advance();
            if self.peek_char() == Some('\n') {
                self.advance();
            } else {
                // A lone '\r' ends the line on its own.
                self.line += 1;
                self.column = 1;
            }
        } else {
            self.advance();
        }
        self.state = LineState::Start;
        TokenKind::Newline
    }

    fn scan_comment(&mut self) -> TokenKind {
        self.advance(); // consume '#'
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            if c == '\n' || c == '\r' {
                break;
            }
            text.push(c);
            self.advance();
        }
        TokenKind::Comment(text.trim().to_string())
    }

    /// Scans the token that decides what kind of line this is.
    fn scan_line_start(&mut self, c: char) -> TokenKind {
        if let Some(id) = RuleId::new(c) {
            if self.colon_follows_head() {
                self.advance(); // consume the id
                self.skip_blanks();
                self.advance(); // consume ':'
                self.state = LineState::Group;
                return TokenKind::RuleHead(id);
            }
        }

        if c == '/' {
            self.state = LineState::Transform;
            return match self.scan_delimited('/') {
                Ok(body) => TokenKind::Regex(body),
                Err(()) => TokenKind::Error("unterminated transformation pattern".into()),
            };
        }

        self.skip_to_line_end();
        TokenKind::Error("expected a rule declaration, a transformation, or a comment".into())
    }

    /// Returns true if the uppercase letter at the cursor is followed by `:`.
    fn colon_follows_head(&self) -> bool {
        self.rest[1..]
            .chars()
            .find(|c| *c != ' ' && *c != '\t')
            .is_some_and(|c| c == ':')
    }

    fn scan_transform_tail(&mut self, c: char) -> TokenKind {
        match c {
            '>' => {
                self.advance();
                TokenKind::Arrow
            }
            '"' => match self.scan_delimited('"') {
                Ok(body) => TokenKind::Replacement(body),
                Err(()) => TokenKind::Error("unterminated replacement".into()),
            },
            _ => {
                let word = self.scan_word();
                TokenKind::Error(format!("unexpected {word:?} in transformation"))
            }
        }
    }

    /// Scans a run of non-whitespace characters.
    fn scan_word(&mut self) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                break;
            }
            text.push(c);
            self.advance();
        }
        text
    }

    /// Scans a body enclosed in `delim`, e.g. `/.../` or `"..."`.
    ///
    /// A backslash always pairs with the following character. `\<delim>`
    /// is stored as the bare delimiter; every other pair is kept verbatim so
    /// regex escapes and back-references survive. Errs at a line ending or
    /// end of input.
    fn scan_delimited(&mut self, delim: char) -> Result<String, ()> {
        self.advance(); // consume opening delimiter
        let mut text = String::new();
        loop {
            match self.peek_char() {
                None | Some('\n' | '\r') => return Err(()),
                Some('\\') => {
                    self.advance();
                    match self.peek_char() {
                        None | Some('\n' | '\r') => return Err(()),
                        Some(c) if c == delim => text.push(c),
                        Some(c) => {
                            text.push('\\');
                            text.push(c);
                        }
                    }
                    self.advance();
                }
                Some(c) if c == delim => {
                    self.advance();
                    return Ok(text);
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
    }

    fn skip_to_line_end(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.advance();
        }
    }
}
