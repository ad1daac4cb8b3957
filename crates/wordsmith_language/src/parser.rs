//! Parser for the grammar DSL.
//!
//! The parser converts a stream of tokens into a sequence of declarations,
//! one per line plus any trailing comments.

use wordsmith_foundation::{Error, Result, RuleId};

use crate::ast::{Declaration, GroupDecl, TransformationDecl};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Parser for grammar source.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Source text (for error messages).
    source: &'src str,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            source,
        }
    }

    /// Parses every line of the source.
    ///
    /// # Errors
    /// Returns a syntax error for the first line that matches no declaration shape.
    pub fn parse_all(&mut self) -> Result<Vec<Declaration>> {
        let mut declarations = Vec::new();
        while self.current.kind != TokenKind::Eof {
            self.parse_line(&mut declarations)?;
        }
        Ok(declarations)
    }

    /// Parses one line, pushing its declaration and any trailing comment.
    fn parse_line(&mut self, out: &mut Vec<Declaration>) -> Result<()> {
        let span = self.current.span;
        match &self.current.kind {
            TokenKind::Newline => {
                self.advance();
                out.push(Declaration::Blank(span));
                return Ok(());
            }
            TokenKind::Comment(text) => {
                let text = text.clone();
                self.advance();
                out.push(Declaration::Comment(text, span));
            }
            TokenKind::RuleHead(id) => {
                let id = *id;
                self.advance();
                let group = self.parse_group(id, span)?;
                out.push(Declaration::Group(group));
            }
            TokenKind::Regex(pattern) => {
                let pattern = pattern.clone();
                self.advance();
                let transformation = self.parse_transformation(pattern, span)?;
                out.push(Declaration::Transformation(transformation));
            }
            TokenKind::Error(msg) => return Err(self.error(msg)),
            other => return Err(self.error(&format!("unexpected {}", other.name()))),
        }

        if let TokenKind::Comment(text) = &self.current.kind {
            let text = text.clone();
            out.push(Declaration::Comment(text, self.current.span));
            self.advance();
        }

        self.end_line()
    }

    /// Parses the tokens of `X: tok tok ...` after the head.
    fn parse_group(&mut self, id: RuleId, head: Span) -> Result<GroupDecl> {
        let mut tokens = Vec::new();
        let mut span = head;
        while let TokenKind::Word(word) = &self.current.kind {
            tokens.push(word.clone());
            span = head.to(self.current.span);
            self.advance();
        }

        if tokens.is_empty() {
            return Err(self.error_at(head, &format!("rule {id} has no alternatives")));
        }

        Ok(GroupDecl { id, tokens, span })
    }

    /// Parses `> "replacement"` after a transformation pattern.
    fn parse_transformation(&mut self, pattern: String, start: Span) -> Result<TransformationDecl> {
        self.expect_arrow()?;

        let TokenKind::Replacement(replacement) = &self.current.kind else {
            return Err(self.unexpected("a quoted replacement"));
        };
        let replacement = replacement.clone();
        let span = start.to(self.current.span);
        self.advance();

        Ok(TransformationDecl {
            pattern,
            replacement,
            span,
        })
    }

    fn expect_arrow(&mut self) -> Result<()> {
        if self.current.kind == TokenKind::Arrow {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected("'>'"))
        }
    }

    /// Requires the current line to be finished.
    fn end_line(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected("end of line")),
        }
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    /// Creates an "expected X, found Y" error at the current token.
    fn unexpected(&self, expected: &str) -> Error {
        match &self.current.kind {
            TokenKind::Error(msg) => self.error(msg),
            found => self.error(&format!("expected {expected}, found {}", found.name())),
        }
    }

    /// Creates a syntax error at the current position.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current.span, message)
    }

    /// Creates a syntax error at a specific span.
    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::syntax(
            message,
            span.line,
            span.column,
            span.line_text(self.source).to_string(),
        )
    }
}

/// Parses grammar source into declarations.
///
/// # Errors
/// Returns a syntax error if any line is not a recognized declaration.
pub fn parse(source: &str) -> Result<Vec<Declaration>> {
    Parser::new(source).parse_all()
}
