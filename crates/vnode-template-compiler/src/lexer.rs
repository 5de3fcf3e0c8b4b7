//! Lexer for template strings.
//!
//! The tokenizer is a finite-state machine over an explicit byte cursor into
//! the immutable input. The "buffer" of the classic formulation is a start
//! offset into the source, so no intermediate strings are allocated while a
//! lexeme is being scanned.

use crate::error::{ParseError, ParseResult};
use smol_str::SmolStr;
use source_span::Span;

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// What was lexed.
    pub kind: TokenKind,
    /// The full lexeme, delimiters included (`<p>` spans three bytes).
    pub span: Span,
}

/// The kind of a lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// An opening tag, `<div>`.
    TagOpen {
        /// The tag name.
        name: SmolStr,
    },
    /// A run of text between tags.
    Text {
        /// The text content.
        content: String,
    },
    /// A closing tag, `</div>`.
    TagClose {
        /// The tag name.
        name: SmolStr,
    },
}

/// Lexer states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Initial,
    TagOpen,
    TagName,
    Text,
    TagEndMarker,
    TagEndName,
}

/// Tokenize a template string.
pub fn tokenize(source: &str) -> ParseResult<Vec<Token>> {
    Lexer::new(source).run()
}

/// The tokenizer state machine.
struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    state: LexState,
    /// Start of the token currently being lexed, delimiters included.
    token_start: usize,
    /// Start of the buffered tag name or text run.
    buf_start: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            pos: 0,
            state: LexState::Initial,
            token_start: 0,
            buf_start: 0,
        }
    }

    fn run(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            self.step(c, &mut tokens)?;
        }
        self.finish(&mut tokens)?;
        Ok(tokens)
    }

    /// Peek at the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// Consume the given character.
    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    /// The buffered lexeme accumulated since `buf_start`.
    fn buffered(&self) -> &'a str {
        &self.source[self.buf_start..self.pos]
    }

    /// Span of the token currently being lexed.
    fn token_span(&self) -> Span {
        Span::new(self.token_start as u32, self.pos as u32)
    }

    /// Advance the machine by one character.
    fn step(&mut self, c: char, tokens: &mut Vec<Token>) -> ParseResult<()> {
        match self.state {
            LexState::Initial => match c {
                '<' => {
                    self.token_start = self.pos;
                    self.state = LexState::TagOpen;
                    self.bump(c);
                }
                c if c.is_ascii_alphabetic() => {
                    self.token_start = self.pos;
                    self.buf_start = self.pos;
                    self.state = LexState::Text;
                    self.bump(c);
                }
                _ => return Err(self.invalid_char(c)),
            },
            LexState::TagOpen => match c {
                c if c.is_ascii_alphabetic() => {
                    self.buf_start = self.pos;
                    self.state = LexState::TagName;
                    self.bump(c);
                }
                '/' => {
                    self.state = LexState::TagEndMarker;
                    self.bump(c);
                }
                _ => return Err(self.invalid_char(c)),
            },
            LexState::TagName => match c {
                c if c.is_ascii_alphabetic() => self.bump(c),
                '>' => {
                    let name = SmolStr::new(self.buffered());
                    self.bump(c);
                    tokens.push(Token {
                        kind: TokenKind::TagOpen { name },
                        span: self.token_span(),
                    });
                    self.state = LexState::Initial;
                }
                _ => return Err(self.invalid_char(c)),
            },
            LexState::Text => match c {
                c if c.is_ascii_alphabetic() => self.bump(c),
                '<' => {
                    // Flush the text run before entering the next tag.
                    tokens.push(Token {
                        kind: TokenKind::Text {
                            content: self.buffered().to_string(),
                        },
                        span: self.token_span(),
                    });
                    self.token_start = self.pos;
                    self.state = LexState::TagOpen;
                    self.bump(c);
                }
                _ => return Err(self.invalid_char(c)),
            },
            LexState::TagEndMarker => match c {
                c if c.is_ascii_alphabetic() => {
                    self.buf_start = self.pos;
                    self.state = LexState::TagEndName;
                    self.bump(c);
                }
                _ => return Err(self.invalid_char(c)),
            },
            LexState::TagEndName => match c {
                c if c.is_ascii_alphabetic() => self.bump(c),
                '>' => {
                    let name = SmolStr::new(self.buffered());
                    self.bump(c);
                    tokens.push(Token {
                        kind: TokenKind::TagClose { name },
                        span: self.token_span(),
                    });
                    self.state = LexState::Initial;
                }
                _ => return Err(self.invalid_char(c)),
            },
        }
        Ok(())
    }

    /// Handle end of input.
    fn finish(&mut self, tokens: &mut Vec<Token>) -> ParseResult<()> {
        match self.state {
            LexState::Initial => Ok(()),
            LexState::Text => {
                // Input ended mid-text: flush the buffered run.
                tokens.push(Token {
                    kind: TokenKind::Text {
                        content: self.buffered().to_string(),
                    },
                    span: self.token_span(),
                });
                Ok(())
            }
            LexState::TagOpen
            | LexState::TagName
            | LexState::TagEndMarker
            | LexState::TagEndName => Err(ParseError::malformed_tag(self.token_span())),
        }
    }

    fn invalid_char(&self, c: char) -> ParseError {
        let span = Span::new(self.pos as u32, (self.pos + c.len_utf8()) as u32);
        ParseError::invalid_character(c, span)
    }
}
