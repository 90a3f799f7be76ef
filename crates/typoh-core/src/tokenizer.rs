//! Lexical markup tokenizer.
//!
//! Splits a document into [`TokenKind::Content`] and [`TokenKind::Metadata`]
//! spans. Tags are recognized purely by `<` and `>`: there is no attribute,
//! comment, or nesting awareness. An unterminated tag runs to end of input.

use std::io::{self, BufRead, BufReader, Read};

use crate::chars::CharReader;
use crate::token::{Token, TokenKind};

/// A source of tokens.
///
/// Implemented by [`MarkupTokenizer`]. Alternative tokenizers can be plugged
/// into [`Typographer::run_tokens`](crate::Typographer::run_tokens).
pub trait Tokenize {
    /// Return the next token, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns the underlying read error. Text read before the failure is
    /// returned as a token first; the error follows on the next call.
    fn next_token(&mut self) -> io::Result<Option<Token>>;
}

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Outside any tag.
    InContent,
    /// After a `<`, waiting for `>`.
    InTag,
}

/// Character-at-a-time state machine shared by the streaming and in-memory
/// tokenizers.
#[derive(Debug)]
struct Scanner {
    state: State,
    index: usize,
    pending: String,
}

impl Scanner {
    fn new() -> Self {
        Self {
            state: State::InContent,
            index: 0,
            pending: String::new(),
        }
    }

    /// Feed one character, returning a token if one was completed.
    fn push(&mut self, c: char) -> Option<Token> {
        match self.state {
            State::InContent if c == '<' => {
                let token = self.take_token();
                self.state = State::InTag;
                self.pending.push(c);
                token
            }
            State::InContent => {
                self.pending.push(c);
                None
            }
            State::InTag => {
                self.pending.push(c);
                if c == '>' {
                    let token = self.take_token();
                    self.state = State::InContent;
                    token
                } else {
                    None
                }
            }
        }
    }

    /// Emit whatever is pending at end of input.
    fn finish(&mut self) -> Option<Token> {
        self.take_token()
    }

    /// Move the pending text into a token of the current state's kind.
    ///
    /// Returns `None` without advancing the index when nothing is pending.
    fn take_token(&mut self) -> Option<Token> {
        if self.pending.is_empty() {
            return None;
        }
        let kind = match self.state {
            State::InContent => TokenKind::Content,
            State::InTag => TokenKind::Metadata,
        };
        let token = Token::new(self.index, kind, std::mem::take(&mut self.pending));
        self.index += 1;
        Some(token)
    }
}

/// Streaming tokenizer over any reader.
///
/// # Example
///
/// ```
/// use typoh_core::{MarkupTokenizer, TokenKind, Tokenize};
///
/// let mut tokenizer = MarkupTokenizer::new("<p>hi</p>".as_bytes());
/// let first = tokenizer.next_token().unwrap().unwrap();
/// assert_eq!(first.kind, TokenKind::Metadata);
/// assert_eq!(first.text, "<p>");
/// ```
#[derive(Debug)]
pub struct MarkupTokenizer<R> {
    chars: CharReader<R>,
    scanner: Scanner,
    deferred_error: Option<io::Error>,
}

impl<R: Read> MarkupTokenizer<BufReader<R>> {
    /// Create a tokenizer over an unbuffered reader.
    pub fn new(reader: R) -> Self {
        Self::from_buf_read(BufReader::new(reader))
    }
}

impl<R: BufRead> MarkupTokenizer<R> {
    /// Create a tokenizer over a reader that is already buffered.
    pub fn from_buf_read(reader: R) -> Self {
        Self {
            chars: CharReader::new(reader),
            scanner: Scanner::new(),
            deferred_error: None,
        }
    }
}

impl<R: BufRead> Tokenize for MarkupTokenizer<R> {
    fn next_token(&mut self) -> io::Result<Option<Token>> {
        if let Some(err) = self.deferred_error.take() {
            return Err(err);
        }

        loop {
            match self.chars.next_char() {
                Ok(Some(c)) => {
                    if let Some(token) = self.scanner.push(c) {
                        return Ok(Some(token));
                    }
                }
                Ok(None) => return Ok(self.scanner.finish()),
                Err(err) => {
                    tracing::warn!(error = %err, "Read failed while tokenizing input");
                    return match self.scanner.finish() {
                        Some(token) => {
                            self.deferred_error = Some(err);
                            Ok(Some(token))
                        }
                        None => Err(err),
                    };
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for MarkupTokenizer<R> {
    type Item = io::Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

/// Tokenize an in-memory document.
///
/// # Example
///
/// ```
/// use typoh_core::{tokenize, TokenKind};
///
/// let tokens = tokenize("<i>text</i>.");
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [TokenKind::Metadata, TokenKind::Content, TokenKind::Metadata, TokenKind::Content]
/// );
/// ```
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut scanner = Scanner::new();
    let mut tokens: Vec<Token> = input.chars().filter_map(|c| scanner.push(c)).collect();
    tokens.extend(scanner.finish());
    tokens
}
