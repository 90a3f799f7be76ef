//! Token types produced by the markup tokenizer.

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Prose text, eligible for marker replacement.
    Content,
    /// A lexical `<...>` tag, passed through unchanged.
    Metadata,
}

/// A span of the input document.
///
/// Concatenating the `text` of every token in `index` order reproduces the
/// input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Sequence number, starting at 0.
    pub index: usize,
    /// Whether this span is prose or a tag.
    pub kind: TokenKind,
    /// The span text, never empty.
    pub text: String,
}

impl Token {
    /// Create a new token.
    #[must_use]
    pub fn new(index: usize, kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            index,
            kind,
            text: text.into(),
        }
    }

    /// Check if this token is prose.
    #[must_use]
    pub fn is_content(&self) -> bool {
        self.kind == TokenKind::Content
    }
}
