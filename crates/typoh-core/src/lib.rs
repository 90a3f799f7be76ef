//! Typographic marker replacement for markup documents.
//!
//! This crate rewrites ASCII typing shortcuts (`---`, ``` `` ```, `...`,
//! `1/2`) into their typographic equivalents while leaving markup tags
//! byte-for-byte untouched.
//!
//! # Architecture
//!
//! - [`MarkupTokenizer`]: splits input into prose ([`TokenKind::Content`])
//!   and tag ([`TokenKind::Metadata`]) tokens, recognizing tags purely by
//!   `<` and `>`
//! - [`Replacer`]: streaming multi-pattern matcher over an ordered
//!   [`PatternTable`]; the first-registered marker wins ties
//! - [`Typographer`]: feeds each prose token through the pass replacers in
//!   order and writes tags through unchanged
//!
//! The tokenizer and the passes sit behind the [`Tokenize`] and
//! [`Transform`] traits, so either side can be replaced independently.
//!
//! Pattern tables are configuration; this crate does not ship any. See the
//! `typoh-config` crate for the built-in tables.
//!
//! # Example
//!
//! ```
//! use typoh_core::{PatternTable, Typographer};
//!
//! let first: PatternTable = [("...", "…")].into_iter().collect();
//! let mut typographer = Typographer::new(first, PatternTable::new());
//! assert_eq!(typographer.apply("<em>wait...</em>"), "<em>wait…</em>");
//! ```

mod chars;
mod error;
mod pipeline;
mod replacer;
mod table;
mod token;
mod tokenizer;

pub use error::TypographyError;
pub use pipeline::{RunSummary, Typographer};
pub use replacer::{Replacer, Transform};
pub use table::{Pattern, PatternTable};
pub use token::{Token, TokenKind};
pub use tokenizer::{MarkupTokenizer, Tokenize, tokenize};
