//! Document pipeline: tokenize, transform prose, write.

use std::io::{Read, Write};

use crate::error::TypographyError;
use crate::replacer::{Replacer, Transform};
use crate::table::PatternTable;
use crate::token::Token;
use crate::tokenizer::{MarkupTokenizer, Tokenize, tokenize};

/// Counters collected during a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Prose tokens transformed.
    pub content_tokens: usize,
    /// Tag tokens passed through.
    pub metadata_tokens: usize,
    /// Bytes of input consumed.
    pub bytes_in: usize,
    /// Bytes of output written.
    pub bytes_out: usize,
}

/// Applies ordered replacement passes to the prose of a markup document.
///
/// Tags are copied through unchanged. Each prose token runs through every
/// pass in order; the passes persist for the whole document.
///
/// # Example
///
/// ```
/// use typoh_core::{PatternTable, Typographer};
///
/// let first: PatternTable = [("---", "—"), ("``", "“"), ("''", "”")].into_iter().collect();
/// let second: PatternTable = [("--", "–")].into_iter().collect();
/// let mut typographer = Typographer::new(first, second);
///
/// let mut out = Vec::new();
/// typographer
///     .run("<p>``hi''---ok</p>".as_bytes(), &mut out)
///     .unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "<p>“hi”—ok</p>");
/// ```
pub struct Typographer {
    passes: Vec<Box<dyn Transform>>,
}

impl Typographer {
    /// Create a two-pass typographer from its pattern tables.
    #[must_use]
    pub fn new(first_pass: PatternTable, second_pass: PatternTable) -> Self {
        Self::with_passes(vec![
            Box::new(Replacer::from(first_pass)),
            Box::new(Replacer::from(second_pass)),
        ])
    }

    /// Create a typographer from arbitrary transforms, applied in order.
    #[must_use]
    pub fn with_passes(passes: Vec<Box<dyn Transform>>) -> Self {
        Self { passes }
    }

    /// Transform a document read from `input`, writing it to `output`.
    ///
    /// Output is written token by token and flushed at the end.
    ///
    /// # Errors
    ///
    /// Returns [`TypographyError::Read`] on the first read failure and
    /// [`TypographyError::Write`] on the first write failure.
    pub fn run<R: Read, W: Write>(
        &mut self,
        input: R,
        output: W,
    ) -> Result<RunSummary, TypographyError> {
        self.run_tokens(MarkupTokenizer::new(input), output)
    }

    /// Transform tokens from any [`Tokenize`] source.
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_tokens<T: Tokenize, W: Write>(
        &mut self,
        mut tokens: T,
        mut output: W,
    ) -> Result<RunSummary, TypographyError> {
        let mut summary = RunSummary::default();

        while let Some(token) = tokens.next_token().map_err(TypographyError::Read)? {
            summary.bytes_in += token.text.len();
            if token.is_content() {
                summary.content_tokens += 1;
            } else {
                summary.metadata_tokens += 1;
            }

            let text = self.render(token);
            output
                .write_all(text.as_bytes())
                .map_err(TypographyError::Write)?;
            summary.bytes_out += text.len();
        }

        output.flush().map_err(TypographyError::Write)?;

        tracing::debug!(
            content_tokens = summary.content_tokens,
            metadata_tokens = summary.metadata_tokens,
            bytes_in = summary.bytes_in,
            bytes_out = summary.bytes_out,
            "Document transformed"
        );

        Ok(summary)
    }

    /// Transform an in-memory document.
    pub fn apply(&mut self, input: &str) -> String {
        tokenize(input)
            .into_iter()
            .map(|token| self.render(token))
            .collect()
    }

    /// Output text for a single token.
    fn render(&mut self, token: Token) -> String {
        if !token.is_content() {
            return token.text;
        }
        self.passes
            .iter_mut()
            .fold(token.text, |text, pass| pass.transform(&text))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use crate::token::TokenKind;

    fn table(pairs: &[(&str, &str)]) -> PatternTable {
        pairs.iter().copied().collect()
    }

    fn quotes_and_dashes() -> Typographer {
        Typographer::new(
            table(&[("---", "—"), ("``", "“"), ("''", "”")]),
            table(&[("--", "–")]),
        )
    }

    fn run_to_string(typographer: &mut Typographer, input: &str) -> String {
        let mut out = Vec::new();
        typographer.run(input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_tags_are_not_replaced() {
        let mut typographer = Typographer::new(table(&[("text", "BODY")]), PatternTable::new());
        assert_eq!(run_to_string(&mut typographer, "<h>text</h>"), "<h>BODY</h>");
    }

    #[test]
    fn test_marker_inside_tag_untouched() {
        let mut typographer = quotes_and_dashes();
        assert_eq!(
            run_to_string(&mut typographer, "<a title=\"x---y\">a---b</a>"),
            "<a title=\"x---y\">a—b</a>"
        );
    }

    #[test]
    fn test_end_to_end_quotes_and_dashes() {
        let mut typographer = quotes_and_dashes();
        assert_eq!(
            run_to_string(&mut typographer, "<p>He said ``hi''---loudly.</p>"),
            "<p>He said “hi”—loudly.</p>"
        );
    }

    #[test]
    fn test_second_pass_sees_first_pass_output() {
        let mut typographer =
            Typographer::new(table(&[("(", "--")]), table(&[("--", "–")]));
        assert_eq!(typographer.apply("a(b"), "a–b");
    }

    #[test]
    fn test_unterminated_tag_passes_through() {
        let mut typographer = quotes_and_dashes();
        assert_eq!(
            run_to_string(&mut typographer, "a--b <img alt=``x''"),
            "a–b <img alt=``x''"
        );
    }

    #[test]
    fn test_marker_split_by_tag_is_not_joined() {
        let mut typographer = quotes_and_dashes();
        assert_eq!(typographer.apply("`<b>`x"), "`<b>`x");
    }

    #[test]
    fn test_apply_matches_run() {
        let input = "<ul><li>one -- two</li><li>``three''</li></ul>";
        let mut a = quotes_and_dashes();
        let mut b = quotes_and_dashes();
        assert_eq!(a.apply(input), run_to_string(&mut b, input));
    }

    #[test]
    fn test_summary_counts() {
        let mut typographer = quotes_and_dashes();
        let mut out = Vec::new();
        let summary = typographer.run("<p>a---b</p>".as_bytes(), &mut out).unwrap();

        assert_eq!(
            summary,
            RunSummary {
                content_tokens: 1,
                metadata_tokens: 2,
                bytes_in: 12,
                bytes_out: out.len(),
            }
        );
    }

    #[test]
    fn test_empty_document() {
        let mut typographer = quotes_and_dashes();
        assert_eq!(run_to_string(&mut typographer, ""), "");
    }

    struct UpperCase;

    impl Transform for UpperCase {
        fn transform(&mut self, text: &str) -> String {
            text.to_uppercase()
        }
    }

    #[test]
    fn test_custom_passes() {
        let mut typographer = Typographer::with_passes(vec![
            Box::new(UpperCase),
            Box::new(Replacer::with_table(table(&[("AB", "x")]))),
        ]);
        assert_eq!(typographer.apply("<ab>ab</ab>"), "<ab>x</ab>");
    }

    struct Scripted(Vec<io::Result<Option<Token>>>);

    impl Tokenize for Scripted {
        fn next_token(&mut self) -> io::Result<Option<Token>> {
            if self.0.is_empty() {
                return Ok(None);
            }
            self.0.remove(0)
        }
    }

    #[test]
    fn test_read_error_aborts_after_partial_output() {
        let tokens = Scripted(vec![
            Ok(Some(Token::new(0, TokenKind::Metadata, "<p>"))),
            Ok(Some(Token::new(1, TokenKind::Content, "a---b"))),
            Err(io::Error::other("connection reset")),
            Ok(Some(Token::new(2, TokenKind::Metadata, "</p>"))),
        ]);

        let mut out = Vec::new();
        let err = quotes_and_dashes().run_tokens(tokens, &mut out).unwrap_err();

        assert!(matches!(err, TypographyError::Read(_)));
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(String::from_utf8(out).unwrap(), "<p>a—b");
    }

    #[test]
    fn test_invalid_utf8_is_replaced_and_run_continues() {
        let mut out = Vec::new();
        quotes_and_dashes()
            .run(&b"<p>caf\xe9 a---b</p>"[..], &mut out)
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "<p>caf\u{FFFD} a—b</p>");
    }

    #[test]
    fn test_truncated_utf8_at_end_is_replaced() {
        let mut out = Vec::new();
        quotes_and_dashes().run(&b"<p>ok\xc3"[..], &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "<p>ok\u{FFFD}");
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error() {
        let err = quotes_and_dashes()
            .run("text".as_bytes(), BrokenSink)
            .unwrap_err();
        assert!(matches!(err, TypographyError::Write(_)));
    }

    proptest! {
        #[test]
        fn prop_tags_survive_unchanged(tag in "<[a-z`'\\- ]{0,12}>", body in "[a-z ]{0,12}") {
            let input = format!("{tag}{body}{tag}");
            let output = quotes_and_dashes().apply(&input);
            prop_assert!(output.starts_with(&tag));
            prop_assert!(output.ends_with(&tag));
        }
    }
}
