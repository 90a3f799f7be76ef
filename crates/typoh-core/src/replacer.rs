//! Streaming multi-pattern replacement.
//!
//! [`Replacer`] scans text one character at a time and tracks, for every
//! pattern in its [`PatternTable`], how many leading marker characters match
//! the tail of the input seen so far. Characters that might still belong to
//! a match are held back; once every candidate that covered them has failed
//! they are written out verbatim.
//!
//! ```text
//! patterns: "abc" -> x, "bde" -> y
//! input:    a    b    d    e
//! progress: 1,0  2,1  0,2  match "bde"
//! holdback: a    ab   ab   -> emit "a" + "y"
//! ```
//!
//! Cost is O(patterns × input); the default tables hold a few dozen entries.

use crate::table::PatternTable;

/// A text-to-text transformation applied to prose spans.
///
/// Implemented by [`Replacer`]. Other transforms can be composed into a
/// [`Typographer`](crate::Typographer) through
/// [`Typographer::with_passes`](crate::Typographer::with_passes).
pub trait Transform {
    /// Transform one prose span.
    fn transform(&mut self, text: &str) -> String;
}

/// Streaming replacer over an ordered [`PatternTable`].
///
/// When several markers complete on the same character the one registered
/// first wins, even if a longer one would also match:
///
/// ```
/// use typoh_core::Replacer;
///
/// let mut replacer = Replacer::new();
/// replacer.add("ab", "X");
/// replacer.add("abc", "Y");
/// assert_eq!(replacer.replace("abc"), "Xc");
/// ```
///
/// Each call to [`replace`](Self::replace) is self-contained: the holdback is
/// flushed and all match progress is reset before it returns, so a marker
/// never spans two calls.
#[derive(Debug, Default)]
pub struct Replacer {
    table: PatternTable,
    /// Matched marker prefix length, one per pattern.
    progress: Vec<usize>,
    /// Characters consumed since the last committed output.
    holdback: Vec<char>,
}

impl Replacer {
    /// Create a replacer with no patterns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a replacer over an existing table.
    #[must_use]
    pub fn with_table(table: PatternTable) -> Self {
        let progress = vec![0; table.len()];
        Self {
            table,
            progress,
            holdback: Vec::new(),
        }
    }

    /// Register a marker after all existing ones.
    ///
    /// Empty markers are skipped.
    pub fn add(&mut self, marker: &str, replacement: impl Into<String>) {
        if self.table.add(marker, replacement) {
            self.progress.push(0);
        }
    }

    /// The table this replacer matches against.
    pub fn table(&self) -> &PatternTable {
        &self.table
    }

    /// Replace every marker in `text`.
    pub fn replace(&mut self, text: &str) -> String {
        let mut output = String::with_capacity(text.len());

        for c in text.chars() {
            self.advance(c, &mut output);
        }

        output.extend(self.holdback.drain(..));
        self.reset_progress();

        output
    }

    /// Consume one character.
    fn advance(&mut self, c: char, output: &mut String) {
        let longest_before = self.longest_potential_match();

        if let Some(matched) = self.advance_patterns(c) {
            let pattern = &self.table.patterns()[matched];
            // The holdback ends with the first len-1 marker characters.
            let unmatched = self.holdback.len() + 1 - pattern.len();

            output.extend(&self.holdback[..unmatched]);
            output.push_str(pattern.replacement());
            tracing::trace!(
                marker = %pattern.marker_str(),
                replacement = pattern.replacement(),
                "Replaced marker"
            );

            self.holdback.clear();
            self.reset_progress();
            return;
        }

        self.holdback.push(c);

        let longest_after = self.longest_potential_match();
        if longest_after < longest_before + 1 {
            // Candidates covering the front of the holdback just failed.
            let n = longest_before + 1 - longest_after;
            tracing::trace!(flushed = n, "Speculative match failed");
            output.extend(self.holdback.drain(..n));
        }
    }

    /// Step every pattern over `c`, returning the first completed match.
    fn advance_patterns(&mut self, c: char) -> Option<usize> {
        let mut matched = None;

        for (i, (pattern, progress)) in self
            .table
            .patterns()
            .iter()
            .zip(self.progress.iter_mut())
            .enumerate()
        {
            if pattern.marker()[*progress] == c {
                *progress += 1;
            } else {
                *progress = 0;
            }

            if *progress == pattern.len() {
                if matched.is_none() {
                    matched = Some(i);
                }
                *progress = 0;
            }
        }

        matched
    }

    /// One plus the longest partial match currently in progress.
    fn longest_potential_match(&self) -> usize {
        self.progress.iter().max().copied().unwrap_or(0) + 1
    }

    fn reset_progress(&mut self) {
        self.progress.fill(0);
    }
}

impl Transform for Replacer {
    fn transform(&mut self, text: &str) -> String {
        self.replace(text)
    }
}

impl From<PatternTable> for Replacer {
    fn from(table: PatternTable) -> Self {
        Self::with_table(table)
    }
}
