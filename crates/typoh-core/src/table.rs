//! Ordered marker → replacement tables.

/// A single marker and the text that replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    marker: Vec<char>,
    replacement: String,
}

impl Pattern {
    /// Marker characters, never empty.
    pub fn marker(&self) -> &[char] {
        &self.marker
    }

    /// Marker as a string.
    pub fn marker_str(&self) -> String {
        self.marker.iter().collect()
    }

    /// Replacement text.
    pub fn replacement(&self) -> &str {
        &self.replacement
    }

    /// Marker length in characters.
    pub fn len(&self) -> usize {
        self.marker.len()
    }

    /// Always `false`; empty markers are never stored.
    pub fn is_empty(&self) -> bool {
        self.marker.is_empty()
    }
}

/// Ordered collection of [`Pattern`]s.
///
/// Registration order decides ties: when several markers complete on the
/// same character, the one added first wins, even if a longer marker would
/// also have matched.
///
/// # Example
///
/// ```
/// use typoh_core::PatternTable;
///
/// let mut table = PatternTable::new();
/// table.add("---", "—");
/// table.add("", "ignored");
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternTable {
    patterns: Vec<Pattern>,
}

impl PatternTable {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a marker and its replacement.
    ///
    /// Empty markers can never match and are skipped. Returns whether the
    /// pattern was added.
    pub fn add(&mut self, marker: &str, replacement: impl Into<String>) -> bool {
        if marker.is_empty() {
            tracing::warn!("Ignoring pattern with empty marker");
            return false;
        }
        self.patterns.push(Pattern {
            marker: marker.chars().collect(),
            replacement: replacement.into(),
        });
        true
    }

    /// Patterns in registration order.
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Iterate over patterns in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    /// Check if there are any patterns registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Get the number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }
}

impl<'a> IntoIterator for &'a PatternTable {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<M: AsRef<str>, R: Into<String>> FromIterator<(M, R)> for PatternTable {
    fn from_iter<I: IntoIterator<Item = (M, R)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (marker, replacement) in iter {
            table.add(marker.as_ref(), replacement);
        }
        table
    }
}
