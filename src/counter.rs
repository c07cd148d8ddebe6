//! Per-page term counting
//!
//! A [`TermCounter`] aggregates term occurrences within the text blocks of a
//! single page. Counters are built fresh for each page visit and discarded
//! once their counts have been pushed to an index.

use std::collections::{HashMap, HashSet};

/// Counts term occurrences within one page's content
///
/// The label identifies the page (its URL) and is immutable after
/// construction. Terms are lower-cased tokens split on non-alphanumeric
/// boundaries.
#[derive(Debug, Clone)]
pub struct TermCounter {
    label: String,
    counts: HashMap<String, u64>,
}

impl TermCounter {
    /// Creates an empty counter labeled with the page URL
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            counts: HashMap::new(),
        }
    }

    /// Returns the page label (URL) this counter was built for
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Tokenizes the given text blocks and increments term counts
    ///
    /// Tokenization rule: split on non-alphanumeric boundaries, lowercase,
    /// discard empty tokens. Intended to be called once per page; callers
    /// construct a fresh counter for each page.
    pub fn process_blocks<S: AsRef<str>>(&mut self, blocks: &[S]) {
        for block in blocks {
            self.process_text(block.as_ref());
        }
    }

    fn process_text(&mut self, text: &str) {
        for token in text.split(|c: char| !c.is_alphanumeric()) {
            if token.is_empty() {
                continue;
            }
            *self.counts.entry(token.to_lowercase()).or_insert(0) += 1;
        }
    }

    /// Returns the count for a term, or zero if it never appeared
    pub fn get(&self, term: &str) -> u64 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Returns the set of distinct terms seen (no ordering guarantee)
    pub fn terms(&self) -> HashSet<&str> {
        self.counts.keys().map(String::as_str).collect()
    }

    /// Iterates over (term, count) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(term, count)| (term.as_str(), *count))
    }

    /// Number of distinct terms seen
    pub fn term_count(&self) -> usize {
        self.counts.len()
    }

    /// True if no terms were counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
