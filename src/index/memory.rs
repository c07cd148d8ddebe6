//! In-memory index implementation
//!
//! Both relations live in process memory, which makes exact cleanup cheap:
//! re-indexing a page removes the URL from the sets of terms that no longer
//! appear on it, so no stale term associations linger.

use crate::counter::TermCounter;
use crate::index::Index;
use crate::store::StoreResult;
use std::collections::{HashMap, HashSet};

/// Pure in-memory index, useful for tests and single-process runs
#[derive(Debug, Default)]
pub struct MemoryIndex {
    term_urls: HashMap<String, HashSet<String>>,
    page_counts: HashMap<String, HashMap<String, u64>>,
}

impl MemoryIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages currently indexed
    pub fn page_count(&self) -> usize {
        self.page_counts.len()
    }

    fn clear_page(&mut self, url: &str) {
        let Some(old_counts) = self.page_counts.remove(url) else {
            return;
        };
        for term in old_counts.keys() {
            if let Some(urls) = self.term_urls.get_mut(term) {
                urls.remove(url);
                if urls.is_empty() {
                    self.term_urls.remove(term);
                }
            }
        }
    }
}

impl Index for MemoryIndex {
    fn is_indexed(&self, url: &str) -> StoreResult<bool> {
        Ok(self.page_counts.contains_key(url))
    }

    fn index_page(&mut self, url: &str, blocks: &[String]) -> StoreResult<()> {
        let mut tc = TermCounter::new(url);
        tc.process_blocks(blocks);

        self.clear_page(url);

        let mut counts = HashMap::new();
        for (term, count) in tc.iter() {
            counts.insert(term.to_string(), count);
            self.term_urls
                .entry(term.to_string())
                .or_default()
                .insert(url.to_string());
        }
        self.page_counts.insert(url.to_string(), counts);
        Ok(())
    }

    fn urls_for_term(&self, term: &str) -> StoreResult<HashSet<String>> {
        Ok(self.term_urls.get(term).cloned().unwrap_or_default())
    }

    fn counts_for_term(&self, term: &str) -> StoreResult<HashMap<String, u64>> {
        let mut counts = HashMap::new();
        for url in self.urls_for_term(term)? {
            let count = self
                .page_counts
                .get(&url)
                .and_then(|page| page.get(term))
                .copied()
                .unwrap_or(0);
            counts.insert(url, count);
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_unseen_url_is_not_indexed() {
        let index = MemoryIndex::new();
        assert!(!index.is_indexed("https://example.com/a").unwrap());
    }

    #[test]
    fn test_index_page_records_both_relations() {
        let mut index = MemoryIndex::new();
        index
            .index_page("https://example.com/a", &blocks(&["rust rust crab"]))
            .unwrap();

        assert!(index.is_indexed("https://example.com/a").unwrap());
        assert!(index
            .urls_for_term("rust")
            .unwrap()
            .contains("https://example.com/a"));

        let counts = index.counts_for_term("rust").unwrap();
        assert_eq!(counts.get("https://example.com/a"), Some(&2));
    }

    #[test]
    fn test_unknown_term_is_empty() {
        let mut index = MemoryIndex::new();
        index
            .index_page("https://example.com/a", &blocks(&["rust"]))
            .unwrap();

        assert!(index.urls_for_term("python").unwrap().is_empty());
        assert!(index.counts_for_term("python").unwrap().is_empty());
    }

    #[test]
    fn test_reindex_overwrites_without_merging() {
        let mut index = MemoryIndex::new();
        let url = "https://example.com/a";
        index.index_page(url, &blocks(&["old old shared"])).unwrap();
        index.index_page(url, &blocks(&["new shared"])).unwrap();

        assert!(index.is_indexed(url).unwrap());
        // term only in the second version
        assert_eq!(index.counts_for_term("new").unwrap().get(url), Some(&1));
        // overlapping term is not merged
        assert_eq!(index.counts_for_term("shared").unwrap().get(url), Some(&1));
        // stale association is gone entirely in the memory variant
        assert!(index.urls_for_term("old").unwrap().is_empty());
    }

    #[test]
    fn test_counts_span_multiple_pages() {
        let mut index = MemoryIndex::new();
        index
            .index_page("https://example.com/a", &blocks(&["shared shared"]))
            .unwrap();
        index
            .index_page("https://example.com/b", &blocks(&["shared"]))
            .unwrap();

        let counts = index.counts_for_term("shared").unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get("https://example.com/a"), Some(&2));
        assert_eq!(counts.get("https://example.com/b"), Some(&1));
    }
}
