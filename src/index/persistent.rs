//! Store-backed index implementation
//!
//! Translates index operations into key-value store commands. Term sets live
//! under `urlset:<term>`, per-page records under `termcounter:<url>`; the two
//! prefixes guarantee the namespaces never collide even when a URL string
//! equals a term string.
//!
//! Known limitation: re-indexing a page clears its per-page record but does
//! not remove the URL from the sets of terms no longer present on the page.
//! Removing them would require scanning every term set, so readers must
//! tolerate set members whose current content no longer contains the term
//! (reported as count 0 by [`Index::counts_for_term`]).

use crate::counter::TermCounter;
use crate::index::Index;
use crate::store::{Store, StoreCommand, StoreResult};
use std::collections::{HashMap, HashSet};

/// Key prefix for term → URL sets
pub const URL_SET_PREFIX: &str = "urlset:";

/// Key prefix for per-URL term-count records
pub const TERM_COUNTER_PREFIX: &str = "termcounter:";

/// Index backed by a key-value [`Store`]
pub struct PersistentIndex<S: Store> {
    store: S,
}

impl<S: Store> PersistentIndex<S> {
    /// Wraps a store handle
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Consumes the index, returning the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    fn url_set_key(term: &str) -> String {
        format!("{URL_SET_PREFIX}{term}")
    }

    fn term_counter_key(url: &str) -> String {
        format!("{TERM_COUNTER_PREFIX}{url}")
    }

    /// Number of times `term` appears at `url`, 0 when absent
    pub fn count(&self, url: &str, term: &str) -> StoreResult<u64> {
        let value = self.store.hash_get(&Self::term_counter_key(url), term)?;
        Ok(value.and_then(|v| v.parse().ok()).unwrap_or(0))
    }

    /// All term-set keys currently in the store (diagnostics)
    pub fn url_set_keys(&self) -> StoreResult<HashSet<String>> {
        self.store
            .keys_matching(&format!("{URL_SET_PREFIX}*"))
    }

    /// All per-page record keys currently in the store (diagnostics)
    pub fn term_counter_keys(&self) -> StoreResult<HashSet<String>> {
        self.store
            .keys_matching(&format!("{TERM_COUNTER_PREFIX}*"))
    }

    /// The set of terms that have been indexed (diagnostics)
    pub fn terms(&self) -> StoreResult<HashSet<String>> {
        Ok(self
            .url_set_keys()?
            .into_iter()
            .map(|key| key[URL_SET_PREFIX.len()..].to_string())
            .collect())
    }

    /// Deletes every term set in one atomic batch
    ///
    /// Maintenance operation; enumeration and deletion are not transactional
    /// with concurrent writers. Idempotent when nothing matches.
    pub fn delete_url_sets(&mut self) -> StoreResult<()> {
        let keys = self.url_set_keys()?;
        self.delete_keys(keys)
    }

    /// Deletes every per-page record in one atomic batch
    pub fn delete_term_counters(&mut self) -> StoreResult<()> {
        let keys = self.term_counter_keys()?;
        self.delete_keys(keys)
    }

    /// Deletes everything in the store in one atomic batch
    pub fn delete_all(&mut self) -> StoreResult<()> {
        let keys = self.store.keys_matching("*")?;
        self.delete_keys(keys)
    }

    fn delete_keys(&mut self, keys: HashSet<String>) -> StoreResult<()> {
        let commands = keys
            .into_iter()
            .map(|key| StoreCommand::DeleteKey { key })
            .collect();
        self.store.execute_batch(commands)
    }

    /// Pushes a counter's contents to the store as one atomic batch
    ///
    /// Clears the page's prior record first, so counts from an earlier
    /// version of the page never survive a re-index.
    fn push_counter(&mut self, tc: &TermCounter) -> StoreResult<()> {
        let url = tc.label();
        let record_key = Self::term_counter_key(url);

        let mut commands = vec![StoreCommand::DeleteKey {
            key: record_key.clone(),
        }];
        for (term, count) in tc.iter() {
            commands.push(StoreCommand::HashSet {
                key: record_key.clone(),
                field: term.to_string(),
                value: count.to_string(),
            });
            commands.push(StoreCommand::SetAdd {
                key: Self::url_set_key(term),
                member: url.to_string(),
            });
        }

        self.store.execute_batch(commands)
    }
}

impl<S: Store> Index for PersistentIndex<S> {
    fn is_indexed(&self, url: &str) -> StoreResult<bool> {
        self.store.key_exists(&Self::term_counter_key(url))
    }

    fn index_page(&mut self, url: &str, blocks: &[String]) -> StoreResult<()> {
        let mut tc = TermCounter::new(url);
        tc.process_blocks(blocks);

        tracing::debug!(url, terms = tc.term_count(), "pushing term counts");
        self.push_counter(&tc)
    }

    fn urls_for_term(&self, term: &str) -> StoreResult<HashSet<String>> {
        self.store.set_members(&Self::url_set_key(term))
    }

    fn counts_for_term(&self, term: &str) -> StoreResult<HashMap<String, u64>> {
        let mut counts = HashMap::new();
        for url in self.urls_for_term(term)? {
            let count = self.count(&url, term)?;
            counts.insert(url, count);
        }
        Ok(counts)
    }
}
