//! Search index contract and implementations
//!
//! An index keeps two relations consistent on every write:
//!
//! 1. term → set of URLs whose content contains that term
//! 2. URL → per-page term counts
//!
//! [`Index`] is the storage-independent contract the crawler talks to.
//! [`MemoryIndex`] holds both relations in process memory; [`PersistentIndex`]
//! records them through a key-value [`Store`](crate::store::Store) with
//! atomic write batches.

mod memory;
mod persistent;

pub use memory::MemoryIndex;
pub use persistent::PersistentIndex;

use crate::store::StoreResult;
use std::collections::{HashMap, HashSet};

/// Abstract index contract
///
/// `index_page` is the sole mutation entry point; callers never write the
/// two relations directly.
pub trait Index {
    /// True iff a per-page term-count record exists for `url`
    ///
    /// Never fails on a URL that was never seen; that is simply `false`.
    fn is_indexed(&self, url: &str) -> StoreResult<bool>;

    /// Counts the terms in `blocks` and durably records both relations for
    /// `url`, overwriting any prior record for the same URL
    fn index_page(&mut self, url: &str, blocks: &[String]) -> StoreResult<()>;

    /// The set of URLs whose indexed content contains `term`
    fn urls_for_term(&self, term: &str) -> StoreResult<HashSet<String>>;

    /// Per-URL occurrence counts for `term`
    ///
    /// Derived by looking up each member URL's per-page count. A URL present
    /// in the term's set without a per-page count is reported as count 0.
    fn counts_for_term(&self, term: &str) -> StoreResult<HashMap<String, u64>>;
}
