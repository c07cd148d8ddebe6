//! Key-value store contract and backends
//!
//! The index persists its state through the [`Store`] trait: string→string
//! maps (hashes), sets of strings, key existence checks, key pattern
//! enumeration, and atomic multi-command batches. Two backends are provided:
//! an in-memory store and a SQLite-backed store.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Batch execution failed: {0}")]
    Batch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A single write command, executable standalone or inside an atomic batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    /// Set a field of the hash at `key`
    HashSet {
        key: String,
        field: String,
        value: String,
    },
    /// Add a member to the set at `key`
    SetAdd { key: String, member: String },
    /// Delete a key entirely (hash or set)
    DeleteKey { key: String },
}

/// Trait for key-value store backends
///
/// Implementations must guarantee that [`Store::execute_batch`] is atomic: if
/// the batch fails partway, no partial state is visible to readers.
pub trait Store {
    /// Sets a field of the hash stored at `key`
    fn hash_set(&mut self, key: &str, field: &str, value: &str) -> StoreResult<()>;

    /// Gets a field of the hash stored at `key`, or None if absent
    fn hash_get(&self, key: &str, field: &str) -> StoreResult<Option<String>>;

    /// Gets all field/value pairs of the hash stored at `key`
    fn hash_get_all(&self, key: &str) -> StoreResult<HashMap<String, String>>;

    /// Deletes the entire hash stored at `key` (no-op if absent)
    fn hash_delete(&mut self, key: &str) -> StoreResult<()>;

    /// Adds a member to the set stored at `key`
    fn set_add(&mut self, key: &str, member: &str) -> StoreResult<()>;

    /// Returns all members of the set stored at `key` (empty if absent)
    fn set_members(&self, key: &str) -> StoreResult<HashSet<String>>;

    /// True if any value (hash or set) exists at `key`
    fn key_exists(&self, key: &str) -> StoreResult<bool>;

    /// Enumerates keys matching a glob pattern (`*` wildcard only)
    fn keys_matching(&self, pattern: &str) -> StoreResult<HashSet<String>>;

    /// Executes the commands as one atomic batch
    ///
    /// On failure, no command's effect is visible.
    fn execute_batch(&mut self, commands: Vec<StoreCommand>) -> StoreResult<()>;
}

/// Matches a key against a glob pattern supporting only the `*` wildcard
pub(crate) fn glob_match(pattern: &str, key: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == key;
    }

    let first = parts[0];
    let last = parts[parts.len() - 1];

    if !key.starts_with(first) {
        return false;
    }
    let mut rest = &key[first.len()..];

    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        match rest.find(part) {
            Some(i) => rest = &rest[i + part.len()..],
            None => return false,
        }
    }

    rest.ends_with(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_exact() {
        assert!(glob_match("urlset:rust", "urlset:rust"));
        assert!(!glob_match("urlset:rust", "urlset:rusty"));
    }

    #[test]
    fn test_glob_prefix() {
        assert!(glob_match("urlset:*", "urlset:rust"));
        assert!(glob_match("urlset:*", "urlset:"));
        assert!(!glob_match("urlset:*", "termcounter:rust"));
    }

    #[test]
    fn test_glob_suffix_and_middle() {
        assert!(glob_match("*:rust", "urlset:rust"));
        assert!(glob_match("urlset:*st", "urlset:rust"));
        assert!(!glob_match("urlset:*st", "urlset:rusty"));
    }

    #[test]
    fn test_glob_everything() {
        assert!(glob_match("*", "anything"));
        assert!(glob_match("*", ""));
    }

    #[test]
    fn test_glob_no_overlap() {
        // the tail anchor must not reuse characters consumed by the head
        assert!(!glob_match("a*a", "a"));
        assert!(glob_match("a*a", "aa"));
    }
}
