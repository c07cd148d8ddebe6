//! In-memory store backend
//!
//! Holds hashes and sets in plain `HashMap`s. Batches are applied under the
//! single `&mut` borrow, so they are trivially atomic: individual commands
//! cannot fail and no reader can observe an in-between state.

use crate::store::{glob_match, Store, StoreCommand, StoreResult};
use std::collections::{HashMap, HashSet};

/// HashMap-backed store, useful for tests and single-process runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    hashes: HashMap<String, HashMap<String, String>>,
    sets: HashMap<String, HashSet<String>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn apply(&mut self, command: StoreCommand) {
        match command {
            StoreCommand::HashSet { key, field, value } => {
                self.hashes.entry(key).or_default().insert(field, value);
            }
            StoreCommand::SetAdd { key, member } => {
                self.sets.entry(key).or_default().insert(member);
            }
            StoreCommand::DeleteKey { key } => {
                self.hashes.remove(&key);
                self.sets.remove(&key);
            }
        }
    }
}

impl Store for MemoryStore {
    fn hash_set(&mut self, key: &str, field: &str, value: &str) -> StoreResult<()> {
        self.apply(StoreCommand::HashSet {
            key: key.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn hash_get(&self, key: &str, field: &str) -> StoreResult<Option<String>> {
        Ok(self
            .hashes
            .get(key)
            .and_then(|fields| fields.get(field))
            .cloned())
    }

    fn hash_get_all(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        Ok(self.hashes.get(key).cloned().unwrap_or_default())
    }

    fn hash_delete(&mut self, key: &str) -> StoreResult<()> {
        self.hashes.remove(key);
        Ok(())
    }

    fn set_add(&mut self, key: &str, member: &str) -> StoreResult<()> {
        self.apply(StoreCommand::SetAdd {
            key: key.to_string(),
            member: member.to_string(),
        });
        Ok(())
    }

    fn set_members(&self, key: &str) -> StoreResult<HashSet<String>> {
        Ok(self.sets.get(key).cloned().unwrap_or_default())
    }

    fn key_exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.hashes.contains_key(key) || self.sets.contains_key(key))
    }

    fn keys_matching(&self, pattern: &str) -> StoreResult<HashSet<String>> {
        Ok(self
            .hashes
            .keys()
            .chain(self.sets.keys())
            .filter(|key| glob_match(pattern, key))
            .cloned()
            .collect())
    }

    fn execute_batch(&mut self, commands: Vec<StoreCommand>) -> StoreResult<()> {
        for command in commands {
            self.apply(command);
        }
        Ok(())
    }
}
