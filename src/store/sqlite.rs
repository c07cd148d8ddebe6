//! SQLite store backend
//!
//! Maps the key-value contract onto two tables: `hashes(key, field, value)`
//! and `sets(key, member)`. Atomic batches run inside a single SQLite
//! transaction, so a failed batch leaves no partial state behind.

use crate::store::{Store, StoreCommand, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::{HashMap, HashSet};
use std::path::Path;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS hashes (
    key TEXT NOT NULL,
    field TEXT NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (key, field)
);

CREATE TABLE IF NOT EXISTS sets (
    key TEXT NOT NULL,
    member TEXT NOT NULL,
    PRIMARY KEY (key, member)
);

CREATE INDEX IF NOT EXISTS idx_hashes_key ON hashes(key);
CREATE INDEX IF NOT EXISTS idx_sets_key ON sets(key);
";

/// SQLite-backed store
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (or creates) a store database at the given path
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// Creates a store backed by an in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self { conn })
    }

    /// Translates a `*`-glob pattern into a SQL LIKE pattern
    fn like_pattern(pattern: &str) -> String {
        let mut like = String::with_capacity(pattern.len());
        for c in pattern.chars() {
            match c {
                '*' => like.push('%'),
                '%' | '_' | '\\' => {
                    like.push('\\');
                    like.push(c);
                }
                _ => like.push(c),
            }
        }
        like
    }
}

impl Store for SqliteStore {
    fn hash_set(&mut self, key: &str, field: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO hashes (key, field, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(key, field) DO UPDATE SET value = excluded.value",
            params![key, field, value],
        )?;
        Ok(())
    }

    fn hash_get(&self, key: &str, field: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM hashes WHERE key = ?1 AND field = ?2",
                params![key, field],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn hash_get_all(&self, key: &str) -> StoreResult<HashMap<String, String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT field, value FROM hashes WHERE key = ?1")?;
        let rows = stmt.query_map(params![key], |row| Ok((row.get(0)?, row.get(1)?)))?;

        let mut fields = HashMap::new();
        for row in rows {
            let (field, value): (String, String) = row?;
            fields.insert(field, value);
        }
        Ok(fields)
    }

    fn hash_delete(&mut self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM hashes WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn set_add(&mut self, key: &str, member: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO sets (key, member) VALUES (?1, ?2)",
            params![key, member],
        )?;
        Ok(())
    }

    fn set_members(&self, key: &str) -> StoreResult<HashSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT member FROM sets WHERE key = ?1")?;
        let rows = stmt.query_map(params![key], |row| row.get(0))?;

        let mut members = HashSet::new();
        for row in rows {
            members.insert(row?);
        }
        Ok(members)
    }

    fn key_exists(&self, key: &str) -> StoreResult<bool> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM hashes WHERE key = ?1)
                 OR EXISTS (SELECT 1 FROM sets WHERE key = ?1)",
            params![key],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    fn keys_matching(&self, pattern: &str) -> StoreResult<HashSet<String>> {
        let like = Self::like_pattern(pattern);
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT key FROM hashes WHERE key LIKE ?1 ESCAPE '\\'
             UNION
             SELECT DISTINCT key FROM sets WHERE key LIKE ?1 ESCAPE '\\'",
        )?;
        let rows = stmt.query_map(params![like], |row| row.get(0))?;

        let mut keys = HashSet::new();
        for row in rows {
            keys.insert(row?);
        }
        Ok(keys)
    }

    fn execute_batch(&mut self, commands: Vec<StoreCommand>) -> StoreResult<()> {
        let tx = self.conn.transaction()?;

        for command in commands {
            match command {
                StoreCommand::HashSet { key, field, value } => {
                    tx.execute(
                        "INSERT INTO hashes (key, field, value) VALUES (?1, ?2, ?3)
                         ON CONFLICT(key, field) DO UPDATE SET value = excluded.value",
                        params![key, field, value],
                    )?;
                }
                StoreCommand::SetAdd { key, member } => {
                    tx.execute(
                        "INSERT OR IGNORE INTO sets (key, member) VALUES (?1, ?2)",
                        params![key, member],
                    )?;
                }
                StoreCommand::DeleteKey { key } => {
                    tx.execute("DELETE FROM hashes WHERE key = ?1", params![key])?;
                    tx.execute("DELETE FROM sets WHERE key = ?1", params![key])?;
                }
            }
        }

        tx.commit()?;
        Ok(())
    }
}
