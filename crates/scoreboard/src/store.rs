//! Score persistence: one append-only table of (name, score) rows.

use std::path::Path;
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection};
use thiserror::Error;

use crate::protocol::ScoreboardEntry;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("score store lock poisoned")]
    Poisoned,
}

/// Storage behind the scoreboard endpoints
pub trait ScoreStore: Send + Sync {
    fn insert(&self, name: &str, score: u32) -> Result<(), StoreError>;

    /// All rows, highest score first; ties keep insertion order
    fn list(&self) -> Result<Vec<ScoreboardEntry>, StoreError>;
}

/// SQLite-backed store
#[derive(Clone)]
pub struct SqliteScoreStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteScoreStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::init(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS scoreboard (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                score INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            connection: Arc::new(Mutex::new(conn)),
        })
    }
}

impl ScoreStore for SqliteScoreStore {
    fn insert(&self, name: &str, score: u32) -> Result<(), StoreError> {
        let conn = self.connection.lock().map_err(|_| StoreError::Poisoned)?;
        conn.execute(
            "INSERT INTO scoreboard (name, score) VALUES (?1, ?2)",
            params![name, score],
        )?;
        Ok(())
    }

    fn list(&self) -> Result<Vec<ScoreboardEntry>, StoreError> {
        let conn = self.connection.lock().map_err(|_| StoreError::Poisoned)?;
        let mut stmt = conn.prepare("SELECT name, score FROM scoreboard ORDER BY score DESC, id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(ScoreboardEntry {
                name: row.get(0)?,
                score: row.get(1)?,
            })
        })?;
        let entries = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_list_sorted() {
        let store = SqliteScoreStore::open_in_memory().unwrap();
        store.insert("low", 100).unwrap();
        store.insert("high", 800).unwrap();
        store.insert("mid", 300).unwrap();

        let names: Vec<String> = store.list().unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn duplicate_names_and_ties_are_kept() {
        let store = SqliteScoreStore::open_in_memory().unwrap();
        store.insert("ada", 500).unwrap();
        store.insert("bob", 500).unwrap();
        store.insert("ada", 500).unwrap();

        let rows = store.list().unwrap();
        assert_eq!(rows.len(), 3);
        let names: Vec<&str> = rows.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["ada", "bob", "ada"]);
    }

    #[test]
    fn file_store_persists_between_opens() {
        let path = std::env::temp_dir().join(format!(
            "scoreboard-test-{}.sqlite",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        SqliteScoreStore::open(&path).unwrap().insert("ada", 42).unwrap();
        let rows = SqliteScoreStore::open(&path).unwrap().list().unwrap();
        assert_eq!(rows, vec![ScoreboardEntry { name: "ada".to_string(), score: 42 }]);

        let _ = std::fs::remove_file(&path);
    }
}
