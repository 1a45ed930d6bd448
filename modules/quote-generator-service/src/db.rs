//! SQLite key-value slots backing the quote generator's persistence.
//!
//! The durable slot lives in the configured database file. The session slot
//! is a private in-memory connection, so its contents last exactly as long as
//! the running process.

use rusqlite::{Connection, Result as SqliteResult};
use std::sync::Mutex;

/// Which key-value slot an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Durable,
    Session,
}

pub struct Db {
    durable: Mutex<Connection>,
    session: Mutex<Connection>,
}

impl Db {
    pub fn open(path: &str) -> SqliteResult<Self> {
        let durable = if path == ":memory:" {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        durable.execute_batch("PRAGMA journal_mode=WAL;")?;
        let session = Connection::open_in_memory()?;

        create_tables(&durable)?;
        create_tables(&session)?;

        Ok(Self {
            durable: Mutex::new(durable),
            session: Mutex::new(session),
        })
    }

    fn conn(&self, slot: Slot) -> Result<std::sync::MutexGuard<'_, Connection>, String> {
        let lock = match slot {
            Slot::Durable => &self.durable,
            Slot::Session => &self.session,
        };
        lock.lock()
            .map_err(|_| format!("{:?} storage lock poisoned", slot))
    }

    pub fn get(&self, slot: Slot, key: &str) -> Result<Option<String>, String> {
        let conn = self.conn(slot)?;
        let result = conn.query_row(
            "SELECT value FROM kv_slots WHERE key = ?1",
            rusqlite::params![key],
            |row| row.get::<_, String>(0),
        );
        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(format!("Failed to read '{}': {}", key, e)),
        }
    }

    /// Overwrites any previous value under `key`.
    pub fn set(&self, slot: Slot, key: &str, value: &str) -> Result<(), String> {
        let conn = self.conn(slot)?;
        conn.execute(
            "INSERT INTO kv_slots (key, value, updated_at)
             VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = excluded.updated_at",
            rusqlite::params![key, value],
        )
        .map_err(|e| format!("Failed to write '{}': {}", key, e))?;
        Ok(())
    }
}

fn create_tables(conn: &Connection) -> SqliteResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_slots (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;
    Ok(())
}
