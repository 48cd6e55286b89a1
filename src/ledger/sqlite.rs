// 🗄️ SQLite ledger - persistent world state + append-only key history
//
// world_state holds the current value of every key. history gets one row per
// committed write, tagged with the transaction id, so a key's full lifecycle
// stays queryable even though the contract only ever appends.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use super::{KeyValue, Ledger, WriteSet};
use crate::error::{LedgerError, LedgerResult};

/// One committed write of a key
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub tx_id: String,
    pub key: String,
    pub value: Vec<u8>,
    pub committed_at: DateTime<Utc>,
}

pub struct SqliteLedger {
    conn: Connection,
}

impl SqliteLedger {
    pub fn open(path: &Path) -> LedgerResult<Self> {
        let conn = Connection::open(path).map_err(|source| LedgerError::Open {
            path: path.display().to_string(),
            source,
        })?;
        setup_ledger(&conn)?;
        debug!(path = %path.display(), "ledger opened");
        Ok(SqliteLedger { conn })
    }

    pub fn open_in_memory() -> LedgerResult<Self> {
        let conn = Connection::open_in_memory()?;
        setup_ledger(&conn)?;
        Ok(SqliteLedger { conn })
    }

    /// Every committed write of `key`, oldest first
    pub fn get_history_for_key(&self, key: &str) -> LedgerResult<Vec<HistoryEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT tx_id, key, value, committed_at
             FROM history
             WHERE key = ?1
             ORDER BY id ASC",
        )?;

        let entries = stmt
            .query_map(params![key], |row| {
                Ok(HistoryEntry {
                    tx_id: row.get(0)?,
                    key: row.get(1)?,
                    value: row.get(2)?,
                    committed_at: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Number of keys in world state
    pub fn count_keys(&self) -> LedgerResult<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM world_state", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn setup_ledger(conn: &Connection) -> LedgerResult<()> {
    // WAL for crash recovery (in-memory databases silently keep "memory")
    let journal_mode: String =
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
    debug!(%journal_mode, "ledger journal mode");

    // TEXT keys compare with the default BINARY collation, i.e. byte order,
    // which is the order range scans must return
    conn.execute(
        "CREATE TABLE IF NOT EXISTS world_state (
            key TEXT PRIMARY KEY NOT NULL,
            value BLOB NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS history (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tx_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value BLOB NOT NULL,
            committed_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_history_key ON history(key)",
        [],
    )?;

    Ok(())
}

impl Ledger for SqliteLedger {
    fn get_state(&self, key: &str) -> LedgerResult<Vec<u8>> {
        let value: Option<Vec<u8>> = self
            .conn
            .query_row(
                "SELECT value FROM world_state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value.unwrap_or_default())
    }

    /// Direct write outside a transaction. Not recorded in history.
    fn put_state(&mut self, key: &str, value: &[u8]) -> LedgerResult<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO world_state (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn get_state_by_range(&self, start_key: &str, end_key: &str) -> LedgerResult<Vec<KeyValue>> {
        let mut stmt = self.conn.prepare(
            "SELECT key, value FROM world_state
             WHERE (?1 = '' OR key >= ?1) AND (?2 = '' OR key < ?2)
             ORDER BY key ASC",
        )?;

        let entries = stmt
            .query_map(params![start_key, end_key], |row| {
                Ok(KeyValue {
                    key: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Applies the whole write set in one SQLite transaction
    fn commit(&mut self, tx_id: &str, write_set: &WriteSet) -> LedgerResult<()> {
        let committed_at = Utc::now();
        let tx = self.conn.transaction()?;

        for (key, value) in write_set.iter() {
            tx.execute(
                "INSERT OR REPLACE INTO world_state (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
            tx.execute(
                "INSERT INTO history (tx_id, key, value, committed_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![tx_id, key, value, committed_at],
            )?;
        }

        tx.commit()?;
        debug!(tx_id, writes = write_set.len(), "write set committed");
        Ok(())
    }
}
