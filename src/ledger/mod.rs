//! Ordered key-value ledger consumed by the contract.
//!
//! The contract needs exactly three calls from the platform: point read,
//! point write, and an ordered range scan. Backends:
//!
//! - [`MemoryLedger`] - `BTreeMap`, for tests and one-shot runs
//! - [`SqliteLedger`] - persistent world state plus per-key history
//! - [`TxStub`] - buffers one transaction's writes over a committed ledger
//!
//! Range bounds follow the platform convention: `start` inclusive, `end`
//! exclusive, and an empty string leaves that side unbounded.

pub mod memory;
pub mod sqlite;
pub mod stub;

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};

use crate::error::LedgerResult;

pub use memory::MemoryLedger;
pub use sqlite::{HistoryEntry, SqliteLedger};
pub use stub::TxStub;

/// One entry returned by a range scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

pub trait Ledger {
    /// Value stored at `key`, or an empty vector when nothing is stored
    fn get_state(&self, key: &str) -> LedgerResult<Vec<u8>>;

    fn put_state(&mut self, key: &str, value: &[u8]) -> LedgerResult<()>;

    /// Entries with `start_key <= key < end_key`, in ascending key order
    fn get_state_by_range(&self, start_key: &str, end_key: &str) -> LedgerResult<Vec<KeyValue>>;

    /// Apply a simulated transaction's writes.
    ///
    /// Backends that can do so apply the whole set atomically.
    fn commit(&mut self, tx_id: &str, write_set: &WriteSet) -> LedgerResult<()> {
        let _ = tx_id;
        for (key, value) in write_set.iter() {
            self.put_state(key, value)?;
        }
        Ok(())
    }
}

/// Whether `key` falls inside the half-open scan range
pub(crate) fn in_range(key: &str, start_key: &str, end_key: &str) -> bool {
    (start_key.is_empty() || key >= start_key) && (end_key.is_empty() || key < end_key)
}

// ============================================================================
// WRITE SET
// ============================================================================

/// Writes produced by simulating one transaction, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteSet {
    entries: BTreeMap<String, Vec<u8>>,
}

impl WriteSet {
    pub(crate) fn from_entries(entries: BTreeMap<String, Vec<u8>>) -> Self {
        WriteSet { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// SHA-256 over length-prefixed key/value pairs, hex encoded.
    ///
    /// Two nodes that simulated the same transaction agree on this digest iff
    /// their write sets are byte-identical.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        for (key, value) in self.iter() {
            hasher.update((key.len() as u64).to_be_bytes());
            hasher.update(key.as_bytes());
            hasher.update((value.len() as u64).to_be_bytes());
            hasher.update(value);
        }
        format!("{:x}", hasher.finalize())
    }
}
